use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use xlsm_strip::working_copy::is_macro_enabled_path;

#[derive(Parser, Debug)]
#[command(
    name = "xlsm-strip",
    version,
    about = "Strip VBA macros from an .xlsm workbook and write a plain .xlsx."
)]
struct Cli {
    /// Macro-enabled workbook to read. Never modified.
    input: PathBuf,

    /// Destination `.xlsx`. Parent directories are created; an existing file is replaced.
    output: PathBuf,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
            // Nothing useful to do if the terminal is gone.
            let _ = err.print();
            return code;
        }
    };

    if !cli.input.exists() {
        eprintln!("ERROR: Input file not found: {}", cli.input.display());
        return ExitCode::FAILURE;
    }

    match strip(&cli.input, &cli.output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: Failed to strip macros: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn strip(input: &Path, output: &Path) -> Result<()> {
    if !is_macro_enabled_path(input) {
        log::warn!("{} does not have an .xlsm extension", input.display());
    }

    let report = xlsm_strip::rewrite(input, output).with_context(|| {
        format!("convert {} to {}", input.display(), output.display())
    })?;
    log::info!("{}: {report}", output.display());
    if !report.stripped_anything() {
        log::warn!("{} contained no macro markers", input.display());
    }

    let mut stdout = io::stdout().lock();
    match writeln!(
        stdout,
        "SUCCESS: Stripped macros from {} -> {}",
        input.display(),
        output.display()
    ) {
        Ok(()) => Ok(()),
        // The conversion already succeeded; a closed pipe only loses the status line.
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context("write status line"),
    }
}
