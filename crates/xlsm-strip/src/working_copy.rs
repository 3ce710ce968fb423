//! Macro-free working copies kept next to `.xlsm` workbooks.
//!
//! Editors that cannot safely round-trip VBA work on `<stem>.working.xlsx` instead of the
//! original. The working copy is regenerated whenever the `.xlsm` is newer.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use log::{info, warn};

use crate::{rewrite, StripError};

const WORKING_COPY_SUFFIX: &str = ".working.xlsx";

/// True when `path` has an `.xlsm` extension (any case).
pub fn is_macro_enabled_path(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsm"))
}

/// `<dir>/<stem>.working.xlsx` for `<dir>/<stem>.xlsm`.
///
/// Only an `.xlsm` extension is replaced; any other file name keeps its extension, so
/// `book.xlsx` maps to `book.xlsx.working.xlsx` and never collides with a sibling workbook.
pub fn working_copy_path(xlsm: impl AsRef<Path>) -> PathBuf {
    let xlsm = xlsm.as_ref();
    let base = if is_macro_enabled_path(xlsm) {
        xlsm.file_stem()
    } else {
        xlsm.file_name()
    };
    let base = base.unwrap_or_default().to_string_lossy();
    xlsm.with_file_name(format!("{base}{WORKING_COPY_SUFFIX}"))
}

/// True when the working copy exists and is at least as new as `xlsm`.
///
/// Any filesystem error counts as "not up to date".
pub fn is_working_copy_up_to_date(xlsm: impl AsRef<Path>) -> bool {
    let xlsm = xlsm.as_ref();
    let working = working_copy_path(xlsm);
    if !working.exists() {
        return false;
    }

    match (modified(xlsm), modified(&working)) {
        (Ok(source), Ok(copy)) => copy >= source,
        (Err(err), _) | (_, Err(err)) => {
            warn!(
                "failed to check working copy status for {}: {err}",
                xlsm.display()
            );
            false
        }
    }
}

/// Return the working-copy path for `xlsm`, (re)generating it when missing or stale.
pub fn ensure_working_copy(xlsm: impl AsRef<Path>) -> Result<PathBuf, StripError> {
    let xlsm = xlsm.as_ref();
    let working = working_copy_path(xlsm);

    if is_working_copy_up_to_date(xlsm) {
        info!("working copy is up to date: {}", working.display());
        return Ok(working);
    }

    info!("creating working copy {}", working.display());
    rewrite(xlsm, &working)?;
    Ok(working)
}

/// Delete the working copy of `xlsm`, if any. Failures are logged, not returned.
pub fn cleanup_working_copy(xlsm: impl AsRef<Path>) {
    let working = working_copy_path(xlsm);
    if !working.exists() {
        return;
    }
    match fs::remove_file(&working) {
        Ok(()) => info!("removed working copy {}", working.display()),
        Err(err) => warn!(
            "failed to remove working copy {}: {err}",
            working.display()
        ),
    }
}

fn modified(path: &Path) -> std::io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}
