//! Write-then-rename output so a failed rewrite never leaves a partial archive at the
//! requested path.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::StripError;

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` returns `Some("")` for bare relative file names like `book.xlsx`.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Run `write_fn` against a temp file next to `dest`, then move it into place.
///
/// Missing parent directories are created. If `write_fn` (or the flush/sync) fails, the temp
/// file is deleted and `dest` is left untouched, whether or not it existed before.
pub(crate) fn atomic_write<T>(
    dest: &Path,
    write_fn: impl FnOnce(&mut File) -> Result<T, StripError>,
) -> Result<T, StripError> {
    let dir = parent_dir_or_dot(dest);
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    let out = write_fn(tmp.as_file_mut())?;

    tmp.as_file_mut().flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(dest).map_err(|err| err.error)?;

    // The file is already in place; a failed directory sync is not a write failure.
    if let Err(err) = sync_parent_dir(dest) {
        log::warn!("could not sync directory of {}: {err}", dest.display());
    }

    Ok(out)
}

fn sync_parent_dir(path: &Path) -> std::io::Result<()> {
    File::open(parent_dir_or_dot(path))?.sync_all()
}
