use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::atomic::atomic_write;
use crate::content_types::patch_content_types;
use crate::parts::{CONTENT_TYPES_MEMBER, VBA_PROJECT_MEMBER, WORKBOOK_RELS_MEMBER};
use crate::relationships::remove_vba_relationships;
use crate::report::{MemberAction, MemberOutcome, StripReport};
use crate::xml::XmlPatchError;
use crate::zip_util::read_member_with_limit;
use crate::{StripError, StripOptions};

/// Metadata part that gets rewritten instead of copied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchTarget {
    ContentTypes,
    WorkbookRelationships,
}

impl PatchTarget {
    /// Apply the patch, returning `Ok(None)` when the part is already macro-free.
    pub fn apply(self, xml: &[u8]) -> Result<Option<Vec<u8>>, XmlPatchError> {
        match self {
            PatchTarget::ContentTypes => patch_content_types(xml),
            PatchTarget::WorkbookRelationships => remove_vba_relationships(xml),
        }
    }
}

/// Per-entry decision, made from the exact ZIP entry name alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberPolicy {
    Drop,
    Patch(PatchTarget),
    Copy,
}

impl MemberPolicy {
    pub fn for_member(name: &str) -> Self {
        match name {
            VBA_PROJECT_MEMBER => MemberPolicy::Drop,
            CONTENT_TYPES_MEMBER => MemberPolicy::Patch(PatchTarget::ContentTypes),
            WORKBOOK_RELS_MEMBER => MemberPolicy::Patch(PatchTarget::WorkbookRelationships),
            _ => MemberPolicy::Copy,
        }
    }
}

/// Convert the `.xlsm` at `source` into a macro-free package at `dest`.
///
/// `dest` is created or replaced atomically: on failure nothing is left at `dest` (or its
/// previous contents are kept). `source` is never modified.
pub fn rewrite(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
) -> Result<StripReport, StripError> {
    rewrite_with_options(source, dest, &StripOptions::default())
}

/// Like [`rewrite`], with explicit [`StripOptions`].
pub fn rewrite_with_options(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    options: &StripOptions,
) -> Result<StripReport, StripError> {
    let source = source.as_ref();
    let dest = dest.as_ref();

    if !source.exists() {
        return Err(StripError::InputNotFound(source.to_path_buf()));
    }

    info!(
        "stripping macros from {} -> {}",
        source.display(),
        dest.display()
    );

    let input = BufReader::new(File::open(source)?);
    let report = atomic_write(dest, |file| {
        rewrite_package(input, BufWriter::new(file), options)
    })?;

    info!(
        "stripped macros from {} -> {}: {report}",
        source.display(),
        dest.display()
    );
    Ok(report)
}

/// Streaming form of [`rewrite`].
///
/// Reads the source archive once, in central-directory order:
/// - `xl/vbaProject.bin` is dropped,
/// - `[Content_Types].xml` and `xl/_rels/workbook.xml.rels` are patched (their original bytes
///   are reused when no change is needed),
/// - every other entry is raw-copied, keeping its compressed bytes and metadata.
///
/// The output archive is finalized before this returns `Ok`.
pub fn rewrite_package<R: Read + Seek, W: Write + Seek>(
    mut input: R,
    output: W,
    options: &StripOptions,
) -> Result<StripReport, StripError> {
    let input_size = input.seek(SeekFrom::End(0))?;
    input.seek(SeekFrom::Start(0))?;

    let mut archive = ZipArchive::new(input)?;
    let mut zip = ZipWriter::new(output);
    let mut members = Vec::with_capacity(archive.len());

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();

        let action = match MemberPolicy::for_member(&name) {
            MemberPolicy::Drop => MemberAction::Dropped,
            MemberPolicy::Copy => {
                // Raw copy keeps the compressed stream, compression method, timestamps and
                // permissions exactly as they were.
                zip.raw_copy_file(file)?;
                MemberAction::Copied
            }
            MemberPolicy::Patch(target) => {
                let declared_size = file.size();
                let original =
                    read_member_with_limit(&mut file, declared_size, &name, options.max_part_bytes)?;

                let mut entry_options =
                    FileOptions::<()>::default().compression_method(CompressionMethod::Deflated);
                if let Some(modified) = file.last_modified() {
                    entry_options = entry_options.last_modified_time(modified);
                }
                if let Some(mode) = file.unix_mode() {
                    entry_options = entry_options.unix_permissions(mode);
                }

                let patched = target.apply(&original).map_err(StripError::malformed(&name))?;
                zip.start_file(name.as_str(), entry_options)?;
                match patched {
                    Some(bytes) => {
                        zip.write_all(&bytes)?;
                        MemberAction::Patched
                    }
                    None => {
                        zip.write_all(&original)?;
                        MemberAction::Unchanged
                    }
                }
            }
        };

        debug!("{name}: {action:?}");
        members.push(MemberOutcome { name, action });
    }

    let mut output = zip.finish()?;
    output.flush()?;
    let output_size = output.stream_position()?;

    Ok(StripReport {
        members,
        input_size,
        output_size,
    })
}
