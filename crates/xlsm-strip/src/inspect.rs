use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::rewrite::{MemberPolicy, PatchTarget};
use crate::zip_util::read_member_with_limit;
use crate::{StripError, StripOptions};

/// Macro-related markers still present in a package.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MacroMarkers {
    /// `xl/vbaProject.bin` exists.
    pub has_vba_project: bool,
    /// `[Content_Types].xml` declares a macro-enabled workbook or a `vbaProject.bin` override.
    pub macro_content_types: bool,
    /// `xl/_rels/workbook.xml.rels` has a `vbaProject` relationship.
    pub vba_relationship: bool,
}

impl MacroMarkers {
    pub fn is_clean(&self) -> bool {
        !self.has_vba_project && !self.macro_content_types && !self.vba_relationship
    }
}

/// Report which macro markers a package carries, without writing anything.
///
/// A metadata part counts as macro-bearing exactly when the rewriter would change it.
pub fn inspect_package<R: Read + Seek>(
    reader: R,
    options: &StripOptions,
) -> Result<MacroMarkers, StripError> {
    let mut archive = ZipArchive::new(reader)?;
    let mut markers = MacroMarkers::default();

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let name = file.name().to_string();

        match MemberPolicy::for_member(&name) {
            MemberPolicy::Drop => markers.has_vba_project = true,
            MemberPolicy::Copy => {}
            MemberPolicy::Patch(target) => {
                let declared_size = file.size();
                let bytes =
                    read_member_with_limit(&mut file, declared_size, &name, options.max_part_bytes)?;
                let needs_patch = target
                    .apply(&bytes)
                    .map_err(StripError::malformed(&name))?
                    .is_some();
                match target {
                    PatchTarget::ContentTypes => markers.macro_content_types = needs_patch,
                    PatchTarget::WorkbookRelationships => markers.vba_relationship = needs_patch,
                }
            }
        }
    }

    Ok(markers)
}

/// Path-based [`inspect_package`] with default options.
pub fn inspect(path: impl AsRef<Path>) -> Result<MacroMarkers, StripError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(StripError::InputNotFound(path.to_path_buf()));
    }
    let file = BufReader::new(File::open(path)?);
    inspect_package(file, &StripOptions::default())
}
