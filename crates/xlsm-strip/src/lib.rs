//! Convert macro-enabled workbooks (`.xlsm`) into macro-free ones (`.xlsx`).
//!
//! The conversion is a single streaming pass over the Open Packaging Convention (OPC) ZIP:
//!
//! - `xl/vbaProject.bin` is dropped,
//! - `[Content_Types].xml` loses its `vbaProject.bin` override and the workbook is re-declared
//!   with the plain `.xlsx` workbook content type,
//! - `xl/_rels/workbook.xml.rels` loses its `vbaProject` relationships,
//! - every other entry is raw-copied, so worksheets, styles, charts, pivot caches and the like
//!   come out byte-for-byte identical.
//!
//! [`rewrite`] is the path-based entry point and writes its output atomically.
//! [`rewrite_package`] works on arbitrary `Read + Seek` / `Write + Seek` streams.

mod atomic;
mod content_types;
mod error;
mod inspect;
mod options;
pub mod parts;
mod relationships;
mod report;
mod rewrite;
pub mod working_copy;
mod xml;
mod zip_util;

pub use content_types::patch_content_types;
pub use error::StripError;
pub use inspect::{inspect, inspect_package, MacroMarkers};
pub use options::{StripOptions, DEFAULT_MAX_PART_BYTES};
pub use relationships::remove_vba_relationships;
pub use report::{MemberAction, MemberOutcome, StripReport};
pub use rewrite::{
    rewrite, rewrite_package, rewrite_with_options, MemberPolicy, PatchTarget,
};
pub use xml::XmlPatchError;
