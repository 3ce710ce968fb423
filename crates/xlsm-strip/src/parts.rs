//! Part names, content types and relationship types involved in macro stripping.
//!
//! Matching is exact string equality everywhere, so every literal the rewriter compares against
//! lives here.

/// ZIP entry holding the package content-type declarations.
pub const CONTENT_TYPES_MEMBER: &str = "[Content_Types].xml";
/// ZIP entry holding the workbook part's relationships.
pub const WORKBOOK_RELS_MEMBER: &str = "xl/_rels/workbook.xml.rels";
/// ZIP entry holding the VBA project binary.
pub const VBA_PROJECT_MEMBER: &str = "xl/vbaProject.bin";

/// OPC part name of the main workbook part, as written in `[Content_Types].xml`.
pub const WORKBOOK_PART_NAME: &str = "/xl/workbook.xml";
/// OPC part name of the VBA project, as written in `[Content_Types].xml`.
pub const VBA_PROJECT_PART_NAME: &str = "/xl/vbaProject.bin";

/// Workbook content type used by `.xlsm` packages.
pub const MACRO_ENABLED_WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.ms-excel.sheet.macroEnabled.main+xml";
/// Workbook content type used by `.xlsx` packages.
pub const WORKBOOK_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";

/// Relationship type linking the workbook to its VBA project.
pub const VBA_PROJECT_REL_TYPE: &str =
    "http://schemas.microsoft.com/office/2006/relationships/vbaProject";

pub(crate) const CONTENT_TYPES_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/content-types";
pub(crate) const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";
