use crate::parts::{
    CONTENT_TYPES_NS, MACRO_ENABLED_WORKBOOK_CONTENT_TYPE, VBA_PROJECT_PART_NAME,
    WORKBOOK_CONTENT_TYPE, WORKBOOK_PART_NAME,
};
use crate::xml::{attribute_value, filter_elements, with_attribute, ElementAction, XmlPatchError};

/// Rewrite `[Content_Types].xml` so it no longer describes a macro-enabled package.
///
/// - The `/xl/workbook.xml` override is switched from the macro-enabled workbook content type to
///   the plain workbook content type. The element stays where it is.
/// - The `/xl/vbaProject.bin` override is removed.
///
/// Returns `Ok(None)` when neither rule applies, in which case the caller should keep the
/// original bytes.
pub fn patch_content_types(content_types_xml: &[u8]) -> Result<Option<Vec<u8>>, XmlPatchError> {
    filter_elements(content_types_xml, CONTENT_TYPES_NS, "Override", |e| {
        match attribute_value(e, "PartName")?.as_deref() {
            Some(VBA_PROJECT_PART_NAME) => Ok(ElementAction::Remove),
            Some(WORKBOOK_PART_NAME) => {
                let content_type = attribute_value(e, "ContentType")?;
                if content_type.as_deref() == Some(MACRO_ENABLED_WORKBOOK_CONTENT_TYPE) {
                    let patched = with_attribute(e, "ContentType", WORKBOOK_CONTENT_TYPE)?;
                    Ok(ElementAction::Replace(patched))
                } else {
                    Ok(ElementAction::Keep)
                }
            }
            _ => Ok(ElementAction::Keep),
        }
    })
}
