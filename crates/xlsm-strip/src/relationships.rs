use crate::parts::{RELATIONSHIPS_NS, VBA_PROJECT_REL_TYPE};
use crate::xml::{attribute_value, filter_elements, ElementAction, XmlPatchError};

/// Remove every `vbaProject` relationship from `xl/_rels/workbook.xml.rels`.
///
/// Returns `Ok(None)` when the part has no such relationship.
pub fn remove_vba_relationships(rels_xml: &[u8]) -> Result<Option<Vec<u8>>, XmlPatchError> {
    filter_elements(rels_xml, RELATIONSHIPS_NS, "Relationship", |e| {
        if attribute_value(e, "Type")?.as_deref() == Some(VBA_PROJECT_REL_TYPE) {
            Ok(ElementAction::Remove)
        } else {
            Ok(ElementAction::Keep)
        }
    })
}
