use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesDecl, BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::{NsReader, Writer};

/// Failure to parse or rewrite one of the package metadata parts.
#[derive(Debug, thiserror::Error)]
pub enum XmlPatchError {
    #[error("part is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("not well-formed: {0}")]
    NotWellFormed(#[from] roxmltree::Error),
    #[error("xml error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("xml attribute error: {0}")]
    Attr(#[from] AttrError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with an element matched by [`filter_elements`].
#[derive(Debug)]
pub(crate) enum ElementAction {
    Keep,
    Replace(BytesStart<'static>),
    Remove,
}

/// Reject anything that is not a well-formed, namespace-valid UTF-8 document.
///
/// quick-xml only checks what it is asked to decode, so unmatched elements would otherwise pass
/// through with broken attributes, undefined entities or unbound prefixes.
pub(crate) fn check_well_formed(xml: &[u8]) -> Result<(), XmlPatchError> {
    let text = std::str::from_utf8(xml)?;
    roxmltree::Document::parse(text)?;
    Ok(())
}

/// Stream `xml` through quick-xml, letting `decide` keep, replace or remove every element whose
/// resolved namespace and local name equal `namespace`/`local`.
///
/// Removing a start tag drops its whole subtree. Replacements keep the element's position and
/// end tag.
///
/// Returns `Ok(None)` when nothing changed so callers can keep the original bytes. The document
/// is always checked for well-formedness first, so malformed input errors even when no element
/// matches.
pub(crate) fn filter_elements<F>(
    xml: &[u8],
    namespace: &str,
    local: &str,
    mut decide: F,
) -> Result<Option<Vec<u8>>, XmlPatchError>
where
    F: FnMut(&BytesStart<'_>) -> Result<ElementAction, XmlPatchError>,
{
    check_well_formed(xml)?;

    let mut reader = NsReader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Vec::with_capacity(xml.len() + 64));

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut removed_at: Option<usize> = None;
    let mut started = false;
    let mut changed = false;

    loop {
        let event = reader.read_event_into(&mut buf)?;

        if !started {
            started = true;
            if !matches!(event, Event::Decl(_) | Event::Eof) {
                write_default_declaration(&mut writer)?;
            }
        }

        match event {
            Event::Eof => break,
            Event::Decl(decl) => {
                if decl.encoding().is_some() {
                    writer.write_event(Event::Decl(decl))?;
                } else {
                    writer.write_event(Event::Decl(declaration_with_encoding(&decl)?))?;
                }
            }
            Event::Start(e) => {
                depth += 1;
                if removed_at.is_none() {
                    match matched_action(&reader, &e, namespace, local, &mut decide)? {
                        ElementAction::Keep => writer.write_event(Event::Start(e))?,
                        ElementAction::Replace(patched) => {
                            changed = true;
                            writer.write_event(Event::Start(patched))?;
                        }
                        ElementAction::Remove => {
                            changed = true;
                            removed_at = Some(depth);
                        }
                    }
                }
            }
            Event::Empty(e) => {
                if removed_at.is_none() {
                    match matched_action(&reader, &e, namespace, local, &mut decide)? {
                        ElementAction::Keep => writer.write_event(Event::Empty(e))?,
                        ElementAction::Replace(patched) => {
                            changed = true;
                            writer.write_event(Event::Empty(patched))?;
                        }
                        ElementAction::Remove => changed = true,
                    }
                }
            }
            Event::End(e) => {
                if removed_at == Some(depth) {
                    removed_at = None;
                } else if removed_at.is_none() {
                    writer.write_event(Event::End(e))?;
                }
                depth = depth.saturating_sub(1);
            }
            other => {
                if removed_at.is_none() {
                    writer.write_event(other)?;
                }
            }
        }
        buf.clear();
    }

    Ok(changed.then(|| writer.into_inner()))
}

/// Look up an unprefixed attribute, unescaping its value.
pub(crate) fn attribute_value(
    e: &BytesStart<'_>,
    key: &str,
) -> Result<Option<String>, XmlPatchError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Copy `e` with the value of attribute `key` replaced, keeping tag name and attribute order.
///
/// Other attributes keep their raw (escaped) value. The copy is always written with double
/// quotes, so a literal `"` from a single-quoted value is re-escaped.
pub(crate) fn with_attribute(
    e: &BytesStart<'_>,
    key: &str,
    value: &str,
) -> Result<BytesStart<'static>, XmlPatchError> {
    let mut patched = e.to_owned();
    patched.clear_attributes();
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key.as_bytes() {
            patched.push_attribute((key, value));
        } else {
            let raw = requote(attr.value.as_ref());
            patched.push_attribute((attr.key.as_ref(), raw.as_slice()));
        }
    }
    Ok(patched)
}

fn requote(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    for &b in raw {
        if b == b'"' {
            out.extend_from_slice(b"&quot;");
        } else {
            out.push(b);
        }
    }
    out
}

fn matched_action<F>(
    reader: &NsReader<&[u8]>,
    e: &BytesStart<'_>,
    namespace: &str,
    local: &str,
    decide: &mut F,
) -> Result<ElementAction, XmlPatchError>
where
    F: FnMut(&BytesStart<'_>) -> Result<ElementAction, XmlPatchError>,
{
    let (resolved, local_name) = reader.resolve_element(e.name());
    let in_namespace =
        matches!(resolved, ResolveResult::Bound(Namespace(ns)) if ns == namespace.as_bytes());
    if in_namespace && local_name.as_ref() == local.as_bytes() {
        decide(e)
    } else {
        Ok(ElementAction::Keep)
    }
}

fn write_default_declaration(writer: &mut Writer<Vec<u8>>) -> Result<(), XmlPatchError> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.get_mut().push(b'\n');
    Ok(())
}

fn declaration_with_encoding(decl: &BytesDecl<'_>) -> Result<BytesDecl<'static>, XmlPatchError> {
    let version = decl.version()?;
    let version = String::from_utf8_lossy(&version).into_owned();
    let standalone = match decl.standalone() {
        Some(value) => Some(String::from_utf8_lossy(&value?).into_owned()),
        None => None,
    };
    Ok(BytesDecl::new(&version, Some("UTF-8"), standalone.as_deref()).into_owned())
}
