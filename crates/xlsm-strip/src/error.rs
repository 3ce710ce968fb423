use std::path::PathBuf;

use crate::xml::XmlPatchError;

#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("malformed xml in {part}: {source}")]
    MalformedXml {
        part: String,
        #[source]
        source: XmlPatchError,
    },
    #[error(
        "package part is too large to patch safely: {part} is {size} bytes (max {max} bytes)"
    )]
    PartTooLarge { part: String, size: u64, max: u64 },
}

impl StripError {
    pub(crate) fn malformed(part: &str) -> impl FnOnce(XmlPatchError) -> Self + '_ {
        move |source| StripError::MalformedXml {
            part: part.to_string(),
            source,
        }
    }
}
