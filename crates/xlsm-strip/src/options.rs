/// Default maximum uncompressed size of a metadata part inflated into memory for patching.
///
/// Guards against ZIP bombs and forged size fields. Real `[Content_Types].xml` and workbook
/// relationship parts are a few kilobytes.
pub const DEFAULT_MAX_PART_BYTES: u64 = 256 * 1024 * 1024; // 256MiB

/// Tunables for [`crate::rewrite_package`] and friends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripOptions {
    /// Largest uncompressed size accepted for a part that has to be parsed.
    ///
    /// Parts that are raw-copied or dropped are never inflated and are not subject to this
    /// limit.
    pub max_part_bytes: u64,
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            max_part_bytes: DEFAULT_MAX_PART_BYTES,
        }
    }
}
