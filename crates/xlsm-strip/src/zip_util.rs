use std::io::Read;

use crate::StripError;

const INITIAL_CAPACITY_CAP: u64 = 64 * 1024;

/// Inflate a ZIP entry into memory, refusing anything larger than `max_bytes`.
///
/// `declared_size` is the entry's uncompressed size from the ZIP metadata. It is used for an
/// early rejection but not trusted: reads are capped at `max_bytes + 1` so a forged size field
/// cannot make us buffer more than the limit.
pub(crate) fn read_member_with_limit<R: Read>(
    file: &mut R,
    declared_size: u64,
    part: &str,
    max_bytes: u64,
) -> Result<Vec<u8>, StripError> {
    if declared_size > max_bytes {
        return Err(StripError::PartTooLarge {
            part: part.to_string(),
            size: declared_size,
            max: max_bytes,
        });
    }

    // The declared size only seeds the buffer; a forged header must not force a large allocation.
    let mut buf = Vec::with_capacity(declared_size.min(INITIAL_CAPACITY_CAP) as usize);
    let read_limit = max_bytes.checked_add(1).unwrap_or(u64::MAX);
    file.take(read_limit).read_to_end(&mut buf)?;

    let observed = buf.len() as u64;
    if observed > max_bytes {
        return Err(StripError::PartTooLarge {
            part: part.to_string(),
            size: observed,
            max: max_bytes,
        });
    }

    Ok(buf)
}
