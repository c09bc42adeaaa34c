//! Generated identifier names for indexes and constraints.
//!
//! Names are built from a prefix and the CRC32 checksums of the table and
//! column names, so the same definition always yields the same name.

/// Default maximum length of generated identifiers.
pub const DEFAULT_MAX_IDENTIFIER_LENGTH: usize = 63;

/// Generates an identifier such as `IDX_8C73652178240498`.
///
/// Every name contributes its checksum as lowercase hex without padding;
/// the result is uppercased and cut to `max_length` characters.
#[must_use]
pub fn generate_identifier_name(names: &[&str], prefix: &str, max_length: usize) -> String {
    let hash: String = names
        .iter()
        .map(|name| format!("{:x}", crc32fast::hash(name.as_bytes())))
        .collect();
    format!("{prefix}_{hash}")
        .to_uppercase()
        .chars()
        .take(max_length)
        .collect()
}
