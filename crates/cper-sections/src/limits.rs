//! Limits applied while decoding CPER sections.

/// Maximum length in bytes of a section description string.
///
/// Descriptions longer than this are truncated, and the truncation is
/// reported through the logging sink rather than silently accepted.
pub const DESC_STRING_MAX: usize = 256;
