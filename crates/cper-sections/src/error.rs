//! Error types for CPER section decoding and encoding.

use thiserror::Error;

/// Error during binary decoding.
///
/// Only conditions that abort the whole call are represented here; every
/// other anomaly (unset validity bits, malformed IR values, transcoder
/// failures) degrades with a log line instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("{section} section is {size} bytes, smaller than its {min}-byte fixed header")]
    SectionTooSmall {
        section: &'static str,
        size: usize,
        min: usize,
    },

    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },
}

/// Error during encoding to an output stream.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("section IR is not a JSON object")]
    NotAnObject,

    #[error("failed to write section to output stream: {0}")]
    Io(#[from] std::io::Error),
}
