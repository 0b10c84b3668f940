//! CPER section codecs: binary platform error records to JSON IR and back.
//!
//! Common Platform Error Records (CPER) carry hardware and firmware error
//! reports as a header plus typed sections. Every section here follows the
//! same pattern: a packed little-endian fixed-size header whose optional
//! fields are gated by a per-field validity bitmask, optionally followed by
//! a trailing payload whose length is derived from the overall section
//! size supplied by the enclosing record.
//!
//! # Quick Start
//!
//! ```rust
//! use cper_sections::{PlatformActionEvent, section_to_ir, ir_to_section};
//!
//! // Build a section: every validity bit set, plus 4 context bytes.
//! let event = PlatformActionEvent {
//!     action_return_code: Some(0xAB),
//!     record_id: Some(0x1122_3344_5566_7788),
//!     action_id: Some(0x0102),
//!     section_index: Some(7),
//!     additional_context: Some(vec![0xDE, 0xAD, 0xBE, 0xEF]),
//!     ..Default::default()
//! };
//! let mut bytes = Vec::new();
//! event.write_to(&mut bytes).unwrap();
//!
//! // Decode to JSON IR, then re-encode byte-identically.
//! let (ir, desc) = section_to_ir(&bytes).unwrap();
//! assert_eq!(desc, "A Platform Action Event occurred");
//! assert_eq!(ir["actionReturnCode"], "0xAB");
//!
//! let mut round_trip = Vec::new();
//! ir_to_section(&ir, &mut round_trip).unwrap();
//! assert_eq!(round_trip, bytes);
//! ```
//!
//! # Modules
//!
//! - [`sections`]: per-section codecs (Platform Action Event)
//! - [`codec`]: bounds-checked little-endian primitives
//! - [`guid`]: EFI GUID wire layout and string form
//! - [`ir`]: JSON IR field helpers
//! - [`generator`]: pseudo-random fixture generation for tests
//! - [`error`]: error types
//! - [`limits`]: decode limits
//!
//! # Security
//!
//! The decoder is designed to safely handle untrusted input:
//! - The section length is validated before any field read
//! - The trailing payload length is derived from the caller-supplied
//!   buffer bounds, never from record contents
//! - Anomalies short of a truncated header degrade with a log line
//!   instead of failing, on the premise that a partial record is more
//!   useful than none for diagnostic tooling

pub mod codec;
pub mod error;
pub mod generator;
pub mod guid;
pub mod ir;
pub mod limits;
pub mod sections;

// Re-export commonly used types at crate root
pub use error::{DecodeError, EncodeError};
pub use guid::Guid;
pub use sections::platform_action::{
    ir_to_section, section_to_ir, PlatformActionEvent, HEADER_SIZE,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
