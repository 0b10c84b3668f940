//! Per-section CPER codecs.
//!
//! Every section type follows the same recipe: a packed fixed-size header
//! whose optional fields are gated by a per-field validity bitmask, plus an
//! optional trailing payload whose length is derived from the overall
//! section size supplied by the enclosing record. Each submodule owns one
//! section type end to end: wire layout, bitmask table, decode to JSON IR,
//! and encode from JSON IR.

pub mod platform_action;

pub use platform_action::{ir_to_section, section_to_ir, PlatformActionEvent};
