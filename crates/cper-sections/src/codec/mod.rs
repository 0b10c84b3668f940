//! Binary primitives shared by the section codecs.

pub mod primitives;

pub use primitives::{Reader, Writer};
