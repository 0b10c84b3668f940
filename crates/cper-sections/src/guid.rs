//! EFI GUID identifiers for CPER records.
//!
//! CPER stores GUIDs in the EFI wire layout: a little-endian u32 group,
//! two little-endian u16 groups, and 8 raw bytes. The JSON form is the
//! usual lowercase hyphenated string.

use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// A 16-byte GUID held in EFI wire layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Guid([u8; 16]);

impl Guid {
    /// The all-zero GUID, used as the fallback for unparseable identifiers.
    pub const ZERO: Guid = Guid([0u8; 16]);

    /// Creates a GUID from its raw wire bytes.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Returns the raw wire bytes.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 16]
    }

    fn to_uuid(self) -> Uuid {
        let d1 = u32::from_le_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        let d2 = u16::from_le_bytes([self.0[4], self.0[5]]);
        let d3 = u16::from_le_bytes([self.0[6], self.0[7]]);
        // SAFETY: the slice is exactly 8 bytes, try_into always succeeds
        let d4: [u8; 8] = self.0[8..16].try_into().unwrap();
        Uuid::from_fields(d1, d2, d3, &d4)
    }

    fn from_uuid(uuid: Uuid) -> Self {
        let (d1, d2, d3, d4) = uuid.as_fields();
        let mut bytes = [0u8; 16];
        bytes[0..4].copy_from_slice(&d1.to_le_bytes());
        bytes[4..6].copy_from_slice(&d2.to_le_bytes());
        bytes[6..8].copy_from_slice(&d3.to_le_bytes());
        bytes[8..16].copy_from_slice(d4);
        Self(bytes)
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uuid().hyphenated())
    }
}

impl FromStr for Guid {
    type Err = uuid::Error;

    /// Parses a hyphenated GUID string into wire layout.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self::from_uuid)
    }
}
