//! JSON IR field helpers.
//!
//! The IR is an ordered JSON object bridging binary sections and
//! human/machine-readable form. Opaque codes and identifiers are rendered
//! as `0x`-prefixed uppercase hex strings with fixed zero-padded widths;
//! counts are plain unsigned decimals. Readers degrade to zero on
//! malformed values rather than failing the call.

use serde_json::{Map, Value};
use tracing::warn;

/// Formats a u8 as a hex string ("0xAB").
pub fn hex_u8(value: u8) -> String {
    format!("{value:#04X}")
}

/// Formats a u16 as a hex string ("0x0102").
pub fn hex_u16(value: u16) -> String {
    format!("{value:#06X}")
}

/// Formats a u64 as a hex string ("0x1122334455667788").
pub fn hex_u64(value: u64) -> String {
    format!("{value:#018X}")
}

/// Reads a boolean flag field; absent or non-boolean counts as false.
pub fn get_bool(ir: &Map<String, Value>, key: &str) -> bool {
    ir.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Reads a string field.
pub fn get_str<'a>(ir: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    ir.get(key).and_then(Value::as_str)
}

/// Reads an unsigned decimal field; absent fields read as zero.
pub fn get_uint(ir: &Map<String, Value>, key: &str) -> u64 {
    ir.get(key).and_then(Value::as_u64).unwrap_or(0)
}

/// Reads a hex string field.
///
/// An absent field reads as zero, silently: fields whose validity bit is
/// clear are expected to be missing. A present-but-malformed value also
/// reads as zero, with a warning.
pub fn get_hex(ir: &Map<String, Value>, key: &str) -> u64 {
    let Some(value) = ir.get(key) else {
        return 0;
    };
    let Some(s) = value.as_str() else {
        warn!(field = key, "expected hex string in section IR, using zero");
        return 0;
    };
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    match u64::from_str_radix(digits, 16) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!(field = key, value = s, "malformed hex string in section IR, using zero");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_hex_formatting_widths() {
        assert_eq!(hex_u8(0xAB), "0xAB");
        assert_eq!(hex_u8(0x05), "0x05");
        assert_eq!(hex_u16(0x0102), "0x0102");
        assert_eq!(hex_u64(0x1122_3344_5566_7788), "0x1122334455667788");
        assert_eq!(hex_u64(0), "0x0000000000000000");
    }

    #[test]
    fn test_get_hex_roundtrip() {
        let ir = map(json!({ "code": hex_u8(0xAB), "id": hex_u64(0x1122_3344_5566_7788) }));
        assert_eq!(get_hex(&ir, "code"), 0xAB);
        assert_eq!(get_hex(&ir, "id"), 0x1122_3344_5566_7788);
    }

    #[test]
    fn test_get_hex_accepts_unprefixed_and_mixed_case() {
        let ir = map(json!({ "a": "ff", "b": "0Xff", "c": "0xAb" }));
        assert_eq!(get_hex(&ir, "a"), 0xFF);
        assert_eq!(get_hex(&ir, "b"), 0xFF);
        assert_eq!(get_hex(&ir, "c"), 0xAB);
    }

    #[test]
    fn test_get_hex_degrades_to_zero() {
        let ir = map(json!({ "bad": "0xZZ", "wrong_type": 7 }));
        assert_eq!(get_hex(&ir, "bad"), 0);
        assert_eq!(get_hex(&ir, "wrong_type"), 0);
        assert_eq!(get_hex(&ir, "absent"), 0);
    }

    #[test]
    fn test_get_bool_and_uint_defaults() {
        let ir = map(json!({ "flag": true, "count": 7 }));
        assert!(get_bool(&ir, "flag"));
        assert!(!get_bool(&ir, "absent"));
        assert_eq!(get_uint(&ir, "count"), 7);
        assert_eq!(get_uint(&ir, "absent"), 0);
    }
}
