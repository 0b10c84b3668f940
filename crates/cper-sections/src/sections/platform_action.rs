//! Platform Action Event section codec.
//!
//! A Platform Action Event records an action taken in response to a CPAD
//! (the platform/partition/creator identifiers plus record/action/index
//! references that triggered the action). On the wire it is a packed
//! 64-byte header followed by an optional run of raw additional-context
//! bytes; which header fields carry meaning is controlled entirely by the
//! leading validity bitmask, and the context length is always derived from
//! the overall section size.

use std::io::Write;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::guid::Guid;
use crate::ir;
use crate::limits::DESC_STRING_MAX;

/// Size in bytes of the fixed section header.
pub const HEADER_SIZE: usize = 64;

/// CpadRecordId carries meaningful data.
pub const RECORD_ID_VALID: u8 = 1 << 0;
/// CpadSectionDescriptorIndex carries meaningful data.
pub const SECTION_INDEX_VALID: u8 = 1 << 1;
/// CpadActionId carries meaningful data.
pub const ACTION_ID_VALID: u8 = 1 << 2;
/// ActionReturnCode carries meaningful data.
pub const ACTION_RETURN_CODE_VALID: u8 = 1 << 3;
/// Additional context bytes follow the fixed header.
pub const ADDITIONAL_CONTEXT_VALID: u8 = 1 << 4;
/// Mask of all defined validity bits; bits 5-7 are reserved.
pub const VALID_BITS_MASK: u8 = 0x1F;

const SECTION_DESC: &str = "A Platform Action Event occurred";
const SECTION_NAME: &str = "Platform Action Event";

/// Raw fixed-header fields, exactly as laid out on the wire.
///
/// Values are carried whether or not their validity bit is set; the
/// bitmask is interpreted by the layers above, never here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ActionEventHeader {
    validation_bits: u8,
    action_return_code: u8,
    platform_id: Guid,
    partition_id: Guid,
    creator_id: Guid,
    record_id: u64,
    action_id: u16,
    section_index: u32,
}

impl ActionEventHeader {
    fn read(reader: &mut Reader<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            validation_bits: reader.read_u8("validation_bits")?,
            action_return_code: reader.read_u8("action_return_code")?,
            platform_id: reader.read_guid("cpad_platform_id")?,
            partition_id: reader.read_guid("cpad_partition_id")?,
            creator_id: reader.read_guid("cpad_creator_id")?,
            record_id: reader.read_u64_le("cpad_record_id")?,
            action_id: reader.read_u16_le("cpad_action_id")?,
            section_index: reader.read_u32_le("cpad_section_index")?,
        })
    }

    fn write(&self, writer: &mut Writer) {
        writer.write_u8(self.validation_bits);
        writer.write_u8(self.action_return_code);
        writer.write_guid(&self.platform_id);
        writer.write_guid(&self.partition_id);
        writer.write_guid(&self.creator_id);
        writer.write_u64_le(self.record_id);
        writer.write_u16_le(self.action_id);
        writer.write_u32_le(self.section_index);
    }
}

/// A decoded Platform Action Event section.
///
/// Gated fields are `Some` exactly when their validity bit was set at
/// decode time; the bitmask is recomputed from field presence on encode
/// rather than stored separately. The three CPAD identifiers have no
/// validity bit in the current format and are always present.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlatformActionEvent {
    pub action_return_code: Option<u8>,
    pub platform_id: Guid,
    pub partition_id: Guid,
    pub creator_id: Guid,
    pub record_id: Option<u64>,
    pub action_id: Option<u16>,
    pub section_index: Option<u32>,
    /// Trailing context bytes. `Some(vec![])` round-trips a header-only
    /// record whose context bit was set.
    pub additional_context: Option<Vec<u8>>,
}

impl PlatformActionEvent {
    /// Parses a section buffer into the typed model.
    ///
    /// The buffer must hold at least the fixed header. Trailing bytes
    /// present without the context validity bit are dropped with a
    /// warning; re-encoding such a record will not reproduce them.
    pub fn parse(section: &[u8]) -> Result<Self, DecodeError> {
        if section.len() < HEADER_SIZE {
            return Err(DecodeError::SectionTooSmall {
                section: SECTION_NAME,
                size: section.len(),
                min: HEADER_SIZE,
            });
        }

        let mut reader = Reader::new(section);
        let header = ActionEventHeader::read(&mut reader)?;
        let bits = header.validation_bits;
        let trailing = reader.remaining();

        let additional_context = if bits & ADDITIONAL_CONTEXT_VALID != 0 {
            Some(trailing.to_vec())
        } else {
            if !trailing.is_empty() {
                warn!(
                    len = trailing.len(),
                    "additional context bytes present but additionalContextValid is not set, ignoring them"
                );
            }
            None
        };

        Ok(Self {
            action_return_code: (bits & ACTION_RETURN_CODE_VALID != 0)
                .then_some(header.action_return_code),
            platform_id: header.platform_id,
            partition_id: header.partition_id,
            creator_id: header.creator_id,
            record_id: (bits & RECORD_ID_VALID != 0).then_some(header.record_id),
            action_id: (bits & ACTION_ID_VALID != 0).then_some(header.action_id),
            section_index: (bits & SECTION_INDEX_VALID != 0).then_some(header.section_index),
            additional_context,
        })
    }

    /// Recomputes the validity bitmask from field presence.
    pub fn validation_bits(&self) -> u8 {
        let mut bits = 0;
        if self.record_id.is_some() {
            bits |= RECORD_ID_VALID;
        }
        if self.section_index.is_some() {
            bits |= SECTION_INDEX_VALID;
        }
        if self.action_id.is_some() {
            bits |= ACTION_ID_VALID;
        }
        if self.action_return_code.is_some() {
            bits |= ACTION_RETURN_CODE_VALID;
        }
        if self.additional_context.is_some() {
            bits |= ADDITIONAL_CONTEXT_VALID;
        }
        bits
    }

    fn header(&self) -> ActionEventHeader {
        ActionEventHeader {
            validation_bits: self.validation_bits(),
            action_return_code: self.action_return_code.unwrap_or(0),
            platform_id: self.platform_id,
            partition_id: self.partition_id,
            creator_id: self.creator_id,
            record_id: self.record_id.unwrap_or(0),
            action_id: self.action_id.unwrap_or(0),
            section_index: self.section_index.unwrap_or(0),
        }
    }

    /// Builds the JSON IR for this section.
    ///
    /// Key order is the binary field order. The five validity flags are
    /// always emitted; gated values appear only when present, except the
    /// three CPAD identifiers which are unconditional. An empty context
    /// emits no `additionalContext` key even when its flag is set.
    pub fn to_ir(&self) -> Value {
        let bits = self.validation_bits();
        let mut section_ir = Map::new();

        section_ir.insert(
            "recordIdValid".into(),
            Value::Bool(bits & RECORD_ID_VALID != 0),
        );
        section_ir.insert(
            "sectionIndexValid".into(),
            Value::Bool(bits & SECTION_INDEX_VALID != 0),
        );
        section_ir.insert(
            "actionIdValid".into(),
            Value::Bool(bits & ACTION_ID_VALID != 0),
        );
        section_ir.insert(
            "actionReturnCodeValid".into(),
            Value::Bool(bits & ACTION_RETURN_CODE_VALID != 0),
        );
        section_ir.insert(
            "additionalContextValid".into(),
            Value::Bool(bits & ADDITIONAL_CONTEXT_VALID != 0),
        );

        if let Some(code) = self.action_return_code {
            section_ir.insert("actionReturnCode".into(), Value::String(ir::hex_u8(code)));
        }

        section_ir.insert(
            "cpadPlatformID".into(),
            Value::String(self.platform_id.to_string()),
        );
        section_ir.insert(
            "cpadPartitionID".into(),
            Value::String(self.partition_id.to_string()),
        );
        section_ir.insert(
            "cpadCreatorID".into(),
            Value::String(self.creator_id.to_string()),
        );

        if let Some(record_id) = self.record_id {
            section_ir.insert("cpadRecordId".into(), Value::String(ir::hex_u64(record_id)));
        }
        if let Some(action_id) = self.action_id {
            section_ir.insert("cpadActionId".into(), Value::String(ir::hex_u16(action_id)));
        }
        if let Some(index) = self.section_index {
            section_ir.insert("cpadSectionIndex".into(), Value::from(index));
        }

        if let Some(context) = &self.additional_context {
            if !context.is_empty() {
                section_ir.insert(
                    "additionalContext".into(),
                    Value::String(BASE64.encode(context)),
                );
            }
        }

        Value::Object(section_ir)
    }

    /// Writes the binary section: fixed header, then any context bytes.
    pub fn write_to(&self, out: &mut impl Write) -> std::io::Result<()> {
        let mut header = Writer::with_capacity(HEADER_SIZE);
        self.header().write(&mut header);
        out.write_all(header.as_bytes())?;
        if let Some(context) = &self.additional_context {
            out.write_all(context)?;
        }
        out.flush()
    }
}

/// Decodes a Platform Action Event section into JSON IR.
///
/// Returns the IR object together with a short human-readable description
/// of the section. The call fails only when the buffer cannot hold the
/// fixed header; every other anomaly degrades with a log line.
pub fn section_to_ir(section: &[u8]) -> Result<(Value, String), DecodeError> {
    let event = PlatformActionEvent::parse(section)?;

    let mut desc = String::from(SECTION_DESC);
    if desc.len() > DESC_STRING_MAX {
        error!(
            len = desc.len(),
            max = DESC_STRING_MAX,
            "Platform Action Event description string truncated"
        );
        desc.truncate(DESC_STRING_MAX);
    }

    Ok((event.to_ir(), desc))
}

/// Encodes a Platform Action Event IR into CPER binary on `out`.
///
/// The fixed header is written and flushed before any context bytes, so a
/// missing `additionalContext` field or a base64 failure leaves a
/// header-only record on the stream. Gated values are written whether or
/// not their flag is set; absent values stay zero, and an unparseable
/// CPAD identifier degrades to the zero GUID. None of those anomalies
/// fail the call; only a non-object IR or a stream write error does.
pub fn ir_to_section(ir: &Value, out: &mut impl Write) -> Result<(), EncodeError> {
    let section = ir.as_object().ok_or(EncodeError::NotAnObject)?;

    let mut bits = 0u8;
    if ir::get_bool(section, "recordIdValid") {
        bits |= RECORD_ID_VALID;
    }
    if ir::get_bool(section, "sectionIndexValid") {
        bits |= SECTION_INDEX_VALID;
    }
    if ir::get_bool(section, "actionIdValid") {
        bits |= ACTION_ID_VALID;
    }
    if ir::get_bool(section, "actionReturnCodeValid") {
        bits |= ACTION_RETURN_CODE_VALID;
    }
    if ir::get_bool(section, "additionalContextValid") {
        bits |= ADDITIONAL_CONTEXT_VALID;
    }

    let header = ActionEventHeader {
        validation_bits: bits,
        action_return_code: ir::get_hex(section, "actionReturnCode") as u8,
        platform_id: guid_field(section, "cpadPlatformID"),
        partition_id: guid_field(section, "cpadPartitionID"),
        creator_id: guid_field(section, "cpadCreatorID"),
        record_id: ir::get_hex(section, "cpadRecordId"),
        action_id: ir::get_hex(section, "cpadActionId") as u16,
        section_index: ir::get_uint(section, "cpadSectionIndex") as u32,
    };

    let mut buf = Writer::with_capacity(HEADER_SIZE);
    header.write(&mut buf);
    out.write_all(buf.as_bytes())?;
    out.flush()?;

    if bits & ADDITIONAL_CONTEXT_VALID != 0 {
        let Some(encoded) = ir::get_str(section, "additionalContext") else {
            error!("additionalContextValid is set but the IR has no additionalContext field");
            return Ok(());
        };
        match BASE64.decode(encoded) {
            Ok(context) => {
                out.write_all(&context)?;
                out.flush()?;
            }
            Err(err) => {
                error!(%err, "failed to decode additionalContext base64, writing no context bytes");
            }
        }
    }

    Ok(())
}

/// Reads a CPAD identifier from the IR, falling back to the zero GUID.
fn guid_field(section: &Map<String, Value>, key: &str) -> Guid {
    let Some(s) = ir::get_str(section, key) else {
        warn!(field = key, "missing GUID in section IR, using the zero GUID");
        return Guid::ZERO;
    };
    s.parse().unwrap_or_else(|_| {
        warn!(field = key, value = s, "malformed GUID in section IR, using the zero GUID");
        Guid::ZERO
    })
}
