//! Schema-driven payload decoder
//!
//! The decoder walks a payload's tag/value stream, resolves each field number
//! against the layout registered for the message type, and collects typed
//! values under their logical names. Byte runs are borrowed from the payload.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::registry::SchemaRegistry;
use crate::schema::{self, FieldRole, MessageLayout, MessageShape};
use crate::value::{Value, ValueType};
use crate::varint;
use crate::wire::{self, WireType};
use crate::MAX_PAYLOAD_SIZE;

/// A value as it appeared on the wire, before schema interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawValue<'a> {
    /// Varint payload
    Varint(u64),
    /// Eight raw bytes
    Fixed64(u64),
    /// Length-delimited run
    Bytes(&'a [u8]),
    /// Four raw bytes
    Fixed32(u32),
}

impl RawValue<'_> {
    /// Wire type this value was read as
    pub const fn wire_type(&self) -> WireType {
        match self {
            RawValue::Varint(_) => WireType::Varint,
            RawValue::Fixed64(_) => WireType::Fixed64,
            RawValue::Bytes(_) => WireType::LengthDelimited,
            RawValue::Fixed32(_) => WireType::Fixed32,
        }
    }
}

/// Cursor over a payload with position tracking
#[derive(Debug)]
pub struct PayloadCursor<'a> {
    /// Buffer containing the payload
    pub buf: &'a [u8],
    /// Current read position
    pub pos: usize,
}

impl<'a> PayloadCursor<'a> {
    /// Create a cursor at the start of `buf`
    #[inline]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Get remaining bytes in cursor
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check if cursor is at end
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Read raw bytes without length prefix
    #[inline]
    pub fn get_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(Error::TruncatedPayload);
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read a varint-encoded u64
    #[inline]
    pub fn get_varint(&mut self) -> Result<u64> {
        let (value, used) = varint::decode_u64(&self.buf[self.pos..])?;
        self.pos += used;
        Ok(value)
    }

    /// Read a little-endian u32
    #[inline]
    pub fn get_fixed32(&mut self) -> Result<u32> {
        wire::decode_fixed32(self.get_bytes(4)?)
    }

    /// Read a little-endian u64
    #[inline]
    pub fn get_fixed64(&mut self) -> Result<u64> {
        let bytes = self.get_bytes(8)?;
        let mut le = [0u8; 8];
        le.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(le))
    }

    /// Read variable-length bytes with length prefix
    ///
    /// Returns a zero-copy slice into the original buffer
    #[inline]
    pub fn get_varbytes(&mut self) -> Result<&'a [u8]> {
        let (run, used) = wire::decode_length_delimited(&self.buf[self.pos..])?;
        self.pos += used;
        Ok(run)
    }

    /// Read the next tag and its value; `None` at end of payload
    pub fn next_field(&mut self) -> Result<Option<(u32, RawValue<'a>)>> {
        if self.is_at_end() {
            return Ok(None);
        }
        let (field_number, wire_type) = wire::split_tag(self.get_varint()?)?;
        let raw = match wire_type {
            WireType::Varint => RawValue::Varint(self.get_varint()?),
            WireType::Fixed64 => RawValue::Fixed64(self.get_fixed64()?),
            WireType::LengthDelimited => RawValue::Bytes(self.get_varbytes()?),
            WireType::Fixed32 => RawValue::Fixed32(self.get_fixed32()?),
        };
        Ok(Some((field_number, raw)))
    }
}

/// Logical field values decoded from one payload
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedFields<'a> {
    values: BTreeMap<&'static str, Value<'a>>,
    repeated: BTreeMap<&'static str, Vec<Value<'a>>>,
    present: BTreeSet<&'static str>,
}

impl<'a> DecodedFields<'a> {
    /// Value of a singular field, including `key`, `deviceId`, `name` and `objectId`
    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.values.get(name).copied()
    }

    /// Occurrences of a repeated field in wire order; empty when none were seen
    pub fn get_repeated(&self, name: &str) -> &[Value<'a>] {
        self.repeated.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether the presence flag of a has-pattern field was seen set
    pub fn has_flag(&self, name: &str) -> bool {
        self.present.contains(name)
    }

    /// Whether a singular field was decoded
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Entity key, if the payload carried one
    pub fn key(&self) -> Option<u32> {
        self.get(schema::KEY)
            .and_then(|v| v.as_u64())
            .and_then(|k| u32::try_from(k).ok())
    }

    /// Singular fields in name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Value<'a>)> + '_ {
        self.values.iter().map(|(&name, &value)| (name, value))
    }

    /// Repeated fields in name order
    pub fn iter_repeated(&self) -> impl Iterator<Item = (&'static str, &[Value<'a>])> + '_ {
        self.repeated.iter().map(|(&name, values)| (name, values.as_slice()))
    }

    /// Number of distinct singular fields
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was decoded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.repeated.is_empty() && self.present.is_empty()
    }

    fn insert(&mut self, name: &'static str, value: Value<'a>) -> bool {
        // last one wins
        self.values.insert(name, value);
        true
    }

    /// Store `raw` under `name` if it has the wire type `value_type` expects
    fn accept(&mut self, name: &'static str, value_type: ValueType, raw: RawValue<'a>) -> bool {
        match interpret(value_type, raw) {
            Some(value) => self.insert(name, value),
            None => false,
        }
    }
}

/// A decoded message with the entity kind and shape it was resolved to
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decoded<'a> {
    /// Entity kind name
    pub kind: &'static str,
    /// Which of the kind's messages this was
    pub shape: MessageShape,
    /// Message type id
    pub message_type: u32,
    /// Field values
    pub fields: DecodedFields<'a>,
}

/// Decoder bound to a schema registry
#[derive(Debug, Clone, Copy)]
pub struct MessageDecoder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> MessageDecoder<'r> {
    /// Create a decoder over `registry`
    #[inline]
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Decode a de-framed payload of the given message type
    ///
    /// `Error::UnknownMessageType` means the message should be skipped; other
    /// errors mean this payload is corrupt.
    pub fn decode<'a>(&self, message_type: u32, payload: &'a [u8]) -> Result<Decoded<'a>> {
        let Some((schema, layout)) = self.registry.layout(message_type) else {
            log::debug!("skipping unknown message type {message_type}");
            return Err(Error::UnknownMessageType(message_type));
        };
        let fields = decode_fields(&layout, payload)?;
        Ok(Decoded {
            kind: schema.kind,
            shape: layout.shape,
            message_type,
            fields,
        })
    }
}

/// Decode `payload` against one message layout
pub fn decode_fields<'a>(layout: &MessageLayout, payload: &'a [u8]) -> Result<DecodedFields<'a>> {
    if payload.len() > MAX_PAYLOAD_SIZE {
        return Err(Error::PayloadTooLarge(payload.len()));
    }

    let mut out = DecodedFields::default();
    let mut cursor = PayloadCursor::new(payload);

    while let Some((field_number, raw)) = cursor.next_field()? {
        let Some(role) = layout.role_of(field_number) else {
            log::trace!(
                "message {}: skipping unknown field {field_number} ({:?})",
                layout.message_type,
                raw.wire_type()
            );
            continue;
        };

        let accepted = match role {
            FieldRole::Key => match raw {
                RawValue::Varint(v) => out.insert(schema::KEY, Value::unsigned(v)),
                RawValue::Fixed32(v) => out.insert(schema::KEY, Value::Int(v as i64)),
                _ => false,
            },
            FieldRole::DeviceId => out.accept(schema::DEVICE_ID, ValueType::Varint, raw),
            FieldRole::Name => out.accept(schema::NAME, ValueType::String, raw),
            FieldRole::ObjectId => out.accept(schema::OBJECT_ID, ValueType::String, raw),
            FieldRole::Field(spec) => out.accept(spec.name, spec.value_type, raw),
            FieldRole::HasFlag(pair) => match interpret(ValueType::Bool, raw) {
                Some(flag) => {
                    if flag == Value::Bool(true) {
                        out.present.insert(pair.name);
                    }
                    true
                }
                None => false,
            },
            // Stored even without the flag: some producers omit it.
            FieldRole::HasValue(pair) => out.accept(pair.name, pair.value_type, raw),
            FieldRole::Repeated(spec) => match interpret(spec.value_type, raw) {
                Some(value) => {
                    out.repeated.entry(spec.name).or_default().push(value);
                    true
                }
                None => false,
            },
        };

        if !accepted {
            log::trace!(
                "message {}: field {field_number} arrived as {:?}, skipped",
                layout.message_type,
                raw.wire_type()
            );
        }
    }

    Ok(out)
}

/// Reinterpret a raw wire value as `value_type`; `None` on wire type mismatch
fn interpret(value_type: ValueType, raw: RawValue<'_>) -> Option<Value<'_>> {
    match (value_type, raw) {
        (ValueType::Bool, RawValue::Varint(v)) => Some(Value::Bool(v != 0)),
        (ValueType::Enum | ValueType::Varint, RawValue::Varint(v)) => Some(Value::unsigned(v)),
        (ValueType::Sint32, RawValue::Varint(v)) => {
            Some(Value::Int(varint::sint32_from_wire(v) as i64))
        }
        (ValueType::Fixed32, RawValue::Fixed32(v)) => Some(Value::Fixed32(v)),
        (ValueType::Float, RawValue::Fixed32(v)) => Some(Value::Float(f32::from_bits(v))),
        (ValueType::String, RawValue::Bytes(b)) => Some(Value::Bytes(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::msg_types;
    use crate::wire::put_tag;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::builtin().unwrap()
    }

    #[test]
    fn test_cursor_operations() {
        let data = [0x08, 0x2A, 0x15, 0x00, 0x00, 0xAC, 0x41];
        let mut cursor = PayloadCursor::new(&data);

        assert_eq!(cursor.remaining(), 7);
        assert_eq!(cursor.next_field().unwrap(), Some((1, RawValue::Varint(42))));
        assert_eq!(
            cursor.next_field().unwrap(),
            Some((2, RawValue::Fixed32(21.5f32.to_bits())))
        );
        assert!(cursor.is_at_end());
        assert_eq!(cursor.next_field().unwrap(), None);
    }

    #[test]
    fn test_cursor_fixed64() {
        let mut data = vec![0x19];
        data.extend_from_slice(&7u64.to_le_bytes());
        let mut cursor = PayloadCursor::new(&data);
        assert_eq!(cursor.next_field().unwrap(), Some((3, RawValue::Fixed64(7))));
    }

    #[test]
    fn test_decode_switch_state() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        let payload = [0x0D, 0x2A, 0x00, 0x00, 0x00, 0x10, 0x01];

        let decoded = decoder.decode(msg_types::SWITCH_STATE_RESPONSE, &payload).unwrap();
        assert_eq!(decoded.kind, "switch");
        assert_eq!(decoded.shape, MessageShape::State);
        assert_eq!(decoded.fields.key(), Some(42));
        assert_eq!(decoded.fields.get("state"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_decode_unknown_message_type() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        assert_eq!(
            decoder.decode(9999, &[0x08, 0x01]).unwrap_err(),
            Error::UnknownMessageType(9999)
        );
        // button has no state message; 0 is never resolved
        assert_eq!(decoder.decode(0, &[]).unwrap_err(), Error::UnknownMessageType(0));
    }

    #[test]
    fn test_decode_list_entities_structural_fields() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);

        let mut payload = Vec::new();
        put_tag(1, WireType::LengthDelimited, &mut payload);
        wire::put_length_delimited(b"kitchen_light", &mut payload);
        put_tag(2, WireType::Fixed32, &mut payload);
        payload.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        put_tag(3, WireType::LengthDelimited, &mut payload);
        wire::put_length_delimited(b"Kitchen Light", &mut payload);
        put_tag(16, WireType::Varint, &mut payload);
        varint::put_u64(4, &mut payload);

        let decoded = decoder
            .decode(msg_types::LIST_ENTITIES_LIGHT_RESPONSE, &payload)
            .unwrap();
        let fields = &decoded.fields;
        assert_eq!(fields.key(), Some(0xDEAD_BEEF));
        assert_eq!(fields.get("objectId").and_then(|v| v.as_str()), Some("kitchen_light"));
        assert_eq!(fields.get("name").and_then(|v| v.as_str()), Some("Kitchen Light"));
        assert_eq!(fields.get("deviceId"), Some(Value::Int(4)));
    }

    #[test]
    fn test_last_one_wins() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        let payload = [0x08, 0x01, 0x10, 0x01, 0x10, 0x00];
        let decoded = decoder.decode(msg_types::SWITCH_STATE_RESPONSE, &payload).unwrap();
        assert_eq!(decoded.fields.get("state"), Some(Value::Bool(false)));
    }

    #[test]
    fn test_has_value_without_flag() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);

        let mut payload = vec![0x08, 0x07];
        put_tag(5, WireType::Fixed32, &mut payload);
        payload.extend_from_slice(&wire::encode_float(21.5));

        let decoded = decoder.decode(msg_types::CLIMATE_COMMAND_REQUEST, &payload).unwrap();
        assert_eq!(decoded.shape, MessageShape::Command);
        assert_eq!(decoded.fields.get("targetTemperature"), Some(Value::Float(21.5)));
        assert!(!decoded.fields.has_flag("targetTemperature"));
    }

    #[test]
    fn test_has_flag_recorded() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        // key=1, has_brightness=true, brightness=0.5
        let mut payload = vec![0x08, 0x01, 0x20, 0x01, 0x2D];
        payload.extend_from_slice(&wire::encode_float(0.5));

        let decoded = decoder.decode(msg_types::LIGHT_COMMAND_REQUEST, &payload).unwrap();
        assert!(decoded.fields.has_flag("brightness"));
        assert_eq!(decoded.fields.get("brightness"), Some(Value::Float(0.5)));
        assert!(!decoded.fields.contains("state"));
    }

    #[test]
    fn test_repeated_in_wire_order() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);

        let mut payload = Vec::new();
        for option in [&b"low"[..], b"high", b"low"] {
            put_tag(6, WireType::LengthDelimited, &mut payload);
            wire::put_length_delimited(option, &mut payload);
        }

        let decoded = decoder
            .decode(msg_types::LIST_ENTITIES_SELECT_RESPONSE, &payload)
            .unwrap();
        assert_eq!(
            decoded.fields.get_repeated("options"),
            &[Value::Bytes(b"low"), Value::Bytes(b"high"), Value::Bytes(b"low")]
        );
        assert!(decoded.fields.get_repeated("nothing").is_empty());
    }

    #[test]
    fn test_out_of_range_enum_passes_through() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        let payload = [0x08, 0x01, 0x10, 0xE7, 0x07];
        let decoded = decoder.decode(msg_types::LOCK_STATE_RESPONSE, &payload).unwrap();
        assert_eq!(decoded.fields.get("state"), Some(Value::Int(999)));
    }

    #[test]
    fn test_large_varint_is_lossless() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);

        // key=1, has_speed_level, speed_level = 2^63 as a ten-byte varint
        let mut payload = vec![0x08, 0x01, 0x50, 0x01, 0x58];
        varint::put_u64(1 << 63, &mut payload);
        assert_eq!(payload.len(), 5 + varint::MAX_VARINT_SIZE);

        let decoded = decoder.decode(msg_types::FAN_COMMAND_REQUEST, &payload).unwrap();
        let speed = decoded.fields.get("speedLevel").unwrap();
        assert_eq!(speed, Value::Uint(1 << 63));
        assert_eq!(speed.as_u64(), Some(1 << 63));

        let payload = [0x08, 0x01, 0x50, 0x01, 0x58, 0x07];
        let decoded = decoder.decode(msg_types::FAN_COMMAND_REQUEST, &payload).unwrap();
        assert_eq!(decoded.fields.get("speedLevel"), Some(Value::Int(7)));
    }

    #[test]
    fn test_wire_type_mismatch_is_skipped() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        // sensor state (field 2) should be fixed32; send a varint
        let payload = [0x08, 0x01, 0x10, 0x05, 0x18, 0x01];
        let decoded = decoder.decode(msg_types::SENSOR_STATE_RESPONSE, &payload).unwrap();
        assert!(!decoded.fields.contains("state"));
        assert_eq!(decoded.fields.get("missingState"), Some(Value::Bool(true)));
    }

    #[test]
    fn test_structural_errors() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        let id = msg_types::TEXT_SENSOR_STATE_RESPONSE;

        assert_eq!(decoder.decode(id, &[0x08, 0x80]).unwrap_err(), Error::MalformedVarint);
        assert_eq!(
            decoder.decode(id, &[0x12, 0x05, b'a']).unwrap_err(),
            Error::TruncatedPayload
        );
        assert_eq!(
            decoder.decode(id, &[0x0D, 0x01, 0x02]).unwrap_err(),
            Error::TruncatedPayload
        );
        assert_eq!(decoder.decode(id, &[0x0B]).unwrap_err(), Error::InvalidTag(0x0B));
    }

    #[test]
    fn test_sint32_decoding() {
        const FIELDS: &[crate::schema::FieldSpec] =
            &[crate::schema::FieldSpec::new("offset", 2, ValueType::Sint32)];
        let layout = MessageLayout {
            shape: MessageShape::State,
            message_type: 500,
            key_field_number: 1,
            device_id_field_number: 0,
            name_field_number: 0,
            object_id_field_number: 0,
            fields: FIELDS,
            has_pattern_fields: &[],
            repeated_fields: &[],
        };

        let mut payload = vec![0x10];
        varint::put_u64(varint::sint32_to_wire(-5), &mut payload);
        assert_eq!(payload.len(), 6);

        let fields = decode_fields(&layout, &payload).unwrap();
        assert_eq!(fields.get("offset"), Some(Value::Int(-5)));
    }

    #[test]
    fn test_empty_payload() {
        let registry = registry();
        let decoder = MessageDecoder::new(&registry);
        let decoded = decoder.decode(msg_types::SWITCH_STATE_RESPONSE, &[]).unwrap();
        assert!(decoded.fields.is_empty());
        assert_eq!(decoded.fields.key(), None);
    }
}
