//! Schema-driven command encoder
//!
//! Commands are sparse: only the fields a caller sets are emitted, so a single
//! attribute of a multi-attribute entity can be changed without touching the
//! others. Output order is stable: key first, then ordinary fields in
//! declaration order, then has-pattern pairs, then the device id.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::registry::SchemaRegistry;
use crate::schema::{self, CommandSchema};
use crate::value::{Value, ValueType};
use crate::varint;
use crate::wire::{self, WireType};

/// Tag/value writer over a growable buffer
#[derive(Debug)]
pub struct PayloadEncoder<'a> {
    buf: &'a mut Vec<u8>,
    start: usize,
}

impl<'a> PayloadEncoder<'a> {
    /// Append to `buf`, leaving existing contents untouched
    #[inline]
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        let start = buf.len();
        Self { buf, start }
    }

    /// Bytes written by this encoder so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len() - self.start
    }

    /// True when nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write a varint field
    #[inline]
    pub fn put_varint(&mut self, field_number: u32, value: u64) {
        wire::put_tag(field_number, WireType::Varint, self.buf);
        varint::put_u64(value, self.buf);
    }

    /// Write a bool field as varint 0 or 1
    #[inline]
    pub fn put_bool(&mut self, field_number: u32, value: bool) {
        self.put_varint(field_number, value as u64);
    }

    /// Write a sint32 field as the varint of its unsigned bit pattern
    #[inline]
    pub fn put_sint32(&mut self, field_number: u32, value: i32) {
        self.put_varint(field_number, varint::sint32_to_wire(value));
    }

    /// Write a raw little-endian u32 field
    #[inline]
    pub fn put_fixed32(&mut self, field_number: u32, value: u32) {
        wire::put_tag(field_number, WireType::Fixed32, self.buf);
        self.buf.extend_from_slice(&wire::encode_fixed32(value));
    }

    /// Write an IEEE-754 single precision field
    #[inline]
    pub fn put_float(&mut self, field_number: u32, value: f32) {
        wire::put_tag(field_number, WireType::Fixed32, self.buf);
        self.buf.extend_from_slice(&wire::encode_float(value));
    }

    /// Write a length-delimited field
    #[inline]
    pub fn put_bytes(&mut self, field_number: u32, bytes: &[u8]) {
        wire::put_tag(field_number, WireType::LengthDelimited, self.buf);
        wire::put_length_delimited(bytes, self.buf);
    }

    /// Drop everything this encoder wrote
    pub fn rollback(self) {
        self.buf.truncate(self.start);
    }
}

/// Sparse set of command fields keyed by logical name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandFields<'a> {
    values: BTreeMap<&'a str, Value<'a>>,
}

impl<'a> CommandFields<'a> {
    /// Empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`CommandFields::insert`]
    pub fn set(mut self, name: &'a str, value: impl Into<Value<'a>>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, replacing any earlier value
    pub fn insert(&mut self, name: &'a str, value: impl Into<Value<'a>>) {
        self.values.insert(name, value.into());
    }

    /// Value set for `name`
    pub fn get(&self, name: &str) -> Option<Value<'a>> {
        self.values.get(name).copied()
    }

    /// Names that have been set
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.keys().copied()
    }

    /// Number of fields set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<'a, 'n: 'a, V: Into<Value<'a>>> FromIterator<(&'n str, V)> for CommandFields<'a> {
    fn from_iter<I: IntoIterator<Item = (&'n str, V)>>(iter: I) -> Self {
        let mut fields = Self::new();
        for (name, value) in iter {
            fields.insert(name, value);
        }
        fields
    }
}

/// Encoder bound to a schema registry
#[derive(Debug, Clone, Copy)]
pub struct CommandEncoder<'r> {
    registry: &'r SchemaRegistry,
}

impl<'r> CommandEncoder<'r> {
    /// Create an encoder over `registry`
    #[inline]
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Encode a command payload for entity `key` of kind `kind`
    pub fn encode(&self, kind: &str, key: u32, fields: &CommandFields<'_>) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.encode_into(kind, key, fields, &mut out)?;
        Ok(out)
    }

    /// Like [`CommandEncoder::encode`] but appends to `out`
    ///
    /// On error `out` is left as it was.
    pub fn encode_into(
        &self,
        kind: &str,
        key: u32,
        fields: &CommandFields<'_>,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        let command = self.command_schema(kind)?;
        let mut enc = PayloadEncoder::new(out);
        match write_command(command, key, fields, &mut enc) {
            Ok(()) => Ok(()),
            Err(e) => {
                enc.rollback();
                Err(e)
            }
        }
    }

    /// Message type id the device expects for commands of `kind`
    pub fn message_type(&self, kind: &str) -> Result<u32> {
        self.command_schema(kind).map(|c| c.message_type)
    }

    fn command_schema(&self, kind: &str) -> Result<&'r CommandSchema> {
        let schema = self
            .registry
            .by_kind(kind)
            .ok_or_else(|| Error::UnknownEntityKind(kind.to_owned()))?;
        schema
            .command
            .as_ref()
            .ok_or(Error::NoCommandShape(schema.kind))
    }
}

fn write_command(
    command: &CommandSchema,
    key: u32,
    fields: &CommandFields<'_>,
    enc: &mut PayloadEncoder<'_>,
) -> Result<()> {
    enc.put_varint(command.key_field_number, key as u64);

    for spec in command.fields {
        if let Some(value) = fields.get(spec.name) {
            put_value(command, enc, spec.name, spec.field_number, spec.value_type, value)?;
        }
    }

    for pair in command.has_pattern_fields {
        if let Some(value) = fields.get(pair.name) {
            enc.put_bool(pair.has_field_number, true);
            put_value(command, enc, pair.name, pair.value_field_number, pair.value_type, value)?;
        }
    }

    if let Some(value) = fields.get(schema::DEVICE_ID) {
        if command.device_id_field_number != 0 {
            let device_id = value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or(Error::InvalidValue {
                    field: schema::DEVICE_ID,
                    expected: ValueType::Varint,
                })?;
            enc.put_varint(command.device_id_field_number, device_id as u64);
        }
    }

    for name in fields.names() {
        if !is_declared(command, name) {
            log::debug!("ignoring field `{name}`: not part of command {}", command.message_type);
        }
    }

    Ok(())
}

fn is_declared(command: &CommandSchema, name: &str) -> bool {
    (name == schema::DEVICE_ID && command.device_id_field_number != 0)
        || command.fields.iter().any(|f| f.name == name)
        || command.has_pattern_fields.iter().any(|p| p.name == name)
}

fn put_value(
    command: &CommandSchema,
    enc: &mut PayloadEncoder<'_>,
    field: &'static str,
    field_number: u32,
    value_type: ValueType,
    value: Value<'_>,
) -> Result<()> {
    let invalid = Error::InvalidValue {
        field,
        expected: value_type,
    };

    match (value_type, value) {
        (ValueType::Bool, Value::Bool(b)) => enc.put_bool(field_number, b),
        (ValueType::Enum, Value::Bytes(token)) => {
            let code = command
                .enum_mapping(field)
                .and_then(|m| core::str::from_utf8(token).ok().and_then(|t| m.code_for(t)))
                .ok_or_else(|| Error::UnknownEnumToken {
                    field,
                    token: String::from_utf8_lossy(token).into_owned(),
                })?;
            enc.put_varint(field_number, code as u64);
        }
        (ValueType::Enum, Value::Int(n)) => {
            let code = u32::try_from(n).map_err(|_| invalid)?;
            enc.put_varint(field_number, code as u64);
        }
        (ValueType::Varint, Value::Int(n)) => {
            let n = u64::try_from(n).map_err(|_| invalid)?;
            enc.put_varint(field_number, n);
        }
        (ValueType::Varint, Value::Uint(n)) => enc.put_varint(field_number, n),
        (ValueType::Sint32, Value::Int(n)) => {
            let n = i32::try_from(n).map_err(|_| invalid)?;
            enc.put_sint32(field_number, n);
        }
        // only `Fixed32`, so the value decodes back to the same variant
        (ValueType::Fixed32, Value::Fixed32(n)) => enc.put_fixed32(field_number, n),
        (ValueType::Float, Value::Float(f)) => enc.put_float(field_number, f),
        (ValueType::String, Value::Bytes(b)) => enc.put_bytes(field_number, b),
        _ => return Err(invalid),
    }

    Ok(())
}
