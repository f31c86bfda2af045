//! Declarative description of each entity kind's three message shapes
//!
//! Schemas are plain `'static` data. A table of [`EntitySchema`] values is
//! handed to [`crate::SchemaRegistry`], which validates it once and never
//! changes it afterwards.

use alloc::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::value::ValueType;
use crate::wire::{WireType, MAX_FIELD_NUMBER};

/// Logical name under which the entity key is decoded
pub const KEY: &str = "key";
/// Logical name for the device id field
pub const DEVICE_ID: &str = "deviceId";
/// Logical name for the entity's display name (list-entities only)
pub const NAME: &str = "name";
/// Logical name for the entity's object id (list-entities only)
pub const OBJECT_ID: &str = "objectId";

const RESERVED_NAMES: [&str; 4] = [KEY, DEVICE_ID, NAME, OBJECT_ID];

/// One ordinary field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldSpec {
    /// Logical field name
    pub name: &'static str,
    /// Field number on the wire
    pub field_number: u32,
    /// Interpretation of the wire value
    pub value_type: ValueType,
    /// Wire representation
    pub wire_type: WireType,
}

impl FieldSpec {
    /// Field travelling in the natural wire type of `value_type`
    pub const fn new(name: &'static str, field_number: u32, value_type: ValueType) -> Self {
        Self {
            name,
            field_number,
            value_type,
            wire_type: value_type.natural_wire_type(),
        }
    }
}

/// An optional command attribute carried as a presence flag plus a value field
///
/// The value field is only emitted together with the flag set to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HasPatternField {
    /// Logical field name
    pub name: &'static str,
    /// Field number of the boolean presence flag
    pub has_field_number: u32,
    /// Field number of the value
    pub value_field_number: u32,
    /// Interpretation of the value
    pub value_type: ValueType,
    /// Wire representation of the value
    pub wire_type: WireType,
}

impl HasPatternField {
    /// Has-pattern pair whose value travels in its natural wire type
    pub const fn new(
        name: &'static str,
        has_field_number: u32,
        value_field_number: u32,
        value_type: ValueType,
    ) -> Self {
        Self {
            name,
            has_field_number,
            value_field_number,
            value_type,
            wire_type: value_type.natural_wire_type(),
        }
    }
}

/// A field number that may occur many times, collected in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RepeatedFieldSpec {
    /// Logical field name
    pub name: &'static str,
    /// Field number on the wire
    pub field_number: u32,
    /// One of `enum`, `string` or `varint`
    pub value_type: ValueType,
    /// Wire representation of each occurrence
    pub wire_type: WireType,
}

impl RepeatedFieldSpec {
    /// Repeated field travelling in the natural wire type of `value_type`
    pub const fn new(name: &'static str, field_number: u32, value_type: ValueType) -> Self {
        Self {
            name,
            field_number,
            value_type,
            wire_type: value_type.natural_wire_type(),
        }
    }
}

/// String tokens accepted for one enum field of a command, with their codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EnumMapping {
    /// Logical name of the enum field
    pub field: &'static str,
    /// `(token, code)` pairs
    pub tokens: &'static [(&'static str, u32)],
}

impl EnumMapping {
    /// Protocol code for `token`
    pub fn code_for(&self, token: &str) -> Option<u32> {
        self.tokens
            .iter()
            .find(|(candidate, _)| *candidate == token)
            .map(|&(_, code)| code)
    }
}

/// Outbound control message of one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CommandSchema {
    /// Message type id
    pub message_type: u32,
    /// Field carrying the target entity key
    pub key_field_number: u32,
    /// Field carrying the device id
    pub device_id_field_number: u32,
    /// Ordinary fields, in emission order
    pub fields: &'static [FieldSpec],
    /// Has-pattern pairs, in emission order
    pub has_pattern_fields: &'static [HasPatternField],
    /// Token tables for enum fields
    pub enum_mappings: &'static [EnumMapping],
}

impl CommandSchema {
    /// Token table for the named enum field
    pub fn enum_mapping(&self, field: &str) -> Option<&EnumMapping> {
        self.enum_mappings.iter().find(|m| m.field == field)
    }
}

/// Inbound state report of one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StateSchema {
    /// Message type id; 0 when the kind never reports state
    pub message_type: u32,
    /// Field carrying the entity key
    pub key_field_number: u32,
    /// Field carrying the device id; 0 when absent
    pub device_id_field_number: u32,
    /// Ordinary fields
    pub fields: &'static [FieldSpec],
}

/// Inbound metadata/discovery message of one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ListEntitiesSchema {
    /// Message type id
    pub message_type: u32,
    /// Field carrying the entity key
    pub key_field_number: u32,
    /// Field carrying the display name
    pub name_field_number: u32,
    /// Field carrying the object id
    pub object_id_field_number: u32,
    /// Field carrying the device id
    pub device_id_field_number: u32,
    /// Ordinary fields
    pub fields: &'static [FieldSpec],
    /// Repeated fields
    pub repeated_fields: &'static [RepeatedFieldSpec],
}

/// Everything the codec knows about one entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EntitySchema {
    /// Entity kind name, e.g. `"switch"`
    pub kind: &'static str,
    /// Absent for read-only kinds
    pub command: Option<CommandSchema>,
    /// State report shape
    pub state: StateSchema,
    /// Discovery shape
    pub list_entities: ListEntitiesSchema,
}

/// Which of an entity kind's three messages a message type refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MessageShape {
    /// State report
    State,
    /// Discovery/metadata
    ListEntities,
    /// Control request
    Command,
}

/// Meaning of a field number within one message layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole<'s> {
    /// Entity key
    Key,
    /// Device id
    DeviceId,
    /// Display name
    Name,
    /// Object id
    ObjectId,
    /// Ordinary field
    Field(&'s FieldSpec),
    /// Presence flag of a has-pattern pair
    HasFlag(&'s HasPatternField),
    /// Value of a has-pattern pair
    HasValue(&'s HasPatternField),
    /// Repeated field
    Repeated(&'s RepeatedFieldSpec),
}

/// Shape-independent view of one message layout, used by the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLayout {
    /// Which shape this layout came from
    pub shape: MessageShape,
    /// Message type id
    pub message_type: u32,
    /// Entity key field
    pub key_field_number: u32,
    /// Device id field, 0 when absent
    pub device_id_field_number: u32,
    /// Display name field, 0 when absent
    pub name_field_number: u32,
    /// Object id field, 0 when absent
    pub object_id_field_number: u32,
    /// Ordinary fields
    pub fields: &'static [FieldSpec],
    /// Has-pattern pairs
    pub has_pattern_fields: &'static [HasPatternField],
    /// Repeated fields
    pub repeated_fields: &'static [RepeatedFieldSpec],
}

impl MessageLayout {
    /// Resolve a field number against this layout
    pub fn role_of(&self, field_number: u32) -> Option<FieldRole<'_>> {
        if field_number == 0 {
            return None;
        }
        if field_number == self.key_field_number {
            return Some(FieldRole::Key);
        }
        if field_number == self.device_id_field_number {
            return Some(FieldRole::DeviceId);
        }
        if field_number == self.name_field_number {
            return Some(FieldRole::Name);
        }
        if field_number == self.object_id_field_number {
            return Some(FieldRole::ObjectId);
        }
        if let Some(spec) = self.fields.iter().find(|f| f.field_number == field_number) {
            return Some(FieldRole::Field(spec));
        }
        for pair in self.has_pattern_fields {
            if pair.has_field_number == field_number {
                return Some(FieldRole::HasFlag(pair));
            }
            if pair.value_field_number == field_number {
                return Some(FieldRole::HasValue(pair));
            }
        }
        self.repeated_fields
            .iter()
            .find(|r| r.field_number == field_number)
            .map(FieldRole::Repeated)
    }

    /// Check the per-layout invariants: unique non-zero field numbers, unique
    /// logical names, and value types paired with their wire types
    pub fn validate(&self) -> Result<()> {
        if self.key_field_number == 0 {
            return Err(Error::InvalidSchema("key field number must be non-zero"));
        }

        let mut numbers = BTreeSet::new();
        let mut claim = |number: u32| -> Result<()> {
            if number == 0 || number > MAX_FIELD_NUMBER {
                return Err(Error::InvalidSchema("field number out of range"));
            }
            if !numbers.insert(number) {
                return Err(Error::InvalidSchema("duplicate field number"));
            }
            Ok(())
        };

        claim(self.key_field_number)?;
        for optional in [
            self.device_id_field_number,
            self.name_field_number,
            self.object_id_field_number,
        ] {
            if optional != 0 {
                claim(optional)?;
            }
        }
        for spec in self.fields {
            claim(spec.field_number)?;
        }
        for pair in self.has_pattern_fields {
            claim(pair.has_field_number)?;
            claim(pair.value_field_number)?;
        }
        for spec in self.repeated_fields {
            claim(spec.field_number)?;
        }

        let mut names = BTreeSet::new();
        let logical = self
            .fields
            .iter()
            .map(|f| (f.name, f.value_type, f.wire_type))
            .chain(
                self.has_pattern_fields
                    .iter()
                    .map(|p| (p.name, p.value_type, p.wire_type)),
            )
            .chain(
                self.repeated_fields
                    .iter()
                    .map(|r| (r.name, r.value_type, r.wire_type)),
            );
        for (name, value_type, wire_type) in logical {
            if RESERVED_NAMES.contains(&name) || !names.insert(name) {
                return Err(Error::InvalidSchema("duplicate or reserved field name"));
            }
            if value_type.natural_wire_type() != wire_type {
                return Err(Error::InvalidSchema("value type does not match wire type"));
            }
        }
        if self.repeated_fields.iter().any(|r| !r.value_type.is_repeatable()) {
            return Err(Error::InvalidSchema("repeated field must be enum, string or varint"));
        }

        Ok(())
    }
}

impl From<&StateSchema> for MessageLayout {
    fn from(schema: &StateSchema) -> Self {
        Self {
            shape: MessageShape::State,
            message_type: schema.message_type,
            key_field_number: schema.key_field_number,
            device_id_field_number: schema.device_id_field_number,
            name_field_number: 0,
            object_id_field_number: 0,
            fields: schema.fields,
            has_pattern_fields: &[],
            repeated_fields: &[],
        }
    }
}

impl From<&ListEntitiesSchema> for MessageLayout {
    fn from(schema: &ListEntitiesSchema) -> Self {
        Self {
            shape: MessageShape::ListEntities,
            message_type: schema.message_type,
            key_field_number: schema.key_field_number,
            device_id_field_number: schema.device_id_field_number,
            name_field_number: schema.name_field_number,
            object_id_field_number: schema.object_id_field_number,
            fields: schema.fields,
            has_pattern_fields: &[],
            repeated_fields: schema.repeated_fields,
        }
    }
}

impl From<&CommandSchema> for MessageLayout {
    fn from(schema: &CommandSchema) -> Self {
        Self {
            shape: MessageShape::Command,
            message_type: schema.message_type,
            key_field_number: schema.key_field_number,
            device_id_field_number: schema.device_id_field_number,
            name_field_number: 0,
            object_id_field_number: 0,
            fields: schema.fields,
            has_pattern_fields: schema.has_pattern_fields,
            repeated_fields: &[],
        }
    }
}

impl EntitySchema {
    /// Layout of one of this kind's messages, if the kind has that shape
    pub fn layout(&self, shape: MessageShape) -> Option<MessageLayout> {
        match shape {
            MessageShape::State if self.state.message_type != 0 => Some((&self.state).into()),
            MessageShape::State => None,
            MessageShape::ListEntities => Some((&self.list_entities).into()),
            MessageShape::Command => self.command.as_ref().map(MessageLayout::from),
        }
    }

    /// Validate every shape of this schema
    pub fn validate(&self) -> Result<()> {
        if self.kind.is_empty() {
            return Err(Error::InvalidSchema("entity kind name must not be empty"));
        }
        for shape in [MessageShape::State, MessageShape::ListEntities, MessageShape::Command] {
            if let Some(layout) = self.layout(shape) {
                layout.validate()?;
            }
        }
        if let Some(command) = &self.command {
            for mapping in command.enum_mappings {
                let is_enum = command
                    .fields
                    .iter()
                    .map(|f| (f.name, f.value_type))
                    .chain(command.has_pattern_fields.iter().map(|p| (p.name, p.value_type)))
                    .any(|(name, value_type)| name == mapping.field && value_type == ValueType::Enum);
                if !is_enum {
                    return Err(Error::InvalidSchema("enum mapping names no enum field"));
                }
            }
        }
        Ok(())
    }
}
