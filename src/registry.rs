//! Read-only index over a table of entity schemas
//!
//! Built once at startup, then shared freely: the registry owns no interior
//! mutability, so `&SchemaRegistry` can be used from any number of threads.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec;
use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::messages::ENTITY_SCHEMAS;
use crate::schema::{EntitySchema, MessageLayout, MessageShape};
use crate::MAX_MESSAGE_TYPE;

/// Lookup of schemas by entity kind name and by message type id
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    schemas: Vec<EntitySchema>,
    by_kind: BTreeMap<&'static str, usize>,
    // Dense, indexed by message type id. Ids are unique across shapes, so one
    // table serves all three lookups.
    by_message_type: Vec<Option<(usize, MessageShape)>>,
}

impl SchemaRegistry {
    /// Validate `schemas` and build the lookup indices
    pub fn new(schemas: &[EntitySchema]) -> Result<Self> {
        let mut by_kind = BTreeMap::new();
        let mut seen = BTreeSet::new();
        let mut max_id = 0u32;

        for (index, schema) in schemas.iter().enumerate() {
            schema.validate()?;
            if by_kind.insert(schema.kind, index).is_some() {
                return Err(Error::InvalidSchema("duplicate entity kind"));
            }
            for (id, _) in message_types(schema) {
                if id > MAX_MESSAGE_TYPE {
                    return Err(Error::InvalidSchema("message type id above limit"));
                }
                if !seen.insert(id) {
                    return Err(Error::InvalidSchema("duplicate message type id"));
                }
                max_id = max_id.max(id);
            }
        }

        let mut by_message_type = vec![None; max_id as usize + 1];
        for (index, schema) in schemas.iter().enumerate() {
            for (id, shape) in message_types(schema) {
                by_message_type[id as usize] = Some((index, shape));
            }
        }

        log::debug!(
            "schema registry built: {} kinds, {} message types",
            schemas.len(),
            seen.len()
        );

        Ok(Self {
            schemas: schemas.to_vec(),
            by_kind,
            by_message_type,
        })
    }

    /// Registry over the built-in table in [`crate::messages::ENTITY_SCHEMAS`]
    pub fn builtin() -> Result<Self> {
        Self::new(ENTITY_SCHEMAS)
    }

    /// Schema for an entity kind name
    pub fn by_kind(&self, kind: &str) -> Option<&EntitySchema> {
        self.by_kind.get(kind).map(|&index| &self.schemas[index])
    }

    /// Schema whose state message uses `message_type`
    pub fn by_state_message_type(&self, message_type: u32) -> Option<&EntitySchema> {
        self.by_shape(message_type, MessageShape::State)
    }

    /// Schema whose list-entities message uses `message_type`
    pub fn by_list_entities_message_type(&self, message_type: u32) -> Option<&EntitySchema> {
        self.by_shape(message_type, MessageShape::ListEntities)
    }

    /// Schema whose command message uses `message_type`
    pub fn by_command_message_type(&self, message_type: u32) -> Option<&EntitySchema> {
        self.by_shape(message_type, MessageShape::Command)
    }

    /// Schema and shape for any known message type
    #[inline]
    pub fn resolve(&self, message_type: u32) -> Option<(&EntitySchema, MessageShape)> {
        match self.by_message_type.get(message_type as usize) {
            Some(&Some((index, shape))) => Some((&self.schemas[index], shape)),
            _ => None,
        }
    }

    /// Layout for any known message type
    pub fn layout(&self, message_type: u32) -> Option<(&EntitySchema, MessageLayout)> {
        let (schema, shape) = self.resolve(message_type)?;
        schema.layout(shape).map(|layout| (schema, layout))
    }

    /// Registered schemas in table order
    pub fn kinds(&self) -> impl Iterator<Item = &EntitySchema> {
        self.schemas.iter()
    }

    /// Number of registered entity kinds
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// True when no schema is registered
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    fn by_shape(&self, message_type: u32, wanted: MessageShape) -> Option<&EntitySchema> {
        self.resolve(message_type)
            .filter(|&(_, shape)| shape == wanted)
            .map(|(schema, _)| schema)
    }
}

/// Assigned message type ids of a schema; id 0 marks an unassigned shape
fn message_types(schema: &EntitySchema) -> impl Iterator<Item = (u32, MessageShape)> {
    [
        Some((schema.state.message_type, MessageShape::State)),
        Some((schema.list_entities.message_type, MessageShape::ListEntities)),
        schema.command.map(|c| (c.message_type, MessageShape::Command)),
    ]
    .into_iter()
    .flatten()
    .filter(|&(id, _)| id != 0)
}
