//! espwire: schema-driven codec for a compact binary device-control protocol
//!
//! Embedded nodes expose "entities" (switches, sensors, climate units, lights
//! and so on) through protobuf-style payloads. Rather than hand-writing a codec
//! per message, this crate interprets a declarative table of entity schemas:
//! one generic decoder turns `(message_type, payload)` pairs into typed field
//! maps, and one generic encoder turns sparse field maps into command payloads.
//!
//! # Payload Format
//!
//! ```text
//! +-----------------------------+-----------------------------+
//! | tag varint                  | value                       |
//! | (field_number << 3) | wire  | varint / 4 bytes LE / len+n |
//! +-----------------------------+-----------------------------+
//! | ... repeated until the end of the payload ...             |
//! +-----------------------------------------------------------+
//! ```
//!
//! Connection-level framing is not handled here: payloads arrive already
//! separated from their length prefix and message type.
//!
//! # Features
//!
//! - Zero-copy decoding: strings borrow from the payload
//! - Sparse command encoding with has-pattern presence flags
//! - Enum token mapping for commands
//! - Unknown fields and message types tolerated, malformed input rejected
//! - `no_std` support with `alloc`
//! - Optional `serde` serialization of schemas and decoded messages
//!
//! # Example
//!
//! ```rust
//! use espwire::*;
//!
//! let registry = SchemaRegistry::builtin()?;
//! let encoder = CommandEncoder::new(&registry);
//! let decoder = MessageDecoder::new(&registry);
//!
//! let payload = encoder.encode("switch", 42, &CommandFields::new().set("state", true))?;
//! assert_eq!(payload, [0x08, 42, 0x10, 0x01]);
//!
//! let decoded = decoder.decode(msg_types::SWITCH_COMMAND_REQUEST, &payload)?;
//! assert_eq!(decoded.kind, "switch");
//! assert_eq!(decoded.fields.key(), Some(42));
//! assert_eq!(decoded.fields.get("state"), Some(Value::Bool(true)));
//! # Ok::<(), espwire::Error>(())
//! ```

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod messages;
pub mod registry;
pub mod schema;
pub mod value;
pub mod varint;
pub mod wire;

// Re-export main types
pub use decoder::{Decoded, DecodedFields, MessageDecoder, PayloadCursor, RawValue};
pub use encoder::{CommandEncoder, CommandFields, PayloadEncoder};
pub use error::{Error, Result};
pub use messages::{msg_types, ENTITY_SCHEMAS};
pub use registry::SchemaRegistry;
pub use schema::{
    CommandSchema, EntitySchema, EnumMapping, FieldSpec, HasPatternField, ListEntitiesSchema,
    MessageLayout, MessageShape, RepeatedFieldSpec, StateSchema,
};
pub use value::{Value, ValueType};
pub use wire::WireType;

/// Largest payload the decoder will look at
pub const MAX_PAYLOAD_SIZE: usize = 16 * 1024 * 1024;

/// Largest message type id a schema may use
pub const MAX_MESSAGE_TYPE: u32 = 0xFFFF;
