//! Error types for the espwire codec

use alloc::string::String;

use crate::value::ValueType;

/// Errors that can occur while encoding commands or decoding device messages
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Varint ran past the end of the input or past 10 bytes
    #[error("malformed varint")]
    MalformedVarint,
    /// A length or fixed-width value points past the end of the payload
    #[error("truncated payload")]
    TruncatedPayload,
    /// Tag carries field number 0, an out-of-range field number, or an unskippable wire type
    #[error("invalid tag {0:#x}")]
    InvalidTag(u64),
    /// Payload exceeds [`crate::MAX_PAYLOAD_SIZE`]
    #[error("payload of {0} bytes exceeds the size limit")]
    PayloadTooLarge(usize),
    /// No registered schema uses this message type
    #[error("unknown message type {0}")]
    UnknownMessageType(u32),
    /// No registered schema has this entity kind name
    #[error("unknown entity kind `{0}`")]
    UnknownEntityKind(String),
    /// Entity kind is read-only
    #[error("entity kind `{0}` has no command shape")]
    NoCommandShape(&'static str),
    /// String token is not a key of the field's enum mapping
    #[error("unknown token `{token}` for enum field `{field}`")]
    UnknownEnumToken {
        /// Logical field name
        field: &'static str,
        /// Token supplied by the caller
        token: String,
    },
    /// Supplied value cannot be encoded as the field's declared value type
    #[error("field `{field}` expects a {expected:?} value")]
    InvalidValue {
        /// Logical field name
        field: &'static str,
        /// Declared value type of the field
        expected: ValueType,
    },
    /// Schema table violates a registry invariant
    #[error("invalid schema: {0}")]
    InvalidSchema(&'static str),
}

impl Error {
    /// Returns a human-readable description of the error kind
    pub const fn description(&self) -> &'static str {
        match self {
            Error::MalformedVarint => "malformed varint",
            Error::TruncatedPayload => "payload ends before the value it announces",
            Error::InvalidTag(_) => "invalid field tag",
            Error::PayloadTooLarge(_) => "payload exceeds size limit",
            Error::UnknownMessageType(_) => "unknown message type",
            Error::UnknownEntityKind(_) => "unknown entity kind",
            Error::NoCommandShape(_) => "entity kind cannot be commanded",
            Error::UnknownEnumToken { .. } => "unknown enum token",
            Error::InvalidValue { .. } => "value does not match field type",
            Error::InvalidSchema(_) => "invalid schema table",
        }
    }

    /// Wire-level corruption of a single payload.
    ///
    /// The offending message should be dropped; later traffic is unaffected.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MalformedVarint
                | Error::TruncatedPayload
                | Error::InvalidTag(_)
                | Error::PayloadTooLarge(_)
        )
    }

    /// Message is from a newer or older protocol revision and should be skipped silently
    pub const fn is_ignorable(&self) -> bool {
        matches!(self, Error::UnknownMessageType(_))
    }
}

/// Result type alias for espwire operations
pub type Result<T> = core::result::Result<T, Error>;
