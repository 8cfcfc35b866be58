//! The `{bytes: <int>}` wire wrapper used by data-limit fields.
//!
//! The management API wraps byte counts in an object rather than sending a
//! bare number, but only for data limits — every other numeric field is a
//! plain integer. [`ByteQuantity`] isolates that wire shape in one type so
//! models can store limits as plain `u64` values.
//!
//! Byte counts are `u64` throughout: the protocol requires non-negative
//! limits, and an unsigned representation makes that hold by construction.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A byte count in its wire form: `{"bytes": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteQuantity {
    pub bytes: u64,
}

impl ByteQuantity {
    pub fn new(bytes: u64) -> Self {
        Self { bytes }
    }
}

impl From<u64> for ByteQuantity {
    fn from(bytes: u64) -> Self {
        Self { bytes }
    }
}

impl From<ByteQuantity> for u64 {
    fn from(quantity: ByteQuantity) -> u64 {
        quantity.bytes
    }
}

/// Serde adapters for optional fields stored as `Option<u64>` but carried on
/// the wire as an optional [`ByteQuantity`] object.
pub mod opt_byte_quantity {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<ByteQuantity>::deserialize(deserializer)?.map(|quantity| quantity.bytes))
    }

    pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(bytes) => ByteQuantity::new(*bytes).serialize(serializer),
            None => serializer.serialize_none(),
        }
    }
}
