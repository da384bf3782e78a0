//! Serialization helpers.
//!
//! - Registry snapshots are CBOR via `ciborium` (NOT JSON): compact, and
//!   `u128` amounts are encoded natively.
//! - `amount` encodes `u128` amounts as decimal strings for text formats
//!   (TOML integers stop at `i64::MAX`).
//! - Later-added snapshot fields carry `#[serde(default)]` so older
//!   snapshots still decode.

pub mod amount;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Serialization errors.
#[derive(Debug, Error)]
pub enum SerializationError {
    /// CBOR encoding failed.
    #[error("CBOR encoding failed: {0}")]
    Encode(String),

    /// CBOR decoding failed.
    #[error("CBOR decoding failed: {0}")]
    Decode(String),
}

/// Serialize to CBOR bytes.
pub fn to_cbor<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = Vec::new();
    ciborium::into_writer(value, &mut bytes)
        .map_err(|e| SerializationError::Encode(format!("{:?}", e)))?;
    Ok(bytes)
}

/// Deserialize from CBOR bytes.
pub fn from_cbor<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    ciborium::from_reader(bytes).map_err(|e| SerializationError::Decode(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ledger {
        balance: u128,
        label: String,
    }

    #[test]
    fn test_cbor_preserves_wide_amounts() {
        let original = Ledger {
            balance: u128::MAX,
            label: "escrow".to_string(),
        };
        let bytes = to_cbor(&original).unwrap();
        let recovered: Ledger = from_cbor(&bytes).unwrap();
        assert_eq!(original, recovered);
    }

    #[test]
    fn test_cbor_deterministic() {
        let value = Ledger {
            balance: 123,
            label: "hello".to_string(),
        };
        assert_eq!(to_cbor(&value).unwrap(), to_cbor(&value).unwrap());
    }

    #[test]
    fn test_cbor_decode_garbage_fails() {
        let result: Result<Ledger, _> = from_cbor(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(SerializationError::Decode(_))));
    }

    #[test]
    fn test_cbor_backward_compatibility() {
        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V1 {
            field1: u32,
        }

        #[derive(Debug, Serialize, Deserialize, PartialEq)]
        struct V2 {
            field1: u32,
            #[serde(default)]
            field2: u128,
        }

        let bytes = to_cbor(&V1 { field1: 42 }).unwrap();

        // V2 can deserialize V1 data with default for new field
        let v2: V2 = from_cbor(&bytes).unwrap();
        assert_eq!(v2.field1, 42);
        assert_eq!(v2.field2, 0);
    }
}
