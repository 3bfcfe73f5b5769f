//! Record codec trait definitions.

use slotsave_core::Record;

/// Record codec trait.
///
/// Every record passing through the store goes through the codec, both
/// on its way to disk and on its way back.
///
/// # Thread Safety
///
/// Codecs must be `Send + Sync` so a store can be shared across threads.
///
/// # Failure
///
/// `decode` must either produce a complete record or fail with
/// [`CodecError::Decode`]; it never yields a partially populated value.
/// Decode failures are what trigger the store's backup fallback.
pub trait RecordCodec<R: Record>: Send + Sync {
    /// Encode a record into the bytes written to a slot file.
    fn encode(&self, record: &R) -> Result<Vec<u8>, CodecError>;

    /// Decode a record from the bytes read from a slot file.
    fn decode(&self, data: &[u8]) -> Result<R, CodecError>;

    /// Unique codec identifier, used in diagnostics.
    fn codec_id(&self) -> &'static str;
}

/// Codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The record could not be represented in this format.
    #[error("Encode error (codec={codec_id}): {detail}")]
    Encode {
        /// Human-readable error description
        detail: String,
        /// Codec ID that attempted the encode
        codec_id: String,
    },

    /// The data is not a valid record in this format.
    ///
    /// Carries the codec identity and data length so callers can
    /// distinguish a wrong-format file from a truncated one.
    #[error("Decode error (codec={codec_id}, data_len={data_len}): {detail}")]
    Decode {
        /// Human-readable error description
        detail: String,
        /// Codec ID that attempted the decode
        codec_id: String,
        /// Length of the data that failed to decode
        data_len: usize,
    },
}

impl CodecError {
    /// Create an encode error.
    pub fn encode(detail: impl Into<String>, codec_id: impl Into<String>) -> Self {
        CodecError::Encode {
            detail: detail.into(),
            codec_id: codec_id.into(),
        }
    }

    /// Create a decode error with full diagnostic context.
    pub fn decode(detail: impl Into<String>, codec_id: impl Into<String>, data_len: usize) -> Self {
        CodecError::Decode {
            detail: detail.into(),
            codec_id: codec_id.into(),
            data_len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{BincodeCodec, JsonCodec};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        num: i32,
    }

    impl Record for Sample {}

    // Test that trait is object-safe
    fn _accepts_box_dyn_codec(_codec: Box<dyn RecordCodec<Sample>>) {}

    #[test]
    fn test_codec_trait_object_safe() {
        let codecs: Vec<Box<dyn RecordCodec<Sample>>> =
            vec![Box::new(JsonCodec), Box::new(BincodeCodec)];

        for codec in codecs {
            let encoded = codec.encode(&Sample { num: 42 }).unwrap();
            let decoded = codec.decode(&encoded).unwrap();
            assert_eq!(decoded.num, 42, "codec {}", codec.codec_id());
        }
    }

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::decode("test error", "json", 42);
        let msg = err.to_string();
        assert!(msg.contains("test error"));
        assert!(msg.contains("json"));
        assert!(msg.contains("42"));

        let err = CodecError::encode("too large", "bincode");
        let msg = err.to_string();
        assert!(msg.contains("Encode error"));
        assert!(msg.contains("bincode"));
    }

    #[test]
    fn test_codec_error_equality() {
        let err1 = CodecError::decode("error", "json", 10);
        let err2 = CodecError::decode("error", "json", 10);
        let err3 = CodecError::decode("different", "json", 10);

        assert_eq!(err1, err2);
        assert_ne!(err1, err3);
    }
}
