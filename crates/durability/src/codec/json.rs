//! JSON codec for the text format.

use slotsave_core::Record;

use super::traits::{CodecError, RecordCodec};

/// Pretty-printed UTF-8 JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    const ID: &'static str = "json";
}

impl<R: Record> RecordCodec<R> for JsonCodec {
    fn encode(&self, record: &R) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec_pretty(record).map_err(|e| CodecError::encode(e.to_string(), Self::ID))
    }

    fn decode(&self, data: &[u8]) -> Result<R, CodecError> {
        serde_json::from_slice(data)
            .map_err(|e| CodecError::decode(e.to_string(), Self::ID, data.len()))
    }

    fn codec_id(&self) -> &'static str {
        Self::ID
    }
}
