//! Bincode codec for the binary format.

use bincode::Options;
use slotsave_core::Record;

use super::traits::{CodecError, RecordCodec};

/// Largest record the binary codec will encode or decode (64 MiB).
///
/// Bounds allocations when a corrupted length prefix claims a huge
/// collection.
pub const MAX_RECORD_SIZE: u64 = 64 * 1024 * 1024;

/// Fixed-width little-endian bincode; trailing bytes are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl BincodeCodec {
    const ID: &'static str = "bincode";

    fn options() -> impl Options {
        bincode::DefaultOptions::new()
            .with_fixint_encoding()
            .with_limit(MAX_RECORD_SIZE)
    }
}

impl<R: Record> RecordCodec<R> for BincodeCodec {
    fn encode(&self, record: &R) -> Result<Vec<u8>, CodecError> {
        Self::options()
            .serialize(record)
            .map_err(|e| CodecError::encode(e.to_string(), Self::ID))
    }

    fn decode(&self, data: &[u8]) -> Result<R, CodecError> {
        Self::options()
            .deserialize(data)
            .map_err(|e| CodecError::decode(e.to_string(), Self::ID, data.len()))
    }

    fn codec_id(&self) -> &'static str {
        Self::ID
    }
}
