//! Record codecs
//!
//! Two interchangeable encodings, selected by [`SaveFormat`]:
//!
//! - [`JsonCodec`]: human-readable JSON for [`SaveFormat::Text`]
//! - [`BincodeCodec`]: compact binary for [`SaveFormat::Binary`]
//!
//! Neither writes a version header; keeping the record layout compatible
//! across application releases is the application's responsibility.

mod binary;
mod json;
mod traits;

pub use binary::{BincodeCodec, MAX_RECORD_SIZE};
pub use json::JsonCodec;
pub use traits::{CodecError, RecordCodec};

use slotsave_core::{Record, SaveFormat};

/// Get the codec for a save format.
pub fn codec_for<R: Record>(format: SaveFormat) -> Box<dyn RecordCodec<R>> {
    match format {
        SaveFormat::Text => Box::new(JsonCodec),
        SaveFormat::Binary => Box::new(BincodeCodec),
    }
}
