//! The save-data record contract
//!
//! A record is the whole application state persisted into one slot. The
//! store only ever reads and writes complete records; there are no partial
//! updates.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Application save data persisted by the slot store.
///
/// Implementors derive `Serialize`/`Deserialize` for the codecs, `Default`
/// for the seed record, and `Clone` for deep copies. Because every field is
/// owned, a `Clone` never shares mutable sub-structures between copies.
///
/// # Example
///
/// ```
/// use serde::{Deserialize, Serialize};
/// use slotsave_core::Record;
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct Progress {
///     level: u32,
///     name: String,
/// }
///
/// impl Record for Progress {}
///
/// let src = Progress { level: 3, name: "x".into() };
/// let mut dst = Progress::default();
/// dst.deep_copy_from(&src);
/// assert_eq!(dst, src);
/// ```
pub trait Record: Serialize + DeserializeOwned + Default + Clone + Send + 'static {
    /// Copy every owned field of `source` into `self`.
    ///
    /// After the call both values are equal and independently mutable.
    /// Override when a record holds data that must not be duplicated
    /// verbatim (for example cached handles that should be rebuilt).
    fn deep_copy_from(&mut self, source: &Self) {
        self.clone_from(source);
    }

    /// Create a fresh record holding a deep copy of `source`.
    fn deep_copy(source: &Self) -> Self {
        let mut record = Self::default();
        record.deep_copy_from(source);
        record
    }
}
