//! Per-type manager registry
//!
//! Applications usually want exactly one staging manager per record type,
//! reachable from anywhere. The registry hands out a shared handle keyed by
//! the manager's concrete type; the first caller constructs it and every
//! later caller receives the same instance.
//!
//! The registry never initializes managers. Callers run
//! [`StagingManager::init`] on the handle they receive.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use slotsave_core::Record;
use tracing::debug;

use crate::hooks::StagingHooks;
use crate::manager::StagingManager;

/// Shared, lockable handle to a staging manager
pub type SharedManager<R, H> = Arc<Mutex<StagingManager<R, H>>>;

type Entry = Arc<dyn Any + Send + Sync>;

/// Map from manager type to its single shared instance
#[derive(Default)]
pub struct ManagerRegistry {
    entries: Mutex<HashMap<TypeId, Entry>>,
}

impl ManagerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the manager for `StagingManager<R, H>`, creating it on first use
    ///
    /// `create` runs at most once per type, under the registry lock.
    pub fn get_or_insert_with<R, H>(
        &self,
        create: impl FnOnce() -> StagingManager<R, H>,
    ) -> SharedManager<R, H>
    where
        R: Record,
        H: StagingHooks<R> + 'static,
    {
        let key = TypeId::of::<StagingManager<R, H>>();
        let mut entries = self.entries.lock();

        if let Some(existing) = entries.get(&key).and_then(|e| downcast::<R, H>(e)) {
            return existing;
        }

        debug!(
            target: "slotsave::staging",
            manager = std::any::type_name::<StagingManager<R, H>>(),
            "Registering staging manager"
        );
        let manager: SharedManager<R, H> = Arc::new(Mutex::new(create()));
        entries.insert(key, Arc::clone(&manager) as Entry);
        manager
    }

    /// Return the manager for `StagingManager<R, H>` if one is registered
    pub fn get<R, H>(&self) -> Option<SharedManager<R, H>>
    where
        R: Record,
        H: StagingHooks<R> + 'static,
    {
        let key = TypeId::of::<StagingManager<R, H>>();
        self.entries
            .lock()
            .get(&key)
            .and_then(|e| downcast::<R, H>(e))
    }

    /// Drop the registry's handle for `StagingManager<R, H>`
    ///
    /// Handles already given out stay valid. Returns the removed handle.
    pub fn remove<R, H>(&self) -> Option<SharedManager<R, H>>
    where
        R: Record,
        H: StagingHooks<R> + 'static,
    {
        let key = TypeId::of::<StagingManager<R, H>>();
        self.entries
            .lock()
            .remove(&key)
            .and_then(|e| downcast::<R, H>(&e))
    }

    /// Number of registered managers
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// True if no managers are registered
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl std::fmt::Debug for ManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerRegistry")
            .field("managers", &self.len())
            .finish()
    }
}

fn downcast<R, H>(entry: &Entry) -> Option<SharedManager<R, H>>
where
    R: Record,
    H: StagingHooks<R> + 'static,
{
    Arc::clone(entry)
        .downcast::<Mutex<StagingManager<R, H>>>()
        .ok()
}

static GLOBAL: Lazy<ManagerRegistry> = Lazy::new(ManagerRegistry::new);

/// Process-wide registry
pub fn global_registry() -> &'static ManagerRegistry {
    &GLOBAL
}
