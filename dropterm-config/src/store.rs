//! Configuration store capability.
//!
//! [`ConfigStore`] is the single injected handle through which preferences and
//! shortcuts are read and written. Callers share it as `Arc<dyn ConfigStore>`.
//! [`MemoryConfigStore`] is the in-process implementation; the YAML-backed
//! store in [`crate::persistence`] wraps it.

use crate::schema::Schema;
use crate::value::ConfigValue;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Notification sent to subscribers after a stored value changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigChange {
    /// Path that changed.
    pub path: String,
    /// Effective value after the change (schema default when unset).
    pub value: Option<ConfigValue>,
}

/// Handle returned by [`ConfigStore::subscribe`].
pub type ListenerId = u64;

/// Callback invoked with every [`ConfigChange`].
pub type ChangeListener = Arc<dyn Fn(&ConfigChange) + Send + Sync>;

/// Typed get/set/unset of preference values by path, with change notification.
pub trait ConfigStore: Send + Sync {
    /// Effective value at `path`: the explicit value, else the schema default.
    fn get(&self, path: &str) -> Option<ConfigValue>;

    /// Store an explicit value.
    ///
    /// Infallible for callers: stores backed by a file persist on a best-effort
    /// basis and log failed writes, keeping the new value in memory.
    fn set(&self, path: &str, value: ConfigValue);

    /// Remove the explicit value so `path` reverts to its default.
    fn unset(&self, path: &str);

    fn subscribe(&self, listener: ChangeListener) -> ListenerId;

    /// Returns `false` when `id` was not subscribed.
    fn unsubscribe(&self, id: ListenerId) -> bool;

    fn get_string(&self, path: &str) -> Option<String> {
        match self.get(path)? {
            ConfigValue::String(s) => Some(s),
            other => {
                log::warn!("Expected string at {}, found {}", path, other.type_name());
                None
            }
        }
    }

    fn get_bool(&self, path: &str) -> Option<bool> {
        let value = self.get(path)?;
        let b = value.as_bool();
        if b.is_none() {
            log::warn!("Expected bool at {}, found {}", path, value.type_name());
        }
        b
    }

    fn get_int(&self, path: &str) -> Option<i64> {
        let value = self.get(path)?;
        let i = value.as_int();
        if i.is_none() {
            log::warn!("Expected int at {}, found {}", path, value.type_name());
        }
        i
    }

    fn set_string(&self, path: &str, value: &str) {
        self.set(path, ConfigValue::String(value.to_string()));
    }

    fn set_bool(&self, path: &str, value: bool) {
        self.set(path, ConfigValue::Bool(value));
    }

    fn set_int(&self, path: &str, value: i64) {
        self.set(path, ConfigValue::Int(value));
    }
}

/// In-memory [`ConfigStore`] with schema defaults and subscribers.
pub struct MemoryConfigStore {
    schema: Schema,
    values: Mutex<BTreeMap<String, ConfigValue>>,
    listeners: Mutex<Vec<(ListenerId, ChangeListener)>>,
    next_listener_id: AtomicU64,
}

impl std::fmt::Debug for MemoryConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryConfigStore")
            .field("values", &*self.values.lock())
            .finish_non_exhaustive()
    }
}

impl Default for MemoryConfigStore {
    fn default() -> Self {
        Self::new(Schema::new())
    }
}

impl MemoryConfigStore {
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            values: Mutex::new(BTreeMap::new()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
        }
    }

    /// Store pre-populated with explicit values (no notifications are sent).
    pub fn with_values(schema: Schema, values: BTreeMap<String, ConfigValue>) -> Self {
        let store = Self::new(schema);
        *store.values.lock() = values;
        store
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Copy of the explicitly stored values (defaults excluded).
    pub fn snapshot(&self) -> BTreeMap<String, ConfigValue> {
        self.values.lock().clone()
    }

    /// Whether `path` holds an explicit value.
    pub fn is_set(&self, path: &str) -> bool {
        self.values.lock().contains_key(path)
    }

    fn notify(&self, path: &str) {
        let change = ConfigChange {
            path: path.to_string(),
            value: self.get(path),
        };
        // Clone the callbacks so a listener may subscribe or unsubscribe.
        let listeners: Vec<ChangeListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&change);
        }
    }
}

impl ConfigStore for MemoryConfigStore {
    fn get(&self, path: &str) -> Option<ConfigValue> {
        if let Some(value) = self.values.lock().get(path) {
            return Some(value.clone());
        }
        self.schema.default_for(path).cloned()
    }

    fn set(&self, path: &str, value: ConfigValue) {
        let changed = {
            let mut values = self.values.lock();
            match values.get(path) {
                Some(existing) if *existing == value => false,
                _ => {
                    log::debug!("Config set {} = {}", path, value);
                    values.insert(path.to_string(), value);
                    true
                }
            }
        };
        if changed {
            self.notify(path);
        }
    }

    fn unset(&self, path: &str) {
        let removed = self.values.lock().remove(path).is_some();
        if removed {
            log::debug!("Config unset {}", path);
            self.notify(path);
        }
    }

    fn subscribe(&self, listener: ChangeListener) -> ListenerId {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.lock();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}
