//! Service layer: the binding resolution engine.
//!
//! Leaf services ([`ModifierTracker`], [`BindingStore`], [`ActionRegistry`],
//! [`KeybindSetRegistry`], [`PersistenceGateway`]) each own one concern;
//! [`Session`] coordinates them for the active keybind set.

pub mod action_registry;
pub mod binding_store;
pub mod keybind_sets;
pub mod modifier_tracker;
pub mod observer;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use action_registry::ActionRegistry;
pub use binding_store::BindingStore;
pub use keybind_sets::{KeybindSet, KeybindSetRegistry};
pub use modifier_tracker::{ModifierPhysicalState, ModifierTracker};
pub use observer::{Observable, SubscriptionId};
pub use persistence::{
    FileStore, KeyValueStore, LoadOutcome, MemoryStore, PersistedDocument, PersistenceGateway,
};
pub use session::{Session, SessionObservers};
