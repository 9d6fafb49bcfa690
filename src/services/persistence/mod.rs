//! Persistence gateway: reads and writes the keybind-set registry.
//!
//! The registry is stored as a single versioned JSON document. Loading
//! migrates older documents forward and never fails: unreadable data is
//! logged and reported as [`LoadOutcome::Corrupt`], which callers treat
//! like a fresh install.

pub mod migrations;
pub mod store;

pub use migrations::CURRENT_VERSION;
pub use store::{FileStore, KeyValueStore, MemoryStore};

use crate::services::{KeybindSet, KeybindSetRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

/// Key of the registry document.
pub const DOCUMENT_KEY: &str = "kbm_layout_keybind_sets";

/// Flat single-namespace storage used before keybind sets existed.
pub const LEGACY_ACTIONS_KEY: &str = "kbm_layout_actions";
/// Legacy bindings (`[[key, entry], ...]`).
pub const LEGACY_KEY_MAPPINGS_KEY: &str = "kbm_layout_key_mappings";
/// Legacy color groups.
pub const LEGACY_COLOR_GROUPS_KEY: &str = "kbm_layout_color_groups";
/// Legacy storage version (a bare integer).
pub const LEGACY_STORAGE_VERSION_KEY: &str = "kbm_layout_storage_version";

const LEGACY_KEYS: [&str; 4] = [
    LEGACY_ACTIONS_KEY,
    LEGACY_KEY_MAPPINGS_KEY,
    LEGACY_COLOR_GROUPS_KEY,
    LEGACY_STORAGE_VERSION_KEY,
];

/// Legacy storage at this version already carried modifier combinations.
const LEGACY_MODIFIER_AWARE_VERSION: u32 = 3;

/// On-disk shape of the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    /// Schema version of this document
    pub schema_version: u32,
    /// Every keybind set
    #[serde(default)]
    pub keybind_sets: Vec<KeybindSet>,
    /// Id of the active set
    #[serde(default)]
    pub selected_keybind_set_id: Option<String>,
}

impl PersistedDocument {
    /// Snapshot of a registry at the current schema version.
    pub fn from_registry(registry: &KeybindSetRegistry) -> Self {
        Self {
            schema_version: CURRENT_VERSION,
            keybind_sets: registry.sets().to_vec(),
            selected_keybind_set_id: registry.selected_id().map(str::to_string),
        }
    }

    /// Builds a registry, rebuilding every action's key mappings from the
    /// set's bindings and pruning bindings of deleted actions.
    pub fn into_registry(self) -> KeybindSetRegistry {
        let mut sets = self.keybind_sets;
        for set in &mut sets {
            let pruned = set.normalize();
            if pruned > 0 {
                warn!(
                    "Pruned {} binding(s) of missing actions from keybind set '{}'",
                    pruned, set.name
                );
            }
        }
        KeybindSetRegistry::from_parts(sets, self.selected_keybind_set_id)
    }
}

/// Result of [`PersistenceGateway::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing stored yet.
    Fresh,
    /// Stored data could not be read or parsed (already logged).
    Corrupt,
    /// Stored data was read.
    Loaded {
        /// The document, migrated to the current schema
        document: PersistedDocument,
        /// Version the data was stored at, if it had to be migrated
        migrated_from: Option<u32>,
    },
}

impl LoadOutcome {
    /// Registry to start the session with; fresh and corrupt data both yield
    /// a single default set.
    pub fn into_registry(self) -> KeybindSetRegistry {
        match self {
            Self::Loaded { document, .. } => document.into_registry(),
            Self::Fresh | Self::Corrupt => KeybindSetRegistry::default(),
        }
    }

    /// Whether the stored data should be rewritten right away (defaults
    /// created or an older schema migrated).
    pub const fn needs_save(&self) -> bool {
        match self {
            Self::Fresh | Self::Corrupt => true,
            Self::Loaded { migrated_from, .. } => migrated_from.is_some(),
        }
    }
}

/// Reads and writes the registry document through a [`KeyValueStore`].
pub struct PersistenceGateway {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for PersistenceGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceGateway").finish_non_exhaustive()
    }
}

impl PersistenceGateway {
    /// Creates a gateway over `store`.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Loads the registry document. Never fails; see [`LoadOutcome`].
    pub fn load(&self) -> LoadOutcome {
        match self.read_document() {
            Ok(None) => {
                info!("No stored keybind sets found, starting fresh");
                LoadOutcome::Fresh
            }
            Ok(Some((document, migrated_from))) => LoadOutcome::Loaded {
                document,
                migrated_from,
            },
            Err(e) => {
                error!("Failed to load stored keybind sets: {e:#}");
                warn!("Ignoring unreadable data and starting with defaults");
                LoadOutcome::Corrupt
            }
        }
    }

    /// Writes the registry. Failures are logged and reported as `false`; the
    /// in-memory state stays authoritative.
    pub fn save(&mut self, registry: &KeybindSetRegistry) -> bool {
        match self.write_document(&PersistedDocument::from_registry(registry)) {
            Ok(()) => {
                debug!("Saved {} keybind set(s)", registry.sets().len());
                true
            }
            Err(e) => {
                error!("Failed to save keybind sets: {e:#}");
                false
            }
        }
    }

    /// Removes the document and any legacy keys.
    pub fn clear(&mut self) -> bool {
        let mut ok = true;
        for key in std::iter::once(DOCUMENT_KEY).chain(LEGACY_KEYS) {
            if let Err(e) = self.store.remove(key) {
                error!("Failed to remove stored key '{key}': {e:#}");
                ok = false;
            }
        }
        if ok {
            info!("Cleared stored keybind sets");
        }
        ok
    }

    fn write_document(&mut self, document: &PersistedDocument) -> Result<()> {
        let content =
            serde_json::to_string(document).context("Failed to serialize keybind sets")?;
        self.store.set(DOCUMENT_KEY, &content)
    }

    fn read_document(&self) -> Result<Option<(PersistedDocument, Option<u32>)>> {
        let raw = match self.store.get(DOCUMENT_KEY)? {
            Some(content) => {
                serde_json::from_str::<Value>(&content).context("Stored document is not JSON")?
            }
            None => match self.read_legacy()? {
                Some(doc) => {
                    info!("Importing legacy single-set storage");
                    doc
                }
                None => return Ok(None),
            },
        };

        let version = migrations::document_version(&raw);
        let (raw, migrated_from) = if version < CURRENT_VERSION {
            (migrations::migrate(raw, version), Some(version))
        } else {
            if version > CURRENT_VERSION {
                warn!(
                    "Stored schema v{version} is newer than supported v{CURRENT_VERSION}, reading anyway"
                );
            }
            (raw, None)
        };

        let document: PersistedDocument =
            serde_json::from_value(raw).context("Stored document has an invalid shape")?;
        Ok(Some((document, migrated_from)))
    }

    /// Assembles the flat legacy keys into a v1 or v2 document.
    fn read_legacy(&self) -> Result<Option<Value>> {
        let values = LEGACY_KEYS
            .iter()
            .map(|key| self.store.get(key))
            .collect::<Result<Vec<_>>>()?;
        if values.iter().all(Option::is_none) {
            return Ok(None);
        }

        let parse = |key: &str, value: Option<&String>| -> Result<Value> {
            value.map_or(Ok(json!([])), |text| {
                serde_json::from_str(text).with_context(|| format!("Legacy key '{key}' is not JSON"))
            })
        };
        let actions = parse(LEGACY_ACTIONS_KEY, values[0].as_ref())?;
        let bindings = parse(LEGACY_KEY_MAPPINGS_KEY, values[1].as_ref())?;
        let color_groups = parse(LEGACY_COLOR_GROUPS_KEY, values[2].as_ref())?;
        let legacy_version = values[3]
            .as_deref()
            .and_then(|v| v.trim().parse::<u32>().ok())
            .unwrap_or(0);

        let schema_version = if legacy_version >= LEGACY_MODIFIER_AWARE_VERSION {
            2
        } else {
            1
        };
        Ok(Some(json!({
            "schemaVersion": schema_version,
            "actions": actions,
            "bindings": bindings,
            "colorGroups": color_groups,
        })))
    }
}
