//! Old-to-new item ID table.
//!
//! The embedded table lists the items whose IDs were renumbered upstream
//! (old `NNNN` became `32NNNN`). Display names are kept in Spanish and English
//! for the change report.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{CoreError, CoreErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemInfo {
    pub old_id: String,
    pub new_id: String,
    pub name_es: String,
    pub name_en: String,
}

struct EmbeddedItem {
    old_id: &'static str,
    new_id: &'static str,
    name_es: &'static str,
    name_en: &'static str,
}

#[rustfmt::skip]
const EMBEDDED_ITEMS: &[EmbeddedItem] = &[
    EmbeddedItem { old_id: "2065", new_id: "322065", name_es: "Canción de batalla de Shurelya",   name_en: "Shurelya's Battlesong" },
    EmbeddedItem { old_id: "3002", new_id: "323002", name_es: "Marcasendas",                      name_en: "Trailblazer" },
    EmbeddedItem { old_id: "3003", new_id: "323003", name_es: "Bastón del arcángel",              name_en: "Archangel's Staff" },
    EmbeddedItem { old_id: "3004", new_id: "323004", name_es: "Manamune",                         name_en: "Manamune" },
    EmbeddedItem { old_id: "3050", new_id: "323050", name_es: "Convergencia de Zeke",             name_en: "Zeke's Convergence" },
    EmbeddedItem { old_id: "3075", new_id: "323075", name_es: "Malla de espinas",                 name_en: "Thornmail" },
    EmbeddedItem { old_id: "3107", new_id: "323107", name_es: "Redención",                        name_en: "Redemption" },
    EmbeddedItem { old_id: "3109", new_id: "323109", name_es: "Promesa de caballero",             name_en: "Knight's Vow" },
    EmbeddedItem { old_id: "3110", new_id: "323110", name_es: "Corazón de hielo",                 name_en: "Frozen Heart" },
    EmbeddedItem { old_id: "3119", new_id: "323119", name_es: "Llegada del invierno",             name_en: "Winter's Approach" },
    EmbeddedItem { old_id: "3190", new_id: "323190", name_es: "Medallón de los Solari de Hierro", name_en: "Locket of the Iron Solari" },
    EmbeddedItem { old_id: "3222", new_id: "323222", name_es: "Bendición de Mikael",              name_en: "Mikael's Blessing" },
    EmbeddedItem { old_id: "3504", new_id: "323504", name_es: "Incensario ardiente",              name_en: "Ardent Censer" },
    EmbeddedItem { old_id: "4005", new_id: "324005", name_es: "Mandato imperial",                 name_en: "Imperial Mandate" },
    EmbeddedItem { old_id: "6616", new_id: "326616", name_es: "Bastón de aguas fluidas",          name_en: "Staff of Flowing Water" },
    EmbeddedItem { old_id: "6617", new_id: "326617", name_es: "Renovación de piedra lunar",       name_en: "Moonstone Renewer" },
    EmbeddedItem { old_id: "6620", new_id: "326620", name_es: "Ecos de Helia",                    name_en: "Echoes of Helia" },
    EmbeddedItem { old_id: "6621", new_id: "326621", name_es: "Núcleo albar",                     name_en: "Dawncore" },
    EmbeddedItem { old_id: "6657", new_id: "326657", name_es: "Vara de las edades",               name_en: "Rod of Ages" },
    EmbeddedItem { old_id: "8020", new_id: "328020", name_es: "Máscara abisal",                   name_en: "Abyssal Mask" },
];

/// Immutable lookup from old item ID to its replacement and display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemIdMap {
    entries: BTreeMap<String, ItemInfo>,
}

impl ItemIdMap {
    /// The built-in table.
    pub fn embedded() -> Self {
        let entries = EMBEDDED_ITEMS
            .iter()
            .map(|item| {
                (
                    item.old_id.to_string(),
                    ItemInfo {
                        old_id: item.old_id.to_string(),
                        new_id: item.new_id.to_string(),
                        name_es: item.name_es.to_string(),
                        name_en: item.name_en.to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Build a map from arbitrary entries.
    ///
    /// Rejects duplicate old IDs and chains where a replacement ID is itself
    /// remapped, since either would make repeated runs rewrite files again.
    pub fn from_entries<I>(entries: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = ItemInfo>,
    {
        let mut map = BTreeMap::new();
        for entry in entries {
            if entry.old_id.trim().is_empty() || entry.new_id.trim().is_empty() {
                return Err(CoreError::new(
                    CoreErrorCode::InvalidIdMap,
                    format!(
                        "entry has an empty ID (old_id={:?}, new_id={:?})",
                        entry.old_id, entry.new_id
                    ),
                ));
            }
            if map.contains_key(&entry.old_id) {
                return Err(CoreError::new(
                    CoreErrorCode::InvalidIdMap,
                    format!("duplicate old_id {}", entry.old_id),
                ));
            }
            map.insert(entry.old_id.clone(), entry);
        }

        for info in map.values() {
            if let Some(next) = map.get(&info.new_id)
                && next.new_id != info.new_id
            {
                return Err(CoreError::new(
                    CoreErrorCode::InvalidIdMap,
                    format!(
                        "chained mapping {} -> {} -> {}",
                        info.old_id, info.new_id, next.new_id
                    ),
                ));
            }
        }

        Ok(Self { entries: map })
    }

    /// Parse a JSON array of `ItemInfo` objects.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let entries: Vec<ItemInfo> = serde_json::from_str(json).map_err(|e| {
            CoreError::new(
                CoreErrorCode::InvalidIdMap,
                format!("failed to parse ID map: {e}"),
            )
        })?;
        Self::from_entries(entries)
    }

    pub fn load_json(path: &Path) -> Result<Self, CoreError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read ID map {}: {e}", path.display()),
            )
        })?;
        Self::from_json_str(&contents)
    }

    pub fn resolve(&self, old_id: &str) -> Option<&ItemInfo> {
        self.entries.get(old_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by old ID.
    pub fn iter(&self) -> impl Iterator<Item = &ItemInfo> {
        self.entries.values()
    }
}

impl Default for ItemIdMap {
    fn default() -> Self {
        Self::embedded()
    }
}
