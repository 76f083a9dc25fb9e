//! Item catalog — статические определения предметов.
//!
//! **ItemDefinition** — immutable blueprint (name, widget-поля, gun
//! template, prefab path). Хранится в `ItemCatalog` resource, создаётся
//! hardcoded при старте (позже из RON).
//!
//! **WorldItem** — runtime-предмет в мире, спавнится по definition
//! через `spawn_world_item`.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::combat::weapon::{AmmoKind, GunStats};

use super::{ItemCategory, ItemPresentation, ItemState, WorldItem};

/// Item identifier (unique string ID)
///
/// # Examples
/// - "pistol_basic"
/// - "combat_knife"
/// - "ammo_pistol"
#[derive(Clone, Debug, PartialEq, Eq, Hash, Reflect)]
pub struct ItemId(pub String);

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Static item definition (blueprint).
#[derive(Clone, Debug, Reflect)]
pub struct ItemDefinition {
    pub id: ItemId,
    /// Имя на pickup-виджете
    pub name: String,
    pub category: ItemCategory,
    /// Кнопка подбора на виджете
    pub pickup_button: u8,
    /// Подпись на виджете
    pub memo: String,
    /// Количество (патроны в ammo-предметах, 1 для оружия)
    pub count: u32,
    /// Prefab визуала
    pub prefab_path: String,
    /// Template для GunStats (только Gun)
    pub gun_template: Option<GunStats>,
}

/// Item definitions lookup table (resource).
#[derive(Resource, Clone, Debug)]
pub struct ItemCatalog {
    definitions: HashMap<ItemId, ItemDefinition>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    pub fn get(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.definitions.get(id)
    }

    pub fn add(&mut self, definition: ItemDefinition) {
        self.definitions.insert(definition.id.clone(), definition);
    }

    pub fn all_ids(&self) -> Vec<&ItemId> {
        self.definitions.keys().collect()
    }
}

impl Default for ItemCatalog {
    /// Hardcoded definitions (базовые items)
    fn default() -> Self {
        let mut catalog = Self::new();

        // === WEAPONS ===

        catalog.add(ItemDefinition {
            id: "pistol_basic".into(),
            name: "Pistol".to_string(),
            category: ItemCategory::Gun,
            pickup_button: b'E',
            memo: "13-round sidearm".to_string(),
            count: 1,
            prefab_path: "weapons/pistol_basic".to_string(),
            gun_template: Some(GunStats::pistol()),
        });

        catalog.add(ItemDefinition {
            id: "rifle_basic".into(),
            name: "Assault Rifle".to_string(),
            category: ItemCategory::Gun,
            pickup_button: b'E',
            memo: "Automatic rifle".to_string(),
            count: 1,
            prefab_path: "weapons/rifle_basic".to_string(),
            gun_template: Some(GunStats::assault_rifle()),
        });

        catalog.add(ItemDefinition {
            id: "combat_knife".into(),
            name: "Combat Knife".to_string(),
            category: ItemCategory::Knife,
            pickup_button: b'E',
            memo: "Quiet and close".to_string(),
            count: 1,
            prefab_path: "weapons/combat_knife".to_string(),
            gun_template: None,
        });

        // === AMMO ===

        catalog.add(ItemDefinition {
            id: "ammo_pistol".into(),
            name: "Pistol Ammo".to_string(),
            category: ItemCategory::Ammo {
                kind: AmmoKind::Pistol,
            },
            pickup_button: b'E',
            memo: "9mm rounds".to_string(),
            count: 30,
            prefab_path: "items/ammo_pistol".to_string(),
            gun_template: None,
        });

        catalog.add(ItemDefinition {
            id: "ammo_rifle".into(),
            name: "Rifle Ammo".to_string(),
            category: ItemCategory::Ammo {
                kind: AmmoKind::AssaultRifle,
            },
            pickup_button: b'E',
            memo: "5.56mm rounds".to_string(),
            count: 60,
            prefab_path: "items/ammo_rifle".to_string(),
            gun_template: None,
        });

        catalog
    }
}

/// Заспавнить предмет из каталога в точке мира.
///
/// None если id неизвестен (это ошибка контента, логируем).
pub fn spawn_world_item(
    commands: &mut Commands,
    catalog: &ItemCatalog,
    id: impl Into<ItemId>,
    transform: Transform,
) -> Option<Entity> {
    let id = id.into();
    let Some(definition) = catalog.get(&id) else {
        crate::log_error(&format!("ItemDefinition not found: {:?}", id));
        return None;
    };

    let mut entity = commands.spawn((
        WorldItem {
            name: definition.name.clone(),
            category: definition.category,
            state: ItemState::Pickup,
            count: definition.count,
            prefab_path: definition.prefab_path.clone(),
        },
        ItemPresentation::for_state(ItemState::Pickup, Some(definition.category)),
        transform,
    ));

    if let Some(template) = &definition.gun_template {
        entity.insert(template.clone());
    }

    Some(entity.id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_default_entries() {
        let catalog = ItemCatalog::default();

        assert!(catalog.get(&"pistol_basic".into()).is_some());
        assert!(catalog.get(&"rifle_basic".into()).is_some());
        assert!(catalog.get(&"combat_knife".into()).is_some());
        assert!(catalog.get(&"ammo_pistol".into()).is_some());
        assert!(catalog.get(&"ammo_rifle".into()).is_some());
        assert!(catalog.get(&"unknown".into()).is_none());
    }

    #[test]
    fn test_gun_definitions_carry_templates() {
        let catalog = ItemCatalog::default();

        let pistol = catalog.get(&"pistol_basic".into()).unwrap();
        assert!(pistol.gun_template.is_some());
        assert_eq!(pistol.category, ItemCategory::Gun);

        let knife = catalog.get(&"combat_knife".into()).unwrap();
        assert!(knife.gun_template.is_none());
    }

    #[test]
    fn test_ammo_definition_kind_and_count() {
        let catalog = ItemCatalog::default();
        let ammo = catalog.get(&"ammo_pistol".into()).unwrap();

        assert_eq!(
            ammo.category,
            ItemCategory::Ammo {
                kind: AmmoKind::Pistol
            }
        );
        assert_eq!(ammo.count, 30);
    }
}
