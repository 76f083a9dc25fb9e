//! Item lifecycle: world pickups.
//!
//! # Архитектура
//!
//! **WorldItem** — предмет в мире (gun/knife/ammo) с state machine
//! `Pickup → Obtained ↔ Equipped` плюс переходный `Falling` для
//! сброшенных предметов. Назад дальше Obtained предмет не
//! возвращается.
//!
//! **ItemPresentation** — engine-facing запись видимости/коллизии по
//! состоянию (движок читает Changed<ItemPresentation> и дёргает
//! mesh/collision/widget).
//!
//! **ItemCatalog** — статические определения (name, widget-поля,
//! gun template), см. catalog.rs.

pub mod catalog;
pub mod pickup;
pub mod targeting;

pub use catalog::{ItemCatalog, ItemDefinition, ItemId};
pub use pickup::{ItemObtained, PickupInterp};
pub use targeting::ItemTargeting;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::weapon::AmmoKind;
use crate::SimSet;

/// Item Plugin: lifecycle + targeting проба.
///
/// Порядок: overlap counter → приземления → trace → interact →
/// полёт предмета → классификация → presentation записи для движка.
pub struct ItemPlugin;

impl Plugin for ItemPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ItemCatalog>()
            .add_event::<PickupZoneOverlap>()
            .add_event::<ItemLanded>()
            .add_event::<pickup::ItemObtained>();

        app.add_systems(
            FixedUpdate,
            (
                targeting::handle_overlap_events,
                handle_item_landed,
                targeting::trace_for_items,
                targeting::process_interact,
                pickup::update_pickup_interps,
                pickup::process_obtained_items,
                apply_item_presentation,
            )
                .chain()
                .in_set(SimSet::Items),
        );
    }
}

/// Состояние предмета в мире.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum ItemState {
    /// Лежит в мире, ждёт подбора
    #[default]
    Pickup,
    /// Подобран персонажем, не в руках
    Obtained,
    /// В руках персонажа
    Equipped,
    /// Сброшен, падает и ждёт приземления
    Falling,
}

/// Категория предмета — диспетчеризация по тегу вместо downcast-ов.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum ItemCategory {
    Knife,
    Gun,
    Ammo { kind: AmmoKind },
}

/// Предмет в мире.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct WorldItem {
    /// Имя на pickup-виджете
    pub name: String,
    pub category: ItemCategory,
    pub state: ItemState,
    /// Количество (патроны в ammo-предметах)
    pub count: u32,
    /// Prefab визуала (для Attachment при equip)
    pub prefab_path: String,
}

/// Видимость/коллизия предмета по состоянию (ECS → Engine).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ItemPresentation {
    pub mesh_visible: bool,
    /// Trace- и overlap-коллизия (AreaSphere + CollisionBox)
    pub collision_enabled: bool,
    /// Hover-виджет (включается только targeting-пробой)
    pub widget_visible: bool,
    /// Физика падения
    pub physics_enabled: bool,
    /// Держать предмет вертикально во время падения (оружие)
    pub keep_upright: bool,
}

impl Default for ItemPresentation {
    fn default() -> Self {
        Self::for_state(ItemState::Pickup, None)
    }
}

impl ItemPresentation {
    /// Свойства компонентов предмета по его состоянию.
    pub fn for_state(state: ItemState, category: Option<ItemCategory>) -> Self {
        match state {
            ItemState::Pickup => Self {
                mesh_visible: true,
                collision_enabled: true,
                widget_visible: false,
                physics_enabled: false,
                keep_upright: false,
            },
            ItemState::Obtained => Self {
                mesh_visible: false,
                collision_enabled: false,
                widget_visible: false,
                physics_enabled: false,
                keep_upright: false,
            },
            ItemState::Equipped => Self {
                mesh_visible: true,
                collision_enabled: false,
                widget_visible: false,
                physics_enabled: false,
                keep_upright: false,
            },
            ItemState::Falling => Self {
                mesh_visible: true,
                collision_enabled: true,
                widget_visible: false,
                physics_enabled: true,
                // Оружие падает не кувыркаясь
                keep_upright: matches!(category, Some(ItemCategory::Gun)),
            },
        }
    }
}

/// Event: персонаж вошёл/вышел из pickup-зоны предмета (Engine → ECS).
#[derive(Event, Debug, Clone)]
pub struct PickupZoneOverlap {
    pub character: Entity,
    pub entered: bool,
}

/// Event: падающий предмет коснулся земли (Engine → ECS).
#[derive(Event, Debug, Clone)]
pub struct ItemLanded {
    pub item: Entity,
}

/// System: ItemState → ItemPresentation (аналог SetItemProperties).
pub fn apply_item_presentation(
    mut items: Query<(&WorldItem, &mut ItemPresentation), Changed<WorldItem>>,
) {
    for (item, mut presentation) in items.iter_mut() {
        *presentation = ItemPresentation::for_state(item.state, Some(item.category));
    }
}

/// System: приземление сброшенного предмета → снова Pickup.
pub fn handle_item_landed(
    mut landed: EventReader<ItemLanded>,
    mut items: Query<&mut WorldItem>,
) {
    for event in landed.read() {
        let Ok(mut item) = items.get_mut(event.item) else {
            continue;
        };
        if item.state == ItemState::Falling {
            item.state = ItemState::Pickup;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presentation_pickup_vs_obtained() {
        let pickup = ItemPresentation::for_state(ItemState::Pickup, None);
        assert!(pickup.mesh_visible);
        assert!(pickup.collision_enabled);
        assert!(!pickup.widget_visible);

        let obtained = ItemPresentation::for_state(ItemState::Obtained, None);
        assert!(!obtained.mesh_visible);
        assert!(!obtained.collision_enabled);
    }

    #[test]
    fn test_falling_gun_keeps_upright() {
        let gun = ItemPresentation::for_state(ItemState::Falling, Some(ItemCategory::Gun));
        assert!(gun.keep_upright);
        assert!(gun.physics_enabled);

        let knife = ItemPresentation::for_state(ItemState::Falling, Some(ItemCategory::Knife));
        assert!(!knife.keep_upright);
    }
}
