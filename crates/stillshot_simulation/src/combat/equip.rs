//! Equip/unequip: toggle между Unarmed и запрошенным оружием.
//!
//! Flow:
//! 1. Toggle: запрошен текущий kind → detach в Unarmed
//! 2. Смена kind: implicit detach старого, затем attach нового
//! 3. Оружие не подобрано (нет ссылки в Arsenal) → silent no-op
//!
//! Attach/detach для движка — через Attachment (Changed<Attachment>,
//! пустой prefab_path = рука пуста) и через ItemState предмета.

use bevy::prelude::*;

use crate::combat::events::{EquipIntent, EquipKind};
use crate::combat::state::{Arsenal, CombatState, WieldedWeapon};
use crate::components::{Attachment, Character};
use crate::items::{ItemState, WorldItem};

/// System: обработка equip-интентов.
///
/// Equips игнорируются пока в полёте timed-действие: перезарядка не
/// должна завершиться в чужой wielded kind.
pub fn process_equip_intents(
    mut intents: EventReader<EquipIntent>,
    mut characters: Query<(&CombatState, &mut WieldedWeapon, &Arsenal), With<Character>>,
    mut items: Query<&mut WorldItem>,
    mut commands: Commands,
) {
    for intent in intents.read() {
        let Ok((state, mut wielded, arsenal)) = characters.get_mut(intent.entity) else {
            continue;
        };

        if *state != CombatState::Unoccupied {
            continue;
        }

        let requested = match intent.kind {
            EquipKind::Knife => WieldedWeapon::Knife,
            EquipKind::Gun => WieldedWeapon::Gun,
        };

        // Оружие так и не подобрано → no-op
        let Some(item_entity) = arsenal.entity_for(requested) else {
            crate::log(&format!(
                "Equip {:?} ignored: weapon never picked up (entity: {:?})",
                intent.kind, intent.entity
            ));
            continue;
        };

        if *wielded == requested {
            // Toggle: убрать текущее
            detach(&mut items, item_entity);
            commands.entity(intent.entity).insert(Attachment::default());
            *wielded = WieldedWeapon::Unarmed;

            crate::log(&format!("🗑️ Unequipped {:?} → Unarmed", intent.kind));
            continue;
        }

        // Смена kind: сперва implicit detach текущего
        if let Some(old_entity) = arsenal.entity_for(*wielded) {
            detach(&mut items, old_entity);
        }

        let Ok(mut item) = items.get_mut(item_entity) else {
            continue;
        };
        item.state = ItemState::Equipped;

        commands
            .entity(intent.entity)
            .insert(Attachment::weapon(item.prefab_path.clone()));
        *wielded = requested;

        crate::log(&format!("✅ Equipped {:?}", intent.kind));
    }
}

fn detach(items: &mut Query<&mut WorldItem>, item_entity: Entity) {
    if let Ok(mut item) = items.get_mut(item_entity) {
        // Обратно только до Obtained — подобранные предметы не
        // возвращаются в мир как Pickup
        item.state = ItemState::Obtained;
    }
}
