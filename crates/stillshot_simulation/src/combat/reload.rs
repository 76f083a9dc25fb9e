//! Перезарядка: запрос + завершение по animation callback-у.
//!
//! Завершение ведёт движок (MontageSectionFinished), не таймер:
//! длительность перезарядки равна длительности секции монтажа.
//! Перенос патронов происходит ТОЛЬКО в finish_reloading — до него
//! ни магазин, ни резерв не трогаются.

use bevy::prelude::*;

use crate::combat::events::{MontageSectionFinished, ReloadInput, ReloadRequested};
use crate::combat::state::{Arsenal, CombatState, StateGeneration, WieldedWeapon};
use crate::combat::weapon::{AmmoReserve, GunStats};
use crate::components::Character;
use crate::feedback::{MontageId, PlayMontage, PlaySoundCue, SoundCue};

/// System: кнопка R → ReloadRequested.
pub fn process_reload_input(
    mut inputs: EventReader<ReloadInput>,
    mut requests: EventWriter<ReloadRequested>,
) {
    for input in inputs.read() {
        requests.write(ReloadRequested {
            entity: input.entity,
        });
    }
}

/// System: reloadWeapon().
///
/// No-op если: занят timed-действием, в руках не пистолет, магазин
/// полон, или нет носимых патронов нужного типа.
pub fn process_reload_requests(
    mut requests: EventReader<ReloadRequested>,
    mut characters: Query<
        (
            &mut CombatState,
            &mut StateGeneration,
            &WieldedWeapon,
            &Arsenal,
            &AmmoReserve,
        ),
        With<Character>,
    >,
    guns: Query<&GunStats>,
    mut sounds: EventWriter<PlaySoundCue>,
    mut montages: EventWriter<PlayMontage>,
) {
    for request in requests.read() {
        let Ok((mut state, mut generation, wielded, arsenal, reserve)) =
            characters.get_mut(request.entity)
        else {
            continue;
        };

        if *state != CombatState::Unoccupied || *wielded != WieldedWeapon::Gun {
            continue;
        }
        let Some(gun_entity) = arsenal.gun else {
            continue;
        };
        let Ok(gun) = guns.get(gun_entity) else {
            continue;
        };
        if gun.magazine_is_full() || !reserve.has_ammo(gun.ammo_kind) {
            continue;
        }

        *state = CombatState::Reloading;
        generation.bump();

        sounds.write(PlaySoundCue::new(request.entity, SoundCue::ReloadStart));
        montages.write(PlayMontage {
            entity: request.entity,
            montage: MontageId::Reload,
            section: gun.reload_section.clone(),
        });

        crate::log(&format!(
            "🔄 Reload started (entity: {:?}, section: {})",
            request.entity, gun.reload_section
        ));
    }
}

/// System: finishReloading() — animation callback от движка.
///
/// Переносит min(свободное место, носимый запас) из резерва в магазин.
/// Сумма gun.ammo + reserve[kind] инвариантна.
pub fn finish_reloading(
    mut finished: EventReader<MontageSectionFinished>,
    mut characters: Query<
        (
            &mut CombatState,
            &mut StateGeneration,
            &Arsenal,
            &mut AmmoReserve,
        ),
        With<Character>,
    >,
    mut guns: Query<&mut GunStats>,
) {
    for event in finished.read() {
        if event.montage != MontageId::Reload {
            continue;
        }

        let Ok((mut state, mut generation, arsenal, mut reserve)) =
            characters.get_mut(event.entity)
        else {
            continue;
        };

        // Callback пережил принудительный сброс состояния → no-op
        if *state != CombatState::Reloading {
            continue;
        }

        *state = CombatState::Unoccupied;
        generation.bump();

        let Some(gun_entity) = arsenal.gun else {
            continue;
        };
        let Ok(mut gun) = guns.get_mut(gun_entity) else {
            continue;
        };

        let empty_space = gun.magazine_empty_space();
        let transferred = reserve.take(gun.ammo_kind, empty_space);
        gun.reload_ammo(transferred);

        crate::log(&format!(
            "✅ Reload finished (entity: {:?}, +{} rounds, mag {}/{}, carried {})",
            event.entity,
            transferred,
            gun.ammo,
            gun.magazine_capacity,
            reserve.carried(gun.ammo_kind)
        ));
    }
}

#[cfg(test)]
mod tests {
    use crate::combat::weapon::{AmmoKind, AmmoReserve, GunStats};

    #[test]
    fn test_transfer_fills_empty_space() {
        // Резерв 20, магазин 5/13 → переносим 8
        let mut gun = GunStats::pistol();
        gun.ammo = 5;
        let mut reserve = AmmoReserve::empty();
        reserve.add(AmmoKind::Pistol, 20);

        let transferred = reserve.take(gun.ammo_kind, gun.magazine_empty_space());
        gun.reload_ammo(transferred);

        assert_eq!(gun.ammo, 13);
        assert_eq!(reserve.carried(AmmoKind::Pistol), 12);
    }

    #[test]
    fn test_transfer_clamped_by_reserve() {
        // Резерв 3 < свободное место 8 → переносим всё, что есть
        let mut gun = GunStats::pistol();
        gun.ammo = 5;
        let mut reserve = AmmoReserve::empty();
        reserve.add(AmmoKind::Pistol, 3);

        let transferred = reserve.take(gun.ammo_kind, gun.magazine_empty_space());
        gun.reload_ammo(transferred);

        assert_eq!(gun.ammo, 8);
        assert_eq!(reserve.carried(AmmoKind::Pistol), 0);
    }

    #[test]
    fn test_transfer_conserves_total() {
        let mut gun = GunStats::pistol();
        gun.ammo = 2;
        let mut reserve = AmmoReserve::empty();
        reserve.add(AmmoKind::Pistol, 17);
        let total = gun.ammo + reserve.carried(AmmoKind::Pistol);

        let transferred = reserve.take(gun.ammo_kind, gun.magazine_empty_space());
        gun.reload_ammo(transferred);

        assert_eq!(gun.ammo + reserve.carried(AmmoKind::Pistol), total);
        assert!(gun.ammo <= gun.magazine_capacity);
    }
}
