//! Attack dispatch + выстрел + fire lockout timer.
//!
//! # Attack Flow
//!
//! ```text
//! AttackInput(pressed) → TriggerHeld=true + AttackRequested (ровно один)
//!   ↓
//! attack(): wielded ∈ {Knife, Gun} и CombatState::Unoccupied, иначе no-op
//!   ↓ Gun                                ↓ Knife
//! fireWeapon()                         slashKnife()
//!   ammo > 0: cues + эффекты +           state → SlashTimerInProgress,
//!   декремент + FireTimerInProgress      завершение через
//!   + ScheduledAction(AutoFireReset)     MontageSectionFinished
//!   ammo == 0: только dry-fire cue
//! ```
//!
//! AutoFireReset по истечении lockout: state → Unoccupied; если кнопка
//! ещё зажата — повторный AttackRequested (автоогонь); иначе пустой
//! магазин уходит в автоперезарядку. Повтор идёт ТОЛЬКО через таймер —
//! удержание кнопки само по себе выстрелов не добавляет.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::events::{
    AttackInput, AttackRequested, ReloadRequested, ShotFired,
};
use crate::combat::state::{
    Arsenal, CombatState, DeferredAction, ScheduledAction, StateGeneration, TriggerHeld,
    WieldedWeapon,
};
use crate::combat::weapon::GunStats;
use crate::components::Character;
use crate::feedback::{EffectKind, MontageId, PlayMontage, PlaySoundCue, SoundCue, SpawnEffect};
use crate::probe::{CameraRig, RayProbeSource};
use crate::DeterministicRng;

/// Дальность crosshair-трейса (units)
pub const CROSSHAIR_TRACE_RANGE: f32 = 50_000.0;

/// Срез ствола перед камерой (first person, приближение muzzle socket)
const MUZZLE_FORWARD_OFFSET: f32 = 30.0;

/// System: press-to-trigger.
///
/// Нажатие ставит held-флаг и выпускает ровно один AttackRequested;
/// отпускание только снимает флаг.
pub fn process_attack_input(
    mut inputs: EventReader<AttackInput>,
    mut characters: Query<&mut TriggerHeld, With<Character>>,
    mut requests: EventWriter<AttackRequested>,
) {
    for input in inputs.read() {
        let Ok(mut held) = characters.get_mut(input.entity) else {
            continue;
        };

        held.0 = input.pressed;
        if input.pressed {
            requests.write(AttackRequested {
                entity: input.entity,
            });
        }
    }
}

/// System: тик отложенных действий state machine.
///
/// По истечении таймера callback сверяет generation: отставший от
/// state machine callback молча пропускает себя (спланирован под
/// состоянием, которого уже нет).
pub fn tick_scheduled_actions(
    mut characters: Query<
        (
            Entity,
            &mut ScheduledAction,
            &mut CombatState,
            &mut StateGeneration,
            &TriggerHeld,
            &WieldedWeapon,
            &Arsenal,
        ),
        With<Character>,
    >,
    guns: Query<&GunStats>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut attack_requests: EventWriter<AttackRequested>,
    mut reload_requests: EventWriter<ReloadRequested>,
) {
    let delta = time.delta_secs();

    for (entity, mut scheduled, mut state, mut generation, held, wielded, arsenal) in
        characters.iter_mut()
    {
        scheduled.remaining -= delta;
        if scheduled.remaining > 0.0 {
            continue;
        }

        commands.entity(entity).remove::<ScheduledAction>();

        if scheduled.is_stale(*generation) {
            crate::log(&format!(
                "⏰ Stale scheduled action skipped (entity: {:?}, gen {} != {})",
                entity, scheduled.generation, generation.0
            ));
            continue;
        }

        match scheduled.action {
            DeferredAction::AutoFireReset => {
                if *state != CombatState::FireTimerInProgress {
                    continue;
                }

                *state = CombatState::Unoccupied;
                generation.bump();

                if held.0 {
                    // Кнопка всё ещё зажата → следующий выстрел
                    attack_requests.write(AttackRequested { entity });
                } else if let Some(gun_entity) = arsenal.entity_for(*wielded) {
                    // Отпустили на пустом магазине → автоперезарядка
                    if guns.get(gun_entity).is_ok_and(|gun| !gun.has_ammo()) {
                        reload_requests.write(ReloadRequested { entity });
                    }
                }
            }
        }
    }
}

/// System: attack() — диспетчеризация на выстрел или slash.
///
/// Silent no-op если безоружен или timed-действие уже в полёте.
pub fn process_attack_requests(
    mut requests: EventReader<AttackRequested>,
    mut characters: Query<
        (
            &mut CombatState,
            &mut StateGeneration,
            &WieldedWeapon,
            &Arsenal,
            &CameraRig,
        ),
        With<Character>,
    >,
    mut guns: Query<&mut GunStats>,
    probe: Res<RayProbeSource>,
    mut rng: ResMut<DeterministicRng>,
    mut commands: Commands,
    mut sounds: EventWriter<PlaySoundCue>,
    mut montages: EventWriter<PlayMontage>,
    mut effects: EventWriter<SpawnEffect>,
    mut shots: EventWriter<ShotFired>,
) {
    for request in requests.read() {
        let Ok((mut state, mut generation, wielded, arsenal, rig)) =
            characters.get_mut(request.entity)
        else {
            continue;
        };

        if *state != CombatState::Unoccupied || !wielded.is_armed() {
            continue;
        }

        match *wielded {
            WieldedWeapon::Gun => {
                let Some(gun_entity) = arsenal.gun else {
                    continue;
                };
                let Ok(mut gun) = guns.get_mut(gun_entity) else {
                    continue;
                };

                if !gun.has_ammo() {
                    // Пустой магазин: только сухой щелчок
                    sounds.write(PlaySoundCue::new(request.entity, SoundCue::DryFire));
                    continue;
                }

                fire_weapon(
                    request.entity,
                    &mut gun,
                    rig,
                    &probe,
                    &mut rng,
                    &mut sounds,
                    &mut montages,
                    &mut effects,
                );
                shots.write(ShotFired {
                    entity: request.entity,
                });

                *state = CombatState::FireTimerInProgress;
                generation.bump();
                commands.entity(request.entity).insert(ScheduledAction::new(
                    gun.fire_interval,
                    DeferredAction::AutoFireReset,
                    *generation,
                ));
            }
            WieldedWeapon::Knife => {
                *state = CombatState::SlashTimerInProgress;
                generation.bump();

                sounds.write(PlaySoundCue::new(request.entity, SoundCue::KnifeSlash));
                montages.write(PlayMontage {
                    entity: request.entity,
                    montage: MontageId::KnifeSlash,
                    section: "Default".to_string(),
                });

                crate::log(&format!("⚔️ Knife slash started (entity: {:?})", request.entity));
            }
            WieldedWeapon::Unarmed | WieldedWeapon::HoldingBreath => {}
        }
    }
}

/// Один выстрел: feedback + декремент ammo. Lockout ставит вызывающий.
#[allow(clippy::too_many_arguments)]
fn fire_weapon(
    entity: Entity,
    gun: &mut GunStats,
    rig: &CameraRig,
    probe: &RayProbeSource,
    rng: &mut DeterministicRng,
    sounds: &mut EventWriter<PlaySoundCue>,
    montages: &mut EventWriter<PlayMontage>,
    effects: &mut EventWriter<SpawnEffect>,
) {
    let muzzle = muzzle_location(rig);
    let beam_end = compute_beam_end(probe, rig, muzzle);

    // Рандомизированный pitch выстрела (из seeded RNG — детерминизм)
    let pitch = 0.95 + rng.rng.gen_range(0.0..0.1);
    sounds.write(PlaySoundCue {
        entity,
        cue: SoundCue::GunFire,
        pitch,
    });

    effects.write(SpawnEffect {
        effect: EffectKind::MuzzleFlash,
        location: muzzle,
        beam_end: None,
    });
    effects.write(SpawnEffect {
        effect: EffectKind::ImpactParticles,
        location: beam_end,
        beam_end: None,
    });
    effects.write(SpawnEffect {
        effect: EffectKind::BeamParticles,
        location: muzzle,
        beam_end: Some(beam_end),
    });

    montages.write(PlayMontage {
        entity,
        montage: MontageId::PistolFire,
        section: "Default".to_string(),
    });

    gun.decrement_ammo();

    crate::log(&format!(
        "💥 Fired (entity: {:?}, ammo: {}/{})",
        entity, gun.ammo, gun.magazine_capacity
    ));
}

fn muzzle_location(rig: &CameraRig) -> Vec3 {
    rig.location + rig.forward * MUZZLE_FORWARD_OFFSET
}

/// Конечная точка луча выстрела.
///
/// Два трейса: сперва от центра экрана через прицел, затем от среза
/// ствола к найденной точке — препятствие между стволом и точкой
/// прицеливания перехватывает луч.
fn compute_beam_end(probe: &RayProbeSource, rig: &CameraRig, muzzle: Vec3) -> Vec3 {
    let mut beam_end = rig.location + rig.forward * CROSSHAIR_TRACE_RANGE;
    if let Some(hit) = probe.cast_ray(rig.location, rig.forward, CROSSHAIR_TRACE_RANGE) {
        beam_end = hit.point;
    }

    let to_target = beam_end - muzzle;
    let distance = to_target.length();
    if distance > f32::EPSILON {
        if let Some(hit) = probe.cast_ray(muzzle, to_target / distance, distance) {
            beam_end = hit.point;
        }
    }

    beam_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{NullProbe, RayHit, RayProbe};

    /// Probe, возвращающий фиксированную точку для любого луча.
    struct WallProbe {
        point: Vec3,
    }

    impl RayProbe for WallProbe {
        fn cast_ray(&self, _origin: Vec3, _direction: Vec3, _max: f32) -> Option<RayHit> {
            Some(RayHit {
                entity: None,
                point: self.point,
            })
        }
    }

    #[test]
    fn test_beam_end_without_hits_extends_full_range() {
        let probe = RayProbeSource(Box::new(NullProbe));
        let rig = CameraRig {
            location: Vec3::ZERO,
            forward: Vec3::X,
            yaw: 0.0,
        };
        let beam_end = compute_beam_end(&probe, &rig, muzzle_location(&rig));
        assert_eq!(beam_end, Vec3::X * CROSSHAIR_TRACE_RANGE);
    }

    #[test]
    fn test_beam_end_stops_at_blocking_hit() {
        let wall = Vec3::new(120.0, 0.0, 0.0);
        let probe = RayProbeSource(Box::new(WallProbe { point: wall }));
        let rig = CameraRig {
            location: Vec3::ZERO,
            forward: Vec3::X,
            yaw: 0.0,
        };
        let beam_end = compute_beam_end(&probe, &rig, muzzle_location(&rig));
        assert_eq!(beam_end, wall);
    }
}
