//! Pickup-интерполяция: полёт предмета в точку перед камерой.
//!
//! Flow:
//! 1. interact() по hover-цели → `PickupInterp` на предмете
//! 2. Каждый тик предмет летит к camera interp target (две независимые
//!    кривые: вертикальная дуга + масштаб), сохраняя стартовый yaw
//!    offset относительно камеры
//! 3. По завершении — `ItemObtained` → классификация по категории:
//!    Gun/Knife в Arsenal (слабые ссылки), Ammo в резерв
//!
//! Кривые — фиксированные функции на месте бывших curve-ассетов.

use bevy::prelude::*;

use crate::combat::state::Arsenal;
use crate::combat::weapon::AmmoReserve;
use crate::components::Character;
use crate::feedback::{PlaySoundCue, SoundCue};
use crate::probe::CameraRig;

use super::targeting::ItemTargeting;
use super::{ItemCategory, ItemState, WorldItem};

/// Длительность полёта предмета (бывший ZCurveTime)
pub const INTERP_DURATION: f32 = 0.7;

/// Высота вертикальной дуги над прямой стартом-целью
const ARC_HEIGHT: f32 = 40.0;

/// Активная pickup-интерполяция (компонент на предмете).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct PickupInterp {
    /// Кто подбирает
    pub character: Entity,
    pub elapsed: f32,
    pub duration: f32,
    /// Стартовая позиция предмета (world space)
    pub start_location: Vec3,
    /// Yaw offset камера→предмет на момент старта (градусы).
    /// Держим его постоянным, чтобы предмет не крутился относительно
    /// взгляда, пока игрок вертит камерой.
    pub initial_yaw_offset: f32,
}

impl PickupInterp {
    pub fn start(character: Entity, item_location: Vec3, camera_yaw: f32, item_yaw: f32) -> Self {
        Self {
            character,
            elapsed: 0.0,
            duration: INTERP_DURATION,
            start_location: item_location,
            initial_yaw_offset: item_yaw - camera_yaw,
        }
    }
}

/// Event: интерполяция закончена, предмет у персонажа.
#[derive(Event, Debug, Clone)]
pub struct ItemObtained {
    pub item: Entity,
    pub character: Entity,
}

/// Ease-out cubic: быстрый старт, плавный финиш. (t-1)³ + 1
pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t - 1.0;
    t * t * t + 1.0
}

/// Вертикальная дуга: подъём к середине полёта, спад к концу.
pub fn arc_curve(t: f32) -> f32 {
    (t.clamp(0.0, 1.0) * std::f32::consts::PI).sin()
}

/// Масштаб предмета по ходу полёта: сжимается к камере.
pub fn pickup_scale_curve(t: f32) -> f32 {
    1.0 - 0.75 * t.clamp(0.0, 1.0) * t.clamp(0.0, 1.0)
}

/// System: тик всех активных pickup-интерполяций.
pub fn update_pickup_interps(
    mut items: Query<(Entity, &mut Transform, &mut PickupInterp)>,
    rigs: Query<&CameraRig, With<Character>>,
    time: Res<Time<Fixed>>,
    mut commands: Commands,
    mut obtained: EventWriter<ItemObtained>,
) {
    let delta = time.delta_secs();

    for (item_entity, mut transform, mut interp) in items.iter_mut() {
        let Ok(rig) = rigs.get(interp.character) else {
            // Персонаж исчез — роняем интерполяцию
            commands.entity(item_entity).remove::<PickupInterp>();
            continue;
        };

        interp.elapsed += delta;
        let t = (interp.elapsed / interp.duration).clamp(0.0, 1.0);
        let eased = ease_out_cubic(t);

        let target = rig.interp_target();
        let mut location = interp.start_location.lerp(target, eased);
        location.y += ARC_HEIGHT * arc_curve(t);

        transform.translation = location;
        transform.scale = Vec3::splat(pickup_scale_curve(t));
        transform.rotation = Quat::from_rotation_y((rig.yaw + interp.initial_yaw_offset).to_radians());

        if interp.elapsed >= interp.duration {
            commands.entity(item_entity).remove::<PickupInterp>();
            obtained.write(ItemObtained {
                item: item_entity,
                character: interp.character,
            });
        }
    }
}

/// System: классификация подобранного предмета (pickup handler).
///
/// Gun/Knife → слабая ссылка в Arsenal + state Obtained;
/// Ammo → в резерв, entity предмета уходит из мира.
pub fn process_obtained_items(
    mut obtained: EventReader<ItemObtained>,
    mut characters: Query<(&mut Arsenal, &mut AmmoReserve, &mut ItemTargeting), With<Character>>,
    mut items: Query<&mut WorldItem>,
    mut commands: Commands,
    mut sounds: EventWriter<PlaySoundCue>,
) {
    for event in obtained.read() {
        let Ok((mut arsenal, mut reserve, mut targeting)) = characters.get_mut(event.character)
        else {
            continue;
        };
        let Ok(mut item) = items.get_mut(event.item) else {
            continue;
        };

        match item.category {
            ItemCategory::Gun => {
                arsenal.gun = Some(event.item);
                item.state = ItemState::Obtained;
            }
            ItemCategory::Knife => {
                arsenal.knife = Some(event.item);
                item.state = ItemState::Obtained;
            }
            ItemCategory::Ammo { kind } => {
                reserve.add(kind, item.count);
                commands.entity(event.item).despawn();
            }
        }

        // Сбросить hover-цель: предмет больше не в мире
        targeting.clear_hover();

        sounds.write(PlaySoundCue::new(event.character, SoundCue::ItemObtained));
        crate::log(&format!(
            "🎒 Item obtained: {} ({:?})",
            item.name, item.category
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);

        let mid = ease_out_cubic(0.5);
        assert!(mid > 0.8 && mid < 0.9);
    }

    #[test]
    fn test_arc_curve_peaks_mid_flight() {
        assert!(arc_curve(0.0).abs() < 1e-6);
        assert!((arc_curve(0.5) - 1.0).abs() < 1e-6);
        assert!(arc_curve(1.0).abs() < 1e-5);
    }

    #[test]
    fn test_scale_curve_shrinks_monotonically() {
        assert_eq!(pickup_scale_curve(0.0), 1.0);
        let mut previous = 1.0;
        for step in 1..=10 {
            let scale = pickup_scale_curve(step as f32 / 10.0);
            assert!(scale < previous);
            previous = scale;
        }
        assert!((pickup_scale_curve(1.0) - 0.25).abs() < 1e-6);
    }
}
