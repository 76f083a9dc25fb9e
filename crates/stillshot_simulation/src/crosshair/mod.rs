//! Crosshair spread model.
//!
//! Чисто производное состояние: каждый тик четыре независимо
//! сглаженных фактора (скорость, воздух, прицел, выстрел) сводятся в
//! один spread-скаляр. HUD читает готовое число; модель комбат-стейт
//! не трогает (read-only consumer) и пересчитывается независимо от
//! того, отрисовывается ли прицел.

use bevy::prelude::*;

use crate::combat::events::ShotFired;
use crate::components::{AimState, Character, MotionState};

/// Exponential interp к цели с постоянной скоростью (FInterpTo).
///
/// За один шаг проходит долю dt*speed оставшегося расстояния,
/// clamped — никогда не перелетает цель.
pub fn finterp_to(current: f32, target: f32, delta_time: f32, speed: f32) -> f32 {
    if speed <= 0.0 {
        return target;
    }
    let step = (delta_time * speed).min(1.0);
    current + (target - current) * step
}

/// Линейное отображение скорости в [0, 1] с clamp по краям.
fn map_speed_to_factor(speed: f32) -> f32 {
    (speed / CrosshairSpread::WALK_SPEED_RANGE_MAX).clamp(0.0, 1.0)
}

/// Производный spread прицела и его четыре фактора.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct CrosshairSpread {
    pub velocity_factor: f32,
    pub in_air_factor: f32,
    pub aim_factor: f32,
    pub shooting_factor: f32,
    /// Итог: 0.5 + velocity + in_air − aim + shooting
    pub spread: f32,
    /// Остаток пульса после выстрела (секунды)
    pulse_remaining: f32,
}

impl Default for CrosshairSpread {
    fn default() -> Self {
        Self {
            velocity_factor: 0.0,
            in_air_factor: 0.0,
            aim_factor: 0.0,
            shooting_factor: 0.0,
            spread: Self::BASE_SPREAD,
            pulse_remaining: 0.0,
        }
    }
}

impl CrosshairSpread {
    pub const BASE_SPREAD: f32 = 0.5;

    /// Скорость, при которой velocity factor достигает 1.0
    pub const WALK_SPEED_RANGE_MAX: f32 = 600.0;

    pub const IN_AIR_TARGET: f32 = 2.25;
    pub const AIM_TARGET: f32 = 0.6;
    pub const SHOOTING_TARGET: f32 = 0.3;

    /// Длительность пульса после выстрела
    pub const SHOOT_PULSE_DURATION: f32 = 0.05;

    // Скорости интерполяции факторов (в воздух медленно, из воздуха быстро)
    const VELOCITY_INTERP_SPEED: f32 = 10.0;
    const IN_AIR_RISE_SPEED: f32 = 2.25;
    const IN_AIR_FALL_SPEED: f32 = 30.0;
    const AIM_INTERP_SPEED: f32 = 30.0;
    const SHOOTING_INTERP_SPEED: f32 = 60.0;

    fn is_shot_pulse_active(&self) -> bool {
        self.pulse_remaining > 0.0
    }
}

/// System: пересчёт spread. Каждый тик, независимо от HUD.
pub fn update_crosshair_spread(
    mut characters: Query<(Entity, &mut CrosshairSpread, &MotionState, &AimState), With<Character>>,
    mut shots: EventReader<ShotFired>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();
    let shooters: Vec<Entity> = shots.read().map(|shot| shot.entity).collect();

    for (entity, mut crosshair, motion, aim) in characters.iter_mut() {
        if shooters.contains(&entity) {
            crosshair.pulse_remaining = CrosshairSpread::SHOOT_PULSE_DURATION;
        } else {
            crosshair.pulse_remaining = (crosshair.pulse_remaining - delta).max(0.0);
        }

        // Velocity: цель — линейная карта горизонтальной скорости
        let velocity_target = map_speed_to_factor(motion.horizontal_speed);
        crosshair.velocity_factor = finterp_to(
            crosshair.velocity_factor,
            velocity_target,
            delta,
            CrosshairSpread::VELOCITY_INTERP_SPEED,
        );

        // In air: расползается медленно, собирается быстро
        let (air_target, air_speed) = if motion.airborne {
            (
                CrosshairSpread::IN_AIR_TARGET,
                CrosshairSpread::IN_AIR_RISE_SPEED,
            )
        } else {
            (0.0, CrosshairSpread::IN_AIR_FALL_SPEED)
        };
        crosshair.in_air_factor =
            finterp_to(crosshair.in_air_factor, air_target, delta, air_speed);

        // Aim: сужение при прицеливании
        let aim_target = if aim.aiming {
            CrosshairSpread::AIM_TARGET
        } else {
            0.0
        };
        crosshair.aim_factor = finterp_to(
            crosshair.aim_factor,
            aim_target,
            delta,
            CrosshairSpread::AIM_INTERP_SPEED,
        );

        // Shooting: короткий пульс после каждого выстрела
        let shooting_target = if crosshair.is_shot_pulse_active() {
            CrosshairSpread::SHOOTING_TARGET
        } else {
            0.0
        };
        crosshair.shooting_factor = finterp_to(
            crosshair.shooting_factor,
            shooting_target,
            delta,
            CrosshairSpread::SHOOTING_INTERP_SPEED,
        );

        crosshair.spread = CrosshairSpread::BASE_SPREAD + crosshair.velocity_factor
            + crosshair.in_air_factor
            - crosshair.aim_factor
            + crosshair.shooting_factor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finterp_to_converges_without_overshoot() {
        let mut value = 0.0;
        for _ in 0..300 {
            value = finterp_to(value, 1.0, 1.0 / 60.0, 10.0);
            assert!(value <= 1.0);
        }
        assert!((value - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_finterp_to_big_step_clamps_at_target() {
        // dt*speed > 1 не должен перелетать
        let value = finterp_to(0.0, 2.0, 1.0, 30.0);
        assert_eq!(value, 2.0);
    }

    #[test]
    fn test_map_speed_clamps() {
        assert_eq!(map_speed_to_factor(0.0), 0.0);
        assert_eq!(map_speed_to_factor(300.0), 0.5);
        assert_eq!(map_speed_to_factor(600.0), 1.0);
        assert_eq!(map_speed_to_factor(5000.0), 1.0);
    }

    #[test]
    fn test_default_spread_is_base() {
        let crosshair = CrosshairSpread::default();
        assert_eq!(crosshair.spread, CrosshairSpread::BASE_SPREAD);
    }
}
