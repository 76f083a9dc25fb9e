//! Прицеливание: aim flag, FOV zoom, look rates.
//!
//! Камерой владеет движок — симуляция лишь считает целевые значения
//! (текущий FOV, чувствительность взгляда) и выкладывает их в
//! engine-facing компоненты. Сам aim flag питает crosshair model.

use bevy::prelude::*;

use crate::crosshair::finterp_to;

/// Состояние прицеливания (RMB held).
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct AimState {
    /// True пока зажата кнопка прицеливания
    pub aiming: bool,
    /// FOV текущего кадра (движок применяет к камере)
    pub current_fov: f32,
}

impl AimState {
    pub const DEFAULT_FOV: f32 = 100.0;
    pub const ZOOMED_FOV: f32 = 35.0;
    pub const ZOOM_INTERP_SPEED: f32 = 35.0;
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            aiming: false,
            current_fov: Self::DEFAULT_FOV,
        }
    }
}

/// Чувствительность взгляда (ECS → Engine).
///
/// Прицеливание замедляет и turn rate геймпада, и mouse scale.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct LookRates {
    /// deg/sec для аналоговых осей
    pub turn_rate: f32,
    pub look_up_rate: f32,
    /// Множители для мыши (absolute delta)
    pub mouse_turn_scale: f32,
    pub mouse_look_up_scale: f32,
}

impl LookRates {
    pub const HIP_RATE: f32 = 45.0;
    pub const AIMING_RATE: f32 = 15.0;
    pub const MOUSE_HIP_SCALE: f32 = 1.0;
    pub const MOUSE_AIMING_SCALE: f32 = 0.2;
}

impl Default for LookRates {
    fn default() -> Self {
        Self {
            turn_rate: Self::HIP_RATE,
            look_up_rate: Self::HIP_RATE,
            mouse_turn_scale: Self::MOUSE_HIP_SCALE,
            mouse_look_up_scale: Self::MOUSE_HIP_SCALE,
        }
    }
}

/// System: кнопка прицеливания → aim flag.
pub fn process_aim_input(
    mut inputs: EventReader<crate::combat::events::AimInput>,
    mut query: Query<&mut AimState>,
) {
    for input in inputs.read() {
        if let Ok(mut aim) = query.get_mut(input.entity) {
            aim.aiming = input.aiming;
        }
    }
}

/// System: интерполяция FOV к zoomed/default в зависимости от aim flag.
pub fn camera_interp_zoom(mut query: Query<&mut AimState>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut aim in query.iter_mut() {
        let target = if aim.aiming {
            AimState::ZOOMED_FOV
        } else {
            AimState::DEFAULT_FOV
        };
        aim.current_fov = finterp_to(aim.current_fov, target, delta, AimState::ZOOM_INTERP_SPEED);
    }
}

/// System: выбор чувствительности взгляда по aim flag.
pub fn set_look_rates(mut query: Query<(&AimState, &mut LookRates)>) {
    for (aim, mut rates) in query.iter_mut() {
        if aim.aiming {
            rates.turn_rate = LookRates::AIMING_RATE;
            rates.look_up_rate = LookRates::AIMING_RATE;
            rates.mouse_turn_scale = LookRates::MOUSE_AIMING_SCALE;
            rates.mouse_look_up_scale = LookRates::MOUSE_AIMING_SCALE;
        } else {
            rates.turn_rate = LookRates::HIP_RATE;
            rates.look_up_rate = LookRates::HIP_RATE;
            rates.mouse_turn_scale = LookRates::MOUSE_HIP_SCALE;
            rates.mouse_look_up_scale = LookRates::MOUSE_HIP_SCALE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fov_interp_converges_to_zoomed() {
        let mut fov = AimState::DEFAULT_FOV;
        for _ in 0..120 {
            fov = finterp_to(fov, AimState::ZOOMED_FOV, 1.0 / 60.0, AimState::ZOOM_INTERP_SPEED);
        }
        assert!((fov - AimState::ZOOMED_FOV).abs() < 0.5);
    }
}
