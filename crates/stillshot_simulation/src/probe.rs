//! Ray probe port + camera rig.
//!
//! Architecture:
//! - ECS: strategic decisions (что трейсить, что делать с результатом)
//! - Engine: tactical execution (физический line trace)
//!
//! Движок отдаёт трейс синхронно через boxed trait object — тот же
//! приём, что и у LogPrinter в logger/. Headless-запуски получают
//! NullProbe (пустой мир, ни один луч ничего не задевает), тесты
//! подставляют фейковые пробы.

use bevy::prelude::*;

/// Результат одного line trace.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// Entity, в которую упёрся луч (None = задели геометрию без entity)
    pub entity: Option<Entity>,
    /// Точка попадания (world space)
    pub point: Vec3,
}

/// Capability: "trace a ray and return the first blocking hit".
pub trait RayProbe: Send + Sync {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

/// Resource-обёртка над движковым trace.
#[derive(Resource)]
pub struct RayProbeSource(pub Box<dyn RayProbe>);

impl RayProbeSource {
    pub fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.0.cast_ray(origin, direction, max_distance)
    }
}

/// Probe для headless-запусков: мир пуст, лучи уходят в никуда.
pub struct NullProbe;

impl RayProbe for NullProbe {
    fn cast_ray(&self, _origin: Vec3, _direction: Vec3, _max_distance: f32) -> Option<RayHit> {
        None
    }
}

/// Камера персонажа глазами симуляции.
///
/// Движок перезаписывает каждый кадр (camera transform принадлежит
/// tactical layer). Симуляция читает: crosshair trace, muzzle trace,
/// целевая точка pickup-интерполяции.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Положение камеры (world space)
    pub location: Vec3,
    /// Forward-вектор камеры (unit)
    pub forward: Vec3,
    /// Yaw камеры (градусы) — для yaw offset у pickup-интерполяции
    pub yaw: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            location: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            yaw: 0.0,
        }
    }
}

impl CameraRig {
    /// Distance outward from camera for the pickup interp destination
    pub const INTERP_DISTANCE: f32 = 250.0;
    /// Distance upward from camera for the pickup interp destination
    pub const INTERP_ELEVATION: f32 = 65.0;

    /// Целевая точка pickup-интерполяции: перед камерой и чуть выше.
    pub fn interp_target(&self) -> Vec3 {
        self.location + self.forward * Self::INTERP_DISTANCE + Vec3::Y * Self::INTERP_ELEVATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_probe_never_hits() {
        let probe = NullProbe;
        assert!(probe.cast_ray(Vec3::ZERO, Vec3::NEG_Z, 50_000.0).is_none());
    }

    #[test]
    fn test_interp_target_offsets() {
        let rig = CameraRig {
            location: Vec3::new(10.0, 0.0, 0.0),
            forward: Vec3::X,
            yaw: 0.0,
        };
        let target = rig.interp_target();
        assert_eq!(target, Vec3::new(260.0, 65.0, 0.0));
    }
}
