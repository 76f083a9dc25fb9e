//! Базовые компоненты персонажа: Character, Stamina

use bevy::prelude::*;

use crate::combat::state::{Arsenal, CombatState, StateGeneration, TriggerHeld, WieldedWeapon};
use crate::combat::weapon::AmmoReserve;
use crate::crosshair::CrosshairSpread;
use crate::items::targeting::ItemTargeting;
use crate::probe::CameraRig;

use super::aim::{AimState, LookRates};
use super::motion::{Gait, MotionState};

/// Персонаж от первого лица — корневой компонент.
///
/// Required Components собирают весь gameplay-стек: combat state machine,
/// ammo ledger, stamina, crosshair, targeting и engine-facing записи.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    CombatState,
    WieldedWeapon,
    StateGeneration,
    TriggerHeld,
    Arsenal,
    AmmoReserve,
    Stamina,
    CrosshairSpread,
    ItemTargeting,
    MotionState,
    Gait,
    AimState,
    LookRates,
    CameraRig
)]
pub struct Character;

/// Выносливость, расходуемая задержкой дыхания.
///
/// Инвариант: 0.0 ≤ current ≤ max.
/// Drain при HoldingBreath, regen во всех остальных состояниях,
/// обе скорости — units per second.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    pub current: f32,
    pub max: f32,
    pub drain_rate: f32,
    pub regen_rate: f32,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl Stamina {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            drain_rate: 1.0,
            regen_rate: 1.0,
        }
    }

    /// Осталась ли выносливость (гейт на старт задержки дыхания)
    pub fn has_breath(&self) -> bool {
        self.current > 0.0
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0.0
    }

    pub fn drain(&mut self, delta_time: f32) {
        self.current = (self.current - self.drain_rate * delta_time).max(0.0);
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        self.current = (self.current + self.regen_rate * delta_time).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stamina_drain_clamps_at_zero() {
        let mut stamina = Stamina::new(10.0);

        stamina.drain(4.0);
        assert_eq!(stamina.current, 6.0);
        assert!(stamina.has_breath());

        stamina.drain(100.0);
        assert_eq!(stamina.current, 0.0);
        assert!(stamina.is_depleted());
    }

    #[test]
    fn test_stamina_regen_clamps_at_max() {
        let mut stamina = Stamina::new(10.0);
        stamina.drain(7.0);

        stamina.regenerate(2.0);
        assert_eq!(stamina.current, 5.0);

        stamina.regenerate(100.0);
        assert_eq!(stamina.current, 10.0);
    }
}
