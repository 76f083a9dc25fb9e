//! Combat state machine core: состояния, generation counter, отложенные действия.
//!
//! Две оси состояния, намеренно раздельные:
//! - `WieldedWeapon` — ЧТО в руках (unarmed/knife/gun/holding breath)
//! - `CombatState` — КАКОЕ timed-действие в полёте (fire lockout,
//!   reload, slash, hold breath)
//!
//! Новое действие стартует только из `Unoccupied`. Каждое
//! не-Unoccupied состояние имеет ровно один путь назад: таймер,
//! animation callback или исчерпание stamina.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Текущее timed-действие. Mutually exclusive.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum CombatState {
    #[default]
    Unoccupied,
    /// Между выстрелами (fire lockout timer)
    FireTimerInProgress,
    /// Перезарядка, завершается animation callback-ом
    Reloading,
    /// Взмах ножа, завершается animation callback-ом
    SlashTimerInProgress,
    /// Задержка дыхания, завершается release-ом или исчерпанием stamina
    HoldingBreath,
}

/// Что сейчас в руках.
#[derive(
    Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect, Serialize, Deserialize,
)]
#[reflect(Component)]
pub enum WieldedWeapon {
    #[default]
    Unarmed,
    Knife,
    Gun,
    HoldingBreath,
}

impl WieldedWeapon {
    /// Можно ли атаковать из этого режима
    pub fn is_armed(&self) -> bool {
        matches!(self, WieldedWeapon::Knife | WieldedWeapon::Gun)
    }
}

/// Generation counter переходов state machine.
///
/// Инкрементируется на КАЖДОМ переходе CombatState. Отложенный callback
/// запоминает generation на момент планирования; если к моменту
/// срабатывания счётчик ушёл вперёд — callback устарел и молча
/// пропускает себя (reentrancy guard).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct StateGeneration(pub u32);

impl StateGeneration {
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Отложенное действие state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DeferredAction {
    /// Конец fire lockout: вернуться в Unoccupied, возможно
    /// выстрелить снова или уйти в автоперезарядку
    AutoFireReset,
}

/// Запланированный callback `{remaining, action, generation}`.
///
/// Одно на персонажа: timed-действия взаимоисключающие. Тикается в
/// FixedUpdate; по истечении сверяет generation с текущим.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct ScheduledAction {
    /// Секунд до срабатывания
    pub remaining: f32,
    pub action: DeferredAction,
    /// StateGeneration на момент планирования
    pub generation: u32,
}

impl ScheduledAction {
    pub fn new(delay: f32, action: DeferredAction, generation: StateGeneration) -> Self {
        Self {
            remaining: delay,
            action,
            generation: generation.0,
        }
    }

    pub fn is_stale(&self, current: StateGeneration) -> bool {
        self.generation != current.0
    }
}

/// Слабые ссылки на подобранное оружие.
///
/// Владелец entity — мир (spawn system), не персонаж: каждый доступ
/// идёт через query get и молча деградирует, если entity исчезла.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Arsenal {
    pub gun: Option<Entity>,
    pub knife: Option<Entity>,
}

impl Arsenal {
    /// Kind-specific view поверх единственного wielded-слота
    pub fn entity_for(&self, wielded: WieldedWeapon) -> Option<Entity> {
        match wielded {
            WieldedWeapon::Gun => self.gun,
            WieldedWeapon::Knife => self.knife,
            WieldedWeapon::Unarmed | WieldedWeapon::HoldingBreath => None,
        }
    }
}

/// Зажата ли кнопка атаки (press-to-trigger + auto-repeat через таймер).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TriggerHeld(pub bool);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_staleness() {
        let mut generation = StateGeneration::default();
        let scheduled = ScheduledAction::new(0.5, DeferredAction::AutoFireReset, generation);

        assert!(!scheduled.is_stale(generation));

        generation.bump();
        assert!(scheduled.is_stale(generation));
    }

    #[test]
    fn test_arsenal_kind_views() {
        let gun = Entity::from_raw(7);
        let arsenal = Arsenal {
            gun: Some(gun),
            knife: None,
        };

        assert_eq!(arsenal.entity_for(WieldedWeapon::Gun), Some(gun));
        assert_eq!(arsenal.entity_for(WieldedWeapon::Knife), None);
        assert_eq!(arsenal.entity_for(WieldedWeapon::Unarmed), None);
        assert_eq!(arsenal.entity_for(WieldedWeapon::HoldingBreath), None);
    }

    #[test]
    fn test_is_armed() {
        assert!(WieldedWeapon::Knife.is_armed());
        assert!(WieldedWeapon::Gun.is_armed());
        assert!(!WieldedWeapon::Unarmed.is_armed());
        assert!(!WieldedWeapon::HoldingBreath.is_armed());
    }
}
