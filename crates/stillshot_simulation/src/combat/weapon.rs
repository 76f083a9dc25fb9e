//! Weapon data: GunStats component + AmmoReserve ledger.
//!
//! Architecture:
//! - ECS хранит: ammo state, capacity, fire interval (game state)
//! - Движок исполняет: muzzle flash, трассер, анимацию
//! - Нож stats не имеет — это category tag на world item

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Тип патронов.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
pub enum AmmoKind {
    Pistol,
    AssaultRifle,
}

/// Тип пистолета.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Serialize, Deserialize)]
pub enum GunKind {
    Pistol,
    AssaultRifle,
}

/// Gun state component (на world item entity).
///
/// Инвариант: ammo ≤ magazine_capacity. Нарушение — ошибка контракта,
/// ловится debug_assert в reload_ammo.
#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct GunStats {
    pub gun_kind: GunKind,
    pub ammo_kind: AmmoKind,
    /// Патронов в магазине сейчас
    pub ammo: u32,
    pub magazine_capacity: u32,
    /// Секция reload-монтажа для этого оружия
    pub reload_section: String,
    /// Fire lockout между выстрелами (секунды)
    pub fire_interval: f32,
}

impl Default for GunStats {
    fn default() -> Self {
        Self::pistol()
    }
}

impl GunStats {
    /// Пистолет: 13/13, semi-auto темп
    pub fn pistol() -> Self {
        Self {
            gun_kind: GunKind::Pistol,
            ammo_kind: AmmoKind::Pistol,
            ammo: 13,
            magazine_capacity: 13,
            reload_section: "StartReload".to_string(),
            fire_interval: 0.5,
        }
    }

    /// Автомат: 30/30, автоматический темп
    pub fn assault_rifle() -> Self {
        Self {
            gun_kind: GunKind::AssaultRifle,
            ammo_kind: AmmoKind::AssaultRifle,
            ammo: 30,
            magazine_capacity: 30,
            reload_section: "StartReloadAR".to_string(),
            fire_interval: 0.1,
        }
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn magazine_is_full(&self) -> bool {
        self.ammo >= self.magazine_capacity
    }

    /// Сколько патронов поместится при перезарядке
    pub fn magazine_empty_space(&self) -> u32 {
        self.magazine_capacity - self.ammo
    }

    /// -1 патрон, floor на нуле.
    pub fn decrement_ammo(&mut self) {
        self.ammo = self.ammo.saturating_sub(1);
    }

    /// Доложить патроны из резерва. Контракт: не больше свободного места.
    pub fn reload_ammo(&mut self, amount: u32) {
        debug_assert!(
            self.ammo + amount <= self.magazine_capacity,
            "Attempted to reload past magazine capacity ({} + {} > {})",
            self.ammo,
            amount,
            self.magazine_capacity
        );
        self.ammo += amount;
    }
}

/// Носимый запас патронов по типам (ammo ledger).
///
/// Мутируется только завершением перезарядки и подбором ammo-предметов.
/// Создаётся при спавне персонажа со стартовыми значениями, живёт
/// всё время жизни персонажа.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct AmmoReserve {
    carried: HashMap<AmmoKind, u32>,
}

impl Default for AmmoReserve {
    fn default() -> Self {
        let mut carried = HashMap::new();
        carried.insert(AmmoKind::Pistol, Self::STARTING_PISTOL_AMMO);
        carried.insert(AmmoKind::AssaultRifle, Self::STARTING_AR_AMMO);
        Self { carried }
    }
}

impl AmmoReserve {
    pub const STARTING_PISTOL_AMMO: u32 = 85;
    pub const STARTING_AR_AMMO: u32 = 120;

    pub fn empty() -> Self {
        Self {
            carried: HashMap::new(),
        }
    }

    pub fn carried(&self, kind: AmmoKind) -> u32 {
        self.carried.get(&kind).copied().unwrap_or(0)
    }

    pub fn has_ammo(&self, kind: AmmoKind) -> bool {
        self.carried(kind) > 0
    }

    pub fn add(&mut self, kind: AmmoKind, amount: u32) {
        *self.carried.entry(kind).or_insert(0) += amount;
    }

    /// Забрать до `want` патронов; возвращает сколько реально забрали.
    pub fn take(&mut self, kind: AmmoKind, want: u32) -> u32 {
        let slot = self.carried.entry(kind).or_insert(0);
        let taken = (*slot).min(want);
        *slot -= taken;
        taken
    }

    /// Явная установка запаса (тестовые сценарии)
    pub fn set(&mut self, kind: AmmoKind, amount: u32) {
        self.carried.insert(kind, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gun_presets() {
        let pistol = GunStats::pistol();
        assert_eq!(pistol.ammo, 13);
        assert_eq!(pistol.magazine_capacity, 13);
        assert_eq!(pistol.ammo_kind, AmmoKind::Pistol);
        assert!(pistol.magazine_is_full());

        let rifle = GunStats::assault_rifle();
        assert_eq!(rifle.ammo_kind, AmmoKind::AssaultRifle);
        assert!(rifle.fire_interval < pistol.fire_interval);
    }

    #[test]
    fn test_decrement_ammo_floors_at_zero() {
        let mut gun = GunStats::pistol();
        gun.ammo = 1;

        gun.decrement_ammo();
        assert_eq!(gun.ammo, 0);
        assert!(!gun.has_ammo());

        gun.decrement_ammo();
        assert_eq!(gun.ammo, 0);
    }

    #[test]
    fn test_reload_fills_empty_space() {
        let mut gun = GunStats::pistol();
        gun.ammo = 5;
        assert_eq!(gun.magazine_empty_space(), 8);

        gun.reload_ammo(8);
        assert_eq!(gun.ammo, 13);
        assert!(gun.magazine_is_full());
    }

    #[test]
    fn test_reserve_take_clamps() {
        let mut reserve = AmmoReserve::empty();
        reserve.add(AmmoKind::Pistol, 3);

        // Хотим 8, есть 3
        let taken = reserve.take(AmmoKind::Pistol, 8);
        assert_eq!(taken, 3);
        assert_eq!(reserve.carried(AmmoKind::Pistol), 0);

        // Пустой резерв — ничего не отдаёт
        let taken = reserve.take(AmmoKind::Pistol, 8);
        assert_eq!(taken, 0);
    }

    #[test]
    fn test_reserve_starting_values() {
        let reserve = AmmoReserve::default();
        assert_eq!(reserve.carried(AmmoKind::Pistol), 85);
        assert_eq!(reserve.carried(AmmoKind::AssaultRifle), 120);
    }
}
