//! Combat events: входящие input-интенты и внутренние запросы.
//!
//! # Architecture
//!
//! **Inbound (Engine/Input → ECS):**
//! - `EquipIntent` — toggle оружия по хоткею
//! - `AttackInput` — нажатие/отпускание кнопки атаки
//! - `ReloadInput` — кнопка R
//! - `AimInput`, `RunInput`, `HoldBreathInput` — удерживаемые кнопки
//! - `MontageSectionFinished` — animation-completion сигнал движка
//!
//! **Internal (ECS → ECS, внутри одного тика):**
//! - `AttackRequested` — от нажатия ИЛИ от auto-fire reset
//! - `ReloadRequested` — от кнопки ИЛИ от автоперезарядки
//! - `ShotFired` — пульс для crosshair shooting factor
//! - `HoldBreathFinishRequested` — от release ИЛИ от исчерпания stamina

use bevy::prelude::*;

use crate::feedback::MontageId;

/// Какое оружие просит игрок (хоткеи 1/2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipKind {
    Knife,
    Gun,
}

/// Event: toggle между Unarmed и запрошенным kind.
#[derive(Event, Debug, Clone)]
pub struct EquipIntent {
    pub entity: Entity,
    pub kind: EquipKind,
}

/// Event: кнопка атаки нажата/отпущена.
#[derive(Event, Debug, Clone)]
pub struct AttackInput {
    pub entity: Entity,
    pub pressed: bool,
}

/// Event: кнопка перезарядки.
#[derive(Event, Debug, Clone)]
pub struct ReloadInput {
    pub entity: Entity,
}

/// Event: кнопка прицеливания (RMB) нажата/отпущена.
#[derive(Event, Debug, Clone)]
pub struct AimInput {
    pub entity: Entity,
    pub aiming: bool,
}

/// Event: кнопка бега нажата/отпущена.
#[derive(Event, Debug, Clone)]
pub struct RunInput {
    pub entity: Entity,
    pub running: bool,
}

/// Event: кнопка задержки дыхания нажата/отпущена.
#[derive(Event, Debug, Clone)]
pub struct HoldBreathInput {
    pub entity: Entity,
    pub pressed: bool,
}

/// Event: кнопка взаимодействия (E).
#[derive(Event, Debug, Clone)]
pub struct InteractInput {
    pub entity: Entity,
}

/// Event: движок сообщает, что именованная секция монтажа доиграла.
///
/// Push-callback, не poll: перезарядка и slash завершаются только им.
#[derive(Event, Debug, Clone)]
pub struct MontageSectionFinished {
    pub entity: Entity,
    pub montage: MontageId,
}

/// Internal: выполнить attack() на этом тике.
#[derive(Event, Debug, Clone)]
pub struct AttackRequested {
    pub entity: Entity,
}

/// Internal: выполнить reloadWeapon() на этом тике.
#[derive(Event, Debug, Clone)]
pub struct ReloadRequested {
    pub entity: Entity,
}

/// Internal: выстрел состоялся (питает crosshair shooting factor).
#[derive(Event, Debug, Clone)]
pub struct ShotFired {
    pub entity: Entity,
}

/// Internal: завершить задержку дыхания (идемпотентно).
#[derive(Event, Debug, Clone)]
pub struct HoldBreathFinishRequested {
    pub entity: Entity,
    /// true = форсировано исчерпанием stamina
    pub forced: bool,
}
