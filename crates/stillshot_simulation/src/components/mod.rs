//! ECS Components персонажа
//!
//! Организация по доменам:
//! - actor: базовые характеристики (Character, Stamina)
//! - motion: движение глазами симуляции (MotionState, Gait)
//! - aim: прицеливание (AimState, LookRates)
//! - attachment: что сейчас в руке персонажа (Attachment)
//! - player: player control marker (Player)

pub mod actor;
pub mod aim;
pub mod attachment;
pub mod motion;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use aim::*;
pub use attachment::*;
pub use motion::*;
pub use player::*;
