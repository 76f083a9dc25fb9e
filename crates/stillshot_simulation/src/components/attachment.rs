//! Attachment: что сейчас прикреплено к руке персонажа.
//!
//! Движок слушает Changed<Attachment>: пустой prefab_path = detach.
//! Симуляция владеет решением "что в руке", движок — визуалом.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AttachmentType {
    #[default]
    Weapon,
}

/// Динамический prefab в точке крепления (ECS → Engine).
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Attachment {
    /// Путь к prefab-у визуала ("" = рука пуста)
    pub prefab_path: String,
    /// Имя точки крепления на скелете
    pub attachment_point: String,
    pub attachment_type: AttachmentType,
}

impl Attachment {
    pub const HAND_POINT: &'static str = "%RightHandAttachment";

    pub fn weapon(prefab_path: impl Into<String>) -> Self {
        Self {
            prefab_path: prefab_path.into(),
            attachment_point: Self::HAND_POINT.to_string(),
            attachment_type: AttachmentType::Weapon,
        }
    }
}
