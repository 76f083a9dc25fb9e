//! Player control marker

use bevy::prelude::*;

/// Маркер: персонаж под контролем игрока.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;
