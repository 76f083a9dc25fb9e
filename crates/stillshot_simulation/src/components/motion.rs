//! Движение глазами симуляции.
//!
//! Character movement принадлежит движку; симуляция видит только
//! сэмпл (скорость, в воздухе ли) и отдаёт движку целевую
//! max walk speed через Gait (движок читает Changed<Gait>).

use bevy::prelude::*;

/// Сэмпл движения персонажа (Engine → ECS, перезаписывается каждый кадр).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct MotionState {
    /// Горизонтальная скорость (units/sec, без вертикальной составляющей)
    pub horizontal_speed: f32,
    /// Персонаж в воздухе (прыжок/падение)
    pub airborne: bool,
}

/// Целевая скорость ходьбы (ECS → Engine).
///
/// Бег блокируется, пока в руках пистолет.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Gait {
    pub running: bool,
    pub max_walk_speed: f32,
}

impl Gait {
    pub const WALK_SPEED: f32 = 500.0;
    pub const RUN_SPEED: f32 = 750.0;
}

impl Default for Gait {
    fn default() -> Self {
        Self {
            running: false,
            max_walk_speed: Self::WALK_SPEED,
        }
    }
}

/// System: кнопка бега.
///
/// Разгон только если в руках НЕ пистолет (проверка на момент нажатия);
/// отпускание всегда возвращает walk speed.
pub fn process_run_input(
    mut inputs: EventReader<crate::combat::events::RunInput>,
    mut characters: Query<(&mut Gait, &crate::combat::state::WieldedWeapon)>,
) {
    use crate::combat::state::WieldedWeapon;

    for input in inputs.read() {
        let Ok((mut gait, wielded)) = characters.get_mut(input.entity) else {
            continue;
        };

        if input.running {
            gait.running = true;
            if *wielded != WieldedWeapon::Gun {
                gait.max_walk_speed = Gait::RUN_SPEED;
            }
        } else {
            gait.running = false;
            gait.max_walk_speed = Gait::WALK_SPEED;
        }
    }
}
