//! Завершение взмаха ножа (animation callback).
//!
//! Старт живёт в attack-диспетчере (fire.rs): state →
//! SlashTimerInProgress + cue + монтаж. Здесь только обратный путь.

use bevy::prelude::*;

use crate::combat::events::MontageSectionFinished;
use crate::combat::state::{CombatState, StateGeneration};
use crate::components::Character;
use crate::feedback::MontageId;

/// System: slash-секция доиграла → Unoccupied.
pub fn finish_slash(
    mut finished: EventReader<MontageSectionFinished>,
    mut characters: Query<(&mut CombatState, &mut StateGeneration), With<Character>>,
) {
    for event in finished.read() {
        if event.montage != MontageId::KnifeSlash {
            continue;
        }

        let Ok((mut state, mut generation)) = characters.get_mut(event.entity) else {
            continue;
        };

        // Callback пережил сброс состояния → no-op
        if *state != CombatState::SlashTimerInProgress {
            continue;
        }

        *state = CombatState::Unoccupied;
        generation.bump();

        crate::log(&format!("✅ Knife slash finished (entity: {:?})", event.entity));
    }
}
