//! Задержка дыхания: stamina-гейт на устойчивый прицел.
//!
//! Старт только безоружным и только из Unoccupied, при ненулевой
//! stamina. Занимает ОБЕ оси состояния: WieldedWeapon::HoldingBreath
//! (руки заняты) + CombatState::HoldingBreath (timed-действие).
//! Финиш идемпотентен: release и форс от исчерпания stamina могут
//! прийти на одном тике — второй молча пропускается.

use bevy::prelude::*;

use crate::combat::events::{HoldBreathFinishRequested, HoldBreathInput};
use crate::combat::state::{CombatState, StateGeneration, WieldedWeapon};
use crate::components::{Character, Stamina};
use crate::feedback::{PlaySoundCue, SoundCue};

/// System: кнопка задержки дыхания.
///
/// Нажатие — попытка старта, отпускание — запрос финиша.
pub fn process_hold_breath_input(
    mut inputs: EventReader<HoldBreathInput>,
    mut characters: Query<
        (
            &mut CombatState,
            &mut StateGeneration,
            &mut WieldedWeapon,
            &Stamina,
        ),
        With<Character>,
    >,
    mut finish_requests: EventWriter<HoldBreathFinishRequested>,
    mut sounds: EventWriter<PlaySoundCue>,
) {
    for input in inputs.read() {
        if !input.pressed {
            finish_requests.write(HoldBreathFinishRequested {
                entity: input.entity,
                forced: false,
            });
            continue;
        }

        let Ok((mut state, mut generation, mut wielded, stamina)) =
            characters.get_mut(input.entity)
        else {
            continue;
        };

        // Старт: Unoccupied + Unarmed + осталось дыхание
        if *state != CombatState::Unoccupied
            || *wielded != WieldedWeapon::Unarmed
            || !stamina.has_breath()
        {
            continue;
        }

        *state = CombatState::HoldingBreath;
        *wielded = WieldedWeapon::HoldingBreath;
        generation.bump();

        sounds.write(PlaySoundCue::new(input.entity, SoundCue::BreathIn));
        crate::log(&format!("🫁 Hold breath started (entity: {:?})", input.entity));
    }
}

/// System: finishHoldBreath() — от release или форс-финиша stamina.
pub fn process_hold_breath_finish(
    mut requests: EventReader<HoldBreathFinishRequested>,
    mut characters: Query<
        (&mut CombatState, &mut StateGeneration, &mut WieldedWeapon),
        With<Character>,
    >,
    mut sounds: EventWriter<PlaySoundCue>,
) {
    for request in requests.read() {
        let Ok((mut state, mut generation, mut wielded)) = characters.get_mut(request.entity)
        else {
            continue;
        };

        // Идемпотентность: второй finish на том же тике — no-op
        if *state != CombatState::HoldingBreath {
            continue;
        }

        *state = CombatState::Unoccupied;
        *wielded = WieldedWeapon::Unarmed;
        generation.bump();

        sounds.write(PlaySoundCue::new(request.entity, SoundCue::BreathOut));
        crate::log(&format!(
            "🫁 Hold breath finished (entity: {:?}, forced: {})",
            request.entity, request.forced
        ));
    }
}
