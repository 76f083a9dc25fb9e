//! Stamina regulator.
//!
//! Каждый тик: drain при HoldingBreath, иначе regen, с clamp в
//! [0, max]. Ноль во время задержки дыхания форсирует финиш — ровно
//! один запрос, дальше идемпотентность finish-системы.

use bevy::prelude::*;

use crate::combat::events::HoldBreathFinishRequested;
use crate::combat::state::CombatState;
use crate::components::{Character, Stamina};

/// System: тик stamina (работает в FixedUpdate для детерминизма).
pub fn regulate_stamina(
    mut characters: Query<(Entity, &CombatState, &mut Stamina), With<Character>>,
    time: Res<Time<Fixed>>,
    mut finish_requests: EventWriter<HoldBreathFinishRequested>,
) {
    let delta = time.delta_secs();

    for (entity, state, mut stamina) in characters.iter_mut() {
        if *state == CombatState::HoldingBreath {
            stamina.drain(delta);
            if stamina.is_depleted() {
                finish_requests.write(HoldBreathFinishRequested {
                    entity,
                    forced: true,
                });
            }
        } else {
            stamina.regenerate(delta);
        }
    }
}
