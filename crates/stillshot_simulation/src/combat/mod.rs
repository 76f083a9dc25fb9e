//! Combat state machine module.
//!
//! ECS ответственность:
//! - Game state: CombatState, WieldedWeapon, Arsenal, AmmoReserve, Stamina
//! - Combat rules: fire lockout, reload transfer, hold-breath gate
//! - Events: PlaySoundCue, PlayMontage, SpawnEffect (ECS → Engine)
//!
//! Engine ответственность:
//! - Animation montages (и MontageSectionFinished по окончании секций)
//! - Line traces (RayProbeSource port)
//! - Звук, партиклы, attachment-визуал

use bevy::prelude::*;

pub mod equip;
pub mod events;
pub mod fire;
pub mod hold_breath;
pub mod reload;
pub mod slash;
pub mod stamina;
pub mod state;
pub mod weapon;

// Re-export основных типов
pub use events::{
    AimInput, AttackInput, EquipIntent, EquipKind, HoldBreathInput, InteractInput,
    MontageSectionFinished, ReloadInput, RunInput,
};
pub use state::{Arsenal, CombatState, ScheduledAction, StateGeneration, TriggerHeld, WieldedWeapon};
pub use weapon::{AmmoKind, AmmoReserve, GunKind, GunStats};

use crate::components::{aim, motion};
use crate::crosshair;
use crate::feedback::{PlayMontage, PlaySoundCue, SpawnEffect};
use crate::SimSet;

/// Combat Plugin.
///
/// Регистрирует combat системы в FixedUpdate (60Hz), строго
/// последовательно:
///
/// 1. Input intents — equip, attack press/release, reload, aim, run,
///    hold breath (события, накопившиеся между тиками)
/// 2. Animation callbacks — finish_reloading / finish_slash
/// 3. Timed actions — tick_scheduled_actions (fire lockout,
///    auto-fire / auto-reload)
/// 4. Action dispatch — attack() / reloadWeapon()
/// 5. Stamina — drain/regen + форс-финиш задержки дыхания
/// 6. Derived state — FOV zoom, look rates, crosshair spread
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<events::EquipIntent>()
            .add_event::<events::AttackInput>()
            .add_event::<events::ReloadInput>()
            .add_event::<events::AimInput>()
            .add_event::<events::RunInput>()
            .add_event::<events::HoldBreathInput>()
            .add_event::<events::InteractInput>()
            .add_event::<events::MontageSectionFinished>()
            .add_event::<events::AttackRequested>()
            .add_event::<events::ReloadRequested>()
            .add_event::<events::ShotFired>()
            .add_event::<events::HoldBreathFinishRequested>()
            .add_event::<PlaySoundCue>()
            .add_event::<PlayMontage>()
            .add_event::<SpawnEffect>();

        // Регистрация систем в FixedUpdate
        app.add_systems(
            FixedUpdate,
            (
                // Фаза 1: Input intents
                equip::process_equip_intents,
                fire::process_attack_input,
                reload::process_reload_input,
                aim::process_aim_input,
                motion::process_run_input,
                hold_breath::process_hold_breath_input,

                // Фаза 2: Animation-completion callbacks
                reload::finish_reloading,
                slash::finish_slash,

                // Фаза 3: Timed actions (fire lockout → auto fire/reload)
                fire::tick_scheduled_actions,

                // Фаза 4: Action dispatch
                fire::process_attack_requests,
                reload::process_reload_requests,

                // Фаза 5: Stamina (может форсировать финиш задержки дыхания)
                stamina::regulate_stamina,
                hold_breath::process_hold_breath_finish,

                // Фаза 6: Derived state
                aim::camera_interp_zoom,
                aim::set_look_rates,
                crosshair::update_crosshair_spread,
            )
                .chain() // Последовательное выполнение
                .in_set(SimSet::Combat),
        );
    }
}
