//! STILLSHOT Simulation Core
//!
//! ECS-симуляция first-person персонажа (strategic layer):
//! combat state machine, ammo ledger, stamina, item pickup, crosshair.
//!
//! HYBRID ARCHITECTURE:
//! - ECS = strategic layer (game state, combat rules, timed actions)
//! - Engine = tactical layer (рендер, физика, анимация, звук);
//!   общение через inbound/outbound события, RayProbe port и
//!   engine-facing компоненты (Attachment, ItemPresentation, Gait)

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod crosshair;
pub mod feedback;
pub mod items;
pub mod logger;
pub mod probe;

// Re-export базовых типов для удобства
pub use combat::{
    AimInput, AmmoKind, AmmoReserve, Arsenal, AttackInput, CombatPlugin, CombatState, EquipIntent,
    EquipKind, GunKind, GunStats, HoldBreathInput, InteractInput, MontageSectionFinished,
    ReloadInput, RunInput, StateGeneration, TriggerHeld, WieldedWeapon,
};
pub use components::*;
pub use crosshair::CrosshairSpread;
pub use feedback::{EffectKind, MontageId, PlayMontage, PlaySoundCue, SoundCue, SpawnEffect};
pub use items::{
    ItemCatalog, ItemCategory, ItemLanded, ItemPlugin, ItemState, PickupZoneOverlap, WorldItem,
};
pub use logger::{
    init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use probe::{CameraRig, NullProbe, RayHit, RayProbe, RayProbeSource};

/// Порядок подсистем внутри одного симуляционного тика.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Input + state machine + stamina + derived state
    Combat,
    /// Targeting проба + item lifecycle
    Items,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Fixed timestep 60Hz для simulation tick (легче считать интервалы)
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        // Детерминистичный RNG (seed по умолчанию, если не задан)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
        // Headless-запуски живут с пустым ray probe, движок подставляет свой
        if !app.world().contains_resource::<RayProbeSource>() {
            app.insert_resource(RayProbeSource(Box::new(NullProbe)));
        }

        app.configure_sets(FixedUpdate, (SimSet::Combat, SimSet::Items).chain());

        // Подсистемы (ECS strategic layer)
        app.add_plugins((CombatPlugin, ItemPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
/// (Debug-форматирование, сортировка по Entity ID)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
