//! Headless симуляция STILLSHOT
//!
//! Запускает Bevy App без рендера для smoke-проверки и детерминизма

use bevy::prelude::*;
use stillshot_simulation::items::catalog::spawn_world_item;
use stillshot_simulation::{
    create_headless_app, Character, ItemCatalog, Player, SimulationPlugin,
};

fn main() {
    let seed = 42;
    println!("Starting STILLSHOT headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    // Персонаж + предметы на полу
    app.world_mut().spawn((Character, Player));
    let catalog = app.world().resource::<ItemCatalog>().clone();
    let mut commands = app.world_mut().commands();
    spawn_world_item(
        &mut commands,
        &catalog,
        "pistol_basic",
        Transform::from_xyz(120.0, 0.0, 0.0),
    );
    spawn_world_item(
        &mut commands,
        &catalog,
        "combat_knife",
        Transform::from_xyz(-90.0, 0.0, 40.0),
    );

    // Запускаем 1000 тиков симуляции
    for tick in 0..1000 {
        app.update();

        if tick % 100 == 0 {
            let entity_count = app.world().entities().len();
            println!("Tick {}: {} entities", tick, entity_count);
        }
    }

    println!("Simulation complete!");
}
