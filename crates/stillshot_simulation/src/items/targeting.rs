//! Targeting probe: что за предмет под прицелом.
//!
//! Overlap counter ведут события pickup-зон предметов; пока он
//! ненулевой — каждый тик луч из центра экрана. Попали в предмет в
//! состоянии Pickup → показать его hover-виджет, спрятать виджет
//! прошлого кадра, если цель сменилась. interact() отдаёт текущую
//! цель в pickup-интерполяцию.

use bevy::prelude::*;

use crate::combat::events::InteractInput;
use crate::combat::fire::CROSSHAIR_TRACE_RANGE;
use crate::components::Character;
use crate::probe::{CameraRig, RayProbeSource};

use super::pickup::PickupInterp;
use super::{ItemPresentation, ItemState, PickupZoneOverlap, WorldItem};

/// Состояние targeting-пробы персонажа.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct ItemTargeting {
    /// Сколько pickup-зон сейчас пересекает персонаж
    pub overlapped_count: u32,
    /// Предмет под прицелом на этом тике
    pub trace_hit_item: Option<Entity>,
    /// Предмет под прицелом на прошлом тике
    pub last_frame_item: Option<Entity>,
}

impl ItemTargeting {
    /// Пересечений больше/меньше. Счётчик не уходит ниже нуля.
    pub fn increment_overlapped(&mut self, entered: bool) {
        if entered {
            self.overlapped_count += 1;
        } else {
            self.overlapped_count = self.overlapped_count.saturating_sub(1);
        }
    }

    pub fn should_trace(&self) -> bool {
        self.overlapped_count > 0
    }

    pub fn clear_hover(&mut self) {
        self.trace_hit_item = None;
        self.last_frame_item = None;
    }
}

/// System: события pickup-зон → overlap counter.
pub fn handle_overlap_events(
    mut overlaps: EventReader<PickupZoneOverlap>,
    mut characters: Query<&mut ItemTargeting, With<Character>>,
) {
    for overlap in overlaps.read() {
        if let Ok(mut targeting) = characters.get_mut(overlap.character) {
            targeting.increment_overlapped(overlap.entered);
        }
    }
}

/// System: луч из центра экрана по предметам.
///
/// Предметы в полёте (PickupInterp) и не-Pickup состояния лучом
/// игнорируются.
pub fn trace_for_items(
    mut characters: Query<(&mut ItemTargeting, &CameraRig), With<Character>>,
    items: Query<&WorldItem, Without<PickupInterp>>,
    mut presentations: Query<&mut ItemPresentation>,
    probe: Res<RayProbeSource>,
) {
    for (mut targeting, rig) in characters.iter_mut() {
        if !targeting.should_trace() {
            // Вышли из всех зон — спрятать подвисший hover-виджет
            if let Some(previous) = targeting.last_frame_item.take() {
                hide_widget(&mut presentations, previous);
            }
            targeting.trace_hit_item = None;
            continue;
        }

        let hit_item = probe
            .cast_ray(rig.location, rig.forward, CROSSHAIR_TRACE_RANGE)
            .and_then(|hit| hit.entity)
            .filter(|&entity| {
                items
                    .get(entity)
                    .is_ok_and(|item| item.state == ItemState::Pickup)
            });

        if let Some(entity) = hit_item {
            if let Ok(mut presentation) = presentations.get_mut(entity) {
                presentation.widget_visible = true;
            }
        }

        // Цель сменилась (или пропала) — спрятать виджет прошлого кадра
        if let Some(previous) = targeting.last_frame_item {
            if hit_item != Some(previous) {
                hide_widget(&mut presentations, previous);
            }
        }

        targeting.trace_hit_item = hit_item;
        targeting.last_frame_item = hit_item;
    }
}

/// System: interact() — текущая hover-цель уходит в полёт к камере.
pub fn process_interact(
    mut inputs: EventReader<InteractInput>,
    characters: Query<(&ItemTargeting, &CameraRig), With<Character>>,
    mut items: Query<(&WorldItem, &Transform, &mut ItemPresentation), Without<PickupInterp>>,
    mut commands: Commands,
) {
    for input in inputs.read() {
        let Ok((targeting, rig)) = characters.get(input.entity) else {
            continue;
        };
        let Some(item_entity) = targeting.trace_hit_item else {
            continue;
        };
        let Ok((item, transform, mut presentation)) = items.get_mut(item_entity) else {
            continue;
        };
        if item.state != ItemState::Pickup {
            continue;
        }

        // На время полёта: виден, но не трейсится и не пересекается
        presentation.collision_enabled = false;
        presentation.widget_visible = false;

        let (_, item_yaw, _) = transform.rotation.to_euler(EulerRot::YXZ);
        commands.entity(item_entity).insert(PickupInterp::start(
            input.entity,
            transform.translation,
            rig.yaw,
            item_yaw.to_degrees(),
        ));

        crate::log(&format!("🖐️ Pickup started: {}", item.name));
    }
}

fn hide_widget(presentations: &mut Query<&mut ItemPresentation>, entity: Entity) {
    if let Ok(mut presentation) = presentations.get_mut(entity) {
        presentation.widget_visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_counter_never_negative() {
        let mut targeting = ItemTargeting::default();

        targeting.increment_overlapped(false);
        targeting.increment_overlapped(false);
        assert_eq!(targeting.overlapped_count, 0);
        assert!(!targeting.should_trace());

        targeting.increment_overlapped(true);
        targeting.increment_overlapped(true);
        assert_eq!(targeting.overlapped_count, 2);

        targeting.increment_overlapped(false);
        assert!(targeting.should_trace());
        targeting.increment_overlapped(false);
        assert!(!targeting.should_trace());
    }
}
