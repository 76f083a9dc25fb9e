//! Feedback events (ECS → Engine).
//!
//! Симуляция принимает решения, движок исполняет презентацию:
//! звук, анимационные монтажи, one-shot эффекты. События — единственный
//! канал наружу, как WeaponFired в ranged combat.

use bevy::prelude::*;

/// Звуковые cue (движок мапит на свои ассеты).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Выстрел (pitch рандомизируется DeterministicRng-ом)
    GunFire,
    /// Сухой щелчок при пустом магазине
    DryFire,
    /// Начало перезарядки
    ReloadStart,
    /// Взмах ножа
    KnifeSlash,
    /// Вдох при задержке дыхания
    BreathIn,
    /// Выдох при окончании задержки
    BreathOut,
    /// Предмет поднят
    ItemObtained,
}

/// Анимационные монтажи персонажа.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MontageId {
    PistolFire,
    Reload,
    KnifeSlash,
}

/// One-shot визуальные эффекты.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectKind {
    /// Вспышка на срезе ствола
    MuzzleFlash,
    /// Частицы в точке попадания
    ImpactParticles,
    /// Дымный след от ствола до точки попадания
    BeamParticles,
}

/// Event: проиграть звуковой cue (ECS → Engine).
#[derive(Event, Debug, Clone)]
pub struct PlaySoundCue {
    pub entity: Entity,
    pub cue: SoundCue,
    /// Pitch multiplier (1.0 = без сдвига)
    pub pitch: f32,
}

impl PlaySoundCue {
    pub fn new(entity: Entity, cue: SoundCue) -> Self {
        Self {
            entity,
            cue,
            pitch: 1.0,
        }
    }
}

/// Event: проиграть секцию монтажа (ECS → Engine).
///
/// Для Reload секция берётся из GunStats::reload_section — движок
/// по окончании секции отвечает событием MontageSectionFinished.
#[derive(Event, Debug, Clone)]
pub struct PlayMontage {
    pub entity: Entity,
    pub montage: MontageId,
    pub section: String,
}

/// Event: заспавнить one-shot эффект (ECS → Engine).
#[derive(Event, Debug, Clone)]
pub struct SpawnEffect {
    pub effect: EffectKind,
    /// Точка спавна (для BeamParticles — старт луча)
    pub location: Vec3,
    /// Конец луча (только BeamParticles)
    pub beam_end: Option<Vec3>,
}
