//! Notifications emitted by the simulation for audio and visual feedback.
//!
//! The core never plays a sound or draws a particle; it only reports what
//! should happen and the host renders it.

use serde::{Deserialize, Serialize};

use crate::enums::ParticleKind;
use crate::types::{EntityId, Position, TileCoord};

/// Named sound cues. Each cue resolves to one concrete sample through a
/// weighted variant table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Crunch,
    Clack,
    Zap,
    Blorp,
    Thunk,
    Process,
    Place,
    Fix,
    Rocks,
    Explosion,
    BigExplosion,
}

impl SoundCue {
    /// Canonical cue name.
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Crunch => "crunch",
            SoundCue::Clack => "clack",
            SoundCue::Zap => "zap",
            SoundCue::Blorp => "blorp",
            SoundCue::Thunk => "thunk",
            SoundCue::Process => "process",
            SoundCue::Place => "place",
            SoundCue::Fix => "fix",
            SoundCue::Rocks => "rocks",
            SoundCue::Explosion => "explosion",
            SoundCue::BigExplosion => "bigexplosion",
        }
    }

    /// Sample variants with selection weights. Weights sum to 1.0.
    pub fn variants(self) -> &'static [(&'static str, f64)] {
        match self {
            SoundCue::Crunch => &[("crunch", 0.2), ("longcrunch", 0.3), ("crunch2", 0.5)],
            SoundCue::Clack => &[("clack", 0.5), ("clack2", 0.5)],
            SoundCue::Zap => &[("zap", 0.5), ("zap2", 0.5)],
            SoundCue::Blorp => &[("blorp", 1.0)],
            SoundCue::Thunk => &[("thunk", 0.5), ("thunk2", 0.5)],
            SoundCue::Process => &[("process", 1.0)],
            SoundCue::Place => &[("place", 1.0)],
            SoundCue::Fix => &[("fix", 0.5), ("fix2", 0.5)],
            SoundCue::Rocks => &[("rocks", 1.0)],
            SoundCue::Explosion => &[("explosion", 1.0)],
            SoundCue::BigExplosion => &[("bigexplosion", 1.0)],
        }
    }

    /// Pick a variant from a uniform roll in `[0, 1)`.
    ///
    /// Bands are cumulative in table order: for `crunch`, a roll below 0.2
    /// picks `crunch`, below 0.5 `longcrunch`, otherwise `crunch2`.
    pub fn pick_variant(self, roll: f64) -> &'static str {
        let table = self.variants();
        let mut upper = 0.0;
        for &(name, weight) in table {
            upper += weight;
            if roll < upper {
                return name;
            }
        }
        table[table.len() - 1].0
    }
}

/// A single notification produced during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// Play a sound sample.
    Sound {
        cue: SoundCue,
        variant: String,
    },
    /// Emit `quantity` particles of `kind` at `position`.
    Particles {
        kind: ParticleKind,
        position: Position,
        quantity: u32,
    },
    /// A wall tile was destroyed; the host removes its geometry.
    TileDestroyed { tile: TileCoord },
    /// A wall tile was repaired; the host restores its geometry.
    TileRepaired { tile: TileCoord },
    /// An enemy entered the world.
    EnemySpawned { id: EntityId, position: Position },
    /// An enemy left the world (killed or crushed).
    EnemyDied { id: EntityId, position: Position },
    /// Session lost.
    Defeat { final_score: i64 },
}

impl SimEvent {
    pub fn particles(kind: ParticleKind, position: Position, quantity: u32) -> Self {
        SimEvent::Particles {
            kind,
            position,
            quantity,
        }
    }
}
