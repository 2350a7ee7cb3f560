//! Sound and particle notifications.
//!
//! Variant selection draws from the engine rng so a seeded run replays the
//! same samples.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use cavecrawl_core::enums::ParticleKind;
use cavecrawl_core::events::{SimEvent, SoundCue};
use cavecrawl_core::types::Position;

/// Queue `cue` with a weighted random variant.
pub fn play(events: &mut Vec<SimEvent>, rng: &mut ChaCha8Rng, cue: SoundCue) {
    let roll: f64 = rng.gen();
    events.push(SimEvent::Sound {
        cue,
        variant: cue.pick_variant(roll).to_string(),
    });
}

pub fn burst(events: &mut Vec<SimEvent>, kind: ParticleKind, position: Position, quantity: u32) {
    if quantity > 0 {
        events.push(SimEvent::particles(kind, position, quantity));
    }
}
