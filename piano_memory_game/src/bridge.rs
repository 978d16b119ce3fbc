// The outbound audio/highlight seam.
//
// The controller tells an `AudioBridge` to audition a chord (play it and
// tint the piano background with the card color) on every accepted click,
// and to clear the audition when a mismatch turns back over or a new game
// starts. A matched pair leaves its audition in place.
//
// Bridge calls are fire-and-forget. The methods return nothing, and a
// bridge whose synth is not ready simply drops the request; game state is
// never affected by what the bridge does.

use crate::theory::{Color, Pitch};
use serde::{Deserialize, Serialize};

/// A chord currently being shown/played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audition {
    pub pitches: Vec<Pitch>,
    pub color: Color,
}

pub trait AudioBridge {
    fn audition(&mut self, pitches: &[Pitch], color: Color);
    fn clear_audition(&mut self);
}

/// Headless bridge that ignores every request.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullBridge;

impl AudioBridge for NullBridge {
    fn audition(&mut self, _pitches: &[Pitch], _color: Color) {}
    fn clear_audition(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BridgeCall {
    Audition(Audition),
    Clear,
}

/// Bridge that remembers every call in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingBridge {
    pub calls: Vec<BridgeCall>,
}

impl RecordingBridge {
    pub fn audition_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, BridgeCall::Audition(_)))
            .count()
    }

    pub fn last(&self) -> Option<&BridgeCall> {
        self.calls.last()
    }
}

impl AudioBridge for RecordingBridge {
    fn audition(&mut self, pitches: &[Pitch], color: Color) {
        self.calls.push(BridgeCall::Audition(Audition {
            pitches: pitches.to_vec(),
            color,
        }));
    }

    fn clear_audition(&mut self) {
        self.calls.push(BridgeCall::Clear);
    }
}
