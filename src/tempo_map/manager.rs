//! Copy-on-write editing of a tempo map

use std::ops::RangeBounds;

use super::{Tempo, TempoMap, Tick, TimeSignature};

/// Edits a private copy of a tempo map.
///
/// Nothing is visible to holders of the original snapshot; `commit`
/// returns the edited map as a new snapshot.
#[derive(Clone, Debug)]
pub struct TempoMapManager {
    tempo_map: TempoMap,
}

impl TempoMapManager {
    pub fn new(tempo_map: TempoMap) -> Self {
        TempoMapManager { tempo_map }
    }

    pub fn set_tempo(&mut self, time: Tick, tempo: Tempo) -> &mut Self {
        self.tempo_map.tempo.set_value(time, tempo);
        self
    }

    pub fn set_time_signature(&mut self, time: Tick, time_signature: TimeSignature) -> &mut Self {
        self.tempo_map.time_signature.set_value(time, time_signature);
        self
    }

    /// Remove tempo changes whose tick falls in `range`
    pub fn clear_tempo<R: RangeBounds<Tick>>(&mut self, range: R) -> &mut Self {
        self.tempo_map.tempo.delete_values(range);
        self
    }

    /// Remove time signature changes whose tick falls in `range`
    pub fn clear_time_signature<R: RangeBounds<Tick>>(&mut self, range: R) -> &mut Self {
        self.tempo_map.time_signature.delete_values(range);
        self
    }

    /// The map as edited so far
    pub fn tempo_map(&self) -> &TempoMap {
        &self.tempo_map
    }

    pub fn commit(&mut self) -> TempoMap {
        log::debug!(
            "Committing tempo map: {} tempo changes, {} time signature changes",
            self.tempo_map.tempo.len(),
            self.tempo_map.time_signature.len()
        );
        self.tempo_map.clone()
    }
}
