//! Ordered window of in-flight instructions.
//!
//! The window owns every live [`PipelineEntry`] in fetch order (oldest
//! first). Stage occupancy is answered from the entries themselves: at most
//! one active entry reports any given stage. Exits are recorded on the entry
//! and physically removed by [`PipelineWindow::compact`] at the end of the
//! cycle, so indices stay stable for the whole advancement pass.

use crate::core::pipeline::entry::PipelineEntry;
use crate::core::pipeline::stage::Stage;

/// Fetch-ordered collection of in-flight instructions.
#[derive(Clone, Debug, Default)]
pub struct PipelineWindow {
    entries: Vec<PipelineEntry>,
}

impl PipelineWindow {
    /// Creates an empty window.
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a newly fetched entry and returns its index.
    pub fn push(&mut self, entry: PipelineEntry) -> usize {
        debug_assert!(
            self.entries.last().is_none_or(|e| e.seq() < entry.seq()),
            "entries must be pushed in fetch order"
        );
        self.entries.push(entry);
        self.entries.len() - 1
    }

    /// Index of the active entry occupying `stage`.
    pub fn occupant(&self, stage: Stage) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.is_active() && e.stage == stage)
    }

    /// Returns `true` if no active entry occupies `stage`.
    pub fn is_free(&self, stage: Stage) -> bool {
        self.occupant(stage).is_none()
    }

    /// Entry at `idx`.
    pub fn get(&self, idx: usize) -> Option<&PipelineEntry> {
        self.entries.get(idx)
    }

    /// Mutable entry at `idx`.
    pub fn get_mut(&mut self, idx: usize) -> Option<&mut PipelineEntry> {
        self.entries.get_mut(idx)
    }

    /// Active entries older than `idx`, nearest predecessor first.
    pub fn older_than(&self, idx: usize) -> impl Iterator<Item = (usize, &PipelineEntry)> {
        self.entries[..idx.min(self.entries.len())]
            .iter()
            .enumerate()
            .rev()
            .filter(|(_, e)| e.is_active())
    }

    /// All entries in fetch order, including those exited this cycle.
    pub fn iter(&self) -> impl Iterator<Item = &PipelineEntry> {
        self.entries.iter()
    }

    /// All entries in fetch order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PipelineEntry> {
        self.entries.iter_mut()
    }

    /// Drops every exited entry.
    pub fn compact(&mut self) {
        self.entries.retain(PipelineEntry::is_active);
    }

    /// Number of entries, including exited ones not yet compacted.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is in flight.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
