//! Instruction pipeline implementation.
//!
//! This module contains the in-order IF/ID/EX/MEM/WB pipeline and its
//! floating-point side units. It includes the following components:
//! 1. **Stages:** Identifiers for the nine diagram columns.
//! 2. **Entries:** Runtime state of each in-flight instruction.
//! 3. **Window:** The fetch-ordered set of in-flight instructions.
//! 4. **Hazards:** Decode-time WAW squash and stall detection.
//! 5. **Engine:** The cycle-stepping state machine.

/// Cycle-stepping pipeline engine.
pub mod engine;

/// Per-instruction runtime state and exit records.
pub mod entry;

/// Decode-time hazard detection.
pub mod hazards;

/// Per-cycle stage occupancy records.
pub mod snapshot;

/// Pipeline stage identifiers.
pub mod stage;

/// Fetch-ordered in-flight instruction window.
pub mod window;

pub use engine::Pipeline;
pub use entry::{ExitKind, PipelineEntry, Retirement};
pub use hazards::HazardKind;
pub use snapshot::{CycleRecord, Slot};
pub use stage::Stage;
