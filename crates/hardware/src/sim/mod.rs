//! Simulation driver, input loading and reporting.
//!
//! Provides the `Simulator` that steps the pipeline over a decoded trace,
//! the file loaders that feed it, and the timeline and report renderers.

/// Configuration and trace loading.
pub mod loader;

/// Textual report sections.
pub mod report;

/// Pipeline driver and run results.
pub mod simulator;

/// Cycle diagram collection and rendering.
pub mod timeline;

pub use simulator::{SimReport, Simulator};
pub use timeline::Timeline;
