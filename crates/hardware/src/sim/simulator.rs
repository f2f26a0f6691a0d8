//! Simulator: drives the pipeline over a decoded trace.
//!
//! The simulator checks the trace against the configured capacity, steps the
//! pipeline until it drains and keeps the cycle timeline.

use crate::common::error::SimError;
use crate::config::Config;
use crate::core::pipeline::engine::Pipeline;
use crate::core::pipeline::entry::Retirement;
use crate::core::pipeline::snapshot::CycleRecord;
use crate::core::units::fpu::LatencyTable;
use crate::isa::instruction::Instruction;
use crate::sim::timeline::Timeline;
use crate::stats::SimStats;
use serde::Serialize;
use tracing::debug;

/// Everything a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimReport {
    /// Stage occupancy of every cycle.
    pub timeline: Timeline,
    /// Final counters.
    pub stats: SimStats,
    /// Pipeline exits in the order they happened.
    pub retirements: Vec<Retirement>,
}

/// Top-level simulator: pipeline state plus the timeline recorded so far.
#[derive(Debug)]
pub struct Simulator {
    pipeline: Pipeline,
    timeline: Timeline,
}

impl Simulator {
    /// Creates a simulator for `program`.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Config` if `config` fails validation and
    /// `SimError::TraceTooLarge` if `program` exceeds
    /// `config.general.max_instructions`.
    pub fn new(config: &Config, program: Vec<Instruction>) -> Result<Self, SimError> {
        config.validate()?;

        let capacity = config.general.max_instructions;
        if program.len() > capacity {
            return Err(SimError::TraceTooLarge {
                count: program.len(),
                capacity,
            });
        }

        debug!(
            instructions = program.len(),
            fp_add_sub = config.latency.fp_add_sub,
            fp_mul = config.latency.fp_mul,
            fp_div = config.latency.fp_div,
            "simulator ready"
        );
        Ok(Self {
            pipeline: Pipeline::new(program, LatencyTable::from(&config.latency)),
            timeline: Timeline::new(),
        })
    }

    /// Advances the simulator by one clock cycle.
    pub fn tick(&mut self) -> CycleRecord {
        let record = self.pipeline.tick();
        self.timeline.push(record.clone());
        record
    }

    /// Returns `true` once the pipeline has drained.
    pub fn is_finished(&self) -> bool {
        self.pipeline.is_finished()
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        self.pipeline.stats()
    }

    /// Cycles recorded so far.
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Runs until the pipeline drains.
    pub fn run(mut self) -> SimReport {
        while !self.is_finished() {
            let _ = self.tick();
        }
        debug!(cycles = self.pipeline.cycle(), "simulation finished");

        let (stats, retirements) = self.pipeline.into_results();
        SimReport {
            timeline: self.timeline,
            stats,
            retirements,
        }
    }
}
