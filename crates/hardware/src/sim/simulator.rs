//! Simulator: owns the pipeline and everything observed about it.
//!
//! Setup validates the configuration before any state is built, so a bad
//! parameter is reported without simulating a single cycle.

use std::io::Write;

use tracing::{debug, info};

use crate::common::SimError;
use crate::config::Config;
use crate::core::pipeline::Pipeline;
use crate::sim::source::InstructionSource;
use crate::sim::trace::{EventLog, InstTrace};
use crate::stats::SimStats;

/// Top-level simulator: pipeline plus statistics and optional recorders.
#[derive(Debug)]
pub struct Simulator {
    pipeline: Pipeline,
    stats: SimStats,
    trace: Option<InstTrace>,
    event_log: Option<EventLog>,
    drained: bool,
}

impl Simulator {
    /// Validates `config` and builds a pipeline reading from `source`.
    pub fn new(
        config: &Config,
        source: impl InstructionSource + 'static,
    ) -> Result<Self, SimError> {
        config.validate()?;
        info!(
            result_buses = config.core.result_buses,
            k0 = config.core.k0_units,
            k1 = config.core.k1_units,
            k2 = config.core.k2_units,
            fetch_width = config.core.fetch_width,
            "simulator configured"
        );
        let pipeline = Pipeline::new(&config.core, Box::new(source));
        Ok(Self {
            pipeline,
            stats: SimStats::default(),
            trace: config.general.record_trace.then(InstTrace::new),
            event_log: None,
            drained: false,
        })
    }

    /// Attaches a per-cycle event log, writing its header immediately.
    pub fn with_event_log(mut self, out: impl Write + 'static) -> Result<Self, SimError> {
        self.event_log = Some(EventLog::new(out).map_err(SimError::EventLog)?);
        Ok(self)
    }

    /// Advances one cycle. Returns `true` once the pipeline has drained.
    ///
    /// Stepping a drained simulator does nothing.
    pub fn step(&mut self) -> Result<bool, SimError> {
        if self.drained {
            return Ok(true);
        }
        self.pipeline.step()?;

        let dispatch = self.pipeline.dispatch();
        self.stats.cycles = self.pipeline.cycle();
        self.stats.instructions_retired = self.pipeline.retired();
        self.stats.instructions_fetched = self.pipeline.fetch().fetched();
        self.stats.instructions_fired = self.pipeline.schedule().fired();
        self.stats.dispatch_queue_total = dispatch.occupancy_total();
        self.stats.dispatch_queue_peak = dispatch.peak() as u64;

        if let Some(trace) = &mut self.trace {
            trace.record(&self.pipeline);
        }
        if let Some(log) = &mut self.event_log {
            log.record(&self.pipeline).map_err(SimError::EventLog)?;
        }

        self.drained = self.pipeline.is_drained();
        if self.drained {
            debug!(cycles = self.stats.cycles, "pipeline drained");
            if let Some(log) = &mut self.event_log {
                log.flush().map_err(SimError::EventLog)?;
            }
        }
        Ok(self.drained)
    }

    /// Steps until the pipeline drains and returns the final statistics.
    pub fn run(&mut self) -> Result<SimStats, SimError> {
        while !self.step()? {}
        info!(
            cycles = self.stats.cycles,
            retired = self.stats.instructions_retired,
            ipc = self.stats.avg_inst_retired(),
            "simulation complete"
        );
        Ok(self.stats.clone())
    }

    /// Statistics gathered so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Per-instruction timing, when enabled by `general.record_trace`.
    pub const fn trace(&self) -> Option<&InstTrace> {
        self.trace.as_ref()
    }

    /// The pipeline, for inspection.
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// True once the pipeline has drained.
    pub const fn is_drained(&self) -> bool {
        self.drained
    }
}
