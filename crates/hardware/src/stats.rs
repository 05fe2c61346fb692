//! Simulation statistics collection and reporting.
//!
//! This module tracks the run-level metrics of the simulator. It provides:
//! 1. **Cycle and IPC:** Total cycles, retired instructions, and retired per cycle.
//! 2. **Dispatch queue:** Occupancy summed over cycles, its average, and its peak.
//! 3. **Issue rate:** Instructions fired (selected for execution) per cycle.
//! 4. **Export:** A serializable [`StatsReport`] for machine-readable output.

use std::time::Instant;

use serde::Serialize;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired on the result bus.
    pub instructions_retired: u64,
    /// Number of instructions fetched from the source.
    pub instructions_fetched: u64,
    /// Number of instructions selected for execution.
    pub instructions_fired: u64,
    /// Dispatch-queue length after enqueue, summed over every cycle.
    pub dispatch_queue_total: u64,
    /// Largest dispatch-queue length after enqueue.
    pub dispatch_queue_peak: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            instructions_fetched: 0,
            instructions_fired: 0,
            dispatch_queue_total: 0,
            dispatch_queue_peak: 0,
        }
    }
}

/// Serializable snapshot of [`SimStats`] with derived averages.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StatsReport {
    /// Total cycles.
    pub cycles: u64,
    /// Instructions retired.
    pub instructions_retired: u64,
    /// Average dispatch-queue size.
    pub avg_dispatch_queue_size: f64,
    /// Peak dispatch-queue size.
    pub max_dispatch_queue_size: u64,
    /// Instructions fired per cycle.
    pub avg_inst_fired: f64,
    /// Instructions retired per cycle (IPC).
    pub avg_inst_retired: f64,
}

/// `num / den` as a float, or 0 when `den` is 0.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl SimStats {
    /// Average dispatch-queue size over the run.
    pub fn avg_dispatch_queue_size(&self) -> f64 {
        ratio(self.dispatch_queue_total, self.cycles)
    }

    /// Instructions selected for execution per cycle.
    pub fn avg_inst_fired(&self) -> f64 {
        ratio(self.instructions_fired, self.cycles)
    }

    /// Instructions retired per cycle.
    pub fn avg_inst_retired(&self) -> f64 {
        ratio(self.instructions_retired, self.cycles)
    }

    /// Builds the serializable report.
    pub fn report(&self) -> StatsReport {
        StatsReport {
            cycles: self.cycles,
            instructions_retired: self.instructions_retired,
            avg_dispatch_queue_size: self.avg_dispatch_queue_size(),
            max_dispatch_queue_size: self.dispatch_queue_peak,
            avg_inst_fired: self.avg_inst_fired(),
            avg_inst_retired: self.avg_inst_retired(),
        }
    }

    /// Prints the statistics banner to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let khz = if seconds > 0.0 {
            (self.cycles as f64 / seconds) / 1000.0
        } else {
            0.0
        };
        println!("\n==========================================================");
        println!("TOMASULO SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {:.4} s", seconds);
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {:.2} kHz", khz);
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.6}", self.avg_inst_retired());
        println!("----------------------------------------------------------");
        println!("DISPATCH / ISSUE");
        println!("  fetched                {}", self.instructions_fetched);
        println!("  disp_q.avg             {:.6}", self.avg_dispatch_queue_size());
        println!("  disp_q.max             {}", self.dispatch_queue_peak);
        println!("  fired.avg              {:.6}", self.avg_inst_fired());
        println!("  retired.avg            {:.6}", self.avg_inst_retired());
        println!("==========================================================");
    }
}
