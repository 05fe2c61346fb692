//! Per-instruction stage timestamps and the per-cycle event log.
//!
//! Both are filled from the tag lists each stage publishes during a cycle,
//! after the combinational phase has run.

use std::fmt;
use std::io::{self, Write};

use crate::core::pipeline::Pipeline;
use crate::isa::Tag;

/// Cycles at which one instruction passed each stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTimes {
    /// Offered by fetch.
    pub fetch: Option<u64>,
    /// Entered the dispatch queue.
    pub dispatch: Option<u64>,
    /// Entered the reservation station.
    pub schedule: Option<u64>,
    /// Selected for execution.
    pub issue: Option<u64>,
    /// Latched into a functional unit.
    pub execute: Option<u64>,
    /// Retired on the result bus.
    pub retire: Option<u64>,
}

impl StageTimes {
    /// True once the instruction has retired.
    pub const fn is_retired(&self) -> bool {
        self.retire.is_some()
    }
}

/// Stage timestamps for every instruction, indexed by tag.
#[derive(Clone, Debug, Default)]
pub struct InstTrace {
    rows: Vec<StageTimes>,
}

impl InstTrace {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    fn row(&mut self, tag: Tag) -> &mut StageTimes {
        let index = tag.0 as usize;
        if index >= self.rows.len() {
            self.rows.resize_with(index + 1, StageTimes::default);
        }
        &mut self.rows[index]
    }

    fn stamp(&mut self, tags: &[Tag], cycle: u64, field: fn(&mut StageTimes) -> &mut Option<u64>) {
        for &tag in tags {
            let slot = field(self.row(tag));
            debug_assert!(slot.is_none(), "{tag} stamped twice");
            *slot = Some(cycle);
        }
    }

    /// Records everything `pipeline` did in its current cycle.
    pub fn record(&mut self, pipeline: &Pipeline) {
        let cycle = pipeline.cycle();
        self.stamp(pipeline.fetch().offered_tags(), cycle, |t| &mut t.fetch);
        self.stamp(pipeline.dispatch().enqueued_tags(), cycle, |t| &mut t.dispatch);
        self.stamp(pipeline.schedule().inserted_tags(), cycle, |t| &mut t.schedule);
        self.stamp(pipeline.schedule().selected_tags(), cycle, |t| &mut t.issue);
        self.stamp(pipeline.execute().latched_tags(), cycle, |t| &mut t.execute);
        self.stamp(pipeline.cdb().retired_tags(), cycle, |t| &mut t.retire);
    }

    /// Timestamps of `tag`, if it has been seen.
    pub fn get(&self, tag: Tag) -> Option<&StageTimes> {
        self.rows.get(tag.0 as usize)
    }

    /// Number of instructions seen.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no instruction has been seen.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &StageTimes)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| (Tag(index as u64), row))
    }

    /// Writes the tab-separated timing table.
    pub fn write_table<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "INST\tFETCH\tDISP\tSCHED\tISSUE\tEXEC\tSTATE")?;
        for (tag, row) in self.iter() {
            writeln!(
                out,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                tag.ordinal(),
                Cell(row.fetch),
                Cell(row.dispatch),
                Cell(row.schedule),
                Cell(row.issue),
                Cell(row.execute),
                Cell(row.retire),
            )?;
        }
        Ok(())
    }
}

/// Table cell; `-` for a stage not yet reached.
struct Cell(Option<u64>);

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(cycle) => write!(f, "{cycle}"),
            None => f.write_str("-"),
        }
    }
}

/// Per-cycle text log of stage events.
pub struct EventLog {
    out: Box<dyn Write>,
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog").finish_non_exhaustive()
    }
}

impl EventLog {
    /// Wraps `out` and writes the header line.
    pub fn new(out: impl Write + 'static) -> io::Result<Self> {
        let mut out: Box<dyn Write> = Box::new(out);
        writeln!(out, "CYCLE\tOPERATION\tINSTRUCTION")?;
        Ok(Self { out })
    }

    fn write(&mut self, cycle: u64, operation: &str, tags: &[Tag]) -> io::Result<()> {
        for tag in tags {
            writeln!(self.out, "{cycle}\t{operation}\t{}", tag.ordinal())?;
        }
        Ok(())
    }

    /// Logs everything `pipeline` did in its current cycle.
    pub fn record(&mut self, pipeline: &Pipeline) -> io::Result<()> {
        let cycle = pipeline.cycle();
        self.write(cycle, "STATE UPDATE", pipeline.cdb().retired_tags())?;
        self.write(cycle, "EXECUTED", pipeline.execute().finished_tags())?;
        self.write(cycle, "SCHEDULED", pipeline.schedule().selected_tags())?;
        self.write(cycle, "DISPATCHED", pipeline.dispatch().offered_tags())?;
        self.write(cycle, "FETCHED", pipeline.fetch().offered_tags())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
