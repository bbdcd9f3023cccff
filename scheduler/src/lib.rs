//! A CPU scheduling simulation library.
//!
//! This library replays a fixed set of processes under one of eight
//! dispatch policies on a discrete virtual clock. A run produces the
//! completed processes with their metrics, the Gantt timeline of the CPU
//! and an audit log of the ready queue.
//!

use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

mod error;
mod policy;
mod ready_queue;
mod scheduler;
mod schedulers;

pub use crate::error::SimulationError;
pub use crate::policy::Policy;
pub use crate::ready_queue::{LogEntry, QueuedProcess, ReadyQueueLog};
pub use crate::scheduler::{
    merge_segments, Criterion, Engine, GanttSegment, Owner, Pid, Process, Schedule,
};
pub use crate::schedulers::{NonPreemptive, Preemptive, RoundRobin};

/// Returns an engine that runs each selected process to completion.
///
/// * `criterion` - how the ready queue is ordered before each pick.
pub fn non_preemptive(criterion: Criterion) -> impl Engine {
    NonPreemptive::new(criterion)
}

/// Returns an engine that re-examines the ready queue at every arrival and
/// completion and preempts the running process when the head of the queue
/// outranks it.
///
/// * `criterion` - how the ready queue is ordered and what outranks the
///                 running process.
/// * `quantum` - when present, the running process is also rotated out
///               after this many time units.
pub fn preemptive(criterion: Criterion, quantum: Option<NonZeroUsize>) -> impl Engine {
    Preemptive::new(criterion, quantum)
}

/// Returns an engine that gives each dispatched process a full time slice.
///
/// * `quantum` - the time units a process can run before it is rotated to
///               the back of the ready queue.
/// * `criterion` - how the ready queue is ordered before each pick.
pub fn round_robin(quantum: NonZeroUsize, criterion: Criterion) -> impl Engine {
    RoundRobin::new(quantum, criterion)
}

/// Everything a simulation run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub policy: Policy,
    /// Completed processes in PID order.
    pub finished: Vec<Process>,
    /// Execution slices as the engine emitted them.
    pub gantt: Vec<GanttSegment>,
    pub ready_queue_log: ReadyQueueLog,
}

impl SimulationResult {
    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.finished.iter().find(|process| process.pid() == pid)
    }

    /// The timeline with touching slices of the same owner joined.
    pub fn merged_gantt(&self) -> Vec<GanttSegment> {
        merge_segments(&self.gantt)
    }

    /// The time the last process completed.
    pub fn makespan(&self) -> usize {
        self.gantt.last().map_or(0, |segment| segment.end)
    }

    pub fn average_waiting_time(&self) -> f64 {
        self.average(Process::waiting_time)
    }

    pub fn average_turnaround_time(&self) -> f64 {
        self.average(Process::turnaround_time)
    }

    fn average(&self, metric: fn(&Process) -> usize) -> f64 {
        if self.finished.is_empty() {
            return 0.0;
        }
        let total: usize = self.finished.iter().map(metric).sum();
        total as f64 / self.finished.len() as f64
    }
}

/// Runs one simulation.
///
/// * `processes` - the processes to schedule. The slice is copied, the
///                 caller's records are never touched.
/// * `policy` - the dispatch policy.
/// * `quantum` - the time quantum, required by the round robin policies.
#[instrument(skip(processes), fields(count = processes.len()))]
pub fn simulate(
    processes: &[Process],
    policy: Policy,
    quantum: Option<NonZeroUsize>,
) -> Result<SimulationResult, SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyProcessList);
    }
    if let Some(process) = processes.iter().find(|process| process.burst_time() == 0) {
        return Err(SimulationError::InvalidBurst(process.pid()));
    }
    let engine = policy.engine(quantum)?;

    let mut run: Vec<Process> = processes.to_vec();
    run.iter_mut().for_each(Process::reset);
    let mut ready_queue_log = ReadyQueueLog::new();

    info!(%policy, "simulation started");
    let Schedule { mut finished, gantt } = engine.run(run, &mut ready_queue_log);
    finished.sort_by_key(Process::pid);

    let result = SimulationResult {
        policy,
        finished,
        gantt,
        ready_queue_log,
    };
    info!(
        %policy,
        makespan = result.makespan(),
        average_waiting = result.average_waiting_time(),
        average_turnaround = result.average_turnaround_time(),
        "simulation finished"
    );
    Ok(result)
}
