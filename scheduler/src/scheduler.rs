use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::ReadyQueueLog;

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns `None` for 0.
    pub fn new(pid: usize) -> Option<Pid> {
        NonZeroUsize::new(pid).map(Pid)
    }

    /// The PID given to the first process of an empty table.
    pub const fn first() -> Pid {
        Pid(NonZeroUsize::MIN)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add<usize> for Pid {
    type Output = Pid;

    fn add(self, rhs: usize) -> Self::Output {
        Pid(self.0.saturating_add(rhs))
    }
}

/// Who holds the CPU during a Gantt segment or a ready queue snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    /// The process with this PID is running.
    Process(Pid),
    /// No process is running.
    Idle,
}

impl Owner {
    pub fn pid(&self) -> Option<Pid> {
        match self {
            Owner::Process(pid) => Some(*pid),
            Owner::Idle => None,
        }
    }
}

impl Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Process(pid) => write!(f, "P{}", pid),
            Owner::Idle => write!(f, "Idle"),
        }
    }
}

/// A simulated process.
///
/// The arrival time, burst time and priority are fixed when the process is
/// created. Every other field is simulation state and is rebuilt by
/// [`Process::reset`] before each run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Process {
    pid: Pid,
    arrival_time: usize,
    burst_time: usize,
    /// Lower value means higher priority.
    priority: usize,

    remaining_burst_time: usize,
    remaining_quantum: usize,
    start_time: Option<usize>,
    completion_time: usize,
    waiting_time: usize,
    turnaround_time: usize,
    completed: bool,
}

impl Process {
    pub fn new(pid: Pid, arrival_time: usize, burst_time: usize, priority: usize) -> Self {
        Process {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_burst_time: burst_time,
            remaining_quantum: 0,
            start_time: None,
            completion_time: 0,
            waiting_time: 0,
            turnaround_time: 0,
            completed: false,
        }
    }

    /// Clears every simulation field, leaving the process as freshly created.
    pub fn reset(&mut self) {
        *self = Process::new(self.pid, self.arrival_time, self.burst_time, self.priority);
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> usize {
        self.arrival_time
    }

    pub fn burst_time(&self) -> usize {
        self.burst_time
    }

    pub fn priority(&self) -> usize {
        self.priority
    }

    pub fn remaining_burst_time(&self) -> usize {
        self.remaining_burst_time
    }

    pub fn remaining_quantum(&self) -> usize {
        self.remaining_quantum
    }

    /// The time the process was first given the CPU.
    pub fn start_time(&self) -> Option<usize> {
        self.start_time
    }

    pub fn completion_time(&self) -> usize {
        self.completion_time
    }

    pub fn waiting_time(&self) -> usize {
        self.waiting_time
    }

    pub fn turnaround_time(&self) -> usize {
        self.turnaround_time
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_remaining_quantum(&mut self, quantum: usize) {
        self.remaining_quantum = quantum;
    }

    /// Charges `units` of CPU time starting at `clock`.
    pub(crate) fn charge(&mut self, clock: usize, units: usize, quantum_bound: bool) {
        self.start_time.get_or_insert(clock);
        self.remaining_burst_time -= units;
        if quantum_bound {
            self.remaining_quantum = self.remaining_quantum.saturating_sub(units);
        }
    }

    /// Records the completion metrics. Called once, when the remaining
    /// burst time reaches 0.
    pub(crate) fn finish(&mut self, clock: usize) {
        self.completion_time = clock;
        self.turnaround_time = clock - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
        self.completed = true;
    }
}

/// A contiguous interval `[start, end)` of CPU history.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttSegment {
    pub owner: Owner,
    pub start: usize,
    pub end: usize,
}

impl GanttSegment {
    pub fn new(owner: Owner, start: usize, end: usize) -> Self {
        GanttSegment { owner, start, end }
    }

    pub fn duration(&self) -> usize {
        self.end - self.start
    }
}

impl Display for GanttSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\t{}\t{}", self.owner, self.start, self.end)
    }
}

/// Joins neighbouring segments that have the same owner and touch each other.
///
/// Segments of the same owner separated by a gap or by another owner are
/// left apart.
pub fn merge_segments(segments: &[GanttSegment]) -> Vec<GanttSegment> {
    let mut merged: Vec<GanttSegment> = Vec::with_capacity(segments.len());
    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.owner == segment.owner && last.end == segment.start => {
                last.end = segment.end;
            }
            _ => merged.push(*segment),
        }
    }
    merged
}

/// The order in which an engine picks from its ready queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Admission order, the queue is never reordered.
    Fifo,
    /// Ascending original burst time.
    ShortestBurst,
    /// Ascending remaining burst time.
    ShortestRemaining,
    /// Ascending priority value.
    Priority,
}

impl Criterion {
    fn key(self, process: &Process) -> Option<usize> {
        match self {
            Criterion::Fifo => None,
            Criterion::ShortestBurst => Some(process.burst_time),
            Criterion::ShortestRemaining => Some(process.remaining_burst_time),
            Criterion::Priority => Some(process.priority),
        }
    }

    /// Compares two processes. Equal keys compare as `Equal` so that a
    /// stable sort keeps admission order.
    pub fn compare(self, a: &Process, b: &Process) -> Ordering {
        match (self.key(a), self.key(b)) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => Ordering::Equal,
        }
    }

    /// Sorts the ready queue in place. The sort is stable.
    pub fn order(self, queue: &mut VecDeque<Process>) {
        if self == Criterion::Fifo {
            return;
        }
        queue
            .make_contiguous()
            .sort_by(|a, b| self.compare(a, b));
    }

    /// Returns true if `challenger` should take the CPU from `incumbent`.
    pub fn outranks(self, challenger: &Process, incumbent: &Process) -> bool {
        self.compare(challenger, incumbent) == Ordering::Less
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criterion::Fifo => write!(f, "fifo"),
            Criterion::ShortestBurst => write!(f, "shortest-burst"),
            Criterion::ShortestRemaining => write!(f, "shortest-remaining"),
            Criterion::Priority => write!(f, "priority"),
        }
    }
}

/// What an engine hands back after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Processes in the order they completed.
    pub finished: Vec<Process>,
    /// Raw execution slices in time order.
    pub gantt: Vec<GanttSegment>,
}

/// The trait that every stepping engine implements.
///
/// An engine owns the processes it is given and returns them, completed,
/// inside the [`Schedule`]. Ready queue snapshots are written to `log`.
pub trait Engine {
    fn run(&self, processes: Vec<Process>, log: &mut ReadyQueueLog) -> Schedule;
}
