//! The stepping engines.
//!
//! All engines share the same [`Machine`]: a virtual clock, the processes
//! that have not arrived yet, the ready queue and the timeline. They differ
//! only in when they pick and for how long the picked process runs.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{GanttSegment, Owner, Process, Schedule};

mod non_preemptive;
pub use non_preemptive::NonPreemptive;

mod preemptive;
pub use preemptive::Preemptive;

mod round_robin;
pub use round_robin::RoundRobin;

struct Machine {
    clock: usize,
    /// Not yet arrived, ascending arrival time.
    pending: VecDeque<Process>,
    ready: VecDeque<Process>,
    finished: Vec<Process>,
    gantt: Vec<GanttSegment>,
}

impl Machine {
    fn new(mut processes: Vec<Process>) -> Self {
        // Stable, equal arrivals keep the caller's order.
        processes.sort_by_key(|process| process.arrival_time());
        let total = processes.len();
        Machine {
            clock: 0,
            pending: processes.into(),
            ready: VecDeque::with_capacity(total),
            finished: Vec::with_capacity(total),
            gantt: Vec::new(),
        }
    }

    /// Moves every process that has arrived by now into the ready queue.
    fn admit(&mut self) {
        while let Some(process) = self.pending.front() {
            if process.arrival_time() > self.clock {
                break;
            }
            if let Some(process) = self.pending.pop_front() {
                trace!(clock = self.clock, pid = %process.pid(), "admitted");
                self.ready.push_back(process);
            }
        }
    }

    /// Processes that still need the CPU, apart from a running one.
    fn has_work(&self) -> bool {
        !self.pending.is_empty() || !self.ready.is_empty()
    }

    fn next_arrival(&self) -> Option<usize> {
        self.pending.front().map(Process::arrival_time)
    }

    /// Jumps the clock to the next arrival, recording the gap as idle time.
    fn idle_until_next_arrival(&mut self) {
        if let Some(arrival) = self.next_arrival() {
            if self.clock < arrival {
                trace!(from = self.clock, to = arrival, "cpu idle");
                self.gantt
                    .push(GanttSegment::new(Owner::Idle, self.clock, arrival));
                self.clock = arrival;
            }
        }
    }

    /// Runs `process` for `units` starting at the current clock.
    fn execute(&mut self, process: &mut Process, units: usize, quantum_bound: bool) {
        let start = self.clock;
        process.charge(start, units, quantum_bound);
        self.clock += units;
        self.gantt.push(GanttSegment::new(
            Owner::Process(process.pid()),
            start,
            self.clock,
        ));
    }

    fn complete(&mut self, mut process: Process) {
        process.finish(self.clock);
        debug!(
            clock = self.clock,
            pid = %process.pid(),
            waiting = process.waiting_time(),
            turnaround = process.turnaround_time(),
            "process completed"
        );
        self.finished.push(process);
    }

    fn into_schedule(self) -> Schedule {
        Schedule {
            finished: self.finished,
            gantt: self.gantt,
        }
    }
}
