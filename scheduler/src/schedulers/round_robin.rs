use std::num::NonZeroUsize;

use tracing::debug;

use super::Machine;
use crate::{Criterion, Engine, Process, ReadyQueueLog, Schedule};

/// Time sliced engine.
///
/// The criterion only decides which waiting process starts next. Once
/// dispatched, a process keeps the CPU for a full quantum or until it
/// completes. Processes that arrive during a slice join the queue after the
/// slice ends, ahead of the process that was just rotated out.
pub struct RoundRobin {
    quantum: NonZeroUsize,
    criterion: Criterion,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize, criterion: Criterion) -> Self {
        RoundRobin { quantum, criterion }
    }
}

impl Engine for RoundRobin {
    fn run(&self, processes: Vec<Process>, log: &mut ReadyQueueLog) -> Schedule {
        let mut machine = Machine::new(processes);

        while machine.has_work() {
            machine.admit();

            if machine.ready.is_empty() {
                log.record_idle(machine.clock);
                machine.idle_until_next_arrival();
                continue;
            }

            self.criterion.order(&mut machine.ready);
            let Some(mut process) = machine.ready.pop_front() else {
                continue;
            };
            log.record(machine.clock, &machine.ready, Some(&process));

            let slice = self.quantum.get().min(process.remaining_burst_time());
            debug!(clock = machine.clock, pid = %process.pid(), slice, "dispatch");
            machine.execute(&mut process, slice, false);

            machine.admit();
            if process.remaining_burst_time() == 0 {
                machine.complete(process);
            } else {
                machine.ready.push_back(process);
            }
        }

        log.record_idle(machine.clock);
        machine.into_schedule()
    }
}
