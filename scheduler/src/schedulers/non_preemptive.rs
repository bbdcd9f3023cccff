use tracing::debug;

use super::Machine;
use crate::{Criterion, Engine, Process, ReadyQueueLog, Schedule};

/// Runs the selected process to completion, no interruption.
///
/// With [`Criterion::Fifo`] this is first come first served,
/// [`Criterion::ShortestBurst`] gives shortest job first and
/// [`Criterion::Priority`] gives non-preemptive priority scheduling.
pub struct NonPreemptive {
    criterion: Criterion,
}

impl NonPreemptive {
    pub fn new(criterion: Criterion) -> Self {
        NonPreemptive { criterion }
    }
}

impl Engine for NonPreemptive {
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
            debug!(clock = machine.clock, pid = %process.pid(), criterion = %self.criterion, "dispatch");

            let burst = process.remaining_burst_time();
            machine.execute(&mut process, burst, false);
            machine.complete(process);
        }

        log.record_idle(machine.clock);
        machine.into_schedule()
    }
}
