use std::num::NonZeroUsize;

use tracing::debug;

use super::Machine;
use crate::{Criterion, Engine, Process, ReadyQueueLog, Schedule};

/// Preemptive engine.
///
/// The ready queue is re-examined at every arrival and completion. The
/// running process gives up the CPU as soon as the head of the queue
/// outranks it under the criterion. With a quantum, the running process is
/// also rotated out once its quantum is used up.
///
/// * [`Criterion::ShortestRemaining`] without a quantum: shortest remaining time first.
/// * [`Criterion::Priority`] without a quantum: preemptive priority.
/// * [`Criterion::Priority`] with a quantum: preemptive priority round robin.
pub struct Preemptive {
    criterion: Criterion,
    quantum: Option<NonZeroUsize>,
}

impl Preemptive {
    pub fn new(criterion: Criterion, quantum: Option<NonZeroUsize>) -> Self {
        Preemptive { criterion, quantum }
    }

    fn should_preempt(&self, running: &Process, machine: &Machine) -> bool {
        let outranked = machine
            .ready
            .front()
            .is_some_and(|head| self.criterion.outranks(head, running));
        let expired = self.quantum.is_some() && running.remaining_quantum() == 0;
        if expired {
            debug!(clock = machine.clock, pid = %running.pid(), "quantum expired");
        }
        outranked || expired
    }

    /// How long the running process may hold the CPU before the next
    /// decision point. `None` means a process arrives right now.
    fn slice(&self, running: &Process, machine: &Machine) -> Option<usize> {
        let to_completion = running.remaining_burst_time();
        let to_arrival = machine
            .next_arrival()
            .map(|arrival| arrival.saturating_sub(machine.clock));

        if to_arrival == Some(0) {
            return None;
        }

        let mut slice = to_completion;
        if let Some(to_arrival) = to_arrival {
            slice = slice.min(to_arrival);
        }
        if self.quantum.is_some() {
            slice = slice.min(running.remaining_quantum());
        }

        if slice == 0 && to_completion > 0 {
            slice = 1;
        }
        Some(slice)
    }
}

impl Engine for Preemptive {
    fn run(&self, processes: Vec<Process>, log: &mut ReadyQueueLog) -> Schedule {
        let mut machine = Machine::new(processes);
        let mut current: Option<Process> = None;

        while current.is_some() || machine.has_work() {
            machine.admit();
            self.criterion.order(&mut machine.ready);

            if let Some(mut running) = current.take() {
                if self.should_preempt(&running, &machine) {
                    debug!(clock = machine.clock, pid = %running.pid(), "preempted");
                    if self.quantum.is_some() {
                        running.set_remaining_quantum(0);
                    }
                    machine.ready.push_back(running);
                } else {
                    current = Some(running);
                }
            }

            if current.is_none() {
                if let Some(mut next) = machine.ready.pop_front() {
                    if let Some(quantum) = self.quantum {
                        if next.remaining_quantum() == 0 {
                            next.set_remaining_quantum(quantum.get());
                        }
                    }
                    debug!(clock = machine.clock, pid = %next.pid(), criterion = %self.criterion, "dispatch");
                    current = Some(next);
                }
            }

            log.record(machine.clock, &machine.ready, current.as_ref());

            let Some(mut running) = current.take() else {
                machine.idle_until_next_arrival();
                continue;
            };

            let Some(slice) = self.slice(&running, &machine) else {
                current = Some(running);
                continue;
            };

            if slice > 0 {
                machine.execute(&mut running, slice, self.quantum.is_some());
            }

            if running.remaining_burst_time() == 0 {
                machine.complete(running);
            } else {
                current = Some(running);
            }
        }

        log.record_idle(machine.clock);
        machine.into_schedule()
    }
}
