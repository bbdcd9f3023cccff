use std::num::NonZeroUsize;

use scheduler::{simulate, Pid, Policy, Process, SimulationError, SimulationResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::InputError;

/// A process as typed in by the user, before validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    pub arrival: i64,
    pub burst: i64,
    pub priority: i64,
}

/// A policy and quantum that have been checked against each other.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SimulationRequest {
    pub policy: Policy,
    pub quantum: Option<NonZeroUsize>,
}

impl SimulationRequest {
    /// * `policy` - a policy identifier such as `fcfs` or `priority-rr-preemptive`.
    /// * `quantum` - the time quantum. Only looked at for the round robin
    ///               policies, which require it to be positive.
    pub fn new(policy: &str, quantum: Option<i64>) -> Result<Self, InputError> {
        let policy: Policy = policy.parse()?;
        if !policy.requires_quantum() {
            return Ok(SimulationRequest {
                policy,
                quantum: None,
            });
        }

        let Some(quantum) = quantum else {
            return Err(SimulationError::MissingQuantum(policy).into());
        };
        let quantum = usize::try_from(quantum)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or(InputError::InvalidQuantum(quantum))?;
        Ok(SimulationRequest {
            policy,
            quantum: Some(quantum),
        })
    }
}

/// The list of processes being edited by the user.
///
/// PIDs are handed out as one more than the largest PID in the table, so a
/// PID is never shared by two processes in the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessTable {
    processes: Vec<Process>,
}

impl ProcessTable {
    pub fn new() -> Self {
        ProcessTable::default()
    }

    /// Builds a table from raw specs, in order.
    pub fn from_specs<'a, I>(specs: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = &'a ProcessSpec>,
    {
        let mut table = ProcessTable::new();
        for spec in specs {
            table.add(*spec)?;
        }
        Ok(table)
    }

    /// Validates the spec and appends a new process, returning its PID.
    pub fn add(&mut self, spec: ProcessSpec) -> Result<Pid, InputError> {
        let arrival =
            usize::try_from(spec.arrival).map_err(|_| InputError::InvalidArrival(spec.arrival))?;
        let burst = usize::try_from(spec.burst)
            .ok()
            .filter(|burst| *burst > 0)
            .ok_or(InputError::InvalidBurst(spec.burst))?;
        let priority = usize::try_from(spec.priority)
            .map_err(|_| InputError::InvalidPriority(spec.priority))?;

        let pid = self.next_pid();
        debug!(%pid, arrival, burst, priority, "process added");
        self.processes
            .push(Process::new(pid, arrival, burst, priority));
        Ok(pid)
    }

    pub fn remove(&mut self, pid: Pid) -> Result<Process, InputError> {
        let index = self
            .processes
            .iter()
            .position(|process| process.pid() == pid)
            .ok_or(InputError::UnknownProcess(pid))?;
        debug!(%pid, "process removed");
        Ok(self.processes.remove(index))
    }

    fn next_pid(&self) -> Pid {
        self.processes
            .iter()
            .map(Process::pid)
            .max()
            .map_or(Pid::first(), |pid| pid + 1)
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// The processes in insertion order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Runs the simulator on a copy of the table.
    pub fn simulate(&self, request: SimulationRequest) -> Result<SimulationResult, InputError> {
        Ok(simulate(&self.processes, request.policy, request.quantum)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn spec(arrival: i64, burst: i64, priority: i64) -> ProcessSpec {
        ProcessSpec {
            arrival,
            burst,
            priority,
        }
    }

    #[test]
    fn pids_follow_the_largest_pid() {
        let mut table = ProcessTable::new();
        assert_eq!(table.add(spec(0, 5, 1)), Ok(Pid::new(1).unwrap()));
        assert_eq!(table.add(spec(1, 5, 1)), Ok(Pid::new(2).unwrap()));
        assert_eq!(table.add(spec(2, 5, 1)), Ok(Pid::new(3).unwrap()));

        // Removing a PID below the maximum does not free it for reuse.
        table.remove(Pid::new(2).unwrap()).unwrap();
        assert_eq!(table.add(spec(3, 5, 1)), Ok(Pid::new(4).unwrap()));

        // Removing the maximum does.
        table.remove(Pid::new(4).unwrap()).unwrap();
        assert_eq!(table.add(spec(3, 5, 1)), Ok(Pid::new(4).unwrap()));

        let pids: Vec<usize> = table.processes().iter().map(|p| p.pid().get()).collect();
        assert_eq!(pids, vec![1, 3, 4]);
    }

    #[test]
    fn emptied_table_starts_over_at_one() {
        let mut table = ProcessTable::new();
        let pid = table.add(spec(0, 5, 1)).unwrap();
        table.remove(pid).unwrap();
        assert_eq!(table.add(spec(0, 5, 1)), Ok(Pid::first()));
    }

    #[test]
    fn invalid_fields_are_rejected() {
        let mut table = ProcessTable::new();
        assert_eq!(table.add(spec(-1, 5, 1)), Err(InputError::InvalidArrival(-1)));
        assert_eq!(table.add(spec(0, 0, 1)), Err(InputError::InvalidBurst(0)));
        assert_eq!(table.add(spec(0, -3, 1)), Err(InputError::InvalidBurst(-3)));
        assert_eq!(table.add(spec(0, 5, -1)), Err(InputError::InvalidPriority(-1)));
        assert!(table.is_empty());
    }

    #[test]
    fn removing_unknown_pid_fails() {
        let mut table = ProcessTable::new();
        let pid = Pid::new(7).unwrap();
        assert_eq!(table.remove(pid), Err(InputError::UnknownProcess(pid)));
    }

    #[test]
    fn request_validates_quantum_for_round_robin_policies() {
        assert_eq!(
            SimulationRequest::new("rr", Some(4)),
            Ok(SimulationRequest {
                policy: Policy::RoundRobin,
                quantum: NonZeroUsize::new(4),
            })
        );
        assert_eq!(
            SimulationRequest::new("priority-rr-preemptive", Some(0)),
            Err(InputError::InvalidQuantum(0))
        );
        assert_eq!(
            SimulationRequest::new("priority-rr-nonpreemptive", None),
            Err(InputError::Simulation(SimulationError::MissingQuantum(
                Policy::PriorityRoundRobinNonPreemptive
            )))
        );
        // Ignored where unused.
        assert_eq!(
            SimulationRequest::new("sjf-nonpreemptive", Some(-5)),
            Ok(SimulationRequest {
                policy: Policy::SjfNonPreemptive,
                quantum: None,
            })
        );
        assert!(matches!(
            SimulationRequest::new("edf", None),
            Err(InputError::Simulation(SimulationError::UnknownPolicy(_)))
        ));
    }

    #[test]
    fn empty_table_cannot_be_simulated() {
        let table = ProcessTable::new();
        let request = SimulationRequest::new("fcfs", None).unwrap();
        assert_eq!(
            table.simulate(request),
            Err(InputError::Simulation(SimulationError::EmptyProcessList))
        );
    }

    #[test]
    fn specs_deserialize_from_json() {
        let specs: Vec<ProcessSpec> =
            serde_json::from_str(r#"[{"arrival":0,"burst":5,"priority":2}]"#).unwrap();
        let table = ProcessTable::from_specs(&specs).unwrap();
        assert_eq!(table.processes(), &[Process::new(Pid::first(), 0, 5, 2)]);
    }
}
