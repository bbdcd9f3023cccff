use scheduler::{Pid, SimulationError};
use thiserror::Error;

/// Input rejected before it reaches the simulator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("arrival time must be >= 0, got {0}")]
    InvalidArrival(i64),

    #[error("burst time must be > 0, got {0}")]
    InvalidBurst(i64),

    #[error("priority must be >= 0, got {0}")]
    InvalidPriority(i64),

    #[error("time quantum must be > 0, got {0}")]
    InvalidQuantum(i64),

    #[error("no process with PID {0}")]
    UnknownProcess(Pid),

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}
