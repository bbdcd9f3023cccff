use thiserror::Error;

use crate::{Pid, Policy};

/// Input rejected by [`simulate`](crate::simulate).
///
/// These are caller mistakes. A well formed request never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimulationError {
    /// There is nothing to schedule.
    #[error("the process list is empty")]
    EmptyProcessList,

    /// A round robin flavoured policy was requested without a time quantum.
    #[error("policy '{0}' requires a time quantum")]
    MissingQuantum(Policy),

    /// The policy identifier is not one of the known policies.
    #[error("unknown policy '{0}', expected one of: {ids}", ids = Policy::identifiers())]
    UnknownPolicy(String),

    /// A process needs no CPU time at all.
    #[error("process {0} has a burst time of 0")]
    InvalidBurst(Pid),
}
