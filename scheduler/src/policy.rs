use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{non_preemptive, preemptive, round_robin, Criterion, Engine, SimulationError};

/// The scheduling policies a caller can ask for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First come first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    SjfNonPreemptive,
    /// Priority, non-preemptive.
    PriorityNonPreemptive,
    /// Shortest remaining time first.
    SrtfPreemptive,
    /// Priority, preemptive.
    PriorityPreemptive,
    /// Round robin.
    RoundRobin,
    /// Priority picks the next process, slices are never cut short.
    PriorityRoundRobinNonPreemptive,
    /// Priority preempts at any time, the quantum forces rotation.
    PriorityRoundRobinPreemptive,
}

impl Policy {
    pub const ALL: [Policy; 8] = [
        Policy::Fcfs,
        Policy::SjfNonPreemptive,
        Policy::PriorityNonPreemptive,
        Policy::SrtfPreemptive,
        Policy::PriorityPreemptive,
        Policy::RoundRobin,
        Policy::PriorityRoundRobinNonPreemptive,
        Policy::PriorityRoundRobinPreemptive,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::SjfNonPreemptive => "sjf-nonpreemptive",
            Policy::PriorityNonPreemptive => "priority-nonpreemptive",
            Policy::SrtfPreemptive => "srtf-preemptive",
            Policy::PriorityPreemptive => "priority-preemptive",
            Policy::RoundRobin => "rr",
            Policy::PriorityRoundRobinNonPreemptive => "priority-rr-nonpreemptive",
            Policy::PriorityRoundRobinPreemptive => "priority-rr-preemptive",
        }
    }

    /// Comma separated list of every identifier, for error messages.
    pub fn identifiers() -> String {
        Policy::ALL
            .iter()
            .map(Policy::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Round robin flavoured policies cannot run without a quantum.
    pub const fn requires_quantum(&self) -> bool {
        matches!(
            self,
            Policy::RoundRobin
                | Policy::PriorityRoundRobinNonPreemptive
                | Policy::PriorityRoundRobinPreemptive
        )
    }

    /// Builds the engine that implements this policy.
    ///
    /// The quantum is ignored by policies that do not use one.
    pub fn engine(&self, quantum: Option<NonZeroUsize>) -> Result<Box<dyn Engine>, SimulationError> {
        let engine: Box<dyn Engine> = match self {
            Policy::Fcfs => Box::new(non_preemptive(Criterion::Fifo)),
            Policy::SjfNonPreemptive => Box::new(non_preemptive(Criterion::ShortestBurst)),
            Policy::PriorityNonPreemptive => Box::new(non_preemptive(Criterion::Priority)),
            Policy::SrtfPreemptive => Box::new(preemptive(Criterion::ShortestRemaining, None)),
            Policy::PriorityPreemptive => Box::new(preemptive(Criterion::Priority, None)),
            Policy::RoundRobin => Box::new(round_robin(self.quantum(quantum)?, Criterion::Fifo)),
            Policy::PriorityRoundRobinNonPreemptive => {
                Box::new(round_robin(self.quantum(quantum)?, Criterion::Priority))
            }
            Policy::PriorityRoundRobinPreemptive => Box::new(preemptive(
                Criterion::Priority,
                Some(self.quantum(quantum)?),
            )),
        };
        Ok(engine)
    }

    fn quantum(&self, quantum: Option<NonZeroUsize>) -> Result<NonZeroUsize, SimulationError> {
        quantum.ok_or(SimulationError::MissingQuantum(*self))
    }
}

impl FromStr for Policy {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Policy::ALL
            .into_iter()
            .find(|policy| policy.as_str() == s)
            .ok_or(SimulationError::UnknownPolicy(s))
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn identifiers_round_trip() {
        for policy in Policy::ALL {
            assert_eq!(policy.as_str().parse::<Policy>(), Ok(policy));
        }
        assert_eq!(" RR ".parse::<Policy>(), Ok(Policy::RoundRobin));
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert_eq!(
            "lottery".parse::<Policy>(),
            Err(SimulationError::UnknownPolicy("lottery".to_string()))
        );
    }

    #[test]
    fn quantum_is_required_only_for_round_robin_policies() {
        let required: Vec<Policy> = Policy::ALL
            .into_iter()
            .filter(Policy::requires_quantum)
            .collect();
        assert_eq!(
            required,
            vec![
                Policy::RoundRobin,
                Policy::PriorityRoundRobinNonPreemptive,
                Policy::PriorityRoundRobinPreemptive,
            ]
        );

        for policy in required {
            assert_eq!(
                policy.engine(None).err(),
                Some(SimulationError::MissingQuantum(policy))
            );
        }
        assert!(Policy::Fcfs.engine(None).is_ok());
    }
}
