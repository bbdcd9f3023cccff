//! The caller side of the scheduling simulator.
//!
//! This crate keeps the editable process table, validates raw input before
//! it reaches the [`scheduler`] crate, and renders results as text.

use serde::{Deserialize, Serialize};

mod error;
mod report;
mod table;

pub use crate::error::InputError;
pub use crate::report::{format_report, Gantt, Log, Report};
pub use crate::table::{ProcessSpec, ProcessTable, SimulationRequest};

/// A workload as stored on disk.
///
/// ```json
/// { "policy": "rr", "quantum": 4, "processes": [{ "arrival": 0, "burst": 24, "priority": 1 }] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadFile {
    #[serde(default = "default_policy")]
    pub policy: String,
    #[serde(default)]
    pub quantum: Option<i64>,
    pub processes: Vec<ProcessSpec>,
}

fn default_policy() -> String {
    String::from("fcfs")
}

impl WorkloadFile {
    pub fn table(&self) -> Result<ProcessTable, InputError> {
        ProcessTable::from_specs(&self.processes)
    }

    pub fn request(&self) -> Result<SimulationRequest, InputError> {
        SimulationRequest::new(&self.policy, self.quantum)
    }
}
