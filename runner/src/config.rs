use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use workload::{ProcessSpec, WorkloadFile};

/// How the report is printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Runner settings, read from the command line and the environment.
#[derive(Debug)]
pub struct Config {
    pub workload: WorkloadFile,
    pub format: Format,
}

impl Config {
    /// * first argument or `WORKLOAD` - path to a JSON workload file.
    /// * `POLICY`, `QUANTUM` - override the policy and quantum of the workload.
    /// * `FORMAT` - `text` or `json`.
    pub fn from_env() -> Result<Config> {
        let path = env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(|| env::var_os("WORKLOAD").map(PathBuf::from));

        let mut workload = match path {
            Some(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading workload {}", path.display()))?;
                serde_json::from_str::<WorkloadFile>(&text)
                    .with_context(|| format!("parsing workload {}", path.display()))?
            }
            None => demo(),
        };

        if let Ok(policy) = env::var("POLICY") {
            workload.policy = policy;
        }
        if let Ok(quantum) = env::var("QUANTUM") {
            let quantum = quantum
                .trim()
                .parse::<i64>()
                .with_context(|| format!("QUANTUM is not an integer: {quantum}"))?;
            workload.quantum = Some(quantum);
        }

        let format = match env::var("FORMAT").as_deref() {
            Err(_) | Ok("text") => Format::Text,
            Ok("json") => Format::Json,
            Ok(other) => bail!("unknown FORMAT '{other}', expected text or json"),
        };

        Ok(Config { workload, format })
    }
}

/// Used when no workload file is given.
fn demo() -> WorkloadFile {
    let processes = [(0, 8, 3), (1, 4, 1), (2, 9, 4), (3, 5, 2)]
        .into_iter()
        .map(|(arrival, burst, priority)| ProcessSpec {
            arrival,
            burst,
            priority,
        })
        .collect();

    WorkloadFile {
        policy: String::from("srtf-preemptive"),
        quantum: Some(2),
        processes,
    }
}
