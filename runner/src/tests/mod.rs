use std::env;
use std::fs;

use scheduler::SimulationResult;
use workload::{format_report, ProcessSpec, ProcessTable, SimulationRequest};

mod round_robin;

fn write_output(folder: &str, name: &str, output: &str) {
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(format!("../outputs/{folder}/{name}.log"), output).unwrap();
}

fn read_output(folder: &str, name: &str) -> String {
    fs::read_to_string(format!("../outputs/{folder}/{name}.log")).unwrap()
}

/// Compares the report with the stored one, or stores it when
/// `WRITE_OUTPUT` is set.
fn run(folder: &str, name: &str, result: &SimulationResult) {
    let output = format_report(result);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_output(folder, name, &output);
    } else {
        let reference = read_output(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

/// Runs `policy` over `(arrival, burst, priority)` triples, PIDs 1, 2, ...
fn simulate(policy: &str, quantum: Option<i64>, processes: &[(i64, i64, i64)]) -> SimulationResult {
    let specs: Vec<ProcessSpec> = processes
        .iter()
        .map(|&(arrival, burst, priority)| ProcessSpec {
            arrival,
            burst,
            priority,
        })
        .collect();
    let table = ProcessTable::from_specs(&specs).unwrap();
    let request = SimulationRequest::new(policy, quantum).unwrap();
    table.simulate(request).unwrap()
}

/// The merged timeline as `(owner, start, end)`.
fn timeline(result: &SimulationResult) -> Vec<(String, usize, usize)> {
    result
        .merged_gantt()
        .iter()
        .map(|segment| (segment.owner.to_string(), segment.start, segment.end))
        .collect()
}

/// `(pid, completion, waiting, turnaround)` for every process.
fn metrics(result: &SimulationResult) -> Vec<(usize, usize, usize, usize)> {
    result
        .finished
        .iter()
        .map(|p| {
            (
                p.pid().get(),
                p.completion_time(),
                p.waiting_time(),
                p.turnaround_time(),
            )
        })
        .collect()
}

fn owner(pid: &str, start: usize, end: usize) -> (String, usize, usize) {
    (pid.to_string(), start, end)
}
