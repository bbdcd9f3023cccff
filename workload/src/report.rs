use std::fmt::{self, Display};

use scheduler::{GanttSegment, LogEntry, Process, ReadyQueueLog, SimulationResult};

/// Plain text rendering of a [`SimulationResult`].
///
/// The report has three sections: the merged Gantt timeline, the results
/// table with the averages, and the ready queue log.
pub struct Report<'a>(pub &'a SimulationResult);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;

        writeln!(f, "===== Gantt =====")?;
        write!(f, "{}", Gantt(&result.merged_gantt()))?;
        writeln!(f)?;

        writeln!(f, "===== Processes =====")?;
        writeln!(f, "PID\tAT\tBT\tPRI\tST\tCT\tWT\tTAT")?;
        for process in &result.finished {
            writeln!(f, "{}", Row(process))?;
        }
        writeln!(f, "Average waiting time: {:.2}", result.average_waiting_time())?;
        writeln!(
            f,
            "Average turnaround time: {:.2}",
            result.average_turnaround_time()
        )?;
        writeln!(f)?;

        writeln!(f, "===== Ready Queue =====")?;
        write!(f, "{}", Log(&result.ready_queue_log))
    }
}

/// One line per segment: owner, start, end.
pub struct Gantt<'a>(pub &'a [GanttSegment]);

impl Display for Gantt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.0 {
            writeln!(f, "{}", segment)?;
        }
        Ok(())
    }
}

struct Row<'a>(&'a Process);

impl Display for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        write!(
            f,
            "{}\t{}\t{}\t{}\t",
            p.pid(),
            p.arrival_time(),
            p.burst_time(),
            p.priority()
        )?;
        match p.start_time() {
            Some(start) => write!(f, "{}", start)?,
            None => write!(f, "-")?,
        }
        write!(
            f,
            "\t{}\t{}\t{}",
            p.completion_time(),
            p.waiting_time(),
            p.turnaround_time()
        )
    }
}

/// The ready queue log, one line per decision time.
pub struct Log<'a>(pub &'a ReadyQueueLog);

impl Display for Log<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TIME\tRUNNING\tQUEUE")?;
        for entry in self.0.iter() {
            writeln!(f, "{}", Entry(entry))?;
        }
        Ok(())
    }
}

struct Entry<'a>(&'a LogEntry);

impl Display for Entry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entry = self.0;
        write!(f, "{}\t{}\t[", entry.time, entry.running)?;
        for (index, queued) in entry.queue.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "P{}(rem={}, pri={})",
                queued.pid, queued.remaining_burst_time, queued.priority
            )?;
        }
        write!(f, "]")
    }
}

/// Format a [`SimulationResult`] to a [`String`].
///
/// ## Example
///
/// ```rust
/// use workload::{format_report, ProcessSpec, ProcessTable, SimulationRequest};
///
/// let mut table = ProcessTable::new();
/// table.add(ProcessSpec { arrival: 0, burst: 5, priority: 1 }).unwrap();
/// let result = table.simulate(SimulationRequest::new("fcfs", None).unwrap()).unwrap();
///
/// println!("{}", format_report(&result));
/// ```
pub fn format_report(result: &SimulationResult) -> String {
    Report(result).to_string()
}
