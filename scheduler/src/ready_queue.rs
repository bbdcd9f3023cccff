use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{Owner, Pid, Process};

/// A waiting process as seen by a ready queue snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedProcess {
    pub pid: Pid,
    pub remaining_burst_time: usize,
    pub priority: usize,
}

impl From<&Process> for QueuedProcess {
    fn from(process: &Process) -> Self {
        QueuedProcess {
            pid: process.pid(),
            remaining_burst_time: process.remaining_burst_time(),
            priority: process.priority(),
        }
    }
}

/// The ready queue and the running process at one decision time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub time: usize,
    /// Waiting processes, head first.
    pub queue: Vec<QueuedProcess>,
    pub running: Owner,
}

/// Audit trail of the ready queue, one entry per distinct decision time.
///
/// The log only observes a run, engines never read it back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadyQueueLog {
    entries: Vec<LogEntry>,
}

impl ReadyQueueLog {
    pub fn new() -> Self {
        ReadyQueueLog::default()
    }

    /// Records the queue and the running process at `time`.
    ///
    /// If the last entry already has this `time`, nothing is appended. The
    /// last entry is only amended when it recorded an idle CPU and a process
    /// is running now.
    pub fn record<'a, I>(&mut self, time: usize, queue: I, running: Option<&Process>)
    where
        I: IntoIterator<Item = &'a Process>,
    {
        let running = running.map_or(Owner::Idle, |process| Owner::Process(process.pid()));

        if let Some(last) = self.entries.last_mut() {
            if last.time == time {
                if last.running == Owner::Idle && running != Owner::Idle {
                    trace!(time, %running, "idle snapshot resolved");
                    last.running = running;
                }
                return;
            }
        }

        let queue: Vec<QueuedProcess> = queue.into_iter().map(QueuedProcess::from).collect();
        trace!(time, %running, waiting = queue.len(), "ready queue snapshot");
        self.entries.push(LogEntry {
            time,
            queue,
            running,
        });
    }

    /// Records an empty queue and an idle CPU.
    pub fn record_idle(&mut self, time: usize) {
        self.record(time, std::iter::empty(), None);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
