use ceremony_base::{CeremonyId, CircuitId, ParticipantId};
use serde::{Deserialize, Serialize};

/// Circuit.waitingQueue. A per-circuit FIFO of participant ids.
/// Enqueue/dequeue is owned by the scheduler and ceremony-lifecycle;
/// handlers only read it.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct WaitingQueue {
    pub contributors: Vec<ParticipantId>,
    #[serde(rename = "currentContributor")]
    pub current_contributor: Option<ParticipantId>,
    #[serde(rename = "completedContributions")]
    pub completed_contributions: i64,
    #[serde(rename = "failedContributions")]
    pub failed_contributions: i64,
}

impl WaitingQueue {
    /// `currentContributor` is either empty or the id at index 0.
    pub fn satisfies_head_invariant(&self) -> bool {
        match (&self.current_contributor, self.contributors.first()) {
            (None, None) => true,
            (Some(cur), Some(head)) => cur == head,
            _ => false,
        }
    }
}

/// Circuit.avgTimings. A moving average of past full contributions,
/// used by `Dynamic` timeout ceremonies.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AvgTimings {
    #[serde(rename = "fullContribution")]
    pub full_contribution: i64,
}

/// Circuit.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    pub id: CircuitId,
    #[serde(rename = "ceremonyId")]
    pub ceremony_id: CeremonyId,
    #[serde(rename = "waitingQueue")]
    pub waiting_queue: WaitingQueue,
    #[serde(rename = "avgTimings")]
    pub avg_timings: AvgTimings,
    /// Percent tolerance added to the moving average for `Dynamic` ceremonies.
    #[serde(rename = "dynamicThreshold")]
    pub dynamic_threshold: i64,
    /// Minutes from contribution start for `Fixed` ceremonies.
    #[serde(rename = "fixedTimeWindow")]
    pub fixed_time_window: i64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: i64,
}
