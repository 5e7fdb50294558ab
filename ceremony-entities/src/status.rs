use serde::{Deserialize, Serialize};

/// Ceremony.state. Scheduling and transitions between these are owned
/// by the external ceremony-lifecycle collaborator; the core only reads
/// `OPENED` as its admission gate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CeremonyState {
    Scheduled,
    Opened,
    Paused,
    Closed,
    Finalized,
}

/// Whether a circuit's contribution deadline is a moving average
/// (`Dynamic`) or a fixed wall-clock window (`Fixed`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CeremonyTimeoutType {
    Dynamic,
    Fixed,
}

/// The participant lifecycle.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantStatus {
    Waiting,
    Ready,
    Contributing,
    Done,
    Timedout,
    Exhumed,
    Finalizing,
}

/// The per-contribution sub-step machine, valid only while
/// `status == Contributing`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContributionStep {
    Downloading,
    Computing,
    Uploading,
    Verifying,
    Completed,
}

impl ContributionStep {
    /// The step immediately after this one along the monotonic chain,
    /// or `None` if already `Completed`.
    pub fn next(self) -> Option<ContributionStep> {
        use ContributionStep::*;
        match self {
            Downloading => Some(Computing),
            Computing => Some(Uploading),
            Uploading => Some(Verifying),
            Verifying => Some(Completed),
            Completed => None,
        }
    }
}

/// Timeout.type, the reason a contributor was evicted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeoutKind {
    BlockingContribution,
    BlockingCloudFunction,
}
