use crate::status::{ContributionStep, ParticipantStatus};
use ceremony_base::ParticipantId;
use serde::{Deserialize, Serialize};

/// Participant.contributions[] entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub hash: String,
    #[serde(rename = "computationTime")]
    pub computation_time: i64,
}

/// Participant.tempContributionData.chunks[] entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UploadedChunk {
    #[serde(rename = "ETag")]
    pub e_tag: String,
    #[serde(rename = "PartNumber")]
    pub part_number: i64,
}

/// Participant.tempContributionData. Scratch space for the current
/// in-flight contribution; cleared implicitly by being overwritten on the
/// next contribution rather than explicitly zeroed between circuits.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TempContributionData {
    #[serde(rename = "contributionComputationTime")]
    pub contribution_computation_time: Option<i64>,
    #[serde(rename = "uploadId")]
    pub upload_id: Option<String>,
    pub chunks: Vec<UploadedChunk>,
}

/// Participant.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub status: ParticipantStatus,
    #[serde(rename = "contributionProgress")]
    pub contribution_progress: i64,
    #[serde(rename = "contributionStep")]
    pub contribution_step: ContributionStep,
    pub contributions: Vec<Contribution>,
    #[serde(rename = "tempContributionData", default)]
    pub temp_contribution_data: TempContributionData,
    #[serde(rename = "contributionStartedAt")]
    pub contribution_started_at: Option<i64>,
    #[serde(rename = "verificationStartedAt")]
    pub verification_started_at: Option<i64>,
    #[serde(rename = "lastUpdated")]
    pub last_updated: i64,
}

impl Participant {
    /// A freshly created participant.
    pub fn new(id: ParticipantId, now: i64) -> Self {
        Participant {
            id,
            status: ParticipantStatus::Waiting,
            contribution_progress: 0,
            contribution_step: ContributionStep::Downloading,
            contributions: Vec::new(),
            temp_contribution_data: TempContributionData::default(),
            contribution_started_at: None,
            verification_started_at: None,
            last_updated: now,
        }
    }

    /// `contributions[].length` should equal the number of fully completed
    /// circuits for this participant. `contribution_progress` only
    /// advances once a circuit's `COMPLETED` step is reached, so it
    /// can never trail the recorded contribution count.
    pub fn satisfies_contribution_count_invariant(&self) -> bool {
        self.contributions.len() as i64 <= self.contribution_progress
    }
}
