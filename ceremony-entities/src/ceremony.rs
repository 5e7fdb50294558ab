use crate::status::{CeremonyState, CeremonyTimeoutType};
use ceremony_base::CeremonyId;
use serde::{Deserialize, Serialize};

/// Ceremony. Created and transitioned by the external ceremony-lifecycle
/// collaborator; the core only reads it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Ceremony {
    pub id: CeremonyId,
    pub state: CeremonyState,
    #[serde(rename = "startDate")]
    pub start_date: i64,
    #[serde(rename = "endDate")]
    pub end_date: i64,
    #[serde(rename = "timeoutType")]
    pub timeout_type: CeremonyTimeoutType,
    /// Minutes a timed-out participant must wait before retrying.
    pub penalty: i64,
}

impl Ceremony {
    pub fn is_opened(&self) -> bool {
        matches!(self.state, CeremonyState::Opened)
    }
}
