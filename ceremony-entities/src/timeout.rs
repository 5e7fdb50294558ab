use crate::status::TimeoutKind;
use ceremony_base::{CeremonyId, ParticipantId, TimeoutId};
use serde::{Deserialize, Serialize};

/// Timeout. Created only by the eviction scheduler; never mutated
/// afterward, only expires by wall-clock comparison against `end_date`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Timeout {
    pub id: TimeoutId,
    #[serde(rename = "ceremonyId")]
    pub ceremony_id: CeremonyId,
    #[serde(rename = "participantId")]
    pub participant_id: ParticipantId,
    #[serde(rename = "type")]
    pub kind: TimeoutKind,
    #[serde(rename = "startDate")]
    pub start_date: i64,
    #[serde(rename = "endDate")]
    pub end_date: i64,
}

