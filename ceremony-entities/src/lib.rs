// The persisted data model: Ceremony, Circuit, Participant and
// Timeout, plus the enums that drive the participant and contribution-step
// state machines. Every type here is a tagged record rather than an open
// property bag; unknown fields simply aren't modeled.

mod ceremony;
mod circuit;
mod participant;
mod status;
mod timeout;

pub use ceremony::Ceremony;
pub use circuit::{AvgTimings, Circuit, WaitingQueue};
pub use participant::{Contribution, Participant, TempContributionData, UploadedChunk};
pub use status::{
    CeremonyState, CeremonyTimeoutType, ContributionStep, ParticipantStatus, TimeoutKind,
};
pub use timeout::Timeout;
