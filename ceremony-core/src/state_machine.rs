use crate::error::{CoreError, Result};
use ceremony_entities::{ContributionStep, Participant, ParticipantStatus};

/// `ProgressToNextContributionStep`: advance the sub-step machine by
/// exactly one step. Requires `status == Contributing`. Entering
/// `Verifying` stamps `verification_started_at`. No-op-as-error
/// once already `Completed`.
pub fn advance_contribution_step(participant: &mut Participant, now: i64) -> Result<()> {
    if participant.status != ParticipantStatus::Contributing {
        return Err(CoreError::FailedPrecondition(format!(
            "participant {} is not contributing (status = {:?})",
            participant.id, participant.status
        )));
    }
    let next = participant.contribution_step.next().ok_or_else(|| {
        CoreError::FailedPrecondition(format!(
            "participant {} has already completed this contribution step",
            participant.id
        ))
    })?;
    participant.contribution_step = next;
    if next == ContributionStep::Verifying {
        participant.verification_started_at = Some(now);
    }
    participant.last_updated = now;
    Ok(())
}

/// `TIMEDOUT -> EXHUMED`: rehabilitates a participant once their
/// penalty has expired. Resets the sub-step to `Downloading`.
pub fn exhume(participant: &mut Participant, now: i64) {
    participant.status = ParticipantStatus::Exhumed;
    participant.contribution_step = ContributionStep::Downloading;
    participant.last_updated = now;
}

#[cfg(test)]
mod test {
    use super::*;
    use ceremony_base::ParticipantId;
    use test_log::test;

    fn contributing_at(step: ContributionStep) -> Participant {
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        p.status = ParticipantStatus::Contributing;
        p.contribution_step = step;
        p
    }

    #[test]
    fn test_advance_step_requires_contributing_status() {
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        assert!(advance_contribution_step(&mut p, 100).is_err());
    }

    #[test]
    fn test_advance_step_walks_the_full_chain() {
        let mut p = contributing_at(ContributionStep::Downloading);
        advance_contribution_step(&mut p, 1).unwrap();
        assert_eq!(p.contribution_step, ContributionStep::Computing);
        advance_contribution_step(&mut p, 2).unwrap();
        assert_eq!(p.contribution_step, ContributionStep::Uploading);
        advance_contribution_step(&mut p, 3).unwrap();
        assert_eq!(p.contribution_step, ContributionStep::Verifying);
        assert_eq!(p.verification_started_at, Some(3));
        advance_contribution_step(&mut p, 4).unwrap();
        assert_eq!(p.contribution_step, ContributionStep::Completed);
    }

    #[test]
    fn test_advance_step_errors_once_completed() {
        let mut p = contributing_at(ContributionStep::Completed);
        assert!(advance_contribution_step(&mut p, 5).is_err());
    }

    #[test]
    fn test_exhume_resets_step_to_downloading() {
        let mut p = contributing_at(ContributionStep::Uploading);
        p.status = ParticipantStatus::Timedout;
        exhume(&mut p, 42);
        assert_eq!(p.status, ParticipantStatus::Exhumed);
        assert_eq!(p.contribution_step, ContributionStep::Downloading);
        assert_eq!(p.last_updated, 42);
    }
}
