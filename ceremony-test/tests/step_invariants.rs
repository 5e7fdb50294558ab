//! The contribution sub-step machine only ever advances along its
//! declared chain, and entering `VERIFYING` always stamps
//! `verificationStartedAt` on that exact transition.

use ceremony_base::ParticipantId;
use ceremony_core::advance_contribution_step;
use ceremony_entities::{ContributionStep, Participant, ParticipantStatus};
use proptest::prelude::*;

const CHAIN: [ContributionStep; 5] = [
    ContributionStep::Downloading,
    ContributionStep::Computing,
    ContributionStep::Uploading,
    ContributionStep::Verifying,
    ContributionStep::Completed,
];

fn contributing_participant() -> Participant {
    let mut p = Participant::new(ParticipantId::from("alice"), 0);
    p.status = ParticipantStatus::Contributing;
    p
}

proptest! {
    #[test]
    fn test_contribution_step_advances_only_in_declared_order(advances in 0usize..6, now in 1i64..1_000_000) {
        let mut p = contributing_participant();
        let mut index = 0usize;

        for _ in 0..advances {
            let before = p.contribution_step;
            match advance_contribution_step(&mut p, now) {
                Ok(()) => {
                    prop_assert_eq!(before, CHAIN[index]);
                    index += 1;
                    prop_assert_eq!(p.contribution_step, CHAIN[index]);
                    if p.contribution_step == ContributionStep::Verifying {
                        prop_assert_eq!(p.verification_started_at, Some(now));
                    }
                }
                Err(_) => {
                    prop_assert_eq!(before, ContributionStep::Completed);
                }
            }
        }
    }
}

#[test]
fn test_verification_started_at_is_stamped_exactly_once_on_entry() {
    let mut p = contributing_participant();
    advance_contribution_step(&mut p, 1).unwrap();
    advance_contribution_step(&mut p, 2).unwrap();
    assert_eq!(p.verification_started_at, None);
    advance_contribution_step(&mut p, 3).unwrap();
    assert_eq!(p.contribution_step, ContributionStep::Verifying);
    assert_eq!(p.verification_started_at, Some(3));

    // A later call while already past Verifying must not touch the stamp.
    advance_contribution_step(&mut p, 99).unwrap();
    assert_eq!(p.contribution_step, ContributionStep::Completed);
    assert_eq!(p.verification_started_at, Some(3));
}
