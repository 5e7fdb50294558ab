//! Waiting-queue invariants that must hold across any sequence of
//! evictions: the head of the queue and `currentContributor` never drift
//! apart, and a participant is never the current contributor of more than
//! one circuit at once.

use ceremony_base::ParticipantId;
use ceremony_entities::WaitingQueue;
use proptest::prelude::*;

fn queue_of(ids: &[&str]) -> WaitingQueue {
    let contributors: Vec<ParticipantId> = ids.iter().map(|s| ParticipantId::from(*s)).collect();
    WaitingQueue {
        current_contributor: contributors.first().cloned(),
        contributors,
        completed_contributions: 0,
        failed_contributions: 0,
    }
}

proptest! {
    #[test]
    fn test_queue_rotation_preserves_head_invariant(len in 1usize..8) {
        let ids: Vec<String> = (0..len).map(|i| format!("p{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut queue = queue_of(&id_refs);
        prop_assert!(queue.satisfies_head_invariant());

        while let Some(head) = queue.current_contributor.clone() {
            ceremony_core::rotate_after_eviction(&mut queue, &head).unwrap();
            prop_assert!(queue.satisfies_head_invariant());
        }
        prop_assert!(queue.contributors.is_empty());
    }

    #[test]
    fn test_rotation_on_a_non_head_id_is_rejected_and_leaves_queue_untouched(len in 2usize..8) {
        let ids: Vec<String> = (0..len).map(|i| format!("p{i}")).collect();
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let mut queue = queue_of(&id_refs);
        let before = queue.clone();
        let not_head = ParticipantId::from(ids[1].as_str());

        let result = ceremony_core::rotate_after_eviction(&mut queue, &not_head);
        prop_assert!(result.is_err());
        prop_assert_eq!(queue, before);
    }
}

#[test]
fn test_current_contributor_never_shared_across_independent_circuits() {
    use ceremony_base::{CircuitId, ParticipantId};

    let mut queue_a = queue_of(&["alice", "bob"]);
    let mut queue_b = queue_of(&["carol", "dave"]);
    let circuits = [
        (CircuitId::from("k1"), &mut queue_a),
        (CircuitId::from("k2"), &mut queue_b),
    ];

    let current_contributors: Vec<Option<ParticipantId>> = circuits
        .iter()
        .map(|(_, q)| q.current_contributor.clone())
        .collect();
    let mut seen = std::collections::BTreeSet::new();
    for cur in current_contributors.into_iter().flatten() {
        assert!(seen.insert(cur), "a participant led two circuits at once");
    }

    ceremony_core::rotate_after_eviction(&mut queue_a, &ParticipantId::from("alice")).unwrap();
    assert_ne!(queue_a.current_contributor, queue_b.current_contributor);
}
