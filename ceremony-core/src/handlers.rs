use crate::docs::{load, load_all, load_required, to_value};
use crate::error::{CoreError, Result};
use crate::state_machine;
use ceremony_auth::AuthContext;
use ceremony_base::{CeremonyId, Clock};
use ceremony_entities::{
    Ceremony, Circuit, Contribution, ContributionStep, Participant, ParticipantStatus, Timeout,
    UploadedChunk,
};
use ceremony_store::{Filter, Path, Store};
use tracing::info;

// Every handler shares the preamble from: authenticate (done by the
// caller, which hands us an already-validated `AuthContext`), validate
// inputs, load the ceremony and reject unless OPENED, load the participant
// by caller id. These two helpers factor that preamble out.

fn require_opened_ceremony(store: &dyn Store, ceremony_id: &CeremonyId) -> Result<Ceremony> {
    let ceremony: Ceremony =
        load_required(store, &Path::ceremony(ceremony_id.as_str()), "ceremony")?;
    if !ceremony.is_opened() {
        return Err(CoreError::FailedPrecondition(format!(
            "ceremony {ceremony_id} is not OPENED"
        )));
    }
    Ok(ceremony)
}

fn participant_path(ceremony_id: &CeremonyId, auth: &AuthContext) -> Path {
    Path::participant(ceremony_id.as_str(), auth.caller_id.as_str())
}

/// `|circuits|`, the derived value ceremony completion is measured
/// against. Obtained via a collection-path query, as the contract requires.
fn circuit_count(store: &dyn Store, ceremony_id: &CeremonyId) -> Result<i64> {
    let circuits: Vec<(Path, Circuit)> =
        load_all(store, &Path::circuits(ceremony_id.as_str()), &[])?;
    Ok(circuits.len() as i64)
}

fn require_positive(value: i64, field: &str) -> Result<()> {
    if value <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "{field} must be positive, got {value}"
        )));
    }
    Ok(())
}

/// `CheckParticipantForCeremony`.
pub fn check_participant_for_ceremony(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
) -> Result<bool> {
    require_opened_ceremony(store, ceremony_id)?;
    let now = clock.now_millis();
    let path = participant_path(ceremony_id, auth);
    let existing: Option<Participant> = load(store, &path)?;

    let Some(mut participant) = existing else {
        let fresh = Participant::new(auth.caller_id.clone(), now);
        store.set(&path, to_value(&fresh)?, false)?;
        info!(ceremony_id = %ceremony_id, participant_id = %auth.caller_id, "created new participant");
        return Ok(true);
    };

    let total_circuits = circuit_count(store, ceremony_id)?;
    if participant.status == ParticipantStatus::Done
        && participant.contribution_progress == total_circuits
    {
        return Ok(false);
    }

    if participant.status == ParticipantStatus::Timedout {
        let still_active: Vec<(Path, Timeout)> = load_all(
            store,
            &Path::timeouts(ceremony_id.as_str(), auth.caller_id.as_str()),
            &[Filter::gte("endDate", now)],
        )?;
        return if still_active.is_empty() {
            state_machine::exhume(&mut participant, now);
            store.set(&path, to_value(&participant)?, true)?;
            info!(ceremony_id = %ceremony_id, participant_id = %auth.caller_id, "penalty expired, exhumed");
            Ok(true)
        } else {
            Ok(false)
        };
    }

    Ok(true)
}

/// `ProgressToNextContributionStep`.
pub fn progress_to_next_contribution_step(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
) -> Result<()> {
    require_opened_ceremony(store, ceremony_id)?;
    let path = participant_path(ceremony_id, auth);
    let mut participant: Participant = load_required(store, &path, "participant")?;
    state_machine::advance_contribution_step(&mut participant, clock.now_millis())?;
    store.set(&path, to_value(&participant)?, true)?;
    Ok(())
}

/// `TemporaryStoreCurrentContributionComputationTime`.
pub fn temporary_store_current_contribution_computation_time(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
    contribution_computation_time: i64,
) -> Result<()> {
    require_positive(contribution_computation_time, "contributionComputationTime")?;
    require_opened_ceremony(store, ceremony_id)?;
    let path = participant_path(ceremony_id, auth);
    let mut participant: Participant = load_required(store, &path, "participant")?;
    if participant.contribution_step != ContributionStep::Computing {
        return Err(CoreError::FailedPrecondition(
            "participant is not COMPUTING".to_string(),
        ));
    }
    participant.temp_contribution_data.contribution_computation_time =
        Some(contribution_computation_time);
    participant.last_updated = clock.now_millis();
    store.set(&path, to_value(&participant)?, true)?;
    Ok(())
}

/// `PermanentlyStoreCurrentContributionTimeAndHash`.
///
/// The guard here is worth a second look: requiring `== COMPUTING` means the
/// hash is recorded before verification happens, when semantically it might
/// be expected to gate on `== VERIFYING` or `== COMPLETED`. This
/// implementation keeps the guard as observed (including the
/// coordinator/FINALIZING escape hatch) rather than narrowing it.
pub fn permanently_store_current_contribution_time_and_hash(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
    contribution_computation_time: i64,
    contribution_hash: String,
) -> Result<()> {
    require_positive(contribution_computation_time, "contributionComputationTime")?;
    if contribution_hash.is_empty() {
        return Err(CoreError::InvalidArgument(
            "contributionHash must not be empty".to_string(),
        ));
    }
    require_opened_ceremony(store, ceremony_id)?;
    let path = participant_path(ceremony_id, auth);
    let mut participant: Participant = load_required(store, &path, "participant")?;

    let allowed = participant.contribution_step == ContributionStep::Computing
        || (auth.is_coordinator() && participant.status == ParticipantStatus::Finalizing);
    if !allowed {
        return Err(CoreError::FailedPrecondition(
            "participant is neither COMPUTING nor a FINALIZING coordinator call".to_string(),
        ));
    }

    participant.contributions.push(Contribution {
        hash: contribution_hash,
        computation_time: contribution_computation_time,
    });
    participant.last_updated = clock.now_millis();
    store.set(&path, to_value(&participant)?, true)?;
    Ok(())
}

/// `TemporaryStoreCurrentContributionMultiPartUploadId`.
pub fn temporary_store_current_contribution_multi_part_upload_id(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
    upload_id: String,
) -> Result<()> {
    if upload_id.is_empty() {
        return Err(CoreError::InvalidArgument(
            "uploadId must not be empty".to_string(),
        ));
    }
    require_opened_ceremony(store, ceremony_id)?;
    let path = participant_path(ceremony_id, auth);
    let mut participant: Participant = load_required(store, &path, "participant")?;
    if participant.contribution_step != ContributionStep::Uploading {
        return Err(CoreError::FailedPrecondition(
            "participant is not UPLOADING".to_string(),
        ));
    }
    participant.temp_contribution_data.upload_id = Some(upload_id);
    participant.temp_contribution_data.chunks = Vec::new();
    participant.last_updated = clock.now_millis();
    store.set(&path, to_value(&participant)?, true)?;
    Ok(())
}

/// `TemporaryStoreCurrentContributionUploadedChunkData`.
pub fn temporary_store_current_contribution_uploaded_chunk_data(
    store: &dyn Store,
    clock: &dyn Clock,
    auth: &AuthContext,
    ceremony_id: &CeremonyId,
    e_tag: String,
    part_number: i64,
) -> Result<()> {
    require_positive(part_number, "partNumber")?;
    require_opened_ceremony(store, ceremony_id)?;
    let path = participant_path(ceremony_id, auth);
    let mut participant: Participant = load_required(store, &path, "participant")?;
    if participant.contribution_step != ContributionStep::Uploading {
        return Err(CoreError::FailedPrecondition(
            "participant is not UPLOADING".to_string(),
        ));
    }
    participant
        .temp_contribution_data
        .chunks
        .push(UploadedChunk { e_tag, part_number });
    participant.last_updated = clock.now_millis();
    store.set(&path, to_value(&participant)?, true)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use ceremony_auth::Claims;
    use ceremony_base::{FakeClock, ParticipantId};
    use ceremony_entities::{CeremonyState, CeremonyTimeoutType};
    use ceremony_store::MemStore;
    use test_log::test;

    fn opened_ceremony(id: &str) -> Ceremony {
        Ceremony {
            id: id.into(),
            state: CeremonyState::Opened,
            start_date: 0,
            end_date: 1_000_000,
            timeout_type: CeremonyTimeoutType::Fixed,
            penalty: 10,
        }
    }

    fn auth_for(id: &str) -> AuthContext {
        AuthContext {
            caller_id: ParticipantId::from(id),
            claims: Claims::participant(),
        }
    }

    fn setup(ceremony_id: &str) -> MemStore {
        let store = MemStore::new();
        store
            .set(
                &Path::ceremony(ceremony_id),
                to_value(&opened_ceremony(ceremony_id)).unwrap(),
                false,
            )
            .unwrap();
        store
    }

    #[test]
    fn test_s1_new_participant_is_created_waiting() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let auth = auth_for("alice");
        let result =
            check_participant_for_ceremony(&store, &clock, &auth, &CeremonyId::from("c1"))
                .unwrap();
        assert!(result);
        let p: Participant = load(&store, &Path::participant("c1", "alice"))
            .unwrap()
            .unwrap();
        assert_eq!(p.status, ParticipantStatus::Waiting);
        assert_eq!(p.contribution_progress, 0);
        assert!(p.contributions.is_empty());
    }

    #[test]
    fn test_s2_timed_out_retry_before_penalty_expires_returns_false() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        p.status = ParticipantStatus::Timedout;
        store
            .set(&Path::participant("c1", "alice"), to_value(&p).unwrap(), false)
            .unwrap();
        store
            .set(
                &Path::timeout("c1", "alice", "timeout-1"),
                serde_json::json!({
                    "id": "timeout-1",
                    "ceremonyId": "c1",
                    "participantId": "alice",
                    "type": "BLOCKING_CONTRIBUTION",
                    "startDate": 0,
                    "endDate": 1_010,
                }),
                false,
            )
            .unwrap();

        let auth = auth_for("alice");
        let result =
            check_participant_for_ceremony(&store, &clock, &auth, &CeremonyId::from("c1"))
                .unwrap();
        assert!(!result);
        let p: Participant = load(&store, &Path::participant("c1", "alice"))
            .unwrap()
            .unwrap();
        assert_eq!(p.status, ParticipantStatus::Timedout);
    }

    #[test]
    fn test_s3_timed_out_retry_after_penalty_expires_exhumes() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        p.status = ParticipantStatus::Timedout;
        store
            .set(&Path::participant("c1", "alice"), to_value(&p).unwrap(), false)
            .unwrap();
        store
            .set(
                &Path::timeout("c1", "alice", "timeout-1"),
                serde_json::json!({
                    "id": "timeout-1",
                    "ceremonyId": "c1",
                    "participantId": "alice",
                    "type": "BLOCKING_CONTRIBUTION",
                    "startDate": 0,
                    "endDate": 999,
                }),
                false,
            )
            .unwrap();

        let auth = auth_for("alice");
        let result =
            check_participant_for_ceremony(&store, &clock, &auth, &CeremonyId::from("c1"))
                .unwrap();
        assert!(result);
        let p: Participant = load(&store, &Path::participant("c1", "alice"))
            .unwrap()
            .unwrap();
        assert_eq!(p.status, ParticipantStatus::Exhumed);
        assert_eq!(p.contribution_step, ContributionStep::Downloading);
    }

    #[test]
    fn test_s7_chunk_append_preserves_prior_chunks() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        p.status = ParticipantStatus::Contributing;
        p.contribution_step = ContributionStep::Uploading;
        p.temp_contribution_data.chunks = vec![UploadedChunk {
            e_tag: "a".into(),
            part_number: 1,
        }];
        store
            .set(&Path::participant("c1", "alice"), to_value(&p).unwrap(), false)
            .unwrap();

        let auth = auth_for("alice");
        temporary_store_current_contribution_uploaded_chunk_data(
            &store,
            &clock,
            &auth,
            &CeremonyId::from("c1"),
            "b".into(),
            2,
        )
        .unwrap();

        let p: Participant = load(&store, &Path::participant("c1", "alice"))
            .unwrap()
            .unwrap();
        assert_eq!(
            p.temp_contribution_data.chunks,
            vec![
                UploadedChunk { e_tag: "a".into(), part_number: 1 },
                UploadedChunk { e_tag: "b".into(), part_number: 2 },
            ]
        );
    }

    #[test]
    fn test_progress_rejects_non_contributing_participant() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let p = Participant::new(ParticipantId::from("alice"), 0);
        store
            .set(&Path::participant("c1", "alice"), to_value(&p).unwrap(), false)
            .unwrap();
        let auth = auth_for("alice");
        let result =
            progress_to_next_contribution_step(&store, &clock, &auth, &CeremonyId::from("c1"));
        assert!(result.is_err());
    }

    #[test]
    fn test_permanently_store_hash_rejects_wrong_step() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let mut p = Participant::new(ParticipantId::from("alice"), 0);
        p.status = ParticipantStatus::Contributing;
        p.contribution_step = ContributionStep::Uploading;
        store
            .set(&Path::participant("c1", "alice"), to_value(&p).unwrap(), false)
            .unwrap();
        let auth = auth_for("alice");
        let result = permanently_store_current_contribution_time_and_hash(
            &store,
            &clock,
            &auth,
            &CeremonyId::from("c1"),
            100,
            "deadbeef".into(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_non_positive_numeric_arguments() {
        let store = setup("c1");
        let clock = FakeClock::new(1_000);
        let auth = auth_for("alice");
        let result = temporary_store_current_contribution_computation_time(
            &store,
            &clock,
            &auth,
            &CeremonyId::from("c1"),
            0,
        );
        assert!(matches!(result, Err(CoreError::InvalidArgument(_))));
    }
}
