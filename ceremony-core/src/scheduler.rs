use crate::config::VERIFICATION_WINDOW_MILLIS;
use crate::docs::{load_all, load_required, to_value};
use crate::error::Result;
use crate::queue::rotate_after_eviction;
use ceremony_base::{Clock, IdSource, TimeoutId};
use ceremony_entities::{
    Ceremony, CeremonyTimeoutType, Circuit, ContributionStep, Participant, ParticipantStatus,
    Timeout, TimeoutKind,
};
use ceremony_store::{Batch, Filter, Path, Store};
use tracing::warn;

/// One run of the eviction loop: scans every OPENED ceremony whose
/// `endDate` has not yet passed and evicts any circuit's current
/// contributor past their deadline. Scheduler errors for a single
/// circuit are logged and do not abort the scan; the next tick retries
/// whatever that circuit's predicate still holds.
pub fn run_eviction_tick(store: &dyn Store, clock: &dyn Clock, id_source: &dyn IdSource) -> Result<()> {
    let now = clock.now_millis();
    let ceremonies: Vec<(Path, Ceremony)> = load_all(
        store,
        &Path::ceremonies(),
        &[
            Filter::eq("state", "OPENED"),
            Filter::gte("endDate", now),
        ],
    )?;

    for (_, ceremony) in ceremonies {
        let circuits: Vec<(Path, Circuit)> =
            load_all(store, &Path::circuits(ceremony.id.as_str()), &[])?;
        for (_, circuit) in circuits {
            if let Err(e) = evict_if_blocking(store, clock, id_source, &ceremony, &circuit, now) {
                warn!(
                    ceremony_id = %ceremony.id,
                    circuit_id = %circuit.id,
                    error = %e,
                    "eviction check failed for circuit"
                );
            }
        }
    }
    Ok(())
}

/// The deadline classification. Returns `Ok(None)` when no eviction is
/// due, `Err` when the current step requires a timestamp the
/// participant doc doesn't have (logged by the caller as a warning,
/// not a hard failure).
fn classify(
    ceremony: &Ceremony,
    circuit: &Circuit,
    participant: &Participant,
    now: i64,
) -> std::result::Result<Option<TimeoutKind>, String> {
    match participant.contribution_step {
        ContributionStep::Downloading | ContributionStep::Computing | ContributionStep::Uploading => {
            let Some(started) = participant.contribution_started_at else {
                return Err("participant has no contributionStartedAt".to_string());
            };
            let deadline = match ceremony.timeout_type {
                CeremonyTimeoutType::Dynamic => {
                    let avg = circuit.avg_timings.full_contribution;
                    started + avg + avg * circuit.dynamic_threshold / 100
                }
                CeremonyTimeoutType::Fixed => started + circuit.fixed_time_window * 60_000,
            };
            Ok((deadline < now).then_some(TimeoutKind::BlockingContribution))
        }
        ContributionStep::Verifying => {
            let Some(started) = participant.verification_started_at else {
                return Err("participant has no verificationStartedAt".to_string());
            };
            let deadline = started + VERIFICATION_WINDOW_MILLIS;
            Ok((deadline > 0 && deadline < now).then_some(TimeoutKind::BlockingCloudFunction))
        }
        ContributionStep::Completed => Ok(None),
    }
}

fn evict_if_blocking(
    store: &dyn Store,
    clock: &dyn Clock,
    id_source: &dyn IdSource,
    ceremony: &Ceremony,
    circuit: &Circuit,
    now: i64,
) -> Result<()> {
    let Some(current) = circuit.waiting_queue.current_contributor.clone() else {
        return Ok(());
    };
    if ceremony.timeout_type == CeremonyTimeoutType::Dynamic
        && circuit.avg_timings.full_contribution == 0
        && circuit.waiting_queue.completed_contributions == 0
    {
        return Ok(());
    }

    let participant_path = Path::participant(ceremony.id.as_str(), current.as_str());
    let mut participant: Participant = load_required(store, &participant_path, "participant")?;

    let kind = match classify(ceremony, circuit, &participant, now) {
        Ok(Some(kind)) => kind,
        Ok(None) => return Ok(()),
        Err(msg) => {
            warn!(participant_id = %current, "{msg}");
            return Ok(());
        }
    };

    let mut queue = circuit.waiting_queue.clone();
    let new_head = rotate_after_eviction(&mut queue, &current)?;

    let mut batch = Batch::new();
    if let Some(new_head_id) = &new_head {
        let new_head_path = Path::participant(ceremony.id.as_str(), new_head_id.as_str());
        let mut new_head_participant: Participant =
            load_required(store, &new_head_path, "participant")?;
        new_head_participant.status = ParticipantStatus::Waiting;
        new_head_participant.last_updated = now;
        batch = batch.set(new_head_path, to_value(&new_head_participant)?, true);
    }

    let mut updated_circuit = circuit.clone();
    updated_circuit.waiting_queue = queue;
    updated_circuit.last_updated = now;
    batch = batch.set(
        Path::circuit(ceremony.id.as_str(), circuit.id.as_str()),
        to_value(&updated_circuit)?,
        true,
    );

    participant.status = ParticipantStatus::Timedout;
    participant.last_updated = now;
    batch = batch.set(participant_path.clone(), to_value(&participant)?, true);

    let timeout = Timeout {
        id: TimeoutId::from(id_source.next_id()),
        ceremony_id: ceremony.id.clone(),
        participant_id: current.clone(),
        kind,
        start_date: now,
        end_date: now + ceremony.penalty * 60_000,
    };
    let timeout_path = Path::timeout(ceremony.id.as_str(), current.as_str(), timeout.id.as_str());
    batch = batch.create_if_absent(timeout_path, to_value(&timeout)?);

    store.commit_batch(batch)?;
    Ok(())
}
