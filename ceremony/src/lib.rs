//! Ties the call handlers in `ceremony_core` to the wire envelope in
//! `ceremony_rpc`: given a decoded `Request` and a raw caller identity /
//! claim set, `dispatch` authenticates the caller, invokes the matching
//! handler, and folds its outcome (or its `CoreError`) into a `Response`.

use ceremony_auth::Claims;
use ceremony_base::{CeremonyId, Clock, IdSource, ParticipantId};
use ceremony_core::{CoreError, SchedulerConfig};
use ceremony_rpc::{Request, Response};
use ceremony_store::Store;
use std::time::Duration;
use tracing::warn;

/// One call, end to end. `CheckAndRemoveBlockingContributor` is the
/// scheduled eviction tick, not an authenticated RPC (spec §6: "no input"),
/// so it runs on the leader's own authority before any caller is
/// authenticated; every other variant must authenticate first per §4.2 —
/// no handler below this point ever runs against an unauthenticated caller.
pub fn dispatch(
    store: &dyn Store,
    clock: &dyn Clock,
    id_source: &dyn IdSource,
    caller_id: Option<ParticipantId>,
    claims: Claims,
    request: Request,
) -> Response {
    if let Request::CheckAndRemoveBlockingContributor = request {
        return ceremony_core::run_eviction_tick(store, clock, id_source)
            .map(|()| Response::Empty)
            .unwrap_or_else(to_failed_response);
    }

    let auth = match ceremony_core::authenticate_caller(caller_id, claims) {
        Ok(auth) => auth,
        Err(e) => return to_failed_response(e),
    };
    let auth = &auth;

    let result = match request {
        Request::CheckParticipantForCeremony { ceremony_id } => {
            ceremony_core::check_participant_for_ceremony(
                store,
                clock,
                auth,
                &CeremonyId::from(ceremony_id),
            )
            .map(|value| Response::Bool { value })
        }
        Request::ProgressToNextContributionStep { ceremony_id } => {
            ceremony_core::progress_to_next_contribution_step(
                store,
                clock,
                auth,
                &CeremonyId::from(ceremony_id),
            )
            .map(|()| Response::Empty)
        }
        Request::TemporaryStoreCurrentContributionComputationTime {
            ceremony_id,
            contribution_computation_time,
        } => ceremony_core::temporary_store_current_contribution_computation_time(
            store,
            clock,
            auth,
            &CeremonyId::from(ceremony_id),
            contribution_computation_time,
        )
        .map(|()| Response::Empty),
        Request::PermanentlyStoreCurrentContributionTimeAndHash {
            ceremony_id,
            contribution_computation_time,
            contribution_hash,
        } => ceremony_core::permanently_store_current_contribution_time_and_hash(
            store,
            clock,
            auth,
            &CeremonyId::from(ceremony_id),
            contribution_computation_time,
            contribution_hash,
        )
        .map(|()| Response::Empty),
        Request::TemporaryStoreCurrentContributionMultiPartUploadId {
            ceremony_id,
            upload_id,
        } => ceremony_core::temporary_store_current_contribution_multi_part_upload_id(
            store,
            clock,
            auth,
            &CeremonyId::from(ceremony_id),
            upload_id,
        )
        .map(|()| Response::Empty),
        Request::TemporaryStoreCurrentContributionUploadedChunkData {
            ceremony_id,
            e_tag,
            part_number,
        } => ceremony_core::temporary_store_current_contribution_uploaded_chunk_data(
            store,
            clock,
            auth,
            &CeremonyId::from(ceremony_id),
            e_tag,
            part_number,
        )
        .map(|()| Response::Empty),
        Request::CheckAndRemoveBlockingContributor => {
            unreachable!("handled above before authentication")
        }
    };

    result.unwrap_or_else(to_failed_response)
}

fn to_failed_response(err: CoreError) -> Response {
    Response::Failed {
        category: category_of(&err).to_string(),
        message: err.to_string(),
    }
}

/// The thin loop driver around `ceremony_core::run_eviction_tick`: leader
/// election and fencing are an external concern, so this just sleeps and
/// ticks forever on whichever process calls it. A tick failure is logged
/// and does not stop the loop.
pub fn run_scheduler_loop(
    store: &dyn Store,
    clock: &dyn Clock,
    id_source: &dyn IdSource,
    config: SchedulerConfig,
) -> ! {
    loop {
        if let Err(e) = ceremony_core::run_eviction_tick(store, clock, id_source) {
            warn!(error = %e, "eviction tick failed");
        }
        std::thread::sleep(Duration::from_secs(config.tick_interval_secs));
    }
}

fn category_of(err: &CoreError) -> &'static str {
    match err {
        CoreError::Unauthenticated(_) => "UNAUTHENTICATED",
        CoreError::InvalidArgument(_) => "INVALID_ARGUMENT",
        CoreError::FailedPrecondition(_) => "FAILED_PRECONDITION",
        CoreError::NotFound(_) => "NOT_FOUND",
        CoreError::Internal(_) => "INTERNAL",
    }
}
