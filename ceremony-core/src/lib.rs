mod auth;
mod config;
mod docs;
mod error;
mod handlers;
mod queue;
mod scheduler;
mod state_machine;

pub use auth::authenticate_caller;
pub use config::{SchedulerConfig, VERIFICATION_WINDOW_MILLIS};
pub use error::{CoreError, Result};
pub use handlers::{
    check_participant_for_ceremony, permanently_store_current_contribution_time_and_hash,
    progress_to_next_contribution_step, temporary_store_current_contribution_computation_time,
    temporary_store_current_contribution_multi_part_upload_id,
    temporary_store_current_contribution_uploaded_chunk_data,
};
pub use queue::rotate_after_eviction;
pub use scheduler::run_eviction_tick;
pub use state_machine::{advance_contribution_step, exhume};
