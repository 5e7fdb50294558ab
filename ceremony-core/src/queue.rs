use crate::error::{CoreError, Result};
use ceremony_base::ParticipantId;
use ceremony_entities::WaitingQueue;

/// Pop the current head of the queue on eviction and promote the new head
/// (if any) to `current_contributor`. Pops exactly the head element and
/// requires that it equals `evicted`, rejecting the rotation otherwise
/// rather than silently desynchronizing the queue.
pub fn rotate_after_eviction(
    queue: &mut WaitingQueue,
    evicted: &ParticipantId,
) -> Result<Option<ParticipantId>> {
    match queue.contributors.first() {
        Some(head) if head == evicted => {}
        Some(other) => {
            return Err(CoreError::FailedPrecondition(format!(
                "queue head {other} does not match evicted contributor {evicted}"
            )));
        }
        None => {
            return Err(CoreError::FailedPrecondition(
                "cannot evict from an empty queue".to_string(),
            ));
        }
    }
    queue.contributors.remove(0);
    queue.failed_contributions += 1;
    let new_head = queue.contributors.first().cloned();
    queue.current_contributor = new_head.clone();
    Ok(new_head)
}
