use crate::error::Result;
use ceremony_auth::{AuthContext, Claims};
use ceremony_base::ParticipantId;

/// Authenticates an RPC caller per spec §4.2: rejects with `UNAUTHENTICATED`
/// when the caller id is absent or neither claim is present. This is the
/// only place `CoreError::Unauthenticated` is constructed from an auth
/// rejection, via the dedicated `From<ceremony_auth::AuthError>` conversion
/// rather than the generic infrastructure-error one.
pub fn authenticate_caller(caller_id: Option<ParticipantId>, claims: Claims) -> Result<AuthContext> {
    Ok(ceremony_auth::authenticate(caller_id, claims)?)
}
