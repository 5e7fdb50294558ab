use ceremony_base::Result;
use serde::{Deserialize, Serialize};

/// One inbound call: the six authenticated handlers plus the scheduled
/// eviction trigger, encoded as a tagged envelope so a single MessagePack
/// buffer self-describes which operation it carries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase")]
pub enum Request {
    CheckParticipantForCeremony {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
    },
    ProgressToNextContributionStep {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
    },
    TemporaryStoreCurrentContributionComputationTime {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
        #[serde(rename = "contributionComputationTime")]
        contribution_computation_time: i64,
    },
    PermanentlyStoreCurrentContributionTimeAndHash {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
        #[serde(rename = "contributionComputationTime")]
        contribution_computation_time: i64,
        #[serde(rename = "contributionHash")]
        contribution_hash: String,
    },
    TemporaryStoreCurrentContributionMultiPartUploadId {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
        #[serde(rename = "uploadId")]
        upload_id: String,
    },
    TemporaryStoreCurrentContributionUploadedChunkData {
        #[serde(rename = "ceremonyId")]
        ceremony_id: String,
        #[serde(rename = "eTag")]
        e_tag: String,
        #[serde(rename = "partNumber")]
        part_number: i64,
    },
    /// `checkAndRemoveBlockingContributor`, triggered every 60s; no caller
    /// identity attached since it runs on the leader, not on behalf of a
    /// participant.
    CheckAndRemoveBlockingContributor,
}

/// The matching outbound envelope. `Empty` covers the five `void` RPCs;
/// `Bool` covers `CheckParticipantForCeremony`; `Failed` carries one of
/// the five caller-facing error categories by name, so a client doesn't
/// need this crate's error types to decide what happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Response {
    Bool { value: bool },
    Empty,
    Failed { category: String, message: String },
}

pub fn encode_request(req: &Request) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(req)?)
}

pub fn decode_request(buf: &[u8]) -> Result<Request> {
    Ok(rmp_serde::from_slice(buf)?)
}

pub fn encode_response(res: &Response) -> Result<Vec<u8>> {
    Ok(rmp_serde::to_vec_named(res)?)
}

pub fn decode_response(buf: &[u8]) -> Result<Response> {
    Ok(rmp_serde::from_slice(buf)?)
}
