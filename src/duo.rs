//! Per-request orchestration: resolve both players, correlate their
//! histories, enrich the overlap.

use serde::Serialize;
use thiserror::Error;

use crate::correlate;
use crate::riot::{Account, PlayerHandle, Region, RiotClient, RiotError};

/// How far back each player's history is searched.
const MATCH_HISTORY_DEPTH: usize = 200;

#[derive(Error, Debug)]
pub enum DuoError {
    #[error("unknown region code: {0}")]
    UnknownRegion(String),

    /// Legitimate empty outcome, not a fault: the two players have no
    /// match in common.
    #[error("no shared matches")]
    NoSharedMatches,

    #[error(transparent)]
    Riot(#[from] RiotError),
}

/// Assembled response for one duo lookup. `match_details` is aligned
/// index-for-index with `common_match_ids`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DuoReport {
    pub standing: Option<serde_json::Value>,
    pub account_a: Account,
    pub account_b: Account,
    pub common_match_ids: Vec<String>,
    pub match_details: Vec<serde_json::Value>,
}

/// Resolve both handles, fetch both histories, intersect, then fetch
/// detail for every shared match plus the second player's standing.
///
/// Account resolution, the two history fetches, and the detail fetches
/// are issued concurrently; the client's scheduler serializes the
/// actual upstream calls. A failure in any step aborts the request,
/// except the standing lookup, which soft-fails to `None`.
pub async fn find_duo(
    riot: &RiotClient,
    handle_a: &PlayerHandle,
    handle_b: &PlayerHandle,
    region_code: &str,
) -> Result<DuoReport, DuoError> {
    let region = Region::from_code(region_code)
        .ok_or_else(|| DuoError::UnknownRegion(region_code.to_string()))?;

    let (account_a, account_b) = tokio::try_join!(
        riot.account_by_riot_id(handle_a, region),
        riot.account_by_riot_id(handle_b, region),
    )?;
    tracing::debug!(
        puuid_a = %account_a.puuid,
        puuid_b = %account_b.puuid,
        "resolved both accounts"
    );

    let (ids_a, ids_b) = tokio::try_join!(
        riot.match_ids_by_puuid(&account_a.puuid, MATCH_HISTORY_DEPTH, region),
        riot.match_ids_by_puuid(&account_b.puuid, MATCH_HISTORY_DEPTH, region),
    )?;

    let common_match_ids = correlate::common_matches(&ids_a, &ids_b);
    tracing::info!(
        history_a = ids_a.len(),
        history_b = ids_b.len(),
        common = common_match_ids.len(),
        "correlated match histories"
    );
    if common_match_ids.is_empty() {
        return Err(DuoError::NoSharedMatches);
    }

    let details = futures_util::future::try_join_all(
        common_match_ids.iter().map(|id| riot.match_by_id(id, region)),
    );
    let standing = riot.ranked_standing(&account_b.puuid, region);
    let (details, standing) = tokio::join!(details, standing);
    let match_details = details?;

    Ok(DuoReport {
        standing,
        account_a,
        account_b,
        common_match_ids,
        match_details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_duo_rejects_unknown_region() {
        let riot = RiotClient::new("RGAPI-test".into());
        let a = PlayerHandle::new("PlayerOne", "EUW");
        let b = PlayerHandle::new("PlayerTwo", "EUW");

        let err = find_duo(&riot, &a, &b, "nowhere").await.unwrap_err();
        assert!(matches!(err, DuoError::UnknownRegion(code) if code == "nowhere"));
        // Fail-closed validation happens before any call is issued.
        assert_eq!(riot.requests_issued(), 0);
    }
}
