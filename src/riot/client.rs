//! Riot API client
//!
//! Owns the HTTP client, the credential, the response caches and the
//! request scheduler. Every operation follows the same template: serve
//! an unexpired cache hit without touching the scheduler, otherwise
//! build the region-qualified URL, run the call through the scheduler
//! with the credential header attached, classify the response, and
//! write the value through to its cache only on success.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

use crate::riot::cache::{MatchIdHistory, TtlCache};
use crate::riot::error::RiotError;
use crate::riot::limiter::RateLimiter;
use crate::riot::region::Region;

/// Riot credential header
const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";
/// Cached responses are reused for this long after they were fetched.
const CACHE_TTL: Duration = Duration::from_secs(600);
/// Minimum spacing between consecutive upstream call starts.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(50);
/// Largest page the match-v5 id endpoint serves per call.
const MATCH_ID_PAGE: usize = 100;

/// Inbound player identity. Not unique by itself; the tag line
/// disambiguates duplicate game names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerHandle {
    pub game_name: String,
    pub tag_line: String,
}

impl PlayerHandle {
    pub fn new(game_name: impl Into<String>, tag_line: impl Into<String>) -> Self {
        Self {
            game_name: game_name.into(),
            tag_line: tag_line.into(),
        }
    }

    fn cache_key(&self) -> String {
        format!("{}-{}", self.game_name, self.tag_line).to_lowercase()
    }
}

/// Resolved account. The puuid is the stable id every other operation
/// keys on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub puuid: String,
    pub game_name: String,
    pub tag_line: String,
}

#[derive(Debug, Deserialize)]
struct Summoner {
    id: String,
}

pub struct RiotClient {
    http: reqwest::Client,
    api_key: String,
    limiter: RateLimiter,
    accounts: TtlCache<Account>,
    match_ids: TtlCache<MatchIdHistory>,
    match_details: TtlCache<serde_json::Value>,
    standings: TtlCache<serde_json::Value>,
    requests: AtomicU64,
}

impl RiotClient {
    pub fn new(api_key: String) -> Self {
        Self::with_settings(api_key, CACHE_TTL, MIN_REQUEST_INTERVAL)
    }

    /// Constructor with explicit cache TTL and scheduler spacing, so
    /// tests can run isolated instances with small intervals.
    pub fn with_settings(api_key: String, ttl: Duration, min_interval: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            limiter: RateLimiter::new(min_interval),
            accounts: TtlCache::new(ttl),
            match_ids: TtlCache::new(ttl),
            match_details: TtlCache::new(ttl),
            standings: TtlCache::new(ttl),
            requests: AtomicU64::new(0),
        }
    }

    /// Resolve a Riot ID to an account.
    pub async fn account_by_riot_id(
        &self,
        handle: &PlayerHandle,
        region: Region,
    ) -> Result<Account, RiotError> {
        let key = handle.cache_key();
        if let Some(account) = self.accounts.get(&key).await {
            tracing::debug!(handle = %key, "account served from cache");
            return Ok(account);
        }

        let url = format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            region.account_base(),
            urlencoding::encode(&handle.game_name),
            urlencoding::encode(&handle.tag_line),
        );
        let account: Account = self.get_json(&url).await?;

        self.accounts.insert(key, account.clone()).await;
        Ok(account)
    }

    /// Fetch up to `count` recent match ids for a puuid, newest first.
    ///
    /// The endpoint pages at 100 ids per call; pages are fetched until
    /// `count` ids are collected or a short page signals the history is
    /// exhausted. A cached entry is reused only if it was fetched for at
    /// least `count` ids (or exhausted the history); a larger request
    /// refetches and overwrites it.
    pub async fn match_ids_by_puuid(
        &self,
        puuid: &str,
        count: usize,
        region: Region,
    ) -> Result<Vec<String>, RiotError> {
        if let Some(history) = self.match_ids.get(puuid).await {
            if history.covers(count) {
                tracing::debug!(%puuid, "match id history served from cache");
                return Ok(history.ids);
            }
        }

        let mut ids: Vec<String> = Vec::with_capacity(count);
        let mut exhausted = false;
        while ids.len() < count {
            let page_size = MATCH_ID_PAGE.min(count - ids.len());
            let url = format!(
                "{}/lol/match/v5/matches/by-puuid/{}/ids?start={}&count={}",
                region.account_base(),
                urlencoding::encode(puuid),
                ids.len(),
                page_size,
            );
            let page: Vec<String> = self.get_json(&url).await?;
            let short_page = page.len() < page_size;
            ids.extend(page);
            if short_page {
                exhausted = true;
                break;
            }
        }

        self.match_ids
            .insert(
                puuid,
                MatchIdHistory {
                    ids: ids.clone(),
                    requested: count,
                    exhausted,
                },
            )
            .await;
        Ok(ids)
    }

    /// Fetch the full detail blob for one match.
    pub async fn match_by_id(
        &self,
        match_id: &str,
        region: Region,
    ) -> Result<serde_json::Value, RiotError> {
        if let Some(detail) = self.match_details.get(match_id).await {
            tracing::debug!(%match_id, "match detail served from cache");
            return Ok(detail);
        }

        let url = format!(
            "{}/lol/match/v5/matches/{}",
            region.account_base(),
            urlencoding::encode(match_id),
        );
        let detail: serde_json::Value = self.get_json(&url).await?;

        self.match_details.insert(match_id, detail.clone()).await;
        Ok(detail)
    }

    /// Fetch a player's ranked standing (league entries).
    ///
    /// Two sequential upstream calls: summoner by puuid, then entries by
    /// summoner id. Soft-fail policy: any failure is logged and
    /// downgraded to `None` so a standing outage cannot abort an
    /// otherwise successful aggregation.
    pub async fn ranked_standing(&self, puuid: &str, region: Region) -> Option<serde_json::Value> {
        if let Some(standing) = self.standings.get(puuid).await {
            tracing::debug!(%puuid, "ranked standing served from cache");
            return Some(standing);
        }

        match self.fetch_standing(puuid, region).await {
            Ok(standing) => {
                self.standings.insert(puuid, standing.clone()).await;
                Some(standing)
            }
            Err(e) => {
                tracing::warn!(%puuid, error = %e, "ranked standing lookup failed, continuing without it");
                None
            }
        }
    }

    async fn fetch_standing(
        &self,
        puuid: &str,
        region: Region,
    ) -> Result<serde_json::Value, RiotError> {
        let url = format!(
            "{}/lol/summoner/v4/summoners/by-puuid/{}",
            region.platform_base(),
            urlencoding::encode(puuid),
        );
        let summoner: Summoner = self.get_json(&url).await?;

        let url = format!(
            "{}/lol/league/v4/entries/by-summoner/{}",
            region.platform_base(),
            urlencoding::encode(&summoner.id),
        );
        self.get_json(&url).await
    }

    /// Total upstream calls issued by this client.
    pub fn requests_issued(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RiotError> {
        let value = self
            .limiter
            .schedule(async {
                let response = self
                    .http
                    .get(url)
                    .header(RIOT_TOKEN_HEADER, &self.api_key)
                    .send()
                    .await?;

                let status = response.status();
                if !status.is_success() {
                    return Err(RiotError::from_status(status));
                }

                Ok(response.json::<T>().await?)
            })
            .await?;

        let issued = self.requests.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(total_requests = issued, url, "upstream request completed");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_cache_key_is_case_insensitive() {
        let a = PlayerHandle::new("Faker", "KR1");
        let b = PlayerHandle::new("faker", "kr1");
        assert_eq!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), "faker-kr1");
    }

    #[tokio::test]
    async fn request_counter_starts_at_zero() {
        let client = RiotClient::new("RGAPI-test".into());
        assert_eq!(client.requests_issued(), 0);
    }
}
