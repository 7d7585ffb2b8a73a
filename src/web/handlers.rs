use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::Reply;

use crate::duo::{self, DuoError};
use crate::riot::{PlayerHandle, RiotError};
use super::routes::DuoQuery;
use super::State;

pub async fn duo_handler(
    state: Arc<State>,
    name_a: String,
    tag_a: String,
    name_b: String,
    tag_b: String,
    query: DuoQuery,
) -> std::result::Result<impl Reply, Infallible> {
    // Path params arrive percent-encoded; Riot IDs may contain spaces.
    let decoded = (
        urlencoding::decode(&name_a),
        urlencoding::decode(&tag_a),
        urlencoding::decode(&name_b),
        urlencoding::decode(&tag_b),
    );
    let (name_a, tag_a, name_b, tag_b) = match decoded {
        (Ok(a), Ok(b), Ok(c), Ok(d)) => {
            (a.into_owned(), b.into_owned(), c.into_owned(), d.into_owned())
        }
        _ => {
            return Ok(error_reply(
                StatusCode::BAD_REQUEST,
                "invalid percent-encoding in path",
            ));
        }
    };

    let handle_a = PlayerHandle::new(name_a, tag_a);
    let handle_b = PlayerHandle::new(name_b, tag_b);

    match duo::find_duo(&state.riot, &handle_a, &handle_b, &query.region).await {
        Ok(report) => {
            tracing::debug!(
                upstream_requests = state.riot.requests_issued(),
                "duo lookup complete"
            );
            Ok(warp::reply::with_status(warp::reply::json(&report), StatusCode::OK).into_response())
        }
        Err(e) => {
            tracing::error!(
                region = %query.region,
                player_a = %handle_a.game_name,
                player_b = %handle_b.game_name,
                error = %e,
                "duo lookup failed"
            );
            Ok(error_reply(error_status(&e), &e.to_string()))
        }
    }
}

/// Status mapping. The legitimate empty outcome and unknown inputs get
/// their own statuses so clients can tell them from upstream faults.
fn error_status(e: &DuoError) -> StatusCode {
    match e {
        DuoError::UnknownRegion(_) => StatusCode::BAD_REQUEST,
        DuoError::NoSharedMatches => StatusCode::NOT_FOUND,
        DuoError::Riot(RiotError::NotFound) => StatusCode::NOT_FOUND,
        DuoError::Riot(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_reply(status: StatusCode, message: &str) -> warp::reply::Response {
    warp::reply::with_status(
        warp::reply::json(&serde_json::json!({ "error": message })),
        status,
    )
    .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_outcomes_map_to_distinct_statuses() {
        assert_eq!(
            error_status(&DuoError::UnknownRegion("xx".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_status(&DuoError::NoSharedMatches),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_status(&DuoError::Riot(RiotError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_faults_map_to_server_error() {
        assert_eq!(
            error_status(&DuoError::Riot(RiotError::Auth)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&DuoError::Riot(RiotError::RateLimited)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            error_status(&DuoError::Riot(RiotError::Upstream { status: 503 })),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
