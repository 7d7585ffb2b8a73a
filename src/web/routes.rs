use std::sync::Arc;

use serde::Deserialize;
use warp::{filters::BoxedFilter, Filter, Reply};

use super::handlers;
use super::State;

#[derive(Debug, Deserialize)]
pub struct DuoQuery {
    pub region: String,
}

pub fn router(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET"]);

    health()
        .or(duo(Arc::clone(&state)))
        .or(duo_legacy(state))
        .with(cors)
        .boxed()
}

fn health() -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("api")
        .and(warp::path("health"))
        .and(warp::path::end())
        .map(|| warp::reply::json(&serde_json::json!({ "status": "ok" })));
    warp::get().and(route).boxed()
}

fn duo(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("api")
        .and(warp::path("duo"))
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::query::<DuoQuery>())
        .and_then(move |name_a, tag_a, name_b, tag_b, query: DuoQuery| {
            handlers::duo_handler(Arc::clone(&state), name_a, tag_a, name_b, tag_b, query)
        });
    warp::get().and(route).boxed()
}

// Path kept for clients of the original service.
fn duo_legacy(state: Arc<State>) -> BoxedFilter<(impl Reply,)> {
    let route = warp::path("summonerAndMatchData")
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::query::<DuoQuery>())
        .and_then(move |name_a, tag_a, name_b, tag_b, query: DuoQuery| {
            handlers::duo_handler(Arc::clone(&state), name_a, tag_a, name_b, tag_b, query)
        });
    warp::get().and(route).boxed()
}
