use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::riot::RiotClient;

pub mod handlers;
pub mod routes;

pub async fn start(config: Arc<Config>) -> Result<()> {
    let state = State::new(Arc::clone(&config));

    tracing::info!("listening at {}", config.web.host);
    warp::serve(routes::router(state)).run(config.web.host).await;
    Ok(())
}

pub struct State {
    pub riot: RiotClient,
}

impl State {
    pub fn new(config: Arc<Config>) -> Arc<Self> {
        Arc::new(Self {
            riot: RiotClient::new(config.riot.api_key.clone()),
        })
    }
}
