use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub web: Web,
    pub riot: Riot,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Web {
    pub host: SocketAddr,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Riot {
    pub api_key: String,
}
