use crate::config::Config;
use crate::session::SessionManager;
use crate::ws::accept_connection;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;
use tokio::net::TcpListener;

mod api;
mod config;
mod error;
mod game;
mod session;
mod ws;

const PURGE_INTERVAL: Duration = Duration::from_secs(60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::try_init().ok();

    let config = Config::from_env()?;
    let manager: &'static SessionManager = Box::leak(Box::new(SessionManager::new(config.game_ttl)));

    let api_listener = api::listen(config.api_port).await?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(api_listener, api::make_router(manager)).await {
            log::error!("API server stopped: {}", err);
        }
    });

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            manager.purge_games();
        }
    });

    let addr = SocketAddrV4::new(Ipv4Addr::new(127, 0, 0, 1), config.port);
    let listener = TcpListener::bind(addr).await?;
    log::info!("Listening on: {:?}", addr);

    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(accept_connection(stream, manager));
    }
    Ok(())
}
