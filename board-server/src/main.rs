use std::sync::Arc;

use tracing::{error, info, warn};

use board_server::VERSION;
use board_server::config::BoardConfig;
use board_server::refresh::{FullRefresh, LiveRefresh};
use board_server::store::{Changelog, StateStore, ViewCache};
use board_server::tursib::{TursibClient, TursibConfig};
use board_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Configuration comes from the file named by BOARD_CONFIG; anything
    // missing falls back to defaults so the server always starts.
    let config = match std::env::var("BOARD_CONFIG") {
        Ok(path) => match BoardConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                error!(%path, error = %err, "cannot load config, using defaults");
                BoardConfig::default()
            }
        },
        Err(_) => {
            warn!("BOARD_CONFIG not set, using defaults (no stations configured)");
            BoardConfig::default()
        }
    };
    let config = Arc::new(config);

    info!(
        version = VERSION,
        stations = config.stations.len(),
        "board server starting"
    );

    let client = TursibClient::new(TursibConfig::new()).expect("failed to create timetable client");
    let store = StateStore::new();
    let cache = ViewCache::new(&config.cache_path);
    let changelog = Changelog::new(&config.changelog_path, VERSION);

    let full = FullRefresh::new(client, store.clone(), cache, changelog, config.clone());
    let live = LiveRefresh::new(store.clone(), config.clone());

    // Coarse cycle: full timetable rebuild. The first tick fires
    // immediately, so boards are published shortly after startup.
    let full_interval = config.full_refresh_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(full_interval);
        loop {
            interval.tick().await;
            let now = chrono::Local::now().naive_local();
            let reports = full.run(now).await;
            let updated = reports.iter().filter(|r| r.outcome.is_updated()).count();
            info!(updated, total = reports.len(), "full refresh pass done");
        }
    });

    // Fine cycle: countdown and ordering updates of whatever is already
    // published. Skip the immediate first tick; there is nothing to
    // refresh before the first full pass.
    let live_interval = config.live_refresh_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(live_interval);
        interval.tick().await;
        loop {
            interval.tick().await;
            let now = chrono::Local::now().naive_local();
            live.run(now).await;
        }
    });

    let app = create_router(AppState::new(store, config.clone()));

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .expect("failed to bind listen address");
    info!(addr = %config.listen_addr, "serving");
    axum::serve(listener, app).await.expect("server error");
}
