use std::net::SocketAddr;
use std::sync::Arc;

use common::storage::filesystem::FilesystemMediaStore;
use tracing::{Level, info};

use server::config::AppConfig;
use server::database::init_db;
use server::seed;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = init_db(&config.database.url).await?;
    seed::ensure_admin_user(&db, &config.auth).await?;

    let media = FilesystemMediaStore::new(
        config.storage.media_dir.clone(),
        config.storage.max_upload_size,
    )
    .await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    let state = AppState {
        db,
        config,
        media: Arc::new(media),
    };
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Portfolio API listening at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
