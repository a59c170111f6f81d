//! Vacancy Catalog Server
//!
//! Serves the JSON vacancy catalog written by the `vacancies` command over HTTP.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use common::config::Settings;
use common::{CatalogSource, JsonVacancyStorage};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    let settings = Settings::load().context("load settings")?;
    common::logging::init(&settings.telemetry).context("init logging")?;

    let storage = JsonVacancyStorage::new(&settings.storage.path);
    let catalog = storage.read_catalog().context("read catalog")?;
    match catalog.source {
        CatalogSource::File => info!(path = %storage.path().display(), records = catalog.len(), "catalog loaded"),
        CatalogSource::Missing => warn!(path = %storage.path().display(), "no catalog yet, run `vacancies fetch` first"),
        CatalogSource::Unreadable => warn!(path = %storage.path().display(), "catalog unreadable, serving it as empty"),
    }

    let app = server::router(Arc::new(storage));

    let addr = settings.server.addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "vacancy catalog server ready");

    axum::serve(listener, app).await.context("serve http")?;
    Ok(())
}
