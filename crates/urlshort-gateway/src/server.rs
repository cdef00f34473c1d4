use std::path::Path;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use urlshort_core::{Mapping, RecordFormat};
use urlshort_redirector::{Chain, DefaultHandler, SharedHandler};
use urlshort_storage::{StoreConfig, UrlStore};

use crate::app::App;
use crate::cli::CLI;
use crate::demo;
use crate::state::AppState;

/// The mapping sources, one per layer of the chain.
#[derive(Debug)]
pub struct Sources {
    pub store: UrlStore,
    pub json: Mapping,
    pub yaml: Mapping,
    pub table: Mapping,
}

/// Builds `store -> json -> yaml -> table -> default`, highest precedence first.
pub fn build_chain(sources: Sources) -> SharedHandler {
    Chain::new(DefaultHandler)
        .wrap(sources.table)
        .wrap(sources.yaml)
        .wrap(sources.json)
        .wrap(sources.store)
        .into_handler()
}

/// Reads a mapping document from `path`, or parses `builtin` when no path is given.
pub async fn load_document(
    path: Option<&Path>,
    builtin: &str,
    format: RecordFormat,
) -> anyhow::Result<Mapping> {
    let mapping = match path {
        Some(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("failed to read {format} document {}", path.display()))?;
            Mapping::from_document(&bytes, format)
                .with_context(|| format!("invalid {format} document {}", path.display()))?
        }
        None => Mapping::from_document(builtin.as_bytes(), format)
            .with_context(|| format!("invalid built-in {format} document"))?,
    };

    info!(format = %format, entries = mapping.len(), "loaded mapping document");
    Ok(mapping)
}

/// Bootstraps every source, then serves until a shutdown signal arrives.
pub async fn run(config: CLI) -> anyhow::Result<()> {
    info!(
        listen_addr = %config.listen_addr,
        db_path = %config.db_path.display(),
        "starting urlshort gateway"
    );

    let store_config = StoreConfig::builder().path(config.db_path.clone()).build();
    let store = UrlStore::bootstrap(&store_config, &demo::store_seed())
        .context("failed to bootstrap url store")?;

    let yaml = load_document(config.yaml_file.as_deref(), demo::YAML, RecordFormat::Yaml).await?;
    let json = load_document(config.json_file.as_deref(), demo::JSON, RecordFormat::Json).await?;

    let root = build_chain(Sources {
        store: store.clone(),
        json,
        yaml,
        table: demo::table(),
    });

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, App::router(AppState::new(root)))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated with an error")?;

    store.close().context("failed to close url store")?;
    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
