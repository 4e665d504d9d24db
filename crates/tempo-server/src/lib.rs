//! Static-asset shell for Tempo.
//!
//! No application logic lives here: the router serves the single HTML
//! entry point and the static asset directories, with a permissive
//! cross-origin header on all responses. Two listeners share the router,
//! one plaintext and one TLS-terminated.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::path::Path;

use anyhow::Result;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use tempo_core::{ServerConfig, ServerError};

/// Build the static router over a site root.
///
/// `/` serves the index document; every other path falls back to
/// static-file service from the same root.
pub fn router(site_root: &Path) -> Router {
    Router::new()
        .route_service("/", ServeFile::new(site_root.join("index.html")))
        .fallback_service(ServeDir::new(site_root))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Run the plaintext and TLS listeners until one fails.
///
/// A missing certificate or key disables the TLS listener with an error
/// log; the plaintext listener still serves.
///
/// # Errors
/// Returns `ServerError` when the site root is missing or a listener
/// cannot bind.
pub async fn run(config: &ServerConfig) -> Result<()> {
    if !config.site_root.is_dir() {
        return Err(ServerError::SiteRootMissing(config.site_root.display().to_string()).into());
    }

    let app = router(&config.site_root);

    let http_addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let https_addr = SocketAddr::from(([0, 0, 0, 0], config.https_port));

    let listener = TcpListener::bind(http_addr).await.map_err(|e| {
        ServerError::BindFailed {
            listener: "plaintext",
            port: config.http_port,
            message: e.to_string(),
        }
    })?;
    tracing::info!("Listening on http://{http_addr}");
    let http = tokio::spawn(axum::serve(listener, app.clone()).into_future());

    let https = match RustlsConfig::from_pem_file(&config.cert_path, &config.key_path).await {
        Ok(tls) => {
            tracing::info!("Listening on https://{https_addr}");
            let app = app.clone();
            Some(tokio::spawn(
                axum_server::bind_rustls(https_addr, tls).serve(app.into_make_service()),
            ))
        }
        Err(e) => {
            let err = ServerError::TlsConfig(format!(
                "{} / {}: {e}",
                config.cert_path.display(),
                config.key_path.display()
            ));
            tracing::error!("{err}; serving plaintext only");
            None
        }
    };

    match https {
        Some(https) => {
            let (http_result, https_result) = tokio::join!(http, https);
            http_result??;
            https_result??;
        }
        None => http.await??,
    }

    Ok(())
}
