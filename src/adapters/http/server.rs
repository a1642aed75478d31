//! Router assembly and the serve loop.

use axum::http::{header, HeaderValue, Method, Uri};
use axum::routing::{get, post};
use axum::Router;
use std::any::Any;
use std::future::{Future, IntoFuture};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{error, info, warn, Level};

use super::error::{panic_response, ApiError};
use super::events::{clear_cache, list_events};
use super::health::health;
use crate::domain::models::Config;
use crate::domain::ports::Clock;
use crate::services::EventService;

/// How long in-flight requests get to finish after a shutdown signal.
pub const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] io::Error),

    #[error("Graceful shutdown did not finish within {0:?}")]
    ShutdownTimeout(Duration),
}

/// HTTP-facing settings.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    /// Environment label reported by `/health`
    pub environment: String,
    /// Enables the per-request access log
    pub debug_mode: bool,
}

impl HttpConfig {
    /// Error details are only exposed to clients in development.
    pub fn expose_details(&self) -> bool {
        self.environment == "development"
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            debug_mode: false,
        }
    }
}

impl From<&Config> for HttpConfig {
    fn from(config: &Config) -> Self {
        Self {
            host: config.bind_host.clone(),
            port: config.port,
            environment: config.node_env.clone(),
            debug_mode: config.debug_mode,
        }
    }
}

/// Shared handler state.
pub struct AppState {
    pub event_service: Arc<EventService>,
    pub config: HttpConfig,
    pub clock: Arc<dyn Clock>,
}

/// The Tokyo events HTTP gateway.
pub struct EventsHttpServer {
    state: Arc<AppState>,
}

impl EventsHttpServer {
    pub fn new(
        event_service: Arc<EventService>,
        config: HttpConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(AppState {
                event_service,
                config,
                clock,
            }),
        }
    }

    /// Build the router with all routes and middleware.
    pub fn router(&self) -> Router {
        let expose_details = self.state.config.expose_details();

        let mut router = Router::new()
            .route("/api/events", get(list_events).fallback(not_found))
            .route(
                "/api/events/cache/clear",
                post(clear_cache).fallback(not_found),
            )
            .route("/health", get(health).fallback(not_found))
            .fallback(not_found)
            .with_state(Arc::clone(&self.state))
            .layer(CatchPanicLayer::custom(
                move |err: Box<dyn Any + Send + 'static>| panic_response(err, expose_details),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("SAMEORIGIN"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ))
            .layer(
                CorsLayer::new()
                    .allow_origin(AnyOrigin)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers(AnyOrigin),
            );

        if self.state.config.debug_mode {
            router = router.layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            );
        }

        router
    }

    /// Bind the configured address and serve until SIGINT or SIGTERM.
    pub async fn serve(self) -> Result<(), ServerError> {
        let addr = self.state.config.bind_address();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an existing listener until `signal` resolves.
    ///
    /// In-flight requests get [`SHUTDOWN_GRACE`] to finish; after that the
    /// call returns [`ServerError::ShutdownTimeout`].
    pub async fn serve_with_shutdown<F>(
        self,
        listener: TcpListener,
        signal: F,
    ) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.router();
        let config = &self.state.config;

        info!(
            addr = %listener.local_addr()?,
            environment = %config.environment,
            cache_enabled = self.state.event_service.cache().settings().enabled,
            "Tokyo events gateway listening"
        );

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let graceful = async move {
            signal.await;
            info!("shutdown signal received, draining connections");
            let _ = shutdown_tx.send(true);
        };

        let server = axum::serve(listener, router)
            .with_graceful_shutdown(graceful)
            .into_future();

        let deadline = async move {
            if shutdown_rx.wait_for(|stopping| *stopping).await.is_err() {
                std::future::pending::<()>().await;
            }
            tokio::time::sleep(SHUTDOWN_GRACE).await;
        };

        tokio::select! {
            result = server => {
                result?;
                info!("server stopped");
                Ok(())
            }
            () = deadline => {
                error!(grace = ?SHUTDOWN_GRACE, "forcing shutdown, connections still open");
                Err(ServerError::ShutdownTimeout(SHUTDOWN_GRACE))
            }
        }
    }
}

/// 404 envelope for unknown routes and unsupported methods.
async fn not_found(method: Method, uri: Uri) -> ApiError {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), ToString::to_string);

    warn!(%method, %path, "route not found");
    ApiError::not_found(path)
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
