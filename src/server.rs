//! Server runtime
//!
//! [`ServerHandle`] owns the full lifecycle: storage and migrations, catalog
//! seeding, the booking service, the REST API and graceful shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, error, info, warn};

use crate::application::events::{create_event_bus, Event, SharedEventBus};
use crate::application::BookingService;
use crate::config::{AppConfig, StorageBackend};
use crate::domain::RepositoryProvider;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{
    init_database, seed_default_catalog, DatabaseConfig, EventBusNotifier,
    InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};
use crate::interfaces::create_api_router;
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};
use crate::shared::time::SystemClock;

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running booking server.
///
/// ```rust,no_run
/// use resort_booking::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.shutdown_signal().wait().await;
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub event_bus: SharedEventBus,
    pub repos: Arc<dyn RepositoryProvider>,
    pub service: Arc<BookingService>,
    pub config: AppConfig,
    /// Address the REST API is bound to (useful with port 0 in tests)
    pub local_addr: SocketAddr,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
    outbox_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;
        app_cfg.validate()?;

        info!("Starting resort booking server...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            match app_cfg.database.backend {
                StorageBackend::Memory => {
                    warn!("Using in-memory storage; bookings are lost on restart");
                    (Arc::new(InMemoryRepositoryProvider::new()), None)
                }
                StorageBackend::Sqlite => {
                    let db_config = DatabaseConfig {
                        url: app_cfg.database.connection_url(),
                    };
                    let db = init_database(&db_config).await?;
                    if opts.auto_migrate {
                        info!("Running database migrations...");
                        Migrator::up(&db, None).await?;
                        info!("Migrations completed");
                    }
                    (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
                }
            };

        if app_cfg.booking.seed_catalog {
            seed_default_catalog(repos.as_ref()).await?;
        }

        // ── Events & services ──────────────────────────────────
        let event_bus = create_event_bus();
        let notifier = Arc::new(EventBusNotifier::new(
            event_bus.clone(),
            app_cfg.booking.currency.clone(),
        ));
        let service = Arc::new(
            BookingService::new(
                repos.clone(),
                notifier,
                Arc::new(SystemClock),
                event_bus.clone(),
            )
            .with_conflict_retry(app_cfg.booking.conflict_retry())
            .with_currency(app_cfg.booking.currency.clone())
            .with_max_nights(app_cfg.booking.max_nights),
        );

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let outbox_task = spawn_outbox_logger(event_bus.clone(), shutdown_signal.clone());

        // ── REST API ───────────────────────────────────────────
        let router = create_api_router(service.clone(), db.clone(), prometheus_handle);

        let listener = tokio::net::TcpListener::bind(app_cfg.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_shutdown = shutdown_signal.clone();
        let api_server = axum::serve(listener, router).with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("🛑 REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        info!("🚀 Server started");

        Ok(Self {
            event_bus,
            repos,
            service,
            config: app_cfg,
            local_addr,
            db,
            shutdown,
            api_task,
            outbox_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Trigger shutdown on SIGTERM / SIGINT.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the server to stop after shutdown has been triggered.
    ///
    /// In-flight requests get `server.shutdown_timeout` seconds to finish.
    pub async fn wait(self) {
        info!("⏳ Waiting for server tasks to complete...");

        let api_task = self.api_task;
        let api_abort = api_task.abort_handle();
        let drained = self
            .shutdown
            .shutdown_with_cleanup(|| async move {
                match api_task.await {
                    Ok(()) => info!("REST API server stopped"),
                    Err(e) => error!("REST API server task panicked: {}", e),
                }
            })
            .await;
        if !drained {
            api_abort.abort();
        }
        self.outbox_task.abort();

        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                warn!("Error closing database connection: {}", e);
            } else {
                info!("✅ Database connection closed");
            }
        }

        info!("👋 Resort booking server shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("🛑 Shutting down...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// The global recorder can only be installed once per process, so restarts
/// within the same process reuse the first handle.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("📊 Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

/// Log guest notifications until a mail relay is attached to the bus.
fn spawn_outbox_logger(
    events: SharedEventBus,
    shutdown: ShutdownSignal,
) -> tokio::task::JoinHandle<()> {
    let mut subscriber = events.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.wait() => break,
                msg = subscriber.recv() => {
                    let Some(msg) = msg else { break };
                    match &msg.event {
                        Event::GuestNotification(n) => info!(
                            booking_id = %n.booking_id,
                            recipient = %n.recipient,
                            subject = %n.subject,
                            "📧 Guest notification queued"
                        ),
                        other => debug!(event = other.event_type(), "Booking event"),
                    }
                }
            }
        }
    })
}

/// Initialize tracing from the application config.
///
/// `RUST_LOG` overrides `logging.level`. Call once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;

    fn memory_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 1;
        config.server.shutdown_timeout = 5;
        config.database.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn rejects_invalid_config() {
        let mut config = memory_config();
        config.booking.currency = String::new();
        let result = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: false,
        })
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn serves_seeded_catalog_and_shuts_down() {
        // Port 0 cannot pass validation, so bind an ephemeral port first.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut config = memory_config();
        config.server.port = port;
        let handle = ServerHandle::start(ServerOptions {
            config,
            auto_migrate: false,
        })
        .await
        .unwrap();

        assert!(handle.is_running());
        assert_eq!(handle.repos.rooms().count().await.unwrap(), 4);
        assert_eq!(handle.local_addr.port(), port);

        handle.shutdown().await;
    }
}
