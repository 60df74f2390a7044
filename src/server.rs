//! Server runtime
//!
//! [`ServerHandle`] owns the whole lifecycle: storage init, migrations,
//! wiring repository → service → handler → router, serving, and graceful
//! shutdown.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use crate::application::{UserService, UserServiceInterface};
use crate::config::AppConfig;
use crate::infrastructure::database::migrator::Migrator;
use crate::infrastructure::{init_database, InMemoryUserRepository, UserRepository};
use crate::interfaces::http::create_api_router;
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::rpc::{UserV1, UserV1Handler};
use crate::shared::shutdown::{ShutdownCoordinator, ShutdownSignal};

/// Options for starting the service.
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

/// The recorder is global and can only be installed once per process.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled");
                None
            }
        })
        .clone()
}

/// Handle to a running service.
///
/// ```rust,no_run
/// use auth_service::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.shutdown().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub config: AppConfig,
    /// Address the listener is bound to.
    pub local_addr: SocketAddr,

    db: Option<Arc<DatabaseConnection>>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let config = opts.config;
        config.validate()?;

        info!("Starting auth service...");

        let (user_v1, db) = if config.database.is_memory() {
            warn!("Using in-memory user storage; data is lost on exit");
            let repo = Arc::new(InMemoryUserRepository::new());
            (user_v1_for(repo), None)
        } else {
            let db = Arc::new(init_database(&config.database).await?);

            if opts.auto_migrate {
                info!("Running database migrations...");
                Migrator::up(db.as_ref(), None).await?;
                info!("Migrations completed");
            }

            let repo = Arc::new(UserRepository::new(db.clone()));
            (user_v1_for(repo), Some(db))
        };

        let router = create_api_router(user_v1, HealthState::new(db.clone()), prometheus_handle());

        let listener = tokio::net::TcpListener::bind(config.server.address()).await?;
        let local_addr = listener.local_addr()?;
        info!("user_v1.UserV1 listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let shutdown = ShutdownCoordinator::new(config.server.shutdown_timeout);
        let signal = shutdown.signal();

        let api_task = tokio::spawn(async move {
            let served = axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    signal.wait().await;
                    info!("HTTP server received shutdown signal");
                })
                .await;

            if let Err(e) = served {
                error!("HTTP server error: {}", e);
            }
        });

        Ok(Self {
            config,
            local_addr,
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }

    /// Wait for the server to stop after shutdown has been triggered,
    /// bounded by `server.shutdown_timeout`.
    pub async fn wait(self) {
        let Self {
            db,
            shutdown,
            mut api_task,
            ..
        } = self;

        shutdown.signal().wait().await;

        let drained = shutdown
            .drain(async {
                if let Err(e) = (&mut api_task).await {
                    error!("HTTP server task panicked: {}", e);
                }
            })
            .await;

        if !drained {
            api_task.abort();
        }

        match db.map(Arc::try_unwrap) {
            Some(Ok(db)) => match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            },
            Some(Err(_)) => warn!("Database pool still shared, dropping without explicit close"),
            None => {}
        }

        info!("Auth service shutdown complete");
    }

    /// Trigger shutdown and wait for completion.
    pub async fn shutdown(self) {
        info!("Shutting down auth service...");
        self.trigger_shutdown();
        self.wait().await;
    }
}

fn user_v1_for<R>(repo: Arc<R>) -> Arc<dyn UserV1>
where
    R: crate::domain::UserRepositoryInterface + 'static,
{
    let service: Arc<dyn UserServiceInterface> = Arc::new(UserService::new(repo));
    Arc::new(UserV1Handler::new(service))
}

/// Initialize tracing from the application config.
///
/// Call this once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match config.logging.format.to_lowercase().as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        _ => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing already initialized: {e}");
    }
}
