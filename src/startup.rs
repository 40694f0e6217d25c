//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tokio::signal;

use crate::application::services::{MessageServiceImpl, ParticipantServiceImpl, PresenceReaper};
use crate::config::{Settings, StorageBackend};
use crate::domain::{MessageRepository, ParticipantRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{MemoryStore, PgMessageRepository, PgParticipantRepository};
use crate::presentation::http::{handlers, routes};
use crate::presentation::middleware::{cors, logging};
use crate::shared::snowflake::SnowflakeGenerator;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub participants: Arc<dyn ParticipantRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub snowflake: Arc<SnowflakeGenerator>,
    /// Present only for the postgres backend
    pub db: Option<PgPool>,
    pub settings: Arc<Settings>,
}

impl AppState {
    /// State backed by process memory
    pub fn in_memory(settings: Settings) -> Self {
        let store = Arc::new(MemoryStore::new());

        Self {
            participants: store.clone(),
            messages: store,
            snowflake: Arc::new(SnowflakeGenerator::new(settings.snowflake.machine_id as u64)),
            db: None,
            settings: Arc::new(settings),
        }
    }

    /// State for the backend selected in `settings.storage`
    pub async fn from_settings(settings: Settings) -> Result<Self> {
        match settings.storage.backend {
            StorageBackend::Memory => {
                tracing::info!("Using in-memory storage");
                Ok(Self::in_memory(settings))
            }
            StorageBackend::Postgres => {
                let db = database::create_pool(&settings.database).await?;
                tracing::info!("Database connection pool created");

                if settings.database.run_migrations {
                    database::run_migrations(&db).await?;
                    tracing::info!("Database migrations applied");
                }

                Ok(Self {
                    participants: Arc::new(PgParticipantRepository::new(db.clone())),
                    messages: Arc::new(PgMessageRepository::new(db.clone())),
                    snowflake: Arc::new(SnowflakeGenerator::new(
                        settings.snowflake.machine_id as u64,
                    )),
                    db: Some(db),
                    settings: Arc::new(settings),
                })
            }
        }
    }

    pub fn message_service(&self) -> MessageServiceImpl {
        MessageServiceImpl::new(
            self.messages.clone(),
            self.participants.clone(),
            self.snowflake.clone(),
        )
    }

    pub fn participant_service(&self) -> ParticipantServiceImpl {
        ParticipantServiceImpl::new(self.participants.clone(), self.message_service())
    }

    /// Reaper configured from `settings.presence`
    pub fn presence_reaper(&self) -> PresenceReaper {
        PresenceReaper::new(
            self.participants.clone(),
            self.message_service(),
            self.settings.presence.idle_threshold(),
            self.settings.presence.sweep_interval(),
        )
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
    reaper: PresenceReaper,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        handlers::health::init_server_start();

        let addr = settings.server_addr();
        let cors_layer = cors::create_cors_layer(&settings.cors);

        let state = AppState::from_settings(settings).await?;
        let reaper = state.presence_reaper();

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(logging::create_trace_layer())
            .layer(cors_layer);

        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on {}", listener.local_addr()?);

        Ok(Self {
            listener,
            router,
            reaper,
        })
    }

    /// Run the server and the presence reaper until a shutdown signal arrives
    pub async fn run_until_stopped(self) -> Result<()> {
        let reaper = self.reaper.start();

        let served = axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await;

        reaper.stop().await;
        served?;

        tracing::info!("Server shut down");
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
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

    tracing::info!("Shutdown signal received");
}
