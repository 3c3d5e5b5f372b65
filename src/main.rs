use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use drivenow_rentals::config::EnvironmentConfig;
use drivenow_rentals::controllers::auth_controller::ensure_admin_user;
use drivenow_rentals::database::create_pool;
use drivenow_rentals::repositories::{MemoryStore, PgStore, RentalStore};
use drivenow_rentals::services::email_service::{HttpMailer, LogMailer, Mailer};
use drivenow_rentals::services::file_service::DiskStorage;
use drivenow_rentals::services::jwt_service::JwtService;
use drivenow_rentals::state::AppState;
use drivenow_rentals::utils::ids::IdGenerator;
use drivenow_rentals::build_router;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("🚗 DriveNow Rentals - Fleet Management API");
    info!("==========================================");

    let config = EnvironmentConfig::from_env()?;

    // Backend de persistencia: PostgreSQL si hay DATABASE_URL, memoria si no
    let store: Arc<dyn RentalStore> = match &config.database_url {
        Some(database_url) => {
            let pool = match create_pool(database_url).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("❌ Error conectando a la base de datos: {}", e);
                    return Err(e);
                }
            };
            let store = PgStore::new(pool);
            store.init_schema().await.map_err(|e| {
                error!("❌ Error inicializando el esquema: {}", e);
                anyhow::anyhow!("schema init failed: {}", e)
            })?;
            info!("✅ Persistencia: PostgreSQL");
            Arc::new(store)
        }
        None => {
            info!("⚠️ Sin DATABASE_URL: persistencia en memoria (solo desarrollo)");
            Arc::new(MemoryStore::new())
        }
    };

    // Cuenta admin inicial, si está configurada
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        ensure_admin_user(store.as_ref(), email, password).await?;
    }

    let mailer: Arc<dyn Mailer> = match (&config.email_api_url, &config.email_api_key, &config.email_sender) {
        (Some(api_url), Some(api_key), Some(sender)) => Arc::new(HttpMailer::new(
            api_url.clone(),
            api_key.clone(),
            sender.clone(),
            config.frontend_url.clone(),
        )),
        _ => {
            info!("⚠️ Sin credenciales de email: los enlaces de verificación van al log");
            Arc::new(LogMailer::new(config.frontend_url.clone()))
        }
    };

    let jwt = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);
    let files = Arc::new(DiskStorage::new(config.upload_dir.clone()));
    let ids = Arc::new(IdGenerator::new());

    let addr: SocketAddr = config.server_address().parse()?;
    let state = AppState::new(store, ids, jwt, mailer, files, config);
    let app = build_router(state);

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehículos:");
    info!("   POST|GET /api/vehicles, GET|PUT|DELETE /api/vehicles/:id");
    info!("   POST|GET /api/vehicles/:id/documents, PUT|DELETE /api/vehicles/:id/documents/:docId");
    info!("👤 Conductores:");
    info!("   POST|GET /api/drivers, GET|PUT|DELETE /api/drivers/:id");
    info!("   POST /api/drivers/:id/contract, POST /api/drivers/:id/payment");
    info!("   POST|GET /api/drivers/:id/documents, PUT|DELETE /api/drivers/:id/documents/:docId");
    info!("   GET  /api/drivers/:id/documents/:docId/download");
    info!("📋 Solicitudes de alquiler:");
    info!("   POST /api/rentals (multipart)");
    info!("   GET  /api/rental-applications, GET|PUT /api/rental-applications/:id");
    info!("⏰ Alertas y dashboard:");
    info!("   GET  /api/document-expiry-alerts, /api/document-types, /api/dashboard/document-stats");
    info!("🔐 Auth:");
    info!("   POST /api/signup, /api/login, /api/verify-email, /api/resend-verification");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
