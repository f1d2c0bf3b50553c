//! Application entry point.

use std::sync::Arc;

use marquee_auth::AccountService;
use marquee_db::DbManager;
use marquee_db::repository::SurrealAccountRepository;
use marquee_mail::MailSender;
use marquee_server::api;
use marquee_server::config::ServerConfig;
use marquee_server::state::AppState;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                "marquee_server=debug,marquee_auth=debug,marquee_db=info,marquee_mail=info,tower_http=info"
                    .to_string()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Fail fast: an unreachable database should stop startup here.
    let db = DbManager::connect(&config.db).await?;
    marquee_db::run_migrations(db.client()).await?;

    let accounts = SurrealAccountRepository::new(db.client().clone());
    let mailer = MailSender::new(config.mail.clone())?;
    let service = AccountService::new(accounts, mailer, config.auth.clone());

    let listen_addr = config.listen_addr.clone();
    let state = AppState {
        service: Arc::new(service),
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(listen_addr.as_str()).await?;
    tracing::info!(addr = %listen_addr, "Account service listening");

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
