use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carewatch_alerts::{Dispatcher, HttpTopicPublisher, MailerConfig, Resolver, SmtpMailer};
use carewatch_api::config::ServerConfig;
use carewatch_api::router::build_app_router;
use carewatch_api::state::AppState;
use carewatch_db::store::PgRecordStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carewatch_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = carewatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    carewatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    carewatch_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Alert pipeline ---
    let store = Arc::new(PgRecordStore::new(pool.clone()));

    let mailer_config = MailerConfig::from_env().unwrap_or_else(|| {
        tracing::error!("SMTP_HOST must be set: the alerting service cannot run without a mail transport");
        std::process::exit(1);
    });
    let mailer = Arc::new(SmtpMailer::new(mailer_config));

    let mut dispatcher = Dispatcher::new(Resolver::new(store), mailer);

    if let Some(topic) = HttpTopicPublisher::from_env() {
        tracing::info!("Critical-topic channel configured");
        dispatcher = dispatcher.with_critical_topic(Arc::new(topic));
    }

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    // --- Server ---
    let app = build_app_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("HOST/PORT must form a valid socket address");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(%addr, "Alert intake server listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
