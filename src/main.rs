use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libris::infrastructure::AppState;
use libris::{config, db, seed, server};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "libris=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if config.seed_demo {
        match seed::seed_demo_data(&db).await {
            Ok(true) => tracing::info!("Demo data seeded successfully."),
            Ok(false) => tracing::debug!("Demo data already present"),
            Err(e) => tracing::error!("Failed to seed data: {}", e),
        }
    }

    let state = AppState::with_paging(db, config.paging);
    let app = server::build_router(state, &config.cors_allowed_origins);

    if let Err(e) = server::serve(app, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
