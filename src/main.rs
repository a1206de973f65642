use clap::Parser;
use recipe_finder::{
    api::{handlers::AppState, models::SearchRequest, routes},
    cli::{Cli, Commands},
    config::{Settings, StoreBackend},
    db, store, Error, Result,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recipe_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let settings = Settings::from_env()?;
    settings.validate()?;

    match cli.command {
        Commands::Serve { port, host } => {
            serve(settings, port, host).await?;
        }
        Commands::Migrate => {
            migrate(settings).await?;
        }
        Commands::Search {
            ingredients,
            cuisine,
            diet,
            max_time,
            sort,
        } => {
            let request = SearchRequest {
                ingredients,
                cuisine,
                diet,
                max_time,
                sort: sort.unwrap_or_default(),
            };
            recipe_finder::cli::commands::search(&settings.server_url(), &request).await?;
        }
        Commands::Show { id } => {
            recipe_finder::cli::commands::show(&settings.server_url(), id).await?;
        }
    }

    Ok(())
}

async fn serve(mut settings: Settings, port: Option<u16>, host: Option<String>) -> Result<()> {
    if let Some(port) = port {
        settings.server.port = port;
    }
    if let Some(host) = host {
        settings.server.host = host;
    }

    info!("Starting Recipe Finder server");
    info!("Store backend: {:?}", settings.store.backend);
    info!("Server: {}:{}", settings.server.host, settings.server.port);

    let recipe_store = store::build(&settings).await?;

    match store::seed::seed_store(recipe_store.as_ref(), &settings.catalog).await {
        Ok(0) => info!("No recipes seeded"),
        Ok(count) => info!("Seeded {} recipes", count),
        Err(e) => {
            warn!("Failed to seed recipe catalog: {}", e);
            warn!("Continuing with the recipes already in the store");
        }
    }

    let state = AppState::new(recipe_store, settings.clone());
    let app = routes::create_router(state, &settings);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    println!("\n========================================");
    println!("Recipe Finder Server");
    println!("========================================");
    println!("Address: http://{addr}");
    println!("Store: {:?}", settings.store.backend);
    println!("\nAPI Endpoints:");
    println!("  GET    /api/recipes");
    println!("  GET    /api/recipes/:id");
    println!("  POST   /api/recipes");
    println!("  POST   /api/recipes/search");
    println!("  POST   /api/recipes/:id/shopping-list");
    println!("  GET    /api/favorites");
    println!("  POST   /api/favorites");
    println!("  DELETE /api/favorites/:recipe_id");
    println!("  GET    /api/shopping-lists");
    println!("  POST   /api/shopping-lists");
    println!("  PUT    /api/shopping-lists/:id");
    println!("  DELETE /api/shopping-lists/:id");
    println!("\nPress Ctrl+C to stop");
    println!("========================================\n");

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Internal(format!("Server error: {e}")))?;

    info!("Shutting down...");
    Ok(())
}

async fn migrate(settings: Settings) -> Result<()> {
    if settings.store.backend != StoreBackend::Sqlite {
        return Err(Error::Config(
            "Migrations only apply to the sqlite backend (set STORE_BACKEND=sqlite)".to_string(),
        ));
    }

    info!("Running database migrations");

    let pool = db::init_pool(&settings.store.database_url).await?;
    db::run_migrations(&pool).await?;

    println!("✓ Database migrations completed successfully");
    Ok(())
}
