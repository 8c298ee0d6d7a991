use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use dotenvy::dotenv;
use pizza_restaurant_service::{router, seed, AppState, Store};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    database: DatabaseArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DatabaseArgs {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "app.db", global = true)]
    database_url: String,

    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8, global = true)]
    pool_size: u32,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pending migrations and serve the HTTP API
    Serve {
        #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:5555")]
        listen: SocketAddr,
    },
    /// Run pending migrations and exit
    Migrate,
    /// Replace all data with the sample restaurants and pizzas
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pizza_restaurant_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let store = Store::connect(&cli.database.database_url, cli.database.pool_size)?;
    let applied = store.run_migrations()?;
    info!(
        database_url = %cli.database.database_url,
        applied,
        "database ready"
    );

    match cli.command {
        Commands::Serve { listen } => serve(store, listen).await,
        Commands::Migrate => Ok(()),
        Commands::Seed => {
            let summary = store.run(|conn| Ok(seed::run(conn)?)).await?;
            info!(
                restaurants = summary.restaurants,
                pizzas = summary.pizzas,
                restaurant_pizzas = summary.restaurant_pizzas,
                "seeded database"
            );
            Ok(())
        }
    }
}

async fn serve(
    store: Store,
    listen: SocketAddr,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
