use tracing_subscriber::EnvFilter;

use pokedex_cli::config::CliConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        },
    };

    tracing::info!("Pokédex starting");

    if let Err(e) = pokedex_cli::run(config).await {
        tracing::error!(error = %e, "Pokédex stopped");
        std::process::exit(1);
    }
}
