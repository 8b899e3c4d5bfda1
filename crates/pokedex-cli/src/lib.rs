pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod source;
pub mod storage;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::oneshot;
use tokio::time::Instant;

use app::App;
use command::Command;
use config::CliConfig;
use error::CliError;
use source::CatalogSource;
use storage::JsonFileRepository;

/// Run the terminal front end until `quit` or end of input.
///
/// The catalog is fetched once in the background; commands typed before it
/// arrives see the loading banner. Timers advance by wall-clock time on every
/// tick and before each command.
pub async fn run(config: CliConfig) -> Result<(), CliError> {
    let source = CatalogSource::from_config(&config)?;
    let repo = JsonFileRepository::new(&config.favourites_path);
    let tick_interval = config.tick_interval();
    let mut app = App::new(config, Box::new(repo));

    let (catalog_tx, mut catalog_rx) = oneshot::channel();
    tokio::spawn(async move {
        tracing::info!(?source, "Loading catalog");
        let _ = catalog_tx.send(source.fetch().await);
    });

    let mut interval = tokio::time::interval(tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut loaded = false;
    let mut rng = StdRng::from_os_rng();

    print_lines(&app.handle(Command::Status));

    loop {
        tokio::select! {
            result = &mut catalog_rx, if !loaded => {
                loaded = true;
                let result = result.unwrap_or_else(|_| {
                    Err(pokedex_core::error::LoadError::Source(
                        "catalog loader stopped".to_string(),
                    ))
                });
                print_lines(&app.catalog_ready(result, &mut rng));
            },
            _ = interval.tick() => {
                let now = Instant::now();
                print_lines(&app.advance(now - last));
                last = now;
            },
            line = lines.next_line() => {
                let Some(line) = line.map_err(|e| CliError::Io(e.to_string()))? else {
                    tracing::debug!("End of input");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                let now = Instant::now();
                print_lines(&app.advance(now - last));
                last = now;

                match command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(cmd) => print_lines(&app.handle(cmd)),
                    Err(hint) => println!("{hint}"),
                }
            },
        }
    }
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
