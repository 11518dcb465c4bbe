use clap::Parser;
use eyre::WrapErr;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::BufReader;
use tracing::{error, info};

use song_catalog::load_catalog;
use song_finder::cli::{Command, RootArgs};
use song_finder::config::AppConfig;
use song_finder::session::Session;
use song_finder::shell::{self, emit, ShellOptions};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let args = RootArgs::parse();
    let config = AppConfig::from_env_and_args(&args).wrap_err("load config")?;

    let mut options = config.session_options();
    match &args.command {
        Command::Lucky { count } => {
            options.pick_count = *count;
            options.default_bucket = None;
        }
        Command::Shell { start } => options.default_bucket = (*start).or(config.default_bucket),
        _ => options.default_bucket = None,
    }

    let mut session = match load_catalog(&config.catalog).await {
        Ok(catalog) => Session::new(catalog, options),
        Err(e) => {
            error!("Failed to load catalog from {}: {e:#}", config.catalog);
            Session::unavailable(options)
        }
    };

    let mut rng = StdRng::from_entropy();
    let mut stdout = std::io::stdout();
    let format = args.format;

    match args.command {
        Command::Search { query } => {
            let screen = session.query_submitted(&query.join(" "));
            emit(&mut stdout, &screen, format)?;
        }
        Command::Browse { bucket, page } => {
            session.letter_selected(bucket);
            let screen = session.page_selected(page);
            emit(&mut stdout, &screen, format)?;
        }
        Command::Songs { artist } => {
            if session.is_available() {
                let index = session
                    .resolve_artist(&artist)
                    .ok_or_else(|| eyre::eyre!("no artist named {artist:?}"))?;
                let screen = session
                    .artist_selected(index)
                    .ok_or_else(|| eyre::eyre!("no artist at catalog position {index}"))?;
                emit(&mut stdout, &screen, format)?;
            } else {
                emit(&mut stdout, &session.screen(), format)?;
            }
        }
        Command::Lucky { .. } => {
            let screen = session.random_picks(&mut rng);
            emit(&mut stdout, &screen, format)?;
        }
        Command::Buckets => {
            emit(&mut stdout, &session.screen(), format)?;
        }
        Command::Shell { .. } => {
            info!("Starting interactive shell");
            let input = BufReader::new(tokio::io::stdin());
            let shell_options = ShellOptions {
                debounce: config.debounce,
                format,
            };
            shell::run(&mut session, input, &mut stdout, shell_options, &mut rng)
                .await
                .wrap_err("interactive shell")?;
            return Ok(());
        }
    }

    if !session.is_available() {
        return Err(eyre::eyre!("catalog unavailable: {}", config.catalog));
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "song_finder=info,song_catalog=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
