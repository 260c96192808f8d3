//! Binary entry point: read the configuration, start file logging, open the
//! songs database and hand over to the projector screen.
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use projectionist::config::load_config;
use projectionist::db::{resolve_database_path, MemorySongs, SqliteSongs};
use projectionist::logging::init_logging;
use projectionist::{run_app, App};

#[derive(Debug, Parser)]
#[command(name = "projectionist", about = "Project hymn lyrics page by page")]
struct Args {
    /// Alternate config file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Songs database to open instead of the usual locations.
    #[arg(long)]
    database: Option<PathBuf>,
    /// Song number shown on start-up.
    #[arg(long)]
    song: Option<u32>,
    /// Source hymnal id.
    #[arg(long)]
    source: Option<i64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let loaded = load_config(args.config).context("failed to load configuration")?;
    let mut config = loaded.config;
    if let Some(database) = args.database {
        config.database_path = Some(database);
    }
    if let Some(song) = args.song {
        config.initial_song = song;
    }
    if let Some(source) = args.source {
        config.source_id = source;
    }

    let _logger = init_logging(&config.logging, &loaded.paths).context("failed to start logging")?;
    info!("projectionist starting (config file present: {})", loaded.config_exists);

    let opened = resolve_database_path(&config, &loaded.paths)
        .and_then(|path| SqliteSongs::open(&path));
    let mut app = match opened {
        Ok(songs) => {
            let mut app = App::new(Box::new(songs), &config);
            app.load_song(config.initial_song);
            app
        }
        Err(err) => {
            error!("songs database unavailable: {err}");
            App::failed(Box::new(MemorySongs::default()), &config, err.to_string())
        }
    };

    run_app(&mut app)
}
