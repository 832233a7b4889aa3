use anyhow::Context;
use carousel::Carousel;
use clap::Parser;
use relm4::prelude::*;
use showcase::config;
use showcase::gui::app::{AppInit, AppModel};
use showcase::gui::deck::Deck;
use showcase::sys::runtime;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "A carousel of portfolio projects")]
struct Cli {
    /// Config file to read and watch instead of the per-user one
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Autoplay interval in milliseconds; 0 turns autoplay off
    #[arg(short, long)]
    interval: Option<u64>,

    /// Never advance on a timer
    #[arg(long)]
    reduced_motion: bool,

    /// Write the built-in config to the config path and exit
    #[arg(long)]
    write_default: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.write_default {
        let path = config::write_default_config(&config_path)
            .with_context(|| format!("writing {}", config_path.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut config = config::load_or_default(&config_path)?;
    if let Some(ms) = cli.interval {
        config.autoplay.interval = Duration::from_millis(ms);
    }
    if cli.reduced_motion {
        config.autoplay.reduced_motion = true;
    }

    let carousel = Carousel::new(config.items.clone(), config.settings())?;
    let deck = Deck::new(carousel, config.tags.clone());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(config_path.clone(), tx);

    // clap already consumed argv; keep GTK from parsing it again
    let app = RelmApp::new("org.showcase.Showcase").with_args(Vec::new());
    app.run::<AppModel>(AppInit {
        deck,
        config_path,
        opener: config.opener(),
        fallback_clipboard: config.fallback_clipboard(),
        events: rx,
    });

    Ok(())
}
