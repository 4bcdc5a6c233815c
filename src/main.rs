pub mod action;
pub mod app;
pub mod audio;
pub mod cli;
pub mod components;
pub mod config;
pub mod constants;
pub mod errors;
pub mod interrupt;
pub mod sink;
pub mod tree;
pub mod tui;
pub mod utils;

use std::io::{stdout, IsTerminal, Write};

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::{
    cursor::MoveTo,
    queue,
    terminal::{Clear, ClearType},
};
use ratatui::text::Text;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{
    app::{App, Outcome},
    audio::AudioPlayer,
    cli::Cli,
    components::scene::farewell_line,
    config::Config,
    constants::scene::INTERRUPT_FAREWELL,
    sink::{to_ansi, AnsiSink},
    tui::Tui,
    utils::{initialize_logging, initialize_panic_handler},
};

async fn tokio_main() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging()?;
    initialize_panic_handler()?;
    info!("{}", utils::version());

    let config = Config::new(&cli)?;
    let plain = config.plain || !stdout().is_terminal();
    let interrupt = CancellationToken::new();
    let mut audio = AudioPlayer::spawn(config.music.as_deref());

    let outcome = if plain {
        let watcher = interrupt::spawn_watcher(config.keybindings.clone(), None, interrupt.clone());
        let outcome = App::new(config.animation.clone(), AnsiSink::new(stdout()), interrupt.clone())?.run().await;
        watcher.abort();
        outcome
    } else {
        let mut tui = Tui::new()?;
        tui.enter()?;
        let watcher = interrupt::spawn_watcher(config.keybindings.clone(), tui.take_events(), interrupt.clone());
        let mut app = App::new(config.animation.clone(), tui, interrupt.clone())?;
        let outcome = app.run().await;
        watcher.abort();
        app.into_sink().exit()?;
        outcome
    };
    audio.stop().await;

    if outcome? == Outcome::Interrupted {
        info!("Interrupted, saying goodbye");
        say_goodbye(&mut stdout(), plain, config.animation.width)?;
    }
    Ok(())
}

/// Prints the single farewell line shown after an interrupted run.
fn say_goodbye<W: Write>(out: &mut W, plain: bool, width: u16) -> Result<()> {
    if plain {
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    }
    writeln!(out, "{}", to_ansi(&Text::from(farewell_line(INTERRUPT_FAREWELL, width))))?;
    out.flush()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = tokio_main().await {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
