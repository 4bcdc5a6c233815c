use tokio::{sync::mpsc::UnboundedReceiver, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{action::Action, config::KeyBindings, tui::Event};

/// Cancels `interrupt` on SIGINT or on a key bound to [`Action::Quit`].
///
/// Runs until the token is cancelled, by this watcher or anyone else.
pub fn spawn_watcher(
    keybindings: KeyBindings,
    mut events: Option<UnboundedReceiver<Event>>,
    interrupt: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut signals_available = true;
        loop {
            tokio::select! {
                _ = interrupt.cancelled() => break,
                signal = tokio::signal::ctrl_c(), if signals_available => match signal {
                    Ok(()) => {
                        info!("Received interrupt signal");
                        interrupt.cancel();
                    },
                    Err(err) => {
                        warn!("Could not listen for interrupt signals: {err}");
                        signals_available = false;
                    },
                },
                event = next_event(&mut events) => match event {
                    Some(Event::Key(key)) => {
                        if let Some(Action::Quit) = keybindings.get(&key) {
                            info!("Quit requested with {key:?}");
                            interrupt.cancel();
                        }
                    },
                    Some(event) => debug!("Ignoring {event:?}"),
                    None => events = None,
                },
            }
        }
    })
}

async fn next_event(events: &mut Option<UnboundedReceiver<Event>>) -> Option<Event> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
