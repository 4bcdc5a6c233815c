use std::{
    ffi::OsString,
    path::Path,
    process::Stdio,
    time::Duration,
};

use tokio::process::{Child, Command};
use tracing::{info, warn};

const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Background music played by an external player. Failing to start it never stops the show.
#[derive(Debug, Default)]
pub struct AudioPlayer {
    child: Option<Child>,
}

impl AudioPlayer {
    pub fn spawn(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };
        if !path.exists() {
            warn!("Music file {} does not exist, playing without sound", path.display());
            return Self::default();
        }

        let (program, args) = player_invocation(path);
        let spawned = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn();

        match spawned {
            Ok(child) => {
                info!("Playing {} with {program}", path.display());
                Self { child: Some(child) }
            },
            Err(err) => {
                warn!("Could not start music with {program}: {err}");
                Self::default()
            },
        }
    }

    pub fn is_playing(&self) -> bool {
        self.child.is_some()
    }

    /// Asks the player to quit and waits a bounded time for it.
    pub async fn stop(&mut self) {
        let Some(mut child) = self.child.take() else {
            return;
        };
        if let Err(err) = child.start_kill() {
            warn!("Could not stop music player: {err}");
            return;
        }
        match tokio::time::timeout(STOP_TIMEOUT, child.wait()).await {
            Ok(Ok(status)) => info!("Music player exited with {status}"),
            Ok(Err(err)) => warn!("Could not wait for music player: {err}"),
            Err(_) => warn!("Music player did not exit within {STOP_TIMEOUT:?}"),
        }
    }
}

fn player_invocation(path: &Path) -> (&'static str, Vec<OsString>) {
    let mut args = Vec::new();
    let program = if cfg!(target_os = "macos") {
        "afplay"
    } else {
        args.extend(["-nodisp", "-autoexit", "-loglevel", "quiet"].map(OsString::from));
        "ffplay"
    };
    args.push(path.as_os_str().to_os_string());
    (program, args)
}
