//! Alarm sound playback through an external player

use tokio::{process::Command, runtime::Handle};
use tracing::{debug, info, warn};

/// Sound played when an alarm expires
pub const DEFAULT_ALARM_SOUND: &str = "https://www.soundjay.com/button/beep-07.wav";

/// Player invoked for the alarm sound; the sound resource is appended last
pub const DEFAULT_PLAYER: &str = "ffplay -nodisp -autoexit -loglevel quiet";

/// Fire-and-forget playback capability
pub trait AlarmPlayer: Send + Sync {
    /// Start playing the alarm sound. Must not block and reports nothing back.
    fn play(&self);
}

/// Plays the alarm by spawning an external command
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    program: String,
    args: Vec<String>,
    sound: String,
}

impl CommandPlayer {
    /// Build from a whitespace separated command line such as
    /// `ffplay -nodisp -autoexit`. `None` for an empty command line.
    pub fn from_command_line(command_line: &str, sound: impl Into<String>) -> Option<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts.next()?;

        Some(Self {
            program,
            args: parts.collect(),
            sound: sound.into(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).arg(&self.sound).kill_on_drop(false);
        command
    }
}

impl AlarmPlayer for CommandPlayer {
    fn play(&self) {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No runtime available, skipping alarm playback");
            return;
        };

        info!("Playing alarm sound {} with {}", self.sound, self.program);
        let mut command = self.command();
        let program = self.program.clone();

        runtime.spawn(async move {
            match command.output().await {
                Ok(output) if output.status.success() => {
                    debug!("{} finished playing alarm", program);
                }
                Ok(output) => {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    warn!("{} failed to play alarm: {}", program, stderr.trim());
                }
                Err(e) => warn!("Failed to execute {}: {}", program, e),
            }
        });
    }
}

/// Player for `--mute`: the expiry is only logged
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentPlayer;

impl AlarmPlayer for SilentPlayer {
    fn play(&self) {
        info!("Alarm expired (playback muted)");
    }
}

/// Check that the player program can be executed at all
pub async fn check_player_available(player: &CommandPlayer) -> Result<(), String> {
    Command::new(player.program())
        .arg("-version")
        .output()
        .await
        .map_err(|e| format!("{} is not available: {}", player.program(), e))?;

    info!("{} is available", player.program());
    Ok(())
}
