//! End-of-session alerts.
//!
//! Alerts are best-effort. Every implementation returns an [`AlertError`]
//! instead of panicking, and the runner downgrades that error to a warning.
//! Playback is delegated to whatever audio player the platform ships with;
//! no audio library is linked.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::AlertError;
use crate::storage::AlertConfig;

/// Something that can tell the user a session is over.
pub trait Alerter {
    /// Short name for logs (e.g. "paplay", "bell", "silent").
    fn name(&self) -> &str;

    fn play_alert(&self) -> Result<(), AlertError>;
}

/// Stands in for the sound path inside player arguments.
pub const SOUND_PLACEHOLDER: &str = "{sound}";

/// Plays a sound file through an external player program.
#[derive(Debug, Clone)]
pub struct CommandAlerter {
    program: String,
    args: Vec<String>,
    sound: PathBuf,
}

impl CommandAlerter {
    /// `program args... <sound>`, or `program args...` with every
    /// [`SOUND_PLACEHOLDER`] replaced when one is present.
    pub fn new(program: impl Into<String>, args: Vec<String>, sound: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args,
            sound: sound.into(),
        }
    }

    pub fn sound(&self) -> &Path {
        &self.sound
    }
}

impl Alerter for CommandAlerter {
    fn name(&self) -> &str {
        &self.program
    }

    fn play_alert(&self) -> Result<(), AlertError> {
        if !self.sound.exists() {
            return Err(AlertError::SoundMissing(self.sound.clone()));
        }

        debug!(player = %self.program, sound = %self.sound.display(), "playing alert");

        let mut command = Command::new(&self.program);
        if self.args.iter().any(|a| a.contains(SOUND_PLACEHOLDER)) {
            let sound = self.sound.to_string_lossy();
            command.args(self.args.iter().map(|a| a.replace(SOUND_PLACEHOLDER, &sound)));
        } else {
            command.args(&self.args).arg(&self.sound);
        }

        let status = command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AlertError::SpawnFailed {
                player: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(AlertError::PlayerFailed {
                player: self.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Rings the terminal bell on stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellAlerter;

impl Alerter for BellAlerter {
    fn name(&self) -> &str {
        "bell"
    }

    fn play_alert(&self) -> Result<(), AlertError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")
            .and_then(|()| out.flush())
            .map_err(AlertError::Bell)
    }
}

/// Does nothing. Used when alerts are disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAlerter;

impl Alerter for SilentAlerter {
    fn name(&self) -> &str {
        "silent"
    }

    fn play_alert(&self) -> Result<(), AlertError> {
        Ok(())
    }
}

/// Pick the alerter for the current platform.
///
/// `custom_sound` replaces the platform's stock sound file. Platforms without
/// a known player fall back to the terminal bell.
pub fn alerter_for_platform(config: &AlertConfig) -> Box<dyn Alerter> {
    if !config.enabled {
        return Box::new(SilentAlerter);
    }

    let custom = config.custom_sound.as_deref().map(PathBuf::from);

    if cfg!(target_os = "macos") {
        let sound = custom.unwrap_or_else(|| PathBuf::from("/System/Library/Sounds/Glass.aiff"));
        Box::new(CommandAlerter::new("afplay", Vec::new(), sound))
    } else if cfg!(target_os = "windows") {
        let sound = custom.unwrap_or_else(|| PathBuf::from(r"C:\Windows\Media\tada.wav"));
        Box::new(windows_player(sound))
    } else if cfg!(target_os = "linux") {
        Box::new(linux_player(custom))
    } else {
        Box::new(BellAlerter)
    }
}

const LINUX_SOUNDS: &[(&str, &str)] = &[
    ("paplay", "/usr/share/sounds/freedesktop/stereo/complete.oga"),
    ("aplay", "/usr/share/sounds/sound-icons/guitar-11.wav"),
    ("aplay", "/usr/share/sounds/alsa/Front_Center.wav"),
];

fn linux_player(custom: Option<PathBuf>) -> CommandAlerter {
    if let Some(sound) = custom {
        // aplay only handles WAV; PulseAudio takes the rest.
        let program = if sound.extension().is_some_and(|e| e.eq_ignore_ascii_case("wav")) {
            "aplay"
        } else {
            "paplay"
        };
        return CommandAlerter::new(program, quiet_args(program), sound);
    }

    let (program, sound) = LINUX_SOUNDS
        .iter()
        .find(|(_, sound)| Path::new(sound).exists())
        .copied()
        .unwrap_or(LINUX_SOUNDS[0]);
    CommandAlerter::new(program, quiet_args(program), sound)
}

fn quiet_args(program: &str) -> Vec<String> {
    match program {
        "aplay" => vec!["-q".to_string()],
        _ => Vec::new(),
    }
}

fn windows_player(sound: PathBuf) -> CommandAlerter {
    let script = format!("(New-Object Media.SoundPlayer '{SOUND_PLACEHOLDER}').PlaySync()");
    CommandAlerter::new(
        "powershell",
        vec!["-NoProfile".into(), "-Command".into(), script],
        sound,
    )
}
