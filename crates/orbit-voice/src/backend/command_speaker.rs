//! Synthetic voice via an `espeak-ng` compatible command.
//!
//! Each utterance runs one child process; [`cancel`](Speaker::cancel) kills
//! it. The program must accept the `espeak-ng` flags `-s` (words per
//! minute), `-p` (pitch 0-99), `-a` (amplitude 0-200) and `-v` (voice).

use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{Speaker, Utterance};
use crate::error::SpeechError;

const BASE_WORDS_PER_MINUTE: f32 = 175.0;
const BASE_PITCH: f32 = 50.0;
const BASE_AMPLITUDE: f32 = 100.0;

/// Command speaker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandSpeakerConfig {
    /// Program to run (looked up on `PATH`).
    pub program: String,
    /// Voice name passed with `-v`.
    pub voice: Option<String>,
}

impl Default for CommandSpeakerConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            voice: Some("en-us".to_string()),
        }
    }
}

/// The utterance whose process is running.
#[derive(Debug)]
struct ActiveUtterance {
    id: u64,
    cancel: CancellationToken,
}

/// [`Speaker`] backed by a subprocess per utterance.
#[derive(Debug, Default)]
pub struct CommandSpeaker {
    config: CommandSpeakerConfig,
    current: Mutex<Option<ActiveUtterance>>,
    next_id: AtomicU64,
}

impl CommandSpeaker {
    pub fn new(config: CommandSpeakerConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
            next_id: AtomicU64::new(0),
        }
    }

    pub const fn config(&self) -> &CommandSpeakerConfig {
        &self.config
    }

    /// Whether an utterance process is running.
    pub fn is_speaking(&self) -> bool {
        self.lock_current().is_some()
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<ActiveUtterance>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forget utterance `id` if it is still the registered one.
    fn finish(&self, id: u64) {
        let mut current = self.lock_current();
        if current.as_ref().is_some_and(|active| active.id == id) {
            *current = None;
        }
    }

    async fn run(&self, utterance: &Utterance, cancel: &CancellationToken) -> Result<(), SpeechError> {
        let mut child = self.command(utterance).spawn()?;
        debug!(program = %self.config.program, chars = utterance.text.len(), "Utterance started");

        let status = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            status = child.wait() => Some(status),
        };

        let Some(status) = status else {
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "Speech process already exited");
            }
            return Err(SpeechError::Cancelled);
        };

        let status = status?;
        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Synthesis(format!(
                "{} exited with {status}",
                self.config.program
            )))
        }
    }

    fn command(&self, utterance: &Utterance) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(espeak_args(utterance, self.config.voice.as_deref()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        cmd
    }
}

/// Map prosody multipliers onto `espeak-ng` flags.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn espeak_args(utterance: &Utterance, voice: Option<&str>) -> Vec<String> {
    let prosody = utterance.prosody;
    let wpm = (BASE_WORDS_PER_MINUTE * prosody.rate).round().clamp(80.0, 450.0) as u32;
    let pitch = (BASE_PITCH * prosody.pitch).round().clamp(0.0, 99.0) as u32;
    let amplitude = (BASE_AMPLITUDE * prosody.volume).round().clamp(0.0, 200.0) as u32;

    let mut args = vec![
        "-s".to_string(),
        wpm.to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
    ];
    if let Some(voice) = voice {
        args.push("-v".to_string());
        args.push(voice.to_string());
    }
    args.push("--".to_string());
    args.push(utterance.text.clone());
    args
}

#[async_trait]
impl Speaker for CommandSpeaker {
    async fn speak(
        &self,
        utterance: Utterance,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = cancel.child_token();
        {
            let mut current = self.lock_current();
            if cancel.is_cancelled() {
                return Err(SpeechError::Cancelled);
            }
            if let Some(previous) = current.replace(ActiveUtterance {
                id,
                cancel: cancel.clone(),
            }) {
                previous.cancel.cancel();
            }
        }

        let result = self.run(&utterance, &cancel).await;
        self.finish(id);
        result
    }

    fn cancel(&self) {
        if let Some(active) = self.lock_current().take() {
            active.cancel.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::SpeechProsody;

    fn utterance(prosody: SpeechProsody) -> Utterance {
        Utterance {
            text: "Hello, space explorer!".to_string(),
            prosody,
        }
    }

    #[test]
    fn prosody_maps_to_espeak_flags() {
        let prosody = SpeechProsody {
            rate: 1.0,
            ..SpeechProsody::default()
        };
        let args = espeak_args(&utterance(prosody), Some("en-us"));
        assert_eq!(
            args,
            [
                "-s", "175", "-p", "55", "-a", "80", "-v", "en-us", "--",
                "Hello, space explorer!"
            ]
        );
    }

    #[test]
    fn prosody_is_clamped() {
        let args = espeak_args(
            &utterance(SpeechProsody {
                rate: 10.0,
                pitch: 2.0,
                volume: 0.0,
            }),
            None,
        );
        assert_eq!(&args[..6], ["-s", "450", "-p", "99", "-a", "0"]);
        assert_eq!(args[6], "--");
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: CommandSpeakerConfig =
            serde_json::from_str(r#"{"program": "say"}"#).unwrap();
        assert_eq!(config.program, "say");
        assert_eq!(config.voice.as_deref(), Some("en-us"));
    }

    #[tokio::test]
    async fn missing_program_is_io_error() {
        let speaker = CommandSpeaker::new(CommandSpeakerConfig {
            program: "orbit-test-no-such-speech-program".to_string(),
            voice: None,
        });
        let result = speaker
            .speak(utterance(SpeechProsody::default()), CancellationToken::new())
            .await;
        assert!(matches!(result, Err(SpeechError::Io(_))));
        assert!(!speaker.is_speaking());
    }

    #[tokio::test]
    async fn cancelled_token_never_spawns() {
        let speaker = CommandSpeaker::new(CommandSpeakerConfig {
            program: "orbit-test-no-such-speech-program".to_string(),
            voice: None,
        });
        let cancel = CancellationToken::new();
        cancel.cancel();

        // A spawn attempt would surface as an Io error.
        let result = speaker.speak(utterance(SpeechProsody::default()), cancel).await;
        assert!(matches!(result, Err(SpeechError::Cancelled)));
        assert!(!speaker.is_speaking());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn finished_utterance_is_forgotten() {
        let speaker = CommandSpeaker::new(CommandSpeakerConfig {
            program: "true".to_string(),
            voice: None,
        });
        speaker
            .speak(utterance(SpeechProsody::default()), CancellationToken::new())
            .await
            .unwrap();

        assert!(!speaker.is_speaking());
    }

    #[test]
    fn cancel_without_utterance_is_noop() {
        let speaker = CommandSpeaker::default();
        speaker.cancel();
        speaker.cancel();
    }
}
