//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where concrete adapters are chosen and
//! wired together:
//! - HTTP client (via orbit-http) behind the ask, satellite and status ports
//! - Speech output (via orbit-voice) sharing the session's request clock
//! - Voice input, when a recognizer command is configured
//! - Core services (via orbit-core)

use std::sync::Arc;

use orbit_core::{
    AppEventEmitter, AskSession, NoopSpeechOutput, QuestionSink, RequestClock, SatelliteTracker,
    ServiceStatusPort, Settings, SpeechOutputPort, validate_settings,
};
use orbit_http::{ApiClientConfig, DefaultApiClient};
use orbit_voice::backend::command_recognizer::{CommandRecognizer, CommandRecognizerConfig};
use orbit_voice::backend::command_speaker::{CommandSpeaker, CommandSpeakerConfig};
use orbit_voice::backend::text_speaker::TextSpeaker;
use orbit_voice::{AudioPlayer, Speaker, SpeechCoordinator, VoiceInput};
use tracing::debug;

use crate::error::CliError;
use crate::parser::{Cli, SpeechMode};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Validated settings.
    pub settings: Settings,
    /// How answers are spoken.
    pub speech: SpeechMode,
    /// Synthesizer for [`SpeechMode::Voice`].
    pub speaker: CommandSpeakerConfig,
    /// Recognizer for voice input; `None` disables `/voice`.
    pub recognizer: Option<CommandRecognizerConfig>,
}

impl CliConfig {
    /// Layer flags and environment over the defaults and validate.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let mut settings = Settings::with_defaults();
        settings.merge(&Settings {
            api_base_url: cli.api_url.clone(),
            request_timeout_secs: cli.timeout_secs,
            transcript_delay_ms: cli.transcript_delay_ms,
            observer_latitude: cli.latitude,
            observer_longitude: cli.longitude,
            speech_rate: cli.speech_rate,
            speech_pitch: cli.speech_pitch,
            speech_volume: cli.speech_volume,
        });
        validate_settings(&settings)?;

        let mut speaker = CommandSpeakerConfig::default();
        if let Some(program) = &cli.tts_program {
            speaker.program.clone_from(program);
        }
        if let Some(voice) = &cli.tts_voice {
            speaker.voice = Some(voice.clone());
        }

        let recognizer = cli
            .stt_command
            .as_deref()
            .map(parse_recognizer_command)
            .transpose()?;

        Ok(Self {
            settings,
            speech: cli.speech,
            speaker,
            recognizer,
        })
    }
}

/// Split `"program arg1 arg2"` into a recognizer config.
fn parse_recognizer_command(command: &str) -> Result<CommandRecognizerConfig, CliError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| CliError::Config("--stt-command is empty".to_string()))?;
    Ok(CommandRecognizerConfig::new(program).with_args(parts))
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    pub settings: Settings,
    /// Question lifecycle: cancellation, history, display, speech.
    pub session: AskSession,
    /// Speech output shared with the session.
    pub speech: Arc<dyn SpeechOutputPort>,
    pub tracker: SatelliteTracker,
    pub status: Arc<dyn ServiceStatusPort>,
    /// Voice capture, if a recognizer is configured.
    pub voice: Option<VoiceInput>,
}

impl std::fmt::Debug for CliContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CliContext")
            .field("settings", &self.settings)
            .field("session", &self.session)
            .field("voice", &self.voice)
            .finish_non_exhaustive()
    }
}

/// Bootstrap the CLI application.
///
/// This is the composition root. It:
/// 1. Creates the HTTP client from the settings
/// 2. Creates one request clock shared by the session and speech output
/// 3. Picks the speech engines for the configured mode
/// 4. Assembles the ask session, satellite tracker and voice input
pub fn bootstrap(
    config: &CliConfig,
    emitter: Arc<dyn AppEventEmitter>,
) -> Result<CliContext, CliError> {
    let settings = config.settings.clone();

    let client = Arc::new(DefaultApiClient::new(
        &ApiClientConfig::new()
            .with_base_url(settings.effective_api_base_url())
            .with_timeout(settings.effective_request_timeout()),
    )?);
    debug!(base_url = %client.base_url(), "HTTP client ready");

    let clock = RequestClock::new();
    let speech = build_speech(config, &settings, Arc::clone(&emitter), clock.clone());

    let session = AskSession::new(
        client.clone(),
        Arc::clone(&speech),
        Arc::clone(&emitter),
        clock,
    );
    let tracker = SatelliteTracker::new(client.clone(), Arc::clone(&emitter), settings.observer());

    let voice = config.recognizer.clone().map(|recognizer| {
        let sink: Arc<dyn QuestionSink> = Arc::new(session.clone());
        VoiceInput::new(
            Arc::new(CommandRecognizer::new(recognizer)),
            sink,
            Arc::clone(&emitter),
            settings.effective_transcript_delay(),
        )
    });

    Ok(CliContext {
        settings,
        session,
        speech,
        tracker,
        status: client,
        voice,
    })
}

fn build_speech(
    config: &CliConfig,
    settings: &Settings,
    emitter: Arc<dyn AppEventEmitter>,
    clock: RequestClock,
) -> Arc<dyn SpeechOutputPort> {
    let speaker: Arc<dyn Speaker> = match config.speech {
        SpeechMode::Off => return Arc::new(NoopSpeechOutput),
        SpeechMode::Text => Arc::new(TextSpeaker::stderr()),
        SpeechMode::Voice => Arc::new(CommandSpeaker::new(config.speaker.clone())),
    };
    let prosody = settings.prosody();
    Arc::new(
        SpeechCoordinator::new(speaker, build_player(prosody.volume), emitter, clock)
            .with_prosody(prosody),
    )
}

#[cfg(feature = "rodio")]
fn build_player(volume: f32) -> Arc<dyn AudioPlayer> {
    Arc::new(orbit_voice::backend::rodio_player::RodioPlayer::new(volume))
}

#[cfg(not(feature = "rodio"))]
fn build_player(_volume: f32) -> Arc<dyn AudioPlayer> {
    Arc::new(orbit_voice::UnavailablePlayer)
}
