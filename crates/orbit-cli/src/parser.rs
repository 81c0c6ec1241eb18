//! Main CLI parser and top-level argument handling.
//!
//! Every global option can also be set through an `ORBIT_*` environment
//! variable (or a `.env` file); flags win over the environment.

use clap::{Parser, ValueEnum};

use crate::commands::Commands;

/// How answers are spoken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SpeechMode {
    /// Speak through an external synthesizer (`espeak-ng` by default).
    #[default]
    Voice,
    /// Print what would be spoken to stderr.
    Text,
    /// Stay silent.
    Off,
}

/// Command-line interface for the space guide.
#[derive(Parser)]
#[command(name = "orbit")]
#[command(about = "Ask a friendly space guide about planets, stars and the ISS")]
#[command(version)]
pub struct Cli {
    /// Base URL of the space guide backend
    #[arg(long = "api-url", env = "ORBIT_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "ORBIT_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Observer latitude for ISS lookups
    #[arg(long = "lat", env = "ORBIT_LATITUDE", global = true, allow_hyphen_values = true)]
    pub latitude: Option<f64>,

    /// Observer longitude for ISS lookups
    #[arg(long = "lng", env = "ORBIT_LONGITUDE", global = true, allow_hyphen_values = true)]
    pub longitude: Option<f64>,

    /// How answers are spoken
    #[arg(long = "speech", env = "ORBIT_SPEECH", value_enum, global = true, default_value_t)]
    pub speech: SpeechMode,

    /// Synthesizer program used by `--speech voice`
    #[arg(long = "tts-program", env = "ORBIT_TTS_PROGRAM", global = true)]
    pub tts_program: Option<String>,

    /// Voice name passed to the synthesizer
    #[arg(long = "tts-voice", env = "ORBIT_TTS_VOICE", global = true)]
    pub tts_voice: Option<String>,

    /// Speech rate multiplier (0.1-10)
    #[arg(long = "speech-rate", env = "ORBIT_SPEECH_RATE", global = true)]
    pub speech_rate: Option<f32>,

    /// Speech pitch multiplier (0-2)
    #[arg(long = "speech-pitch", env = "ORBIT_SPEECH_PITCH", global = true)]
    pub speech_pitch: Option<f32>,

    /// Speech volume (0-1)
    #[arg(long = "speech-volume", env = "ORBIT_SPEECH_VOLUME", global = true)]
    pub speech_volume: Option<f32>,

    /// Recognizer command for voice input (e.g. "my-stt --lang en")
    #[arg(long = "stt-command", env = "ORBIT_STT_COMMAND", global = true)]
    pub stt_command: Option<String>,

    /// Pause between a voice transcript and its submission, in milliseconds
    #[arg(long = "transcript-delay", env = "ORBIT_TRANSCRIPT_DELAY_MS", global = true)]
    pub transcript_delay_ms: Option<u64>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
