//! Settings domain types and validation.
//!
//! Pure data: loading from the environment or flags is the front end's job.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_OBSERVER_LATITUDE, DEFAULT_OBSERVER_LONGITUDE, ObserverLocation};

/// Default backend address (local development server).
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Delay between a final voice transcript and its automatic submission.
pub const DEFAULT_TRANSCRIPT_DELAY_MS: u64 = 500;

pub const DEFAULT_SPEECH_RATE: f32 = 0.9;
pub const DEFAULT_SPEECH_PITCH: f32 = 1.1;
pub const DEFAULT_SPEECH_VOLUME: f32 = 0.8;

/// Prosody for the synthetic voice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechProsody {
    /// Speaking rate multiplier (1.0 = engine default).
    pub rate: f32,
    /// Pitch multiplier (1.0 = engine default).
    pub pitch: f32,
    /// Volume in `0.0..=1.0`.
    pub volume: f32,
}

impl Default for SpeechProsody {
    fn default() -> Self {
        Self {
            rate: DEFAULT_SPEECH_RATE,
            pitch: DEFAULT_SPEECH_PITCH,
            volume: DEFAULT_SPEECH_VOLUME,
        }
    }
}

/// Application settings.
///
/// All fields are optional so partial sources (env, flags) can be layered;
/// use the `effective_*` accessors to read them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the space guide backend.
    pub api_base_url: Option<String>,

    /// Per-request timeout in seconds (1-300).
    pub request_timeout_secs: Option<u64>,

    /// Delay before a voice transcript is submitted, in milliseconds.
    pub transcript_delay_ms: Option<u64>,

    pub observer_latitude: Option<f64>,
    pub observer_longitude: Option<f64>,

    pub speech_rate: Option<f32>,
    pub speech_pitch: Option<f32>,
    pub speech_volume: Option<f32>,
}

impl Settings {
    /// Create settings with every field populated from the defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
            transcript_delay_ms: Some(DEFAULT_TRANSCRIPT_DELAY_MS),
            observer_latitude: Some(DEFAULT_OBSERVER_LATITUDE),
            observer_longitude: Some(DEFAULT_OBSERVER_LONGITUDE),
            speech_rate: Some(DEFAULT_SPEECH_RATE),
            speech_pitch: Some(DEFAULT_SPEECH_PITCH),
            speech_volume: Some(DEFAULT_SPEECH_VOLUME),
        }
    }

    #[must_use]
    pub fn effective_api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    #[must_use]
    pub fn effective_request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    #[must_use]
    pub fn effective_transcript_delay(&self) -> Duration {
        Duration::from_millis(
            self.transcript_delay_ms
                .unwrap_or(DEFAULT_TRANSCRIPT_DELAY_MS),
        )
    }

    /// Observer location, falling back per coordinate.
    #[must_use]
    pub fn observer(&self) -> ObserverLocation {
        ObserverLocation {
            latitude: self.observer_latitude.unwrap_or(DEFAULT_OBSERVER_LATITUDE),
            longitude: self
                .observer_longitude
                .unwrap_or(DEFAULT_OBSERVER_LONGITUDE),
        }
    }

    /// Synthetic voice prosody, falling back per field.
    #[must_use]
    pub fn prosody(&self) -> SpeechProsody {
        SpeechProsody {
            rate: self.speech_rate.unwrap_or(DEFAULT_SPEECH_RATE),
            pitch: self.speech_pitch.unwrap_or(DEFAULT_SPEECH_PITCH),
            volume: self.speech_volume.unwrap_or(DEFAULT_SPEECH_VOLUME),
        }
    }

    /// Overlay every `Some` field of `other` onto `self`.
    pub fn merge(&mut self, other: &Self) {
        if let Some(url) = &other.api_base_url {
            self.api_base_url = Some(url.clone());
        }
        if other.request_timeout_secs.is_some() {
            self.request_timeout_secs = other.request_timeout_secs;
        }
        if other.transcript_delay_ms.is_some() {
            self.transcript_delay_ms = other.transcript_delay_ms;
        }
        if other.observer_latitude.is_some() {
            self.observer_latitude = other.observer_latitude;
        }
        if other.observer_longitude.is_some() {
            self.observer_longitude = other.observer_longitude;
        }
        if other.speech_rate.is_some() {
            self.speech_rate = other.speech_rate;
        }
        if other.speech_pitch.is_some() {
            self.speech_pitch = other.speech_pitch;
        }
        if other.speech_volume.is_some() {
            self.speech_volume = other.speech_volume;
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("API base URL must start with http:// or https://, got {0:?}")]
    InvalidBaseUrl(String),

    #[error("Request timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),

    #[error("Transcript delay must be at most 10,000 ms, got {0}")]
    InvalidTranscriptDelay(u64),

    #[error("Latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),

    #[error("Speech {field} must be between {min} and {max}, got {value}")]
    InvalidProsody {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
}

fn check_prosody(
    field: &'static str,
    value: Option<f32>,
    min: f32,
    max: f32,
) -> Result<(), SettingsError> {
    match value {
        Some(value) if !(min..=max).contains(&value) => Err(SettingsError::InvalidProsody {
            field,
            min,
            max,
            value,
        }),
        _ => Ok(()),
    }
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if let Some(url) = &settings.api_base_url {
        let trimmed = url.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(SettingsError::InvalidBaseUrl(url.clone()));
        }
    }

    if let Some(timeout) = settings.request_timeout_secs {
        if !(1..=300).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    if let Some(delay) = settings.transcript_delay_ms {
        if delay > 10_000 {
            return Err(SettingsError::InvalidTranscriptDelay(delay));
        }
    }

    if let Some(lat) = settings.observer_latitude {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(SettingsError::InvalidLatitude(lat));
        }
    }

    if let Some(lng) = settings.observer_longitude {
        if !(-180.0..=180.0).contains(&lng) {
            return Err(SettingsError::InvalidLongitude(lng));
        }
    }

    // Ranges follow the Web Speech API limits.
    check_prosody("rate", settings.speech_rate, 0.1, 10.0)?;
    check_prosody("pitch", settings.speech_pitch, 0.0, 2.0)?;
    check_prosody("volume", settings.speech_volume, 0.0, 1.0)?;

    Ok(())
}
