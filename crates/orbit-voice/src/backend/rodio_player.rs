//! Pre-rendered audio playback via `rodio`.
//!
//! Each clip plays on its own thread (the output stream is not `Send`); the
//! async side waits on a oneshot for the outcome.

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use super::{AudioClip, AudioPlayer};
use crate::error::SpeechError;

const STOP_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// [`AudioPlayer`] for MP3 clips on the default output device.
#[derive(Debug)]
pub struct RodioPlayer {
    volume: f32,
    /// Stop flag of the clip currently playing.
    current: Mutex<Option<Arc<AtomicBool>>>,
}

impl RodioPlayer {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
            current: Mutex::new(None),
        }
    }
}

fn play_blocking(bytes: Vec<u8>, volume: f32, stop: &AtomicBool) -> Result<(), SpeechError> {
    let (_stream, handle) =
        OutputStream::try_default().map_err(|e| SpeechError::Playback(e.to_string()))?;
    let sink = Sink::try_new(&handle).map_err(|e| SpeechError::Playback(e.to_string()))?;
    let source =
        Decoder::new(Cursor::new(bytes)).map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;

    sink.set_volume(volume);
    sink.append(source);
    tracing::debug!("Audio playback started");

    while !sink.empty() {
        if stop.load(Ordering::SeqCst) {
            sink.stop();
            return Err(SpeechError::Cancelled);
        }
        std::thread::sleep(STOP_POLL_INTERVAL);
    }
    tracing::debug!("Playback finished naturally");
    Ok(())
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, clip: AudioClip, cancel: CancellationToken) -> Result<(), SpeechError> {
        let stop = Arc::new(AtomicBool::new(false));
        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if cancel.is_cancelled() {
                return Err(SpeechError::Cancelled);
            }
            if let Some(previous) = current.replace(Arc::clone(&stop)) {
                previous.store(true, Ordering::SeqCst);
            }
        }

        let (tx, rx) = oneshot::channel();
        let volume = self.volume;
        let bytes = clip.into_bytes();
        let thread_stop = Arc::clone(&stop);
        std::thread::spawn(move || {
            let _ = tx.send(play_blocking(bytes, volume, &thread_stop));
        });

        let result = tokio::select! {
            () = cancel.cancelled() => {
                stop.store(true, Ordering::SeqCst);
                Err(SpeechError::Cancelled)
            }
            result = rx => result
                .unwrap_or_else(|_| Err(SpeechError::Playback("playback thread exited".to_string()))),
        };

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.as_ref().is_some_and(|flag| Arc::ptr_eq(flag, &stop)) {
            *current = None;
        }
        result
    }

    fn stop(&self) {
        if let Some(flag) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!("Audio playback stopped");
        }
    }
}
