//! Speech output coordination.
//!
//! [`SpeechCoordinator`] guarantees that at most one playback is live and
//! that only the current request's speech is ever heard:
//!
//! - Requests whose token is no longer current are dropped on arrival, and
//!   again when a playback handle is acquired.
//! - Every playback holds a lease with its own cancellation token, handed to
//!   the engine. Revoking a lease (by [`stop_all`](SpeechOutputPort::stop_all)
//!   or a newer playback) cancels that token under the same lock, so an
//!   engine that has not started yet never starts. Completions release by
//!   lease; a completion whose lease was already revoked has no further
//!   effect.
//! - Pre-rendered audio that fails to decode or play falls back to the
//!   synthetic voice exactly once, unless the playback was stopped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use orbit_core::{
    AppEvent, AppEventEmitter, RequestClock, RequestToken, SpeechOutputPort, SpeechProsody,
    SpeechRequest,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::backend::{AudioClip, AudioPlayer, Speaker, Utterance};
use crate::error::SpeechError;
use crate::text_utils::clean_for_speech;

/// Unique id of one playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeaseId(u64);

/// Which voice a playback uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackKind {
    /// Pre-rendered audio from the backend.
    Natural,
    /// Local synthetic voice.
    Synthetic,
}

/// The live playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackHandle {
    pub lease: LeaseId,
    pub kind: PlaybackKind,
    pub token: RequestToken,
}

#[derive(Debug)]
struct LivePlayback {
    handle: PlaybackHandle,
    cancel: CancellationToken,
}

/// How a natural playback ended.
enum NaturalOutcome {
    Finished,
    Stopped,
    Failed,
}

/// Speech output with natural → synthetic fallback.
pub struct SpeechCoordinator {
    speaker: Arc<dyn Speaker>,
    player: Arc<dyn AudioPlayer>,
    emitter: Arc<dyn AppEventEmitter>,
    clock: RequestClock,
    prosody: SpeechProsody,
    live: Mutex<Option<LivePlayback>>,
    lease_counter: AtomicU64,
}

impl std::fmt::Debug for SpeechCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechCoordinator")
            .field("prosody", &self.prosody)
            .field("live", &self.live_handle())
            .finish_non_exhaustive()
    }
}

impl SpeechCoordinator {
    /// Create a coordinator.
    ///
    /// `clock` must be shared with the ask session so token currency agrees.
    pub fn new(
        speaker: Arc<dyn Speaker>,
        player: Arc<dyn AudioPlayer>,
        emitter: Arc<dyn AppEventEmitter>,
        clock: RequestClock,
    ) -> Self {
        Self {
            speaker,
            player,
            emitter,
            clock,
            prosody: SpeechProsody::default(),
            live: Mutex::new(None),
            lease_counter: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn with_prosody(mut self, prosody: SpeechProsody) -> Self {
        self.prosody = prosody;
        self
    }

    /// The live playback, if any.
    pub fn live_handle(&self) -> Option<PlaybackHandle> {
        self.lock_live().as_ref().map(|live| live.handle)
    }

    fn lock_live(&self) -> MutexGuard<'_, Option<LivePlayback>> {
        self.live.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new live playback for `token`.
    ///
    /// Returns `None` if the token went stale in the meantime. The returned
    /// cancellation token fires when the lease is revoked.
    fn acquire(
        &self,
        kind: PlaybackKind,
        token: RequestToken,
    ) -> Option<(LeaseId, CancellationToken)> {
        let mut live = self.lock_live();
        if !self.clock.is_current(token) {
            return None;
        }
        let lease = LeaseId(self.lease_counter.fetch_add(1, Ordering::Relaxed));
        let cancel = CancellationToken::new();
        let next = LivePlayback {
            handle: PlaybackHandle { lease, kind, token },
            cancel: cancel.clone(),
        };
        if let Some(previous) = live.replace(next) {
            debug!(previous = ?previous.handle, "Replacing live playback");
            previous.cancel.cancel();
        }
        Some((lease, cancel))
    }

    /// Release `lease` if it is still the live playback.
    fn release(&self, lease: LeaseId) -> bool {
        let mut live = self.lock_live();
        if live.as_ref().is_some_and(|live| live.handle.lease == lease) {
            *live = None;
            true
        } else {
            false
        }
    }

    /// Revoke the live lease, cancelling its token.
    fn revoke(&self) -> Option<PlaybackHandle> {
        let previous = self.lock_live().take()?;
        previous.cancel.cancel();
        Some(previous.handle)
    }

    /// Stop the live playback without touching the stop control.
    fn halt_live(&self) {
        if let Some(handle) = self.revoke() {
            debug!(?handle, "Halting live playback");
        }
        self.speaker.cancel();
        self.player.stop();
    }

    async fn play_natural(&self, clip: AudioClip, token: RequestToken) -> NaturalOutcome {
        self.halt_live();
        let Some((lease, cancel)) = self.acquire(PlaybackKind::Natural, token) else {
            debug!(%token, "Token went stale before playback");
            return NaturalOutcome::Stopped;
        };

        self.emitter.emit(AppEvent::stop_control(true));
        let result = self.player.play(clip, cancel).await;
        let owned = self.release(lease);
        if owned {
            self.emitter.emit(AppEvent::stop_control(false));
        }

        match result {
            Ok(()) => NaturalOutcome::Finished,
            Err(err) if owned && !err.is_cancelled() => {
                warn!(%token, error = %err, "Natural audio failed; falling back to synthetic voice");
                NaturalOutcome::Failed
            }
            Err(_) => NaturalOutcome::Stopped,
        }
    }

    async fn speak_synthetic(&self, text: &str, token: RequestToken) {
        if !self.clock.is_current(token) {
            debug!(%token, "Dropping stale synthetic speech");
            return;
        }
        let text = clean_for_speech(text);
        if text.is_empty() {
            return;
        }

        self.speaker.cancel();
        let Some((lease, cancel)) = self.acquire(PlaybackKind::Synthetic, token) else {
            return;
        };

        self.emitter.emit(AppEvent::stop_control(true));
        let result = self
            .speaker
            .speak(
                Utterance {
                    text,
                    prosody: self.prosody,
                },
                cancel,
            )
            .await;
        if self.release(lease) {
            self.emitter.emit(AppEvent::stop_control(false));
        }

        match result {
            Ok(()) => debug!(%token, "Utterance finished"),
            Err(SpeechError::Cancelled) => debug!(%token, "Utterance cancelled"),
            Err(err) => warn!(%token, error = %err, "Synthetic speech failed"),
        }
    }
}

#[async_trait]
impl SpeechOutputPort for SpeechCoordinator {
    async fn speak(&self, request: SpeechRequest) {
        let SpeechRequest {
            text,
            audio_base64,
            token,
        } = request;

        if !self.clock.is_current(token) {
            debug!(%token, "Dropping speech for stale request");
            return;
        }

        let Some(audio) = audio_base64 else {
            self.speak_synthetic(&text, token).await;
            return;
        };

        match AudioClip::from_base64(&audio) {
            Ok(clip) => {
                if matches!(
                    self.play_natural(clip, token).await,
                    NaturalOutcome::Failed
                ) {
                    self.speak_synthetic(&text, token).await;
                }
            }
            Err(err) => {
                warn!(%token, error = %err, "Undecodable audio; using synthetic voice");
                self.speak_synthetic(&text, token).await;
            }
        }
    }

    fn stop_all(&self) {
        let had_live = self.revoke().is_some();
        self.speaker.cancel();
        self.player.stop();
        if had_live {
            debug!("All speech stopped");
            self.emitter.emit(AppEvent::stop_control(false));
        }
    }
}
