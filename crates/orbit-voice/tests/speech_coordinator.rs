//! Integration tests for `SpeechCoordinator`.
//!
//! Fake speaker/player backends record every call; the player can be told
//! to succeed, fail, or block until stopped.
//!
//! # What is tested
//!
//! - Natural audio plays without touching the synthetic voice
//! - Playback failure falls back to synthetic speech exactly once
//! - Undecodable audio goes straight to synthetic speech
//! - Stale tokens are dropped
//! - `stop_all` during natural playback suppresses the fallback
//! - `stop_all` is idempotent
//! - A request superseded after its lease was acquired is never heard

use std::sync::{Arc, Mutex, OnceLock, Weak};

use async_trait::async_trait;
use orbit_core::{
    AppEvent, AppEventEmitter, ChannelEmitter, RequestClock, SpeechOutputPort, SpeechProsody,
    SpeechRequest,
};
use orbit_voice::{AudioClip, AudioPlayer, SpeechCoordinator, SpeechError, Speaker, Utterance};
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

// ── Fake backends ──────────────────────────────────────────────────

#[derive(Default)]
struct FakeSpeaker {
    utterances: Mutex<Vec<Utterance>>,
    cancels: Mutex<usize>,
}

impl FakeSpeaker {
    fn texts(&self) -> Vec<String> {
        self.utterances
            .lock()
            .unwrap()
            .iter()
            .map(|u| u.text.clone())
            .collect()
    }
}

#[async_trait]
impl Speaker for FakeSpeaker {
    async fn speak(
        &self,
        utterance: Utterance,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError> {
        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }
        self.utterances.lock().unwrap().push(utterance);
        Ok(())
    }

    fn cancel(&self) {
        *self.cancels.lock().unwrap() += 1;
    }
}

#[derive(Clone, Copy)]
enum PlayerMode {
    Succeed,
    Fail,
    BlockUntilStopped,
}

struct FakePlayer {
    mode: PlayerMode,
    plays: Mutex<usize>,
    stops: Mutex<usize>,
    started: Notify,
}

impl FakePlayer {
    fn new(mode: PlayerMode) -> Self {
        Self {
            mode,
            plays: Mutex::new(0),
            stops: Mutex::new(0),
            started: Notify::new(),
        }
    }

    fn plays(&self) -> usize {
        *self.plays.lock().unwrap()
    }
}

#[async_trait]
impl AudioPlayer for FakePlayer {
    async fn play(&self, _clip: AudioClip, cancel: CancellationToken) -> Result<(), SpeechError> {
        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }
        *self.plays.lock().unwrap() += 1;
        self.started.notify_one();
        match self.mode {
            PlayerMode::Succeed => Ok(()),
            PlayerMode::Fail => Err(SpeechError::Playback("autoplay rejected".to_string())),
            PlayerMode::BlockUntilStopped => {
                cancel.cancelled().await;
                Err(SpeechError::Cancelled)
            }
        }
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// Emitter that runs a hook the first time the stop control is shown, i.e.
/// right after a playback lease was acquired.
#[derive(Clone)]
struct HookEmitter {
    inner: ChannelEmitter,
    hook: Arc<Mutex<Option<Box<dyn FnOnce() + Send>>>>,
}

impl AppEventEmitter for HookEmitter {
    fn emit(&self, event: AppEvent) {
        let fire = event == AppEvent::stop_control(true);
        self.inner.emit(event);
        if fire {
            let hook = self.hook.lock().unwrap().take();
            if let Some(hook) = hook {
                hook();
            }
        }
    }

    fn clone_box(&self) -> Box<dyn AppEventEmitter> {
        Box::new(self.clone())
    }
}

/// Coordinator whose first playback is superseded the way a new question
/// does it: advance the clock, then stop all speech.
fn superseded_on_start(mode: PlayerMode) -> Fixture {
    let speaker = Arc::new(FakeSpeaker::default());
    let player = Arc::new(FakePlayer::new(mode));
    let clock = RequestClock::new();
    let (channel, events) = ChannelEmitter::new();
    let slot: Arc<OnceLock<Weak<SpeechCoordinator>>> = Arc::default();

    let hook = {
        let clock = clock.clone();
        let slot = Arc::clone(&slot);
        move || {
            clock.advance();
            if let Some(coordinator) = slot.get().and_then(Weak::upgrade) {
                coordinator.stop_all();
            }
        }
    };
    let hook: Box<dyn FnOnce() + Send> = Box::new(hook);
    let emitter = HookEmitter {
        inner: channel,
        hook: Arc::new(Mutex::new(Some(hook))),
    };

    let coordinator = Arc::new(SpeechCoordinator::new(
        speaker.clone(),
        player.clone(),
        Arc::new(emitter),
        clock.clone(),
    ));
    slot.set(Arc::downgrade(&coordinator)).unwrap();

    Fixture {
        coordinator,
        speaker,
        player,
        clock,
        events,
    }
}

struct Fixture {
    coordinator: Arc<SpeechCoordinator>,
    speaker: Arc<FakeSpeaker>,
    player: Arc<FakePlayer>,
    clock: RequestClock,
    events: tokio::sync::mpsc::UnboundedReceiver<AppEvent>,
}

fn fixture(mode: PlayerMode) -> Fixture {
    let speaker = Arc::new(FakeSpeaker::default());
    let player = Arc::new(FakePlayer::new(mode));
    let clock = RequestClock::new();
    let (emitter, events) = ChannelEmitter::new();
    let coordinator = Arc::new(SpeechCoordinator::new(
        speaker.clone(),
        player.clone(),
        Arc::new(emitter),
        clock.clone(),
    ));
    Fixture {
        coordinator,
        speaker,
        player,
        clock,
        events,
    }
}

fn drain(events: &mut tokio::sync::mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

const MP3_HEADER_B64: &str = "SUQzBAAAAAAAI1RTU0UAAAAPAAADTGF2ZjU4LjI5LjEwMAAAAAAAAAAAAAAA";

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn natural_audio_plays_without_synthetic_voice() {
    let mut f = fixture(PlayerMode::Succeed);
    let token = f.clock.advance();

    f.coordinator
        .speak(
            SpeechRequest::new("Saturn has rings.", token)
                .with_audio(Some(MP3_HEADER_B64.to_string())),
        )
        .await;

    assert_eq!(f.player.plays(), 1);
    assert!(f.speaker.texts().is_empty());
    assert!(f.coordinator.live_handle().is_none());
    assert_eq!(
        drain(&mut f.events),
        vec![AppEvent::stop_control(true), AppEvent::stop_control(false)]
    );
}

#[tokio::test]
async fn playback_failure_falls_back_exactly_once() {
    let f = fixture(PlayerMode::Fail);
    let token = f.clock.advance();

    f.coordinator
        .speak(
            SpeechRequest::new("**Mars** is red.", token)
                .with_audio(Some(MP3_HEADER_B64.to_string())),
        )
        .await;

    assert_eq!(f.player.plays(), 1);
    assert_eq!(f.speaker.texts(), vec!["Mars is red."]);
    assert!(f.coordinator.live_handle().is_none());
}

#[tokio::test]
async fn undecodable_audio_uses_synthetic_voice() {
    let f = fixture(PlayerMode::Succeed);
    let token = f.clock.advance();

    f.coordinator
        .speak(SpeechRequest::new("Jupiter is huge.", token).with_audio(Some("%%%".to_string())))
        .await;

    assert_eq!(f.player.plays(), 0);
    assert_eq!(f.speaker.texts(), vec!["Jupiter is huge."]);
}

#[tokio::test]
async fn synthetic_voice_uses_configured_prosody() {
    let speaker = Arc::new(FakeSpeaker::default());
    let clock = RequestClock::new();
    let prosody = SpeechProsody {
        rate: 1.2,
        pitch: 1.0,
        volume: 0.5,
    };
    let coordinator = SpeechCoordinator::new(
        speaker.clone(),
        Arc::new(FakePlayer::new(PlayerMode::Succeed)),
        Arc::new(orbit_core::NoopEmitter::new()),
        clock.clone(),
    )
    .with_prosody(prosody);

    coordinator
        .speak(SpeechRequest::new("Hello!", clock.advance()))
        .await;

    let utterances = speaker.utterances.lock().unwrap();
    assert_eq!(utterances.len(), 1);
    assert_eq!(utterances[0].prosody, prosody);
}

#[tokio::test]
async fn stale_token_is_dropped() {
    let mut f = fixture(PlayerMode::Succeed);
    let stale = f.clock.advance();
    let _current = f.clock.advance();

    f.coordinator
        .speak(
            SpeechRequest::new("Old answer", stale).with_audio(Some(MP3_HEADER_B64.to_string())),
        )
        .await;
    f.coordinator
        .speak(SpeechRequest::new("Old answer", stale))
        .await;

    assert_eq!(f.player.plays(), 0);
    assert!(f.speaker.texts().is_empty());
    assert!(drain(&mut f.events).is_empty());
}

#[tokio::test]
async fn stop_all_during_playback_suppresses_fallback() {
    let mut f = fixture(PlayerMode::BlockUntilStopped);
    let token = f.clock.advance();

    let coordinator = Arc::clone(&f.coordinator);
    let speaking = tokio::spawn(async move {
        coordinator
            .speak(
                SpeechRequest::new("Neptune is windy.", token)
                    .with_audio(Some(MP3_HEADER_B64.to_string())),
            )
            .await;
    });

    f.player.started.notified().await;
    assert!(f.coordinator.live_handle().is_some());

    f.coordinator.stop_all();
    speaking.await.unwrap();

    assert!(f.speaker.texts().is_empty());
    assert!(f.coordinator.live_handle().is_none());
    assert_eq!(
        drain(&mut f.events),
        vec![AppEvent::stop_control(true), AppEvent::stop_control(false)]
    );
}

#[tokio::test]
async fn stop_all_is_idempotent() {
    let mut f = fixture(PlayerMode::Succeed);

    f.coordinator.stop_all();
    f.coordinator.stop_all();
    f.coordinator.stop_all();

    assert!(f.coordinator.live_handle().is_none());
    // Nothing was live, so the stop control is never toggled.
    assert!(drain(&mut f.events).is_empty());
    assert_eq!(*f.speaker.cancels.lock().unwrap(), 3);
    assert_eq!(*f.player.stops.lock().unwrap(), 3);
}

#[tokio::test]
async fn superseded_synthetic_speech_is_never_heard() {
    let mut f = superseded_on_start(PlayerMode::Succeed);
    let old = f.clock.advance();

    f.coordinator
        .speak(SpeechRequest::new("Mars answer", old))
        .await;

    assert!(!f.clock.is_current(old));
    assert!(f.speaker.texts().is_empty());
    assert!(f.coordinator.live_handle().is_none());
    assert_eq!(
        drain(&mut f.events),
        vec![AppEvent::stop_control(true), AppEvent::stop_control(false)]
    );
}

#[tokio::test]
async fn superseded_natural_audio_is_never_played() {
    let mut f = superseded_on_start(PlayerMode::Succeed);
    let old = f.clock.advance();

    f.coordinator
        .speak(
            SpeechRequest::new("Mars answer", old).with_audio(Some(MP3_HEADER_B64.to_string())),
        )
        .await;

    assert_eq!(f.player.plays(), 0);
    // No synthetic fallback for a revoked playback either.
    assert!(f.speaker.texts().is_empty());
    assert!(f.coordinator.live_handle().is_none());
    assert_eq!(
        drain(&mut f.events),
        vec![AppEvent::stop_control(true), AppEvent::stop_control(false)]
    );
}
