//! Voice input: the idle/listening toggle in front of a [`Recognizer`].
//!
//! ```text
//! Idle --toggle--> Listening --final transcript--> Idle (+ delayed submit)
//!                      |------error-------------> Idle (status: failed)
//!                      |------end / toggle------> Idle
//! ```
//!
//! Every capture is a numbered session. Events from a session that is no
//! longer the current one are ignored, and a delayed submit is skipped if a
//! new capture started in the meantime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use orbit_core::{AppEvent, AppEventEmitter, QuestionSink, VoiceStatus};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::backend::{RecognitionEvent, Recognizer};
use crate::error::SpeechError;

/// Capture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceInputState {
    Idle,
    Listening,
}

#[derive(Debug)]
struct CaptureState {
    state: VoiceInputState,
    session: u64,
}

/// What the event pump should do after an event.
enum Step {
    Continue,
    Done,
    Submit(String),
}

struct Inner {
    recognizer: Arc<dyn Recognizer>,
    sink: Arc<dyn QuestionSink>,
    emitter: Arc<dyn AppEventEmitter>,
    submit_delay: Duration,
    capture: Mutex<CaptureState>,
}

/// Voice capture toggle feeding transcripts to a [`QuestionSink`].
#[derive(Clone)]
pub struct VoiceInput {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for VoiceInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceInput")
            .field("state", &self.state())
            .field("submit_delay", &self.inner.submit_delay)
            .finish_non_exhaustive()
    }
}

impl VoiceInput {
    /// Create a voice input.
    ///
    /// `submit_delay` is the pause between a final transcript and its
    /// submission, giving the user a moment to see what was heard.
    pub fn new(
        recognizer: Arc<dyn Recognizer>,
        sink: Arc<dyn QuestionSink>,
        emitter: Arc<dyn AppEventEmitter>,
        submit_delay: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                recognizer,
                sink,
                emitter,
                submit_delay,
                capture: Mutex::new(CaptureState {
                    state: VoiceInputState::Idle,
                    session: 0,
                }),
            }),
        }
    }

    pub fn state(&self) -> VoiceInputState {
        self.inner.lock_capture().state
    }

    pub fn is_listening(&self) -> bool {
        self.state() == VoiceInputState::Listening
    }

    /// Start capturing if idle, stop if listening. Returns the new state.
    ///
    /// Starting tears down any in-flight question first so the answer to the
    /// previous question is not heard over the user. Must be called from
    /// within a Tokio runtime.
    pub fn toggle(&self) -> Result<VoiceInputState, SpeechError> {
        match self.start() {
            Ok(()) => Ok(VoiceInputState::Listening),
            Err(SpeechError::AlreadyListening) => {
                self.stop();
                Ok(VoiceInputState::Idle)
            }
            Err(err) => Err(err),
        }
    }

    /// Start a capture session.
    ///
    /// The session is claimed before the recognizer starts, so concurrent
    /// callers see [`SpeechError::AlreadyListening`] instead of starting a
    /// second recognizer.
    pub fn start(&self) -> Result<(), SpeechError> {
        let session = {
            let mut capture = self.inner.lock_capture();
            if capture.state == VoiceInputState::Listening {
                return Err(SpeechError::AlreadyListening);
            }
            capture.session += 1;
            capture.state = VoiceInputState::Listening;
            capture.session
        };

        self.inner.sink.cancel_active();

        let events = match self.inner.recognizer.start() {
            Ok(events) => events,
            Err(err) => {
                {
                    let mut capture = self.inner.lock_capture();
                    if capture.session == session {
                        capture.state = VoiceInputState::Idle;
                    }
                }
                warn!(error = %err, "Could not start voice capture");
                self.inner
                    .emitter
                    .emit(AppEvent::voice_status(VoiceStatus::Failed {
                        reason: err.to_string(),
                    }));
                return Err(err);
            }
        };

        if self.inner.lock_capture().session != session {
            debug!(session, "Capture stopped while starting");
            self.inner.recognizer.stop();
            return Ok(());
        }
        info!(session, "Voice capture started");
        self.inner
            .emitter
            .emit(AppEvent::voice_status(VoiceStatus::Listening));

        tokio::spawn(Arc::clone(&self.inner).pump(session, events));
        Ok(())
    }

    /// Stop capturing. Idempotent.
    pub fn stop(&self) {
        {
            let mut capture = self.inner.lock_capture();
            if capture.state != VoiceInputState::Listening {
                return;
            }
            capture.state = VoiceInputState::Idle;
            capture.session += 1;
        }
        self.inner.recognizer.stop();
        debug!("Voice capture stopped");
        self.inner
            .emitter
            .emit(AppEvent::voice_status(VoiceStatus::Ready));
    }
}

impl Inner {
    fn lock_capture(&self) -> MutexGuard<'_, CaptureState> {
        self.capture.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pump(
        self: Arc<Self>,
        session: u64,
        mut events: mpsc::UnboundedReceiver<RecognitionEvent>,
    ) {
        while let Some(event) = events.recv().await {
            match self.handle(session, event) {
                Step::Continue => {}
                Step::Done => return,
                Step::Submit(transcript) => {
                    self.submit_after_delay(session, transcript).await;
                    return;
                }
            }
        }
        // Channel closed without a terminal event.
        self.handle(session, RecognitionEvent::End);
    }

    fn handle(&self, session: u64, event: RecognitionEvent) -> Step {
        let mut capture = self.lock_capture();
        if capture.session != session || capture.state != VoiceInputState::Listening {
            debug!(session, ?event, "Ignoring event from stale capture session");
            return Step::Done;
        }

        match event {
            RecognitionEvent::Interim(text) => {
                drop(capture);
                self.emitter.emit(AppEvent::input_text(text));
                Step::Continue
            }
            RecognitionEvent::Final(text) if !text.trim().is_empty() => {
                capture.state = VoiceInputState::Idle;
                drop(capture);
                let transcript = text.trim().to_string();
                info!(session, %transcript, "Voice transcript received");
                self.emitter.emit(AppEvent::input_text(transcript.clone()));
                self.emitter
                    .emit(AppEvent::voice_status(VoiceStatus::Heard {
                        transcript: transcript.clone(),
                    }));
                Step::Submit(transcript)
            }
            RecognitionEvent::Error(reason) => {
                capture.state = VoiceInputState::Idle;
                drop(capture);
                warn!(session, %reason, "Voice recognition failed");
                self.emitter
                    .emit(AppEvent::voice_status(VoiceStatus::Failed { reason }));
                Step::Done
            }
            RecognitionEvent::Final(_) | RecognitionEvent::End => {
                capture.state = VoiceInputState::Idle;
                drop(capture);
                debug!(session, "Voice capture ended without a result");
                self.emitter
                    .emit(AppEvent::voice_status(VoiceStatus::Ready));
                Step::Done
            }
        }
    }

    async fn submit_after_delay(&self, session: u64, transcript: String) {
        tokio::time::sleep(self.submit_delay).await;

        if self.lock_capture().session != session {
            debug!(session, "New capture started; dropping delayed transcript");
            return;
        }
        self.sink.submit_question(&transcript);
    }
}
