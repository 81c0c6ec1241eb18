//! Request lifecycle for questions.
//!
//! [`AskSession`] turns user questions into ask operations with an
//! at-most-one-current rule:
//!
//! 1. Any active operation is torn down (network call aborted, speech
//!    stopped) *before* a new token is allocated.
//! 2. The new token becomes current and the user's message is shown.
//! 3. The network call runs on a spawned task, raced against the
//!    operation's cancellation token.
//! 4. Every completion re-checks that its token is still current before it
//!    touches the display, the history or the speaker.
//!
//! Because the teardown/allocate/install step happens under one lock and the
//! currency check happens under the same lock, a stale response is inert no
//! matter in which order completions arrive.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::contracts::http::{AskOutcome, AskRequest, AskResponse};
use crate::domain::{ConversationHistory, ConversationTurn, RequestClock, RequestToken};
use crate::events::AppEvent;
use crate::ports::{
    AppEventEmitter, AskError, AskPort, QuestionSink, SpeechOutputPort, SpeechRequest,
};

/// Spoken when the user submits an empty question.
pub const EMPTY_QUESTION_PROMPT: &str = "Please type or say a question about space first!";

/// Shown when the backend reports a failure without any text.
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Sorry, I had trouble thinking of an answer right now. Can you try asking again?";

/// Shown when the backend could not be reached.
pub const NETWORK_ERROR_MESSAGE: &str =
    "Sorry, I couldn't reach the space guide. Please check your connection and try again.";

/// What a call to [`AskSession::submit_question`] started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    /// A network ask operation.
    Question,
    /// The input was blank; only the spoken prompt was issued.
    EmptyPrompt,
}

/// Handle to the work spawned by one submission.
///
/// Dropping it detaches the task; the operation still honours cancellation.
#[derive(Debug)]
pub struct Submission {
    pub token: RequestToken,
    pub kind: SubmissionKind,
    task: JoinHandle<()>,
}

impl Submission {
    /// Wait until the operation has fully completed (including speech), was
    /// cancelled, or was discarded as stale.
    pub async fn finished(self) {
        if let Err(err) = self.task.await {
            if err.is_panic() {
                error!(token = %self.token, "Ask operation panicked");
            }
        }
    }
}

/// Outstanding effects of the current token.
#[derive(Debug)]
struct ActiveOperation {
    token: RequestToken,
    cancel: CancellationToken,
}

#[derive(Debug, Default)]
struct SessionState {
    history: ConversationHistory,
    active: Option<ActiveOperation>,
}

struct Inner {
    ask: Arc<dyn AskPort>,
    speech: Arc<dyn SpeechOutputPort>,
    emitter: Arc<dyn AppEventEmitter>,
    clock: RequestClock,
    state: Mutex<SessionState>,
}

/// The single owner of the conversation and the in-flight ask operation.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct AskSession {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AskSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AskSession")
            .field("current_token", &self.inner.clock.current())
            .finish_non_exhaustive()
    }
}

impl AskSession {
    /// Create a session.
    ///
    /// `clock` must be the same clock the speech output checks tokens
    /// against.
    pub fn new(
        ask: Arc<dyn AskPort>,
        speech: Arc<dyn SpeechOutputPort>,
        emitter: Arc<dyn AppEventEmitter>,
        clock: RequestClock,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                ask,
                speech,
                emitter,
                clock,
                state: Mutex::new(SessionState::default()),
            }),
        }
    }

    /// Submit a question.
    ///
    /// Must be called from within a Tokio runtime: the network call and the
    /// speech run on a spawned task.
    pub fn submit_question(&self, text: &str) -> Submission {
        let question = text.trim();
        if question.is_empty() {
            return self.submit_empty();
        }

        let cancel = CancellationToken::new();
        let (token, history) = {
            let mut state = self.inner.lock_state();
            if let Some(previous) = take_active(&mut state) {
                debug!(previous = %previous, "Superseding in-flight ask");
            }
            let token = self.inner.clock.advance();
            state.active = Some(ActiveOperation {
                token,
                cancel: cancel.clone(),
            });
            (token, state.history.snapshot())
        };
        self.inner.speech.stop_all();

        info!(%token, history_turns = history.len(), "Question submitted");

        let emitter = &self.inner.emitter;
        emitter.emit(AppEvent::user_message(question));
        emitter.emit(AppEvent::input_text(""));
        emitter.emit(AppEvent::loading(true));
        emitter.emit(AppEvent::inputs_enabled(false));

        let request = AskRequest::new(question, history);
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move { inner.run_operation(token, request, cancel).await });

        Submission {
            token,
            kind: SubmissionKind::Question,
            task,
        }
    }

    fn submit_empty(&self) -> Submission {
        let token = {
            let mut state = self.inner.lock_state();
            take_active(&mut state);
            self.inner.clock.advance()
        };
        self.inner.speech.stop_all();

        debug!(%token, "Empty question; prompting for input");
        self.inner.emitter.emit(AppEvent::loading(false));
        self.inner.emitter.emit(AppEvent::inputs_enabled(true));

        let speech = Arc::clone(&self.inner.speech);
        let task = tokio::spawn(async move {
            speech
                .speak(SpeechRequest::new(EMPTY_QUESTION_PROMPT, token))
                .await;
        });

        Submission {
            token,
            kind: SubmissionKind::EmptyPrompt,
            task,
        }
    }

    /// Tear down the active operation, if any: abort the network call and
    /// stop all speech. Idempotent.
    ///
    /// The current token is not advanced; the aborted operation is simply
    /// no longer active, so its completion is discarded.
    pub fn cancel_active(&self) {
        let torn_down = {
            let mut state = self.inner.lock_state();
            take_active(&mut state)
        };
        self.inner.speech.stop_all();

        if let Some(token) = torn_down {
            debug!(%token, "Active ask cancelled");
            self.inner.emitter.emit(AppEvent::loading(false));
            self.inner.emitter.emit(AppEvent::inputs_enabled(true));
        }
    }

    /// Snapshot of the conversation history, oldest first.
    pub fn history(&self) -> Vec<ConversationTurn> {
        self.inner.lock_state().history.snapshot()
    }

    /// Forget the conversation history.
    pub fn clear_history(&self) {
        self.inner.lock_state().history.clear();
    }

    /// The most recently issued token.
    pub fn current_token(&self) -> Option<RequestToken> {
        self.inner.clock.current()
    }

    /// The clock this session allocates tokens from.
    pub fn clock(&self) -> &RequestClock {
        &self.inner.clock
    }

    /// Whether a network call is in flight.
    pub fn is_busy(&self) -> bool {
        self.inner.lock_state().active.is_some()
    }
}

impl QuestionSink for AskSession {
    fn cancel_active(&self) {
        Self::cancel_active(self);
    }

    fn submit_question(&self, text: &str) {
        drop(Self::submit_question(self, text));
    }
}

/// Cancel and remove the active operation, returning its token.
fn take_active(state: &mut SessionState) -> Option<RequestToken> {
    state.active.take().map(|op| {
        op.cancel.cancel();
        op.token
    })
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run_operation(
        &self,
        token: RequestToken,
        request: AskRequest,
        cancel: CancellationToken,
    ) {
        let question = request.question.clone();
        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => Err(AskError::Cancelled),
            result = self.ask.ask(request, cancel.clone()) => result,
        };

        if result.as_ref().is_err_and(AskError::is_cancellation) {
            debug!(%token, "Ask aborted; suppressing result");
            return;
        }
        self.complete(token, question, result).await;
    }

    async fn complete(
        &self,
        token: RequestToken,
        question: String,
        result: Result<AskResponse, AskError>,
    ) {
        let outcome = result.map(AskResponse::into_outcome);

        {
            let mut state = self.lock_state();
            let still_active = state.active.as_ref().is_some_and(|op| op.token == token);
            if !(still_active && self.clock.is_current(token)) {
                debug!(%token, "Discarding stale ask result");
                return;
            }
            state.active = None;
            if let Ok(AskOutcome::Answer { text, .. }) = &outcome {
                state
                    .history
                    .push(ConversationTurn::new(question, text.clone()));
            }
        }

        self.emitter.emit(AppEvent::loading(false));
        self.emitter.emit(AppEvent::inputs_enabled(true));

        let speech = match outcome {
            Ok(AskOutcome::Answer { text, audio }) => {
                info!(%token, natural_audio = audio.is_some(), "Answer received");
                self.emitter.emit(AppEvent::assistant_message(text.clone()));
                SpeechRequest::new(text, token).with_audio(audio)
            }
            Ok(AskOutcome::Failure { message }) => {
                let message = message.unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string());
                warn!(%token, %message, "Backend reported failure");
                self.emitter.emit(AppEvent::error_message(message.clone()));
                SpeechRequest::new(message, token)
            }
            Err(err) => {
                warn!(%token, error = %err, "Ask request failed");
                self.emitter.emit(AppEvent::error_message(NETWORK_ERROR_MESSAGE));
                SpeechRequest::new(NETWORK_ERROR_MESSAGE, token)
            }
        };

        self.speech.speak(speech).await;
    }
}
