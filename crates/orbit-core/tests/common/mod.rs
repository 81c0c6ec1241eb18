//! Shared fakes for `orbit-core` integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use orbit_core::{
    AppEvent, AskError, AskPort, AskRequest, AskResponse, AskSession, ChannelEmitter,
    RequestClock, SpeechOutputPort, SpeechRequest,
};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

type Reply = Result<AskResponse, AskError>;

/// Ask backend whose replies are released by the test.
///
/// Questions without a registered gate are answered immediately with
/// `"Answer to <question>"`.
#[derive(Default)]
pub struct ScriptedAsk {
    calls: Mutex<Vec<AskRequest>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    immediate: Mutex<HashMap<String, Reply>>,
}

impl ScriptedAsk {
    /// Hold the reply for `question` until the returned sender fires.
    pub fn gate(&self, question: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(question.to_string(), rx);
        tx
    }

    /// Answer `question` immediately with `reply`.
    pub fn reply(&self, question: &str, reply: Reply) {
        self.immediate
            .lock()
            .unwrap()
            .insert(question.to_string(), reply);
    }

    pub fn calls(&self) -> Vec<AskRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AskPort for ScriptedAsk {
    async fn ask(&self, request: AskRequest, _cancel: CancellationToken) -> Reply {
        self.calls.lock().unwrap().push(request.clone());

        let gate = self.gates.lock().unwrap().remove(&request.question);
        if let Some(gate) = gate {
            return gate
                .await
                .unwrap_or_else(|_| Err(AskError::Transport("gate dropped".into())));
        }

        let immediate = self.immediate.lock().unwrap().remove(&request.question);
        immediate.unwrap_or_else(|| Ok(AskResponse::success(format!("Answer to {}", request.question))))
    }
}

/// Speech output that records what reached it.
#[derive(Default)]
pub struct RecordingSpeech {
    spoken: Mutex<Vec<SpeechRequest>>,
    stops: Mutex<usize>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<SpeechRequest> {
        self.spoken.lock().unwrap().clone()
    }

    pub fn spoken_texts(&self) -> Vec<String> {
        self.spoken().into_iter().map(|r| r.text).collect()
    }

    pub fn stop_count(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

#[async_trait]
impl SpeechOutputPort for RecordingSpeech {
    async fn speak(&self, request: SpeechRequest) {
        self.spoken.lock().unwrap().push(request);
    }

    fn stop_all(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

pub struct Harness {
    pub session: AskSession,
    pub ask: Arc<ScriptedAsk>,
    pub speech: Arc<RecordingSpeech>,
    pub events: mpsc::UnboundedReceiver<AppEvent>,
}

impl Harness {
    pub fn new() -> Self {
        let ask = Arc::new(ScriptedAsk::default());
        let speech = Arc::new(RecordingSpeech::default());
        let (emitter, events) = ChannelEmitter::new();
        let session = AskSession::new(
            ask.clone(),
            speech.clone(),
            Arc::new(emitter),
            RequestClock::new(),
        );
        Self {
            session,
            ask,
            speech,
            events,
        }
    }

    /// Drain every event emitted so far.
    pub fn drain_events(&mut self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Texts of `MessageAdded` events of the given kind.
pub fn messages(events: &[AppEvent], kind: orbit_core::MessageKind) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            AppEvent::MessageAdded { kind: k, text } if *k == kind => Some(text.clone()),
            _ => None,
        })
        .collect()
}
