//! Speech recognition through an external command.
//!
//! The command captures audio itself and prints one line per event on
//! stdout:
//!
//! ```text
//! partial: what is            -> RecognitionEvent::Interim
//! error: no-speech            -> RecognitionEvent::Error
//! what is the biggest planet  -> RecognitionEvent::Final (ends the session)
//! ```
//!
//! End of output without a final line ends the session with
//! [`RecognitionEvent::End`] (or an error if the command failed).

use std::process::Stdio;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStdout, Command};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{RecognitionEvent, Recognizer};
use crate::error::SpeechError;

const PARTIAL_PREFIX: &str = "partial:";
const ERROR_PREFIX: &str = "error:";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRecognizerConfig {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandRecognizerConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// [`Recognizer`] running one child process per session.
#[derive(Debug)]
pub struct CommandRecognizer {
    config: CommandRecognizerConfig,
    current: Mutex<Option<CancellationToken>>,
}

impl CommandRecognizer {
    pub fn new(config: CommandRecognizerConfig) -> Self {
        Self {
            config,
            current: Mutex::new(None),
        }
    }
}

/// Parse one stdout line into an event; blank lines are skipped.
pub(crate) fn parse_line(line: &str) -> Option<RecognitionEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(rest) = line.strip_prefix(PARTIAL_PREFIX) {
        return Some(RecognitionEvent::Interim(rest.trim().to_string()));
    }
    if let Some(rest) = line.strip_prefix(ERROR_PREFIX) {
        return Some(RecognitionEvent::Error(rest.trim().to_string()));
    }
    Some(RecognitionEvent::Final(line.to_string()))
}

async fn pump_output(
    mut child: Child,
    stdout: ChildStdout,
    tx: mpsc::UnboundedSender<RecognitionEvent>,
    cancel: CancellationToken,
) {
    let mut lines = BufReader::new(stdout).lines();
    loop {
        let line = tokio::select! {
            () = cancel.cancelled() => {
                debug!("Recognition stopped");
                break;
            }
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                let Some(event) = parse_line(&line) else {
                    continue;
                };
                let terminal = matches!(
                    event,
                    RecognitionEvent::Final(_) | RecognitionEvent::Error(_)
                );
                if tx.send(event).is_err() || terminal {
                    break;
                }
            }
            Ok(None) => {
                let event = match child.wait().await {
                    Ok(status) if !status.success() => {
                        RecognitionEvent::Error(format!("recognizer exited with {status}"))
                    }
                    Ok(_) => RecognitionEvent::End,
                    Err(e) => RecognitionEvent::Error(e.to_string()),
                };
                let _ = tx.send(event);
                break;
            }
            Err(e) => {
                let _ = tx.send(RecognitionEvent::Error(e.to_string()));
                break;
            }
        }
    }
    // `child` is dropped here, which kills it if still running.
}

impl Recognizer for CommandRecognizer {
    fn start(&self) -> Result<mpsc::UnboundedReceiver<RecognitionEvent>, SpeechError> {
        let mut child = Command::new(&self.config.program)
            .args(&self.config.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SpeechError::Recognition("recognizer has no stdout".to_string()))?;

        let cancel = CancellationToken::new();
        if let Some(previous) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(cancel.clone())
        {
            previous.cancel();
        }

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(pump_output(child, stdout, tx, cancel));
        debug!(program = %self.config.program, "Recognition started");
        Ok(rx)
    }

    fn stop(&self) {
        if let Some(token) = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            token.cancel();
        }
    }
}
