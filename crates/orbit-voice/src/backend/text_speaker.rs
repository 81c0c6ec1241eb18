//! "Speaks" by writing each utterance as a line of text.
//!
//! Used when no speech engine is installed, so answers that would be spoken
//! remain visible in transcripts.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{Speaker, Utterance};
use crate::error::SpeechError;

/// [`Speaker`] writing `"{prefix}{text}"` lines to a writer.
#[derive(Debug)]
pub struct TextSpeaker<W> {
    writer: Mutex<W>,
    prefix: String,
}

impl TextSpeaker<std::io::Stderr> {
    /// Speaker writing to standard error.
    pub fn stderr() -> Self {
        Self::new(std::io::stderr(), "(speaking) ")
    }
}

impl<W: Write + Send> TextSpeaker<W> {
    pub fn new(writer: W, prefix: impl Into<String>) -> Self {
        Self {
            writer: Mutex::new(writer),
            prefix: prefix.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<W: Write + Send> Speaker for TextSpeaker<W> {
    async fn speak(
        &self,
        utterance: Utterance,
        cancel: CancellationToken,
    ) -> Result<(), SpeechError> {
        if cancel.is_cancelled() {
            return Err(SpeechError::Cancelled);
        }
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}{}", self.prefix, utterance.text)?;
        writer.flush()?;
        Ok(())
    }

    fn cancel(&self) {}
}
