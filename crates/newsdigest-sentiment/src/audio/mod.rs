//! Translated speech for article summaries.
//!
//! A summary is translated from English, synthesized to MP3 and written to the
//! [`AudioStore`]. The caller gets back a public URL for the clip.

mod speech;
mod store;
mod translate;

pub use store::AudioStore;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("translation failed: {0}")]
    Translation(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("failed to write audio file: {0}")]
    Io(#[from] std::io::Error),
}

/// Produces a hosted audio clip of a summary in the target language.
#[derive(Debug, Clone)]
pub struct AudioGenerator {
    client: reqwest::Client,
    translate_url: String,
    tts_url: String,
    lang: String,
    public_base_url: String,
    store: AudioStore,
}

impl AudioGenerator {
    #[must_use]
    pub fn new(
        client: reqwest::Client,
        translate_url: &str,
        tts_url: &str,
        lang: &str,
        public_base_url: &str,
        store: AudioStore,
    ) -> Self {
        Self {
            client,
            translate_url: translate_url.trim_end_matches('/').to_string(),
            tts_url: tts_url.trim_end_matches('/').to_string(),
            lang: lang.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            store,
        }
    }

    #[must_use]
    pub fn store(&self) -> &AudioStore {
        &self.store
    }

    /// Generates audio for `text`, returning its URL or `None` on any failure.
    ///
    /// Failures are logged and never propagate; an article without audio is
    /// still a valid article.
    pub async fn generate(&self, text: &str) -> Option<String> {
        match self.try_generate(text).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(error = %e, "audio generation failed");
                None
            }
        }
    }

    /// Translates, synthesizes and stores `text`, returning the clip's URL.
    ///
    /// # Errors
    ///
    /// Returns [`AudioError`] from whichever stage failed.
    pub async fn try_generate(&self, text: &str) -> Result<String, AudioError> {
        if text.trim().is_empty() {
            return Err(AudioError::Synthesis("no text to speak".to_string()));
        }
        let translated =
            translate::translate(&self.client, &self.translate_url, text, &self.lang).await?;
        let audio = speech::synthesize(&self.client, &self.tts_url, &translated, &self.lang).await?;
        let filename = self.store.save(&audio).await?;
        tracing::debug!(file = %filename, bytes = audio.len(), "audio clip saved");
        Ok(format!("{}/tts/{filename}", self.public_base_url))
    }
}
