//! Google Translate TTS client.

use super::AudioError;

/// Longest text the speech endpoint accepts per request.
pub(crate) const MAX_CHUNK_CHARS: usize = 100;

/// Synthesizes MP3 speech for `text`, one request per chunk, and returns the
/// concatenated segments.
///
/// # Errors
///
/// - [`AudioError::Synthesis`]: no speakable text, a non-2xx status, or an
///   empty audio segment.
/// - [`AudioError::Http`]: network failure.
pub(super) async fn synthesize(
    client: &reqwest::Client,
    base_url: &str,
    text: &str,
    lang: &str,
) -> Result<Vec<u8>, AudioError> {
    let chunks = split_chunks(text, MAX_CHUNK_CHARS);
    if chunks.is_empty() {
        return Err(AudioError::Synthesis("no text to speak".to_string()));
    }

    let url = format!("{base_url}/translate_tts");
    let total = chunks.len().to_string();
    let mut audio = Vec::new();

    for (idx, chunk) in chunks.iter().enumerate() {
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk.as_str()),
                ("tl", lang),
                ("client", "tw-ob"),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AudioError::Synthesis(format!(
                "speech service returned status {status} for chunk {idx}"
            )));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Err(AudioError::Synthesis(format!(
                "speech service returned no audio for chunk {idx}"
            )));
        }
        audio.extend_from_slice(&bytes);
    }

    Ok(audio)
}

/// Splits `text` into chunks of at most `max_chars` characters, breaking on
/// whitespace. Words longer than `max_chars` are split hard.
pub(crate) fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_chars);
            chunks.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_one_chunk() {
        assert_eq!(split_chunks("hello world", 100), vec!["hello world"]);
    }

    #[test]
    fn blank_text_has_no_chunks() {
        assert!(split_chunks("  \n ", 100).is_empty());
    }

    #[test]
    fn breaks_on_word_boundaries() {
        let chunks = split_chunks("aaa bbb ccc ddd", 7);
        assert_eq!(chunks, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn long_words_are_split_hard() {
        let chunks = split_chunks("ab abcdefghij cd", 4);
        assert_eq!(chunks, vec!["ab", "abcd", "efgh", "ij", "cd"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "नमस्ते दुनिया";
        let chunks = split_chunks(text, 100);
        assert_eq!(chunks, vec![text]);
        for chunk in split_chunks(&text.repeat(20), 100) {
            assert!(chunk.chars().count() <= 100);
        }
    }
}
