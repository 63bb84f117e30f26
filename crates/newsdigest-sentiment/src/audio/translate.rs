//! MyMemory translation client.

use serde::Deserialize;
use serde_json::Value;

use super::AudioError;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "responseData")]
    response_data: ResponseData,
    /// Numeric on success, sometimes a string on failure.
    #[serde(rename = "responseStatus")]
    response_status: Value,
    #[serde(rename = "responseDetails", default)]
    response_details: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Translates English `text` into `target_lang` via `{base_url}/get`.
///
/// # Errors
///
/// - [`AudioError::Http`]: network failure or unparseable body.
/// - [`AudioError::Translation`]: non-2xx status, an error status inside the
///   payload, or an empty translation.
pub(super) async fn translate(
    client: &reqwest::Client,
    base_url: &str,
    text: &str,
    target_lang: &str,
) -> Result<String, AudioError> {
    let url = format!("{base_url}/get");
    let langpair = format!("en|{target_lang}");
    let response = client
        .get(&url)
        .query(&[("q", text), ("langpair", langpair.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AudioError::Translation(format!(
            "translation service returned status {status}"
        )));
    }

    let body: TranslateResponse = response.json().await?;
    let payload_status = match &body.response_status {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    if payload_status != Some(200) {
        return Err(AudioError::Translation(format!(
            "translation failed with status {}: {}",
            body.response_status, body.response_details
        )));
    }

    match body.response_data.translated_text {
        Some(translated) if !translated.trim().is_empty() => Ok(translated),
        _ => Err(AudioError::Translation(
            "translation service returned empty text".to_string(),
        )),
    }
}
