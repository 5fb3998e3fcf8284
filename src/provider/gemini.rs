use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::VelocityError;
use crate::model::{ProviderData, ProviderPayload, Source};

use super::{DataProvider, ProviderConfig};

const API_KEY_HEADER: &str = "x-goog-api-key";

const DASHBOARD_PROMPT: &str = r#"Using up to date search results, return the current Formula 1 drivers' championship standings (top 10) and lap record information for 5 iconic circuits.
Respond with a single JSON object and nothing else, using exactly this shape:
{
  "standings": [{"position": 1, "name": "string", "team": "string", "points": 0, "wins": 0, "imageUrl": "optional string"}],
  "circuits": [{
    "name": "string",
    "location": "string",
    "length": "string, e.g. 5.793 km",
    "trackMapUrl": "optional string",
    "records": [{"circuit": "string", "driver": "string", "year": 2020, "time": "M:SS.mmm", "seconds": 81.046}],
    "history": [{"year": 2020, "time": 81.046}]
  }]
}
The first record of each circuit must be the current official lap record. History must list the fastest race lap in seconds for recent seasons."#;

// -- Request types ------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

// -- Response types -----------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    grounding_metadata: Option<GroundingMetadata>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    #[serde(default)]
    web: Option<WebSource>,
}

#[derive(Debug, Deserialize)]
struct WebSource {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

/// Data provider backed by the Gemini `generateContent` API with Google
/// Search grounding.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Result<Self, VelocityError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| VelocityError::ProviderClientError { source: e })?;
        Ok(Self { http, config })
    }

    async fn generate(&self) -> Result<ProviderPayload, VelocityError> {
        let url = self.config.endpoint()?;
        let endpoint = format!("POST {}", url.path());
        debug!("Requesting dashboard data from {}", endpoint);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: DASHBOARD_PROMPT,
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
        };

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VelocityError::ProviderRequestError {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read response body: {e}>"));
            return Err(VelocityError::ProviderStatusError { status, body });
        }

        let response: GenerateContentResponse =
            resp.json()
                .await
                .map_err(|e| VelocityError::ProviderRequestError {
                    endpoint,
                    source: e,
                })?;
        parse_response(response)
    }
}

impl DataProvider for GeminiProvider {
    fn fetch(
        &self,
    ) -> impl std::future::Future<Output = Result<ProviderPayload, VelocityError>> + Send {
        self.generate()
    }
}

fn parse_response(response: GenerateContentResponse) -> Result<ProviderPayload, VelocityError> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(VelocityError::ProviderContentError {
            reason: "response contained no candidates".to_string(),
        })?;

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(VelocityError::ProviderContentError {
            reason: format!(
                "candidate had no text, finish reason {}",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            ),
        });
    }

    let data = decode_json_object(&text)?;

    let sources = candidate
        .grounding_metadata
        .map(|metadata| {
            metadata
                .grounding_chunks
                .into_iter()
                .filter_map(|chunk| chunk.web)
                .map(|web| Source {
                    title: web.title,
                    uri: web.uri,
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if sources.is_empty() {
        warn!("Data provider answer carried no grounding sources");
    }

    Ok(ProviderPayload {
        data,
        sources: Some(sources),
    })
}

/// Decodes the first JSON object of a model answer. Code fences and prose
/// before the object are skipped, anything after it is ignored.
pub(crate) fn decode_json_object(text: &str) -> Result<ProviderData, VelocityError> {
    let no_json = || VelocityError::ProviderContentError {
        reason: "no JSON object in model answer".to_string(),
    };
    let start = text.find('{').ok_or_else(no_json)?;
    serde_json::Deserializer::from_str(&text[start..])
        .into_iter::<ProviderData>()
        .next()
        .ok_or_else(no_json)?
        .map_err(|e| VelocityError::PayloadDecodeError { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_decode_json_from_code_fence() {
        let data = decode_json_object("```json\n{\"standings\": []}\n```").unwrap();
        assert_eq!(data.standings, Some(vec![]));
        assert!(data.circuits.is_none());
    }

    #[test]
    fn test_decode_json_with_prose() {
        let text = "Here is the data you asked for: {\"circuits\": [{\"name\": \"Spa\", \"location\": \"Belgium\", \"length\": \"7.004km\"}]} Enjoy!";
        let circuits = decode_json_object(text).unwrap().circuits.unwrap();
        assert_eq!(circuits[0].name, "Spa");
    }

    #[test]
    fn test_decode_json_ignores_braces_after_object() {
        let text = "```json\n{\"standings\": []}\n```\nLet me know if you need {more} details.";
        let data = decode_json_object(text).unwrap();
        assert_eq!(data.standings, Some(vec![]));
    }

    #[test]
    fn test_decode_json_missing() {
        assert!(matches!(
            decode_json_object("no data today"),
            Err(VelocityError::ProviderContentError { .. })
        ));
        assert!(matches!(
            decode_json_object("} backwards {"),
            Err(VelocityError::PayloadDecodeError { .. })
        ));
    }

    #[test]
    fn test_parse_response_collects_text_parts_and_sources() {
        let parsed = parse_response(response(serde_json::json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "```json\n{\"standings\": [{\"position\": 1, \"name\": \"A\", "},
                    {"text": "\"team\": \"T\", \"points\": 10, \"wins\": 1}]}\n```"}
                ]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://formula1.com", "title": "formula1.com"}},
                    {"web": {"uri": "https://example.org"}},
                    {}
                ]}
            }]
        })))
        .unwrap();

        let standings = parsed.data.standings.unwrap();
        assert_eq!(standings.len(), 1);
        assert_eq!(standings[0].name, "A");
        assert!(parsed.data.circuits.is_none());

        let sources = parsed.sources.unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].title.as_deref(), Some("formula1.com"));
        assert_eq!(sources[1].title, None);
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let result = parse_response(response(serde_json::json!({"candidates": []})));
        assert!(matches!(
            result,
            Err(VelocityError::ProviderContentError { .. })
        ));
    }

    #[test]
    fn test_parse_response_without_text() {
        let result = parse_response(response(serde_json::json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })));
        match result {
            Err(VelocityError::ProviderContentError { reason }) => {
                assert!(reason.contains("SAFETY"))
            }
            other => panic!("Expected ProviderContentError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_response_with_invalid_json() {
        let result = parse_response(response(serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": "{\"standings\": [1, 2}"}]}}]
        })));
        assert!(matches!(
            result,
            Err(VelocityError::PayloadDecodeError { .. })
        ));
    }
}
