//! Gemini API連携
//!
//! systemInstruction + プロンプト + 画像（inlineData）+ responseSchema を
//! generateContent に送り、返ってきたJSONテキストを共通パーサーで検証する。

use super::InferenceGateway;
use crate::config::Config;
use crate::error::{ReizoDadError, Result};
use async_trait::async_trait;
use reizo_dad_common::{
    parse_analysis_response, response_schema, AnalysisResult, ImagePayload, SYSTEM_INSTRUCTION,
    USER_PROMPT,
};
use serde::{Deserialize, Serialize};

/// Gemini APIリクエスト
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: Content,
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

/// Gemini APIレスポンス
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// リクエスト本体を組み立てる（画像は撮影順）
fn build_request(images: &[ImagePayload]) -> GeminiRequest {
    let mut parts = vec![Part::Text {
        text: USER_PROMPT.to_string(),
    }];

    parts.extend(images.iter().map(|img| Part::InlineData {
        inline_data: InlineData {
            mime_type: img.mime_type.clone(),
            data: img.data.clone(),
        },
    }));

    GeminiRequest {
        system_instruction: Content {
            parts: vec![Part::Text {
                text: SYSTEM_INSTRUCTION.to_string(),
            }],
        },
        contents: vec![Content { parts }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// 最初の候補のテキストパートを連結して取り出す
fn extract_text(response: &GeminiResponse) -> Option<String> {
    let content = response.candidates.first()?.content.as_ref()?;
    let text: String = content
        .parts
        .iter()
        .filter_map(|p| p.text.as_deref())
        .collect();

    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

pub struct GeminiGateway {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiGateway {
    pub fn new(api_key: impl Into<String>, config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.base_url.trim_end_matches('/'),
                config.model
            ),
        })
    }

    /// 設定（環境変数を含む）からAPIキーを解決して作成
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.get_api_key()?;
        Self::new(api_key, config)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl InferenceGateway for GeminiGateway {
    async fn analyze(&self, images: &[ImagePayload]) -> Result<AnalysisResult> {
        let request = build_request(images);

        tracing::debug!(
            images = images.len(),
            endpoint = %self.endpoint,
            "Gemini APIへ送信"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ReizoDadError::ApiCall(format!(
                "Gemini API failed ({}): {}",
                status, body
            )));
        }

        let body = response.text().await?;
        let payload: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| ReizoDadError::ApiParse(format!("Geminiレスポンス形式エラー: {}", e)))?;
        let text = extract_text(&payload)
            .ok_or_else(|| ReizoDadError::ApiParse("レスポンスが空です".into()))?;

        tracing::debug!(chars = text.len(), "Gemini APIレスポンス受信");

        Ok(parse_analysis_response(&text)?)
    }
}
