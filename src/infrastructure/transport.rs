//! 生成服务传输层 - 基础设施层
//!
//! 只负责"把请求发出去、把响应拿回来"，不认识考纲和分析结果

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::PipelineError;
use crate::models::upload::InlinePart;

// ========== 请求结构 ==========

/// generateContent 请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// 模型标识，放在 URL 中而不是请求体
    #[serde(skip)]
    pub model: String,
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlinePart,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: JsonValue,
}

// ========== 响应结构 ==========

/// generateContent 响应体（只保留需要的字段）
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    /// 思考过程片段，不属于答案
    #[serde(default)]
    pub thought: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// 第一个候选结果中所有文本片段的拼接，没有文本时返回 None
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| p.thought != Some(true))
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback.as_ref()?.block_reason.as_deref()
    }
}

/// 服务端错误信封：`{"error": {"code": 400, "message": "...", "status": "..."}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// 把非 2xx 响应转换为错误信息，保留状态码和服务端原始描述
pub fn describe_service_error(status: u16, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{}: {} [{}]", status, envelope.error.message, code),
            None => format!("{}: {}", status, envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("{}: 服务返回错误", status),
        Err(_) => format!("{}: {}", status, body.trim()),
    }
}

// ========== 传输接口 ==========

/// 生成服务传输接口
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// 发送一次请求，不做重试
    async fn generate(
        &self,
        credential: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PipelineError>;
}

/// 基于 HTTP 的 Gemini 传输实现
pub struct GeminiHttpTransport {
    client: Client,
    api_base_url: String,
}

impl GeminiHttpTransport {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.api_base_url, model)
    }
}

#[async_trait]
impl GenerationTransport for GeminiHttpTransport {
    async fn generate(
        &self,
        credential: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PipelineError> {
        let endpoint = self.endpoint(&request.model);
        debug!("POST {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header("x-goog-api-key", credential)
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::transport(e.to_string()))?;

        interpret_response(status, &body)
    }
}

/// 把 HTTP 状态码和响应体映射为结果
///
/// - 非 2xx：`Transport { status }`，信息取自错误信封
/// - 2xx 空响应体：`EmptyBody`
/// - 2xx 非 JSON：`Malformed`
pub fn interpret_response(status: u16, body: &str) -> Result<GenerateContentResponse, PipelineError> {
    if !(200..300).contains(&status) {
        return Err(PipelineError::service(status, describe_service_error(status, body)));
    }

    if body.trim().is_empty() {
        return Err(PipelineError::EmptyBody);
    }

    serde_json::from_str(body)
        .map_err(|e| PipelineError::Malformed(format!("无法解析服务响应: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let request = GenerateContentRequest {
            model: "m".to_string(),
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlinePart {
                            mime_type: "image/png".to_string(),
                            data: "AAAA".to_string(),
                        },
                    },
                    Part::Text {
                        text: "prompt".to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: json!({"type": "OBJECT"}),
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{
                    "parts": [
                        {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                        {"text": "prompt"}
                    ]
                }],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn test_response_text_joins_parts_and_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "{\"a\":"},
                    {"text": "1}"}
                ]}
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_text_absent() {
        assert_eq!(GenerateContentResponse::default().text(), None);

        let blank: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"content": {"parts": [{"text": "  "}]}}],
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert_eq!(blank.text(), None);
        assert_eq!(blank.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_interpret_non_success_keeps_status() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        let err = interpret_response(403, body).unwrap_err();
        assert_eq!(
            err,
            PipelineError::service(403, "403: The caller does not have permission [PERMISSION_DENIED]")
        );
        assert_eq!(
            crate::services::classify(&err).kind(),
            crate::error::FailureKind::PermissionDenied
        );

        // 错误状态优先于响应体内容
        let err = interpret_response(500, r#"{"candidates":[]}"#).unwrap_err();
        assert!(matches!(err, PipelineError::Transport { status: Some(500), .. }));
    }

    #[test]
    fn test_interpret_empty_success_body() {
        assert_eq!(interpret_response(200, "").unwrap_err(), PipelineError::EmptyBody);
        assert_eq!(interpret_response(200, " \n ").unwrap_err(), PipelineError::EmptyBody);
    }

    #[test]
    fn test_interpret_non_json_success_body() {
        match interpret_response(200, "<html>gateway</html>") {
            Err(PipelineError::Malformed(msg)) => assert!(msg.starts_with("无法解析服务响应")),
            other => panic!("期望 Malformed，实际: {:?}", other),
        }
    }

    #[test]
    fn test_interpret_success_body() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"{}"}]}}]}"#;
        let response = interpret_response(200, body).unwrap();
        assert_eq!(response.text().as_deref(), Some("{}"));

        // 合法 JSON 但没有候选，交给调用方判定为空结果
        let response = interpret_response(200, "{}").unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_describe_service_error() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            describe_service_error(400, body),
            "400: API key not valid. Please pass a valid API key. [INVALID_ARGUMENT]"
        );
        assert_eq!(describe_service_error(502, "Bad Gateway"), "502: Bad Gateway");
        assert_eq!(describe_service_error(500, ""), "500: 服务返回错误");
    }
}
