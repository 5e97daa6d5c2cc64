//! 返回结构约束
//!
//! 要求生成服务的答案必须满足的结构，与 `AnalysisResult` 一一对应

use serde_json::{json, Value as JsonValue};

/// 约束答案的 MIME 类型
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// 顶层必填字段
pub const REQUIRED_FIELDS: [&str; 5] = [
    "topicScores",
    "missingTopics",
    "overallScore",
    "aiCommentary",
    "questionCount",
];

pub fn response_schema() -> JsonValue {
    json!({
        "type": "OBJECT",
        "properties": {
            "topicScores": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "topicId": { "type": "STRING" },
                        "score": { "type": "NUMBER" }
                    },
                    "required": ["topicId", "score"]
                }
            },
            "missingTopics": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "topicId": { "type": "STRING" },
                        "reason": { "type": "STRING" },
                        "suggestion": { "type": "STRING" }
                    },
                    "required": ["topicId", "reason", "suggestion"]
                }
            },
            "overallScore": { "type": "NUMBER" },
            "aiCommentary": { "type": "STRING" },
            "questionCount": { "type": "NUMBER" }
        },
        "required": REQUIRED_FIELDS
    })
}
