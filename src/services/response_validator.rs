//! 返回结果校验
//!
//! 把模型返回的原始文本解析为 `AnalysisResult`。整体接受或整体拒绝，
//! 不做截断、修正等部分恢复。

use serde::Deserialize;
use std::sync::Arc;

use crate::error::PipelineError;
use crate::models::analysis::{AnalysisResult, MissingTopic, TopicScore};
use crate::models::syllabus::SyllabusCatalog;

/// 与返回结构一一对应的原始形态，数值尚未校验
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    topic_scores: Vec<RawTopicScore>,
    missing_topics: Vec<RawMissingTopic>,
    overall_score: f64,
    ai_commentary: String,
    question_count: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTopicScore {
    topic_id: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMissingTopic {
    topic_id: String,
    reason: String,
    suggestion: String,
}

fn check_score(field: &str, value: f64) -> Result<f64, PipelineError> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(PipelineError::Malformed(format!(
            "{} 超出范围 [0, 100]: {}",
            field, value
        )))
    }
}

fn check_question_count(value: f64) -> Result<u64, PipelineError> {
    // u64::MAX as f64 会进位到 2^64，因此用严格小于
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value < u64::MAX as f64 {
        Ok(value as u64)
    } else {
        Err(PipelineError::Malformed(format!(
            "questionCount 必须是非负整数: {}",
            value
        )))
    }
}

/// 返回结果校验器
pub struct ResponseValidator {
    syllabus: Arc<SyllabusCatalog>,
}

impl ResponseValidator {
    pub fn new(syllabus: Arc<SyllabusCatalog>) -> Self {
        Self { syllabus }
    }

    fn check_topic_id(&self, field: &str, topic_id: &str) -> Result<(), PipelineError> {
        if self.syllabus.contains(topic_id) {
            Ok(())
        } else {
            Err(PipelineError::Malformed(format!(
                "{} 引用了考纲中不存在的考点: {}",
                field, topic_id
            )))
        }
    }

    /// 解析并校验
    pub fn parse(&self, raw: &str) -> Result<AnalysisResult, PipelineError> {
        let parsed: RawAnalysis = serde_json::from_str(raw)?;

        let mut topic_scores = Vec::with_capacity(parsed.topic_scores.len());
        for item in parsed.topic_scores {
            self.check_topic_id("topicScores", &item.topic_id)?;
            let score = check_score(&format!("topicScores[{}].score", item.topic_id), item.score)?;
            topic_scores.push(TopicScore {
                topic_id: item.topic_id,
                score,
            });
        }

        let mut missing_topics = Vec::with_capacity(parsed.missing_topics.len());
        for item in parsed.missing_topics {
            self.check_topic_id("missingTopics", &item.topic_id)?;
            if item.reason.trim().is_empty() {
                return Err(PipelineError::Malformed(format!(
                    "missingTopics[{}].reason 不能为空",
                    item.topic_id
                )));
            }
            if item.suggestion.trim().is_empty() {
                return Err(PipelineError::Malformed(format!(
                    "missingTopics[{}].suggestion 不能为空",
                    item.topic_id
                )));
            }
            missing_topics.push(MissingTopic {
                topic_id: item.topic_id,
                reason: item.reason,
                suggestion: item.suggestion,
            });
        }

        Ok(AnalysisResult {
            topic_scores,
            missing_topics,
            overall_score: check_score("overallScore", parsed.overall_score)?,
            ai_commentary: parsed.ai_commentary,
            question_count: check_question_count(parsed.question_count)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> ResponseValidator {
        ResponseValidator::new(Arc::new(SyllabusCatalog::builtin()))
    }

    fn valid_json() -> serde_json::Value {
        json!({
            "topicScores": [
                {"topicId": "G4A-01", "score": 85},
                {"topicId": "G4A-03", "score": 42.5}
            ],
            "missingTopics": [
                {"topicId": "G4A-08", "reason": "没有可能性相关题目", "suggestion": "补充摸球类题目"}
            ],
            "overallScore": 63,
            "aiCommentary": "计算部分覆盖充分，统计与概率薄弱。",
            "questionCount": 18
        })
    }

    fn assert_malformed(raw: &str) {
        match validator().parse(raw) {
            Err(PipelineError::Malformed(_)) => {}
            other => panic!("期望 Malformed，实际: {:?}", other),
        }
    }

    #[test]
    fn test_empty_result_unchanged() {
        let raw = r#"{"topicScores":[],"missingTopics":[],"overallScore":0,"aiCommentary":"","questionCount":0}"#;
        let result = validator().parse(raw).unwrap();
        assert_eq!(
            result,
            AnalysisResult {
                topic_scores: vec![],
                missing_topics: vec![],
                overall_score: 0.0,
                ai_commentary: String::new(),
                question_count: 0,
            }
        );
    }

    #[test]
    fn test_round_trip() {
        let result = validator().parse(&valid_json().to_string()).unwrap();
        assert_eq!(result.topic_scores.len(), 2);
        assert_eq!(result.question_count, 18);

        let serialized = serde_json::to_string(&result).unwrap();
        let reparsed = validator().parse(&serialized).unwrap();
        assert_eq!(reparsed, result);
    }

    #[test]
    fn test_not_json() {
        assert_malformed("");
        assert_malformed("not json at all");
        assert_malformed("```json\n{}\n```");
    }

    #[test]
    fn test_missing_required_field() {
        for field in ["topicScores", "missingTopics", "overallScore", "aiCommentary", "questionCount"] {
            let mut value = valid_json();
            value.as_object_mut().unwrap().remove(field);
            assert_malformed(&value.to_string());
        }
    }

    #[test]
    fn test_wrong_shape() {
        let mut value = valid_json();
        value["topicScores"] = json!({"G4A-01": 10});
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["overallScore"] = json!("63");
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_out_of_range_rejected_not_clamped() {
        let mut value = valid_json();
        value["overallScore"] = json!(100.5);
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["topicScores"][0]["score"] = json!(-1);
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["questionCount"] = json!(-3);
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["questionCount"] = json!(2.5);
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_boundaries_accepted() {
        let mut value = valid_json();
        value["overallScore"] = json!(100);
        value["topicScores"][0]["score"] = json!(0);
        value["questionCount"] = json!(7.0);
        let result = validator().parse(&value.to_string()).unwrap();
        assert_eq!(result.overall_score, 100.0);
        assert_eq!(result.question_count, 7);
    }

    #[test]
    fn test_large_question_count_accepted() {
        let mut value = valid_json();
        value["questionCount"] = json!(5_000_000_000u64);
        let result = validator().parse(&value.to_string()).unwrap();
        assert_eq!(result.question_count, 5_000_000_000);
    }

    #[test]
    fn test_empty_reason_or_suggestion() {
        let mut value = valid_json();
        value["missingTopics"][0]["reason"] = json!("");
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["missingTopics"][0]["suggestion"] = json!("   ");
        assert_malformed(&value.to_string());
    }

    #[test]
    fn test_unknown_topic_rejected() {
        let mut value = valid_json();
        value["topicScores"][1]["topicId"] = json!("G9Z-99");
        assert_malformed(&value.to_string());

        let mut value = valid_json();
        value["missingTopics"][0]["topicId"] = json!("made-up");
        assert_malformed(&value.to_string());
    }
}
