use serde::{Deserialize, Serialize};

/// 单个考点的覆盖得分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicScore {
    pub topic_id: String,
    /// 0-100
    pub score: f64,
}

/// 试卷中缺失的考点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingTopic {
    pub topic_id: String,
    pub reason: String,
    pub suggestion: String,
}

/// 一次分析的完整报告
///
/// 只由 `ResponseValidator` 构造，下一次分析时整体替换
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub topic_scores: Vec<TopicScore>,
    pub missing_topics: Vec<MissingTopic>,
    pub overall_score: f64,
    pub ai_commentary: String,
    pub question_count: u64,
}

impl AnalysisResult {
    /// 覆盖率最低的考点（按得分升序）
    pub fn weakest_topics(&self, limit: usize) -> Vec<&TopicScore> {
        let mut scores: Vec<&TopicScore> = self.topic_scores.iter().collect();
        scores.sort_by(|a, b| a.score.total_cmp(&b.score));
        scores.truncate(limit);
        scores
    }
}
