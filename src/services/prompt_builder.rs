//! 提示词构建
//!
//! 纯函数：相同的考纲目录总是得到逐字节相同的提示词

use crate::models::syllabus::SyllabusCatalog;

/// 把考纲目录序列化为稳定的 JSON 文本（保持考点顺序）
pub fn serialize_syllabus(syllabus: &SyllabusCatalog) -> String {
    serde_json::to_string_pretty(&syllabus.topics).unwrap_or_default()
}

/// 构建分析指令
pub fn build(syllabus: &SyllabusCatalog) -> String {
    let syllabus_json = serialize_syllabus(syllabus);

    format!(
        r#"你是一位资深的小学数学教研员，熟悉苏教版教材与考纲。

你将收到若干张试卷或练习题的扫描图片，以及一份考纲知识点清单（JSON 格式）：
{}

【任务】
1. 识别图片中的所有题目，统计题目总数（questionCount）。
2. 逐一对照考纲中的每个知识点，判断试卷对该知识点的考查程度，给出 0-100 的覆盖得分（topicScores）。
3. 找出试卷完全没有考查或考查明显不足的知识点（missingTopics），说明缺失原因（reason），并给出补充练习建议（suggestion）。
4. 给出试卷整体覆盖度得分（overallScore，0-100）。
5. 用中文写一段整体点评（aiCommentary），指出试卷的优点与主要遗漏。

【要求】
- topicId 必须严格使用考纲中的 id，不得编造新的 id。
- 所有得分必须在 0 到 100 之间。
- reason 和 suggestion 不能为空。
- 只返回符合约定结构的 JSON，不要返回任何其他内容。"#,
        syllabus_json
    )
}
