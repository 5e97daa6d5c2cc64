/// 日志工具模块
///
/// 提供启动信息、分析报告和错误提示的输出
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AnalysisFailure, Recovery};
use crate::models::analysis::AnalysisResult;
use crate::models::syllabus::SyllabusCatalog;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 考点覆盖分析 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🤖 模型: {}", config.model_name);
    info!("📁 上传目录: {}", config.upload_folder);
    info!("{}", "=".repeat(60));
}

/// 记录文件加载信息
pub fn log_files_loaded(total: usize, total_bytes: usize) {
    info!("✓ 找到 {} 个待分析的文件", total);
    info!("📦 编码后总大小: {:.1} KB", total_bytes as f64 / 1024.0);
}

/// 打印分析报告
pub fn print_report(result: &AnalysisResult, syllabus: &SyllabusCatalog) {
    info!("\n{}", "=".repeat(60));
    info!("📊 考点覆盖报告");
    info!("{}", "=".repeat(60));
    info!("题目数量: {}", result.question_count);
    info!("整体得分: {}", result.overall_score);

    info!("\n{}", "─".repeat(60));
    info!("考点得分:");
    for topic in &result.topic_scores {
        info!(
            "  [{}] {} - {}",
            topic.topic_id,
            syllabus.topic_name(&topic.topic_id),
            topic.score
        );
    }

    if !result.missing_topics.is_empty() {
        info!("\n{}", "─".repeat(60));
        info!("遗漏考点:");
        for missing in &result.missing_topics {
            info!(
                "  ⚠️ [{}] {}",
                missing.topic_id,
                syllabus.topic_name(&missing.topic_id)
            );
            info!("     原因: {}", truncate_text(&missing.reason, 120));
            info!("     建议: {}", truncate_text(&missing.suggestion, 120));
        }
    }

    info!("\n{}", "─".repeat(60));
    info!("AI 点评: {}", result.ai_commentary);
    info!("{}", "=".repeat(60));
}

/// 打印分析失败提示
pub fn print_failure(failure: &AnalysisFailure) {
    warn!("\n{}", "=".repeat(60));
    warn!("❌ 分析中断: {}", failure.display_message());
    warn!("错误类型: {:?}", failure.kind());
    if failure.recovery() == Recovery::ReacquireCredential {
        warn!("🔑 请重新选择或配置 API Key 后再试");
    }
    warn!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
