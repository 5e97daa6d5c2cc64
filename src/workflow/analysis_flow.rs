//! 分析流程 - 流程层
//!
//! 定义"一次分析"的完整链路：
//! 1. AnalysisClient 组装并发送请求
//! 2. ResponseValidator 解析并校验
//! 3. 任一阶段失败 → ErrorClassifier 分类

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AnalysisFailure, AnalysisOutcome, PipelineError};
use crate::infrastructure::{CredentialProvider, GenerationTransport};
use crate::models::analysis::AnalysisResult;
use crate::models::syllabus::SyllabusCatalog;
use crate::models::upload::UploadedFile;
use crate::services::{classify, AnalysisClient, ResponseValidator};

/// 分析流水线
///
/// - 只持有静态考纲与外部接口的句柄，不保存任何运行状态
/// - 不做重试
pub struct AnalysisPipeline {
    client: AnalysisClient,
    validator: ResponseValidator,
}

impl AnalysisPipeline {
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn GenerationTransport>,
        syllabus: Arc<SyllabusCatalog>,
    ) -> Self {
        Self {
            client: AnalysisClient::new(config, credentials, transport, syllabus.clone()),
            validator: ResponseValidator::new(syllabus),
        }
    }

    async fn run_stages(&self, files: &[UploadedFile]) -> Result<AnalysisResult, PipelineError> {
        let raw = self.client.run(files).await?;
        self.validator.parse(&raw)
    }

    /// 执行一次完整分析
    pub async fn analyze(&self, files: &[UploadedFile]) -> AnalysisOutcome<AnalysisResult> {
        let started = Instant::now();
        info!("📄 开始分析 {} 个文件", files.len());

        match self.run_stages(files).await {
            Ok(result) => {
                info!(
                    "✓ 分析完成，耗时 {:.1}s，识别题目 {} 道，整体得分 {}",
                    started.elapsed().as_secs_f64(),
                    result.question_count,
                    result.overall_score
                );
                Ok(result)
            }
            Err(e) => {
                let failure: AnalysisFailure = classify(&e);
                warn!(
                    "❌ 分析失败 ({:?}, 恢复动作: {:?}): {}",
                    failure.kind(),
                    failure.recovery(),
                    failure.message()
                );
                Err(failure)
            }
        }
    }
}
