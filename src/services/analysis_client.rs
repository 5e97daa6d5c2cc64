//! 分析请求客户端 - 业务能力层
//!
//! 负责一次分析的出站调用：读取凭证 → 编码文件 → 构建提示词 → 发送请求 → 取回原始文本。
//! 不做重试，也不做并发控制（由调用方保证同一时间只有一次分析）。

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::PipelineError;
use crate::infrastructure::credential::CredentialProvider;
use crate::infrastructure::transport::{
    Content, GenerateContentRequest, GenerationConfig, GenerationTransport, Part,
};
use crate::models::syllabus::SyllabusCatalog;
use crate::models::upload::UploadedFile;
use crate::services::{file_encoder, prompt_builder, schema};

/// 分析请求客户端
///
/// 职责：
/// - 每次调用都重新读取凭证，不缓存
/// - 所有文件打包进同一个请求
/// - 每次调用恰好一次网络请求（凭证缺失或编码失败时不发请求）
pub struct AnalysisClient {
    credentials: Arc<dyn CredentialProvider>,
    transport: Arc<dyn GenerationTransport>,
    syllabus: Arc<SyllabusCatalog>,
    model_name: String,
}

impl AnalysisClient {
    pub fn new(
        config: &Config,
        credentials: Arc<dyn CredentialProvider>,
        transport: Arc<dyn GenerationTransport>,
        syllabus: Arc<SyllabusCatalog>,
    ) -> Self {
        Self {
            credentials,
            transport,
            syllabus,
            model_name: config.model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 组装请求：先放所有文件，最后放提示词
    pub fn build_request(&self, files: &[UploadedFile]) -> Result<GenerateContentRequest, PipelineError> {
        let mut parts: Vec<Part> = file_encoder::encode_all(files)?
            .into_iter()
            .map(|inline_data| Part::InlineData { inline_data })
            .collect();

        let prompt = prompt_builder::build(&self.syllabus);
        debug!("提示词长度: {} 字符", prompt.chars().count());
        parts.push(Part::Text { text: prompt });

        Ok(GenerateContentRequest {
            model: self.model_name.clone(),
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: schema::RESPONSE_MIME_TYPE.to_string(),
                response_schema: schema::response_schema(),
            },
        })
    }

    /// 执行一次分析请求，返回服务给出的原始文本
    pub async fn run(&self, files: &[UploadedFile]) -> Result<String, PipelineError> {
        let credential = self
            .credentials
            .get_credential()
            .await
            .ok_or(PipelineError::CredentialUnavailable)?;

        let request = self.build_request(files)?;

        info!(
            "🤖 正在调用模型 {}，共 {} 个文件",
            self.model_name,
            files.len()
        );

        let response = self.transport.generate(&credential, &request).await?;

        match response.text() {
            Some(text) => {
                debug!("模型返回 {} 字符", text.chars().count());
                Ok(text)
            }
            None => {
                if let Some(reason) = response.block_reason() {
                    warn!("请求被服务拦截: {}", reason);
                }
                Err(PipelineError::EmptyBody)
            }
        }
    }
}
