//! # Syllabus Coverage
//!
//! 上传试卷扫描件，交给多模态模型对照考纲分析，得到结构化的考点覆盖报告
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 外部接口的抽象
//! - `CredentialProvider` - 凭证提供（每次分析重新读取）
//! - `GenerationTransport` - 生成服务传输（HTTP 实现 + 可替换的测试实现）
//!
//! ### ② 业务能力层（Services）
//! - `file_encoder` - 上传文件 → 内联数据块
//! - `prompt_builder` / `schema` - 分析指令与返回结构约束
//! - `AnalysisClient` - 一次分析的出站调用
//! - `ResponseValidator` - 返回结果的解析与校验
//! - `error_classifier` - 失败分类与恢复动作
//!
//! ### ③ 流程层（Workflow）
//! - `AnalysisPipeline` - 发送 → 校验 → 分类
//!
//! ### ④ 编排层（Orchestration）
//! - `AnalysisSession` - 上传列表、结果、错误与单次运行闸门
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnalysisFailure, FailureKind, PipelineError, Recovery};
pub use infrastructure::{
    CredentialProvider, EnvCredentialProvider, GeminiHttpTransport, GenerationTransport,
    StaticCredentialProvider,
};
pub use models::{AnalysisResult, MissingTopic, SyllabusCatalog, TopicScore, UploadedFile};
pub use orchestrator::{AnalysisSession, RunOutcome, SkipReason};
pub use workflow::AnalysisPipeline;
