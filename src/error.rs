//! 错误类型
//!
//! - `PipelineError`：各阶段（凭证、网络、解析、编码）产生的原始错误
//! - `AnalysisFailure`：经 `ErrorClassifier` 分类后交给调用方的失败结果

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 分析流水线各阶段的原始错误
///
/// 只描述"发生了什么"，不做任何分类判断
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// 凭证提供方没有可用的凭证
    #[error("API 凭证缺失，请先配置或选择 API Key")]
    CredentialUnavailable,

    /// 网络或服务端错误
    #[error("{message}")]
    Transport {
        /// HTTP 状态码（网络层失败时为空）
        status: Option<u16>,
        message: String,
    },

    /// 服务返回了空内容
    #[error("AI 分析报告生成失败：返回内容为空")]
    EmptyBody,

    /// 返回内容无法解析或不满足数据约束
    #[error("分析结果格式错误: {0}")]
    Malformed(String),

    /// 上传文件无法转换为内联数据
    #[error("文件编码失败: {0}")]
    Encoding(String),

    /// 其他错误（保留原始信息）
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// 创建网络层错误（无状态码）
    pub fn transport(message: impl Into<String>) -> Self {
        PipelineError::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// 创建服务端错误
    pub fn service(status: u16, message: impl Into<String>) -> Self {
        PipelineError::Transport {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Malformed(err.to_string())
    }
}

/// 失败后建议的恢复动作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Recovery {
    /// 仅展示提示，不强制改变状态
    None,
    /// 强制重新获取凭证
    ReacquireCredential,
}

/// 失败种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    MissingCredential,
    InvalidCredential,
    PermissionDenied,
    EmptyResponse,
    MalformedResponse,
    EncodingError,
    Unknown,
}

/// 分类后的分析失败
///
/// 每个变体都保留原始错误信息，用于诊断展示
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisFailure {
    #[error("凭证缺失: {message}")]
    MissingCredential { message: String },

    #[error("凭证无效: {message}")]
    InvalidCredential { message: String },

    #[error("权限拒绝: {message}")]
    PermissionDenied { message: String },

    #[error("返回为空: {message}")]
    EmptyResponse { message: String },

    #[error("返回格式错误: {message}")]
    MalformedResponse { message: String },

    #[error("编码失败: {message}")]
    EncodingError { message: String },

    #[error("{message}")]
    Unknown { message: String },
}

impl AnalysisFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            FailureKind::MissingCredential => AnalysisFailure::MissingCredential { message },
            FailureKind::InvalidCredential => AnalysisFailure::InvalidCredential { message },
            FailureKind::PermissionDenied => AnalysisFailure::PermissionDenied { message },
            FailureKind::EmptyResponse => AnalysisFailure::EmptyResponse { message },
            FailureKind::MalformedResponse => AnalysisFailure::MalformedResponse { message },
            FailureKind::EncodingError => AnalysisFailure::EncodingError { message },
            FailureKind::Unknown => AnalysisFailure::Unknown { message },
        }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            AnalysisFailure::MissingCredential { .. } => FailureKind::MissingCredential,
            AnalysisFailure::InvalidCredential { .. } => FailureKind::InvalidCredential,
            AnalysisFailure::PermissionDenied { .. } => FailureKind::PermissionDenied,
            AnalysisFailure::EmptyResponse { .. } => FailureKind::EmptyResponse,
            AnalysisFailure::MalformedResponse { .. } => FailureKind::MalformedResponse,
            AnalysisFailure::EncodingError { .. } => FailureKind::EncodingError,
            AnalysisFailure::Unknown { .. } => FailureKind::Unknown,
        }
    }

    /// 原始错误信息
    pub fn message(&self) -> &str {
        match self {
            AnalysisFailure::MissingCredential { message }
            | AnalysisFailure::InvalidCredential { message }
            | AnalysisFailure::PermissionDenied { message }
            | AnalysisFailure::EmptyResponse { message }
            | AnalysisFailure::MalformedResponse { message }
            | AnalysisFailure::EncodingError { message }
            | AnalysisFailure::Unknown { message } => message,
        }
    }

    /// 只有凭证类错误需要强制重新选择凭证
    pub fn recovery(&self) -> Recovery {
        match self.kind() {
            FailureKind::MissingCredential | FailureKind::InvalidCredential => {
                Recovery::ReacquireCredential
            }
            _ => Recovery::None,
        }
    }

    /// 面向用户的提示文本
    pub fn display_message(&self) -> String {
        match self {
            AnalysisFailure::InvalidCredential { .. } => {
                "当前 API Key 无效或不具备模型访问权限。请重新选择具有付费账单的 GCP 项目 Key。"
                    .to_string()
            }
            AnalysisFailure::PermissionDenied { .. } => {
                "权限拒绝 (403)。请检查您的 API Key 是否已启用 Generative Language API。".to_string()
            }
            other => other.message().to_string(),
        }
    }
}

/// 分析结果类型
pub type AnalysisOutcome<T> = Result<T, AnalysisFailure>;
