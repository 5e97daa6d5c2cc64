//! 错误分类
//!
//! 服务端不提供结构化错误码，只能按错误文本中的关键字判断。
//! 所有关键字匹配都集中在这里，规则按顺序匹配，先命中者生效：
//!
//! 1. 实体或模型不存在（含 404）/ 凭证无效 → `InvalidCredential`（需重新选择凭证）
//! 2. 权限拒绝（403）→ `PermissionDenied`
//! 3. 没有凭证 → `MissingCredential`（需重新选择凭证）
//! 4. 返回为空 → `EmptyResponse`
//! 5. 解析或结构校验失败 → `MalformedResponse`
//! 6. 文件编码失败 → `EncodingError`
//! 7. 其他 → `Unknown`，原样保留错误信息

use crate::error::{AnalysisFailure, FailureKind, PipelineError};

/// 表示凭证无效或模型不可访问的关键字
pub const INVALID_CREDENTIAL_MARKERS: &[&str] = &[
    "Requested entity was not found",
    "API key not valid",
    "API_KEY_INVALID",
];

/// 表示模型或资源不存在的关键字（例如 `MODEL_NAME` 配置了不可用的模型）
pub const NOT_FOUND_MARKERS: &[&str] = &["[NOT_FOUND]", "is not found"];

/// 表示权限拒绝的关键字
pub const PERMISSION_DENIED_MARKERS: &[&str] = &["403", "PERMISSION_DENIED"];

fn contains_any(message: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| message.contains(m))
}

/// 错误信息是否来自外部（服务端或第三方），只有这类信息才做关键字匹配
fn external_message(error: &PipelineError) -> Option<&str> {
    match error {
        PipelineError::Transport { message, .. } | PipelineError::Other(message) => {
            Some(message.as_str())
        }
        _ => None,
    }
}

/// 将原始错误映射为分类后的失败
pub fn classify(error: &PipelineError) -> AnalysisFailure {
    let message = error.to_string();

    if let Some(external) = external_message(error) {
        let not_found_status = matches!(error, PipelineError::Transport { status: Some(404), .. });
        if not_found_status
            || contains_any(external, INVALID_CREDENTIAL_MARKERS)
            || contains_any(external, NOT_FOUND_MARKERS)
        {
            return AnalysisFailure::new(FailureKind::InvalidCredential, message);
        }

        let forbidden_status = matches!(error, PipelineError::Transport { status: Some(403), .. });
        if forbidden_status || contains_any(external, PERMISSION_DENIED_MARKERS) {
            return AnalysisFailure::new(FailureKind::PermissionDenied, message);
        }
    }

    let kind = match error {
        PipelineError::CredentialUnavailable => FailureKind::MissingCredential,
        PipelineError::EmptyBody => FailureKind::EmptyResponse,
        PipelineError::Malformed(_) => FailureKind::MalformedResponse,
        PipelineError::Encoding(_) => FailureKind::EncodingError,
        PipelineError::Transport { .. } | PipelineError::Other(_) => FailureKind::Unknown,
    };

    AnalysisFailure::new(kind, message)
}

/// 对任意错误文本分类
pub fn classify_message(message: impl Into<String>) -> AnalysisFailure {
    classify(&PipelineError::Other(message.into()))
}
