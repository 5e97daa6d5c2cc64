//! 文件编码 - 业务能力层
//!
//! 把上传文件转换为请求中的内联数据块，负责剥离 `data:` 传输前缀

use base64::Engine;
use regex::Regex;

use crate::error::PipelineError;
use crate::models::upload::{InlinePart, UploadedFile};

/// 拆分传输前缀，返回 (前缀中的 mime, 纯 base64 数据)
///
/// base64 字符集中没有逗号，因此第一个逗号之前的内容都视为前缀
fn split_prefix<'a>(payload: &'a str, id: &str) -> Result<(Option<String>, &'a str), PipelineError> {
    let payload = payload.trim();

    match payload.split_once(',') {
        Some((header, data)) => {
            let re = Regex::new(r"^data:(?P<mime>[^;,]*)(?:;[^,]*)?$")
                .map_err(|e| PipelineError::Encoding(e.to_string()))?;
            let mime = re
                .captures(header.trim())
                .and_then(|caps| caps.name("mime"))
                .map(|m| m.as_str().trim().to_string())
                .filter(|m| !m.is_empty());
            Ok((mime, data.trim()))
        }
        None if payload.starts_with("data:") => Err(PipelineError::Encoding(format!(
            "数据前缀缺少分隔符 ',' ({})",
            id
        ))),
        None => Ok((None, payload)),
    }
}

/// 编码单个文件
pub fn encode(file: &UploadedFile) -> Result<InlinePart, PipelineError> {
    let (header_mime, data) = split_prefix(&file.payload, &file.id)?;

    if data.is_empty() {
        return Err(PipelineError::Encoding(format!("文件内容为空 ({})", file.id)));
    }

    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|e| PipelineError::Encoding(format!("无效的 base64 数据 ({}): {}", file.id, e)))?;

    let mime_type = Some(file.mime_type.trim().to_string())
        .filter(|m| !m.is_empty())
        .or(header_mime)
        .ok_or_else(|| PipelineError::Encoding(format!("无法确定文件类型 ({})", file.id)))?;

    Ok(InlinePart {
        mime_type,
        data: data.to_string(),
    })
}

/// 按顺序编码所有文件，遇到第一个错误即返回
pub fn encode_all(files: &[UploadedFile]) -> Result<Vec<InlinePart>, PipelineError> {
    files.iter().map(encode).collect()
}
