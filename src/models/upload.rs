use serde::{Deserialize, Serialize};

/// 用户上传的文件
///
/// `payload` 为 base64 数据，可能带有 `data:image/png;base64,` 形式的传输前缀
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub id: String,
    pub mime_type: String,
    pub payload: String,
}

impl UploadedFile {
    pub fn new(
        id: impl Into<String>,
        mime_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            mime_type: mime_type.into(),
            payload: payload.into(),
        }
    }
}

/// 请求中的内联数据块（不带前缀的 base64）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlinePart {
    pub mime_type: String,
    pub data: String,
}
