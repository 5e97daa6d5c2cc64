//! 文件采集：把目录中的试卷图片读入内存，转换为 `UploadedFile`
//!
//! 与浏览器上传一致，payload 带 `data:<mime>;base64,` 前缀

use crate::models::upload::UploadedFile;
use anyhow::{Context, Result};
use base64::Engine;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 读取单个文件
pub async fn load_upload(path: &Path) -> Result<UploadedFile> {
    let bytes = fs::read(path)
        .await
        .with_context(|| format!("无法读取文件: {}", path.display()))?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let payload = format!("data:{};base64,{}", mime_type, encoded);

    let id = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(UploadedFile::new(id, mime_type, payload))
}

/// 是否为支持的上传类型（图片或 PDF）
fn is_supported(path: &Path) -> bool {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    mime.type_() == mime_guess::mime::IMAGE || mime.essence_str() == "application/pdf"
}

/// 从文件夹中加载所有支持的文件，按文件名排序
pub async fn load_uploads_from_folder(folder_path: &str) -> Result<Vec<UploadedFile>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.is_file() && is_supported(&path) {
            paths.push(path);
        } else {
            tracing::debug!("跳过不支持的文件: {}", path.display());
        }
    }
    paths.sort();

    let mut uploads = Vec::with_capacity(paths.len());
    for path in paths {
        match load_upload(&path).await {
            Ok(file) => {
                tracing::info!("已加载: {} ({})", file.id, file.mime_type);
                uploads.push(file);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(uploads)
}
