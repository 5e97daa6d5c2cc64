use crate::models::syllabus::SyllabusCatalog;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载考纲目录
///
/// 文件格式：
/// ```toml
/// [[topics]]
/// id = "G4A-01"
/// name = "升和毫升"
/// description = "..."
/// ```
pub async fn load_syllabus_file(toml_file_path: &Path) -> Result<SyllabusCatalog> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取考纲文件: {}", toml_file_path.display()))?;

    let catalog: SyllabusCatalog = toml::from_str(&content)
        .with_context(|| format!("无法解析考纲文件: {}", toml_file_path.display()))?;

    if catalog.is_empty() {
        anyhow::bail!("考纲文件中没有考点: {}", toml_file_path.display());
    }

    if let Some(id) = catalog.first_duplicate_id() {
        anyhow::bail!("考纲中存在重复的考点 id: {}", id);
    }

    Ok(catalog)
}

/// 加载考纲：指定了文件则读取文件，否则使用内置考纲
pub async fn load_syllabus(syllabus_file: Option<&str>) -> Result<SyllabusCatalog> {
    match syllabus_file {
        Some(path) => {
            let catalog = load_syllabus_file(Path::new(path)).await?;
            tracing::info!("已加载自定义考纲 {}，共 {} 个考点", path, catalog.len());
            Ok(catalog)
        }
        None => {
            let catalog = SyllabusCatalog::builtin();
            tracing::info!("使用内置考纲，共 {} 个考点", catalog.len());
            Ok(catalog)
        }
    }
}
