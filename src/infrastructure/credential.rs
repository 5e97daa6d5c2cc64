//! 凭证提供 - 基础设施层
//!
//! 凭证完全由外部持有，核心流程每次分析开始时重新读取，不做缓存

use async_trait::async_trait;
use std::sync::RwLock;
use tracing::{info, warn};

/// 凭证提供接口
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// 当前是否有可用凭证
    async fn has_credential(&self) -> bool {
        self.get_credential().await.is_some()
    }

    /// 触发外部的凭证选择流程，完成后视为凭证已可用
    async fn request_credential(&self);

    /// 获取当前凭证，空字符串视为不存在
    async fn get_credential(&self) -> Option<String>;
}

/// 从环境变量读取凭证
///
/// 每次调用都重新读取，运行期间修改环境变量会在下一次分析时生效
pub struct EnvCredentialProvider {
    var_name: String,
}

impl EnvCredentialProvider {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

#[async_trait]
impl CredentialProvider for EnvCredentialProvider {
    async fn request_credential(&self) {
        warn!(
            "请设置环境变量 {} 为有效的 API Key（需关联已开通付费账单的项目）",
            self.var_name
        );
    }

    async fn get_credential(&self) -> Option<String> {
        std::env::var(&self.var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// 内存中的凭证，可随时替换
pub struct StaticCredentialProvider {
    credential: RwLock<Option<String>>,
    pending: RwLock<Option<String>>,
}

impl StaticCredentialProvider {
    pub fn new(credential: Option<String>) -> Self {
        Self {
            credential: RwLock::new(credential),
            pending: RwLock::new(None),
        }
    }

    /// 直接替换当前凭证
    pub fn set(&self, credential: Option<String>) {
        if let Ok(mut guard) = self.credential.write() {
            *guard = credential;
        }
    }

    /// 预置下一次 `request_credential` 时生效的凭证
    pub fn stage(&self, credential: impl Into<String>) {
        if let Ok(mut guard) = self.pending.write() {
            *guard = Some(credential.into());
        }
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentialProvider {
    async fn request_credential(&self) {
        let staged = self.pending.write().ok().and_then(|mut p| p.take());
        if let Some(credential) = staged {
            info!("已切换到新的 API 凭证");
            self.set(Some(credential));
        }
    }

    async fn get_credential(&self) -> Option<String> {
        self.credential
            .read()
            .ok()
            .and_then(|c| c.clone())
            .filter(|c| !c.trim().is_empty())
    }
}
