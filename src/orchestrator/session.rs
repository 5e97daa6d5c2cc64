//! 分析会话
//!
//! 调用方一侧的状态：上传列表、最近一次结果、最近一次错误、是否需要重新选择凭证。
//! 同一时间只允许一次分析，通过布尔闸门拒绝重入。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{AnalysisFailure, Recovery};
use crate::infrastructure::CredentialProvider;
use crate::models::analysis::AnalysisResult;
use crate::models::upload::UploadedFile;
use crate::workflow::AnalysisPipeline;

/// 未执行分析的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 没有上传任何文件
    NoFiles,
    /// 已有分析在进行中
    AlreadyRunning,
    /// 需要先重新选择凭证
    CredentialRequired,
}

/// 一次 `run_analysis` 的结果
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Completed(Arc<AnalysisResult>),
    Failed(AnalysisFailure),
    Skipped(SkipReason),
}

#[derive(Debug, Default)]
struct SessionState {
    files: Vec<UploadedFile>,
    result: Option<Arc<AnalysisResult>>,
    error: Option<AnalysisFailure>,
    needs_credential: bool,
}

/// 离开作用域时释放闸门
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 分析会话
pub struct AnalysisSession {
    pipeline: AnalysisPipeline,
    credentials: Arc<dyn CredentialProvider>,
    in_flight: AtomicBool,
    state: Mutex<SessionState>,
}

impl AnalysisSession {
    /// 创建会话，并根据当前是否有凭证初始化 `needs_credential`
    pub async fn start(pipeline: AnalysisPipeline, credentials: Arc<dyn CredentialProvider>) -> Self {
        let needs_credential = !credentials.has_credential().await;
        if needs_credential {
            warn!("⚠️ 未检测到 API 凭证，请先选择凭证");
        }

        Self {
            pipeline,
            credentials,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                needs_credential,
                ..Default::default()
            }),
        }
    }

    pub async fn add_files(&self, files: Vec<UploadedFile>) {
        let mut state = self.state.lock().await;
        debug!("添加 {} 个文件", files.len());
        state.files.extend(files);
        state.error = None;
    }

    /// 按 id 移除文件，返回是否找到
    pub async fn remove_file(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        let before = state.files.len();
        state.files.retain(|f| f.id != id);
        state.files.len() != before
    }

    /// 触发外部凭证选择流程，完成后视为凭证可用
    pub async fn select_credential(&self) {
        self.credentials.request_credential().await;
        let mut state = self.state.lock().await;
        state.needs_credential = false;
        state.error = None;
    }

    pub async fn files(&self) -> Vec<UploadedFile> {
        self.state.lock().await.files.clone()
    }

    pub async fn result(&self) -> Option<Arc<AnalysisResult>> {
        self.state.lock().await.result.clone()
    }

    pub async fn last_error(&self) -> Option<AnalysisFailure> {
        self.state.lock().await.error.clone()
    }

    pub async fn needs_credential(&self) -> bool {
        self.state.lock().await.needs_credential
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 对当前上传列表执行一次分析
    ///
    /// 结果整体替换上一次的结果；凭证类失败会要求重新选择凭证
    pub async fn run_analysis(&self) -> RunOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            info!("已有分析在进行中，忽略本次请求");
            return RunOutcome::Skipped(SkipReason::AlreadyRunning);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let files = {
            let mut state = self.state.lock().await;
            if state.needs_credential {
                return RunOutcome::Skipped(SkipReason::CredentialRequired);
            }
            if state.files.is_empty() {
                return RunOutcome::Skipped(SkipReason::NoFiles);
            }
            state.error = None;
            state.result = None;
            state.files.clone()
        };

        let outcome = self.pipeline.analyze(&files).await;

        let mut state = self.state.lock().await;
        match outcome {
            Ok(result) => {
                let result = Arc::new(result);
                state.result = Some(result.clone());
                RunOutcome::Completed(result)
            }
            Err(failure) => {
                if failure.recovery() == Recovery::ReacquireCredential {
                    state.needs_credential = true;
                }
                state.error = Some(failure.clone());
                RunOutcome::Failed(failure)
            }
        }
    }
}
