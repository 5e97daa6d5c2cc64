//! 测试用的假传输层与辅助函数

#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use syllabus_coverage::infrastructure::transport::{
    GenerateContentRequest, GenerateContentResponse, GenerationTransport,
};
use syllabus_coverage::{
    AnalysisPipeline, Config, PipelineError, StaticCredentialProvider, SyllabusCatalog,
    UploadedFile,
};
use tokio::sync::Notify;

/// 按顺序返回预设结果的传输层，并记录调用次数与收到的凭证
pub struct FakeTransport {
    replies: Mutex<Vec<Result<Value, PipelineError>>>,
    credentials_seen: Mutex<Vec<String>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn new(replies: Vec<Result<Value, PipelineError>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            credentials_seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// 每次请求都等待 `gate` 放行
    pub fn gated(replies: Vec<Result<Value, PipelineError>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn credentials_seen(&self) -> Vec<String> {
        self.credentials_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationTransport for FakeTransport {
    async fn generate(
        &self,
        credential: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.credentials_seen
            .lock()
            .unwrap()
            .push(credential.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            if replies.is_empty() {
                Err(PipelineError::Other("没有预设的响应".to_string()))
            } else {
                replies.remove(0)
            }
        };

        reply.map(|v| serde_json::from_value(v).unwrap())
    }
}

/// 只包含一段文本的服务响应
pub fn text_reply(text: &str) -> Result<Value, PipelineError> {
    Ok(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
}

pub fn valid_answer() -> String {
    json!({
        "topicScores": [
            {"topicId": "G4A-02", "score": 90},
            {"topicId": "G4A-09", "score": 55}
        ],
        "missingTopics": [
            {"topicId": "G4A-05", "reason": "没有观察物体的题目", "suggestion": "增加三视图练习"}
        ],
        "overallScore": 72,
        "aiCommentary": "计算题比例偏高，图形与统计部分不足。",
        "questionCount": 20
    })
    .to_string()
}

pub fn sample_files() -> Vec<UploadedFile> {
    vec![
        UploadedFile::new("page-1.png", "image/png", "data:image/png;base64,iVBORw0KGgo="),
        UploadedFile::new("page-2.jpg", "image/jpeg", "data:image/jpeg;base64,/9j/4AAQ"),
    ]
}

pub fn pipeline(
    credential: Option<&str>,
    transport: Arc<FakeTransport>,
) -> (AnalysisPipeline, Arc<StaticCredentialProvider>) {
    let credentials = Arc::new(StaticCredentialProvider::new(credential.map(String::from)));
    let pipeline = AnalysisPipeline::new(
        &Config::default(),
        credentials.clone(),
        transport,
        Arc::new(SyllabusCatalog::builtin()),
    );
    (pipeline, credentials)
}
