//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有调用方一侧的会话状态，并保证同一时间只有一次分析在进行。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::AnalysisSession (上传列表 / 结果 / 错误 / 闸门)
//!     ↓
//! workflow::AnalysisPipeline (发送 → 校验 → 分类)
//!     ↓
//! services (能力层：编码 / 提示词 / 请求 / 校验 / 分类)
//!     ↓
//! infrastructure (基础设施：凭证提供 / 传输)
//! ```

pub mod session;

pub use session::{AnalysisSession, RunOutcome, SkipReason};
