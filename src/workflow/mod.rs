pub mod analysis_flow;

pub use analysis_flow::AnalysisPipeline;
