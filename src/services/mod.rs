pub mod analysis_client;
pub mod error_classifier;
pub mod file_encoder;
pub mod prompt_builder;
pub mod response_validator;
pub mod schema;

pub use analysis_client::AnalysisClient;
pub use error_classifier::{classify, classify_message};
pub use response_validator::ResponseValidator;
