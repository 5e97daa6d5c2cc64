pub mod credential;
pub mod transport;

pub use credential::{CredentialProvider, EnvCredentialProvider, StaticCredentialProvider};
pub use transport::{
    Content, GeminiHttpTransport, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GenerationTransport, Part, interpret_response,
};
