pub mod analysis;
pub mod loaders;
pub mod syllabus;
pub mod upload;

pub use analysis::{AnalysisResult, MissingTopic, TopicScore};
pub use loaders::{load_syllabus, load_uploads_from_folder};
pub use syllabus::{SyllabusCatalog, SyllabusTopic};
pub use upload::{InlinePart, UploadedFile};
