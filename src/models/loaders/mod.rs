pub mod syllabus_loader;
pub mod upload_loader;

pub use syllabus_loader::{load_syllabus, load_syllabus_file};
pub use upload_loader::{load_upload, load_uploads_from_folder};
