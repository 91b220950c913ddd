pub mod event_record_repository;
pub mod repository_trait;

pub use event_record_repository::*;
pub use repository_trait::*;
