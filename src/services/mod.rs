pub mod hierarchy_walker;
pub mod question_extractor;
pub mod record_writer;
pub mod session_manager;
pub mod session_store;
pub mod site_selectors;

pub use hierarchy_walker::HierarchyWalker;
pub use question_extractor::QuestionExtractor;
pub use record_writer::{sanitize, RecordWriter};
pub use session_manager::{SessionManager, SessionPlan};
pub use session_store::SessionStore;
