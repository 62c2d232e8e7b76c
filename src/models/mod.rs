pub mod hierarchy;
pub mod question;
pub mod storage_state;

pub use hierarchy::{Category, Topic};
pub use question::{QuestionRecord, CONTENT_NOT_FOUND, TITLE_NOT_FOUND};
pub use storage_state::{NameValue, OriginStorage, StorageState, StoredCookie};
