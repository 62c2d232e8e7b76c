pub mod browser_page;

pub use browser_page::{BrowserPage, Navigator};
