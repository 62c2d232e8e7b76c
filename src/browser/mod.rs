pub mod context;
pub mod launcher;
pub mod profile;

pub use context::BrowsingContext;
pub use launcher::launch_browser;
pub use profile::PageProfile;
