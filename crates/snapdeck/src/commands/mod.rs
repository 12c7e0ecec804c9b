pub mod completion;
pub mod config;
pub mod outline;
pub mod version;
