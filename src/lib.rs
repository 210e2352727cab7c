pub mod config;
pub mod error;
pub mod imaging;
pub mod llm;
pub mod pipeline;
pub mod prompt;
pub mod server;

pub use error::{Error, Result};
