pub mod cli;
pub mod error;
pub mod inference;
pub mod init;
pub mod models;
pub mod narrative;
pub mod personality;
pub mod prompt;
pub mod services;

pub use error::FabulaError;
