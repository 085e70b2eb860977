pub mod api;
pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod message;
pub mod user;


pub use error::ClientError;
pub type Result<T> = std::result::Result<T, ClientError>;
