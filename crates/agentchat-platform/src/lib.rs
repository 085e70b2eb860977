pub mod rest;
pub mod storage;

pub use rest::RestClient;
