pub mod auto;
pub mod browser;
pub mod memory;

pub use auto::auto_detect_storage;
pub use browser::BrowserStorage;
pub use memory::MemoryStorage;
