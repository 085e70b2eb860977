pub mod format;
pub mod guards;
pub mod panels;
pub mod state;
pub mod theme;
