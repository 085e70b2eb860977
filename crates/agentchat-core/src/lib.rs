pub mod chats;
pub mod event_bus;
pub mod messages;
pub mod ports;
pub mod session;
pub mod token;

#[cfg(test)]
mod tests;
