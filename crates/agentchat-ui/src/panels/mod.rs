pub mod chat_modal;
pub mod home;
pub mod login;
