pub mod config;
pub mod direction;
pub mod sign_entry;
