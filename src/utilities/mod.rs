pub mod debug;
pub mod floor_name;
pub mod input;
pub mod sign_generator;
