pub mod message;
pub mod validate;
