pub mod auth;
pub mod core;
pub mod message;
pub mod peer;
pub mod serializer;
