pub mod anonymous;
pub mod auth_method;
pub mod authenticator;
pub mod cryptosign;
pub mod ticket;
pub mod wamp_cra;
