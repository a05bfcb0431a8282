mod joiner;
mod session;

pub use joiner::{
    Joiner,
    SessionDetails,
};
pub use session::Session;
