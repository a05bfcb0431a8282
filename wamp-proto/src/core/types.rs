pub use wamp_proto_values::{
    Dictionary,
    List,
    Value,
};
