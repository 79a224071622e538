pub mod violation_type_handler;

pub use violation_type_handler::*;
