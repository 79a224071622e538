mod violation_type;

pub use violation_type::ViolationType;
