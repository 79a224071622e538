mod violation_type_service;

pub use violation_type_service::ViolationTypeService;
