mod draft_dto;
mod report_dto;

pub use draft_dto::*;
pub use report_dto::*;
