mod draft;
mod report;

pub use draft::{Coordinates, DraftView, ReportDraft};
pub use report::{CreateReport, Report, ReportSeverity};
