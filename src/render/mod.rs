//! Report rendering.
//!
//! A [`ReportRenderer`] turns a [`PeriodReport`] into the bytes of an output
//! document. Layout is shared through [`ReportTable`], so every renderer
//! prints the same header, columns and footer.

mod pdf;
mod table;

pub use pdf::PdfRenderer;
pub use table::{ABSENT_SLOT, NO_RECORDS_NOTICE, NOT_INFORMED, ReportTable};

use crate::error::EngineResult;
use crate::models::PeriodReport;

/// Produces a document from a period report.
pub trait ReportRenderer: Send + Sync {
    /// MIME type of the produced document.
    fn content_type(&self) -> &'static str;

    /// Renders the report.
    fn render(&self, report: &PeriodReport) -> EngineResult<Vec<u8>>;
}
