//! Actions representing side effects to be executed by the console runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime executes them in order and feeds their outcomes back as events
//! (`TransportResponse`, `ExportWritten`, `ExportFailed`), so the handler stays
//! free of I/O.

use crate::export::CsvExport;
use crate::worker::TransportRequest;

/// Commands executed by the console runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Stops the console.
    Quit,

    /// Posts a request to the transport worker.
    ///
    /// The worker answers with an `Event::TransportResponse`.
    PostToWorker(TransportRequest),

    /// Writes a rendered CSV file to the export directory.
    Export(CsvExport),
}
