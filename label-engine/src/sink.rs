//! Print sinks: consumers of finished print jobs

use std::io::Write;

use serde::Serialize;
use shared::models::TemplateId;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use crate::error::PrintResult;
use crate::job::{Page, PrintJob};

/// Trait for print sink adapters
#[allow(async_fn_in_trait)]
pub trait PrintSink {
    /// Emit every page of the job, in order
    async fn print(&self, job: &PrintJob) -> PrintResult<()>;
}

#[derive(Serialize)]
struct PageLine<'a> {
    template_id: TemplateId,
    name: &'a str,
    #[serde(flatten)]
    page: &'a Page,
}

/// Writes one JSON object per page, one per line.
///
/// Every page except the last carries `page_break_after: true`.
pub struct JsonLinesSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> PrintSink for JsonLinesSink<W> {
    #[instrument(skip_all, fields(template_id = job.template_id, pages = job.pages.len()))]
    async fn print(&self, job: &PrintJob) -> PrintResult<()> {
        let mut writer = self.writer.lock().await;
        let last = job.pages.len().saturating_sub(1);

        for page in &job.pages {
            let mut page = page.clone();
            page.page_break_after = page.index < last;
            let line = PageLine {
                template_id: job.template_id,
                name: &job.name,
                page: &page,
            };
            serde_json::to_writer(&mut *writer, &line)?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;

        info!("Print job emitted");
        Ok(())
    }
}
