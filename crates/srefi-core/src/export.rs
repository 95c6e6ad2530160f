//! CSV export of the administrator's visible submissions.
//!
//! Fields are written verbatim (no escaping); only the suggestion column is
//! wrapped in literal double quotes. Rows are joined by `\n` with no newline
//! after the last row, while an empty export is just the header line.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use srefi_types::SubmissionRecord;

use crate::{Result, SrefiError};

pub const EXPORT_FILENAME: &str = "inzendingen.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

const HEADER: [&str; 3] = ["Naam", "Talent", "Suggesties"];

/// A generated export, ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

impl CsvExport {
    pub fn from_records<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a SubmissionRecord>,
    {
        Ok(Self {
            filename: EXPORT_FILENAME,
            content_type: EXPORT_CONTENT_TYPE,
            bytes: to_csv(records)?,
        })
    }
}

pub fn to_csv<'a, I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a SubmissionRecord>,
{
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;

    let mut rows = 0usize;
    for record in records {
        let suggestions = format!("\"{}\"", record.suggestions.join("; "));
        writer.write_record([
            record.name.as_str(),
            record.talent.as_str(),
            suggestions.as_str(),
        ])?;
        rows += 1;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| SrefiError::Io(e.into_error()))?;
    if rows > 0 {
        bytes.pop();
    }
    Ok(bytes)
}
