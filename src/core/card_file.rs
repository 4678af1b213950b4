//! Codec for the flat `term:definition:mistakes` card file.
//!
//! Fields are never quoted, so terms and definitions must not contain `:`.

use crate::domain::model::CardRecord;
use crate::utils::error::{FlashcardError, Result};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

const DELIMITER: u8 = b':';
const FIELD_COUNT: usize = 3;

/// Parses a whole card file. Any malformed line rejects the file.
pub fn parse(content: &str) -> Result<Vec<CardRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        records.push(parse_row(&row)?);
    }
    Ok(records)
}

fn parse_row(row: &StringRecord) -> Result<CardRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or_default();

    if row.len() != FIELD_COUNT {
        return Err(FlashcardError::ParseError {
            line,
            reason: format!("expected {} fields, found {}", FIELD_COUNT, row.len()),
        });
    }

    row.deserialize::<CardRecord>(None)
        .map_err(|e| FlashcardError::ParseError {
            line,
            reason: format!("invalid mistake count {:?}: {}", &row[2], e),
        })
}

pub fn render(records: &[CardRecord]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in records {
        check_encodable(record)?;
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| FlashcardError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| {
        FlashcardError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Fields are written unquoted, so a delimiter or line break would not read back.
fn check_encodable(record: &CardRecord) -> Result<()> {
    for (field, value) in [("term", &record.term), ("definition", &record.definition)] {
        if let Some(bad) = value.chars().find(|c| matches!(c, ':' | '\n' | '\r')) {
            return Err(FlashcardError::UnencodableCard {
                term: record.term.clone(),
                reason: format!("{} contains {:?}", field, bad),
            });
        }
    }
    Ok(())
}
