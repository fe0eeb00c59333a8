use crate::adapters::text_record::TextRecord;
use crate::config::CsvConfig;
use crate::core::coercion::{CoercionPolicy, PropertyFailure};
use crate::core::mapper::{Mapped, Mapper};
use crate::domain::model::{TypeTag, Value};
use crate::domain::ports::Record;
use crate::utils::error::{MapperError, Result};
use crate::utils::validation::validate_path;
use std::io;
use std::path::Path;

/// Writes records as CSV using the properties marked as CSV columns, in column order.
///
/// Returns the number of data rows written.
pub fn write_csv<'a, R, I, W>(records: I, writer: W, config: &CsvConfig) -> Result<usize>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
    W: io::Write,
{
    let schema = R::schema();
    let columns = schema.csv_columns();
    let policy = CoercionPolicy::default();
    let text = TypeTag::text();

    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter()?)
        .from_writer(writer);

    if config.include_headers() {
        csv_writer.write_record(columns.iter().map(|(_, header)| *header))?;
    }

    let mut rows = 0;
    for record in records {
        let mut cells = Vec::with_capacity(columns.len());
        for (property, _) in &columns {
            let cell = policy
                .coerce(&property.get(record), property.type_tag(), &text)
                .map_err(|failure| {
                    MapperError::from(PropertyFailure {
                        property: property.name(),
                        failure,
                    })
                })?;
            cells.push(match cell {
                Value::Text(s) => s,
                _ => String::new(),
            });
        }
        csv_writer.write_record(&cells)?;
        rows += 1;
    }

    csv_writer.flush()?;
    tracing::debug!("💾 {}: wrote {} CSV rows", schema.type_name(), rows);
    Ok(rows)
}

pub fn to_csv_string<'a, R, I>(records: I, config: &CsvConfig) -> Result<String>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
{
    let mut buffer = Vec::new();
    write_csv(records, &mut buffer, config)?;
    String::from_utf8(buffer).map_err(|e| MapperError::IoError(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Writes records to a CSV file, creating parent directories as needed.
pub fn create_csv_file<'a, R, I, P>(records: I, path: P, config: &CsvConfig) -> Result<usize>
where
    R: Record,
    I: IntoIterator<Item = &'a R>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    validate_path("csv output", &path.to_string_lossy())?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(path)?;
    let rows = write_csv(records, io::BufWriter::new(file), config)?;
    tracing::info!("💾 Wrote {} rows to {}", rows, path.display());
    Ok(rows)
}

/// Reads a headed CSV into text records. Empty cells read as null.
pub fn read_text_records<Rd: io::Read>(reader: Rd, config: &CsvConfig) -> Result<Vec<TextRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter()?)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let mut record = TextRecord::new(format!("csv row {}", index + 1));
        for (header, cell) in headers.iter().zip(row.iter()) {
            let value = if cell.is_empty() {
                None
            } else {
                Some(cell.to_string())
            };
            record.insert(header, value);
        }
        records.push(record);
    }

    tracing::debug!("📥 Read {} CSV rows", records.len());
    Ok(records)
}

/// Reads a headed CSV and maps every row onto a fresh `D`.
pub fn read_mapped<D, Rd>(reader: Rd, config: &CsvConfig, mapper: &Mapper) -> Result<Vec<Mapped<D>>>
where
    D: Record,
    Rd: io::Read,
{
    read_text_records(reader, config)?
        .iter()
        .map(|row| mapper.create_mapped::<D, _>(row))
        .collect()
}
