use super::coercion::{parse_date, parse_frequency, parse_load, parse_posture, parse_score, parse_task};
use super::record::{
    AssessmentRecord, COLUMNS, COL_DATE, COL_FREQUENCY, COL_LOAD_KG, COL_POSTURE, COL_RISK_SCORE,
    COL_TASK, REQUIRED_COLUMNS,
};
use crate::errors::{ParseError, RowIssue, StoreError, StoreResult};
use crate::scoring::Posture;
use chrono::NaiveDate;
use csv::{ByteRecord, StringRecord};
use std::io::{Read, Write};
use std::path::Path;

/// Header plus untyped rows, as read from a CSV source.
///
/// Cells stay as raw bytes until [`ColumnIndex::coerce`] decodes and types
/// them, so one badly encoded cell only costs its own row.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: StringRecord,
    rows: Vec<ByteRecord>,
}

impl RawTable {
    pub fn new<H, R, C>(headers: H, rows: impl IntoIterator<Item = R>) -> Self
    where
        H: IntoIterator<Item = C>,
        R: IntoIterator<Item = C>,
        C: AsRef<str>,
    {
        Self {
            headers: headers.into_iter().map(|h| h.as_ref().trim().to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|cell| cell.as_ref().to_string())
                        .collect::<ByteRecord>()
                })
                .collect(),
        }
    }

    /// Parse CSV text. Ragged rows are kept; missing cells surface as
    /// [`ParseError::Missing`] when the row is coerced.
    pub fn from_reader<R: Read>(reader: R) -> StoreResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);
        let headers = reader
            .byte_headers()?
            .iter()
            .map(|h| String::from_utf8_lossy(h).trim().to_string())
            .collect();
        let rows = reader.byte_records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self { headers, rows })
    }

    pub fn from_path(path: &Path) -> StoreResult<Self> {
        let file = std::fs::File::open(path).map_err(|e| StoreError::io("open", path, e))?;
        Self::from_reader(file)
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.headers.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Locate the store columns. Fails listing every required column that is
    /// absent; `risk_score` is required only when `score_required` is set.
    pub fn columns(&self, score_required: bool) -> StoreResult<ColumnIndex> {
        let find = |name: &str| self.headers.iter().position(|h| h == name);

        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&name| find(name).is_none())
            .map(|name| name.to_string())
            .collect();
        let risk_score = find(COL_RISK_SCORE);
        if score_required && risk_score.is_none() {
            missing.push(COL_RISK_SCORE.to_string());
        }
        if !missing.is_empty() {
            return Err(StoreError::schema(missing));
        }

        // Presence checked above
        let at = |name: &str| find(name).unwrap_or_default();
        Ok(ColumnIndex {
            date: at(COL_DATE),
            task: at(COL_TASK),
            load_kg: at(COL_LOAD_KG),
            frequency: at(COL_FREQUENCY),
            posture: at(COL_POSTURE),
            risk_score,
        })
    }

    /// Rows with their 1-based data row number.
    pub fn rows(&self) -> impl Iterator<Item = (usize, &ByteRecord)> {
        self.rows.iter().enumerate().map(|(i, row)| (i + 1, row))
    }
}

/// Typed fields of a row, before the score is settled.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFields {
    pub date: NaiveDate,
    pub task: String,
    pub load_kg: f64,
    pub frequency_per_hour: u32,
    pub posture: Posture,
    /// `None` when the column is absent, `Some(Err)` for a bad cell
    pub risk_score: Option<Result<u8, ParseError>>,
}

impl RowFields {
    pub fn into_record(self, risk_score: u8) -> AssessmentRecord {
        AssessmentRecord {
            date: self.date,
            task: self.task,
            load_kg: self.load_kg,
            frequency_per_hour: self.frequency_per_hour,
            posture: self.posture,
            risk_score,
        }
    }
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    date: usize,
    task: usize,
    load_kg: usize,
    frequency: usize,
    posture: usize,
    risk_score: Option<usize>,
}

impl ColumnIndex {
    /// Coerce the required fields; the first failing field is reported.
    pub fn coerce(&self, row_number: usize, row: &ByteRecord) -> Result<RowFields, RowIssue> {
        let issue = |column: &'static str| {
            move |error: ParseError| RowIssue {
                row: row_number,
                column,
                error,
            }
        };

        Ok(RowFields {
            date: cell(row, self.date)
                .and_then(parse_date)
                .map_err(issue(COL_DATE))?,
            task: cell(row, self.task)
                .and_then(parse_task)
                .map_err(issue(COL_TASK))?,
            load_kg: cell(row, self.load_kg)
                .and_then(parse_load)
                .map_err(issue(COL_LOAD_KG))?,
            frequency_per_hour: cell(row, self.frequency)
                .and_then(parse_frequency)
                .map_err(issue(COL_FREQUENCY))?,
            posture: cell(row, self.posture)
                .and_then(parse_posture)
                .map_err(issue(COL_POSTURE))?,
            risk_score: self
                .risk_score
                .map(|i| cell(row, i).and_then(parse_score)),
        })
    }
}

/// Decode one cell; an absent cell is `None`, bad UTF-8 is an error.
fn cell(row: &ByteRecord, index: usize) -> Result<Option<&str>, ParseError> {
    row.get(index)
        .map(std::str::from_utf8)
        .transpose()
        .map_err(|_| ParseError::InvalidText)
}

/// Serialize records with a header row in the store column layout.
pub fn write_records<W: Write>(writer: W, records: &[AssessmentRecord]) -> StoreResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(COLUMNS)?;
    for record in records {
        writer.write_record(record.to_row())?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn encode_records(records: &[AssessmentRecord]) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_columns_reports_every_missing_required_column() {
        let table = RawTable::new(["date", "load_kg"], Vec::<Vec<&str>>::new());
        let err = table.columns(false).unwrap_err();
        match err {
            StoreError::Schema { missing } => assert_eq!(
                missing,
                vec!["task", "frequency_per_hour", "posture"]
            ),
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_columns_score_required_for_stored_files() {
        let table = RawTable::new(REQUIRED_COLUMNS, Vec::<Vec<&str>>::new());
        assert!(table.columns(false).is_ok());
        assert!(table.columns(true).unwrap_err().is_schema());
    }

    #[test]
    fn test_from_reader_tolerates_reordered_extra_and_padded_headers() {
        let csv = indoc! {"
            posture , notes,task,date,frequency_per_hour,load_kg
            Twisting,first shift,Sort parcels,2025-03-04,30,20
        "};
        let table = RawTable::from_reader(csv.as_bytes()).unwrap();
        let columns = table.columns(false).unwrap();

        let (row_number, row) = table.rows().next().unwrap();
        let fields = columns.coerce(row_number, row).unwrap();
        assert_eq!(fields.task, "Sort parcels");
        assert_eq!(fields.frequency_per_hour, 30);
        assert_eq!(fields.load_kg, 20.0);
        assert_eq!(fields.risk_score, None);
    }

    #[test]
    fn test_coerce_reports_first_bad_field() {
        let table = RawTable::new(
            COLUMNS,
            [["2025-13-01", "Lift", "ten", "5", "Neutral", "10"]],
        );
        let columns = table.columns(true).unwrap();
        let (n, row) = table.rows().next().unwrap();
        let issue = columns.coerce(n, row).unwrap_err();
        assert_eq!(issue.row, 1);
        assert_eq!(issue.column, "date");
    }

    #[test]
    fn test_coerce_short_row_is_missing() {
        let csv = "date,task,load_kg,frequency_per_hour,posture,risk_score\n2025-01-01,Lift,5\n";
        let table = RawTable::from_reader(csv.as_bytes()).unwrap();
        let columns = table.columns(true).unwrap();
        let (n, row) = table.rows().next().unwrap();
        let issue = columns.coerce(n, row).unwrap_err();
        assert_eq!(issue.column, "frequency_per_hour");
        assert_eq!(issue.error, ParseError::Missing);
    }

    #[test]
    fn test_coerce_latin1_cell_is_invalid_text() {
        let mut csv = b"date,task,load_kg,frequency_per_hour,posture,risk_score\n".to_vec();
        csv.extend_from_slice(b"2025-01-01,K\xfchlraum,5,10,Neutral,10\n");
        let table = RawTable::from_reader(csv.as_slice()).unwrap();
        let columns = table.columns(true).unwrap();
        let (n, row) = table.rows().next().unwrap();
        let issue = columns.coerce(n, row).unwrap_err();
        assert_eq!(issue.column, "task");
        assert_eq!(issue.error, ParseError::InvalidText);
    }

    #[test]
    fn test_encode_quotes_embedded_commas() {
        let record = AssessmentRecord {
            date: NaiveDate::from_ymd_opt(2025, 10, 12).unwrap(),
            task: "Push cart, aisle 4".into(),
            load_kg: 10.0,
            frequency_per_hour: 30,
            posture: Posture::parse("Pushing"),
            risk_score: 33,
        };
        let bytes = encode_records(&[record]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            indoc! {r#"
                date,task,load_kg,frequency_per_hour,posture,risk_score
                2025-10-12,"Push cart, aisle 4",10,30,Pushing,33
            "#}
        );
    }
}
