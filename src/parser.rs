use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::{Serialize, Deserialize};
use thiserror::Error;

use crate::schedule::colors::normalize_color;
use crate::schedule::credits::{parse_credits, Credits};
use crate::schedule::ColorMap;

/// One row of the uploaded course sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub code: String,
    pub title: String,
    pub credits: Credits,
}

/// Everything the scheduler needs from the sheet
#[derive(Debug, Clone, Default)]
pub struct CourseSheet {
    pub courses: Vec<CourseRecord>,
    pub colors: ColorMap,
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("cannot read course sheet: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed course sheet: {0}")]
    Csv(#[from] csv::Error),
}

/// Column positions located from the header row
struct Columns {
    code: usize,
    title: Option<usize>,
    credits: Option<usize>,
    color: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |needle: &str| {
            headers
                .iter()
                .position(|h| h.trim().to_lowercase().contains(needle))
        };
        Columns {
            // Second column when the sheet has no "Course Code" header
            code: find("course code").unwrap_or(1),
            title: find("course title").or_else(|| find("course name")),
            credits: find("credits"),
            color: find("color").or_else(|| find("colour")),
        }
    }
}

fn field<'r>(record: &'r StringRecord, col: Option<usize>) -> &'r str {
    col.and_then(|c| record.get(c)).unwrap_or("").trim()
}

/// Loads courses and their colors from a CSV sheet on disk
pub fn load_courses<P: AsRef<Path>>(csv_path: P) -> Result<CourseSheet, SheetError> {
    let path = csv_path.as_ref();
    info!("Loading courses from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_courses_from_reader(file)
}

/// Loads courses and their colors from CSV data.
///
/// Rows without a course code are skipped. A malformed credit string gives
/// the course zero hours instead of failing the load. Rows without a color
/// get an empty entry so the fallback color applies after scheduling.
/// Short rows read their missing cells as empty; extra cells are ignored.
pub fn load_courses_from_reader<R: Read>(reader: R) -> Result<CourseSheet, SheetError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.clone();
    let columns = Columns::locate(&headers);

    let mut sheet = CourseSheet::default();

    for result in reader.records() {
        let record = result?;

        let code = field(&record, Some(columns.code)).to_string();
        if code.is_empty() {
            continue;
        }

        let credits_raw = field(&record, columns.credits);
        let credits = parse_credits(credits_raw);
        if credits == Credits::default() && !credits_raw.is_empty() {
            debug!("Unreadable credits '{}' for {}, using zero hours", credits_raw, code);
        }

        sheet.colors.insert(code.clone(), normalize_color(field(&record, columns.color)));
        sheet.courses.push(CourseRecord {
            title: field(&record, columns.title).to_string(),
            code,
            credits,
        });
    }

    info!("Loaded {} course(s)", sheet.courses.len());
    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SHEET: &str = "\
S.No,Course Code,Course Title,Credits (L-T-P-S-C),Color
1,CS201,Data Structures,3-1-2-0-5,FF00B050
2, MA202 ,Probability,3-1-0-0-4,
3,,Blank row,3-0-0-0-3,#123456
4,HS205,Soft Skills,1-0-0-0-1,#abcdef
5,EC203,Signals,oops,
";

    #[test]
    fn reads_codes_credits_and_colors() {
        let sheet = load_courses_from_reader(SHEET.as_bytes()).unwrap();
        let codes: Vec<&str> = sheet.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS201", "MA202", "HS205", "EC203"]);

        assert_eq!(sheet.courses[0].title, "Data Structures");
        assert_eq!(sheet.courses[0].credits.as_tuple(), (3, 1, 2, 0, 5));
        assert_eq!(sheet.courses[3].credits, Credits::default());

        assert_eq!(sheet.colors["CS201"], "#00B050");
        assert_eq!(sheet.colors["MA202"], "");
        assert_eq!(sheet.colors["HS205"], "#abcdef");
    }

    #[test]
    fn falls_back_to_second_column_without_headers_found() {
        let data = "No,Code,Credits\n1,CS101,3-1-0-0-4\n";
        let sheet = load_courses_from_reader(data.as_bytes()).unwrap();
        assert_eq!(sheet.courses.len(), 1);
        assert_eq!(sheet.courses[0].code, "CS101");
        assert_eq!(sheet.courses[0].credits.as_tuple(), (3, 1, 0, 0, 4));
    }

    #[test]
    fn ragged_rows_still_load() {
        let data = "\
Course Code,Credits (L-T-P-S-C),Color
CS101,3-1-0-0-4,#112233,extra,cells
MA102,3-1-0-0-4
PH103
";
        let sheet = load_courses_from_reader(data.as_bytes()).unwrap();
        let codes: Vec<&str> = sheet.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["CS101", "MA102", "PH103"]);

        assert_eq!(sheet.colors["CS101"], "#112233");
        assert_eq!(sheet.courses[1].credits.as_tuple(), (3, 1, 0, 0, 4));
        assert_eq!(sheet.colors["MA102"], "");
        assert_eq!(sheet.courses[2].credits, Credits::default());
        assert_eq!(sheet.colors["PH103"], "");
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SHEET.as_bytes()).unwrap();
        let sheet = load_courses(file.path()).unwrap();
        assert_eq!(sheet.courses.len(), 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_courses("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, SheetError::Io(_)));
    }
}
