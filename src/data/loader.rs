//! Survey CSV Loader
//! Reads the questionnaire file, applies the fixed schema, and normalizes
//! missing weekday cells.

use log::warn;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::analysis::{Period, Weekday};

/// Column names applied positionally; the file's own header row is ignored.
pub const SCHEMA: [&str; 9] = [
    "student_id",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "quiz_satisfied",
    "challenges",
];

pub const SATISFACTION_COLUMN: &str = "quiz_satisfied";
pub const CHALLENGE_COLUMN: &str = "challenges";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("survey file not found: {}", .path.display())]
    Missing { path: PathBuf },
    #[error("failed to read survey file {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse survey file {}: {}", .path.display(), .source)]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("survey file {} has {} columns, expected {}", .path.display(), .found, .expected)]
    ColumnCount {
        path: PathBuf,
        found: usize,
        expected: usize,
    },
}

/// One loaded, normalized survey table.
#[derive(Debug, Clone)]
pub struct SurveyData {
    pub table: DataFrame,
}

impl SurveyData {
    pub fn respondents(&self) -> usize {
        self.table.height()
    }
}

/// Load and normalize the survey table at `path`.
///
/// The read is strict: a missing file, an unparseable row, or a column count
/// other than [`SCHEMA`]'s are all fatal.
pub fn load_survey(path: &Path) -> Result<SurveyData, LoaderError> {
    if !path.exists() {
        return Err(LoaderError::Missing {
            path: path.to_path_buf(),
        });
    }
    let csv_error = |source| LoaderError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(10000))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(csv_error)?
        .finish()
        .map_err(csv_error)?;

    if df.width() != SCHEMA.len() {
        return Err(LoaderError::ColumnCount {
            path: path.to_path_buf(),
            found: df.width(),
            expected: SCHEMA.len(),
        });
    }
    df.set_column_names(SCHEMA).map_err(csv_error)?;

    let table = fill_missing_availability(df).map_err(csv_error)?;
    Ok(SurveyData { table })
}

/// Replace nulls in every weekday column with the unavailable sentinel,
/// casting the column to string first.
///
/// A weekday column absent from `df` is logged and skipped; downstream
/// aggregation then sees it as missing.
pub fn fill_missing_availability(df: DataFrame) -> PolarsResult<DataFrame> {
    let mut fills = Vec::new();
    for day in Weekday::ALL {
        let present = df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == day.column());
        if present {
            fills.push(
                col(day.column())
                    .cast(DataType::String)
                    .fill_null(lit(Period::Unavailable.label())),
            );
        } else {
            warn!(
                "column '{}' not found in the survey table; skipping the unavailable fill",
                day.column()
            );
        }
    }

    if fills.is_empty() {
        return Ok(df);
    }
    df.lazy().with_columns(fills).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::env;
    use std::fs;

    const SURVEY_CSV: &str = "\
Timestamp,Mon,Tue,Wed,Thu,Fri,Sat,Satisfied,Challenges
a1,\"Morning, Afternoon\",,Evening,,,,Yes,Time management
a2,,Evening,,,Morning,,No,Question clarity
";

    fn temp_csv(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn applies_schema_and_fills_weekdays() {
        let path = temp_csv("availboard_loader_schema.csv", SURVEY_CSV);
        let survey = load_survey(&path).unwrap();

        assert_eq!(survey.respondents(), 2);
        let names: Vec<&str> = survey
            .table
            .get_column_names()
            .iter()
            .map(|name| name.as_str())
            .collect();
        assert_eq!(names, SCHEMA);

        for day in Weekday::ALL {
            let column = survey.table.column(day.column()).unwrap();
            assert_eq!(column.null_count(), 0, "{} still has nulls", day.column());
        }

        let monday = survey.table.column("monday").unwrap();
        let monday = monday.str().unwrap();
        assert_eq!(monday.get(0), Some("Morning, Afternoon"));
        assert_eq!(monday.get(1), Some("Unavailable"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_a_distinct_error() {
        let path = env::temp_dir().join("availboard_loader_nope.csv");
        let err = load_survey(&path).unwrap_err();
        assert!(matches!(err, LoaderError::Missing { .. }));
    }

    #[test]
    fn wrong_column_count_is_fatal() {
        let path = temp_csv("availboard_loader_narrow.csv", "a,b,c\n1,2,3\n");
        let err = load_survey(&path).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::ColumnCount {
                found: 3,
                expected: 9,
                ..
            }
        ));
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn fill_skips_absent_weekday_columns() {
        let frame = df!("tuesday" => [Some("Evening"), None]).unwrap();
        let filled = fill_missing_availability(frame).unwrap();

        let tuesday = filled.column("tuesday").unwrap();
        assert_eq!(tuesday.null_count(), 0);
        assert_eq!(filled.width(), 1);
    }
}
