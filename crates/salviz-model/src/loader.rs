//! Delimited-text loader
//!
//! Reads a header-first CSV source into [`Record`]s. Only the columns in
//! [`REQUIRED_COLUMNS`] are read; everything else is ignored. Rows that
//! fail validation are excluded and reported, never fatal.
//!
//! Headers, category codes and salaries are trimmed. Job titles are kept
//! verbatim, since classification matches titles exactly.

use crate::error::{LoadError, RecordError, RowRejection};
use crate::record::Record;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Columns every source must provide
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "experience_level",
    "company_size",
    "job_title",
    "salary_in_usd",
];

/// Outcome of a load
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Accepted records, in source order
    pub records: Vec<Record>,
    /// Excluded rows, in source order
    pub rejected: Vec<RowRejection>,
}

impl LoadReport {
    /// Total data rows seen
    #[inline]
    #[must_use]
    pub fn rows_read(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

#[derive(Debug, Deserialize)]
struct RawRow {
    experience_level: String,
    company_size: String,
    job_title: String,
    salary_in_usd: String,
}

impl RawRow {
    fn into_record(self) -> Result<Record, RecordError> {
        let experience_level = self.experience_level.parse()?;
        let company_size = self.company_size.parse()?;
        let salary = self
            .salary_in_usd
            .trim()
            .parse::<f64>()
            .map_err(|_| RecordError::NonNumericSalary(self.salary_in_usd.clone()))?;
        Record::new(experience_level, company_size, self.job_title, salary)
    }
}

/// Load records from a CSV file
///
/// # Errors
/// Fails if the file cannot be opened or the header is unusable. Bad
/// rows are reported in [`LoadReport::rejected`] instead.
pub fn load_path(path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loading records from {}", path.display());
    load_reader(file)
}

/// Load records from any CSV reader
///
/// # Errors
/// Fails on I/O errors, undecodable headers, or a missing required column.
pub fn load_reader<R: Read>(reader: R) -> Result<LoadReport, LoadError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut report = LoadReport::default();
    for (i, row) in csv.deserialize::<RawRow>().enumerate() {
        let row_number = i + 1;
        let result = match row {
            Ok(raw) => raw.into_record(),
            Err(err) if err.is_io_error() => return Err(LoadError::Csv(err)),
            Err(err) => Err(RecordError::Malformed(err.to_string())),
        };
        match result {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::warn!("Skipping row {}: {}", row_number, reason);
                report.rejected.push(RowRejection {
                    row: row_number,
                    reason,
                });
            }
        }
    }

    tracing::info!(
        "Loaded {} records ({} rejected)",
        report.records.len(),
        report.rejected.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::job_group::{classify, JobGroup};
    use crate::record::{CompanySize, ExperienceLevel};
    use pretty_assertions::assert_eq;

    const HEADER: &str = "work_year,experience_level,employment_type,job_title,salary,salary_currency,salary_in_usd,employee_residence,remote_ratio,company_location,company_size";

    fn source(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn reads_required_columns_and_ignores_the_rest() {
        let text = source(&[
            "2023,SE,FT,Principal Data Scientist,80000,EUR,85847,ES,100,ES,L",
            "2023,MI,CT,ML Engineer,30000,USD,30000,US,100,US,S",
        ]);
        let report = load_reader(text.as_bytes()).unwrap();

        assert_eq!(report.rejected, vec![]);
        assert_eq!(report.records.len(), 2);
        let first = &report.records[0];
        assert_eq!(first.experience_level(), ExperienceLevel::Senior);
        assert_eq!(first.company_size(), &CompanySize::Large);
        assert_eq!(first.job_title(), "Principal Data Scientist");
        assert_eq!(first.salary_usd(), 85847.0);
    }

    #[test]
    fn bad_rows_are_excluded_and_reported() {
        let text = source(&[
            "2023,SE,FT,Data Analyst,1,USD,abc,US,0,US,M",
            "2023,ZZ,FT,Data Analyst,1,USD,100,US,0,US,M",
            "2023,EN,FT,Data Analyst,1,USD,-5,US,0,US,M",
            "2023,EN,FT,Data Analyst,1,USD,100,US,0,US,",
            "2023,EN,FT",
            "2023,EN,FT,Data Analyst,1,USD,100,US,0,US,M",
        ]);
        let report = load_reader(text.as_bytes()).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.rows_read(), 6);
        let reasons: Vec<_> = report.rejected.iter().map(|r| r.row).collect();
        assert_eq!(reasons, vec![1, 2, 3, 4, 5]);
        assert_eq!(
            report.rejected[0].reason,
            RecordError::NonNumericSalary("abc".to_string())
        );
        assert_eq!(
            report.rejected[1].reason,
            RecordError::UnknownExperienceLevel("ZZ".to_string())
        );
        assert_eq!(report.rejected[2].reason, RecordError::InvalidSalary(-5.0));
        assert_eq!(
            report.rejected[3].reason,
            RecordError::EmptyField("company_size")
        );
        assert!(matches!(report.rejected[4].reason, RecordError::Malformed(_)));
    }

    #[test]
    fn job_titles_are_not_trimmed() {
        let text = "experience_level , company_size,job_title,salary_in_usd\n\
                    SE , M , Data Analyst, 100 \n\
                    SE,M,Data Analyst,100";
        let report = load_reader(text.as_bytes()).unwrap();

        assert!(report.rejected.is_empty());
        let titles: Vec<_> = report.records.iter().map(Record::job_title).collect();
        assert_eq!(titles, vec![" Data Analyst", "Data Analyst"]);
        assert_eq!(report.records[0].experience_level(), ExperienceLevel::Senior);
        assert_eq!(report.records[0].salary_usd(), 100.0);
        assert_eq!(classify(report.records[0].job_title()), JobGroup::Other);
        assert_eq!(classify(report.records[1].job_title()), JobGroup::Analyst);
    }

    #[test]
    fn missing_column_fails_the_load() {
        let text = "experience_level,company_size,job_title\nSE,M,Data Analyst";
        let err = load_reader(text.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("salary_in_usd")));
    }

    #[test]
    fn header_only_source_is_empty() {
        let report = load_reader(HEADER.as_bytes()).unwrap();
        assert!(report.records.is_empty());
        assert!(report.rejected.is_empty());
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let err = load_path("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }));
    }
}
