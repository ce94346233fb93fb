use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("load: input file {} not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("load: could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("load: line {line} has {fields} field(s), expected at least 2")]
    Format { line: u64, fields: usize },

    #[error("load: line {line}, could not parse {column} value {value:?} as an integer")]
    Parse {
        line: u64,
        column: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("render: no data rows to chart")]
    EmptyDataset,

    #[error("render: could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("render: {0}")]
    Render(String),
}

impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        ReportError::Render(e.to_string())
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
