//! The episode table schema: which columns the analysis needs and what
//! kind of values each one holds.

use crate::error::{AnalysisError, Result};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde::Serialize;

pub const SEASON: &str = "Season";
pub const RUNNING_TIME: &str = "Running Time (Minutes)";
pub const US_VIEWERS: &str = "U.S. Viewers (Millions)";
pub const IMDB_RATING: &str = "IMDb Rating";
pub const ROTTEN_TOMATOES: &str = "Rotten Tomatoes Rating (Percentage)";

/// Semantic kind of a schema column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnKind {
    /// Labels used for grouping; any dtype is accepted.
    Categorical,
    /// Measurements; the column dtype must be integer or float.
    Numeric,
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Categorical => write!(f, "categorical"),
            Self::Numeric => write!(f, "numeric"),
        }
    }
}

/// A required column and its declared kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub kind: ColumnKind,
}

/// Ordered list of the columns an episode table must provide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EpisodeSchema {
    columns: Vec<ColumnSpec>,
}

impl Default for EpisodeSchema {
    fn default() -> Self {
        Self::episodes()
    }
}

impl EpisodeSchema {
    /// The five columns used by every chart and the moment report.
    pub fn episodes() -> Self {
        let spec = |name, kind| ColumnSpec { name, kind };
        Self {
            columns: vec![
                spec(SEASON, ColumnKind::Categorical),
                spec(RUNNING_TIME, ColumnKind::Numeric),
                spec(US_VIEWERS, ColumnKind::Numeric),
                spec(IMDB_RATING, ColumnKind::Numeric),
                spec(ROTTEN_TOMATOES, ColumnKind::Numeric),
            ],
        }
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in schema order.
    pub fn names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.kind)
    }

    /// Check that `df` has every schema column with a compatible dtype.
    ///
    /// Absent columns are reported before type mismatches, in schema order.
    pub fn check(&self, df: &DataFrame) -> Result<()> {
        if let Some(missing) = self
            .columns
            .iter()
            .find(|c| df.column(c.name).is_err())
        {
            return Err(AnalysisError::MissingColumn(missing.name.to_string()));
        }

        for spec in self.columns.iter().filter(|c| c.kind == ColumnKind::Numeric) {
            let dtype = df.column(spec.name)?.dtype();
            // An all-null column is read as Null dtype; treat it as numeric-compatible.
            if !is_numeric_dtype(dtype) && !matches!(dtype, DataType::Null) {
                return Err(AnalysisError::TypeMismatch {
                    column: spec.name.to_string(),
                    expected: spec.kind.to_string(),
                    found: dtype.to_string(),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_frame() -> DataFrame {
        df!(
            SEASON => &[1i64, 2],
            RUNNING_TIME => &[60i64, 55],
            US_VIEWERS => &[2.22f64, 3.1],
            IMDB_RATING => &[8.9f64, 8.6],
            ROTTEN_TOMATOES => &[100i64, 95],
        )
        .unwrap()
    }

    #[test]
    fn test_schema_order() {
        let schema = EpisodeSchema::episodes();
        assert_eq!(
            schema.names(),
            vec![SEASON, RUNNING_TIME, US_VIEWERS, IMDB_RATING, ROTTEN_TOMATOES]
        );
        assert_eq!(schema.kind_of(SEASON), Some(ColumnKind::Categorical));
        assert_eq!(schema.kind_of(IMDB_RATING), Some(ColumnKind::Numeric));
        assert_eq!(schema.kind_of("Title"), None);
    }

    #[test]
    fn test_check_accepts_complete_frame() {
        assert!(EpisodeSchema::episodes().check(&complete_frame()).is_ok());
    }

    #[test]
    fn test_check_reports_missing_column() {
        let df = complete_frame().drop(US_VIEWERS).unwrap();
        let err = EpisodeSchema::episodes().check(&df).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(ref c) if c == US_VIEWERS));
    }

    #[test]
    fn test_check_reports_type_mismatch() {
        let mut df = complete_frame();
        df.replace(IMDB_RATING, Series::new(IMDB_RATING.into(), &["good", "great"]))
            .unwrap();
        let err = EpisodeSchema::episodes().check(&df).unwrap_err();
        assert!(matches!(err, AnalysisError::TypeMismatch { ref column, .. } if column == IMDB_RATING));
    }

    #[test]
    fn test_check_accepts_string_seasons() {
        let mut df = complete_frame();
        df.replace(SEASON, Series::new(SEASON.into(), &["S1", "S2"]))
            .unwrap();
        assert!(EpisodeSchema::episodes().check(&df).is_ok());
    }
}
