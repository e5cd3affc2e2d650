//! Column selection and missing-value removal.
//!
//! The [`Preprocessor`] narrows a raw episode table down to the schema
//! columns and drops every row with a null (or NaN) in any of them. The
//! result is wrapped in a [`CleanTable`], which the plotters and the moment
//! calculator take as input.

use crate::error::{AnalysisError, Result};
use crate::schema::{ColumnKind, EpisodeSchema};
use crate::utils::{category_labels, is_numeric_dtype, missing_mask, present_f64_values};
use polars::prelude::*;
use tracing::{debug, info};

/// A table holding exactly the schema columns, in schema order, with no
/// missing values among them.
#[derive(Debug, Clone)]
pub struct CleanTable {
    df: DataFrame,
    schema: EpisodeSchema,
}

impl CleanTable {
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    pub fn schema(&self) -> &EpisodeSchema {
        &self.schema
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Values of a numeric column as `f64`.
    pub fn numeric(&self, name: &str) -> Result<Vec<f64>> {
        let column = self
            .df
            .column(name)
            .map_err(|_| AnalysisError::MissingColumn(name.to_string()))?;
        if !is_numeric_dtype(column.dtype()) && !matches!(column.dtype(), DataType::Null) {
            return Err(AnalysisError::TypeMismatch {
                column: name.to_string(),
                expected: ColumnKind::Numeric.to_string(),
                found: column.dtype().to_string(),
            });
        }
        Ok(present_f64_values(column.as_materialized_series())?)
    }

    /// Labels of a column rendered as strings, one per row.
    pub fn labels(&self, name: &str) -> Result<Vec<String>> {
        let column = self
            .df
            .column(name)
            .map_err(|_| AnalysisError::MissingColumn(name.to_string()))?;
        Ok(category_labels(column.as_materialized_series())?)
    }
}

/// Selects the schema columns and removes incomplete rows.
#[derive(Debug, Clone, Default)]
pub struct Preprocessor {
    schema: EpisodeSchema,
}

impl Preprocessor {
    pub fn new(schema: EpisodeSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &EpisodeSchema {
        &self.schema
    }

    /// Clean a raw table.
    ///
    /// Fails with [`AnalysisError::MissingColumn`] if any schema column is
    /// absent and with [`AnalysisError::TypeMismatch`] if a numeric column
    /// holds non-numeric data. Surviving rows keep their relative order.
    pub fn process(&self, raw: &DataFrame) -> Result<CleanTable> {
        self.schema.check(raw)?;

        let names = self.schema.names();
        let selected = raw.select(names.iter().copied())?;
        let before_rows = selected.height();

        let mut keep = vec![true; before_rows];
        for column in selected.get_columns() {
            let missing = missing_mask(column.as_materialized_series())?;
            let dropped_here = missing.iter().filter(|m| **m).count();
            if dropped_here > 0 {
                debug!("Column '{}' has {} missing values", column.name(), dropped_here);
            }
            for (slot, is_missing) in keep.iter_mut().zip(missing) {
                if is_missing {
                    *slot = false;
                }
            }
        }

        let mask = BooleanChunked::new("keep".into(), keep.as_slice());
        let df = selected.filter(&mask)?;

        let rows_removed = before_rows - df.height();
        if rows_removed > 0 {
            let pct = (rows_removed as f64 / before_rows as f64) * 100.0;
            info!(
                "Removed {} rows with missing values ({:.1}%)",
                rows_removed, pct
            );
        } else {
            debug!("No rows with missing values found");
        }

        Ok(CleanTable {
            df,
            schema: self.schema.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{IMDB_RATING, ROTTEN_TOMATOES, RUNNING_TIME, SEASON, US_VIEWERS};

    fn raw_frame() -> DataFrame {
        df!(
            "Title" => &["Winter Is Coming", "The Kingsroad", "Lord Snow", "Cripples"],
            SEASON => &[1i64, 1, 1, 1],
            RUNNING_TIME => &[Some(62i64), Some(56), Some(58), Some(56)],
            US_VIEWERS => &[Some(2.22f64), Some(2.20), None, Some(2.45)],
            IMDB_RATING => &[8.9f64, 8.6, 8.5, 8.6],
            ROTTEN_TOMATOES => &[Some(100i64), Some(100), Some(81), Some(100)],
        )
        .unwrap()
    }

    #[test]
    fn test_drops_exactly_the_incomplete_row() {
        let clean = Preprocessor::default().process(&raw_frame()).unwrap();

        assert_eq!(clean.height(), 3);
        assert_eq!(clean.dataframe().width(), 5);
        assert_eq!(
            clean.numeric(US_VIEWERS).unwrap(),
            vec![2.22, 2.20, 2.45],
            "row order preserved, third row excluded"
        );
    }

    #[test]
    fn test_selects_schema_columns_in_order() {
        let clean = Preprocessor::default().process(&raw_frame()).unwrap();
        let names: Vec<String> = clean
            .dataframe()
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(
            names,
            vec![SEASON, RUNNING_TIME, US_VIEWERS, IMDB_RATING, ROTTEN_TOMATOES]
        );
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let mut df = raw_frame();
        df.replace(
            IMDB_RATING,
            Series::new(IMDB_RATING.into(), &[8.9f64, f64::NAN, 8.5, 8.6]),
        )
        .unwrap();

        let clean = Preprocessor::default().process(&df).unwrap();
        assert_eq!(clean.height(), 2);
        assert_eq!(clean.numeric(IMDB_RATING).unwrap(), vec![8.9, 8.6]);
    }

    #[test]
    fn test_is_idempotent() {
        let preprocessor = Preprocessor::default();
        let once = preprocessor.process(&raw_frame()).unwrap();
        let twice = preprocessor.process(once.dataframe()).unwrap();
        assert!(once.dataframe().equals_missing(twice.dataframe()));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let df = raw_frame().drop(ROTTEN_TOMATOES).unwrap();
        let err = Preprocessor::default().process(&df).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(ref c) if c == ROTTEN_TOMATOES));
    }

    #[test]
    fn test_numeric_accessor_rejects_categorical() {
        let mut df = raw_frame();
        df.replace(SEASON, Series::new(SEASON.into(), &["S1", "S1", "S1", "S1"]))
            .unwrap();
        let clean = Preprocessor::default().process(&df).unwrap();
        assert!(matches!(
            clean.numeric(SEASON),
            Err(AnalysisError::TypeMismatch { .. })
        ));
        assert_eq!(clean.labels(SEASON).unwrap(), vec!["S1", "S1", "S1"]);
    }
}
