//! Data Processor Module
//! Derives sub-tables and aggregates. Inputs are never modified.

use crate::data::Scalar;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found in table")]
    UnknownColumn(String),
}

/// Table transformations used by the binders.
pub struct DataProcessor;

impl DataProcessor {
    /// Fail with `UnknownColumn` unless `column` is part of the schema.
    pub fn require_column(df: &DataFrame, column: &str) -> Result<(), ProcessorError> {
        if df.get_column_names().iter().any(|c| c.as_str() == column) {
            Ok(())
        } else {
            Err(ProcessorError::UnknownColumn(column.to_string()))
        }
    }

    /// Keep rows where every `(column, value)` pair matches.
    pub fn filter_eq(
        df: &DataFrame,
        conditions: &[(&str, &Scalar)],
    ) -> Result<DataFrame, ProcessorError> {
        let mut predicate: Option<Expr> = None;
        for (column, value) in conditions {
            Self::require_column(df, column)?;
            let expr = col(*column).eq(value.to_lit());
            predicate = Some(match predicate {
                Some(p) => p.and(expr),
                None => expr,
            });
        }

        let Some(predicate) = predicate else {
            return Ok(df.clone());
        };

        let filtered = df.clone().lazy().filter(predicate).collect()?;
        Ok(filtered)
    }

    /// Distinct non-null values of a column in order of first appearance.
    pub fn unique_values(df: &DataFrame, column: &str) -> Result<Vec<Scalar>, ProcessorError> {
        Self::require_column(df, column)?;
        let unique = df
            .column(column)?
            .as_materialized_series()
            .unique_stable()?
            .rechunk();
        Ok(unique
            .iter()
            .filter_map(|v| Scalar::from_any_value(&v))
            .collect())
    }

    /// Numeric values of a column, cast to f64, nulls dropped.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>, ProcessorError> {
        Self::require_column(df, column)?;
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().flatten().collect())
    }

    /// The `n` rows with the largest `column`, descending. Ties keep input order.
    pub fn top_n(df: &DataFrame, column: &str, n: usize) -> Result<DataFrame, ProcessorError> {
        Self::require_column(df, column)?;
        let top = df
            .clone()
            .lazy()
            .sort(
                [column],
                SortMultipleOptions::default()
                    .with_order_descending(true)
                    .with_maintain_order(true),
            )
            .limit(n as IdxSize)
            .collect()?;
        Ok(top)
    }

    /// Mean of `value_col` per distinct `key_col`, sorted by key.
    ///
    /// Output columns: [key_col, value_col]
    pub fn group_mean(
        df: &DataFrame,
        key_col: &str,
        value_col: &str,
    ) -> Result<DataFrame, ProcessorError> {
        Self::require_column(df, key_col)?;
        Self::require_column(df, value_col)?;
        let means = df
            .clone()
            .lazy()
            .group_by([col(key_col)])
            .agg([col(value_col).mean()])
            .sort([key_col], SortMultipleOptions::default())
            .collect()?;
        Ok(means)
    }

    /// String view of a column, for labels and categories.
    pub fn string_values(df: &DataFrame, column: &str) -> Result<Vec<String>, ProcessorError> {
        Self::require_column(df, column)?;
        // AnyValue iteration needs a single chunk.
        let series = df.column(column)?.as_materialized_series().rechunk();
        Ok(series
            .iter()
            .map(|v| {
                Scalar::from_any_value(&v)
                    .map(|s| s.to_string())
                    .unwrap_or_default()
            })
            .collect())
    }
}
