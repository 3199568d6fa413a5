//! Chart and table binders over a (filtered) table.

use crate::data::DataProcessor;
use crate::stats::{HistogramBin, StatsCalculator};
use crate::view::BindError;
use polars::prelude::*;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSpec {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramSpec {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

impl HistogramSpec {
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSpec {
    pub title: String,
    pub category_column: String,
    pub value_column: String,
    pub bars: Vec<(String, f64)>,
}

/// Formats one raw cell for display.
pub type CellFormatter = fn(f64) -> String;

/// A display column: the source column and how its cells are shown.
#[derive(Clone, Copy)]
pub struct TableColumn<'a> {
    pub name: &'a str,
    pub format: Option<CellFormatter>,
}

impl<'a> TableColumn<'a> {
    pub fn text(name: &'a str) -> Self {
        Self { name, format: None }
    }

    pub fn numeric(name: &'a str, format: CellFormatter) -> Self {
        Self {
            name,
            format: Some(format),
        }
    }
}

/// Rendered table. Cells are display strings only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub struct ChartBinder;

impl ChartBinder {
    pub fn metric(label: &str, value: impl ToString) -> MetricSpec {
        MetricSpec {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    pub fn histogram(df: &DataFrame, column: &str, bins: usize) -> Result<HistogramSpec, BindError> {
        let values = DataProcessor::numeric_values(df, column)?;
        Ok(HistogramSpec {
            column: column.to_string(),
            bins: StatsCalculator::histogram(&values, bins),
        })
    }

    /// Bars from a two column aggregate, in table order.
    pub fn bar(
        df: &DataFrame,
        category_column: &str,
        value_column: &str,
        title: &str,
    ) -> Result<BarSpec, BindError> {
        let categories = DataProcessor::string_values(df, category_column)?;
        DataProcessor::require_column(df, value_column)?;
        let values = df
            .column(value_column)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect::<Vec<_>>();
        Ok(BarSpec {
            title: title.to_string(),
            category_column: category_column.to_string(),
            value_column: value_column.to_string(),
            bars: categories.into_iter().zip(values).collect(),
        })
    }

    /// Display copy of `df`. Formatting is applied here and never written back.
    pub fn table(df: &DataFrame, columns: &[TableColumn<'_>]) -> Result<TableSpec, BindError> {
        let mut cells: Vec<Vec<String>> = Vec::with_capacity(columns.len());
        for column in columns {
            DataProcessor::require_column(df, column.name)?;
            let rendered = match column.format {
                Some(format) => df
                    .column(column.name)?
                    .cast(&DataType::Float64)?
                    .f64()?
                    .into_iter()
                    .map(|v| v.map(format).unwrap_or_default())
                    .collect(),
                None => DataProcessor::string_values(df, column.name)?,
            };
            cells.push(rendered);
        }

        let rows = (0..df.height())
            .map(|i| cells.iter().map(|c| c[i].clone()).collect())
            .collect();

        Ok(TableSpec {
            columns: columns.iter().map(|c| c.name.to_string()).collect(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::format::Currency;

    fn sample() -> DataFrame {
        df!(
            "Title" => ["FIRE WORKER", "FIRE MANAGER"],
            "Total Pay" => [71234.6, 1500.0],
        )
        .unwrap()
    }

    fn currency(v: f64) -> String {
        Currency(v).to_string()
    }

    #[test]
    fn table_formats_only_the_display_copy() {
        let df = sample();
        let table = ChartBinder::table(
            &df,
            &[TableColumn::text("Title"), TableColumn::numeric("Total Pay", currency)],
        )
        .unwrap();
        assert_eq!(table.rows[0], vec!["FIRE WORKER", "$71,235"]);
        assert_eq!(table.rows[1][1], "$1,500");

        let raw = DataProcessor::numeric_values(&df, "Total Pay").unwrap();
        assert_eq!(raw, vec![71234.6, 1500.0]);
        assert!(ChartBinder::table(&df, &[TableColumn::text("Total Pay")]).is_ok());
    }

    #[test]
    fn rerender_gives_identical_table() {
        let df = sample();
        let columns = [TableColumn::numeric("Total Pay", currency)];
        let a = ChartBinder::table(&df, &columns).unwrap();
        let b = ChartBinder::table(&df, &columns).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bar_keeps_table_order() {
        let df = sample();
        let bars = ChartBinder::bar(&df, "Title", "Total Pay", "Pay").unwrap();
        assert_eq!(bars.bars[1], ("FIRE MANAGER".to_string(), 1500.0));
    }

    #[test]
    fn unknown_column_is_lookup_failure() {
        let err = ChartBinder::histogram(&sample(), "Base Salary", 20).unwrap_err();
        assert!(matches!(err, BindError::Processor(_)));
    }
}
