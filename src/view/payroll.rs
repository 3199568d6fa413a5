//! Payroll dashboard pipeline: memoized table -> per-selection view.

use crate::data::payroll::{
    BASE_SALARY_COL, DEPARTMENT_COL, OT_HOURS_COL, OT_PAY_COL, TITLE_COL, TOTAL_PAY_COL, YEAR_COL,
};
use crate::data::DataProcessor;
use crate::selection::{SelectionError, Selection, Selector};
use crate::stats::{StatsCalculator, DEFAULT_BINS};
use crate::view::chart::{BarSpec, ChartBinder, HistogramSpec, MetricSpec, TableColumn, TableSpec};
use crate::view::format::{Currency, Decimal};
use crate::view::BindError;
use polars::prelude::*;
use serde::Serialize;

pub const YEAR_PARAM: &str = "Year";
pub const DEPARTMENT_PARAM: &str = "Department";
pub const TOP_EARNERS: usize = 10;

fn currency(value: f64) -> String {
    Currency(value).to_string()
}

/// Everything the payroll page shows for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayrollView {
    pub metrics: Vec<MetricSpec>,
    pub salary_distribution: HistogramSpec,
    pub top_earners: TableSpec,
    pub department_comparison: BarSpec,
}

/// Holds the payroll table for the whole session and renders views from it.
pub struct PayrollDashboard {
    table: DataFrame,
    department_comparison: BarSpec,
}

impl PayrollDashboard {
    /// Wrap a generated table. The department comparison does not depend on
    /// the selection, so it is bound once here.
    pub fn new(table: DataFrame) -> Result<Self, BindError> {
        let means = DataProcessor::group_mean(&table, DEPARTMENT_COL, TOTAL_PAY_COL)?;
        let department_comparison = ChartBinder::bar(
            &means,
            DEPARTMENT_COL,
            TOTAL_PAY_COL,
            "Average Total Pay by Department",
        )?;
        Ok(Self {
            table,
            department_comparison,
        })
    }

    pub fn table(&self) -> &DataFrame {
        &self.table
    }

    /// Sidebar filters: Year and Department, in that order.
    pub fn selector(&self) -> Result<Selector, SelectionError> {
        Selector::new(
            &self.table,
            &[(YEAR_PARAM, YEAR_COL), (DEPARTMENT_PARAM, DEPARTMENT_COL)],
        )
    }

    /// Re-render for the current selection. Called on every interaction.
    pub fn render(&self, selection: &Selection) -> Result<PayrollView, BindError> {
        let subset = DataProcessor::filter_eq(&self.table, &selection.conditions())?;

        let salaries = DataProcessor::numeric_values(&subset, BASE_SALARY_COL)?;
        let ot_hours = DataProcessor::numeric_values(&subset, OT_HOURS_COL)?;
        let metrics = vec![
            ChartBinder::metric("Avg Salary", Currency(StatsCalculator::mean(&salaries))),
            ChartBinder::metric("Avg OT Hours", Decimal(StatsCalculator::mean(&ot_hours), 1)),
            ChartBinder::metric("Total Employees", subset.height()),
        ];

        let salary_distribution = ChartBinder::histogram(&subset, BASE_SALARY_COL, DEFAULT_BINS)?;

        let top = DataProcessor::top_n(&subset, TOTAL_PAY_COL, TOP_EARNERS)?;
        let top_earners = ChartBinder::table(
            &top,
            &[
                TableColumn::text(TITLE_COL),
                TableColumn::numeric(BASE_SALARY_COL, currency),
                TableColumn::numeric(OT_PAY_COL, currency),
                TableColumn::numeric(TOTAL_PAY_COL, currency),
            ],
        )?;

        Ok(PayrollView {
            metrics,
            salary_distribution,
            top_earners,
            department_comparison: self.department_comparison.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PayrollModel;
    use crate::data::{PayrollGenerator, Scalar};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn dashboard() -> PayrollDashboard {
        let generator = PayrollGenerator::new(PayrollModel::default()).unwrap();
        let table = generator
            .generate_with(&mut StdRng::seed_from_u64(2024))
            .unwrap();
        PayrollDashboard::new(table).unwrap()
    }

    #[test]
    fn initial_selection_is_first_year_and_department() {
        let dashboard = dashboard();
        let selection = dashboard.selector().unwrap().selection();
        assert_eq!(selection.get(YEAR_PARAM), Some(&Scalar::Int(2019)));
        assert_eq!(selection.get(DEPARTMENT_PARAM), Some(&Scalar::from("POLICE")));
    }

    #[test]
    fn view_reflects_filtered_subset() {
        let dashboard = dashboard();
        let mut selector = dashboard.selector().unwrap();
        selector
            .choice_mut(DEPARTMENT_PARAM)
            .unwrap()
            .select(&Scalar::from("FIRE"))
            .unwrap();
        let selection = selector.selection();
        let view = dashboard.render(&selection).unwrap();

        let subset = DataProcessor::filter_eq(dashboard.table(), &selection.conditions()).unwrap();
        assert_eq!(view.metrics[2].value, subset.height().to_string());
        let binned: usize = view.salary_distribution.bins.iter().map(|b| b.count).sum();
        assert_eq!(binned, subset.height());
        assert_eq!(view.salary_distribution.bins.len(), DEFAULT_BINS);

        assert_eq!(view.top_earners.rows.len(), TOP_EARNERS);
        for row in &view.top_earners.rows {
            assert!(row[0].starts_with("FIRE "));
            assert!(row[3].starts_with('$'));
        }
    }

    #[test]
    fn metrics_come_from_raw_values() {
        let dashboard = dashboard();
        let selection = dashboard.selector().unwrap().selection();
        let view = dashboard.render(&selection).unwrap();
        let subset = DataProcessor::filter_eq(dashboard.table(), &selection.conditions()).unwrap();
        let salaries = DataProcessor::numeric_values(&subset, BASE_SALARY_COL).unwrap();
        let expected = Currency(StatsCalculator::mean(&salaries)).to_string();
        assert_eq!(view.metrics[0].value, expected);
    }

    #[test]
    fn department_comparison_covers_whole_table() {
        let dashboard = dashboard();
        let view = dashboard
            .render(&dashboard.selector().unwrap().selection())
            .unwrap();
        let names: Vec<&str> = view
            .department_comparison
            .bars
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(
            names,
            vec!["EDUCATION", "FIRE", "POLICE", "SANITATION", "TRANSPORTATION"]
        );
    }

    #[test]
    fn rerender_is_stable() {
        let dashboard = dashboard();
        let selection = dashboard.selector().unwrap().selection();
        assert_eq!(
            dashboard.render(&selection).unwrap(),
            dashboard.render(&selection).unwrap()
        );
    }
}
