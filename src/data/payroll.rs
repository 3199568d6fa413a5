//! Synthetic Payroll Generator
//! Draws employee records for every (year, department, title) combination.

use crate::config::PayrollModel;
use polars::prelude::*;
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use statrs::distribution::Normal;
use thiserror::Error;

pub const YEAR_COL: &str = "Year";
pub const DEPARTMENT_COL: &str = "Department";
pub const TITLE_COL: &str = "Title";
pub const BASE_SALARY_COL: &str = "Base Salary";
pub const OT_HOURS_COL: &str = "OT Hours";
pub const OT_PAY_COL: &str = "OT Pay";
pub const TOTAL_PAY_COL: &str = "Total Pay";

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One generated employee.
#[derive(Debug, Clone, PartialEq)]
pub struct PayrollRecord {
    pub year: i64,
    pub department: String,
    pub title: String,
    pub base_salary: f64,
    pub ot_hours: f64,
    pub ot_pay: f64,
    pub total_pay: f64,
}

/// Generates the payroll table from a [`PayrollModel`].
pub struct PayrollGenerator {
    model: PayrollModel,
    salary: Normal,
    ot_hours: Normal,
}

impl PayrollGenerator {
    pub fn new(model: PayrollModel) -> Result<Self, GeneratorError> {
        let salary = Normal::new(model.salary_mean, model.salary_std)
            .map_err(|e| GeneratorError::Distribution(e.to_string()))?;
        let ot_hours = Normal::new(model.ot_hours_mean, model.ot_hours_std)
            .map_err(|e| GeneratorError::Distribution(e.to_string()))?;
        let (low, high) = model.employees_per_combo;
        if low >= high {
            return Err(GeneratorError::Distribution(format!(
                "empty employee range {}..{}",
                low, high
            )));
        }
        Ok(Self {
            model,
            salary,
            ot_hours,
        })
    }

    /// Generate the table using the model's seed, or OS entropy when unseeded.
    pub fn generate(&self) -> Result<DataFrame, GeneratorError> {
        let mut rng = match self.model.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with(&mut rng)
    }

    /// Generate the table from a caller supplied RNG.
    ///
    /// Each combination gets its own RNG seeded from `rng` before the parallel
    /// pass, so the output only depends on `rng` and not on thread scheduling.
    /// Callers see a plain synchronous call; the rayon pass is internal.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Result<DataFrame, GeneratorError> {
        let (low, high) = self.model.employees_per_combo;
        let mut combos: Vec<(i64, &str, &str, u32, u64)> = Vec::new();
        for &year in &self.model.years {
            for &dept in &self.model.departments {
                for &title in &self.model.titles {
                    let count = rng.gen_range(low..high);
                    combos.push((year, dept, title, count, rng.gen()));
                }
            }
        }

        let records: Vec<PayrollRecord> = combos
            .par_iter()
            .flat_map_iter(|&(year, dept, title, count, seed)| {
                let mut combo_rng = StdRng::seed_from_u64(seed);
                let title = format!("{} {}", dept, title);
                (0..count)
                    .map(|_| self.draw_record(&mut combo_rng, year, dept, &title))
                    .collect::<Vec<_>>()
            })
            .collect();

        log::debug!("Generated {} payroll records", records.len());
        let df = Self::records_to_frame(&records)?;
        Ok(df)
    }

    fn draw_record<R: Rng>(&self, rng: &mut R, year: i64, dept: &str, title: &str) -> PayrollRecord {
        let base_salary = self.salary.sample(rng);
        let ot_hours = self.ot_hours.sample(rng);
        let ot_pay = ot_hours * self.model.overtime_rate(base_salary);
        PayrollRecord {
            year,
            department: dept.to_string(),
            title: title.to_string(),
            base_salary,
            ot_hours,
            ot_pay,
            total_pay: base_salary + ot_pay,
        }
    }

    fn records_to_frame(records: &[PayrollRecord]) -> PolarsResult<DataFrame> {
        DataFrame::new(vec![
            Column::new(YEAR_COL.into(), records.iter().map(|r| r.year).collect::<Vec<_>>()),
            Column::new(
                DEPARTMENT_COL.into(),
                records.iter().map(|r| r.department.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                TITLE_COL.into(),
                records.iter().map(|r| r.title.as_str()).collect::<Vec<_>>(),
            ),
            Column::new(
                BASE_SALARY_COL.into(),
                records.iter().map(|r| r.base_salary).collect::<Vec<_>>(),
            ),
            Column::new(
                OT_HOURS_COL.into(),
                records.iter().map(|r| r.ot_hours).collect::<Vec<_>>(),
            ),
            Column::new(OT_PAY_COL.into(), records.iter().map(|r| r.ot_pay).collect::<Vec<_>>()),
            Column::new(
                TOTAL_PAY_COL.into(),
                records.iter().map(|r| r.total_pay).collect::<Vec<_>>(),
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_table(seed: u64) -> DataFrame {
        let generator = PayrollGenerator::new(PayrollModel::default()).unwrap();
        generator
            .generate_with(&mut StdRng::seed_from_u64(seed))
            .unwrap()
    }

    fn column(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn pay_identities_hold_for_every_record() {
        let df = seeded_table(7);
        let base = column(&df, BASE_SALARY_COL);
        let hours = column(&df, OT_HOURS_COL);
        let ot = column(&df, OT_PAY_COL);
        let total = column(&df, TOTAL_PAY_COL);

        for i in 0..df.height() {
            assert!(close(total[i], base[i] + ot[i]), "row {}", i);
            assert!(close(ot[i], hours[i] * (base[i] / 2080.0 * 1.5)), "row {}", i);
        }
    }

    #[test]
    fn row_count_within_combination_bounds() {
        let df = seeded_table(11);
        let combos = 3 * 5 * 5;
        assert!(df.height() >= combos * 50);
        assert!(df.height() < combos * 200);
    }

    #[test]
    fn titles_are_prefixed_with_department() {
        let df = seeded_table(3);
        let depts = df.column(DEPARTMENT_COL).unwrap().str().unwrap();
        let titles = df.column(TITLE_COL).unwrap().str().unwrap();
        for (dept, title) in depts.into_iter().zip(titles.into_iter()) {
            let (dept, title) = (dept.unwrap(), title.unwrap());
            assert!(title.starts_with(&format!("{} ", dept)), "{}", title);
        }
    }

    #[test]
    fn same_seed_gives_same_table() {
        let a = seeded_table(42);
        let b = seeded_table(42);
        assert!(a.equals(&b));
    }

    #[test]
    fn configured_seed_is_used() {
        let model = PayrollModel {
            seed: Some(5),
            ..PayrollModel::default()
        };
        let generator = PayrollGenerator::new(model).unwrap();
        let a = generator.generate().unwrap();
        let b = generator.generate().unwrap();
        assert!(a.equals(&b));
    }

    #[test]
    fn rejects_empty_employee_range() {
        let model = PayrollModel {
            employees_per_combo: (200, 200),
            ..PayrollModel::default()
        };
        assert!(matches!(
            PayrollGenerator::new(model),
            Err(GeneratorError::Distribution(_))
        ));
    }

    #[test]
    fn rejects_invalid_spread() {
        let model = PayrollModel {
            salary_std: -1.0,
            ..PayrollModel::default()
        };
        assert!(matches!(
            PayrollGenerator::new(model),
            Err(GeneratorError::Distribution(_))
        ));
    }
}
