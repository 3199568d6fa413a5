//! Selection Layer
//! Choice widgets whose domains come from observed column values.
//!
//! A choice stores an index into its domain, never a free-standing value, so
//! the current selection is always a member of the column it was built from.

use crate::data::{DataProcessor, ProcessorError, Scalar};
use polars::prelude::DataFrame;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectionError {
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("Column '{0}' has no values to choose from")]
    EmptyDomain(String),
    #[error("No choice named '{0}'")]
    UnknownParameter(String),
    #[error("'{value}' is not a value of '{param}'")]
    NotInDomain { param: String, value: String },
}

/// One selectable parameter bound to a column's distinct values.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    name: String,
    column: String,
    domain: Vec<Scalar>,
    selected: usize,
}

impl Choice {
    /// Build a choice over `column`, initially set to its first value.
    pub fn from_column(
        df: &DataFrame,
        name: &str,
        column: &str,
    ) -> Result<Self, SelectionError> {
        let domain = DataProcessor::unique_values(df, column)?;
        if domain.is_empty() {
            return Err(SelectionError::EmptyDomain(column.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            column: column.to_string(),
            domain,
            selected: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[Scalar] {
        &self.domain
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn current(&self) -> &Scalar {
        &self.domain[self.selected]
    }

    /// Select by position. Out of range indices leave the choice untouched.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index < self.domain.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Select by value, rejecting values outside the domain.
    pub fn select(&mut self, value: &Scalar) -> Result<(), SelectionError> {
        match self.domain.iter().position(|v| v == value) {
            Some(index) => {
                self.selected = index;
                Ok(())
            }
            None => Err(SelectionError::NotInDomain {
                param: self.name.clone(),
                value: value.to_string(),
            }),
        }
    }
}

/// The current value of each exposed parameter, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    entries: Vec<SelectedValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectedValue {
    pub name: String,
    pub column: String,
    pub value: Scalar,
}

impl Selection {
    /// Snapshot of independent choices, e.g. ones built over different tables.
    pub fn from_choices(choices: &[&Choice]) -> Self {
        Self {
            entries: choices
                .iter()
                .map(|c| SelectedValue {
                    name: c.name.clone(),
                    column: c.column.clone(),
                    value: c.current().clone(),
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Scalar> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.value)
    }

    pub fn entries(&self) -> &[SelectedValue] {
        &self.entries
    }

    /// `(column, value)` pairs ready for filtering.
    pub fn conditions(&self) -> Vec<(&str, &Scalar)> {
        self.entries
            .iter()
            .map(|e| (e.column.as_str(), &e.value))
            .collect()
    }
}

/// A set of choices exposed over one table.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    choices: Vec<Choice>,
}

impl Selector {
    /// Expose each `(name, column)` pair of `df` as a choice.
    pub fn new(df: &DataFrame, exposed: &[(&str, &str)]) -> Result<Self, SelectionError> {
        let choices = exposed
            .iter()
            .map(|(name, column)| Choice::from_column(df, name, column))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { choices })
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn choices_mut(&mut self) -> &mut [Choice] {
        &mut self.choices
    }

    pub fn choice_mut(&mut self, name: &str) -> Result<&mut Choice, SelectionError> {
        self.choices
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| SelectionError::UnknownParameter(name.to_string()))
    }

    /// Snapshot of the current UI state.
    pub fn selection(&self) -> Selection {
        let choices: Vec<&Choice> = self.choices.iter().collect();
        Selection::from_choices(&choices)
    }
}
