//! Data module - table sources and transformations

pub mod catalog;
mod loader;
pub mod payroll;
mod processor;
mod scalar;

pub use loader::{load_gapminder, DataLoader, LoaderError, GAPMINDER_COLUMNS};
pub use payroll::{GeneratorError, PayrollGenerator, PayrollRecord};
pub use processor::{DataProcessor, ProcessorError};
pub use scalar::Scalar;
