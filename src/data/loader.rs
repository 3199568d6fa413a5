//! CSV Data Loader Module
//! Fetches a remote delimited resource once and parses it into a table using Polars.

use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Columns the choropleth expects from the Gapminder table.
pub const GAPMINDER_COLUMNS: [&str; 4] = ["country", "iso_alpha", "year", "gdpPercap"];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to fetch data: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Column '{0}' missing from loaded table")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// Loads a table from a remote CSV. The table is read-only once loaded.
pub struct DataLoader {
    df: Option<DataFrame>,
    source: Option<String>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            source: None,
        }
    }

    /// Fetch a CSV over HTTP(S) and parse it. Blocks until the body is read.
    ///
    /// No retry and no timeout: any failure is returned as is.
    pub fn fetch_csv(&mut self, url: &str) -> Result<&DataFrame, LoaderError> {
        log::info!("Fetching {}", url);
        let body = reqwest::blocking::get(url)?.error_for_status()?.bytes()?;
        self.load_bytes(url, body.to_vec())
    }

    /// Parse an already downloaded CSV body.
    pub fn load_bytes(&mut self, source: &str, body: Vec<u8>) -> Result<&DataFrame, LoaderError> {
        let df = Self::parse_csv(body)?;
        self.source = Some(source.to_string());
        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    fn parse_csv(body: Vec<u8>) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(Cursor::new(body))
            .finish()?;
        Ok(df)
    }

    /// Check that every named column is present in the loaded table.
    pub fn require_columns(&self, columns: &[&str]) -> Result<(), LoaderError> {
        let df = self.df.as_ref().ok_or(LoaderError::NoData)?;
        let names = df.get_column_names();
        for column in columns {
            if !names.iter().any(|name| name.as_str() == *column) {
                return Err(LoaderError::MissingColumn(column.to_string()));
            }
        }
        Ok(())
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Where the current table came from.
    pub fn get_source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Hand over the loaded table.
    pub fn into_dataframe(self) -> Result<DataFrame, LoaderError> {
        self.df.ok_or(LoaderError::NoData)
    }
}

/// Fetch the Gapminder table and verify its schema.
pub fn load_gapminder(url: &str) -> Result<DataFrame, LoaderError> {
    let mut loader = DataLoader::new();
    loader.fetch_csv(url)?;
    loader.require_columns(&GAPMINDER_COLUMNS)?;
    log::info!(
        "Loaded {} rows from {}",
        loader.get_row_count(),
        loader.get_source().unwrap_or(url)
    );
    loader.into_dataframe()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num\n\
Afghanistan,Asia,1952,28.801,8425333,779.4453145,AFG,4\n\
Afghanistan,Asia,1957,30.332,9240934,820.8530296,AFG,4\n\
Albania,Europe,1952,55.23,1282697,1601.056136,ALB,8\n";

    #[test]
    fn parses_downloaded_body() {
        let mut loader = DataLoader::new();
        let df = loader
            .load_bytes("memory", SAMPLE.as_bytes().to_vec())
            .unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("year").unwrap().dtype(), &DataType::Int64);
        assert!(loader.require_columns(&GAPMINDER_COLUMNS).is_ok());
        assert_eq!(loader.get_source(), Some("memory"));
    }

    #[test]
    fn reports_missing_columns() {
        let mut loader = DataLoader::new();
        loader
            .load_bytes("memory", b"country,year\nPeru,1952\n".to_vec())
            .unwrap();
        match loader.require_columns(&GAPMINDER_COLUMNS) {
            Err(LoaderError::MissingColumn(name)) => assert_eq!(name, "iso_alpha"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn empty_loader_has_no_data() {
        let loader = DataLoader::new();
        assert_eq!(loader.get_row_count(), 0);
        assert!(matches!(loader.into_dataframe(), Err(LoaderError::NoData)));
    }
}
