use crate::{Database, Defaults, Output, Result, ResultSet, RowLabeled, StatementError};
use std::{
    fmt::{self, Debug, Display},
    str::FromStr,
    sync::Arc,
};

/// Custom transform run last on the output of an operation.
pub type Returning = Arc<dyn Fn(Output, &mut Database) -> Result<Output> + Send + Sync>;

/// Reduce the result set to a single value, row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Single {
    /// First column of the first row, absent when there are no rows.
    Value,
    /// Like [`Single::Value`], but exactly one row is required.
    RequiredValue,
    /// First row, absent when there are no rows.
    Row,
    /// Like [`Single::Row`], but exactly one row is required.
    RequiredRow,
    /// First column of every row.
    Column,
}

impl Single {
    pub fn extract(self, rows: ResultSet) -> Result<Output> {
        if matches!(self, Single::RequiredValue | Single::RequiredRow) {
            match rows.len() {
                0 => return Err(StatementError::NoResults.into()),
                1 => {}
                n => return Err(StatementError::TooManyResults(n).into()),
            }
        }
        let first_row = |rows: ResultSet| rows.into_rows().into_iter().next();
        let first_value = |row: RowLabeled| row.values.into_vec().into_iter().next();
        Ok(match self {
            Single::Value | Single::RequiredValue => {
                Output::Value(first_row(rows).and_then(first_value))
            }
            Single::Row | Single::RequiredRow => Output::Row(first_row(rows)),
            Single::Column => Output::Column(
                rows.into_iter()
                    .map(|row| first_value(row).unwrap_or_default())
                    .collect(),
            ),
        })
    }
}

/// Unknown mode text is reported as the key being set wrongly, the message names the mode.
fn unknown_mode(key: &'static str, message: String) -> crate::Error {
    crate::Error::new(StatementError::ConfigurationAlreadySet(key)).context(message)
}

impl FromStr for Single {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "value" => Single::Value,
            "value!" => Single::RequiredValue,
            "row" => Single::Row,
            "row!" => Single::RequiredRow,
            "column" => Single::Column,
            _ => {
                return Err(unknown_mode(
                    "single",
                    format!(
                        "Unknown single mode `{s}`, expected one of value, value!, row, row!, column"
                    ),
                ));
            }
        })
    }
}

impl Display for Single {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Single::Value => "value",
            Single::RequiredValue => "value!",
            Single::Row => "row",
            Single::RequiredRow => "row!",
            Single::Column => "column",
        })
    }
}

/// Serialize the output to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn serialize(self, output: &Output) -> Result<Output> {
        Ok(Output::Text(match self {
            Format::Csv => output.to_csv()?,
            Format::Json => serde_json::to_string(&output.to_json()?)?,
        }))
    }
}

impl FromStr for Format {
    type Err = crate::Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            _ => Err(unknown_mode(
                "format",
                format!("Unknown format `{s}`, expected csv or json"),
            )),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Format::Csv => "csv",
            Format::Json => "json",
        })
    }
}

/// Settings of an operation: defaults and the result pipeline.
///
/// Each key can be set once. `Some(None)` is a key explicitly disabled with one of the
/// `without_*` methods, which counts as set and shadows inherited settings.
///
/// ```
/// # use sqlmod_core::{Configuration, Format, Single};
/// # fn main() -> sqlmod_core::Result<()> {
/// let configuration = Configuration::new()
///     .single(Single::Row)?
///     .format("json".parse()?)?;
/// assert_eq!(configuration.get_format(), Some(Format::Json));
/// assert!(Configuration::new().single(Single::Row)?.single(Single::Value).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Default, Clone)]
pub struct Configuration {
    single: Option<Option<Single>>,
    format: Option<Option<Format>>,
    returning: Option<Option<Returning>>,
    defaults: Option<Defaults>,
}

fn set_once<T>(slot: &mut Option<T>, value: T, key: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(StatementError::ConfigurationAlreadySet(key).into());
    }
    *slot = Some(value);
    Ok(())
}

impl Configuration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(mut self, mode: Single) -> Result<Self> {
        set_once(&mut self.single, Some(mode), "single")?;
        Ok(self)
    }
    pub fn without_single(mut self) -> Result<Self> {
        set_once(&mut self.single, None, "single")?;
        Ok(self)
    }
    pub fn format(mut self, format: Format) -> Result<Self> {
        set_once(&mut self.format, Some(format), "format")?;
        Ok(self)
    }
    pub fn without_format(mut self) -> Result<Self> {
        set_once(&mut self.format, None, "format")?;
        Ok(self)
    }
    pub fn returning(
        mut self,
        transform: impl Fn(Output, &mut Database) -> Result<Output> + Send + Sync + 'static,
    ) -> Result<Self> {
        let transform: Returning = Arc::new(transform);
        set_once(&mut self.returning, Some(transform), "returning")?;
        Ok(self)
    }
    pub fn without_returning(mut self) -> Result<Self> {
        set_once(&mut self.returning, None, "returning")?;
        Ok(self)
    }
    pub fn defaults(mut self, defaults: Defaults) -> Result<Self> {
        set_once(&mut self.defaults, defaults, "defaults")?;
        Ok(self)
    }

    /// Fill every key not set here with the one from `base`.
    pub fn inherit(mut self, base: &Configuration) -> Self {
        if self.single.is_none() {
            self.single = base.single;
        }
        if self.format.is_none() {
            self.format = base.format;
        }
        if self.returning.is_none() {
            self.returning = base.returning.clone();
        }
        if self.defaults.is_none() {
            self.defaults = base.defaults.clone();
        }
        self
    }

    pub fn get_single(&self) -> Option<Single> {
        self.single.flatten()
    }
    pub fn get_format(&self) -> Option<Format> {
        self.format.flatten()
    }
    pub fn get_returning(&self) -> Option<&Returning> {
        self.returning.as_ref().and_then(Option::as_ref)
    }
    pub fn get_defaults(&self) -> Option<&Defaults> {
        self.defaults.as_ref()
    }

    /// Run the pipeline on `rows`: single, then format, then returning.
    pub fn process(&self, rows: ResultSet, database: &mut Database) -> Result<Output> {
        let mut output = match self.get_single() {
            Some(mode) => mode.extract(rows)?,
            None => Output::Rows(rows),
        };
        if let Some(format) = self.get_format() {
            output = format.serialize(&output)?;
        }
        if let Some(returning) = self.get_returning() {
            output = returning(output, database)?;
        }
        Ok(output)
    }
}

impl Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("single", &self.single)
            .field("format", &self.format)
            .field(
                "returning",
                &self.returning.as_ref().map(|v| v.as_ref().map(|_| "..")),
            )
            .field("defaults", &self.defaults)
            .finish()
    }
}
