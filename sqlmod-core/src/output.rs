use crate::{Error, Result, ResultSet, RowLabeled, Value};
use serde_json::{Map, Value as Json};

/// Result of an invocation, shaped by the stages that ran on the rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// No stage reduced the result.
    Rows(ResultSet),
    /// `row` or `row!`.
    Row(Option<RowLabeled>),
    /// `value` or `value!`.
    Value(Option<Value>),
    /// `column`.
    Column(Vec<Value>),
    /// `csv` or `json`.
    Text(String),
}

impl Output {
    pub fn kind(&self) -> &'static str {
        match self {
            Output::Rows(..) => "rows",
            Output::Row(..) => "row",
            Output::Value(..) => "value",
            Output::Column(..) => "column",
            Output::Text(..) => "text",
        }
    }
    fn unexpected(&self, expected: &str) -> Error {
        Error::msg(format!(
            "Expected the output to be {expected}, it is {}",
            self.kind()
        ))
    }
    pub fn into_rows(self) -> Result<ResultSet> {
        match self {
            Output::Rows(v) => Ok(v),
            _ => Err(self.unexpected("rows")),
        }
    }
    pub fn into_row(self) -> Result<Option<RowLabeled>> {
        match self {
            Output::Row(v) => Ok(v),
            _ => Err(self.unexpected("a row")),
        }
    }
    pub fn into_value(self) -> Result<Option<Value>> {
        match self {
            Output::Value(v) => Ok(v),
            _ => Err(self.unexpected("a value")),
        }
    }
    pub fn into_column(self) -> Result<Vec<Value>> {
        match self {
            Output::Column(v) => Ok(v),
            _ => Err(self.unexpected("a column")),
        }
    }
    pub fn into_text(self) -> Result<String> {
        match self {
            Output::Text(v) => Ok(v),
            _ => Err(self.unexpected("text")),
        }
    }

    /// Render as CSV, `\n` terminated lines.
    ///
    /// Rows and a single row get a header line with the column names. Rows take the header of
    /// the first row and every row is written in that order by label, a missing label is an empty
    /// field. A column is one value per line, a value is a single line, an absent row or value is
    /// the empty string. Nulls are empty fields.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        match self {
            Output::Rows(rows) => {
                if let Some(first) = rows.first() {
                    let names = first.names();
                    writer.write_record(names)?;
                    for row in rows {
                        let fields = names
                            .iter()
                            .map(|name| -> Result<String> {
                                Ok(match row.get_column(name) {
                                    Some(value) => value.as_text()?.unwrap_or_default(),
                                    None => String::new(),
                                })
                            })
                            .collect::<Result<Vec<_>>>()?;
                        writer.write_record(fields)?;
                    }
                }
            }
            Output::Row(Some(row)) => {
                writer.write_record(row.names())?;
                writer.write_record(csv_fields(row.values())?)?;
            }
            Output::Row(None) | Output::Value(None) => {}
            Output::Value(Some(value)) => {
                writer.write_record(csv_fields(std::slice::from_ref(value))?)?;
            }
            Output::Column(values) => {
                for value in values {
                    writer.write_record(csv_fields(std::slice::from_ref(value))?)?;
                }
            }
            Output::Text(text) => {
                writer.write_record([text])?;
            }
        }
        let bytes = writer.into_inner().map_err(|e| Error::new(e.into_error()))?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Render as JSON. Rows become an array of objects keyed by column name, in column order.
    pub fn to_json(&self) -> Result<Json> {
        Ok(match self {
            Output::Rows(rows) => Json::Array(
                rows.iter()
                    .map(row_to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Output::Row(row) => match row {
                Some(row) => row_to_json(row)?,
                None => Json::Null,
            },
            Output::Value(value) => match value {
                Some(value) => value.to_json()?,
                None => Json::Null,
            },
            Output::Column(values) => Json::Array(
                values
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Output::Text(text) => Json::String(text.clone()),
        })
    }
}

impl From<ResultSet> for Output {
    fn from(value: ResultSet) -> Self {
        Output::Rows(value)
    }
}

fn csv_fields(values: &[Value]) -> Result<Vec<String>> {
    values
        .iter()
        .map(|v| Ok(v.as_text()?.unwrap_or_default()))
        .collect()
}

fn row_to_json(row: &RowLabeled) -> Result<Json> {
    let mut object = Map::with_capacity(row.len());
    for (name, value) in row.iter() {
        object.insert(name.to_owned(), value.to_json()?);
    }
    Ok(Json::Object(object))
}
