use crate::ValueHolder;
use sqlmod_core::{Error, Result, ResultSet, Row, RowLabeled, RowNames};

pub(crate) fn row_to_sqlmod_row(row: &tokio_postgres::Row) -> Result<Row> {
    (0..row.len())
        .map(|i| match row.try_get::<_, ValueHolder>(i) {
            Ok(v) => Ok(v.0),
            Err(e) => {
                let col = &row.columns()[i];
                Err(Error::new(e).context(format!(
                    "Could not decode column {} `{}` of type {}",
                    i,
                    col.name(),
                    col.type_()
                )))
            }
        })
        .collect()
}

/// Rows of one result share the same labels.
pub(crate) fn rows_to_result_set(rows: Vec<tokio_postgres::Row>) -> Result<ResultSet> {
    let mut labels: Option<RowNames> = None;
    rows.iter()
        .map(|row| {
            let labels = labels
                .get_or_insert_with(|| {
                    row.columns().iter().map(|c| c.name().to_string()).collect()
                })
                .clone();
            Ok(RowLabeled::new(labels, row_to_sqlmod_row(row)?))
        })
        .collect()
}
