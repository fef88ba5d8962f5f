use crate::PostgresConnection;
use sqlmod_core::{Driver, Result};

#[derive(Default, Debug, Clone, Copy)]
pub struct PostgresDriver {}

impl PostgresDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for PostgresDriver {
    type Connection = PostgresConnection;

    const NAME: &'static str = "postgres";

    fn connect(&self, url: &str) -> Result<PostgresConnection> {
        PostgresConnection::connect(url)
    }
}
