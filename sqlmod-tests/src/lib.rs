mod formats;
mod statements;
#[cfg(not(feature = "disable-transactions"))]
mod transaction;

use crate::{
    formats::{formats, formats_unit},
    statements::{statements, statements_unit},
};
use log::LevelFilter;
use sqlmod::{Connection, Database, Unit};
use std::{env, sync::Arc};
#[cfg(not(feature = "disable-transactions"))]
use transaction::{transaction, transaction_unit};

pub fn init_logs() {
    let mut logger = env_logger::builder();
    logger
        .is_test(true)
        .format_file(true)
        .format_line_number(true);
    if env::var("RUST_LOG").is_err() {
        logger.filter_level(LevelFilter::Warn);
    }
    let _ = logger.try_init();
}

/// Run the whole suite on `connection`. The suite owns the `sqlmod_users` table, it is dropped and
/// created again first.
pub fn execute_tests<C: Connection + 'static>(connection: C) {
    let mut unit = Unit::new("suite");
    unit.include(Arc::new(
        statements_unit().expect("Failed to declare the statements unit"),
    ))
    .include(Arc::new(
        formats_unit().expect("Failed to declare the formats unit"),
    ));
    #[cfg(not(feature = "disable-transactions"))]
    unit.include(Arc::new(
        transaction_unit().expect("Failed to declare the transaction unit"),
    ));

    let mut db = Database::new(Arc::new(unit));
    db.set_connection(connection);
    setup(&mut db);
    db.prepare_all()
        .expect("Failed to prepare the statements of the suite");

    statements(&mut db);
    formats(&mut db);
    #[cfg(not(feature = "disable-transactions"))]
    transaction(&mut db);
}

fn setup(db: &mut Database) {
    db.query("DROP TABLE IF EXISTS sqlmod_users")
        .expect("Failed to drop the sqlmod_users table");
    db.query(indoc::indoc! {"
        CREATE TABLE sqlmod_users (
            id INTEGER PRIMARY KEY,
            name VARCHAR NOT NULL,
            email VARCHAR,
            score INTEGER NOT NULL
        )
    "})
    .expect("Failed to create the sqlmod_users table");
}

#[macro_export]
macro_rules! silent_logs {
    ($($code:tt)+) => {{
        let level = log::max_level();
        log::set_max_level(log::LevelFilter::Off);
        $($code)+
        log::set_max_level(level);
    }};
}
