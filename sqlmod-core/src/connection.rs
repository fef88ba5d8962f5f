use crate::{ResultSet, Result, Value};

/// Narrow facade over one live database connection.
///
/// Every call blocks the calling thread until the backend answers. There is no timeout or
/// cancellation at this level: a hung backend hangs the caller.
///
/// The trait is object safe, a [`crate::Database`] owns its connection as
/// `Box<dyn Connection>`.
pub trait Connection: Send {
    /// Execute unparameterized text (`BEGIN`, `COMMIT`, no argument statements).
    fn query(&mut self, sql: &str) -> Result<ResultSet>;

    /// Execute `sql` binding `args` to `$1..$n`.
    fn execute_parameterized(&mut self, sql: &str, args: &[Value]) -> Result<ResultSet>;

    /// Execute the statement previously registered under `name` by [`Connection::prepare`].
    fn execute_prepared(&mut self, name: &str, args: &[Value]) -> Result<ResultSet>;

    /// Register `sql` server side under `name`.
    fn prepare(&mut self, name: &str, sql: &str) -> Result<()>;
}

impl<C: Connection + ?Sized> Connection for Box<C> {
    fn query(&mut self, sql: &str) -> Result<ResultSet> {
        (**self).query(sql)
    }
    fn execute_parameterized(&mut self, sql: &str, args: &[Value]) -> Result<ResultSet> {
        (**self).execute_parameterized(sql, args)
    }
    fn execute_prepared(&mut self, name: &str, args: &[Value]) -> Result<ResultSet> {
        (**self).execute_prepared(name, args)
    }
    fn prepare(&mut self, name: &str, sql: &str) -> Result<()> {
        (**self).prepare(name, sql)
    }
}
