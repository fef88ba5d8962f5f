use crate::{
    Arguments, Connection, Driver, Operation, Output, Result, ResultSet, StatementError, Unit,
};
use std::{
    fmt::{self, Debug},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

/// An instance of a [`Unit`] bound to one connection.
///
/// Calls block until the backend answers. A `Database` can be moved across threads but is meant to
/// have a single owner: concurrent use needs one instance per worker, or an external mutex.
pub struct Database {
    unit: Arc<Unit>,
    connection: Option<Box<dyn Connection>>,
    pub(crate) in_transaction: Arc<AtomicBool>,
}

impl Database {
    /// Instance without a connection, everything but declaration lookups fails until one is set.
    pub fn new(unit: Arc<Unit>) -> Self {
        Self {
            unit,
            connection: None,
            in_transaction: Default::default(),
        }
    }

    /// Open a connection with `driver` and establish it.
    pub fn connect<D: Driver>(unit: Arc<Unit>, driver: &D, url: &str) -> Result<Self> {
        let connection = driver.connect(url)?;
        let mut database = Self::new(unit);
        database.establish(connection)?;
        Ok(database)
    }

    /// Use `connection` and prepare every statement of the chain on it. When preparing fails the
    /// connection is dropped and the instance stays unconnected.
    pub fn establish(&mut self, connection: impl Connection + 'static) -> Result<()> {
        self.set_connection(connection);
        if let Err(e) = self.prepare_all() {
            self.connection = None;
            return Err(e);
        }
        Ok(())
    }

    /// Use `connection` as is, preparing the statements is up to the caller.
    pub fn set_connection(&mut self, connection: impl Connection + 'static) -> &mut Self {
        self.connection = Some(Box::new(connection));
        self
    }

    pub fn prepare_all(&mut self) -> Result<()> {
        let registry = self.unit.merged_registry()?;
        log::debug!(
            "Preparing {} statements for unit `{}`",
            registry.len(),
            self.unit.name()
        );
        registry.prepare_all(self.connection()?)
    }

    pub fn unit(&self) -> &Arc<Unit> {
        &self.unit
    }
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }
    pub fn in_transaction(&self) -> bool {
        self.in_transaction.load(Ordering::Acquire)
    }
    pub fn connection(&mut self) -> Result<&mut dyn Connection> {
        match &mut self.connection {
            Some(connection) => Ok(connection.as_mut()),
            None => Err(StatementError::ConnectionNotEstablished.into()),
        }
    }

    /// Send `sql` as is.
    pub fn query(&mut self, sql: &str) -> Result<ResultSet> {
        self.connection()?.query(sql)
    }

    pub fn operation(&self, name: &str) -> Option<Arc<Operation>> {
        self.unit.find_operation(name).cloned()
    }

    /// Invoke the operation `name`.
    pub fn call(&mut self, name: &str, arguments: Arguments) -> Result<Output> {
        let operation = self
            .operation(name)
            .ok_or_else(|| StatementError::UnknownOperation(name.to_owned()))?;
        operation.invoke(self, arguments)
    }
}

impl Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("unit", &self.unit.name())
            .field("connected", &self.is_connected())
            .field("in_transaction", &self.in_transaction())
            .finish()
    }
}
