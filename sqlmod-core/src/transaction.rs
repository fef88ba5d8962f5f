use crate::{Database, Result, StatementError};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Keeps the transaction flag raised while alive.
struct TransactionFlag(Arc<AtomicBool>);

impl TransactionFlag {
    fn raise(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::Release);
        Self(flag.clone())
    }
}

impl Drop for TransactionFlag {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Database {
    /// Run `body` between `BEGIN` and `COMMIT`.
    ///
    /// Any error from `BEGIN`, `body` or `COMMIT` issues a `ROLLBACK` and is returned. If the
    /// rollback fails too its error is returned instead. Transactions do not nest: calling this
    /// from inside `body` fails with [`StatementError::AlreadyInTransaction`].
    ///
    /// ```
    /// # use sqlmod_core::{Database, Unit, StatementError};
    /// # use std::sync::Arc;
    /// let mut db = Database::new(Arc::new(Unit::new("empty")));
    /// let error = db.transaction(|_| Ok(())).unwrap_err();
    /// assert_eq!(
    ///     StatementError::find(&error),
    ///     Some(&StatementError::ConnectionNotEstablished)
    /// );
    /// ```
    pub fn transaction<T>(&mut self, body: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        if self.in_transaction() {
            return Err(StatementError::AlreadyInTransaction.into());
        }
        self.connection()?;
        let _flag = TransactionFlag::raise(&self.in_transaction);
        let result = self
            .query("BEGIN")
            .and_then(|_| body(self))
            .and_then(|value| self.query("COMMIT").map(|_| value));
        match result {
            Ok(value) => Ok(value),
            Err(error) => {
                log::debug!("Rolling back the transaction: {:#}", error);
                if let Err(rollback) = self.query("ROLLBACK") {
                    log::error!("Rollback failed, the transaction failed with: {:#}", error);
                    log::error!("{:#}", rollback);
                    return Err(rollback);
                }
                Err(error)
            }
        }
    }
}
