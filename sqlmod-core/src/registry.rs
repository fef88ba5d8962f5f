use crate::{Connection, Result, StatementError, truncate_long};
use anyhow::Context;

/// Prepared statements by name, in registration order.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    entries: Vec<(String, String)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }
    /// Add `sql` under `name`. A name can be registered once.
    pub fn register(&mut self, name: impl Into<String>, sql: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(StatementError::DuplicateOperationName(name).into());
        }
        self.entries.push((name, sql.into()));
        Ok(())
    }
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Name and statement pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
    /// Register every entry of `other`, failing on the first name both contain.
    pub fn merge(&mut self, other: &Registry) -> Result<()> {
        for (name, sql) in other.iter() {
            self.register(name, sql)?;
        }
        Ok(())
    }
    /// Prepare every entry on `connection`, in registration order.
    pub fn prepare_all(&self, connection: &mut dyn Connection) -> Result<()> {
        for (name, sql) in self.iter() {
            log::debug!("Preparing `{name}`: {}", truncate_long!(sql));
            connection
                .prepare(name, sql)
                .with_context(|| format!("While preparing `{name}`"))
                .map_err(|e| {
                    log::error!("{:#}", e);
                    e
                })?;
        }
        Ok(())
    }
}
