use crate::{
    Configuration, Connection, ExecutionMode, Operation, Registry, Result, StatementError,
};
use anyhow::Context;
use std::{ptr, sync::Arc};

/// A named set of declared operations, plus the units it includes.
///
/// Operations are looked up, and prepared statements merged, over the chain returned by
/// [`Unit::chain`]: this unit first, then each included unit in the order it was included,
/// depth first. A unit reachable through more than one path is visited once.
///
/// ```
/// # use sqlmod_core::{Unit, Configuration, Single};
/// # use std::sync::Arc;
/// # fn main() -> sqlmod_core::Result<()> {
/// let mut users = Unit::new("users");
/// users
///     .def_prepared("user_by_id", "SELECT * FROM users WHERE id = $1")?
///     .def_statement_with(
///         "user_count",
///         "SELECT COUNT(*) FROM users",
///         Configuration::new().single(Single::RequiredValue)?,
///     )?;
/// let mut app = Unit::new("app");
/// app.include(Arc::new(users));
/// assert!(app.find_operation("user_count").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Unit {
    name: String,
    includes: Vec<Arc<Unit>>,
    default_settings: Configuration,
    operations: Vec<Arc<Operation>>,
    registry: Registry,
}

impl Unit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            includes: Vec::new(),
            default_settings: Configuration::new(),
            operations: Vec::new(),
            registry: Registry::new(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn include(&mut self, unit: Arc<Unit>) -> &mut Self {
        self.includes.push(unit);
        self
    }
    pub fn includes(&self) -> &[Arc<Unit>] {
        &self.includes
    }

    /// Settings inherited by the operations declared from now on in this unit. They do not apply
    /// to operations declared before, nor to units that include this one.
    pub fn default_settings(&mut self, settings: Configuration) -> &mut Self {
        self.default_settings = settings;
        self
    }
    pub fn get_default_settings(&self) -> &Configuration {
        &self.default_settings
    }

    pub fn def_statement(&mut self, name: impl Into<String>, sql: &str) -> Result<&mut Self> {
        self.declare(name.into(), sql, ExecutionMode::Adhoc, Configuration::new())
    }
    pub fn def_statement_with(
        &mut self,
        name: impl Into<String>,
        sql: &str,
        configuration: Configuration,
    ) -> Result<&mut Self> {
        self.declare(name.into(), sql, ExecutionMode::Adhoc, configuration)
    }
    pub fn def_prepared(&mut self, name: impl Into<String>, sql: &str) -> Result<&mut Self> {
        self.declare(name.into(), sql, ExecutionMode::Prepared, Configuration::new())
    }
    pub fn def_prepared_with(
        &mut self,
        name: impl Into<String>,
        sql: &str,
        configuration: Configuration,
    ) -> Result<&mut Self> {
        self.declare(name.into(), sql, ExecutionMode::Prepared, configuration)
    }

    fn declare(
        &mut self,
        name: String,
        sql: &str,
        mode: ExecutionMode,
        configuration: Configuration,
    ) -> Result<&mut Self> {
        if self.local_operation(&name).is_some() {
            return Err(StatementError::DuplicateOperationName(name).into());
        }
        let configuration = configuration.inherit(&self.default_settings);
        let operation = Operation::new(name, sql, mode, configuration)
            .with_context(|| format!("While declaring an operation in unit `{}`", self.name))?;
        if mode == ExecutionMode::Prepared {
            self.registry
                .register(operation.name(), operation.template().sql())?;
        }
        log::debug!(
            "Declared {mode} operation `{}` in unit `{}`",
            operation.name(),
            self.name
        );
        self.operations.push(Arc::new(operation));
        Ok(self)
    }

    /// Operations declared directly in this unit.
    pub fn operations(&self) -> &[Arc<Operation>] {
        &self.operations
    }
    pub fn local_operation(&self, name: &str) -> Option<&Arc<Operation>> {
        self.operations.iter().find(|op| op.name() == name)
    }
    /// Prepared statements declared directly in this unit.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// This unit followed by every unit it includes, directly or not, each one once.
    pub fn chain(&self) -> Vec<&Unit> {
        let mut visited: Vec<&Unit> = Vec::new();
        let mut stack = vec![self];
        while let Some(unit) = stack.pop() {
            if visited.iter().any(|v| ptr::eq(*v, unit)) {
                continue;
            }
            visited.push(unit);
            stack.extend(unit.includes.iter().rev().map(Arc::as_ref));
        }
        visited
    }

    /// First operation named `name` along the chain.
    pub fn find_operation(&self, name: &str) -> Option<&Arc<Operation>> {
        self.chain()
            .into_iter()
            .find_map(|unit| unit.local_operation(name))
    }

    /// Union of the prepared statements of the chain. The same name declared by two units is an
    /// error, even when the statements are identical.
    pub fn merged_registry(&self) -> Result<Registry> {
        let mut merged = Registry::new();
        for unit in self.chain() {
            merged
                .merge(&unit.registry)
                .with_context(|| format!("While merging the statements of unit `{}`", unit.name))?;
        }
        Ok(merged)
    }

    pub fn prepare_all(&self, connection: &mut dyn Connection) -> Result<()> {
        self.merged_registry()?.prepare_all(connection)
    }
}
