use crate::{Arguments, Database, ParameterContract, Result, StatementError, Value};
use std::{
    collections::BTreeSet,
    fmt::{self, Debug},
    sync::Arc,
};

/// Default computed at call time from the arguments resolved so far and the calling instance.
pub type DeferredDefault = Arc<dyn Fn(&Arguments, &Database) -> Result<Value> + Send + Sync>;

/// Value used for an omitted argument.
#[derive(Clone)]
pub enum DefaultValue {
    Constant(Value),
    Deferred(DeferredDefault),
}

impl DefaultValue {
    pub fn constant(value: impl Into<Value>) -> Self {
        DefaultValue::Constant(value.into())
    }
    pub fn deferred(
        function: impl Fn(&Arguments, &Database) -> Result<Value> + Send + Sync + 'static,
    ) -> Self {
        DefaultValue::Deferred(Arc::new(function))
    }
    pub fn evaluate(&self, arguments: &Arguments, database: &Database) -> Result<Value> {
        match self {
            DefaultValue::Constant(v) => Ok(v.clone()),
            DefaultValue::Deferred(f) => f(arguments, database),
        }
    }
}

impl From<Value> for DefaultValue {
    fn from(value: Value) -> Self {
        DefaultValue::Constant(value)
    }
}

impl Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Constant(v) => f.debug_tuple("Constant").field(v).finish(),
            DefaultValue::Deferred(..) => f.write_str("Deferred(..)"),
        }
    }
}

/// Defaults declared for an operation.
///
/// Positional defaults cover the trailing parameters: with `n` parameters and `d` defaults the
/// operation accepts from `n - d` to `n` arguments. Named defaults are evaluated in the order
/// they are listed here, a deferred one sees the arguments filled before it.
#[derive(Debug, Clone)]
pub enum Defaults {
    Positional(Vec<DefaultValue>),
    Named(Vec<(String, DefaultValue)>),
}

impl Defaults {
    pub fn positional(values: impl IntoIterator<Item = DefaultValue>) -> Self {
        Defaults::Positional(values.into_iter().collect())
    }
    pub fn named<K: Into<String>>(values: impl IntoIterator<Item = (K, DefaultValue)>) -> Self {
        Defaults::Named(values.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
    pub fn len(&self) -> usize {
        match self {
            Defaults::Positional(v) => v.len(),
            Defaults::Named(v) => v.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that these defaults fit `contract`.
    pub fn validate(&self, contract: &ParameterContract) -> Result<()> {
        let invalid = |message: String| -> Result<()> {
            Err(StatementError::InvalidConfiguration(message).into())
        };
        match (contract, self) {
            (ParameterContract::NoParams, _) => {
                invalid("Defaults cannot be declared for a statement without parameters".into())
            }
            (ParameterContract::FixedArity(..), Defaults::Named(..)) => {
                invalid("Named defaults cannot be declared for numbered parameters".into())
            }
            (ParameterContract::NamedOrder(..), Defaults::Positional(..)) => {
                invalid("Positional defaults cannot be declared for named parameters".into())
            }
            (ParameterContract::FixedArity(n), Defaults::Positional(values)) => {
                if values.len() > *n {
                    return invalid(format!(
                        "{} defaults declared for a statement with {n} parameters",
                        values.len()
                    ));
                }
                Ok(())
            }
            (ParameterContract::NamedOrder(names), Defaults::Named(values)) => {
                let mut seen = BTreeSet::new();
                for (name, _) in values {
                    if !names.contains(name) {
                        return invalid(format!(
                            "Default declared for `{name}`, which is not a parameter"
                        ));
                    }
                    if !seen.insert(name.as_str()) {
                        return invalid(format!("Default for `{name}` declared twice"));
                    }
                }
                Ok(())
            }
        }
    }

    /// Fill the arguments omitted from `arguments`.
    pub fn resolve(
        &self,
        contract: &ParameterContract,
        arguments: Arguments,
        database: &Database,
    ) -> Result<Arguments> {
        match (contract, self) {
            (ParameterContract::FixedArity(n), Defaults::Positional(defaults)) => {
                let Arguments::Positional(..) = arguments else {
                    return Err(StatementError::ArgumentStyleMismatch {
                        expected: "positional",
                    }
                    .into());
                };
                let given = arguments.len();
                let min = n.saturating_sub(defaults.len());
                if given < min || given > *n {
                    return Err(StatementError::ArityMismatch {
                        given,
                        min,
                        max: *n,
                    }
                    .into());
                }
                let mut resolved = arguments;
                for default in &defaults[given - min..] {
                    let value = default.evaluate(&resolved, database)?;
                    if let Arguments::Positional(values) = &mut resolved {
                        values.push(value);
                    }
                }
                Ok(resolved)
            }
            (ParameterContract::NamedOrder(..), Defaults::Named(defaults)) => {
                let mut resolved = match arguments {
                    Arguments::Named(..) => arguments,
                    Arguments::Positional(ref v) if v.is_empty() => {
                        Arguments::Named(Default::default())
                    }
                    Arguments::Positional(..) => {
                        return Err(
                            StatementError::ArgumentStyleMismatch { expected: "named" }.into()
                        );
                    }
                };
                for (name, default) in defaults {
                    if resolved.by_name(name).is_some() {
                        continue;
                    }
                    let value = default.evaluate(&resolved, database)?;
                    if let Arguments::Named(values) = &mut resolved {
                        values.insert(name.clone(), value);
                    }
                }
                Ok(resolved)
            }
            _ => {
                self.validate(contract)?;
                Ok(arguments)
            }
        }
    }
}
