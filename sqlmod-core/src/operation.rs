use crate::{
    Arguments, Configuration, Database, Output, ParameterContract, Result, StatementError,
    Template, Value, truncate_long,
};
use std::fmt::{self, Display};

/// How the statement reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// The statement text is sent with every call.
    Adhoc,
    /// The statement is prepared once, under the operation name, when the connection is
    /// established. Calls only send the name and the arguments.
    Prepared,
}

impl Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExecutionMode::Adhoc => "adhoc",
            ExecutionMode::Prepared => "prepared",
        })
    }
}

/// A declared operation, ready to be invoked on a [`Database`].
#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    template: Template,
    mode: ExecutionMode,
    configuration: Configuration,
}

impl Operation {
    /// Parse `sql` and check `configuration` against the parameters found.
    pub fn new(
        name: impl Into<String>,
        sql: &str,
        mode: ExecutionMode,
        configuration: Configuration,
    ) -> Result<Self> {
        let template = Template::parse(sql)?;
        if let Some(defaults) = configuration.get_defaults() {
            defaults.validate(template.contract())?;
        }
        Ok(Self {
            name: name.into(),
            template,
            mode,
            configuration,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn template(&self) -> &Template {
        &self.template
    }
    pub fn contract(&self) -> &ParameterContract {
        self.template.contract()
    }
    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Resolve defaults, check the arguments, execute and run the result pipeline.
    pub fn invoke(&self, database: &mut Database, arguments: Arguments) -> Result<Output> {
        let arguments = match self.configuration.get_defaults() {
            Some(defaults) => defaults.resolve(self.contract(), arguments, database)?,
            None => arguments,
        };
        let values = self.bind(arguments)?;
        log::trace!(
            "Invoking {} operation `{}` with {} arguments",
            self.mode,
            self.name,
            values.len()
        );
        let connection = database.connection()?;
        let result = match (self.mode, self.contract()) {
            (ExecutionMode::Adhoc, ParameterContract::NoParams) => {
                connection.query(self.template.sql())
            }
            (ExecutionMode::Adhoc, _) => {
                connection.execute_parameterized(self.template.sql(), &values)
            }
            (ExecutionMode::Prepared, _) => connection.execute_prepared(&self.name, &values),
        };
        let rows = result.map_err(|e| {
            let e = e.context(format!(
                "While executing `{}`: {}",
                self.name,
                truncate_long!(self.template.sql())
            ));
            log::error!("{:#}", e);
            e
        })?;
        log::debug!("`{}` returned {} rows", self.name, rows.len());
        self.configuration.process(rows, database)
    }

    /// Check `arguments` against the contract and lay them out as `$1..$n`.
    fn bind(&self, arguments: Arguments) -> Result<Vec<Value>> {
        match self.contract() {
            ParameterContract::NoParams | ParameterContract::FixedArity(..) => {
                let Arguments::Positional(values) = arguments else {
                    return Err(StatementError::ArgumentStyleMismatch {
                        expected: "positional",
                    }
                    .into());
                };
                let arity = self.contract().arity();
                if values.len() != arity {
                    return Err(StatementError::ArityMismatch {
                        given: values.len(),
                        min: arity,
                        max: arity,
                    }
                    .into());
                }
                Ok(values)
            }
            ParameterContract::NamedOrder(names) => {
                let mut values = match arguments {
                    Arguments::Named(values) => values,
                    Arguments::Positional(values) if values.is_empty() => Default::default(),
                    Arguments::Positional(..) => {
                        return Err(
                            StatementError::ArgumentStyleMismatch { expected: "named" }.into()
                        );
                    }
                };
                if let Some(name) = names.iter().find(|name| !values.contains_key(*name)) {
                    return Err(StatementError::MissingNamedArgument(name.clone()).into());
                }
                if let Some(name) = values.keys().find(|name| !names.contains(name)) {
                    return Err(StatementError::UnexpectedNamedArgument(name.clone()).into());
                }
                Ok(names
                    .iter()
                    .map(|name| values.remove(name).unwrap_or_default())
                    .collect())
            }
        }
    }
}
