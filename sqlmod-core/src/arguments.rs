use crate::Value;
use std::collections::BTreeMap;

/// Arguments keyed by parameter name.
pub type NamedArguments = BTreeMap<String, Value>;

/// Call arguments, positional for `$1..$n` templates, named for `$name` templates.
#[derive(Debug, Clone, PartialEq)]
pub enum Arguments {
    Positional(Vec<Value>),
    Named(NamedArguments),
}

impl Arguments {
    /// No argument at all. Named operations accept it as an empty map.
    pub fn none() -> Self {
        Arguments::Positional(Vec::new())
    }
    pub fn len(&self) -> usize {
        match self {
            Arguments::Positional(v) => v.len(),
            Arguments::Named(v) => v.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Positional argument at `index`, `None` for named arguments.
    pub fn get(&self, index: usize) -> Option<&Value> {
        match self {
            Arguments::Positional(v) => v.get(index),
            Arguments::Named(..) => None,
        }
    }
    /// Named argument `name`, `None` for positional arguments.
    pub fn by_name(&self, name: &str) -> Option<&Value> {
        match self {
            Arguments::Positional(..) => None,
            Arguments::Named(v) => v.get(name),
        }
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(value: Vec<Value>) -> Self {
        Arguments::Positional(value)
    }
}

impl From<NamedArguments> for Arguments {
    fn from(value: NamedArguments) -> Self {
        Arguments::Named(value)
    }
}

/// Build positional [`Arguments`], every element converted with `Value::from`.
///
/// ```
/// # use sqlmod_core::{Arguments, Value, args};
/// let args = args![1, "two", None::<i64>];
/// assert_eq!(args.get(1), Some(&Value::Varchar(Some("two".into()))));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Arguments::Positional(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Arguments::Positional(::std::vec![$($crate::Value::from($value)),+])
    };
}

/// Build named [`Arguments`].
///
/// ```
/// # use sqlmod_core::{Arguments, Value, named};
/// let args = named! { id: 1, name: "John" };
/// assert_eq!(args.by_name("id"), Some(&Value::Int32(Some(1))));
/// ```
#[macro_export]
macro_rules! named {
    () => {
        $crate::Arguments::Named($crate::NamedArguments::new())
    };
    ($($name:ident : $value:expr),+ $(,)?) => {{
        let mut arguments = $crate::NamedArguments::new();
        $(arguments.insert(stringify!($name).to_owned(), $crate::Value::from($value));)+
        $crate::Arguments::Named(arguments)
    }};
}
