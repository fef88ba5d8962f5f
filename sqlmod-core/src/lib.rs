mod arguments;
mod as_value;
mod configuration;
mod connection;
mod database;
mod defaults;
mod driver;
mod error;
mod operation;
mod output;
mod parameters;
mod registry;
mod row;
mod transaction;
mod unit;
mod util;
mod value;

pub use ::anyhow::Context;
pub use arguments::*;
pub use as_value::*;
pub use configuration::*;
pub use connection::*;
pub use database::*;
pub use defaults::*;
pub use driver::*;
pub use error::*;
pub use operation::*;
pub use output::*;
pub use parameters::*;
pub use registry::*;
pub use row::*;
pub use unit::*;
pub use util::*;
pub use value::*;

pub type Result<T> = anyhow::Result<T>;
pub type Error = anyhow::Error;
