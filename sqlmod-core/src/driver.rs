use crate::{Connection, Result};

/// Entry point of a backend: knows how to open its [`Connection`] from a URL.
pub trait Driver {
    type Connection: Connection + 'static;

    /// URL scheme accepted by [`Driver::connect`], for example `postgres`.
    const NAME: &'static str;

    fn connect(&self, url: &str) -> Result<Self::Connection>;
}
