use crate::{Connection, Result};
use std::{borrow::Cow, future::Future};

/// A query service implementation.
pub trait Driver {
    type Connection: Connection<Driver = Self>;

    /// URL scheme accepted by [`Connection::connect`].
    const NAME: &'static str;

    fn connect(
        &self,
        url: Cow<'static, str>,
    ) -> impl Future<Output = Result<Self::Connection>> + Send {
        Self::Connection::connect(url)
    }
}
