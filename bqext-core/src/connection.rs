use crate::{BqError, Driver, Error, Executor, Result};
use std::{borrow::Cow, future::Future};

pub trait Connection: Executor {
    /// Opens a connection to the service at `url` (`<driver>://<project>/<dataset>`).
    fn connect(url: Cow<'static, str>) -> impl Future<Output = Result<Self>> + Send;
}

/// Checks that `url` uses the scheme of the driver `D`.
pub fn expect_scheme<D: Driver>(url: &str) -> Result<()> {
    let prefix = format!("{}://", D::NAME);
    if !url.starts_with(&prefix) {
        let error = Error::new(BqError::build(format!(
            "Expected {} connection url to start with `{}`",
            D::NAME,
            prefix
        )));
        log::error!("{:#}", error);
        return Err(error);
    }
    Ok(())
}
