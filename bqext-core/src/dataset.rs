use crate::{
    BqError, Connection, Error, Executor, FromRow, QueryConfig, QueryContext, Result, TableRef,
    stream::StreamExt, truncate_long,
};
use anyhow::Context;
use log::Level;
use std::{borrow::Cow, pin::pin};

/// A dataset handle: an executor together with the default project and
/// dataset of every query built through it.
pub struct Dataset<E: Executor> {
    executor: E,
    context: QueryContext,
}

impl<E: Executor> Dataset<E> {
    pub fn new(executor: E, context: QueryContext) -> Self {
        Self { executor, context }
    }

    /// Connects to `<driver>://<project>/<dataset>`, taking the defaults from the URL.
    pub async fn connect(url: impl Into<Cow<'static, str>>) -> Result<Self>
    where
        E: Connection,
    {
        let url = url.into();
        let context = QueryContext::from_url(&url)?;
        let executor = E::connect(url)
            .await
            .with_context(|| format!("While opening the dataset `{context}`"))?;
        Ok(Self::new(executor, context))
    }

    pub fn context(&self) -> &QueryContext {
        &self.context
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// Reference to `table` inside this dataset.
    pub fn table(&self, table: impl Into<String>) -> TableRef {
        self.context.table(table)
    }

    /// Query reading its results back, resolving unqualified tables against this dataset.
    pub fn result_query(&self, text: impl Into<String>, dry_run: bool) -> QueryConfig {
        QueryConfig::result(text, dry_run, &self.context)
    }

    /// Query writing its results into `destination`, a dry run when there is none.
    ///
    /// The write disposition is left to the caller.
    pub fn destination_query(
        &self,
        text: impl Into<String>,
        destination: Option<TableRef>,
    ) -> QueryConfig {
        QueryConfig::destination(text, destination, &self.context)
    }

    /// Runs a query expected to return exactly one row and decodes it.
    ///
    /// Fails with [`BqError::NoRows`] or [`BqError::MultipleRows`] when the
    /// query breaks that expectation. Nothing is retried.
    pub async fn query_one<T: FromRow>(&mut self, text: impl Into<String>) -> Result<T> {
        let query = self.result_query(text, false);
        self.read_one(query).await
    }

    /// Like [`Dataset::query_one`], storing the result into `target`.
    ///
    /// `target` is assigned only when the whole call succeeds.
    pub async fn query_and_parse<T: FromRow>(
        &mut self,
        text: impl Into<String>,
        target: &mut T,
    ) -> Result<()> {
        *target = self.query_one(text).await?;
        Ok(())
    }

    /// Single row execution of an already built query.
    pub async fn read_one<T: FromRow>(&mut self, query: QueryConfig) -> Result<T> {
        let context = format!(
            "While running the single row query:\n{}",
            truncate_long!(query.text)
        );
        log::debug!("{}", context);
        let mut rows = pin!(self.executor.read(query));
        let Some(row) = rows.next().await else {
            let error = Error::new(BqError::NoRows).context(context);
            log::log!(Level::Info, "{:#}", error);
            return Err(error);
        };
        let row = row.with_context(|| context.clone())?;
        let result = T::from_row(row).with_context(|| context.clone())?;
        // The query may not hold a LIMIT 1, make sure the cursor is exhausted.
        match rows.next().await {
            None => Ok(result),
            Some(Ok(..)) => {
                let error = Error::new(BqError::MultipleRows).context(context);
                log::log!(Level::Error, "{:#}", error);
                Err(error)
            }
            Some(Err(e)) => Err(e.context(context)),
        }
    }
}
