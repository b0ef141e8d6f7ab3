use crate::{BqError, Error, Result, TableRef};
use std::fmt::{self, Display};
use url::Url;

/// Default project and dataset every query built through a dataset handle
/// resolves unqualified table names against.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryContext {
    pub project_id: String,
    pub dataset_id: String,
}

impl QueryContext {
    pub fn new(project_id: impl Into<String>, dataset_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            dataset_id: dataset_id.into(),
        }
    }

    /// Reads the context from a connection URL shaped like
    /// `<driver>://<project>/<dataset>`.
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| {
            let error = Error::new(BqError::build(format!(
                "Could not parse the connection URL `{url}`: {e}"
            )));
            log::error!("{:#}", error);
            error
        })?;
        let project = parsed.host_str().unwrap_or_default();
        let mut segments = parsed
            .path_segments()
            .into_iter()
            .flatten()
            .filter(|v| !v.is_empty());
        let dataset = segments.next().unwrap_or_default();
        if project.is_empty() || dataset.is_empty() {
            let error = Error::new(BqError::build(format!(
                "The connection URL `{url}` must name both a project and a dataset: `{}://<project>/<dataset>`",
                parsed.scheme()
            )));
            log::error!("{:#}", error);
            return Err(error);
        }
        if segments.next().is_some() {
            let error = Error::new(BqError::build(format!(
                "The connection URL `{url}` has unexpected path segments after the dataset"
            )));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self::new(project, dataset))
    }

    /// Reference to `table` inside the default dataset.
    pub fn table(&self, table: impl Into<String>) -> TableRef {
        TableRef::new(&self.project_id, &self.dataset_id, table)
    }
}

impl Display for QueryContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.project_id, self.dataset_id)
    }
}
