//! Unified loading entrypoint.
//!
//! Most callers should use [`load_dataset`], which reads a [`DataSource`] (local path or
//! HTTP(S) URL) into an in-memory [`crate::types::DataSet`] using a provided
//! [`crate::types::Schema`].
//!
//! If a [`super::observability::LoadObserver`] is configured, success/failure/alerts are
//! reported to it.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{LoadError, LoadResult};
use crate::types::{DataSet, Schema};

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, remote};

/// Where a dataset is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// HTTP(S) URL, fetched with one GET.
    Url(String),
    /// Local CSV file.
    Path(PathBuf),
}

impl FromStr for DataSource {
    type Err = std::convert::Infallible;

    /// Strings starting with `http://` or `https://` (case-insensitive) are URLs; anything
    /// else is a filesystem path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.trim().to_owned()))
        } else {
            Ok(Self::Path(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options controlling loading behavior.
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
    /// Overall timeout for remote fetches. `None` uses the HTTP client's default.
    pub http_timeout: Option<Duration>,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .field("http_timeout", &self.http_timeout)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
            http_timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// Load a dataset from a local path or URL.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
///
/// use salary_dashboard::ingestion::{load_dataset, DataSource, LoadOptions, LogObserver};
/// use salary_dashboard::salary::salary_schema;
///
/// # fn main() -> Result<(), salary_dashboard::LoadError> {
/// let opts = LoadOptions {
///     observer: Some(Arc::new(LogObserver)),
///     ..Default::default()
/// };
/// let source: DataSource = "salaries.csv".parse().unwrap();
/// let ds = load_dataset(&source, &salary_schema(), &opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn load_dataset(
    source: &DataSource,
    schema: &Schema,
    options: &LoadOptions,
) -> LoadResult<DataSet> {
    let result = match source {
        DataSource::Path(path) => csv::ingest_csv_from_path(path, schema),
        DataSource::Url(url) => remote::fetch_csv_from_url(url, schema, options.http_timeout),
    };

    if let Some(obs) = options.observer.as_ref() {
        let ctx = LoadContext {
            source: source.clone(),
        };
        match &result {
            Ok(ds) => obs.on_success(&ctx, LoadStats { rows: ds.row_count() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn severity_for_error(e: &LoadError) -> LoadSeverity {
    match e {
        LoadError::Io(_) | LoadError::Http(_) | LoadError::HttpStatus { .. } => {
            LoadSeverity::Critical
        }
        LoadError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        LoadError::SchemaMismatch { .. } | LoadError::ParseError { .. } => LoadSeverity::Error,
    }
}
