//! Dataset loading.
//!
//! Most callers should use [`load_dataset`] (from [`unified`]) which:
//!
//! - reads a local CSV file or downloads one over HTTP(S) ([`DataSource`])
//! - parses it into an in-memory [`crate::types::DataSet`] using a schema
//! - optionally reports success/failure/alerts to a [`LoadObserver`]
//!
//! The pieces are also available separately under [`csv`] and [`remote`].

pub mod csv;
pub mod observability;
pub mod remote;
pub mod unified;

pub use observability::{
    CompositeObserver, FileObserver, LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver,
};
pub use unified::{DataSource, LoadOptions, load_dataset};
