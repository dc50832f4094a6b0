//! Implementations of the ports.
//!
//! The in-memory versions back development and tests; they honor the full
//! repository contract (owner scoping, filtering, pagination, cascades) so
//! the service can be exercised without a database. Production backends:
//! the relational store lives outside this crate, S3 is behind the `s3`
//! feature.

pub mod event_sinks;
pub mod inmem_categories;
pub mod inmem_object_store;
pub mod inmem_repo;

#[cfg(feature = "s3")]
pub mod s3;

pub use self::event_sinks::{RecordingEventSink, TracingEventSink};
pub use self::inmem_categories::InMemoryCategoryDirectory;
pub use self::inmem_object_store::InMemoryObjectStore;
pub use self::inmem_repo::InMemoryTodoRepo;

#[cfg(feature = "s3")]
pub use self::s3::S3ObjectStore;
