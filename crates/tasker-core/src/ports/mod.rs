//! Ports - the abstraction layer.
//!
//! Each trait here is the seam between the domain service and an external
//! system (relational store, category service, object storage, event log),
//! hiding the implementation behind an interface. `impls` provides in-memory
//! versions for development and tests; production backends live outside this
//! crate or behind cargo features.

pub mod category_directory;
pub mod clock;
pub mod event_sink;
pub mod id_generator;
pub mod object_store;
pub mod todo_repo;

pub use self::category_directory::CategoryDirectory;
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::event_sink::EventSink;
pub use self::id_generator::{IdGenerator, UlidGenerator};
pub use self::object_store::ObjectStore;
pub use self::todo_repo::TodoRepo;
