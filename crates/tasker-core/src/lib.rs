//! tasker-core
//!
//! Core building blocks for the Tasker todo backend.
//!
//! # Module layout
//! - **domain**: domain model (ids, todo, category, attachment, payloads, query, events, errors)
//! - **ports**: abstraction layer (TodoRepo, CategoryDirectory, ObjectStore, EventSink, Clock, IdGenerator)
//! - **app**: application logic (TodoService, builder, attachment store adapter)
//! - **impls**: implementations of the ports (in-memory for dev/test, S3 behind the `s3` feature)
//!
//! The HTTP transport, request validation, and the real relational store live
//! outside this crate; they talk to the service through the `ports` traits.

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
