//! hostcli - metadata-driven REST command engine
//!
//! The `hostcli` library turns declarative field and command metadata into CLI sub-commands
//! that call a REST backend and render the returned records. It implements a hexagonal
//! architecture: the command core (argument schemas, validation, dispatch, projection) only
//! talks to the outside world through ports, and adapters provide the real file system,
//! HTTP transport and session handling.
//!
//! # Main Components
//!
//! - [`field`] - Field descriptors and the per-group field map
//! - [`command`] - Command specifications and the YAML command-definition repository
//! - [`argspec`] - Parameter schemas derived from command specifications
//! - [`validate`] - Normalization and validation of parsed arguments
//! - [`rest`] - Request dispatch, response envelopes, transport and session ports
//! - [`project`] - Column filtering, multi-key sorting and row materialization
//! - [`message`] - Success-message template interpolation
//! - [`service`] - The validate, dispatch and shape pipeline for one invocation
//! - [`config`] - Application configuration management
//! - [`fs`] - File system abstractions
//!
//! # Examples
//!
//! ```no_run
//! use hostcli::{
//!     args::ParsedArguments,
//!     command::{CommandSpec, DisplayMode, Operation},
//!     field::{FieldDescriptor, FieldMap},
//!     rest::{ReqwestTransport, StaticSession},
//!     service::CommandService,
//! };
//! use std::{sync::Arc, time::Duration};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let fields = FieldMap::new([FieldDescriptor::new("name", "Name", "Node name")])?;
//! let spec = CommandSpec::builder("node list", Arc::new(fields))
//!     .mode(DisplayMode::List)
//!     .operation(Operation::Get)
//!     .endpoint("nodes")
//!     .arguments(["name"])
//!     .columns(["name"])
//!     .build()?;
//!
//! let session = StaticSession::new("http://localhost:61200", None);
//! let service = CommandService::new(ReqwestTransport::new(session, Duration::from_secs(30))?);
//! let outcome = service.execute(&spec, ParsedArguments::default()).await?;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod argspec;
pub mod command;
pub mod config;
pub mod error;
pub mod field;
pub mod fs;
pub mod message;
pub mod project;
pub mod rest;
pub mod service;
pub mod timezone;
pub mod validate;
pub mod validation;
