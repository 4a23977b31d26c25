//! # vyapi-client
//!
//! Blocking client for a VyOS-style appliance's HTTP configuration API.
//!
//! The API is a small set of authenticated POST endpoints over the
//! device's hierarchical configuration tree. This crate wires the pure
//! algorithms from [`vyapi_core`] (flattening, navigation, table parsing)
//! onto an HTTP transport.
//!
//! ```ignore
//! use vyapi_client::{Client, NavResult};
//!
//! let client = Client::new("https://gateway.local", "secret")?;
//! let config = client.config();
//!
//! match config.show("system host-name")? {
//!     NavResult::Leaf(name) => println!("host-name: {name}"),
//!     NavResult::NotFound => println!("not configured"),
//!     other => println!("unexpected: {other:?}"),
//! }
//!
//! config.set("system name-server", vec!["1.1.1.1", "1.0.0.1"])?;
//! config.save()?;
//!
//! for image in client.container_images().show()? {
//!     println!("{} {} {}", image.name, image.tag, image.image_id);
//! }
//! ```
//!
//! No logger is installed and nothing is retried; both are caller
//! concerns. Requests on one `Client` are serialized, so a shared client
//! is safe to use from multiple threads.

mod client;
mod config;
mod error;
mod image;

pub use client::{Client, Endpoint};
pub use config::{ConfigCache, ConfigService};
pub use error::Error;
pub use image::ContainerImageService;

// Re-export the core types callers interact with.
pub use vyapi_core::{ConfigValue, ContainerImage, FlatOp, NavResult, Path};
