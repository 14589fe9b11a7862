//! Typed access to the Formula 1 statistics upstream.
//!
//! The upstream (Jolpica/Ergast) serves loosely-typed JSON: every numeric
//! field is a string and nested objects are PascalCase. This crate splits the
//! work into three layers: `schema` re-types raw payloads and rejects
//! malformed ones, `mapper` converts validated shapes into the domain model
//! with no I/O, and `client` fetches through the gateway proxy and wires the
//! two together.

pub mod client;
pub mod error;
pub mod mapper;
pub mod model;
pub mod schema;

pub use client::F1Client;
pub use error::F1Error;
