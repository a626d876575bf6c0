//! Core types for a content-addressed [AnonCreds](https://hyperledger.github.io/anoncreds-spec/)
//! registry.
//!
//! Nothing in this crate performs I/O. It holds the object model, identifier
//! parsing, registry result types, and the revocation list reconstruction.

pub mod ids;
pub mod objects;
pub mod result;
pub mod revocation;

pub use ids::{IdError, IdentifierResolver, ObjectId};
pub use result::*;
pub use revocation::{CapacityError, MAX_CAPACITY, build_revocation_status_list};
