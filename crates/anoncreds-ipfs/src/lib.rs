//! [AnonCreds](https://hyperledger.github.io/anoncreds-spec/) object registry backed by
//! [IPFS](https://ipfs.tech).
//!
//! Objects are immutable and named by the content id the store mints for
//! their serialized bytes, so "updating" an object means registering a new one.
//!
//! ## Usage
//!
//! ```
//! use anoncreds_ipfs::{Registry, core::objects::Schema, gateway::MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     // Use an in-memory store. `Registry::connect` talks to a real gateway.
//!     let registry = Registry::new(MemoryStore::new());
//!
//!     let schema = Schema {
//!         issuer_id: "did:web:example.com".to_string(),
//!         name: "passport".to_string(),
//!         version: "1.0".to_string(),
//!         attr_names: vec!["name".to_string(), "birthdate".to_string()],
//!     };
//!
//!     let registered = registry.register_schema(schema.clone()).await.unwrap();
//!     assert!(registered.id.starts_with("ipfs://"));
//!
//!     let resolved = registry.get_schema(&registered.id).await.unwrap();
//!     assert_eq!(resolved.object, schema);
//! }
//! ```

use std::sync::Arc;

use anoncreds_ipfs_core::{
    IdentifierResolver, Registered, Registration, RegistrationFailure, ResolutionErrorKind,
    ResolutionFailure, objects::ObjectKind,
};
use anoncreds_ipfs_gateway::{ContentStore, GatewayClient};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::Instant;
use tracing::{Instrument, Span, debug, debug_span, error};

mod config;
mod credential_definition;
mod revocation_registry_definition;
mod revocation_status_list;
mod schema;

pub use config::{RegistryConfig, RegistryError};
pub use revocation_status_list::StatusListError;

pub mod core {
    pub use anoncreds_ipfs_core::*;
}

pub mod gateway {
    pub use anoncreds_ipfs_gateway::*;
}

/// Resolves and registers AnonCreds objects in a [`ContentStore`].
pub struct Registry<S> {
    store: Arc<S>,
    ids: IdentifierResolver,
    span: Span,
    deadline: Option<Instant>,
}

impl<S> Clone for Registry<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            ids: self.ids.clone(),
            span: self.span.clone(),
            deadline: self.deadline,
        }
    }
}

impl Registry<GatewayClient> {
    /// Creates a registry talking to the gateway described by `config`.
    pub fn connect(config: &RegistryConfig) -> Result<Self, RegistryError> {
        let client = GatewayClient::new(&config.gateway)?;
        let ids = IdentifierResolver::new(&config.scheme)?;
        Ok(Self::new(client).with_identifiers(ids))
    }
}

impl<S: ContentStore> Registry<S> {
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Self {
            store,
            ids: IdentifierResolver::default(),
            span: Span::current(),
            deadline: None,
        }
    }

    pub fn with_identifiers(mut self, ids: IdentifierResolver) -> Self {
        self.ids = ids;
        self
    }

    /// Parents every operation's span on `span`.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns a view of this registry whose store calls give up at `deadline`.
    pub fn until(&self, deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn identifiers(&self) -> &IdentifierResolver {
        &self.ids
    }

    /// Fetches and parses the object named by `id`.
    async fn fetch<T: DeserializeOwned>(
        &self,
        kind: ObjectKind,
        id: &str,
    ) -> Result<T, ResolutionFailure> {
        let span = debug_span!(parent: &self.span, "fetch", %kind, id);

        async {
            if !self.ids.validate(id) {
                debug!("id failed validation");
                return Err(invalid_id());
            }

            // DIDs validate, but only content-addressed ids name stored objects.
            let cid = self.ids.parse_content_id(id).map_err(|_| {
                debug!("id is not content-addressed");
                invalid_id()
            })?;

            let bytes = self.store.get(&cid, self.deadline).await.map_err(|e| {
                debug!(error = %e, "fetch failed");
                ResolutionFailure::new(
                    ResolutionErrorKind::NotFound,
                    format!("{} fetch error", self.ids.scheme()),
                )
            })?;

            serde_json::from_slice(&bytes).map_err(|e| {
                debug!(error = %e, "failed to parse contents");
                ResolutionFailure::new(
                    ResolutionErrorKind::Invalid,
                    "contents could not be parsed",
                )
            })
        }
        .instrument(span)
        .await
    }

    /// Serializes `object`, stores it, and mints its id.
    async fn upload<T: Serialize>(&self, kind: ObjectKind, object: T) -> Registration<T> {
        let span = debug_span!(parent: &self.span, "upload", %kind);

        async {
            let bytes = serde_json::to_vec(&object).map_err(|e| {
                error!(error = %e, "failed to serialize object");
                RegistrationFailure::unknown(format!("failed to serialize {kind}"), e)
            })?;

            let cid = self.store.put(bytes, self.deadline).await.map_err(|e| {
                error!(error = ?e, "failed to upload object");
                RegistrationFailure::unknown(format!("failed to upload {kind}"), e)
            })?;

            let id = self.ids.content_uri(&cid);
            debug!(id = %id, "registered object");

            Ok(Registered { object, id })
        }
        .instrument(span)
        .await
    }
}

fn invalid_id() -> ResolutionFailure {
    ResolutionFailure::new(ResolutionErrorKind::Invalid, "id provided is invalid")
}
