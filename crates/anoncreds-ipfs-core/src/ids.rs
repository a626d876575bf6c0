//! Identifier validation and parsing.
//!
//! Registered objects are named by content-addressed URIs (`ipfs://<cid>`),
//! while issuers are named by DIDs. Every pattern here is anchored to the full
//! string, so partial or embedded matches are rejected.

use std::{fmt::Display, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SCHEME: &str = "ipfs";

const BASE58: &str = "1-9A-HJ-NP-Za-km-z";

static DID_KEY: LazyLock<Regex> = LazyLock::new(|| build(&format!("^did:(key):(z[{BASE58}]+)$")));
static DID_WEB: LazyLock<Regex> = LazyLock::new(|| build("^did:(web):(.+)$"));
static DID_INDY: LazyLock<Regex> = LazyLock::new(|| {
    build(&format!(
        "^did:indy:([a-z][_a-z0-9-]*(?::[a-z][_a-z0-9-]*)?):([{BASE58}]{{21,22}})$"
    ))
});

static REV_REG_ID_NAMESPACED: LazyLock<Regex> = LazyLock::new(|| {
    build(&format!(
        "^did:indy:(?P<ns>[a-z][_a-z0-9-]*(?::[a-z][_a-z0-9-]*)?):(?P<nsid>[{BASE58}]{{21,22}})\
         /anoncreds/v0/REV_REG_DEF/(?P<seq>[0-9]+)/(?P<cdtag>[^/]+)/(?P<tag>[^/]+)$"
    ))
});
static REV_REG_ID_LEGACY: LazyLock<Regex> = LazyLock::new(|| {
    build(&format!(
        "^(?P<nsid>[{BASE58}]{{21,22}}):4:[{BASE58}]{{21,22}}:3:CL:(?P<seq>[0-9]+)\
         :(?P<cdtag>[^:]+):CL_ACCUM:(?P<tag>[^:]+)$"
    ))
});

fn build(pattern: &str) -> Regex {
    Regex::new(pattern).expect("identifier patterns are valid")
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("invalid identifier: {0}")]
    Invalid(String),
    #[error("invalid scheme: {0}")]
    InvalidScheme(String),
    #[error("unsupported DID method: {0}")]
    UnsupportedMethod(String),
}

/// A parsed object identifier.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ObjectId {
    pub scheme: String,
    pub raw_value: String,
}

impl ObjectId {
    pub fn is_did(&self) -> bool {
        self.scheme == "did"
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_did() {
            write!(f, "did:{}", self.raw_value)
        } else {
            write!(f, "{}://{}", self.scheme, self.raw_value)
        }
    }
}

/// DID shapes understood by [`parse_did`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DidPattern {
    /// `did:key:z<base58btc>`
    Key,
    /// `did:web:<anything>`
    Web,
    /// `did:indy:<namespace>:<namespace identifier>`
    Indy,
}

impl DidPattern {
    /// Picks the pattern matching the DID method of `did`.
    pub fn for_did(did: &str) -> Result<Self, IdError> {
        let method = did
            .strip_prefix("did:")
            .and_then(|rest| rest.split(':').next())
            .ok_or_else(|| IdError::Invalid(did.to_string()))?;

        match method {
            "key" => Ok(Self::Key),
            "web" => Ok(Self::Web),
            "indy" => Ok(Self::Indy),
            other => Err(IdError::UnsupportedMethod(other.to_string())),
        }
    }

    fn regex(self) -> &'static Regex {
        match self {
            Self::Key => &DID_KEY,
            Self::Web => &DID_WEB,
            Self::Indy => &DID_INDY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DidParts {
    pub namespace: String,
    pub namespace_identifier: String,
}

/// Splits a DID into namespace and namespace identifier using `pattern`.
pub fn parse_did(id: &str, pattern: DidPattern) -> Result<DidParts, IdError> {
    let captures = pattern
        .regex()
        .captures(id)
        .ok_or_else(|| IdError::Invalid(id.to_string()))?;

    Ok(DidParts {
        namespace: captures[1].to_string(),
        namespace_identifier: captures[2].to_string(),
    })
}

/// Parses any supported DID, choosing the pattern from its method.
pub fn parse_any_did(id: &str) -> Result<DidParts, IdError> {
    parse_did(id, DidPattern::for_did(id)?)
}

/// Components of a DID-based revocation registry id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevocationRegistryIdParts {
    /// `None` for legacy ids, which carry no namespace.
    pub namespace: Option<String>,
    pub namespace_identifier: String,
    pub schema_seq_no: u64,
    pub credential_definition_tag: String,
    pub revocation_registry_tag: String,
}

/// Parses a namespaced (`did:indy:...`) or legacy revocation registry id.
pub fn parse_revocation_registry_id(id: &str) -> Result<RevocationRegistryIdParts, IdError> {
    let invalid = || IdError::Invalid(id.to_string());

    let (captures, namespace) = if let Some(c) = REV_REG_ID_NAMESPACED.captures(id) {
        let ns = c.name("ns").map(|m| m.as_str().to_string());
        (c, ns)
    } else if let Some(c) = REV_REG_ID_LEGACY.captures(id) {
        (c, None)
    } else {
        return Err(invalid());
    };

    Ok(RevocationRegistryIdParts {
        namespace,
        namespace_identifier: captures["nsid"].to_string(),
        schema_seq_no: captures["seq"].parse().map_err(|_| invalid())?,
        credential_definition_tag: captures["cdtag"].to_string(),
        revocation_registry_tag: captures["tag"].to_string(),
    })
}

/// Validates and parses identifiers for a single content-addressed scheme.
#[derive(Debug, Clone)]
pub struct IdentifierResolver {
    scheme: String,
    content_uri: Regex,
}

impl Default for IdentifierResolver {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            content_uri: build(&format!("^{DEFAULT_SCHEME}://([A-Za-z0-9]+)$")),
        }
    }
}

impl IdentifierResolver {
    pub fn new(scheme: &str) -> Result<Self, IdError> {
        // `did` would make content URIs indistinguishable from DIDs.
        let valid = scheme != "did"
            && scheme.starts_with(|c: char| c.is_ascii_lowercase())
            && scheme
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "+-.".contains(c));

        if !valid {
            return Err(IdError::InvalidScheme(scheme.to_string()));
        }

        let content_uri = Regex::new(&format!("^{}://([A-Za-z0-9]+)$", regex::escape(scheme)))
            .map_err(|_| IdError::InvalidScheme(scheme.to_string()))?;

        Ok(Self {
            scheme: scheme.to_string(),
            content_uri,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Whether `id` is a did:key, a content-addressed URI, or a did:web.
    pub fn validate(&self, id: &str) -> bool {
        DID_KEY.is_match(id) || self.content_uri.is_match(id) || DID_WEB.is_match(id)
    }

    /// Extracts the content id from `<scheme>://<cid>`.
    pub fn parse_content_id(&self, id: &str) -> Result<String, IdError> {
        self.content_uri
            .captures(id)
            .map(|c| c[1].to_string())
            .ok_or_else(|| IdError::Invalid(id.to_string()))
    }

    pub fn parse_object_id(&self, id: &str) -> Result<ObjectId, IdError> {
        if let Ok(cid) = self.parse_content_id(id) {
            return Ok(ObjectId {
                scheme: self.scheme.clone(),
                raw_value: cid,
            });
        }

        if !self.validate(id) {
            return Err(IdError::Invalid(id.to_string()));
        }

        let (scheme, raw_value) = id
            .split_once(':')
            .ok_or_else(|| IdError::Invalid(id.to_string()))?;

        Ok(ObjectId {
            scheme: scheme.to_string(),
            raw_value: raw_value.to_string(),
        })
    }

    /// Mints the object id for a freshly stored content id.
    pub fn content_uri(&self, cid: &str) -> String {
        format!("{}://{}", self.scheme, cid)
    }
}

impl FromStr for IdentifierResolver {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DID_KEY_EXAMPLE: &str = "did:key:z6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK";

    #[test]
    fn test_content_uri_matches() {
        let resolver = IdentifierResolver::default();
        assert!(resolver.validate("ipfs://AbC123"));
        assert_eq!(resolver.parse_content_id("ipfs://AbC123").unwrap(), "AbC123");
    }

    #[test]
    fn test_content_uri_rejects() {
        let resolver = IdentifierResolver::default();

        for id in [
            "http://AbC123",
            "ipfs:AbC123",
            "AbC123",
            "ipfs://!?/",
            " ipfs://AbC123",
            "ipfs://AbC123 trailing",
            "see ipfs://AbC123",
            "ipfs://",
        ] {
            assert!(!resolver.validate(id), "{id} should not validate");
            assert!(resolver.parse_content_id(id).is_err(), "{id} should not parse");
        }
    }

    #[test]
    fn test_custom_scheme() {
        let resolver = IdentifierResolver::new("cas").unwrap();
        assert!(resolver.validate("cas://bafy123"));
        assert!(!resolver.validate("ipfs://bafy123"));
        assert_eq!(resolver.content_uri("bafy123"), "cas://bafy123");

        assert!(IdentifierResolver::new("").is_err());
        assert!(IdentifierResolver::new("a b").is_err());
        assert!(IdentifierResolver::new("Ipfs").is_err());
    }

    #[test]
    fn test_did_scheme_rejected() {
        assert_eq!(
            IdentifierResolver::new("did").unwrap_err(),
            IdError::InvalidScheme("did".to_string())
        );
        assert!("did".parse::<IdentifierResolver>().is_err());
        assert!(IdentifierResolver::new("didx").is_ok());
    }

    #[test]
    fn test_validate_dids() {
        let resolver = IdentifierResolver::default();
        assert!(resolver.validate(DID_KEY_EXAMPLE));
        assert!(resolver.validate("did:web:example.com:issuers:alice"));

        assert!(!resolver.validate("did:key:6MkhaXgBZDvotDkL5257faiztiGiC2QtKLGpbnnEGta2doK"));
        assert!(!resolver.validate("did:key:z0OIl"));
        assert!(!resolver.validate("did:web:"));
        assert!(!resolver.validate(&format!("prefix {DID_KEY_EXAMPLE}")));
    }

    #[test]
    fn test_parse_object_id() {
        let resolver = IdentifierResolver::default();

        let id = resolver.parse_object_id("ipfs://bafkabc").unwrap();
        assert_eq!(id.scheme, "ipfs");
        assert_eq!(id.raw_value, "bafkabc");
        assert_eq!(id.to_string(), "ipfs://bafkabc");

        let id = resolver.parse_object_id("did:web:example.com").unwrap();
        assert!(id.is_did());
        assert_eq!(id.to_string(), "did:web:example.com");

        assert!(resolver.parse_object_id("http://bafkabc").is_err());
    }

    #[test]
    fn test_parse_did() {
        let parts = parse_did(DID_KEY_EXAMPLE, DidPattern::Key).unwrap();
        assert_eq!(parts.namespace, "key");
        assert!(parts.namespace_identifier.starts_with("z6Mk"));

        let parts = parse_did("did:web:example.com%3A3000:user", DidPattern::Web).unwrap();
        assert_eq!(parts.namespace, "web");
        assert_eq!(parts.namespace_identifier, "example.com%3A3000:user");

        let parts = parse_any_did("did:indy:sovrin:staging:7Tqg6BwSSWapxgUDm9KKgg").unwrap();
        assert_eq!(parts.namespace, "sovrin:staging");
        assert_eq!(parts.namespace_identifier, "7Tqg6BwSSWapxgUDm9KKgg");

        assert!(parse_did("did:web:example.com", DidPattern::Key).is_err());
        assert_eq!(
            parse_any_did("did:example:123"),
            Err(IdError::UnsupportedMethod("example".to_string()))
        );
        assert!(parse_any_did("not-a-did").is_err());
    }

    #[test]
    fn test_parse_revocation_registry_id_namespaced() {
        let parts = parse_revocation_registry_id(
            "did:indy:sovrin:7Tqg6BwSSWapxgUDm9KKgg/anoncreds/v0/REV_REG_DEF/56495/npdb/TAG1",
        )
        .unwrap();

        assert_eq!(parts.namespace.as_deref(), Some("sovrin"));
        assert_eq!(parts.namespace_identifier, "7Tqg6BwSSWapxgUDm9KKgg");
        assert_eq!(parts.schema_seq_no, 56495);
        assert_eq!(parts.credential_definition_tag, "npdb");
        assert_eq!(parts.revocation_registry_tag, "TAG1");
    }

    #[test]
    fn test_parse_revocation_registry_id_legacy() {
        let parts = parse_revocation_registry_id(
            "7Tqg6BwSSWapxgUDm9KKgg:4:7Tqg6BwSSWapxgUDm9KKgg:3:CL:56495:npdb:CL_ACCUM:TAG1",
        )
        .unwrap();

        assert_eq!(parts.namespace, None);
        assert_eq!(parts.namespace_identifier, "7Tqg6BwSSWapxgUDm9KKgg");
        assert_eq!(parts.schema_seq_no, 56495);
        assert_eq!(parts.credential_definition_tag, "npdb");
        assert_eq!(parts.revocation_registry_tag, "TAG1");

        assert!(parse_revocation_registry_id("ipfs://bafkabc").is_err());
    }
}
