//! Hypermedia response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A navigation affordance attached to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Link {
    /// Target URL.
    pub href: String,
    /// Relation name, e.g. `get_all`.
    pub relation: String,
    /// HTTP method to use against `href`.
    pub method: String,
}

impl Link {
    /// Create a link.
    pub fn new(
        href: impl Into<String>,
        relation: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            href: href.into(),
            relation: relation.into(),
            method: method.into(),
        }
    }
}

/// Response data wrapped with the links that apply to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Envelope<T> {
    /// The payload.
    pub data: T,
    /// Available operations, in a fixed order.
    pub links: Vec<Link>,
}
