//! Envelope construction for the grape collection.

use axum::http::Method;

use super::types::{Envelope, Link};

/// Path prefix of the grape collection.
pub const GRAPES_PATH: &str = "/api/v1/hateoas-grapes/";

/// Relation and method of every link on a grape response, in order.
pub const GRAPE_LINKS: [(&str, Method); 3] = [
    ("add_grape", Method::POST),
    ("get_all", Method::GET),
    ("delete_grape", Method::DELETE),
];

/// Base URL for grape links as seen by a client addressing `host`.
pub fn grapes_base_url(host: &str) -> String {
    format!("{}{}", host.trim_end_matches('/'), GRAPES_PATH)
}

/// The fixed grape links, all pointing at `base_url`.
pub fn grape_links(base_url: &str) -> Vec<Link> {
    GRAPE_LINKS
        .iter()
        .map(|(relation, method)| Link::new(base_url, *relation, method.as_str()))
        .collect()
}

/// Wrap `data` with the grape links.
pub fn to_envelope<T>(base_url: &str, data: T) -> Envelope<T> {
    Envelope {
        data,
        links: grape_links(base_url),
    }
}
