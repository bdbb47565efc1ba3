//! HATEOAS envelopes: response data plus the links that apply to it.

pub mod builder;
pub mod types;

pub use builder::{grape_links, grapes_base_url, to_envelope, GRAPES_PATH};
pub use types::{Envelope, Link};
