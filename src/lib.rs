pub mod compose;
pub mod config;
pub mod domain;
pub mod mail;
pub mod normalize;
pub mod store;

pub use domain::subject::{Configuration, PrefixKind, PrefixMode, PrefixToken};
pub use normalize::{SubjectNormalizer, normalize_subject};
