//! Permalink domain - shareable snapshots of submitted inputs

mod entity;
mod repository;
mod slug;

pub use entity::{NewPermalink, Permalink};
pub use repository::PermalinkRepository;
pub use slug::{int_to_slug, parse_slug, slug_to_int, SlugError};

#[cfg(test)]
pub use repository::MockPermalinkRepository;
