//! Catalog domain - model cards and task descriptions

mod repository;

pub use repository::CatalogRepository;

#[cfg(test)]
pub use repository::MockCatalogRepository;
