//! Catalog infrastructure - model cards and task cards loaded from JSON files

mod file_repository;

pub use file_repository::FileCatalogRepository;
