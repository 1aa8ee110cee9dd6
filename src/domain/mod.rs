//! Domain layer - Core entities, pure transforms and repository traits

pub mod cache;
pub mod catalog;
pub mod demo;
pub mod error;
pub mod model;
pub mod permalink;
pub mod prediction;
pub mod session;
pub mod viz;

pub use cache::{body_digest, Cache, CacheExt, CacheKeyParams, ResponseKeyGenerator};
pub use catalog::CatalogRepository;
pub use demo::{demo_by_path, is_legacy_permalink, known_model_ids, DemoConfig, DemoStatus};
pub use error::DomainError;
pub use model::{
    model_card_id, AttackerId, InterpreterId, Model, ModelCard, ModelId, ModelInfo, TaskCard,
};
pub use permalink::{int_to_slug, slug_to_int, NewPermalink, Permalink, PermalinkRepository};
pub use prediction::{ModelAction, ModelBackend};
pub use session::{Action, Session, SessionError, State};
