//! Demo domain - the static registry of demo pages

mod legacy;
mod registry;

pub use legacy::is_legacy_permalink;
pub use registry::{
    demo_by_path, demo_by_task, demos, groups, known_model_ids, DemoConfig, DemoGroup, DemoStatus,
    DEMOS, DEMO_GROUPS, STANDALONE_MODEL_IDS,
};
