//! Prediction domain - forwarding model work to upstream model servers

mod action;
mod backend;

pub use action::ModelAction;
pub use backend::ModelBackend;

#[cfg(test)]
pub use backend::MockModelBackend;
