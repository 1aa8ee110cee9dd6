//! Session domain - model selection and prediction lifecycle
//!
//! A pure reducer over a closed set of actions. Responses are matched to the
//! request that produced them by identity, so a slow superseded request can
//! never overwrite a newer result.

mod action;
mod error;
mod reducer;
mod state;

pub use action::{Action, Input, InputId, LoadRequest, Prediction, RequestId};
pub use error::SessionError;
pub use reducer::{reduce, Session};
pub use state::{Selection, State};
