//! The session reducer

use tracing::debug;

use super::action::Action;
use super::error::SessionError;
use super::state::{Selection, State};

enum Transition {
    Next(State),
    /// Action did not apply to the current state (stale response)
    Ignored,
}

fn transition(state: &State, action: Action) -> Result<Transition, SessionError> {
    let next = match action {
        Action::Loading { request } => State::Loading { request },

        Action::Loaded { request, models } => {
            let State::Loading { request: pending } = state else {
                return Ok(Transition::Ignored);
            };
            if pending.id != request {
                return Ok(Transition::Ignored);
            }
            State::Loaded(Selection::first(models).ok_or(SessionError::NoModels)?)
        }

        Action::LoadError { request, cause } => {
            let State::Loading { request: pending } = state else {
                return Ok(Transition::Ignored);
            };
            if pending.id != request {
                return Ok(Transition::Ignored);
            }
            State::FailedToLoad {
                request: pending.clone(),
                cause,
            }
        }

        Action::Select { model_id } => {
            let selection = state.selection().ok_or(SessionError::InvalidState {
                actual: state.name(),
            })?;
            let selection = selection
                .select(&model_id)
                .ok_or(SessionError::ModelNotFound { model_id })?;
            State::Loaded(selection)
        }

        Action::Predicting { input } => {
            let selection = state.selection().ok_or(SessionError::InvalidState {
                actual: state.name(),
            })?;
            State::Predicting {
                selection: selection.clone(),
                input,
            }
        }

        Action::ReceivedPrediction { prediction } => {
            let State::Predicting { selection, input } = state else {
                return Ok(Transition::Ignored);
            };
            if input.id != prediction.input.id {
                return Ok(Transition::Ignored);
            }
            State::HasPrediction {
                selection: selection.clone(),
                prediction,
            }
        }

        Action::PredictError { input: input_id, cause } => {
            let State::Predicting { selection, input } = state else {
                return Ok(Transition::Ignored);
            };
            if input.id != input_id {
                return Ok(Transition::Ignored);
            }
            State::FailedToPredict {
                selection: selection.clone(),
                input: input.clone(),
                cause,
            }
        }
    };

    Ok(Transition::Next(next))
}

/// Applies `action` to `state`. Stale responses leave the state unchanged.
pub fn reduce(state: &State, action: Action) -> Result<State, SessionError> {
    match transition(state, action)? {
        Transition::Next(next) => Ok(next),
        Transition::Ignored => Ok(state.clone()),
    }
}

/// Owns the current state and applies actions to it
#[derive(Debug, Clone)]
pub struct Session {
    state: State,
}

impl Session {
    pub fn new(state: State) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Applies an action. On error the state is left as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<&State, SessionError> {
        let name = action.name();
        match transition(&self.state, action)? {
            Transition::Next(next) => {
                debug!(
                    action = name,
                    from = self.state.name(),
                    to = next.name(),
                    "Session transition"
                );
                self.state = next;
            }
            Transition::Ignored => {
                debug!(action = name, state = self.state.name(), "Ignoring stale action");
            }
        }
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Model, ModelInfo};
    use crate::domain::session::{Input, LoadRequest, Prediction, RequestId};
    use serde_json::json;

    fn models(ids: &[&str]) -> Vec<Model> {
        ids.iter().map(|id| Model::new(ModelInfo::new(*id))).collect()
    }

    fn loading() -> (State, RequestId) {
        let request = LoadRequest::new(vec!["glove".to_string(), "roberta".to_string()]);
        let id = request.id;
        (State::Loading { request }, id)
    }

    fn loaded() -> State {
        let (state, id) = loading();
        reduce(
            &state,
            Action::Loaded {
                request: id,
                models: models(&["glove", "roberta"]),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_loaded_selects_first_model() {
        let state = loaded();
        assert!(state.has_models());
        assert_eq!(state.selected_model().unwrap().id(), "glove");
        assert_eq!(state.models().len(), 2);
    }

    #[test]
    fn test_loaded_with_stale_request_ignored() {
        let (state, _) = loading();
        let next = reduce(
            &state,
            Action::Loaded {
                request: RequestId::new(),
                models: models(&["glove"]),
            },
        )
        .unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_loaded_out_of_order_ignored() {
        let state = loaded();
        let selected = reduce(
            &state,
            Action::Select {
                model_id: "roberta".to_string(),
            },
        )
        .unwrap();

        let next = reduce(
            &selected,
            Action::Loaded {
                request: RequestId::new(),
                models: models(&["other"]),
            },
        )
        .unwrap();
        assert_eq!(next, selected);
        assert_eq!(next.selected_model().unwrap().id(), "roberta");
    }

    #[test]
    fn test_loaded_without_models() {
        let (state, id) = loading();
        let err = reduce(
            &state,
            Action::Loaded {
                request: id,
                models: Vec::new(),
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::NoModels);
    }

    #[test]
    fn test_load_error_for_current_request() {
        let (state, id) = loading();
        let next = reduce(
            &state,
            Action::LoadError {
                request: id,
                cause: "boom".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.name(), "FailedToLoad");
        assert_eq!(next.error(), Some("boom"));
    }

    #[test]
    fn test_load_error_for_stale_request_ignored() {
        let (state, _) = loading();
        let next = reduce(
            &state,
            Action::LoadError {
                request: RequestId::new(),
                cause: "boom".to_string(),
            },
        )
        .unwrap();
        assert!(next.is_loading());
    }

    #[test]
    fn test_select_while_loading_is_invalid() {
        let (state, _) = loading();
        let err = reduce(
            &state,
            Action::Select {
                model_id: "glove".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err, SessionError::InvalidState { actual: "Loading" });
    }

    #[test]
    fn test_select_unknown_model() {
        let err = reduce(
            &loaded(),
            Action::Select {
                model_id: "bert".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Model with id bert not found.");
    }

    #[test]
    fn test_predicting_requires_models() {
        let (state, _) = loading();
        let err = reduce(
            &state,
            Action::Predicting {
                input: Input::new(json!({"sentence": "hi"})),
            },
        )
        .unwrap_err();
        assert!(matches!(err, SessionError::InvalidState { .. }));
    }

    #[test]
    fn test_prediction_received_for_current_input() {
        let input = Input::new(json!({"sentence": "a great movie"}));
        let state = reduce(&loaded(), Action::Predicting { input: input.clone() }).unwrap();
        assert!(state.is_predicting());

        let next = reduce(
            &state,
            Action::ReceivedPrediction {
                prediction: Prediction {
                    input,
                    output: json!({"label": "pos"}),
                },
            },
        )
        .unwrap();
        assert_eq!(next.prediction().unwrap().output["label"], "pos");
        assert!(next.has_models());
    }

    #[test]
    fn test_stale_prediction_ignored() {
        let body = json!({"sentence": "same text"});
        let input_a = Input::new(body.clone());
        let input_b = Input::new(body);

        let state = reduce(&loaded(), Action::Predicting { input: input_a }).unwrap();
        let next = reduce(
            &state,
            Action::ReceivedPrediction {
                prediction: Prediction {
                    input: input_b,
                    output: json!({}),
                },
            },
        )
        .unwrap();
        assert!(next.is_predicting());
        assert!(next.prediction().is_none());
    }

    #[test]
    fn test_predict_error() {
        let input = Input::new(json!({}));
        let state = reduce(&loaded(), Action::Predicting { input: input.clone() }).unwrap();

        let stale = reduce(
            &state,
            Action::PredictError {
                input: Input::new(json!({})).id,
                cause: "late".to_string(),
            },
        )
        .unwrap();
        assert!(stale.is_predicting());

        let failed = reduce(
            &state,
            Action::PredictError {
                input: input.id,
                cause: "HTTP 500".to_string(),
            },
        )
        .unwrap();
        assert_eq!(failed.error(), Some("HTTP 500"));

        // A failed prediction can be retried
        let retry = reduce(&failed, Action::Predicting { input: Input::new(json!({})) });
        assert!(retry.unwrap().is_predicting());
    }

    #[test]
    fn test_select_after_prediction() {
        let input = Input::new(json!({}));
        let state = reduce(&loaded(), Action::Predicting { input: input.clone() }).unwrap();
        let state = reduce(
            &state,
            Action::ReceivedPrediction {
                prediction: Prediction {
                    input,
                    output: json!({}),
                },
            },
        )
        .unwrap();

        let next = reduce(
            &state,
            Action::Select {
                model_id: "roberta".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next.name(), "Loaded");
        assert_eq!(next.selected_model().unwrap().id(), "roberta");
    }

    #[test]
    fn test_session_keeps_state_on_error() {
        let (state, _) = loading();
        let mut session = Session::new(state.clone());
        assert!(session
            .dispatch(Action::Select {
                model_id: "glove".to_string()
            })
            .is_err());
        assert_eq!(session.state(), &state);
    }

    #[test]
    fn test_session_loading_restarts() {
        let mut session = Session::new(loaded());
        let request = LoadRequest::new(vec!["x".to_string()]);
        let state = session
            .dispatch(Action::Loading { request })
            .unwrap();
        assert!(state.is_loading());
    }
}
