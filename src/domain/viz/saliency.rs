//! Gradient saliency ranking for interpreter output

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::domain::DomainError;

/// Tokens highlighted when no explicit count is given
pub const DEFAULT_TOP_K: usize = 3;
/// Shades in the default colour map
pub const DEFAULT_SHADES: usize = 20;
pub const MIN_SHADES: usize = 6;
pub const MAX_SHADES: usize = 72;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenSaliency {
    pub index: usize,
    pub token: String,
    pub grad: f64,
    /// Colour shade for highlighted tokens, 0 being the most salient
    pub shade: Option<usize>,
}

impl TokenSaliency {
    pub fn is_highlighted(&self) -> bool {
        self.shade.is_some()
    }
}

/// Shade index of a gradient on a colour map with `shades` entries.
///
/// The colour map runs from most to least salient, so the gradient is
/// inverted first.
pub fn shade_index(grad: f64, shades: usize) -> usize {
    let shades = shades.clamp(MIN_SHADES, MAX_SHADES);
    let weight = 1.0 - grad;
    let idx = (weight * (shades - 1) as f64).round();
    idx.clamp(0.0, (shades - 1) as f64) as usize
}

/// Ranks tokens by gradient and marks the `top_k` largest as highlighted.
///
/// Output keeps token order. Missing gradients count as zero.
pub fn rank_saliency<S: AsRef<str>>(
    tokens: &[S],
    grads: &[f64],
    top_k: usize,
    shades: usize,
) -> Vec<TokenSaliency> {
    let mut order: Vec<usize> = (0..tokens.len()).collect();
    let grad_at = |i: usize| grads.get(i).copied().unwrap_or(0.0);
    order.sort_by(|a, b| grad_at(*b).total_cmp(&grad_at(*a)));

    let mut highlighted = vec![false; tokens.len()];
    for &i in order.iter().take(top_k) {
        highlighted[i] = true;
    }

    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let grad = grad_at(index);
            TokenSaliency {
                index,
                token: token.as_ref().to_string(),
                grad,
                shade: highlighted[index].then(|| shade_index(grad, shades)),
            }
        })
        .collect()
}

/// Interpreter response: `{"instance_1": {"grad_input_1": [...], ...}, ...}`
///
/// Token-tagging models report one `instance_N` per tagged span.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpretResponse {
    instances: BTreeMap<usize, BTreeMap<String, Value>>,
}

impl InterpretResponse {
    pub fn from_value(value: Value) -> Result<Self, DomainError> {
        let raw: BTreeMap<String, BTreeMap<String, Value>> = serde_json::from_value(value)
            .map_err(|e| {
                DomainError::unexpected_output(format!("Invalid interpreter output: {}", e))
            })?;

        let instances: BTreeMap<usize, BTreeMap<String, Value>> = raw
            .into_iter()
            .filter_map(|(key, grads)| Some((numbered(&key, "instance_")?, grads)))
            .collect();

        let first = instances.get(&1).ok_or_else(|| {
            DomainError::unexpected_output("Interpreter output is missing instance_1")
        })?;
        if !first.contains_key("grad_input_1") {
            return Err(DomainError::unexpected_output(
                "Interpreter output is missing grad_input_1",
            ));
        }

        Ok(Self { instances })
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Gradient arrays of `instance_1` in input order.
    ///
    /// The model numbers its inputs from the last one, so `grad_input_1`
    /// belongs to the final input field.
    pub fn grad_inputs(&self) -> Result<Vec<Vec<f64>>, DomainError> {
        let mut numbered_grads: Vec<(usize, Vec<f64>)> = Vec::new();

        for (key, value) in self.instances.get(&1).into_iter().flatten() {
            let Some(n) = numbered(key, "grad_input_") else {
                continue;
            };
            numbered_grads.push((n, parse_grads(key, value)?));
        }

        numbered_grads.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(numbered_grads.into_iter().map(|(_, grads)| grads).collect())
    }

    /// `grad_input_1` of every instance, ordered by instance number
    pub fn instance_gradients(&self) -> Result<Vec<Vec<f64>>, DomainError> {
        self.instances
            .iter()
            .map(|(n, grads)| {
                let value = grads.get("grad_input_1").ok_or_else(|| {
                    DomainError::unexpected_output(format!(
                        "instance_{} is missing grad_input_1",
                        n
                    ))
                })?;
                parse_grads("grad_input_1", value)
            })
            .collect()
    }
}

fn numbered(key: &str, prefix: &str) -> Option<usize> {
    key.strip_prefix(prefix)?.parse().ok()
}

fn parse_grads(key: &str, value: &Value) -> Result<Vec<f64>, DomainError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        DomainError::unexpected_output(format!("Invalid gradients in {}: {}", key, e))
    })
}
