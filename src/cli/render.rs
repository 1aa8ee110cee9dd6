//! Plain-text rendering of model output for the terminal

use std::fmt::Write;

use serde_json::Value;

use crate::domain::viz::{
    format_tokens_lenient, rank_saliency, to_hierplane_trees, FormattedToken, InterpretResponse,
    LogScale, SpanLabel, VerbPrediction, DEFAULT_SHADES,
};
use crate::domain::DomainError;

/// Slider range and gradient bounds for `--min-weight`
const WEIGHT_SLIDER: (f64, f64) = (0.0, 100.0);
const WEIGHT_VALUES: (f64, f64) = (1e-4, 1.0);

/// How a demo's prediction is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// BIO tags over words
    Tags,
    /// One tag sequence per verb
    VerbFrames,
    Json,
}

impl OutputKind {
    pub fn for_task(task_id: Option<&str>) -> Self {
        match task_id {
            Some("ner") => Self::Tags,
            Some("srl") | Some("oie") => Self::VerbFrames,
            _ => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaliencyOptions {
    pub top_k: usize,
    /// Slider position; zero disables the cut-off
    pub min_weight: f64,
}

pub fn render_prediction(
    kind: OutputKind,
    output: &Value,
    tree: bool,
) -> Result<String, DomainError> {
    match kind {
        OutputKind::Tags => render_tags(output),
        OutputKind::VerbFrames => render_frames(output, tree),
        OutputKind::Json => pretty(output),
    }
}

pub fn pretty(value: &Value) -> Result<String, DomainError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| DomainError::internal(format!("Failed to format output: {}", e)))
}

fn string_list(output: &Value, key: &str) -> Option<Vec<String>> {
    output
        .get(key)?
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}

fn spans_line(tokens: &[FormattedToken], label: impl Fn(&str) -> String) -> String {
    tokens
        .iter()
        .map(|t| match &t.entity {
            Some(entity) => format!("[{}]({})", t.text, label(entity)),
            None => t.text.clone(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_tags(output: &Value) -> Result<String, DomainError> {
    let (Some(words), Some(tags)) = (string_list(output, "words"), string_list(output, "tags"))
    else {
        return Err(DomainError::unexpected_output(
            "Tagger output needs words and tags",
        ));
    };

    let tokens = format_tokens_lenient(&tags, &words)
        .map_err(|e| DomainError::unexpected_output(e.to_string()))?;
    Ok(spans_line(&tokens, str::to_string))
}

fn render_frames(output: &Value, tree: bool) -> Result<String, DomainError> {
    let prediction: VerbPrediction = serde_json::from_value(output.clone())
        .map_err(|e| DomainError::unexpected_output(format!("Invalid verb frames: {}", e)))?;

    let mut out = String::new();
    for frame in &prediction.verbs {
        let tokens = format_tokens_lenient(&frame.tags, &prediction.words)
            .map_err(|e| DomainError::unexpected_output(e.to_string()))?;
        let line = spans_line(&tokens, |entity| SpanLabel::from_entity(entity).to_string());
        let _ = writeln!(out, "{}: {}", frame.verb, line);
    }

    if tree {
        let trees = to_hierplane_trees(&prediction)
            .map_err(|e| DomainError::unexpected_output(e.to_string()))?;
        let json = serde_json::to_string_pretty(&trees)
            .map_err(|e| DomainError::internal(format!("Failed to format trees: {}", e)))?;
        out.push_str(&json);
        out.push('\n');
    }

    Ok(out.trim_end().to_string())
}

/// Token lists of the prediction, in the order the model reads its inputs
fn input_tokens(output: &Value) -> Vec<Vec<String>> {
    const GROUPS: &[&[&str]] = &[
        &["premise_tokens", "hypothesis_tokens"],
        &["question_tokens", "passage_tokens"],
        &["tokens"],
        &["words"],
    ];

    GROUPS
        .iter()
        .find_map(|keys| {
            keys.iter()
                .map(|key| string_list(output, key))
                .collect::<Option<Vec<_>>>()
        })
        .unwrap_or_default()
}

/// Renders interpreter gradients next to the tokens of `prediction`
pub fn render_saliency(
    prediction: &Value,
    interpretation: Value,
    options: SaliencyOptions,
) -> Result<String, DomainError> {
    let response = InterpretResponse::from_value(interpretation)?;
    let mut tokens = input_tokens(prediction);

    // Tagging models interpret each tagged span over the same sentence
    let grads = if response.instance_count() > 1 && tokens.len() == 1 {
        let grads = response.instance_gradients()?;
        tokens = vec![tokens[0].clone(); grads.len()];
        grads
    } else {
        response.grad_inputs()?
    };

    if tokens.len() != grads.len() {
        return Err(DomainError::unexpected_output(format!(
            "{} gradient inputs for {} token inputs",
            grads.len(),
            tokens.len()
        )));
    }

    let min_grad = LogScale::new(WEIGHT_SLIDER, WEIGHT_VALUES).value(options.min_weight);

    let mut out = String::new();
    for (n, (tokens, grads)) in tokens.iter().zip(&grads).enumerate() {
        let _ = writeln!(out, "Input {}:", n + 1);

        for token in rank_saliency(tokens, grads, options.top_k, DEFAULT_SHADES) {
            let marker = match token.shade {
                Some(shade) if token.grad >= min_grad => format!("  * shade {}", shade),
                _ => String::new(),
            };
            let _ = writeln!(out, "  {:<20} {:>8.4}{}", token.token, token.grad, marker);
        }
    }

    Ok(out.trim_end().to_string())
}
