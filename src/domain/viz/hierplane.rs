//! Verb-argument trees for SRL and Open IE predictions
//!
//! Each verb frame becomes one tree: the predicate is the root, labelled
//! argument spans are its children, and `R-X` / `C-X` spans hang off the
//! argument they refer to. Offsets are character positions into
//! `words.join(" ")` with an exclusive end.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::labels::{attribute_display_label, NodeType};

/// One verb and its per-token tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbFrame {
    pub verb: String,
    #[serde(default)]
    pub description: String,
    pub tags: Vec<String>,
}

/// Output of the SRL and Open IE models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerbPrediction {
    pub words: Vec<String>,
    pub verbs: Vec<VerbFrame>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanType {
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span_type: Option<SpanType>,
}

impl Span {
    fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            span_type: None,
        }
    }

    fn ignored(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            span_type: Some(SpanType::Ignored),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub word: String,
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    pub spans: Vec<Span>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierplaneTree {
    pub text: String,
    pub root: Node,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("No predicate (B-V tag) found for verb '{verb}'")]
    MissingPredicate { verb: String },

    #[error("Verb '{verb}' has {tags} tags for {words} words")]
    LengthMismatch {
        verb: String,
        tags: usize,
        words: usize,
    },
}

/// Where the most recently opened child lives, so `I-` tags can extend it
enum OpenChild {
    Top(usize),
    Attached(String, usize),
}

/// Builds one tree per verb, in verb order, leaving out trees whose root has
/// no children.
pub fn to_hierplane_trees(prediction: &VerbPrediction) -> Result<Vec<HierplaneTree>, TreeError> {
    let text = prediction.words.join(" ");
    let starts = word_starts(&prediction.words);

    let mut trees = Vec::with_capacity(prediction.verbs.len());
    for frame in &prediction.verbs {
        let tree = build_tree(&text, &prediction.words, &starts, frame)?;
        if !tree.root.children.is_empty() {
            trees.push(tree);
        }
    }

    Ok(trees)
}

fn word_starts(words: &[String]) -> Vec<usize> {
    let mut starts = Vec::with_capacity(words.len());
    let mut offset = 0;
    for word in words {
        starts.push(offset);
        offset += word.chars().count() + 1;
    }
    starts
}

fn build_tree(
    text: &str,
    words: &[String],
    starts: &[usize],
    frame: &VerbFrame,
) -> Result<HierplaneTree, TreeError> {
    if frame.tags.len() != words.len() {
        return Err(TreeError::LengthMismatch {
            verb: frame.verb.clone(),
            tags: frame.tags.len(),
            words: words.len(),
        });
    }

    let verb_idx = frame
        .tags
        .iter()
        .position(|t| t == "B-V")
        .ok_or_else(|| TreeError::MissingPredicate {
            verb: frame.verb.clone(),
        })?;

    let mut predicate = words[verb_idx].clone();
    let mut predicate_last = verb_idx;
    let mut ignored: Vec<Span> = Vec::new();
    let mut children: Vec<Node> = Vec::new();
    let mut by_arg: HashMap<String, Vec<Node>> = HashMap::new();
    let mut open: Option<OpenChild> = None;

    for (idx, tag) in frame.tags.iter().enumerate() {
        let word = &words[idx];
        let start = starts[idx];
        let end = start + word.chars().count();

        if tag == "O" {
            open = None;
            let continues_run = idx > 0 && frame.tags[idx - 1] == "O";
            match ignored.last_mut() {
                Some(last) if continues_run => last.end = end,
                _ => {
                    ignored.push(Span::ignored(start, end));
                }
            }
        } else if tag == "I-V" {
            // Only tokens directly after the predicate extend it
            if idx == predicate_last + 1 {
                predicate.push(' ');
                predicate.push_str(word);
                predicate_last = idx;
            }
        } else if tag == "B-V" {
            open = None;
        } else if let Some(label) = tag.strip_prefix("B-") {
            let mut parts = label.split('-');
            let tag_label = parts.next().unwrap_or_default();
            let attr = parts.next();

            let node_type = NodeType::from_tag_label(tag_label, false);
            let attribute = match node_type {
                NodeType::Argument => Some(tag_label.to_string()),
                _ => attr
                    .and_then(attribute_display_label)
                    .map(str::to_string),
            };

            let child = Node {
                word: word.clone(),
                node_type: node_type.to_string(),
                link: Some(node_type.to_string()),
                attributes: attribute.into_iter().collect(),
                spans: vec![Span::new(start, end)],
                children: Vec::new(),
            };

            match (attr, &node_type) {
                (Some(attr), NodeType::Reference | NodeType::Continuation) => {
                    let attached = by_arg.entry(attr.to_string()).or_default();
                    attached.push(child);
                    open = Some(OpenChild::Attached(attr.to_string(), attached.len() - 1));
                }
                _ => {
                    children.push(child);
                    open = Some(OpenChild::Top(children.len() - 1));
                }
            }
        } else if tag.starts_with("I-") {
            let node = match &open {
                Some(OpenChild::Top(i)) => children.get_mut(*i),
                Some(OpenChild::Attached(arg, i)) => {
                    by_arg.get_mut(arg).and_then(|nodes| nodes.get_mut(*i))
                }
                None => None,
            };
            if let Some(node) = node {
                node.word.push(' ');
                node.word.push_str(word);
                if let Some(span) = node.spans.first_mut() {
                    span.end = end;
                }
            }
        }
    }

    for child in children.iter_mut() {
        if child.node_type != NodeType::Argument.as_str() {
            continue;
        }
        if let Some(attached) = child.attributes.first().and_then(|a| by_arg.remove(a)) {
            child.children = attached;
        }
    }

    let end = starts[predicate_last] + words[predicate_last].chars().count();
    let mut spans = vec![Span::new(starts[verb_idx], end)];
    spans.extend(ignored);

    Ok(HierplaneTree {
        text: text.to_string(),
        root: Node {
            word: predicate,
            node_type: "V".to_string(),
            link: None,
            attributes: vec!["VERB".to_string()],
            spans,
            children,
        },
    })
}
