//! BIO / BIOUL tag sequence decoding

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A run of text, highlighted when it carries an entity label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedToken {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
}

impl FormattedToken {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity: None,
        }
    }

    pub fn labeled(text: impl Into<String>, entity: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            entity: Some(entity.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagDecodeError {
    #[error("Invalid token sequence at {index}: \"I\" can only appear after a \"B\" or an \"I\"")]
    OrphanInside { index: usize },

    #[error("Tag count {tags} does not match word count {words}")]
    LengthMismatch { tags: usize, words: usize },
}

/// Decodes a tag sequence into display spans, rejecting an `I-` tag that has
/// no open span.
pub fn format_tokens<S, W>(tags: &[S], words: &[W]) -> Result<Vec<FormattedToken>, TagDecodeError>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    decode(tags, words, true)
}

/// Same as [`format_tokens`] but an orphan `I-` tag is dropped.
pub fn format_tokens_lenient<S, W>(
    tags: &[S],
    words: &[W],
) -> Result<Vec<FormattedToken>, TagDecodeError>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    decode(tags, words, false)
}

fn label(tag: &str) -> String {
    tag.get(2..).unwrap_or_default().to_string()
}

fn decode<S, W>(
    tags: &[S],
    words: &[W],
    strict: bool,
) -> Result<Vec<FormattedToken>, TagDecodeError>
where
    S: AsRef<str>,
    W: AsRef<str>,
{
    if tags.len() != words.len() {
        return Err(TagDecodeError::LengthMismatch {
            tags: tags.len(),
            words: words.len(),
        });
    }

    let mut out = Vec::with_capacity(tags.len());
    let mut open: Option<FormattedToken> = None;

    for (index, (tag, word)) in tags.iter().zip(words).enumerate() {
        let tag = tag.as_ref();
        let word = word.as_ref();

        if tag == "O" {
            out.extend(open.take());
            out.push(FormattedToken::plain(word));
            continue;
        }

        match tag.chars().next() {
            Some('U') => {
                out.extend(open.take());
                out.push(FormattedToken::labeled(word, label(tag)));
            }
            Some('B') => {
                out.extend(open.take());
                open = Some(FormattedToken::labeled(word, label(tag)));
            }
            Some('I') => match open.as_mut() {
                Some(span) => {
                    span.text.push(' ');
                    span.text.push_str(word);
                }
                None if strict => return Err(TagDecodeError::OrphanInside { index }),
                None => {}
            },
            Some('L') => {
                // The label captured at `B` wins over the one on `L`
                if let Some(mut span) = open.take() {
                    span.text.push(' ');
                    span.text.push_str(word);
                    out.push(span);
                }
            }
            _ => {}
        }
    }

    out.extend(open.take());
    Ok(out)
}
