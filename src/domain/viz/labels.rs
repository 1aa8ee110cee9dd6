//! Semantic role label tables shared by the tree builder and span renderers

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static NUMBERED_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"ARG\d+").unwrap());

/// Human readable name of an `ARGM` sub-label such as `TMP`
pub fn attribute_display_label(attr: &str) -> Option<&'static str> {
    let label = match attr {
        "PRP" => "Purpose",
        "COM" => "Comitative",
        "LOC" => "Location",
        "DIR" => "Direction",
        "GOL" => "Goal",
        "MNR" => "Manner",
        "TMP" => "Temporal",
        "EXT" => "Extent",
        "REC" => "Reciprocal",
        "PRD" => "Secondary Predication",
        "CAU" => "Cause",
        "DIS" => "Discourse",
        "MOD" => "Modal",
        "NEG" => "Negation",
        "DSP" => "Direct Speech",
        "LVB" => "Light Verb",
        "ADV" => "Adverbial",
        "ADJ" => "Adjectival",
        "PNC" => "Purpose not cause",
        _ => return None,
    };
    Some(label)
}

/// Category of a node in a verb tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeType {
    Modifier,
    Argument,
    Reference,
    Continuation,
    Verb,
    /// Any label without a fixed category keeps its own name
    Other(String),
}

impl NodeType {
    /// Maps the leading part of an entity label (`ARGM`, `ARG0`, `R`, ...) to
    /// its node type. `V` is only recognised when `allow_verb` is set since
    /// the tree builder treats predicates separately.
    pub fn from_tag_label(label: &str, allow_verb: bool) -> Self {
        match label {
            "ARGM" => Self::Modifier,
            "ARGA" => Self::Argument,
            "R" => Self::Reference,
            "C" => Self::Continuation,
            "V" if allow_verb => Self::Verb,
            l if NUMBERED_ARG.is_match(l) => Self::Argument,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Modifier => "modifier",
            Self::Argument => "argument",
            Self::Reference => "reference",
            Self::Continuation => "continuation",
            Self::Verb => "verb",
            Self::Other(label) => label,
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a highlighted SRL / Open IE span, e.g. `modifier-Temporal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanLabel {
    pub node_type: NodeType,
    pub attribute: Option<String>,
}

impl SpanLabel {
    /// Classifies an entity such as `ARG0`, `ARGM-TMP`, `R-ARG1` or `V`.
    ///
    /// Arguments carry their number (`argument-0`); other categories carry the
    /// display name of their sub-label when it has one.
    pub fn from_entity(entity: &str) -> Self {
        let mut parts = entity.split('-');
        let tag_label = parts.next().unwrap_or_default();
        let attr = parts.next();

        let node_type = NodeType::from_tag_label(tag_label, true);
        let attribute = match (&node_type, attr) {
            (NodeType::Argument, _) => {
                let number = tag_label.get(3..).unwrap_or_default();
                (!number.is_empty()).then(|| number.to_string())
            }
            (_, Some(attr)) => attribute_display_label(attr).map(str::to_string),
            _ => None,
        };

        Self {
            node_type,
            attribute,
        }
    }
}

impl fmt::Display for SpanLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.attribute {
            Some(attribute) => write!(f, "{}-{}", self.node_type, attribute),
            None => write!(f, "{}", self.node_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_table() {
        assert_eq!(attribute_display_label("TMP"), Some("Temporal"));
        assert_eq!(attribute_display_label("PNC"), Some("Purpose not cause"));
        assert_eq!(attribute_display_label("XYZ"), None);
    }

    #[test]
    fn test_node_type_mapping() {
        assert_eq!(NodeType::from_tag_label("ARGM", false), NodeType::Modifier);
        assert_eq!(NodeType::from_tag_label("ARGA", false), NodeType::Argument);
        assert_eq!(NodeType::from_tag_label("ARG12", false), NodeType::Argument);
        assert_eq!(NodeType::from_tag_label("R", false), NodeType::Reference);
        assert_eq!(NodeType::from_tag_label("C", false), NodeType::Continuation);
        assert_eq!(
            NodeType::from_tag_label("V", false),
            NodeType::Other("V".to_string())
        );
        assert_eq!(NodeType::from_tag_label("V", true), NodeType::Verb);
    }

    #[test]
    fn test_span_labels() {
        assert_eq!(SpanLabel::from_entity("ARG0").to_string(), "argument-0");
        assert_eq!(
            SpanLabel::from_entity("ARGM-TMP").to_string(),
            "modifier-Temporal"
        );
        assert_eq!(SpanLabel::from_entity("R-ARG1").to_string(), "reference");
        assert_eq!(SpanLabel::from_entity("C-ARG1").to_string(), "continuation");
        assert_eq!(SpanLabel::from_entity("V").to_string(), "verb");
        assert_eq!(SpanLabel::from_entity("ARGA").to_string(), "argument-A");
    }
}
