//! Demo registry
//!
//! Every demo page is listed here explicitly; adding a demo means adding an
//! entry to [`DEMOS`].

use std::collections::BTreeSet;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DemoStatus {
    Active,
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    pub path: &'static str,
    pub title: &'static str,
    pub group: &'static str,
    pub order: u32,
    pub model_ids: &'static [&'static str],
    pub status: DemoStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<&'static str>,
}

impl DemoConfig {
    pub fn is_active(&self) -> bool {
        self.status == DemoStatus::Active
    }

    pub fn has_model(&self, model_id: &str) -> bool {
        self.model_ids.contains(&model_id)
    }

    /// Model selected when none is requested
    pub fn default_model(&self) -> Option<&'static str> {
        self.model_ids.first().copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DemoGroup {
    pub label: &'static str,
}

pub const DEMO_GROUPS: &[DemoGroup] = &[
    DemoGroup { label: "Answer a question" },
    DemoGroup { label: "Annotate a sentence" },
    DemoGroup { label: "Annotate a passage" },
    DemoGroup { label: "Semantic parsing" },
    DemoGroup { label: "Other" },
    DemoGroup { label: "Contributing" },
];

pub const DEMOS: &[DemoConfig] = &[
    DemoConfig {
        path: "/reading-comprehension",
        title: "Reading Comprehension",
        group: "Answer a question",
        order: 1,
        model_ids: &["bidaf-elmo", "bidaf", "nmn", "transformer-qa", "naqanet"],
        status: DemoStatus::Hidden,
        task_id: Some("rc"),
    },
    DemoConfig {
        path: "/visual-question-answering",
        title: "Visual Question Answering",
        group: "Answer a question",
        order: 2,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: Some("vqa"),
    },
    DemoConfig {
        path: "/named-entity-recognition",
        title: "Named Entity Recognition",
        group: "Annotate a sentence",
        order: 1,
        model_ids: &["named-entity-recognition", "fine-grained-ner"],
        status: DemoStatus::Hidden,
        task_id: Some("ner"),
    },
    DemoConfig {
        path: "/open-information-extraction",
        title: "Open Information Extraction",
        group: "Annotate a sentence",
        order: 2,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: Some("oie"),
    },
    DemoConfig {
        path: "/sentiment-analysis",
        title: "Sentiment Analysis",
        group: "Annotate a sentence",
        order: 3,
        model_ids: &["glove-sentiment-analysis", "roberta-sentiment-analysis"],
        status: DemoStatus::Active,
        task_id: Some("sentiment-analysis"),
    },
    DemoConfig {
        path: "/dependency-parsing",
        title: "Dependency Parsing",
        group: "Annotate a sentence",
        order: 4,
        model_ids: &["dependency-parser"],
        status: DemoStatus::Active,
        task_id: Some("dependency-parsing"),
    },
    DemoConfig {
        path: "/constituency-parsing",
        title: "Constituency Parsing",
        group: "Annotate a sentence",
        order: 5,
        model_ids: &["constituency-parser"],
        status: DemoStatus::Active,
        task_id: Some("constituency-parsing"),
    },
    DemoConfig {
        path: "/semantic-role-labeling",
        title: "Semantic Role Labeling",
        group: "Annotate a sentence",
        order: 6,
        model_ids: &["semantic-role-labeling"],
        status: DemoStatus::Active,
        task_id: Some("srl"),
    },
    DemoConfig {
        path: "/coreference-resolution",
        title: "Coreference Resolution",
        group: "Annotate a passage",
        order: 1,
        model_ids: &["coreference-resolution"],
        status: DemoStatus::Active,
        task_id: Some("coref"),
    },
    DemoConfig {
        path: "/textual-entailment",
        title: "Textual Entailment",
        group: "Compare two sentences",
        order: 1,
        model_ids: &["elmo-snli", "roberta-snli", "roberta-mnli"],
        status: DemoStatus::Active,
        task_id: Some("textual_entailment"),
    },
    DemoConfig {
        path: "/evaluate-reading-comprehension",
        title: "Evaluate Reading Comprehension",
        group: "Compare two sentences",
        order: 2,
        model_ids: &["lerc"],
        status: DemoStatus::Active,
        task_id: Some("evaluate_rc"),
    },
    DemoConfig {
        path: "/next-token-lm",
        title: "Language Modeling",
        group: "Generate a passage",
        order: 2,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
    DemoConfig {
        path: "/wikitables-parser",
        title: "WikiTables Semantic Parsing",
        group: "Semantic parsing",
        order: 1,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
    DemoConfig {
        path: "/nlvr-parser",
        title: "Cornell NLVR Semantic Parsing",
        group: "Semantic parsing",
        order: 2,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
    DemoConfig {
        path: "/atis-parser",
        title: "Text to SQL (ATIS)",
        group: "Semantic parsing",
        order: 3,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
    DemoConfig {
        path: "/masked-lm",
        title: "Masked Language Modeling",
        group: "Other",
        order: 3,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
    DemoConfig {
        path: "/user-models",
        title: "User Contributed Models",
        group: "Contributing",
        order: 1,
        model_ids: &[],
        status: DemoStatus::Hidden,
        task_id: None,
    },
];

/// Models served without a demo page of their own
pub const STANDALONE_MODEL_IDS: &[&str] = &[
    "next-token-lm",
    "masked-lm",
    "open-information-extraction",
    "binary-gender-bias-mitigated-roberta-snli",
    "vilbert-vqa",
];

pub fn demos() -> &'static [DemoConfig] {
    DEMOS
}

pub fn groups() -> &'static [DemoGroup] {
    DEMO_GROUPS
}

/// Looks a demo up by path, with or without the leading slash
pub fn demo_by_path(path: &str) -> Option<&'static DemoConfig> {
    let path = path.trim_start_matches('/').trim_end_matches('/');
    DEMOS
        .iter()
        .find(|d| d.path.trim_start_matches('/') == path)
}

pub fn demo_by_task(task_id: &str) -> Option<&'static DemoConfig> {
    DEMOS.iter().find(|d| d.task_id == Some(task_id))
}

/// Every model id the gateway knows how to route
pub fn known_model_ids() -> BTreeSet<&'static str> {
    DEMOS
        .iter()
        .flat_map(|d| d.model_ids.iter().copied())
        .chain(STANDALONE_MODEL_IDS.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::validate_model_id;

    #[test]
    fn test_lookup_by_path() {
        let demo = demo_by_path("sentiment-analysis").unwrap();
        assert_eq!(demo.title, "Sentiment Analysis");
        assert_eq!(demo.default_model(), Some("glove-sentiment-analysis"));
        assert!(demo_by_path("/sentiment-analysis/").is_some());
        assert!(demo_by_path("nope").is_none());
    }

    #[test]
    fn test_lookup_by_task() {
        assert_eq!(demo_by_task("srl").unwrap().path, "/semantic-role-labeling");
        assert!(demo_by_task("Unknown").is_none());
    }

    #[test]
    fn test_paths_unique() {
        let paths: BTreeSet<&str> = DEMOS.iter().map(|d| d.path).collect();
        assert_eq!(paths.len(), DEMOS.len());
    }

    #[test]
    fn test_known_model_ids_are_valid() {
        let ids = known_model_ids();
        assert!(ids.contains("bidaf"));
        assert!(ids.contains("vilbert-vqa"));
        for id in ids {
            assert!(validate_model_id(id).is_ok(), "{}", id);
        }
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(demo_by_path("textual-entailment").unwrap()).unwrap();
        assert_eq!(json["modelIds"][1], "roberta-snli");
        assert_eq!(json["taskId"], "textual_entailment");
        assert_eq!(json["status"], "active");
    }
}
