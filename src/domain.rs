//! Domain labelling of problem statements.
//!
//! The label is an opaque annotation supplied by an external collaborator
//! (typically a text-classification model). It is attached to the report and
//! never influences classification or solving. Implementations are
//! constructed once by the host and injected into the
//! [`Pipeline`](crate::pipeline::Pipeline).

use std::collections::BTreeMap;

/// A capability mapping raw problem text to a domain label.
pub trait DomainClassifier: Send + Sync {
    /// Label for `text`, or `None` when the classifier has no opinion.
    fn classify(&self, text: &str) -> Option<String>;
}

/// Classifier that never labels anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDomain;

impl DomainClassifier for NoDomain {
    fn classify(&self, _text: &str) -> Option<String> {
        None
    }
}

/// Labels text by case-insensitive keyword matching.
///
/// Labels are tried in lexical order; the first label with a keyword present
/// in the text wins.
#[derive(Debug, Clone, Default)]
pub struct KeywordDomainClassifier {
    rules: BTreeMap<String, Vec<String>>,
}

impl KeywordDomainClassifier {
    pub fn new(rules: BTreeMap<String, Vec<String>>) -> Self {
        let rules = rules
            .into_iter()
            .map(|(label, keywords)| {
                let keywords: Vec<String> = keywords
                    .into_iter()
                    .map(|k| k.to_lowercase())
                    .filter(|k| !k.is_empty())
                    .collect();
                (label, keywords)
            })
            .collect();
        Self { rules }
    }

    pub fn is_empty(&self) -> bool {
        self.rules.values().all(Vec::is_empty)
    }
}

impl DomainClassifier for KeywordDomainClassifier {
    fn classify(&self, text: &str) -> Option<String> {
        let haystack = text.to_lowercase();
        self.rules
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| haystack.contains(k.as_str())))
            .map(|(label, _)| label.clone())
    }
}

impl<F> DomainClassifier for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn classify(&self, text: &str) -> Option<String> {
        self(text)
    }
}
