//! Template data model

use crate::resolver::{placeholder_keys, resolve, PlaceholderValues};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template has no sections: {0}")]
    Empty(String),
}

/// One titled block of lease text, possibly containing placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    pub title: String,
    pub content: String,
}

/// A named, ordered set of sections with embedded placeholder tokens.
///
/// Immutable once handed to the resolver; section order is preserved in
/// resolved output and in the assembled document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<TemplateSection>,
}

/// A template with every placeholder pass completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTemplate {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub sections: Vec<TemplateSection>,
}

impl Template {
    /// Reject templates that cannot produce a document.
    ///
    /// A template with no sections would resolve and assemble to a page
    /// with nothing but signature lines, so it is refused up front.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.sections.is_empty() {
            return Err(TemplateError::Empty(self.title.clone()));
        }
        Ok(())
    }

    /// Resolve the description and every section against `values`.
    ///
    /// Pure and deterministic: identical inputs always produce identical
    /// resolved output.
    pub fn resolve(&self, values: &PlaceholderValues) -> ResolvedTemplate {
        ResolvedTemplate {
            title: self.title.clone(),
            description: self.description.as_deref().map(|d| resolve(d, values)),
            sections: self
                .sections
                .iter()
                .map(|s| TemplateSection {
                    title: s.title.clone(),
                    content: resolve(&s.content, values),
                })
                .collect(),
        }
    }

    /// All placeholder keys used anywhere in this template, in first-use
    /// order, de-duplicated across sections.
    pub fn placeholders(&self) -> Vec<String> {
        let mut keys = Vec::new();
        let mut push_from = |text: &str| {
            for key in placeholder_keys(text) {
                if !keys.contains(&key) {
                    keys.push(key);
                }
            }
        };
        if let Some(desc) = &self.description {
            push_from(desc);
        }
        for section in &self.sections {
            push_from(&section.content);
        }
        keys
    }

    /// Keys that would remain unresolved given `values`. Used by the
    /// preview screen to warn about partially filled templates.
    pub fn unresolved_keys(&self, values: &PlaceholderValues) -> Vec<String> {
        self.placeholders()
            .into_iter()
            .filter(|k| !values.contains_key(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lease_template() -> Template {
        Template {
            title: "Lease".to_string(),
            description: Some("Agreement for [PROPERTY_ADDRESS]".to_string()),
            sections: vec![
                TemplateSection {
                    title: "Rent".to_string(),
                    content: "Pay $[RENT] monthly".to_string(),
                },
                TemplateSection {
                    title: "Term".to_string(),
                    content: "[LEASE_START] through [LEASE_END]".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_resolve_template_sections() {
        let mut values = PlaceholderValues::new();
        values.insert("RENT".to_string(), "1200".to_string());

        let resolved = lease_template().resolve(&values);
        assert_eq!(resolved.sections[0].content, "Pay $1200 monthly");
        // Missing keys stay in place.
        assert_eq!(
            resolved.sections[1].content,
            "[LEASE_START] through [LEASE_END]"
        );
    }

    #[test]
    fn test_resolve_preserves_section_order() {
        let resolved = lease_template().resolve(&PlaceholderValues::new());
        let titles: Vec<_> = resolved.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Rent", "Term"]);
    }

    #[test]
    fn test_resolve_description() {
        let mut values = PlaceholderValues::new();
        values.insert("PROPERTY_ADDRESS".to_string(), "12 Main St".to_string());

        let resolved = lease_template().resolve(&values);
        assert_eq!(resolved.description.as_deref(), Some("Agreement for 12 Main St"));
    }

    #[test]
    fn test_placeholders_across_sections() {
        assert_eq!(
            lease_template().placeholders(),
            vec!["PROPERTY_ADDRESS", "RENT", "LEASE_START", "LEASE_END"]
        );
    }

    #[test]
    fn test_unresolved_keys() {
        let mut values = PlaceholderValues::new();
        values.insert("RENT".to_string(), "1200".to_string());
        values.insert("LEASE_START".to_string(), "2026-09-01".to_string());

        assert_eq!(
            lease_template().unresolved_keys(&values),
            vec!["PROPERTY_ADDRESS", "LEASE_END"]
        );
    }

    #[test]
    fn test_validate_rejects_sectionless_template() {
        let template = Template {
            title: "Blank".to_string(),
            description: None,
            sections: Vec::new(),
        };
        let err = template.validate().unwrap_err();
        assert!(matches!(err, TemplateError::Empty(_)));
        assert_eq!(err.to_string(), "Template has no sections: Blank");
    }

    #[test]
    fn test_validate_accepts_template_with_sections() {
        assert!(lease_template().validate().is_ok());
    }

    #[test]
    fn test_template_roundtrips_through_json() {
        let template = lease_template();
        let json = serde_json::to_string(&template).unwrap();
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back, template);
    }
}
