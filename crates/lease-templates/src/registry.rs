//! Built-in agreement templates
//!
//! Property managers start from one of these and customize per building.
//! Every embedded token is a well-formed placeholder so a fully supplied
//! value map resolves the template with nothing left over.

use crate::template::{Template, TemplateError, TemplateSection};

/// List the built-in templates.
pub fn builtin_templates() -> Vec<Template> {
    vec![residential_lease(), month_to_month()]
}

/// Look up a built-in template by exact title.
pub fn find_template(title: &str) -> Option<Template> {
    builtin_templates().into_iter().find(|t| t.title == title)
}

/// Look up a built-in template by exact title, validated and ready to
/// resolve. Callers that want to report the missing title to the user go
/// through here instead of [`find_template`].
pub fn get_template(title: &str) -> Result<Template, TemplateError> {
    let template =
        find_template(title).ok_or_else(|| TemplateError::NotFound(title.to_string()))?;
    template.validate()?;
    Ok(template)
}

fn residential_lease() -> Template {
    Template {
        title: "Residential Lease Agreement".to_string(),
        description: Some(
            "Fixed-term residential lease for [PROPERTY_ADDRESS], Unit [UNIT_NUMBER]."
                .to_string(),
        ),
        sections: vec![
            TemplateSection {
                title: "Parties".to_string(),
                content: "This lease agreement is entered into between [LANDLORD_NAME] \
                          (\"Landlord\") and [TENANT_NAME] (\"Tenant\")."
                    .to_string(),
            },
            TemplateSection {
                title: "Premises".to_string(),
                content: "Landlord leases to Tenant the premises located at \
                          [PROPERTY_ADDRESS], Unit [UNIT_NUMBER], for residential use only."
                    .to_string(),
            },
            TemplateSection {
                title: "Term".to_string(),
                content: "The lease term begins on [LEASE_START] and ends on [LEASE_END], \
                          unless terminated earlier under the terms of this agreement."
                    .to_string(),
            },
            TemplateSection {
                title: "Rent".to_string(),
                content: "Tenant shall pay rent of $[MONTHLY_RENT] per month, due on day \
                          [RENT_DUE_DAY] of each month. Payments more than [GRACE_PERIOD_DAYS] \
                          days late incur a late fee of $[LATE_FEE]."
                    .to_string(),
            },
            TemplateSection {
                title: "Security Deposit".to_string(),
                content: "Tenant has deposited $[SECURITY_DEPOSIT] as security for the \
                          faithful performance of this agreement, refundable per applicable law."
                    .to_string(),
            },
            TemplateSection {
                title: "Utilities".to_string(),
                content: "Tenant is responsible for the following utilities: [TENANT_UTILITIES]. \
                          All other utilities are paid by Landlord."
                    .to_string(),
            },
            TemplateSection {
                title: "Maintenance".to_string(),
                content: "Tenant shall keep the premises clean and report maintenance issues \
                          to [MAINTENANCE_CONTACT] promptly. Landlord remains responsible for \
                          structural repairs."
                    .to_string(),
            },
        ],
    }
}

fn month_to_month() -> Template {
    Template {
        title: "Month-to-Month Rental Agreement".to_string(),
        description: Some(
            "Rolling monthly tenancy for [PROPERTY_ADDRESS].".to_string(),
        ),
        sections: vec![
            TemplateSection {
                title: "Parties".to_string(),
                content: "This rental agreement is between [LANDLORD_NAME] and [TENANT_NAME]."
                    .to_string(),
            },
            TemplateSection {
                title: "Tenancy".to_string(),
                content: "The tenancy begins on [LEASE_START] and continues month to month \
                          until either party gives [NOTICE_DAYS] days' written notice."
                    .to_string(),
            },
            TemplateSection {
                title: "Rent".to_string(),
                content: "Rent of $[MONTHLY_RENT] is due in advance on day [RENT_DUE_DAY] \
                          of each month."
                    .to_string(),
            },
            TemplateSection {
                title: "Deposit".to_string(),
                content: "A security deposit of $[SECURITY_DEPOSIT] is held for the duration \
                          of the tenancy."
                    .to_string(),
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::PlaceholderValues;

    #[test]
    fn test_builtin_templates_not_empty() {
        let templates = builtin_templates();
        assert!(!templates.is_empty());
        assert!(templates
            .iter()
            .any(|t| t.title == "Residential Lease Agreement"));
    }

    #[test]
    fn test_every_builtin_has_sections() {
        for template in builtin_templates() {
            assert!(
                !template.sections.is_empty(),
                "template '{}' should have sections",
                template.title
            );
        }
    }

    #[test]
    fn test_find_template_by_title() {
        assert!(find_template("Month-to-Month Rental Agreement").is_some());
        assert!(find_template("No Such Template").is_none());
    }

    #[test]
    fn test_get_template_returns_validated_template() {
        let template = get_template("Residential Lease Agreement").unwrap();
        assert!(!template.sections.is_empty());
    }

    #[test]
    fn test_get_template_reports_missing_title() {
        let err = get_template("No Such Template").unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
        assert_eq!(err.to_string(), "Template not found: No Such Template");
    }

    #[test]
    fn test_builtins_resolve_cleanly_with_all_keys() {
        for template in builtin_templates() {
            let values: PlaceholderValues = template
                .placeholders()
                .into_iter()
                .map(|k| (k, "filled".to_string()))
                .collect();

            let resolved = template.resolve(&values);
            for section in &resolved.sections {
                assert!(
                    !section.content.contains('['),
                    "template '{}' section '{}' left a token unresolved: {}",
                    template.title,
                    section.title,
                    section.content
                );
            }
        }
    }

    #[test]
    fn test_residential_lease_placeholder_keys() {
        let template = find_template("Residential Lease Agreement").unwrap();
        let keys = template.placeholders();
        assert!(keys.contains(&"LANDLORD_NAME".to_string()));
        assert!(keys.contains(&"TENANT_NAME".to_string()));
        assert!(keys.contains(&"MONTHLY_RENT".to_string()));
        assert!(keys.contains(&"SECURITY_DEPOSIT".to_string()));
    }
}
