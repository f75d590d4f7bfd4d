//! Lease template data model and placeholder resolution
//!
//! This crate provides the template side of the lease document pipeline:
//! - Template / section data types shared with the dashboard API
//! - Bracketed-placeholder substitution (`[TENANT_NAME]` style tokens)
//! - A registry of built-in agreement templates

pub mod registry;
pub mod resolver;
pub mod template;

pub use registry::{builtin_templates, find_template, get_template};
pub use resolver::{placeholder_keys, resolve, PlaceholderValues};
pub use template::{ResolvedTemplate, Template, TemplateError, TemplateSection};
