//! Request bodies and query strings accepted by the person API.

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::domain::types::TypeConstraintError;

pub mod person;
pub mod search;

#[derive(Debug, Error)]
/// Errors that can occur when processing request data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid {field}: {source}")]
    Field {
        field: &'static str,
        source: TypeConstraintError,
    },
}

impl FormError {
    pub fn field(field: &'static str) -> impl FnOnce(TypeConstraintError) -> Self {
        move |source| FormError::Field { field, source }
    }
}

/// One failed field rule, reported back to the caller.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Flattens nested validator output into `field` / `list[0].field` paths,
/// sorted by path. Field names use the camelCase spelling of the JSON body.
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect_field_errors(errors, None, &mut out);
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

fn collect_field_errors(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let field = camel_case(field);
        let path = match prefix {
            Some(prefix) => format!("{prefix}.{field}"),
            None => field,
        };
        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                out.extend(field_errors.iter().map(|err| FieldError {
                    field: path.clone(),
                    message: err
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| err.code.to_string()),
                }));
            }
            ValidationErrorsKind::Struct(inner) => {
                collect_field_errors(inner, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect_field_errors(inner, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
