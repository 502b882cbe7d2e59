//! Required-field validation shared by every entity.
//!
//! Entities derive [`validator::Validate`] and tag each required field with
//! `#[validate(custom(function = "required"))]`. Only presence is checked: a required
//! field fails when it holds its type's zero value. No type, range, format or
//! cross-field checks are performed.

use std::fmt;

/// Values that have a well-defined "zero" (absent) state.
pub trait ZeroValue {
    fn is_zero(&self) -> bool;
}

impl<T: ZeroValue + ?Sized> ZeroValue for &T {
    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }
}

impl ZeroValue for String {
    fn is_zero(&self) -> bool {
        self.is_empty()
    }
}

impl ZeroValue for i64 {
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl ZeroValue for f64 {
    fn is_zero(&self) -> bool {
        *self == 0.0
    }
}

/// Custom rule behind the `required` tag.
pub fn required<T: ZeroValue>(value: T) -> Result<(), validator::ValidationError> {
    if value.is_zero() {
        Err(validator::ValidationError::new("required"))
    } else {
        Ok(())
    }
}

/// Ordered list of required fields that were missing on one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    entity: &'static str,
    fields: Vec<&'static str>,
}

impl ValidationErrors {
    /// Orders the violations reported by the derived validator by `fields`, the
    /// entity's required fields in declaration order, named as in the diagnostic
    /// (`LastName`).
    pub fn collect(
        entity: &'static str,
        fields: &[&'static str],
        outcome: Result<(), validator::ValidationErrors>,
    ) -> Result<(), Self> {
        let errors = match outcome {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };
        let reported = errors.errors();
        let missing: Vec<&'static str> = fields
            .iter()
            .copied()
            .filter(|field| {
                reported.contains_key(snake_case(field).as_str())
                    || reported.contains_key(camel_case(field).as_str())
            })
            .collect();
        if missing.is_empty() {
            tracing::warn!("{} failed validation on untracked fields: {}", entity, errors);
        }
        Err(Self {
            entity,
            fields: missing,
        })
    }

    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }
}

fn snake_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    for (i, c) in field.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn camel_case(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(
                f,
                "Key: '{}.{}' Error:Field validation for '{}' failed on the 'required' tag",
                self.entity, field, field
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
