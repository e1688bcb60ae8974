//! Field rules for create and update payloads.
//!
//! Rules are expressed as [`validator::Validate`] impls that collect every
//! failing rule per field, so a caller sees the complete list at once.
//! Strings are trimmed first and empty strings count as absent, matching how
//! form-style clients send cleared inputs. A value of any other JSON type
//! fails the `string` rule and skips the remaining rules for that field.

use std::collections::BTreeMap;

use url::Url;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::AppError;
use crate::models::{ContentChanges, ContentDraft, ContentPatch, FieldInput, NewContent};

/// Maximum length, in characters, of the short text columns.
pub const MAX_STRING_LEN: usize = 255;

fn required(field: &str) -> ValidationError {
    ValidationError::new("required").with_message(format!("The {field} field is required.").into())
}

fn not_string(field: &str) -> ValidationError {
    ValidationError::new("string").with_message(format!("The {field} field must be a string.").into())
}

fn invalid_url(field: &str) -> ValidationError {
    ValidationError::new("url").with_message(format!("The {field} field must be a valid URL.").into())
}

fn too_long(field: &str) -> ValidationError {
    ValidationError::new("max").with_message(
        format!("The {field} field must not be greater than {MAX_STRING_LEN} characters.").into(),
    )
}

/// Trimmed text of a string input; `""` and non-strings collapse to `None`.
fn non_blank(value: Option<&FieldInput>) -> Option<&str> {
    match value {
        Some(FieldInput::Text(v)) => Some(v.trim()).filter(|v| !v.is_empty()),
        _ => None,
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok_and(|url| !url.cannot_be_a_base())
}

/// Flags a non-string value. Returns false when the field failed.
fn check_string(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FieldInput>,
) -> bool {
    if matches!(value, Some(FieldInput::NotText)) {
        errors.add(field, not_string(field));
        return false;
    }
    true
}

fn check_max(errors: &mut ValidationErrors, field: &'static str, value: Option<&str>) {
    if value.is_some_and(|v| v.chars().count() > MAX_STRING_LEN) {
        errors.add(field, too_long(field));
    }
}

/// A nullable short string: a string when sent, and within length.
fn check_optional_string(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FieldInput>,
) {
    if check_string(errors, field, value) {
        check_max(errors, field, non_blank(value));
    }
}

/// A required string: must be present, non-blank, and within length.
fn check_required_string(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&FieldInput>,
) {
    if !check_string(errors, field, value) {
        return;
    }
    match non_blank(value) {
        None => errors.add(field, required(field)),
        Some(v) => check_max(errors, field, Some(v)),
    }
}

fn check_source(errors: &mut ValidationErrors, value: Option<&FieldInput>) {
    check_required_string(errors, "source", value);
    if let Some(v) = non_blank(value)
        && !is_absolute_url(v)
    {
        errors.add("source", invalid_url("source"));
    }
}

fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn normalize(value: Option<FieldInput>) -> Option<String> {
    non_blank(value.as_ref()).map(str::to_string)
}

impl Validate for ContentDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_required_string(&mut errors, "title", self.title.as_ref());
        check_source(&mut errors, self.source.as_ref());
        check_string(&mut errors, "description", self.description.as_ref());
        check_optional_string(&mut errors, "subtitle", self.subtitle.as_ref());
        check_optional_string(&mut errors, "thumb", self.thumb.as_ref());
        into_result(errors)
    }
}

impl Validate for ContentPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        // Title and source may be omitted, but once sent they must hold a value.
        if let Some(title) = &self.title {
            check_required_string(&mut errors, "title", title.as_ref());
        }
        if let Some(source) = &self.source {
            check_source(&mut errors, source.as_ref());
        }
        if let Some(description) = &self.description {
            check_string(&mut errors, "description", description.as_ref());
        }
        if let Some(subtitle) = &self.subtitle {
            check_optional_string(&mut errors, "subtitle", subtitle.as_ref());
        }
        if let Some(thumb) = &self.thumb {
            check_optional_string(&mut errors, "thumb", thumb.as_ref());
        }
        into_result(errors)
    }
}

impl ContentDraft {
    /// Validate the draft and turn it into an insertable row.
    pub fn validated(self) -> Result<NewContent, AppError> {
        self.validate()?;
        match (normalize(self.title), normalize(self.source)) {
            (Some(title), Some(source)) => Ok(NewContent {
                title,
                source,
                description: normalize(self.description),
                subtitle: normalize(self.subtitle),
                thumb: normalize(self.thumb),
            }),
            _ => Err(AppError::Generic(
                "validated draft is missing a required field".into(),
            )),
        }
    }
}

impl ContentPatch {
    /// Validate the patch and turn it into a set of column changes.
    pub fn validated(self) -> Result<ContentChanges, AppError> {
        self.validate()?;
        Ok(ContentChanges {
            title: self.title.and_then(normalize),
            source: self.source.and_then(normalize),
            description: self.description.map(normalize),
            subtitle: self.subtitle.map(normalize),
            thumb: self.thumb.map(normalize),
        })
    }
}

/// Per-field messages, keyed and ordered by field name.
pub fn field_messages(errors: &ValidationErrors) -> BTreeMap<String, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("The {field} field is invalid ({}).", e.code),
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// One-line summary: the first message plus a count of the rest.
pub fn summarize(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = field_messages(errors).into_values().flatten().collect();
    match messages.split_first() {
        None => "The given data was invalid.".to_string(),
        Some((first, [])) => first.clone(),
        Some((first, rest)) => {
            let noun = if rest.len() == 1 { "error" } else { "errors" };
            format!("{first} (and {} more {noun})", rest.len())
        }
    }
}
