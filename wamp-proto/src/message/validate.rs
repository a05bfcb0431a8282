use std::collections::BTreeMap;

use thiserror::Error;

use crate::core::{
    id::Id,
    types::{
        Dictionary,
        List,
    },
};

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| error.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// An error encountered while validating a raw message array.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A positional slot holds a value of the wrong kind.
    #[error("Item at index {index} must be of type {expected} but was {actual}")]
    InvalidType {
        index: usize,
        expected: &'static str,
        actual: &'static str,
    },
    /// The message array is too short or too long for its type.
    #[error("Unexpected message length, must be at least {min} and at most {max}, but was {actual}")]
    UnexpectedLength {
        min: usize,
        max: usize,
        actual: usize,
    },
    /// A required key is absent from a nested details map.
    #[error("Missing required field: {0}")]
    MissingField(String),
    /// Every slot failure found in one validation pass, ordered by index.
    #[error("Validation failed: \n{}", format_errors(.0))]
    MultipleErrors(Vec<ValidationError>),
}

/// Fields extracted from a raw message array during validation.
///
/// A fresh bag is populated per parse and consumed once by the message's
/// constructor; it is never shared.
#[derive(Debug, Default)]
pub struct MessageFields {
    pub session: Option<Id>,
    pub request: Option<Id>,
    pub registration: Option<Id>,
    pub publication: Option<Id>,
    pub subscription: Option<Id>,
    pub request_type: Option<u64>,
    pub realm: Option<String>,
    pub uri: Option<String>,
    pub topic: Option<String>,
    pub reason: Option<String>,
    pub signature: Option<String>,
    pub auth_method: Option<String>,
    pub details: Option<Dictionary>,
    pub options: Option<Dictionary>,
    pub extra: Option<Dictionary>,
    pub arguments: Option<List>,
    pub arguments_keyword: Option<Dictionary>,
}

/// A validator for one positional slot of a raw message array.
pub type Validator = fn(&mut MessageFields, &List, usize) -> Result<(), ValidationError>;

/// The expected shape of one message type's raw array.
pub struct ValidationSpec {
    pub min_length: usize,
    pub max_length: usize,
    pub validators: BTreeMap<usize, Validator>,
}

/// Validates the length of a raw message array.
pub fn sanity_check(message: &List, min_length: usize, max_length: usize) -> Result<(), ValidationError> {
    let length = message.len();
    if length < min_length || length > max_length {
        return Err(ValidationError::UnexpectedLength {
            min: min_length,
            max: max_length,
            actual: length,
        });
    }
    Ok(())
}

/// Validates one slot as an ID, in the range `[0, 2^53)`.
pub fn validate_id(message: &List, index: usize) -> Result<Id, ValidationError> {
    let value = &message[index];
    let value = value.uint().ok_or(ValidationError::InvalidType {
        index,
        expected: "uint",
        actual: value.kind(),
    })?;
    Id::try_from(value).map_err(|_| ValidationError::InvalidType {
        index,
        expected: "uint",
        actual: "out-of-range uint",
    })
}

/// Validates one slot as a string.
pub fn validate_string(message: &List, index: usize) -> Result<&str, ValidationError> {
    let value = &message[index];
    value.string().ok_or(ValidationError::InvalidType {
        index,
        expected: "string",
        actual: value.kind(),
    })
}

/// Validates one slot as a list.
pub fn validate_array(message: &List, index: usize) -> Result<&List, ValidationError> {
    let value = &message[index];
    value.list().ok_or(ValidationError::InvalidType {
        index,
        expected: "list",
        actual: value.kind(),
    })
}

/// Validates one slot as a dictionary.
pub fn validate_map(message: &List, index: usize) -> Result<&Dictionary, ValidationError> {
    let value = &message[index];
    value.dictionary().ok_or(ValidationError::InvalidType {
        index,
        expected: "dictionary",
        actual: value.kind(),
    })
}

pub fn validate_session(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.session = Some(validate_id(message, index)?);
    Ok(())
}

pub fn validate_request(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.request = Some(validate_id(message, index)?);
    Ok(())
}

pub fn validate_registration(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.registration = Some(validate_id(message, index)?);
    Ok(())
}

pub fn validate_publication(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.publication = Some(validate_id(message, index)?);
    Ok(())
}

pub fn validate_subscription(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.subscription = Some(validate_id(message, index)?);
    Ok(())
}

pub fn validate_request_type(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.request_type = Some(validate_id(message, index)?.into());
    Ok(())
}

pub fn validate_realm(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.realm = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_uri(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.uri = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_topic(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.topic = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_reason(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.reason = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_signature(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.signature = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_auth_method(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.auth_method = Some(validate_string(message, index)?.to_owned());
    Ok(())
}

pub fn validate_details(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.details = Some(validate_map(message, index)?.clone());
    Ok(())
}

pub fn validate_options(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.options = Some(validate_map(message, index)?.clone());
    Ok(())
}

pub fn validate_extra(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.extra = Some(validate_map(message, index)?.clone());
    Ok(())
}

pub fn validate_arguments(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.arguments = Some(validate_array(message, index)?.clone());
    Ok(())
}

pub fn validate_arguments_keyword(fields: &mut MessageFields, message: &List, index: usize) -> Result<(), ValidationError> {
    fields.arguments_keyword = Some(validate_map(message, index)?.clone());
    Ok(())
}

/// Validates a raw message array against a spec, accumulating every slot
/// failure rather than stopping at the first.
///
/// Validators mapped past the end of the array are skipped, so optional
/// trailing slots are only checked when present.
pub fn validate_message(message: &List, spec: &ValidationSpec) -> Result<MessageFields, ValidationError> {
    sanity_check(message, spec.min_length, spec.max_length)?;

    let mut fields = MessageFields::default();
    let mut errors = Vec::new();

    for (index, validator) in &spec.validators {
        if *index >= message.len() {
            continue;
        }
        if let Err(error) = validator(&mut fields, message, *index) {
            errors.push(error);
        }
    }

    if !errors.is_empty() {
        return Err(ValidationError::MultipleErrors(errors));
    }

    Ok(fields)
}
