use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::FormsConfig;

/// Per-field validation messages, keyed by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Lifecycle of a form within one request.
///
/// `Initial` moves to `FormDisplayed` for a plain GET and to `Validating` for
/// a submission. Validation ends in `Persisted` or `Rejected`; a rejected form
/// is re-rendered and the next submission starts again at `Validating`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    #[default]
    Initial,
    FormDisplayed,
    Validating,
    Persisted,
    Rejected,
}

impl FormState {
    pub fn on_request(self, submitted: bool) -> Self {
        match self {
            FormState::Initial | FormState::Rejected if submitted => FormState::Validating,
            FormState::Initial => FormState::FormDisplayed,
            other => other,
        }
    }

    pub fn on_validated(self, valid: bool) -> Self {
        match self {
            FormState::Validating if valid => FormState::Persisted,
            FormState::Validating => FormState::Rejected,
            other => other,
        }
    }
}

/// Raw field values of a form, able to clean themselves into a typed value
pub trait FormData: Clone + Default + Serialize {
    type Cleaned;

    fn clean(&self, limits: &FormsConfig) -> Result<Self::Cleaned, FieldErrors>;
}

/// Raw input plus validation errors, ready to hand to a template
#[derive(Debug, Clone, Serialize)]
pub struct Form<T> {
    pub data: T,
    pub errors: FieldErrors,
    pub state: FormState,
}

impl<T: FormData> Form<T> {
    /// Empty form for a non-submission request
    pub fn blank() -> Self {
        Self {
            data: T::default(),
            errors: FieldErrors::new(),
            state: FormState::Initial.on_request(false),
        }
    }

    /// Form pre-populated from an existing record, for edit pages
    pub fn bind(existing: T) -> Self {
        Self {
            data: existing,
            errors: FieldErrors::new(),
            state: FormState::Initial.on_request(false),
        }
    }

    /// Form holding submitted data that has not been validated yet
    pub fn submitted(data: T) -> Self {
        Self {
            data,
            errors: FieldErrors::new(),
            state: FormState::Initial.on_request(true),
        }
    }

    /// Validate the raw input. Errors are kept on the form for re-rendering.
    pub fn validate(&mut self, limits: &FormsConfig) -> Result<T::Cleaned, FieldErrors> {
        let result = self.data.clean(limits);
        self.state = self.state.on_validated(result.is_ok());
        match result {
            Ok(cleaned) => {
                self.errors.clear();
                Ok(cleaned)
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(errors)
            }
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn is_rejected(&self) -> bool {
        self.state == FormState::Rejected
    }
}

fn clean_text(
    field: &str,
    raw: &str,
    max_len: Option<usize>,
) -> Result<String, FieldErrors> {
    let text = raw.trim();
    let mut errors = FieldErrors::new();

    if text.is_empty() {
        errors
            .entry(field.to_string())
            .or_default()
            .push("This field is required.".to_string());
    } else if let Some(max) = max_len {
        let len = text.chars().count();
        if len > max {
            errors.entry(field.to_string()).or_default().push(format!(
                "Ensure this value has at most {} characters (it has {}).",
                max, len
            ));
        }
    }

    if errors.is_empty() {
        Ok(text.to_string())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub text: String,
}

impl FormData for TopicForm {
    type Cleaned = String;

    fn clean(&self, limits: &FormsConfig) -> Result<String, FieldErrors> {
        clean_text("text", &self.text, Some(limits.topic_text_max_len))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub text: String,
}

impl FormData for EntryForm {
    type Cleaned = String;

    fn clean(&self, limits: &FormsConfig) -> Result<String, FieldErrors> {
        clean_text("text", &self.text, limits.entry_text_max_len)
    }
}
