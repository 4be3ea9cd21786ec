//! Modal controller - at most one open modal, handler-driven lifecycle
//!
//! The controller never closes a modal on its own after submit. The
//! handler's [`SubmitOutcome`] decides, so a failed validation keeps the
//! form open with the user's input intact.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::core::{DetailTab, Notifier, NotifyLevel, Record, SubmitError, TabGroup};
use crate::infrastructure::runtime::{worker, Dispatcher, SubmitCompletion};

/// Identity of one open call; a replaced modal gets a new id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModalId(u64);

/// How a field's text is sent to the backend; anything not declared stays a string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldKind {
    #[default]
    Text,
    Integer,
    Decimal,
    Bool,
}

impl FieldKind {
    /// Typed JSON for `raw`; text that does not fit the kind is kept as a string
    fn to_json(self, raw: &str) -> Value {
        let typed = match self {
            FieldKind::Text => None,
            FieldKind::Integer => raw.parse::<i64>().ok().map(Value::from),
            FieldKind::Decimal => raw
                .parse::<f64>()
                .ok()
                .filter(|float| float.is_finite())
                .map(Value::from),
            FieldKind::Bool => match raw.to_lowercase().as_str() {
                "true" | "yes" => Some(Value::Bool(true)),
                "false" | "no" => Some(Value::Bool(false)),
                _ => None,
            },
        };
        typed.unwrap_or_else(|| Value::String(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub key: String,
    pub label: String,
    pub value: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FormField {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            value: String::new(),
            required: false,
            kind: FieldKind::Text,
        }
    }

    pub fn kind(mut self, kind: FieldKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn integer(self) -> Self {
        self.kind(FieldKind::Integer)
    }

    pub fn decimal(self) -> Self {
        self.kind(FieldKind::Decimal)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Form {
    pub fields: Vec<FormField>,
    pub focused: usize,
}

impl Form {
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focused: 0 }
    }

    pub fn values(&self) -> FormValues {
        FormValues {
            values: self
                .fields
                .iter()
                .map(|field| (field.key.clone(), field.value.trim().to_string()))
                .collect(),
            required: self
                .fields
                .iter()
                .filter(|field| field.required)
                .map(|field| field.key.clone())
                .collect(),
            kinds: self
                .fields
                .iter()
                .filter(|field| field.kind != FieldKind::Text)
                .map(|field| (field.key.clone(), field.kind))
                .collect(),
        }
    }

    fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focused)
    }
}

/// Read-only record view, optionally split into tabs
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub record: Record,
    pub tabs: Option<TabGroup<DetailTab>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalContent {
    Form(Form),
    Detail(DetailView),
    Message(String),
}

/// Trimmed field values captured at submit time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<String, String>,
    required: Vec<String>,
    kinds: BTreeMap<String, FieldKind>,
}

impl FormValues {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// Check the fields the form marked as required
    pub fn validate(&self) -> Result<(), SubmitError> {
        let keys: Vec<&str> = self.required.iter().map(String::as_str).collect();
        self.require(&keys)
    }

    pub fn require(&self, keys: &[&str]) -> Result<(), SubmitError> {
        let missing: Vec<String> = keys
            .iter()
            .filter(|key| self.get(key).is_none())
            .map(|key| key.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SubmitError::Validation(missing))
        }
    }

    /// Declare the kind of `key`; undeclared keys are text
    pub fn with_kind(mut self, key: &str, kind: FieldKind) -> Self {
        self.kinds.insert(key.to_string(), kind);
        self
    }

    /// JSON body; only fields declared numeric or boolean are sent typed
    pub fn to_json(&self) -> Value {
        let map = self
            .values
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(key, value)| {
                let kind = self.kinds.get(key).copied().unwrap_or_default();
                (key.clone(), kind.to_json(value))
            })
            .collect();
        Value::Object(map)
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormValues {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            required: Vec::new(),
            kinds: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    KeepOpen,
    Close,
    CloseAndRefresh,
}

/// Handler verdict; `message` is shown as a success notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub disposition: Disposition,
    pub message: Option<String>,
}

impl SubmitOutcome {
    pub fn keep_open() -> Self {
        Self {
            disposition: Disposition::KeepOpen,
            message: None,
        }
    }

    pub fn close() -> Self {
        Self {
            disposition: Disposition::Close,
            message: None,
        }
    }

    pub fn close_and_refresh() -> Self {
        Self {
            disposition: Disposition::CloseAndRefresh,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[async_trait::async_trait]
pub trait SubmitHandler: Send + Sync + 'static {
    async fn submit(&self, values: FormValues) -> Result<SubmitOutcome, SubmitError>;
}

/// Adapter turning an async closure into a [`SubmitHandler`]
pub struct FnHandler<F>(F);

#[async_trait::async_trait]
impl<F, Fut> SubmitHandler for FnHandler<F>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SubmitOutcome, SubmitError>> + Send + 'static,
{
    async fn submit(&self, values: FormValues) -> Result<SubmitOutcome, SubmitError> {
        (self.0)(values).await
    }
}

pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn SubmitHandler>
where
    F: Fn(FormValues) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SubmitOutcome, SubmitError>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

pub struct ModalState {
    pub id: ModalId,
    pub title: String,
    pub content: ModalContent,
    pub submitting: bool,
    handler: Option<Arc<dyn SubmitHandler>>,
}

impl ModalState {
    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }
}

/// How an applied submit completion resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitResolution {
    Closed { refresh: bool },
    KeptOpen,
    Failed,
    /// The modal was closed or replaced while the handler ran
    Orphaned,
}

pub struct ModalController {
    state: Option<ModalState>,
    next_id: u64,
    notifier: Arc<dyn Notifier>,
    dispatcher: Dispatcher,
}

impl ModalController {
    pub fn new(notifier: Arc<dyn Notifier>, dispatcher: Dispatcher) -> Self {
        Self {
            state: None,
            next_id: 0,
            notifier,
            dispatcher,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn state(&self) -> Option<&ModalState> {
        self.state.as_ref()
    }

    /// Open a modal, replacing any open one
    pub fn open(
        &mut self,
        title: impl Into<String>,
        content: ModalContent,
        on_submit: Option<Arc<dyn SubmitHandler>>,
    ) -> ModalId {
        self.next_id += 1;
        let id = ModalId(self.next_id);
        let title = title.into();
        if let Some(previous) = self.state.as_ref() {
            debug!(previous = %previous.title, next = %title, "replacing open modal");
        }
        self.state = Some(ModalState {
            id,
            title,
            content,
            submitting: false,
            handler: on_submit,
        });
        id
    }

    /// Close the modal and drop its handler. No-op when closed.
    pub fn close(&mut self) {
        if let Some(state) = self.state.take() {
            debug!(title = %state.title, "modal closed");
        }
    }

    /// Run the registered handler. Returns whether one was dispatched.
    pub fn submit(&mut self) -> bool {
        let Some(state) = self.state.as_mut() else {
            return false;
        };
        let Some(handler) = state.handler.clone() else {
            return false;
        };
        if state.submitting {
            debug!(title = %state.title, "submit already in flight");
            return false;
        }
        state.submitting = true;
        let values = match &state.content {
            ModalContent::Form(form) => form.values(),
            _ => FormValues::default(),
        };
        let modal = state.id;
        info!(title = %state.title, "submitting modal");
        self.dispatcher
            .spawn(async move { worker::run_submit(handler, modal, values).await });
        true
    }

    pub fn apply_submit(&mut self, completion: SubmitCompletion) -> SubmitResolution {
        let SubmitCompletion { modal, result } = completion;
        let current = match self.state.as_mut() {
            Some(state) if state.id == modal => {
                state.submitting = false;
                true
            }
            _ => false,
        };

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(error = %err, "submit failed");
                self.notifier.notify(&err.to_string(), NotifyLevel::Error);
                return SubmitResolution::Failed;
            }
        };

        if let Some(message) = outcome.message.as_deref() {
            self.notifier.notify(message, NotifyLevel::Success);
        }
        if !current {
            debug!("submit finished for a modal that is no longer open");
            return SubmitResolution::Orphaned;
        }
        match outcome.disposition {
            Disposition::KeepOpen => SubmitResolution::KeptOpen,
            Disposition::Close => {
                self.close();
                SubmitResolution::Closed { refresh: false }
            }
            Disposition::CloseAndRefresh => {
                self.close();
                SubmitResolution::Closed { refresh: true }
            }
        }
    }

    /// Next form field, or next tab in a tabbed detail view
    pub fn focus_next(&mut self) {
        match self.content_mut() {
            Some(ModalContent::Form(form)) if !form.fields.is_empty() => {
                form.focused = (form.focused + 1) % form.fields.len();
            }
            Some(ModalContent::Detail(DetailView {
                tabs: Some(tabs), ..
            })) => tabs.next(),
            _ => {}
        }
    }

    pub fn focus_prev(&mut self) {
        match self.content_mut() {
            Some(ModalContent::Form(form)) if !form.fields.is_empty() => {
                form.focused = (form.focused + form.fields.len() - 1) % form.fields.len();
            }
            Some(ModalContent::Detail(DetailView {
                tabs: Some(tabs), ..
            })) => tabs.prev(),
            _ => {}
        }
    }

    pub fn input_char(&mut self, ch: char) {
        if let Some(ModalContent::Form(form)) = self.content_mut() {
            if let Some(field) = form.focused_mut() {
                field.value.push(ch);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(ModalContent::Form(form)) = self.content_mut() {
            if let Some(field) = form.focused_mut() {
                field.value.pop();
            }
        }
    }

    fn content_mut(&mut self) -> Option<&mut ModalContent> {
        self.state.as_mut().map(|state| &mut state.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_checked_after_trimming() {
        let form = Form::new(vec![
            FormField::new("name", "Name").required().value("  "),
            FormField::new("price", "Price").value("49"),
        ]);
        let err = form.values().validate().unwrap_err();
        assert!(matches!(err, SubmitError::Validation(ref missing) if missing == &["name"]));
    }

    #[test]
    fn json_body_types_only_declared_fields() {
        let form = Form::new(vec![
            FormField::new("price", "Price").decimal().value("49.5"),
            FormField::new("seats", "Seats").integer().value("12"),
            FormField::new("active", "Active").kind(FieldKind::Bool).value("yes"),
            FormField::new("name", "Name").value("Douro"),
        ]);
        let body = form.values().to_json();
        assert_eq!(body["price"], serde_json::json!(49.5));
        assert_eq!(body["seats"], serde_json::json!(12));
        assert_eq!(body["active"], serde_json::json!(true));
        assert_eq!(body["name"], serde_json::json!("Douro"));
    }

    #[test]
    fn text_fields_are_sent_verbatim() {
        let values = FormValues::from([
            ("phone", "0912345678"),
            ("answer", "No"),
            ("code", "1e3"),
            ("symbol", "NaN"),
        ]);
        let body = values.to_json();
        assert_eq!(body["phone"], serde_json::json!("0912345678"));
        assert_eq!(body["answer"], serde_json::json!("No"));
        assert_eq!(body["code"], serde_json::json!("1e3"));
        assert_eq!(body["symbol"], serde_json::json!("NaN"));
    }

    #[test]
    fn numeric_fields_reject_non_finite_and_malformed_text() {
        let values = FormValues::from([("rate", "NaN"), ("guests", "two"), ("discount", "inf")])
            .with_kind("rate", FieldKind::Decimal)
            .with_kind("guests", FieldKind::Integer)
            .with_kind("discount", FieldKind::Decimal);
        let body = values.to_json();
        assert_eq!(body["rate"], serde_json::json!("NaN"));
        assert_eq!(body["guests"], serde_json::json!("two"));
        assert_eq!(body["discount"], serde_json::json!("inf"));
    }

    #[test]
    fn empty_values_are_left_out_of_the_body() {
        let values = FormValues::from([("code", "SUMMER"), ("note", "")]);
        let body = values.to_json();
        assert!(body.get("note").is_none());
    }
}
