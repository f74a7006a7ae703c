//! Tests for the warning records emitted while converting diagnostics

#![allow(clippy::disallowed_methods)] // Allow unwrap() in tests for clarity

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tfplug_function::{Context, Diagnostic, Diagnostics, FuncError, FunctionError, FunctionErrors};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Layer;

#[derive(Debug, Clone)]
struct Record {
    level: Level,
    target: String,
    message: String,
    fields: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct CaptureLayer {
    records: Arc<Mutex<Vec<Record>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        self.records.lock().unwrap().push(Record {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let value = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value);
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.fields.insert(field.name().to_string(), value.to_string());
        }
    }
}

fn capture<T>(f: impl FnOnce() -> T) -> (T, Vec<Record>) {
    let layer = CaptureLayer::default();
    let records = layer.records.clone();
    let subscriber = tracing_subscriber::registry().with(layer);

    let result = tracing::subscriber::with_default(subscriber, f);
    let records = records.lock().unwrap().clone();
    (result, records)
}

fn mixed_diagnostics() -> Diagnostics {
    Diagnostics::from(vec![
        Diagnostic::error("s1", "d1"),
        Diagnostic::warning("s2", "d2"),
    ])
}

fn assert_single_warning(records: &[Record]) {
    let warnings: Vec<&Record> = records.iter().filter(|r| r.target == "provider").collect();

    assert_eq!(warnings.len(), 1);
    let record = warnings[0];
    assert_eq!(record.level, Level::WARN);
    assert_eq!(record.message, "warning: call function");
    assert_eq!(record.fields.get("summary").map(String::as_str), Some("s2"));
    assert_eq!(record.fields.get("detail").map(String::as_str), Some("d2"));
}

#[test]
fn function_errors_from_mixed_diagnostics() {
    let (errors, records) =
        capture(|| FunctionErrors::from_diagnostics(&Context::new(), &mixed_diagnostics()));

    assert_eq!(errors, FunctionErrors::from(FunctionError::new("s1: d1")));
    assert_single_warning(&records);
}

#[test]
fn func_error_from_mixed_diagnostics() {
    let (error, records) =
        capture(|| FuncError::from_diagnostics(&Context::new(), &mixed_diagnostics()));

    assert_eq!(error, Some(FuncError::new("s1: d1")));
    assert_single_warning(&records);
}

#[test]
fn errors_only_emit_no_warning() {
    let diags = Diagnostics::from(Diagnostic::error("s1", "d1"));

    let (_, records) = capture(|| FunctionErrors::from_diagnostics(&Context::new(), &diags));

    assert!(records.iter().all(|r| r.target != "provider"));
}
