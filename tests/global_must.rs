use script_registry::templating::global;
use script_registry::{must_execute, must_parse};
use serde_json::json;
use std::fs;
use std::panic;
use tempfile::tempdir;

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default()
}

#[test]
fn must_helpers_abort_on_failure() {
    let payload = panic::catch_unwind(|| must_execute("greet.tmpl", json!({}))).unwrap_err();
    assert_eq!(
        panic_message(payload),
        "template execute (template registry is not initialized)"
    );

    let empty = tempdir().unwrap();
    let empty_pattern = format!("{}/*.tmpl", empty.path().display());
    let payload = panic::catch_unwind(|| must_parse(&empty_pattern)).unwrap_err();
    assert!(panic_message(payload).starts_with("template parse (template pattern"));
    assert!(!global::is_initialized());

    let dir = tempdir().unwrap();
    fs::write(dir.path().join("greet.tmpl"), "Hi {{ Who }}!").unwrap();
    must_parse(&format!("{}/*.tmpl", dir.path().display()));

    assert_eq!(must_execute("greet.tmpl", json!({ "Who": "Bob" })), "Hi Bob!");

    let payload = panic::catch_unwind(|| must_execute("greet.tmpl", json!({}))).unwrap_err();
    let message = panic_message(payload);
    assert!(message.starts_with("template execute (greet.tmpl: undefined value"), "{message}");
}
