use script_registry::templating::global;
use script_registry::{TemplateRegistry, execute};
use serde_json::json;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tempfile::tempdir;

#[test]
fn concurrent_readers_and_racing_installs() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("job.tmpl"), "job-{{ id }}").unwrap();
    let pattern = format!("{}/*.tmpl", dir.path().display());

    let installed = global::install(TemplateRegistry::parse(&pattern).unwrap());
    assert_eq!(installed.len(), 1);

    let readers: Vec<_> = (0..8)
        .map(|id| thread::spawn(move || execute("job.tmpl", json!({ "id": id })).unwrap()))
        .collect();
    let outputs: Vec<String> = readers.into_iter().map(|h| h.join().unwrap()).collect();
    let expected: Vec<String> = (0..8).map(|id| format!("job-{id}")).collect();
    assert_eq!(outputs, expected);

    // Every later install attempt loses and panics
    let racers: Vec<_> = (0..4)
        .map(|_| {
            let pattern = pattern.clone();
            thread::spawn(move || global::parse(&pattern))
        })
        .collect();
    for racer in racers {
        assert!(racer.join().is_err());
    }

    // Installing a prebuilt registry over a full slot panics too
    let replacement = TemplateRegistry::parse(&pattern).unwrap();
    let payload =
        panic::catch_unwind(AssertUnwindSafe(move || global::install(replacement))).unwrap_err();
    let message = payload
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| payload.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_default();
    assert!(message.contains("already initialized"), "{message}");

    assert_eq!(execute("job.tmpl", json!({ "id": 42 })).unwrap(), "job-42");
}
