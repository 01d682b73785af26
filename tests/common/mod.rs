// ABOUTME: Shared helpers for integration tests
// ABOUTME: Provides canned callables and side-effect counters

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use stagehand::{TaskCallable, TaskParams};

/// `greet(name)` -> "hi {name}"
pub fn greet() -> TaskCallable {
    TaskCallable::new("greet", |params: &TaskParams| {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("world");
        Ok(json!(format!("hi {}", name)))
    })
    .unwrap()
}

/// `shout(name)` -> uppercased name, failing on an empty name
pub fn shout() -> TaskCallable {
    TaskCallable::new("shout", |params: &TaskParams| {
        let name = params.get("name").and_then(Value::as_str).unwrap_or("");
        if name.is_empty() {
            anyhow::bail!("cannot shout an empty name");
        }
        Ok(json!(name.to_uppercase()))
    })
    .unwrap()
}

/// A callable that records every invocation on the returned counter.
pub fn counting(name: &str) -> (TaskCallable, Arc<AtomicU32>) {
    let counter = Arc::new(AtomicU32::new(0));
    let calls = Arc::clone(&counter);

    let callable = TaskCallable::new(name, move |_: &TaskParams| {
        calls.fetch_add(1, Ordering::SeqCst);
        Ok(json!("counted"))
    })
    .unwrap();

    (callable, counter)
}

/// A callable returning a constant value.
pub fn constant(name: &str, value: i64) -> TaskCallable {
    TaskCallable::new(name, move |_: &TaskParams| Ok(json!(value))).unwrap()
}
