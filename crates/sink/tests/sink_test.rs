//! End-to-end tests of routing, caching, mapping, and dispatch against the
//! in-memory diagnostics backend.

use std::sync::{Arc, Barrier};
use std::thread;

use relay_diagnostics::DiagnosticsLevel;
use relay_diagnostics_memory::MemoryBackend;
use relay_events::{Level, LogEvent};
use relay_sink::{
    DiagnosticsSink, Error, JsonFormatter, LevelFilteredSink, LevelSwitch, LogEventSink,
    SOURCE_CONTEXT,
};

fn event(level: Level, message: &str, category: Option<&str>) -> LogEvent {
    let event = LogEvent::new(level, message);
    match category {
        Some(category) => event.with_property(SOURCE_CONTEXT, category),
        None => event,
    }
}

#[test]
fn default_template_delivers_trimmed_message() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::new(backend.clone());

    sink.emit(&event(Level::Information, "Hello", None)).unwrap();

    let emissions = backend.emissions();
    assert_eq!(emissions.len(), 1);
    assert_eq!(emissions[0].text, "Hello");
    assert_eq!(emissions[0].level, DiagnosticsLevel::Information);
}

#[test]
fn repeated_category_reuses_one_handle() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::new(backend.clone());

    for i in 0..5 {
        sink.emit(&event(Level::Information, &format!("m{i}"), Some("App.Db")))
            .unwrap();
    }

    assert_eq!(backend.loggers_created(), 1);
    let emissions = backend.emissions();
    assert_eq!(emissions.len(), 5);
    assert!(emissions.iter().all(|e| e.category == "App.Db"));
}

#[test]
fn distinct_categories_get_distinct_handles() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::new(backend.clone());

    sink.emit(&event(Level::Information, "a", Some("App.A"))).unwrap();
    sink.emit(&event(Level::Information, "b", Some("App.B"))).unwrap();
    sink.emit(&event(Level::Information, "a again", Some("App.A")))
        .unwrap();

    assert_eq!(backend.loggers_created(), 2);
    let mut categories = sink.cached_categories();
    categories.sort();
    assert_eq!(categories, vec!["App.A", "App.B"]);
}

#[test]
fn missing_source_context_routes_to_empty_category() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::new(backend.clone());

    sink.emit(&event(Level::Information, "one", None)).unwrap();
    sink.emit(&event(Level::Warning, "two", None)).unwrap();

    assert_eq!(backend.loggers_created(), 1);
    assert!(backend.emissions().iter().all(|e| e.category.is_empty()));
}

#[test]
fn level_mapping_round_trip() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::new(backend.clone());

    let pairs = [
        (Level::Fatal, DiagnosticsLevel::Critical),
        (Level::Error, DiagnosticsLevel::Error),
        (Level::Warning, DiagnosticsLevel::Warning),
        (Level::Information, DiagnosticsLevel::Information),
        (Level::Debug, DiagnosticsLevel::Debug),
        (Level::Verbose, DiagnosticsLevel::Trace),
    ];
    for (source, _) in pairs {
        sink.emit(&event(source, "x", None)).unwrap();
    }

    let mapped: Vec<DiagnosticsLevel> = backend.emissions().iter().map(|e| e.level).collect();
    let expected: Vec<DiagnosticsLevel> = pairs.iter().map(|(_, backend)| *backend).collect();
    assert_eq!(mapped, expected);
}

#[test]
fn concurrent_emits_for_one_unseen_category_create_one_handle() {
    const THREADS: usize = 16;

    let backend = MemoryBackend::new();
    let sink = Arc::new(DiagnosticsSink::new(backend.clone()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let sink = sink.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                sink.emit(&event(
                    Level::Information,
                    &format!("from thread {i}"),
                    Some("App.Hot"),
                ))
                .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(backend.loggers_created(), 1);
    let emissions = backend.emissions();
    assert_eq!(emissions.len(), THREADS);
    assert!(emissions.iter().all(|e| e.category == "App.Hot"));
}

#[test]
fn concurrent_emits_for_different_categories_proceed_independently() {
    const THREADS: usize = 8;

    let backend = MemoryBackend::new();
    let sink = Arc::new(DiagnosticsSink::new(backend.clone()));
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let sink = sink.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                sink.emit(
                    &LogEvent::new(Level::Debug, "x")
                        .with_property(SOURCE_CONTEXT, format!("App.{i}")),
                )
                .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(backend.loggers_created(), THREADS);
    assert_eq!(backend.emissions().len(), THREADS);
}

#[test]
fn builder_rejects_template_and_formatter_together() {
    let result = DiagnosticsSink::builder(MemoryBackend::new())
        .output_template("{Message}")
        .formatter(JsonFormatter::new())
        .build();

    assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
}

#[test]
fn custom_json_formatter_flows_through_dispatch() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::builder(backend.clone())
        .formatter(JsonFormatter::new())
        .build()
        .unwrap();

    sink.emit(&event(Level::Error, "boom", Some("App.Core"))).unwrap();

    let emissions = backend.emissions();
    assert_eq!(emissions.len(), 1);
    let value: serde_json::Value = serde_json::from_str(&emissions[0].text).unwrap();
    assert_eq!(value["message"], "boom");
    assert_eq!(value["properties"]["SourceContext"], "App.Core");
    assert_eq!(emissions[0].level, DiagnosticsLevel::Error);
}

#[test]
fn custom_output_template_shapes_delivered_text() {
    let backend = MemoryBackend::new();
    let sink = DiagnosticsSink::builder(backend.clone())
        .output_template("{Level}|{Message}")
        .build()
        .unwrap();

    sink.emit(&event(Level::Warning, "low disk", None)).unwrap();

    assert_eq!(backend.emissions()[0].text, "Warning|low disk");
}

#[test]
fn filtered_sink_drops_below_switch_and_follows_changes() {
    let backend = MemoryBackend::new();
    let switch = LevelSwitch::new(Level::Error);
    let sink = LevelFilteredSink::with_level_switch(
        DiagnosticsSink::new(backend.clone()),
        switch.clone(),
    );

    sink.emit(&event(Level::Information, "dropped", None)).unwrap();
    assert!(backend.emissions().is_empty());
    assert_eq!(backend.loggers_created(), 0);

    switch.set_minimum_level(Level::Verbose);
    sink.emit(&event(Level::Information, "kept", None)).unwrap();
    assert_eq!(backend.emissions().len(), 1);
}
