//! End-to-end enrichment tests: context in, log record out.

use std::io;
use std::sync::Arc;
use std::thread;

use chrono::DateTime;
use serde_json::{json, Value};

use request_logger::context::{get_request_id, set_request_id, Context};
use request_logger::logger::{
    Encoding, Level, Logger, LoggerConfig, MethodFieldStyle, StreamBackend, FIELD_BODY,
    FIELD_HEADERS, FIELD_METHOD, FIELD_REQUEST_ID, FIELD_URL,
};
use request_logger::snapshot::{
    make_request_info_context, BodySource, InboundRequest, BODY_ERROR_GETTING,
};

mod common;

fn items_request() -> InboundRequest {
    InboundRequest::new("GET", "/items/42")
        .with_header("Accept", "text/plain")
        .with_header("X-Trace", "a")
        .with_header("X-Trace", "b")
        .with_body(Vec::<u8>::new())
}

fn verbose() -> LoggerConfig {
    LoggerConfig {
        show_headers: true,
        show_body: true,
        ..LoggerConfig::default()
    }
}

#[test]
fn test_items_request_is_fully_enriched() {
    let (logger, backend) = common::capture_logger(verbose());
    let ctx = set_request_id(&Context::background(), 7);
    let ctx = make_request_info_context(Some(&ctx), Some(&items_request()));

    logger.info(&ctx, "fetched item");

    let records = backend.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, Level::Info);
    assert_eq!(record.message, "fetched item");
    assert_eq!(record.field(FIELD_REQUEST_ID), Some(&json!(7)));
    assert_eq!(record.field("GET"), Some(&json!("/items/42")));
    assert_eq!(
        record.field(FIELD_HEADERS),
        Some(&json!(["Accept: text/plain", "X-Trace: a, b"]))
    );
    assert!(!record.has_field(FIELD_BODY));
}

#[test]
fn test_named_method_fields() {
    let (logger, backend) = common::capture_logger(LoggerConfig {
        method_field: MethodFieldStyle::Named,
        ..LoggerConfig::default()
    });
    let ctx = make_request_info_context(None, Some(&items_request()));

    logger.warn(&ctx, "slow");

    let record = &backend.records()[0];
    assert_eq!(record.field(FIELD_METHOD), Some(&json!("GET")));
    assert_eq!(record.field(FIELD_URL), Some(&json!("/items/42")));
    assert!(!record.has_field("GET"));
}

#[test]
fn test_context_without_snapshot_logs_plain_record() {
    let (logger, backend) = common::capture_logger(verbose());
    let ctx = set_request_id(&Context::background(), 3);

    logger.error(&ctx, "no request here");

    let record = &backend.records()[0];
    assert!(record.fields.is_empty());
    assert_eq!(record.level, Level::Error);
}

#[test]
fn test_hidden_headers_and_body() {
    let (logger, backend) = common::capture_logger(LoggerConfig::default());
    let request = items_request().with_body("payload");
    let ctx = make_request_info_context(None, Some(&request));

    logger.info(&ctx, "quiet");

    let record = &backend.records()[0];
    assert!(!record.has_field(FIELD_HEADERS));
    assert!(!record.has_field(FIELD_BODY));
    assert_eq!(record.field(FIELD_REQUEST_ID), Some(&json!(0)));
}

#[test]
fn test_body_shown_when_enabled() {
    let (logger, backend) = common::capture_logger(verbose());
    let request = InboundRequest::new("POST", "/orders").with_body("{\"qty\":2}");
    let ctx = make_request_info_context(None, Some(&request));

    logger.info(&ctx, "order received");

    assert_eq!(
        backend.records()[0].field(FIELD_BODY),
        Some(&json!("{\"qty\":2}"))
    );
}

#[test]
fn test_unopenable_body_logs_sentinel() {
    let (logger, backend) = common::capture_logger(verbose());
    let request = InboundRequest::new("POST", "/upload").with_body_source(BodySource::new(|| {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
    }));
    let ctx = make_request_info_context(None, Some(&request));

    logger.info(&ctx, "upload");

    assert_eq!(
        backend.records()[0].field(FIELD_BODY),
        Some(&json!(BODY_ERROR_GETTING))
    );
}

#[test]
fn test_request_id_rederivation_leaves_ancestor_intact() {
    let root = set_request_id(&Context::background(), 5);
    let child = set_request_id(&root, 5);
    let other = set_request_id(&root, 6);

    assert_eq!(get_request_id(&root), 5);
    assert_eq!(get_request_id(&child), 5);
    assert_eq!(get_request_id(&other), 6);
}

#[test]
fn test_concurrent_requests_do_not_share_fields() {
    let (logger, backend) = common::capture_logger(LoggerConfig::default());

    let handles: Vec<_> = (1..=8)
        .map(|id| {
            let logger = logger.clone();
            thread::spawn(move || {
                let ctx = set_request_id(&Context::background(), id);
                let request = InboundRequest::new("GET", format!("/items/{id}"));
                let ctx = make_request_info_context(Some(&ctx), Some(&request));
                for _ in 0..10 {
                    logger.info(&ctx, "tick");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let records = backend.records();
    assert_eq!(records.len(), 80);
    for record in &records {
        let id = record.field(FIELD_REQUEST_ID).and_then(Value::as_i64).unwrap();
        assert_eq!(record.field("GET"), Some(&json!(format!("/items/{id}"))));
        assert_eq!(record.fields.len(), 2);
    }
    assert!(logger.fields().is_empty());
}

#[test]
fn test_scoped_logger_matches_context_logging() {
    let (logger, backend) = common::capture_logger(verbose());
    let ctx = set_request_id(&Context::background(), 11);
    let ctx = make_request_info_context(Some(&ctx), Some(&items_request()));

    let scoped = logger.scoped(&ctx);
    scoped.info("via scope");
    logger.info(&ctx, "via context");

    let records = backend.records();
    assert_eq!(records[0].fields, records[1].fields);
}

#[test]
fn test_json_line_layout() {
    let buf = common::SharedBuf::default();
    let config = LoggerConfig {
        service_name: "orders".to_string(),
        ..LoggerConfig::default()
    };
    let logger = Logger::with_backend(
        config,
        Arc::new(StreamBackend::new(Encoding::Json, Box::new(buf.clone()))),
    );
    let ctx = set_request_id(&Context::background(), 21);
    let ctx = make_request_info_context(Some(&ctx), Some(&items_request()));

    request_logger::infof!(logger, &ctx, "served {} bytes", 128);

    let lines = buf.lines();
    assert_eq!(lines.len(), 1);
    let line: Value = serde_json::from_str(&lines[0]).unwrap();
    assert_eq!(line["level"], "info");
    assert_eq!(line["msg"], "served 128 bytes");
    assert_eq!(line["service_name"], "orders");
    assert_eq!(line[FIELD_REQUEST_ID], 21);
    assert_eq!(line["GET"], "/items/42");
    assert!(line["caller"].as_str().unwrap().contains("enrichment.rs:"));

    let ts = line["ts"].as_str().unwrap();
    assert!(ts.ends_with('Z'));
    assert_eq!(ts.split('.').nth(1).map(str::len), Some(10));
    assert!(DateTime::parse_from_rfc3339(ts).is_ok());
    assert!(lines[0].starts_with("{\"level\":\"info\",\"ts\":"));
}

#[test]
fn test_debug_records_follow_level() {
    let (production, captured) = common::capture_logger(LoggerConfig::default());
    production.debug(&Context::background(), "hidden");
    assert!(captured.is_empty());

    let (debug, captured) = common::capture_logger(LoggerConfig {
        level: request_logger::logger::LogLevel::Debug,
        ..LoggerConfig::default()
    });
    debug.debug(&Context::background(), "shown");
    assert_eq!(captured.len(), 1);
}

#[test]
fn test_fatal_runs_hook_after_writing() {
    let (logger, backend) = common::capture_logger(LoggerConfig::default());
    let exited = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let flag = Arc::clone(&exited);
    let logger = logger.with_fatal_hook(move || {
        flag.store(true, std::sync::atomic::Ordering::SeqCst);
    });

    logger.fatal(&Context::background(), "cannot continue");

    assert!(exited.load(std::sync::atomic::Ordering::SeqCst));
    assert_eq!(backend.records()[0].level, Level::Fatal);
}
