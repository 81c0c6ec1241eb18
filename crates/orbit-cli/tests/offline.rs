//! Commands against a backend that is not running.

use std::sync::Arc;

use clap::Parser;
use orbit_cli::{Cli, CliConfig, CliError, bootstrap, handlers};
use orbit_core::services::NETWORK_ERROR_MESSAGE;
use orbit_core::{AppEvent, ChannelEmitter, MessageKind};
use tokio::sync::mpsc;

fn offline_context(extra: &[&str]) -> (orbit_cli::CliContext, mpsc::UnboundedReceiver<AppEvent>) {
    let mut argv = vec!["orbit", "--api-url", "http://127.0.0.1:1", "--speech", "off"];
    argv.extend_from_slice(extra);
    argv.push("iss");
    let config = CliConfig::from_cli(&Cli::parse_from(argv)).unwrap();
    let (emitter, events) = ChannelEmitter::new();
    (bootstrap(&config, Arc::new(emitter)).unwrap(), events)
}

fn drain(events: &mut mpsc::UnboundedReceiver<AppEvent>) -> Vec<AppEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

#[tokio::test]
async fn ask_shows_network_error_and_fails() {
    let (ctx, mut events) = offline_context(&[]);

    let err = handlers::ask::execute(&ctx, "What is Mars?").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CliError>(),
        Some(CliError::Service(_))
    ));

    let events = drain(&mut events);
    assert!(events.contains(&AppEvent::MessageAdded {
        kind: MessageKind::Error,
        text: NETWORK_ERROR_MESSAGE.to_string(),
    }));
    assert_eq!(events.last(), Some(&AppEvent::error_message(NETWORK_ERROR_MESSAGE)));
    assert!(ctx.session.history().is_empty());
}

#[tokio::test]
async fn blank_question_is_rejected_locally() {
    let (ctx, mut events) = offline_context(&[]);

    let err = handlers::ask::execute(&ctx, "   ").await.unwrap_err();
    assert_eq!(err.downcast_ref::<CliError>().map(CliError::exit_code), Some(2));
    assert!(drain(&mut events).is_empty());
}

#[tokio::test]
async fn iss_failure_is_reported() {
    let (ctx, mut events) = offline_context(&["--lat", "40.7", "--lng", "-74.0"]);

    assert!(handlers::iss::execute(&ctx).await.is_err());
    assert!(ctx.tracker.latest().is_none());
    assert!(drain(&mut events).iter().any(|event| matches!(
        event,
        AppEvent::MessageAdded { kind: MessageKind::Error, text }
            if text.starts_with("Couldn't get the space station's position")
    )));
}

#[tokio::test]
async fn status_failure_exits_unavailable() {
    let (ctx, _events) = offline_context(&[]);

    let err = handlers::status::execute(&ctx, false).await.unwrap_err();
    assert_eq!(err.downcast_ref::<CliError>().map(CliError::exit_code), Some(69));
}
