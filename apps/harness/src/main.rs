mod config;
mod script;

use std::{fs, path::PathBuf, rc::Rc};

use anyhow::{Context, Result};
use clap::Parser;
use mraid_core::{
    CreativeApi, EngineConfig, Listener, LocalTaskScheduler, Mediator, MessageBridge,
};
use serde_json::Value;
use tokio::task::LocalSet;
use tracing::info;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::{
    config::load_settings,
    script::{apply_creative, apply_host, Step},
};

/// Replays a script of host and creative calls against one engine and prints
/// what the host would receive.
#[derive(Parser, Debug)]
struct Args {
    /// JSON array of steps.
    script: PathBuf,
    #[arg(long, default_value = "harness.toml")]
    config: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(&args.config)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let raw = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script '{}'", args.script.display()))?;
    let steps = script::parse(&raw)
        .with_context(|| format!("invalid script '{}'", args.script.display()))?;
    info!(steps = steps.len(), scheme = %settings.engine.scheme, "replaying script");

    LocalSet::new().run_until(replay(settings.engine, steps)).await
}

async fn replay(config: EngineConfig, steps: Vec<Step>) -> Result<()> {
    let bridge = MessageBridge::new(|message: Value| println!("bridge   {message}"));
    let mediator = Mediator::assemble(
        config,
        vec![Box::new(bridge)],
        Rc::new(LocalTaskScheduler),
        Rc::new(|call: &str| println!("navigate {}", describe_call(call))),
    );

    for (idx, step) in steps.into_iter().enumerate() {
        match step {
            Step::Host(call) => apply_host(&mediator, call),
            Step::Creative(call) => {
                let answer = apply_creative(&mediator, &call)
                    .with_context(|| format!("step {idx} failed"))?;
                if let Some(answer) = answer {
                    println!("answer   {} -> {answer}", call.method);
                }
            }
            Step::Listen(event) => {
                let name = event.to_string();
                let listener = Listener::new(move |args| println!("event    {name} {args:?}"));
                mediator.add_event_listener(&event, listener.into());
            }
            Step::Drain => drain(&mediator).await,
        }
    }
    drain(&mediator).await;
    Ok(())
}

async fn drain(mediator: &Mediator) {
    while mediator.notifier().queue().pending_len() > 0 {
        tokio::task::yield_now().await;
    }
}

/// `mraid://resize?width=320&...` as `resize width=320 ...` with the
/// parameters decoded.
fn describe_call(call: &str) -> String {
    let Ok(url) = Url::parse(call) else {
        return call.to_owned();
    };
    let mut line = url.host_str().unwrap_or_default().to_owned();
    for (key, value) in url.query_pairs() {
        line.push_str(&format!(" {key}={value:?}"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::describe_call;

    #[test]
    fn describes_calls_with_decoded_params() {
        assert_eq!(
            describe_call("mraid://open?uri=https%3A%2F%2Fexample.com%2Fa%20b"),
            r#"open uri="https://example.com/a b""#
        );
        assert_eq!(describe_call("mraid://close"), "close");
        assert_eq!(describe_call("not a call"), "not a call");
    }
}
