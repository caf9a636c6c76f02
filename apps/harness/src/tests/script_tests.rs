use super::*;

use std::{cell::RefCell, rc::Rc};

use mraid_core::{EngineConfig, ManualScheduler};
use serde_json::json;

fn engine() -> (Mediator, Rc<ManualScheduler>, Rc<RefCell<Vec<String>>>) {
    let scheduler = Rc::new(ManualScheduler::new());
    let calls = Rc::new(RefCell::new(Vec::new()));
    let navigator = {
        let calls = Rc::clone(&calls);
        move |call: &str| calls.borrow_mut().push(call.to_owned())
    };
    let mediator = Mediator::assemble(
        EngineConfig {
            forward_logs: false,
            ..EngineConfig::default()
        },
        Vec::new(),
        scheduler.clone(),
        Rc::new(navigator),
    );
    (mediator, scheduler, calls)
}

#[test]
fn parses_every_step_shape() {
    let steps = parse(
        r#"[
            { "host": { "method": "onReady" } },
            { "host": { "method": "setPlacementType", "params": { "placementType": "inline" } } },
            { "host": { "method": "setHostEnv", "params": { "sdk": "demo" } } },
            { "host": { "method": "onExposureChanged", "params": { "exposedPercentage": 50 } } },
            { "creative": { "method": "close" } },
            { "listen": "ready" },
            "drain"
        ]"#,
    )
    .expect("parse");

    assert_eq!(steps.len(), 7);
    assert!(matches!(steps[0], Step::Host(HostCall::OnReady)));
    assert!(matches!(
        steps[1],
        Step::Host(HostCall::SetPlacementType {
            placement_type: PlacementType::Inline
        })
    ));
    assert!(matches!(
        &steps[2],
        Step::Host(HostCall::SetHostEnv(env))
            if env.sdk.as_deref() == Some("demo") && env.version.is_none()
    ));
    assert!(matches!(
        steps[3],
        Step::Host(HostCall::OnExposureChanged {
            visible_rectangle: None,
            occlusion_rectangles: None,
            ..
        })
    ));
    assert!(matches!(
        &steps[4],
        Step::Creative(call) if call.method == "close" && call.args.is_empty()
    ));
    assert!(matches!(&steps[5], Step::Listen(event) if event == "ready"));
    assert!(matches!(steps[6], Step::Drain));
}

#[test]
fn unknown_host_state_is_rejected() {
    let err = parse(
        r#"[{ "host": { "method": "onStateChanged", "params": { "state": "minimized" } } }]"#,
    );
    assert!(err.is_err());
}

#[test]
fn host_calls_drive_engine_state() {
    let (mediator, _scheduler, _calls) = engine();
    apply_host(
        &mediator,
        HostCall::SetPlacementType {
            placement_type: PlacementType::Inline,
        },
    );
    apply_host(&mediator, HostCall::OnStateChanged { state: State::Default });
    apply_host(&mediator, HostCall::SetSupports { features: json!({ "tel": true }) });

    assert_eq!(mediator.get_placement_type(), PlacementType::Inline);
    assert_eq!(mediator.get_state(), State::Default);
    assert!(mediator.supports(&json!("tel")));
}

#[test]
fn creative_queries_answer_and_commands_queue() {
    let (mediator, scheduler, calls) = engine();
    let call = |method: &str, args: Vec<Value>| CreativeCall {
        method: method.into(),
        args,
    };

    assert_eq!(
        apply_creative(&mediator, &call("getState", Vec::new())).expect("getState"),
        Some(json!("loading"))
    );
    assert_eq!(
        apply_creative(&mediator, &call("getMaxSize", Vec::new())).expect("getMaxSize"),
        Some(json!({ "width": 0.0, "height": 0.0 }))
    );
    assert_eq!(
        apply_creative(&mediator, &call("open", vec![json!("https://example.com")])).expect("open"),
        None
    );

    scheduler.run_until_idle();
    assert_eq!(
        *calls.borrow(),
        vec!["mraid://open?uri=https%3A%2F%2Fexample.com".to_string()]
    );
}

#[test]
fn unknown_creative_method_is_an_error() {
    let (mediator, _scheduler, _calls) = engine();
    let call = CreativeCall {
        method: "teleport".into(),
        args: Vec::new(),
    };
    assert!(apply_creative(&mediator, &call).is_err());
}
