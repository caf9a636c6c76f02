use std::{cell::RefCell, rc::Rc};

use mraid_core::{
    CreativeApi, EngineConfig, EventArgs, HostApi, Listener, LocalTaskScheduler, ManualScheduler,
    Mediator, MessageBridge,
};
use serde_json::{json, Value};
use shared::domain::{PlacementType, State};
use url::Url;

type Calls = Rc<RefCell<Vec<String>>>;

fn engine(config: EngineConfig) -> (Mediator, Rc<ManualScheduler>, Calls) {
    let scheduler = Rc::new(ManualScheduler::new());
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let navigator = {
        let calls = Rc::clone(&calls);
        move |call: &str| calls.borrow_mut().push(call.to_owned())
    };
    let mediator = Mediator::assemble(config, Vec::new(), scheduler.clone(), Rc::new(navigator));
    (mediator, scheduler, calls)
}

/// Drained calls other than log lines, as (command, params).
fn commands(calls: &Calls) -> Vec<(String, Vec<(String, String)>)> {
    calls
        .borrow()
        .iter()
        .map(|call| Url::parse(call).expect("native call is a url"))
        .filter(|url| url.host_str() != Some("log"))
        .map(|url| {
            let params = url.query_pairs().into_owned().collect();
            (url.host_str().unwrap_or_default().to_owned(), params)
        })
        .collect()
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn inline_session_delivers_commands_in_order() {
    let (mediator, scheduler, calls) = engine(EngineConfig::default());
    mediator.set_placement_type(PlacementType::Inline);
    mediator.set_max_size(320.0, 480.0);
    mediator.on_state_changed(State::Default);
    mediator.on_viewable_changed(true);
    mediator.on_ready();

    mediator.set_resize_properties(&json!({
        "width": 320,
        "height": 250,
        "offsetX": 0,
        "offsetY": -10.5,
        "customClosePosition": "bottom-center"
    }));
    mediator.resize();
    mediator.open(&json!("https://example.com/a b?x=1&y=2"));
    mediator.play_video(&json!("https://cdn.example.com/clip.mp4"));
    mediator.close();

    assert!(calls.borrow().is_empty(), "nothing leaves before a tick");
    assert!(scheduler.pending() > 0);
    scheduler.run_until_idle();

    assert_eq!(
        commands(&calls),
        vec![
            (
                "resize".to_string(),
                pairs(&[
                    ("width", "320"),
                    ("height", "250"),
                    ("offsetX", "0"),
                    ("offsetY", "-10.5"),
                    ("customClosePosition", "bottom-center"),
                    ("allowOffscreen", "true"),
                ])
            ),
            (
                "open".to_string(),
                pairs(&[("uri", "https://example.com/a b?x=1&y=2")])
            ),
            (
                "playVideo".to_string(),
                pairs(&[("uri", "https://cdn.example.com/clip.mp4")])
            ),
            ("close".to_string(), Vec::new()),
        ]
    );
    assert_eq!(mediator.notifier().queue().pending_len(), 0);
}

#[test]
fn each_tick_delivers_one_call() {
    let (mediator, scheduler, calls) = engine(EngineConfig {
        forward_logs: false,
        ..EngineConfig::default()
    });
    mediator.close();
    mediator.unload();
    mediator.use_custom_close(&json!(false));

    assert_eq!(scheduler.pending(), 1);
    assert!(scheduler.run_next());
    assert_eq!(*calls.borrow(), vec!["mraid://close".to_string()]);
    assert!(scheduler.run_next());
    assert!(scheduler.run_next());
    assert!(!scheduler.run_next());
    assert_eq!(
        *calls.borrow(),
        vec![
            "mraid://close".to_string(),
            "mraid://unload".to_string(),
            "mraid://useCustomClose?useCustomClose=false".to_string(),
        ]
    );
}

#[test]
fn custom_scheme_prefixes_every_call() {
    let (mediator, scheduler, calls) = engine(EngineConfig {
        scheme: "adhost".into(),
        forward_logs: false,
        ..EngineConfig::default()
    });
    mediator.close();
    scheduler.run_until_idle();
    assert_eq!(*calls.borrow(), vec!["adhost://close".to_string()]);
}

#[test]
fn forwarded_log_lines_decode_back_to_the_message() {
    let (mediator, scheduler, calls) = engine(EngineConfig::default());
    mediator.open(&json!(null));
    scheduler.run_until_idle();

    let url = Url::parse(&calls.borrow()[0]).expect("url");
    assert_eq!(url.host_str(), Some("log"));
    assert_eq!(
        url.query_pairs().into_owned().collect::<Vec<_>>(),
        pairs(&[
            ("logLevel", "error"),
            ("message", "[MRAID] open, open must be called with a valid uri."),
        ])
    );
}

#[test]
fn loading_state_blocks_resize_from_the_queue() {
    let (mediator, scheduler, calls) = engine(EngineConfig::default());
    mediator.set_placement_type(PlacementType::Inline);
    mediator.set_resize_properties(&json!({ "width": 300, "height": 300 }));
    mediator.resize();
    scheduler.run_until_idle();

    assert_eq!(mediator.get_state(), State::Loading);
    assert!(commands(&calls).is_empty());
}

#[test]
fn removing_a_doubly_added_listener_takes_two_calls() {
    let (mediator, _scheduler, _calls) = engine(EngineConfig::default());
    let hits = Rc::new(RefCell::new(0));
    let listener = {
        let hits = Rc::clone(&hits);
        Listener::new(move |_| *hits.borrow_mut() += 1)
    };
    let event = json!("viewableChange");
    mediator.add_event_listener(&event, (&listener).into());
    mediator.add_event_listener(&event, (&listener).into());

    mediator.on_viewable_changed(true);
    assert_eq!(*hits.borrow(), 2);

    mediator.remove_event_listener(&event, (&listener).into());
    mediator.on_viewable_changed(false);
    assert_eq!(*hits.borrow(), 3);

    mediator.remove_event_listener(&event, (&listener).into());
    mediator.on_viewable_changed(true);
    assert_eq!(*hits.borrow(), 3);
}

#[test]
fn listener_sees_exact_exposure_arguments() {
    let (mediator, _scheduler, _calls) = engine(EngineConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let listener = {
        let seen = Rc::clone(&seen);
        Listener::new(move |args| seen.borrow_mut().push(args.clone()))
    };
    mediator.add_event_listener(&json!("exposureChange"), listener.into());
    mediator.on_exposure_changed(42.5, None, Some(Vec::new()));

    assert_eq!(
        *seen.borrow(),
        vec![EventArgs::ExposureChange {
            exposed_percentage: 42.5,
            visible_rectangle: None,
            occlusion_rectangles: Some(Vec::new()),
        }]
    );
}

#[test]
fn message_bridge_sees_commands_before_the_queue_drains() {
    let posted = Rc::new(RefCell::new(Vec::<Value>::new()));
    let bridge = {
        let posted = Rc::clone(&posted);
        MessageBridge::new(move |message| posted.borrow_mut().push(message))
    };
    let scheduler = Rc::new(ManualScheduler::new());
    let mediator = Mediator::assemble(
        EngineConfig {
            forward_logs: false,
            ..EngineConfig::default()
        },
        vec![Box::new(bridge)],
        scheduler.clone(),
        Rc::new(|_: &str| {}),
    );
    mediator.store_picture(&json!("pic.png"));
    mediator.on_viewable_changed(true);
    mediator.store_picture(&json!("pic.png"));

    assert_eq!(
        *posted.borrow(),
        vec![json!({ "action": "storePicture", "uri": "pic.png" })]
    );
    assert_eq!(scheduler.pending(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn local_task_scheduler_drains_the_queue() {
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let calls: Calls = Rc::new(RefCell::new(Vec::new()));
            let (done_tx, done_rx) = tokio::sync::oneshot::channel();
            let done_tx = RefCell::new(Some(done_tx));
            let navigator = {
                let calls = Rc::clone(&calls);
                move |call: &str| {
                    calls.borrow_mut().push(call.to_owned());
                    if call.ends_with("unload") {
                        if let Some(tx) = done_tx.borrow_mut().take() {
                            let _ = tx.send(());
                        }
                    }
                }
            };
            let mediator = Mediator::assemble(
                EngineConfig {
                    forward_logs: false,
                    ..EngineConfig::default()
                },
                Vec::new(),
                Rc::new(LocalTaskScheduler),
                Rc::new(navigator),
            );
            mediator.close();
            mediator.unload();

            done_rx.await.expect("queue drained");
            assert_eq!(
                *calls.borrow(),
                vec!["mraid://close".to_string(), "mraid://unload".to_string()]
            );
        })
        .await;
}
