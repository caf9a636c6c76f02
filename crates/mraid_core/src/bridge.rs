//! Direct, in-process delivery of host commands.

use serde_json::Value;
use shared::protocol::HostCommand;
use tracing::warn;

/// A transport that hands a command straight to native code.
pub trait Bridge {
    fn send(&self, command: &HostCommand);
}

impl<F> Bridge for F
where
    F: Fn(&HostCommand),
{
    fn send(&self, command: &HostCommand) {
        self(command)
    }
}

/// Posts each command as an `action`-tagged JSON message, the shape a
/// message-handler style host expects.
pub struct MessageBridge<P> {
    post: P,
}

impl<P> MessageBridge<P>
where
    P: Fn(Value),
{
    pub fn new(post: P) -> Self {
        Self { post }
    }
}

impl<P> Bridge for MessageBridge<P>
where
    P: Fn(Value),
{
    fn send(&self, command: &HostCommand) {
        match serde_json::to_value(command) {
            Ok(message) => (self.post)(message),
            Err(err) => warn!(command = command.name(), "failed to encode bridge message: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use serde_json::json;
    use shared::domain::ClosePosition;

    use super::*;

    #[test]
    fn message_bridge_posts_tagged_messages() {
        let posted = Rc::new(RefCell::new(Vec::new()));
        let bridge = {
            let posted = Rc::clone(&posted);
            MessageBridge::new(move |message| posted.borrow_mut().push(message))
        };

        bridge.send(&HostCommand::Close);
        bridge.send(&HostCommand::Resize {
            width: 320.0,
            height: 100.0,
            offset_x: -50.0,
            offset_y: 50.0,
            custom_close_position: Some(ClosePosition::TopRight),
            allow_offscreen: true,
        });
        bridge.send(&HostCommand::Expand {
            width: 300.0,
            height: 250.0,
            use_custom_close: false,
            is_modal: true,
            url: None,
        });

        assert_eq!(
            *posted.borrow(),
            vec![
                json!({ "action": "close" }),
                json!({
                    "action": "resize",
                    "width": 320.0,
                    "height": 100.0,
                    "offsetX": -50.0,
                    "offsetY": 50.0,
                    "customClosePosition": "top-right",
                    "allowOffscreen": true
                }),
                json!({
                    "action": "expand",
                    "width": 300.0,
                    "height": 250.0,
                    "useCustomClose": false,
                    "isModal": true,
                    "url": null
                }),
            ]
        );
    }

    #[test]
    fn closures_are_bridges() {
        let names = Rc::new(RefCell::new(Vec::new()));
        let bridge = {
            let names = Rc::clone(&names);
            move |command: &HostCommand| names.borrow_mut().push(command.name())
        };
        bridge.send(&HostCommand::Unload);
        assert_eq!(*names.borrow(), vec!["unload"]);
    }
}
