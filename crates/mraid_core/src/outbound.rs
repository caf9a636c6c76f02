//! Ordered delivery of engine commands to the host.
//!
//! Every command goes out twice: synchronously to each registered [`Bridge`],
//! and as a `scheme://command?...` string appended to a FIFO that is drained
//! one element per scheduler tick into a [`Navigator`].

use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use shared::{
    domain::{ClosePosition, LogLevel, OrientationType},
    protocol::HostCommand,
};
use tracing::debug;

use crate::{bridge::Bridge, scheduler::Scheduler};

/// Where a drained native call is applied, e.g. the web view's location.
pub trait Navigator {
    fn navigate(&self, call: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, call: &str) {
        self(call)
    }
}

struct QueueInner {
    pending: RefCell<VecDeque<String>>,
    scheduler: Rc<dyn Scheduler>,
    navigator: Rc<dyn Navigator>,
}

/// FIFO of serialized calls. No retry, no acknowledgement.
#[derive(Clone)]
pub struct NativeCallQueue {
    inner: Rc<QueueInner>,
}

impl NativeCallQueue {
    pub fn new(scheduler: Rc<dyn Scheduler>, navigator: Rc<dyn Navigator>) -> Self {
        Self {
            inner: Rc::new(QueueInner {
                pending: RefCell::new(VecDeque::new()),
                scheduler,
                navigator,
            }),
        }
    }

    pub fn pending_len(&self) -> usize {
        self.inner.pending.borrow().len()
    }

    pub fn pending_calls(&self) -> Vec<String> {
        self.inner.pending.borrow().iter().cloned().collect()
    }

    /// Appends at the tail. A drain is scheduled only when the queue was
    /// empty; otherwise one is already on its way.
    pub fn enqueue(&self, call: String) {
        let was_empty = {
            let mut pending = self.inner.pending.borrow_mut();
            pending.push_back(call);
            pending.len() == 1
        };
        if was_empty {
            Self::schedule_drain(&self.inner);
        }
    }

    fn schedule_drain(inner: &Rc<QueueInner>) {
        let weak = Rc::downgrade(inner);
        inner.scheduler.schedule(Box::new(move || {
            if let Some(inner) = weak.upgrade() {
                Self::drain_one(&inner);
            }
        }));
    }

    fn drain_one(inner: &Rc<QueueInner>) {
        let (next, more) = {
            let mut pending = inner.pending.borrow_mut();
            let next = pending.pop_front();
            (next, !pending.is_empty())
        };
        if let Some(call) = next {
            debug!(call = call.as_str(), "navigating native call");
            inner.navigator.navigate(&call);
        }
        // a call the navigator enqueued into an empty queue scheduled its own drain
        if more {
            Self::schedule_drain(inner);
        }
    }
}

/// Fans each command out to the bridges and the native call queue.
pub struct SdkNotifier {
    bridges: Vec<Box<dyn Bridge>>,
    queue: NativeCallQueue,
    scheme: String,
}

impl SdkNotifier {
    pub fn new(
        bridges: Vec<Box<dyn Bridge>>,
        queue: NativeCallQueue,
        scheme: impl Into<String>,
    ) -> Self {
        Self {
            bridges,
            queue,
            scheme: scheme.into(),
        }
    }

    pub fn queue(&self) -> &NativeCallQueue {
        &self.queue
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn send(&self, command: HostCommand) {
        for bridge in &self.bridges {
            bridge.send(&command);
        }
        self.queue.enqueue(command.to_native_call(&self.scheme));
    }

    pub fn log(&self, log_level: LogLevel, message: impl Into<String>) {
        self.send(HostCommand::Log {
            log_level,
            message: message.into(),
        });
    }

    pub fn open(&self, uri: impl Into<String>) {
        self.send(HostCommand::Open { uri: uri.into() });
    }

    pub fn close(&self) {
        self.send(HostCommand::Close);
    }

    pub fn use_custom_close(&self, use_custom_close: bool) {
        self.send(HostCommand::UseCustomClose { use_custom_close });
    }

    pub fn unload(&self) {
        self.send(HostCommand::Unload);
    }

    pub fn resize(
        &self,
        width: f64,
        height: f64,
        offset_x: f64,
        offset_y: f64,
        custom_close_position: Option<ClosePosition>,
        allow_offscreen: bool,
    ) {
        self.send(HostCommand::Resize {
            width,
            height,
            offset_x,
            offset_y,
            custom_close_position,
            allow_offscreen,
        });
    }

    pub fn expand(
        &self,
        width: f64,
        height: f64,
        use_custom_close: bool,
        is_modal: bool,
        url: Option<String>,
    ) {
        self.send(HostCommand::Expand {
            width,
            height,
            use_custom_close,
            is_modal,
            url,
        });
    }

    pub fn set_orientation_properties(
        &self,
        allow_orientation_change: bool,
        force_orientation: OrientationType,
    ) {
        self.send(HostCommand::SetOrientationProperties {
            allow_orientation_change,
            force_orientation,
        });
    }

    pub fn play_video(&self, uri: impl Into<String>) {
        self.send(HostCommand::PlayVideo { uri: uri.into() });
    }

    pub fn store_picture(&self, uri: impl Into<String>) {
        self.send(HostCommand::StorePicture { uri: uri.into() });
    }
}

#[cfg(test)]
#[path = "tests/outbound_tests.rs"]
mod tests;
