//! Listener registry for the seven creative-visible events.

use std::{cell::RefCell, fmt, rc::Rc};

use serde_json::Value;
use shared::{
    domain::{EventKind, Rectangle, State},
    error::MraidError,
};

/// Arguments delivered to listeners, one variant per event kind.
#[derive(Debug, Clone, PartialEq)]
pub enum EventArgs {
    Error {
        message: String,
        action: String,
    },
    Ready,
    StateChange(State),
    ViewableChange(bool),
    SizeChange {
        width: f64,
        height: f64,
    },
    ExposureChange {
        exposed_percentage: f64,
        visible_rectangle: Option<Rectangle>,
        occlusion_rectangles: Option<Vec<Rectangle>>,
    },
    AudioVolumeChange(f64),
}

impl EventArgs {
    pub fn kind(&self) -> EventKind {
        match self {
            EventArgs::Error { .. } => EventKind::Error,
            EventArgs::Ready => EventKind::Ready,
            EventArgs::StateChange(_) => EventKind::StateChange,
            EventArgs::ViewableChange(_) => EventKind::ViewableChange,
            EventArgs::SizeChange { .. } => EventKind::SizeChange,
            EventArgs::ExposureChange { .. } => EventKind::ExposureChange,
            EventArgs::AudioVolumeChange(_) => EventKind::AudioVolumeChange,
        }
    }
}

/// A registered callback. Identity is the allocation, so clones of one
/// listener compare equal and separately built listeners never do.
#[derive(Clone)]
pub struct Listener(Rc<dyn Fn(&EventArgs)>);

impl Listener {
    pub fn new(callback: impl Fn(&EventArgs) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, args: &EventArgs) {
        (self.0)(args)
    }

    pub fn same_as(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// What the creative passed where a listener was expected.
#[derive(Debug, Clone)]
pub enum ListenerArg {
    Callable(Listener),
    Value(Value),
}

impl ListenerArg {
    /// Short type name used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            ListenerArg::Callable(_) => "function",
            ListenerArg::Value(Value::Null) => "null",
            ListenerArg::Value(Value::Bool(_)) => "boolean",
            ListenerArg::Value(Value::Number(_)) => "number",
            ListenerArg::Value(Value::String(_)) => "string",
            ListenerArg::Value(Value::Array(_)) => "array",
            ListenerArg::Value(Value::Object(_)) => "object",
        }
    }
}

impl From<Listener> for ListenerArg {
    fn from(listener: Listener) -> Self {
        ListenerArg::Callable(listener)
    }
}

impl From<&Listener> for ListenerArg {
    fn from(listener: &Listener) -> Self {
        ListenerArg::Callable(listener.clone())
    }
}

impl From<Value> for ListenerArg {
    fn from(value: Value) -> Self {
        ListenerArg::Value(value)
    }
}

const KIND_COUNT: usize = EventKind::ALL.len();

#[derive(Default)]
pub struct EventManager {
    listeners: RefCell<[Vec<Listener>; KIND_COUNT]>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(event: &Value, listener: ListenerArg) -> Result<(EventKind, Listener), MraidError> {
        let kind = EventKind::from_value(event).ok_or(MraidError::InvalidEvent)?;
        match listener {
            ListenerArg::Callable(listener) => Ok((kind, listener)),
            ListenerArg::Value(_) => Err(MraidError::InvalidListener),
        }
    }

    /// Appends `listener` for `event`. The same listener may be added twice.
    pub fn add_event_listener(
        &self,
        event: &Value,
        listener: impl Into<ListenerArg>,
    ) -> Result<(), MraidError> {
        let (kind, listener) = Self::check(event, listener.into())?;
        self.listeners.borrow_mut()[kind.index()].push(listener);
        Ok(())
    }

    /// Drops the first registration of `listener` for `event`, if any.
    pub fn remove_event_listener(
        &self,
        event: &Value,
        listener: impl Into<ListenerArg>,
    ) -> Result<(), MraidError> {
        let (kind, listener) = Self::check(event, listener.into())?;
        let mut listeners = self.listeners.borrow_mut();
        let registered = &mut listeners[kind.index()];
        if let Some(idx) = registered.iter().position(|l| l.same_as(&listener)) {
            registered.remove(idx);
        }
        Ok(())
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.borrow()[kind.index()].len()
    }

    /// Calls every listener registered for the event's kind, in registration
    /// order. The list is captured up front: changes made by a listener apply
    /// from the next fire on. A panicking listener stops the rest of the pass.
    pub fn fire(&self, args: EventArgs) {
        let snapshot = self.listeners.borrow()[args.kind().index()].clone();
        for listener in &snapshot {
            listener.call(&args);
        }
    }

    pub fn fire_error_event(&self, message: impl Into<String>, action: impl Into<String>) {
        self.fire(EventArgs::Error {
            message: message.into(),
            action: action.into(),
        });
    }

    pub fn fire_ready_event(&self) {
        self.fire(EventArgs::Ready);
    }

    pub fn fire_state_change_event(&self, state: State) {
        self.fire(EventArgs::StateChange(state));
    }

    pub fn fire_viewable_change_event(&self, is_viewable: bool) {
        self.fire(EventArgs::ViewableChange(is_viewable));
    }

    pub fn fire_size_change_event(&self, width: f64, height: f64) {
        self.fire(EventArgs::SizeChange { width, height });
    }

    pub fn fire_exposure_change_event(
        &self,
        exposed_percentage: f64,
        visible_rectangle: Option<Rectangle>,
        occlusion_rectangles: Option<Vec<Rectangle>>,
    ) {
        self.fire(EventArgs::ExposureChange {
            exposed_percentage,
            visible_rectangle,
            occlusion_rectangles,
        });
    }

    pub fn fire_audio_volume_change_event(&self, volume_percentage: f64) {
        self.fire(EventArgs::AudioVolumeChange(volume_percentage));
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
