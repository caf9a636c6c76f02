use std::rc::Rc;

use shared::domain::LogLevel;
use tracing::{debug, error, info, warn};

use crate::{events::EventManager, outbound::SdkNotifier};

/// Engine log sink. Writes to `tracing`, optionally forwards the line to the
/// host, and turns error-level entries into `error` events.
pub struct Logger {
    notifier: Rc<SdkNotifier>,
    events: Rc<EventManager>,
    forward_to_host: bool,
}

impl Logger {
    pub fn new(notifier: Rc<SdkNotifier>, events: Rc<EventManager>, forward_to_host: bool) -> Self {
        Self {
            notifier,
            events,
            forward_to_host,
        }
    }

    pub fn format(method: &str, message: &str) -> String {
        format!("[MRAID] {method}, {message}")
    }

    pub fn log(&self, level: LogLevel, method: &str, message: &str) {
        let line = Self::format(method, message);
        match level {
            LogLevel::Debug => debug!(method, "{line}"),
            LogLevel::Info => info!(method, "{line}"),
            LogLevel::Warning => warn!(method, "{line}"),
            LogLevel::Error => error!(method, "{line}"),
        }

        if self.forward_to_host {
            self.notifier.log(level, line);
        }
        if level == LogLevel::Error {
            self.events.fire_error_event(message, method);
        }
    }

    pub fn debug(&self, method: &str, message: &str) {
        self.log(LogLevel::Debug, method, message);
    }

    pub fn warning(&self, method: &str, message: &str) {
        self.log(LogLevel::Warning, method, message);
    }

    pub fn error(&self, method: &str, message: &str) {
        self.log(LogLevel::Error, method, message);
    }
}
