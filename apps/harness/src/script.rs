//! JSON scripts of host and creative calls replayed against one engine.
//!
//! ```json
//! [
//!   { "host": { "method": "setPlacementType", "params": { "placementType": "inline" } } },
//!   { "listen": "stateChange" },
//!   { "host": { "method": "onStateChanged", "params": { "state": "default" } } },
//!   { "creative": { "method": "expand", "args": ["https://example.com"] } },
//!   "drain"
//! ]
//! ```

use anyhow::bail;
use mraid_core::{CreativeApi, HostApi, Mediator};
use serde::Deserialize;
use serde_json::Value;
use shared::domain::{HostEnv, OrientationType, PlacementType, Rectangle, State};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Step {
    Host(HostCall),
    Creative(CreativeCall),
    /// Registers a printing listener for the named event.
    Listen(Value),
    /// Waits until every queued native call has been delivered.
    Drain,
}

#[derive(Debug, Deserialize)]
#[serde(
    tag = "method",
    content = "params",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum HostCall {
    OnError {
        message: String,
        action: String,
    },
    OnReady,
    OnSizeChanged {
        width: f64,
        height: f64,
    },
    OnStateChanged {
        state: State,
    },
    OnExposureChanged {
        exposed_percentage: f64,
        visible_rectangle: Option<Rectangle>,
        occlusion_rectangles: Option<Vec<Rectangle>>,
    },
    OnViewableChanged {
        is_viewable: bool,
    },
    OnAudioVolumeChanged {
        volume_percentage: f64,
    },
    SetCurrentPosition {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    SetScreenSize {
        width: f64,
        height: f64,
    },
    SetMaxSize {
        width: f64,
        height: f64,
    },
    SetCurrentAppOrientation {
        orientation: OrientationType,
        locked: bool,
    },
    SetSupports {
        features: Value,
    },
    SetPlacementType {
        placement_type: PlacementType,
    },
    SetDefaultPosition {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    ResetOrientationProperties,
    SetHostEnv(HostEnv),
}

#[derive(Debug, Deserialize)]
pub struct CreativeCall {
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

static MISSING: Value = Value::Null;

impl CreativeCall {
    fn arg(&self, idx: usize) -> &Value {
        self.args.get(idx).unwrap_or(&MISSING)
    }
}

pub fn parse(raw: &str) -> anyhow::Result<Vec<Step>> {
    Ok(serde_json::from_str(raw)?)
}

pub fn apply_host(mediator: &Mediator, call: HostCall) {
    match call {
        HostCall::OnError { message, action } => mediator.on_error(&message, &action),
        HostCall::OnReady => mediator.on_ready(),
        HostCall::OnSizeChanged { width, height } => mediator.on_size_changed(width, height),
        HostCall::OnStateChanged { state } => mediator.on_state_changed(state),
        HostCall::OnExposureChanged {
            exposed_percentage,
            visible_rectangle,
            occlusion_rectangles,
        } => mediator.on_exposure_changed(
            exposed_percentage,
            visible_rectangle,
            occlusion_rectangles,
        ),
        HostCall::OnViewableChanged { is_viewable } => mediator.on_viewable_changed(is_viewable),
        HostCall::OnAudioVolumeChanged { volume_percentage } => {
            mediator.on_audio_volume_changed(volume_percentage)
        }
        HostCall::SetCurrentPosition {
            x,
            y,
            width,
            height,
        } => mediator.set_current_position(x, y, width, height),
        HostCall::SetScreenSize { width, height } => mediator.set_screen_size(width, height),
        HostCall::SetMaxSize { width, height } => mediator.set_max_size(width, height),
        HostCall::SetCurrentAppOrientation {
            orientation,
            locked,
        } => mediator.set_current_app_orientation(orientation, locked),
        HostCall::SetSupports { features } => mediator.set_supports(&features),
        HostCall::SetPlacementType { placement_type } => {
            mediator.set_placement_type(placement_type)
        }
        HostCall::SetDefaultPosition {
            x,
            y,
            width,
            height,
        } => mediator.set_default_position(x, y, width, height),
        HostCall::ResetOrientationProperties => mediator.reset_orientation_properties(),
        HostCall::SetHostEnv(env) => mediator.set_host_env(env),
    }
}

/// Runs a creative call. Queries return what the engine answered; commands
/// return `None`.
pub fn apply_creative(mediator: &Mediator, call: &CreativeCall) -> anyhow::Result<Option<Value>> {
    let answer = match call.method.as_str() {
        "getVersion" => Some(Value::from(mediator.get_version())),
        "addEventListener" => {
            mediator.add_event_listener(call.arg(0), call.arg(1).clone().into());
            None
        }
        "removeEventListener" => {
            mediator.remove_event_listener(call.arg(0), call.arg(1).clone().into());
            None
        }
        "open" => {
            mediator.open(call.arg(0));
            None
        }
        "close" => {
            mediator.close();
            None
        }
        "useCustomClose" => {
            mediator.use_custom_close(call.arg(0));
            None
        }
        "unload" => {
            mediator.unload();
            None
        }
        "expand" => {
            mediator.expand(call.arg(0));
            None
        }
        "isViewable" => Some(Value::from(mediator.is_viewable())),
        "playVideo" => {
            mediator.play_video(call.arg(0));
            None
        }
        "resize" => {
            mediator.resize();
            None
        }
        "storePicture" => {
            mediator.store_picture(call.arg(0));
            None
        }
        "createCalendarEvent" => {
            mediator.create_calendar_event(call.arg(0));
            None
        }
        "supports" => Some(Value::from(mediator.supports(call.arg(0)))),
        "getPlacementType" => Some(serde_json::to_value(mediator.get_placement_type())?),
        "getOrientationProperties" => {
            Some(serde_json::to_value(mediator.get_orientation_properties())?)
        }
        "setOrientationProperties" => {
            mediator.set_orientation_properties(call.arg(0));
            None
        }
        "getCurrentAppOrientation" => {
            Some(serde_json::to_value(mediator.get_current_app_orientation())?)
        }
        "getCurrentPosition" => Some(serde_json::to_value(mediator.get_current_position())?),
        "getDefaultPosition" => Some(serde_json::to_value(mediator.get_default_position())?),
        "getState" => Some(serde_json::to_value(mediator.get_state())?),
        "getExpandProperties" => Some(serde_json::to_value(mediator.get_expand_properties())?),
        "setExpandProperties" => {
            mediator.set_expand_properties(call.arg(0));
            None
        }
        "getMaxSize" => Some(serde_json::to_value(mediator.get_max_size())?),
        "getScreenSize" => Some(serde_json::to_value(mediator.get_screen_size())?),
        "getResizeProperties" => Some(serde_json::to_value(mediator.get_resize_properties())?),
        "setResizeProperties" => {
            mediator.set_resize_properties(call.arg(0));
            None
        }
        "getLocation" => Some(serde_json::to_value(mediator.get_location())?),
        other => bail!("unknown creative method '{other}'"),
    };
    Ok(answer)
}

#[cfg(test)]
#[path = "tests/script_tests.rs"]
mod tests;
