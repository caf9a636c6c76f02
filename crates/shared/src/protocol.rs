use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::domain::{ClosePosition, LogLevel, OrientationType};

/// Characters `encodeURIComponent` leaves untouched, which is what hosts
/// parsing the native call expect.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const DEFAULT_SCHEME: &str = "mraid";

/// A command travelling from the engine to the host.
///
/// The serde form is the message-handler shape: a flat object tagged by
/// `action` with camelCase fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum HostCommand {
    Log {
        log_level: LogLevel,
        message: String,
    },
    Open {
        uri: String,
    },
    Close,
    UseCustomClose {
        use_custom_close: bool,
    },
    Unload,
    Resize {
        width: f64,
        height: f64,
        offset_x: f64,
        offset_y: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_close_position: Option<ClosePosition>,
        allow_offscreen: bool,
    },
    Expand {
        width: f64,
        height: f64,
        use_custom_close: bool,
        is_modal: bool,
        #[serde(default)]
        url: Option<String>,
    },
    SetOrientationProperties {
        allow_orientation_change: bool,
        force_orientation: OrientationType,
    },
    PlayVideo {
        uri: String,
    },
    StorePicture {
        uri: String,
    },
}

impl HostCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::Log { .. } => "log",
            HostCommand::Open { .. } => "open",
            HostCommand::Close => "close",
            HostCommand::UseCustomClose { .. } => "useCustomClose",
            HostCommand::Unload => "unload",
            HostCommand::Resize { .. } => "resize",
            HostCommand::Expand { .. } => "expand",
            HostCommand::SetOrientationProperties { .. } => "setOrientationProperties",
            HostCommand::PlayVideo { .. } => "playVideo",
            HostCommand::StorePicture { .. } => "storePicture",
        }
    }

    /// Query parameters in the fixed order hosts parse them in. Optional
    /// parameters that are absent or empty are left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            HostCommand::Log { log_level, message } => vec![
                ("logLevel", log_level.to_string()),
                ("message", message.clone()),
            ],
            HostCommand::Open { uri }
            | HostCommand::PlayVideo { uri }
            | HostCommand::StorePicture { uri } => vec![("uri", uri.clone())],
            HostCommand::Close | HostCommand::Unload => Vec::new(),
            HostCommand::UseCustomClose { use_custom_close } => {
                vec![("useCustomClose", use_custom_close.to_string())]
            }
            HostCommand::Resize {
                width,
                height,
                offset_x,
                offset_y,
                custom_close_position,
                allow_offscreen,
            } => {
                let mut params = vec![
                    ("width", js_number(*width)),
                    ("height", js_number(*height)),
                    ("offsetX", js_number(*offset_x)),
                    ("offsetY", js_number(*offset_y)),
                ];
                if let Some(position) = custom_close_position {
                    params.push(("customClosePosition", position.to_string()));
                }
                params.push(("allowOffscreen", allow_offscreen.to_string()));
                params
            }
            HostCommand::Expand {
                width,
                height,
                use_custom_close,
                is_modal,
                url,
            } => {
                let mut params = vec![
                    ("width", js_number(*width)),
                    ("height", js_number(*height)),
                    ("useCustomClose", use_custom_close.to_string()),
                    ("isModal", is_modal.to_string()),
                ];
                if let Some(url) = url.as_deref().filter(|url| !url.is_empty()) {
                    params.push(("url", url.to_string()));
                }
                params
            }
            HostCommand::SetOrientationProperties {
                allow_orientation_change,
                force_orientation,
            } => vec![
                ("allowOrientationChange", allow_orientation_change.to_string()),
                ("forceOrientation", force_orientation.to_string()),
            ],
        }
    }

    /// Serialized form handed to the navigation channel:
    /// `scheme://command?key=value&...`.
    pub fn to_native_call(&self, scheme: &str) -> String {
        let mut call = format!("{scheme}://{}", self.name());
        let params = self.params();
        if params.is_empty() {
            return call;
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&");
        call.push('?');
        call.push_str(&query);
        call
    }
}

pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Renders a number the way a JavaScript host stringifies it: no negative
/// zero, and exponent form with an explicit sign outside `[1e-6, 1e21)`.
pub fn js_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".into();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if value == 0.0 {
        return "0".into();
    }

    // shortest round-trip digits, e.g. "1.2345e3"
    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exponent.parse::<i32>().unwrap_or(0) + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat(n.unsigned_abs() as usize))
    } else {
        let sign = if n > 0 { '+' } else { '-' };
        let exp = (n - 1).abs();
        match digits.split_at(1) {
            (lead, "") => format!("{lead}e{sign}{exp}"),
            (lead, rest) => format!("{lead}.{rest}e{sign}{exp}"),
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}
