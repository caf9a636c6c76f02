use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! named_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }

            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($wire => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Accepts only a JSON string naming one of the variants.
            pub fn from_value(value: &serde_json::Value) -> Option<Self> {
                value.as_str().and_then(Self::from_name)
            }

            pub fn names() -> impl Iterator<Item = &'static str> {
                Self::ALL.iter().map(|variant| variant.as_str())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

named_enum!(
    /// Display mode of the ad container. Only the host moves it.
    State {
        Loading => "loading",
        Default => "default",
        Expanded => "expanded",
        Resized => "resized",
        Hidden => "hidden",
    }
);

named_enum!(PlacementType {
    Unknown => "unknown",
    Inline => "inline",
    Interstitial => "interstitial",
});

named_enum!(OrientationType {
    Portrait => "portrait",
    Landscape => "landscape",
    None => "none",
});

named_enum!(
    /// Anchor of the host-drawn close region relative to a resized creative.
    ClosePosition {
        TopLeft => "top-left",
        TopRight => "top-right",
        TopCenter => "top-center",
        Center => "center",
        BottomLeft => "bottom-left",
        BottomRight => "bottom-right",
        BottomCenter => "bottom-center",
    }
);

named_enum!(Feature {
    Sms => "sms",
    Tel => "tel",
    Calendar => "calendar",
    StorePicture => "storePicture",
    InlineVideo => "inlineVideo",
    Vpaid => "vpaid",
    Location => "location",
});

named_enum!(LogLevel {
    Debug => "debug",
    Info => "info",
    Warning => "warning",
    Error => "error",
});

named_enum!(EventKind {
    Error => "error",
    Ready => "ready",
    StateChange => "stateChange",
    ViewableChange => "viewableChange",
    SizeChange => "sizeChange",
    ExposureChange => "exposureChange",
    AudioVolumeChange => "audioVolumeChange",
});

impl EventKind {
    /// Dense index used by per-kind listener tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppOrientation {
    pub orientation: OrientationType,
    pub locked: bool,
}

impl Default for AppOrientation {
    fn default() -> Self {
        Self {
            orientation: OrientationType::None,
            locked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: i32,
    pub accuracy: f64,
    pub lastfix: f64,
    pub ipservice: String,
}

impl Location {
    /// Record reported when no geolocation source is wired in.
    pub fn unsupported() -> Self {
        Self {
            lat: -1.0,
            lon: -1.0,
            kind: 1,
            accuracy: -1.0,
            lastfix: -1.0,
            ipservice: String::new(),
        }
    }
}

/// Environment facts the host hands to the creative once it is up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostEnv {
    /// Protocol version the host implements; the engine default applies
    /// when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdk_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ifa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit_ad_tracking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coppa: Option<bool>,
}
