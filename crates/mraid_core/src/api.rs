//! The two faces of the engine.

use serde_json::Value;
use shared::domain::{
    AppOrientation, HostEnv, Location, OrientationType, PlacementType, Rectangle, Size, State,
};

use crate::{
    events::ListenerArg,
    properties::{ExpandProperties, OrientationProperties, ResizeProperties},
};

/// Calls made by the creative. Arguments the creative controls arrive as
/// untyped values; nothing here returns an error or panics on bad input,
/// failures are logged instead.
pub trait CreativeApi {
    fn get_version(&self) -> String;
    fn add_event_listener(&self, event: &Value, listener: ListenerArg);
    fn remove_event_listener(&self, event: &Value, listener: ListenerArg);
    fn open(&self, uri: &Value);
    fn close(&self);
    fn use_custom_close(&self, should_use_custom_close: &Value);
    fn unload(&self);
    fn expand(&self, url: &Value);
    fn is_viewable(&self) -> bool;
    fn play_video(&self, uri: &Value);
    fn resize(&self);
    fn store_picture(&self, uri: &Value);
    fn create_calendar_event(&self, parameters: &Value);
    fn supports(&self, feature: &Value) -> bool;
    fn get_placement_type(&self) -> PlacementType;
    fn get_orientation_properties(&self) -> OrientationProperties;
    fn set_orientation_properties(&self, properties: &Value);
    fn get_current_app_orientation(&self) -> AppOrientation;
    fn get_current_position(&self) -> Rectangle;
    fn get_default_position(&self) -> Rectangle;
    fn get_state(&self) -> State;
    fn get_expand_properties(&self) -> ExpandProperties;
    fn set_expand_properties(&self, properties: &Value);
    fn get_max_size(&self) -> Size;
    fn get_screen_size(&self) -> Size;
    fn get_resize_properties(&self) -> ResizeProperties;
    fn set_resize_properties(&self, properties: &Value);
    fn get_location(&self) -> Location;
}

/// Calls made by the host SDK. The host is trusted, so values are typed and
/// setters are applied without legality checks.
pub trait HostApi {
    fn on_error(&self, message: &str, action: &str);
    fn on_ready(&self);
    fn on_size_changed(&self, width: f64, height: f64);
    fn on_state_changed(&self, state: State);
    fn on_exposure_changed(
        &self,
        exposed_percentage: f64,
        visible_rectangle: Option<Rectangle>,
        occlusion_rectangles: Option<Vec<Rectangle>>,
    );
    fn on_viewable_changed(&self, is_viewable: bool);
    fn on_audio_volume_changed(&self, volume_percentage: f64);

    fn set_current_position(&self, x: f64, y: f64, width: f64, height: f64);
    fn set_screen_size(&self, width: f64, height: f64);
    fn set_max_size(&self, width: f64, height: f64);
    fn set_current_app_orientation(&self, orientation: OrientationType, locked: bool);
    /// Flags that are not booleans are ignored one by one.
    fn set_supports(&self, supported_features: &Value);
    fn set_placement_type(&self, placement_type: PlacementType);
    fn set_default_position(&self, x: f64, y: f64, width: f64, height: f64);
    fn reset_orientation_properties(&self);
    fn set_host_env(&self, env: HostEnv);
}
