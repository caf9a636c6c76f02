//! Container state machine and the glue between creative and host.

use std::{cell::RefCell, rc::Rc};

use serde::Serialize;
use serde_json::Value;
use shared::domain::{
    AppOrientation, Feature, HostEnv, Location, OrientationType, PlacementType, Rectangle, Size,
    State,
};

use crate::{
    api::{CreativeApi, HostApi},
    bridge::Bridge,
    config::EngineConfig,
    events::{EventManager, ListenerArg},
    features::DeviceFeatures,
    logger::Logger,
    outbound::{NativeCallQueue, Navigator, SdkNotifier},
    properties::{ExpandProperties, OrientationProperties, PropertyBag, ResizeProperties},
    scheduler::Scheduler,
};

struct MediatorState {
    state: State,
    placement_type: PlacementType,
    supports: DeviceFeatures,
    resize_properties: ResizeProperties,
    expand_properties: ExpandProperties,
    orientation_properties: OrientationProperties,
    current_app_orientation: AppOrientation,
    last_size_change: Option<Size>,
    max_size: Size,
    screen_size: Size,
    current_position: Rectangle,
    default_position: Rectangle,
    viewable: bool,
    host_env: Option<HostEnv>,
}

impl Default for MediatorState {
    fn default() -> Self {
        Self {
            state: State::Loading,
            placement_type: PlacementType::Unknown,
            supports: DeviceFeatures::default(),
            resize_properties: ResizeProperties::default(),
            expand_properties: ExpandProperties::default(),
            orientation_properties: OrientationProperties::default(),
            current_app_orientation: AppOrientation::default(),
            last_size_change: None,
            max_size: Size::default(),
            screen_size: Size::default(),
            current_position: Rectangle::default(),
            default_position: Rectangle::default(),
            viewable: false,
            host_env: None,
        }
    }
}

/// One engine instance per page.
///
/// All methods take `&self` so listeners and bridges may call back in; no
/// internal borrow is held while either runs.
pub struct Mediator {
    notifier: Rc<SdkNotifier>,
    events: Rc<EventManager>,
    logger: Logger,
    config: EngineConfig,
    inner: RefCell<MediatorState>,
}

impl Mediator {
    pub fn new(notifier: Rc<SdkNotifier>, events: Rc<EventManager>) -> Self {
        Self::with_config(notifier, events, EngineConfig::default())
    }

    pub fn with_config(
        notifier: Rc<SdkNotifier>,
        events: Rc<EventManager>,
        config: EngineConfig,
    ) -> Self {
        let logger = Logger::new(
            Rc::clone(&notifier),
            Rc::clone(&events),
            config.forward_logs,
        );
        Self {
            notifier,
            events,
            logger,
            config,
            inner: RefCell::new(MediatorState::default()),
        }
    }

    /// Wires a fresh queue, notifier and event registry around the given
    /// transports.
    pub fn assemble(
        config: EngineConfig,
        bridges: Vec<Box<dyn Bridge>>,
        scheduler: Rc<dyn Scheduler>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        let queue = NativeCallQueue::new(scheduler, navigator);
        let notifier = Rc::new(SdkNotifier::new(bridges, queue, config.scheme.clone()));
        Self::with_config(notifier, Rc::new(EventManager::new()), config)
    }

    pub fn notifier(&self) -> &Rc<SdkNotifier> {
        &self.notifier
    }

    pub fn events(&self) -> &Rc<EventManager> {
        &self.events
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn host_env(&self) -> Option<HostEnv> {
        self.inner.borrow().host_env.clone()
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Strings print bare, anything else as JSON.
fn describe(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

impl CreativeApi for Mediator {
    fn get_version(&self) -> String {
        self.inner
            .borrow()
            .host_env
            .as_ref()
            .and_then(|env| env.version.clone())
            .unwrap_or_else(|| self.config.default_version.clone())
    }

    fn add_event_listener(&self, event: &Value, listener: ListenerArg) {
        let listener_type = listener.type_name();
        if let Err(err) = self.events.add_event_listener(event, listener) {
            self.logger.error(
                "addEventListener",
                &format!(
                    "{err}, event = {}, listenerType = {listener_type}",
                    describe(event)
                ),
            );
        }
    }

    fn remove_event_listener(&self, event: &Value, listener: ListenerArg) {
        let listener_type = listener.type_name();
        if let Err(err) = self.events.remove_event_listener(event, listener) {
            self.logger.error(
                "removeEventListener",
                &format!(
                    "{err}, event = {}, listenerType = {listener_type}",
                    describe(event)
                ),
            );
        }
    }

    fn open(&self, uri: &Value) {
        match uri.as_str() {
            Some(uri) => self.notifier.open(uri),
            None => self
                .logger
                .error("open", "open must be called with a valid uri."),
        }
    }

    fn close(&self) {
        self.notifier.close();
    }

    fn use_custom_close(&self, should_use_custom_close: &Value) {
        let Some(flag) = should_use_custom_close.as_bool() else {
            self.logger
                .error("useCustomClose", "'shouldUseCustomClose' is not a valid type.");
            return;
        };
        self.inner.borrow_mut().expand_properties.use_custom_close = flag;
        self.notifier.use_custom_close(flag);
    }

    fn unload(&self) {
        self.notifier.unload();
    }

    fn expand(&self, url: &Value) {
        let (state, placement_type, props) = {
            let inner = self.inner.borrow();
            (
                inner.state,
                inner.placement_type,
                inner.expand_properties.clone(),
            )
        };

        match state {
            State::Default | State::Resized => {
                if placement_type != PlacementType::Inline {
                    self.logger.error(
                        "expand",
                        &format!(
                            "expand cannot be called for the placement type {placement_type}."
                        ),
                    );
                    return;
                }
                self.notifier.expand(
                    props.width,
                    props.height,
                    props.use_custom_close,
                    props.is_modal(),
                    url.as_str().map(str::to_owned),
                );
            }
            _ => self.logger.error(
                "expand",
                &format!("expand cannot be called while state is '{state}'."),
            ),
        }
    }

    fn is_viewable(&self) -> bool {
        self.inner.borrow().viewable
    }

    fn play_video(&self, uri: &Value) {
        if !self.is_viewable() {
            self.logger.error(
                "playVideo",
                "playVideo cannot be called until the ad is viewable.",
            );
            return;
        }
        match uri.as_str() {
            Some(uri) => self.notifier.play_video(uri),
            None => self
                .logger
                .error("playVideo", "playVideo must be called with a valid uri."),
        }
    }

    fn resize(&self) {
        let (state, placement_type, props) = {
            let inner = self.inner.borrow();
            (
                inner.state,
                inner.placement_type,
                inner.resize_properties.clone(),
            )
        };

        if placement_type != PlacementType::Inline {
            self.logger.error(
                "resize",
                &format!("'{placement_type}' placement type not supported."),
            );
            return;
        }
        if !matches!(state, State::Default | State::Resized) {
            self.logger.error(
                "resize",
                &format!("resize cannot be called while state is '{state}'."),
            );
            return;
        }

        // live values are checked again; the defaults are below the minimum size
        if let Err(err) = props.validate(&props.to_value()) {
            self.logger.error("resize", &err.to_string());
            return;
        }
        self.notifier.resize(
            props.width,
            props.height,
            props.offset_x,
            props.offset_y,
            props.custom_close_position,
            props.allow_offscreen,
        );
    }

    fn store_picture(&self, uri: &Value) {
        if !self.is_viewable() {
            self.logger.error(
                "storePicture",
                "storePicture cannot be called until the ad is viewable.",
            );
            return;
        }
        match uri.as_str() {
            Some(uri) => self.notifier.store_picture(uri),
            None => self.logger.error(
                "storePicture",
                "storePicture must be called with a valid uri.",
            ),
        }
    }

    fn create_calendar_event(&self, _parameters: &Value) {
        self.logger.error(
            "createCalendarEvent",
            "createCalendarEvent is not supported.",
        );
    }

    fn supports(&self, feature: &Value) -> bool {
        match Feature::from_value(feature) {
            Some(feature) => self.inner.borrow().supports.get(feature),
            None => {
                self.logger.error("supports", "received invalid feature");
                false
            }
        }
    }

    fn get_placement_type(&self) -> PlacementType {
        self.inner.borrow().placement_type
    }

    fn get_orientation_properties(&self) -> OrientationProperties {
        self.inner.borrow().orientation_properties.clone()
    }

    fn set_orientation_properties(&self, properties: &Value) {
        let result = {
            let mut inner = self.inner.borrow_mut();
            inner
                .orientation_properties
                .update(properties)
                .map(|()| inner.orientation_properties.clone())
        };
        match result {
            Ok(updated) => self.notifier.set_orientation_properties(
                updated.allow_orientation_change,
                updated.force_orientation,
            ),
            Err(err) => self
                .logger
                .error("setOrientationProperties", &err.to_string()),
        }
    }

    fn get_current_app_orientation(&self) -> AppOrientation {
        self.inner.borrow().current_app_orientation
    }

    fn get_current_position(&self) -> Rectangle {
        self.inner.borrow().current_position
    }

    fn get_default_position(&self) -> Rectangle {
        self.inner.borrow().default_position
    }

    fn get_state(&self) -> State {
        self.inner.borrow().state
    }

    fn get_expand_properties(&self) -> ExpandProperties {
        self.inner.borrow().expand_properties.clone()
    }

    fn set_expand_properties(&self, properties: &Value) {
        let result = self.inner.borrow_mut().expand_properties.update(properties);
        if let Err(err) = result {
            self.logger.error("setExpandProperties", &err.to_string());
        }
    }

    fn get_max_size(&self) -> Size {
        self.inner.borrow().max_size
    }

    fn get_screen_size(&self) -> Size {
        self.inner.borrow().screen_size
    }

    fn get_resize_properties(&self) -> ResizeProperties {
        self.inner.borrow().resize_properties.clone()
    }

    fn set_resize_properties(&self, properties: &Value) {
        let result = self.inner.borrow_mut().resize_properties.update(properties);
        if let Err(err) = result {
            self.logger.error("setResizeProperties", &err.to_string());
        }
    }

    fn get_location(&self) -> Location {
        Location::unsupported()
    }
}

impl HostApi for Mediator {
    fn on_error(&self, message: &str, action: &str) {
        self.events.fire_error_event(message, action);
    }

    fn on_ready(&self) {
        let env = self.host_env();
        self.logger
            .debug("onReady", &format!("with host env={}", to_json(&env)));
        self.events.fire_ready_event();
    }

    fn on_size_changed(&self, width: f64, height: f64) {
        self.logger.debug(
            "onSizeChanged",
            &format!("with width={width}, height={height}"),
        );
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let repeated = inner
                .last_size_change
                .is_some_and(|last| last.width == width && last.height == height);
            if !repeated {
                inner.last_size_change = Some(Size::new(width, height));
            }
            !repeated
        };
        if changed {
            self.events.fire_size_change_event(width, height);
        }
    }

    fn on_state_changed(&self, state: State) {
        self.logger
            .debug("onStateChanged", &format!("with state={state}"));
        // resized always re-fires: a new resize may target different geometry
        let fire = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != state || state == State::Resized {
                inner.state = state;
                true
            } else {
                false
            }
        };
        if fire {
            self.events.fire_state_change_event(state);
        }
    }

    fn on_exposure_changed(
        &self,
        exposed_percentage: f64,
        visible_rectangle: Option<Rectangle>,
        occlusion_rectangles: Option<Vec<Rectangle>>,
    ) {
        self.logger.debug(
            "onExposureChanged",
            &format!(
                "with exposedPercentage={exposed_percentage}, visibleRectangle={}, \
                 occlusionRectangles={}",
                to_json(&visible_rectangle),
                to_json(&occlusion_rectangles)
            ),
        );
        self.events.fire_exposure_change_event(
            exposed_percentage,
            visible_rectangle,
            occlusion_rectangles,
        );
    }

    fn on_viewable_changed(&self, is_viewable: bool) {
        self.logger.debug(
            "onViewableChanged",
            &format!("with isViewable={is_viewable}"),
        );
        let changed = {
            let mut inner = self.inner.borrow_mut();
            let changed = inner.viewable != is_viewable;
            inner.viewable = is_viewable;
            changed
        };
        if changed {
            self.events.fire_viewable_change_event(is_viewable);
        }
    }

    fn on_audio_volume_changed(&self, volume_percentage: f64) {
        self.logger.debug(
            "onAudioVolumeChanged",
            &format!("with volumePercentage={volume_percentage}"),
        );
        if self.get_state() == State::Loading {
            self.logger.warning(
                "onAudioVolumeChanged",
                "can not change audio volume in 'loading' state.",
            );
            return;
        }
        self.events.fire_audio_volume_change_event(volume_percentage);
    }

    fn set_current_position(&self, x: f64, y: f64, width: f64, height: f64) {
        let position = Rectangle::new(x, y, width, height);
        self.inner.borrow_mut().current_position = position;
        self.logger.debug(
            "setCurrentPosition",
            &format!("set current position to {}.", to_json(&position)),
        );
    }

    fn set_screen_size(&self, width: f64, height: f64) {
        let size = Size::new(width, height);
        self.inner.borrow_mut().screen_size = size;
        self.logger.debug(
            "setScreenSize",
            &format!("set screen size to {}.", to_json(&size)),
        );
    }

    fn set_max_size(&self, width: f64, height: f64) {
        let size = Size::new(width, height);
        self.inner.borrow_mut().max_size = size;
        self.logger.debug(
            "setMaxSize",
            &format!("set max size to {}.", to_json(&size)),
        );
    }

    fn set_current_app_orientation(&self, orientation: OrientationType, locked: bool) {
        let app_orientation = AppOrientation {
            orientation,
            locked,
        };
        self.inner.borrow_mut().current_app_orientation = app_orientation;
        self.logger.debug(
            "setCurrentAppOrientation",
            &format!(
                "set current app orientation to {}.",
                to_json(&app_orientation)
            ),
        );
    }

    fn set_supports(&self, supported_features: &Value) {
        self.inner.borrow_mut().supports.update(supported_features);
        self.logger.debug(
            "setSupports",
            &format!("with {}.", to_json(supported_features)),
        );
    }

    fn set_placement_type(&self, placement_type: PlacementType) {
        self.inner.borrow_mut().placement_type = placement_type;
        self.logger.debug(
            "setPlacementType",
            &format!("set placement type to {placement_type}."),
        );
    }

    fn set_default_position(&self, x: f64, y: f64, width: f64, height: f64) {
        let position = Rectangle::new(x, y, width, height);
        self.inner.borrow_mut().default_position = position;
        self.logger.debug(
            "setDefaultPosition",
            &format!("set default position to {}.", to_json(&position)),
        );
    }

    fn reset_orientation_properties(&self) {
        let props = {
            let mut inner = self.inner.borrow_mut();
            inner.orientation_properties.reset();
            inner.orientation_properties.clone()
        };
        self.logger.debug(
            "resetOrientationProperties",
            &format!("reset orientation properties to {}.", to_json(&props)),
        );
    }

    fn set_host_env(&self, env: HostEnv) {
        let described = to_json(&env);
        self.inner.borrow_mut().host_env = Some(env);
        self.logger
            .debug("setHostEnv", &format!("with {described}."));
    }
}

#[cfg(test)]
#[path = "tests/mediator_tests.rs"]
mod tests;
