//! Protocol engine between a rich-media ad creative and its host SDK.
//!
//! The creative talks to the [`Mediator`] through [`CreativeApi`]; the host
//! pushes environment facts and state changes through [`HostApi`]. Commands
//! bound for the host leave through the [`outbound`] queue.

pub mod api;
pub mod bridge;
pub mod config;
pub mod events;
pub mod features;
pub mod logger;
pub mod mediator;
pub mod outbound;
pub mod properties;
pub mod scheduler;
pub mod validate;

pub use api::{CreativeApi, HostApi};
pub use bridge::{Bridge, MessageBridge};
pub use config::{EngineConfig, DEFAULT_VERSION};
pub use events::{EventArgs, EventManager, Listener, ListenerArg};
pub use features::DeviceFeatures;
pub use mediator::Mediator;
pub use outbound::{NativeCallQueue, Navigator, SdkNotifier};
pub use properties::{ExpandProperties, OrientationProperties, PropertyBag, ResizeProperties};
pub use scheduler::{LocalTaskScheduler, ManualScheduler, Scheduler};
