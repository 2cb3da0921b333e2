pub mod effect;
pub mod notification;
pub mod window;

pub use effect::{EffectParameters, RenderDecision};
pub use notification::{Notification, NotificationColor};
pub use window::WindowInfo;
