pub mod effect_renderer;
pub mod notification_sink;
pub mod rule_engine;

pub use effect_renderer::{DryRunRenderer, EffectRenderer};
pub use notification_sink::{
    ChannelNotificationSink, CollectingNotificationSink, LogNotificationSink, NotificationSink,
};
pub use rule_engine::RuleEngine;
