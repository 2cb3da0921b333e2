use crate::events::Notification;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

/// Канал диагностики: куда ядро отдаёт уведомления об отброшенных правилах.
///
/// Показ уведомления (таймер, цвет, оверлей) остаётся за хостом.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Пишет уведомления в лог
#[derive(Debug, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify(&self, notification: Notification) {
        warn!("{}", notification.text);
    }
}

/// Передаёт уведомления в цикл отображения хоста
#[derive(Debug)]
pub struct ChannelNotificationSink {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotificationSink {
    pub fn new(sender: UnboundedSender<Notification>) -> Self {
        Self { sender }
    }
}

impl NotificationSink for ChannelNotificationSink {
    fn notify(&self, notification: Notification) {
        if let Err(e) = self.sender.send(notification) {
            debug!("Получатель уведомлений закрыт, уведомление отброшено: {}", e.0);
        }
    }
}

/// Копит уведомления в памяти
#[derive(Debug, Default)]
pub struct CollectingNotificationSink {
    notifications: Mutex<Vec<Notification>>,
}

impl CollectingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.notifications.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for CollectingNotificationSink {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().push(notification);
    }
}
