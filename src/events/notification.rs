use std::fmt;

/// Сколько хост показывает уведомление об ошибке
pub const NOTIFICATION_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NotificationColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl NotificationColor {
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
}

/// Диагностическое сообщение для показа хостом (например, всплывающее уведомление).
///
/// Ядро только формирует содержимое, отображение целиком на стороне хоста.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub text: String,
    pub timeout_ms: u64,
    pub color: NotificationColor,
}

impl Notification {
    /// Уведомление об отброшенном сегменте правил
    pub fn invalid_rule(segment: &str) -> Self {
        Self {
            text: format!("glasswindow: Invalid regex: {}", segment),
            timeout_ms: NOTIFICATION_TIMEOUT_MS,
            color: NotificationColor::RED,
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}ms)", self.text, self.timeout_ms)
    }
}
