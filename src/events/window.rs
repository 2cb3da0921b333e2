use serde::{Deserialize, Serialize};
use std::fmt;

/// Информация об окне, которую хост передаёт на каждом проходе рендера
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WindowInfo {
    pub title: String,
    pub class: String,
}

impl WindowInfo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            class: String::new(),
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }
}

impl fmt::Display for WindowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_empty() {
            write!(f, "\"{}\"", self.title)
        } else {
            write!(f, "\"{}\" ({})", self.title, self.class)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_info_creation() {
        let window = WindowInfo::new("Test Window").with_class("TestApp");

        assert_eq!(window.title, "Test Window");
        assert_eq!(window.class, "TestApp");
    }

    #[test]
    fn test_window_info_display() {
        assert_eq!(WindowInfo::new("kitty").to_string(), "\"kitty\"");
        assert_eq!(
            WindowInfo::new("nvim").with_class("kitty").to_string(),
            "\"nvim\" (kitty)"
        );
    }
}
