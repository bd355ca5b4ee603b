//! User-visible notifications produced by the controllers.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A toast: short title plus a one-line description.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn success(description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, "Success", description)
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, "Error", description)
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Most recent notices, oldest dropped once `capacity` is reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeTray {
    entries: std::collections::VecDeque<(u64, Notice)>,
    capacity: usize,
    next_id: u64,
}

impl NoticeTray {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: std::collections::VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Add a notice and return its id for [`NoticeTray::dismiss`].
    pub fn push(&mut self, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back((id, notice));
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        id
    }

    /// Change the limit, dropping the oldest notices that no longer fit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (u64, &Notice)> {
        self.entries.iter().map(|(id, notice)| (*id, notice))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tray_drops_oldest_past_capacity() {
        let mut tray = NoticeTray::new(2);
        tray.push(Notice::success("one"));
        tray.push(Notice::success("two"));
        tray.push(Notice::error("three"));

        let descriptions: Vec<_> = tray.iter().map(|(_, n)| n.description.as_str()).collect();
        assert_eq!(descriptions, vec!["two", "three"]);
    }

    #[test]
    fn test_shrinking_capacity_drops_oldest() {
        let mut tray = NoticeTray::new(5);
        for text in ["one", "two", "three"] {
            tray.push(Notice::success(text));
        }

        tray.set_capacity(1);
        assert_eq!(tray.len(), 1);
        assert_eq!(tray.iter().next().map(|(_, n)| n.description.as_str()), Some("three"));

        tray.set_capacity(0);
        assert_eq!(tray.capacity(), 1);
    }

    #[test]
    fn test_dismiss_removes_only_that_notice() {
        let mut tray = NoticeTray::new(5);
        let first = tray.push(Notice::success("one"));
        tray.push(Notice::success("two"));

        tray.dismiss(first);
        tray.dismiss(first);

        assert_eq!(tray.len(), 1);
        assert_eq!(tray.iter().next().map(|(_, n)| n.description.clone()), Some("two".to_string()));
    }

    #[test]
    fn test_error_helper() {
        let notice = Notice::error("Failed");
        assert!(notice.is_error());
        assert_eq!(notice.title, "Error");
        assert!(!Notice::success("ok").is_error());
    }
}
