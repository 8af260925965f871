use std::{
    fmt,
    time::{Duration, Instant},
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActionStatus {
    #[default]
    Idle,
    Loading(String),
    Success(String),
    Error(String),
}

impl ActionStatus {
    pub fn loading(message: impl Into<String>) -> Self {
        Self::Loading(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ActionStatus::Idle => None,
            ActionStatus::Loading(m) | ActionStatus::Success(m) | ActionStatus::Error(m) => Some(m),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ActionStatus::Loading(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ActionStatus::Error(_))
    }
}

impl fmt::Display for ActionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusBoard {
    pub items: ActionStatus,
    pub search: ActionStatus,
    pub lookup: ActionStatus,
    pub create: ActionStatus,
    pub update: ActionStatus,
    pub delete: ActionStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    posted_at: Instant,
}

/// Holds at most one notification and drops it once `ttl` has passed.
#[derive(Debug, Clone)]
pub struct NotificationSlot {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn post(&mut self, kind: NotificationKind, message: impl Into<String>) {
        self.post_at(kind, message, Instant::now());
    }

    pub fn post_at(&mut self, kind: NotificationKind, message: impl Into<String>, now: Instant) {
        self.current = Some(Notification {
            kind,
            message: message.into(),
            posted_at: now,
        });
    }

    pub fn current_at(&mut self, now: Instant) -> Option<&Notification> {
        let expired = self
            .current
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.posted_at) >= self.ttl);
        if expired {
            self.current = None;
        }
        self.current.as_ref()
    }

    pub fn current(&mut self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }
}
