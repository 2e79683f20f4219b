// ── Status banner ──

use std::fmt;
use std::time::{Duration, Instant};

/// How long a success banner stays visible.
pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(2);

/// What the banner above a table is reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    /// Nothing has happened yet.
    Idle,
    Loading,
    Loaded,
    LoadError(String),
    OperationSucceeded(String),
    OperationFailed { operation: String, message: String },
}

/// A status message plus the moment it was set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub kind: StatusKind,
    pub set_at: Instant,
}

impl StatusBanner {
    pub fn new(kind: StatusKind) -> Self {
        Self {
            kind,
            set_at: Instant::now(),
        }
    }

    /// Success banners fade after [`SUCCESS_BANNER_TTL`]; errors and
    /// in-progress banners stay until replaced.
    pub fn is_visible(&self, now: Instant) -> bool {
        match self.kind {
            StatusKind::Idle => false,
            StatusKind::Loaded | StatusKind::OperationSucceeded(_) => {
                now.saturating_duration_since(self.set_at) < SUCCESS_BANNER_TTL
            }
            StatusKind::Loading
            | StatusKind::LoadError(_)
            | StatusKind::OperationFailed { .. } => true,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self.kind,
            StatusKind::LoadError(_) | StatusKind::OperationFailed { .. }
        )
    }
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self::new(StatusKind::Idle)
    }
}

impl fmt::Display for StatusBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StatusKind::Idle => Ok(()),
            StatusKind::Loading => f.write_str("Loading…"),
            StatusKind::Loaded => f.write_str("Loaded"),
            StatusKind::LoadError(msg) => write!(f, "Load failed: {msg}"),
            StatusKind::OperationSucceeded(op) => write!(f, "{op} succeeded"),
            StatusKind::OperationFailed { operation, message } => {
                write!(f, "{operation} failed: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_banner_fades() {
        let banner = StatusBanner::new(StatusKind::OperationSucceeded("remove-key".into()));
        assert!(banner.is_visible(banner.set_at + Duration::from_millis(1500)));
        assert!(!banner.is_visible(banner.set_at + Duration::from_secs(2)));
    }

    #[test]
    fn errors_persist() {
        let banner = StatusBanner::new(StatusKind::OperationFailed {
            operation: "add-key".into(),
            message: "exists".into(),
        });
        assert!(banner.is_visible(banner.set_at + Duration::from_secs(3600)));
        assert!(banner.is_error());
        assert_eq!(banner.to_string(), "add-key failed: exists");
    }
}
