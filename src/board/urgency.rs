//! Elapsed-time highlighting.
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    Warning,
    Danger,
}

/// Minute marks at which a card turns warning and danger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub warning: i64,
    pub danger: i64,
}

impl Thresholds {
    pub const DELIVERY_BOARD: Thresholds = Thresholds {
        warning: 15,
        danger: 25,
    };
    pub const TV_BOARD: Thresholds = Thresholds {
        warning: 15,
        danger: 30,
    };

    pub fn classify(&self, minutes: i64) -> Urgency {
        if minutes >= self.danger {
            Urgency::Danger
        } else if minutes >= self.warning {
            Urgency::Warning
        } else {
            Urgency::Normal
        }
    }
}

/// Whole minutes from `since` to `now`. A missing start counts as zero, and so
/// does a start in the future.
pub fn elapsed_minutes(since: Option<i64>, now: i64) -> i64 {
    since.map_or(0, |since| (now - since).max(0) / 60_000)
}

/// Kitchen wait label: "Waiting for seconds", "Waiting for 7 minutes",
/// "Waiting for 1h 5m". `None` when there is no start time.
pub fn relative_label(since: Option<i64>, now: i64) -> Option<String> {
    let since = since?;
    let minutes = elapsed_minutes(Some(since), now);
    Some(match minutes {
        0 => "Waiting for seconds".to_string(),
        1..=59 => format!("Waiting for {minutes} minutes"),
        _ => format!("Waiting for {}h {}m", minutes / 60, minutes % 60),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN: i64 = 60_000;

    #[test]
    fn test_delivery_thresholds() {
        let t = Thresholds::DELIVERY_BOARD;
        assert_eq!(t.classify(14), Urgency::Normal);
        assert_eq!(t.classify(15), Urgency::Warning);
        assert_eq!(t.classify(24), Urgency::Warning);
        assert_eq!(t.classify(25), Urgency::Danger);
    }

    #[test]
    fn test_tv_thresholds() {
        let t = Thresholds::TV_BOARD;
        assert_eq!(t.classify(29), Urgency::Warning);
        assert_eq!(t.classify(30), Urgency::Danger);
    }

    #[test]
    fn test_elapsed_minutes_edges() {
        assert_eq!(elapsed_minutes(None, 10 * MIN), 0);
        assert_eq!(elapsed_minutes(Some(0), 15 * MIN - 1), 14);
        assert_eq!(elapsed_minutes(Some(5 * MIN), 0), 0);
    }

    #[test]
    fn test_relative_labels() {
        assert_eq!(relative_label(None, MIN), None);
        assert_eq!(relative_label(Some(0), 59_999).as_deref(), Some("Waiting for seconds"));
        assert_eq!(relative_label(Some(0), 7 * MIN).as_deref(), Some("Waiting for 7 minutes"));
        assert_eq!(relative_label(Some(0), 65 * MIN).as_deref(), Some("Waiting for 1h 5m"));
    }
}
