//! Parent dashboard: mock usage statistics, child selector and the daily
//! time limit.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Child {
    pub id: u32,
    pub name: String,
    pub age: u8,
    pub avatar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub messages_sent: u32,
    pub session_seconds: u64,
    pub topics: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub date: String,
    pub topic: String,
    pub messages: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Journey {
    pub questions_asked: u32,
    pub topics_explored: u32,
    pub days_active: u32,
}

/// One "Learning Progress" meter
#[derive(Debug, Clone, Deserialize)]
pub struct ProgressStat {
    pub label: String,
    pub percent: u8,
}

/// Mock data shared by the dashboard and the profile panel
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardData {
    pub time_limits_minutes: Vec<u32>,
    pub total_sessions: u32,
    pub safety_features: Vec<String>,
    pub children: Vec<Child>,
    pub daily_stats: Vec<DailyStat>,
    pub chat_history: Vec<HistoryEntry>,
    pub achievements: Vec<Achievement>,
    pub journey: Journey,
    #[serde(default)]
    pub learning_progress: Vec<ProgressStat>,
}

/// "{h}h {m}m" from one hour up, otherwise "{m}m"
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Selector label for a daily limit
pub fn limit_label(minutes: u32) -> String {
    match (minutes / 60, minutes % 60) {
        (0, m) => format!("{} minutes", m),
        (1, 0) => "1 hour".to_string(),
        (h, 0) => format!("{} hours", h),
        (h, 30) => format!("{}.5 hours", h),
        _ => format_duration(minutes as u64 * 60),
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    data: DashboardData,
    child: usize,
    limit: usize,
}

impl Dashboard {
    pub fn new(data: DashboardData) -> Self {
        Self {
            data,
            child: 0,
            limit: 0,
        }
    }

    pub fn data(&self) -> &DashboardData {
        &self.data
    }

    pub fn children(&self) -> &[Child] {
        &self.data.children
    }

    pub fn selected_child_index(&self) -> usize {
        self.child
    }

    pub fn selected_child(&self) -> Option<&Child> {
        self.data.children.get(self.child)
    }

    pub fn next_child(&mut self) {
        let len = self.data.children.len().max(1);
        self.child = (self.child + 1) % len;
    }

    pub fn daily_limit_minutes(&self) -> Option<u32> {
        self.data.time_limits_minutes.get(self.limit).copied()
    }

    pub fn cycle_time_limit(&mut self) {
        let len = self.data.time_limits_minutes.len().max(1);
        self.limit = (self.limit + 1) % len;
        tracing::info!(minutes = ?self.daily_limit_minutes(), "Daily time limit changed");
    }

    pub fn total_messages(&self) -> u32 {
        self.data.daily_stats.iter().map(|d| d.messages_sent).sum()
    }

    pub fn total_seconds(&self) -> u64 {
        self.data.daily_stats.iter().map(|d| d.session_seconds).sum()
    }

    pub fn average_daily_seconds(&self) -> u64 {
        match self.data.daily_stats.len() {
            0 => 0,
            days => self.total_seconds() / days as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentPack;

    fn dashboard() -> Dashboard {
        Dashboard::new(ContentPack::embedded().unwrap().dashboard)
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0m");
        assert_eq!(format_duration(59), "0m");
        assert_eq!(format_duration(1200), "20m");
        assert_eq!(format_duration(3600), "1h 0m");
        assert_eq!(format_duration(7300), "2h 1m");
    }

    #[test]
    fn test_totals() {
        let d = dashboard();
        assert_eq!(d.total_messages(), 92);
        assert_eq!(d.total_seconds(), 7300);
        assert_eq!(format_duration(d.total_seconds()), "2h 1m");
        assert_eq!(d.average_daily_seconds(), 1460);
    }

    #[test]
    fn test_time_limit_cycles() {
        let mut d = dashboard();
        assert_eq!(d.daily_limit_minutes(), Some(30));
        let seen: Vec<u32> = (0..4)
            .map(|_| {
                d.cycle_time_limit();
                d.daily_limit_minutes().unwrap()
            })
            .collect();
        assert_eq!(seen, vec![60, 90, 120, 30]);
    }

    #[test]
    fn test_limit_labels() {
        let labels: Vec<String> = [30, 60, 90, 120, 45, 100].iter().map(|&m| limit_label(m)).collect();
        assert_eq!(
            labels,
            vec!["30 minutes", "1 hour", "1.5 hours", "2 hours", "45 minutes", "1h 40m"]
        );
    }

    #[test]
    fn test_child_selection_wraps() {
        let mut d = dashboard();
        assert_eq!(d.selected_child().unwrap().name, "Emma");
        d.next_child();
        assert_eq!(d.selected_child().unwrap().name, "Alex");
        d.next_child();
        assert_eq!(d.selected_child_index(), 0);
    }
}
