//! Aggregate statistics: the users list header and the dashboard.

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::resources::user::{User, UserRole, UserStatus};
use crate::types::{RowId, Timestamp};

/// Length of one growth window, in days.
pub const GROWTH_WINDOW_DAYS: i64 = 30;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleCounts {
    pub fan: u64,
    pub business: u64,
    pub admin: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total: u64,
    pub active: u64,
    pub suspended: u64,
    pub premium: u64,
    pub by_role: RoleCounts,
    /// Users created in the last [`GROWTH_WINDOW_DAYS`] days.
    pub new_last_30_days: u64,
    /// Users created in the window before that.
    pub new_previous_30_days: u64,
    /// Percentage change between the two windows; `None` when the previous
    /// window is empty.
    pub growth_pct: Option<f64>,
}

/// Row count of every resource collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub users: u64,
    pub subscribers: u64,
    pub products: u64,
    pub posts: u64,
    pub integrations: u64,
    pub roles: u64,
    pub plans: u64,
    pub chats: u64,
}

/// Points in each dashboard trend series, one per calendar month.
pub const TREND_MONTHS: usize = 12;

/// Rows created per calendar month, oldest month first; the last point is
/// the current month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardTrends {
    pub users: Vec<u64>,
    pub subscribers: Vec<u64>,
}

/// Default length of the dashboard's recent signups list.
pub const RECENT_USERS_LIMIT: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentUser {
    #[serde(rename = "_id")]
    pub id: RowId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: Timestamp,
}

impl From<&User> for RecentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// The newest `limit` users.
pub fn recent_users<'a>(users: impl IntoIterator<Item = &'a User>, limit: usize) -> Vec<RecentUser> {
    let mut users: Vec<&User> = users.into_iter().collect();
    users.sort_by_key(|u| std::cmp::Reverse(u.created_at));
    users.into_iter().take(limit).map(RecentUser::from).collect()
}

fn month_number(ts: Timestamp) -> i64 {
    i64::from(ts.year()) * 12 + i64::from(ts.month0())
}

/// Count `timestamps` into the [`TREND_MONTHS`] calendar months ending with
/// the month of `now`. Anything outside that range is ignored.
pub fn monthly_counts(timestamps: impl IntoIterator<Item = Timestamp>, now: Timestamp) -> Vec<u64> {
    let mut counts = vec![0; TREND_MONTHS];
    let current = month_number(now);
    for ts in timestamps {
        let age = current - month_number(ts);
        if (0..TREND_MONTHS as i64).contains(&age) {
            counts[TREND_MONTHS - 1 - age as usize] += 1;
        }
    }
    counts
}

impl UserStats {
    pub fn compute<'a>(users: impl IntoIterator<Item = &'a User>, now: Timestamp) -> Self {
        let window = Duration::days(GROWTH_WINDOW_DAYS);
        let recent_start = now - window;
        let previous_start = recent_start - window;

        let mut stats = Self::default();
        for user in users {
            stats.total += 1;
            match user.status {
                UserStatus::Active => stats.active += 1,
                UserStatus::Suspended => stats.suspended += 1,
            }
            if user.premium {
                stats.premium += 1;
            }
            match user.role {
                UserRole::Fan => stats.by_role.fan += 1,
                UserRole::Business => stats.by_role.business += 1,
                UserRole::Admin => stats.by_role.admin += 1,
            }
            if user.created_at > recent_start && user.created_at <= now {
                stats.new_last_30_days += 1;
            } else if user.created_at > previous_start && user.created_at <= recent_start {
                stats.new_previous_30_days += 1;
            }
        }

        stats.growth_pct = (stats.new_previous_30_days > 0).then(|| {
            let prev = stats.new_previous_30_days as f64;
            (stats.new_last_30_days as f64 - prev) / prev * 100.0
        });
        stats
    }
}
