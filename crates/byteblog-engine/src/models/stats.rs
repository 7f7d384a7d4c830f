use serde::{Deserialize, Serialize};

/// Dashboard counters. `Default` is the all-zero value shown when the stats
/// endpoint is unavailable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardStats {
    pub total_posts: u64,
    pub total_comments: u64,
    pub total_portfolio_items: u64,
    pub total_uploads: u64,
    pub recent_posts_growth: f64,
    pub recent_comments_growth: f64,
    pub recent_portfolio_growth: f64,
    pub recent_uploads_growth: f64,
}
