use services::DashboardStats;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub username: String,
    pub score: u8,
    pub streak: u32,
    pub streak_label: String,
    pub badges: Vec<String>,
}

impl From<&DashboardStats> for DashboardVm {
    fn from(stats: &DashboardStats) -> Self {
        let streak_label = match stats.streak {
            1 => "1 day".to_owned(),
            n => format!("{n} days"),
        };
        Self {
            username: stats.username.clone(),
            score: stats.score,
            streak: stats.streak,
            streak_label,
            badges: stats.badges.iter().map(|b| b.label().to_owned()).collect(),
        }
    }
}

#[must_use]
pub fn map_dashboard(stats: &DashboardStats) -> DashboardVm {
    DashboardVm::from(stats)
}
