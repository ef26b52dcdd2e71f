use services::ProgressReport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressRowVm {
    pub label: String,
    pub correct: u32,
    pub attempts: u32,
    pub percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub username: String,
    pub rows: Vec<ProgressRowVm>,
    pub score: u8,
}

#[must_use]
pub fn map_progress(report: &ProgressReport) -> ProgressVm {
    ProgressVm {
        username: report.username.clone(),
        rows: report
            .rows
            .iter()
            .map(|row| ProgressRowVm {
                label: row.grade.label().to_owned(),
                correct: row.counts.correct,
                attempts: row.counts.attempts,
                percent: row.percent,
            })
            .collect(),
        score: report.score,
    }
}
