mod grade;
mod progress;
mod question;
mod user;

pub use grade::{Difficulty, GradeError, GradeTier};
pub use progress::{GradeProgress, Progress, score_percent};
pub use question::{Operator, Question};
pub use user::{BADGE_INTERVAL, Badge, User, UserError, Username, next_streak};
