use thiserror::Error;

use crate::model::{GradeError, UserError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grade(#[from] GradeError),
    #[error(transparent)]
    User(#[from] UserError),
}
