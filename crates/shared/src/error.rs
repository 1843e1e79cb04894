#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No active meal plan found. Generate a meal plan first.")]
    NoActivePlan,

    #[error("Meal plan file not found: {0}")]
    PlanNotFound(String),

    #[error("Recipe '{0}' not found")]
    RecipeNotFound(String),

    #[error("Could not parse checklist line: {0}")]
    UnparseableLine(String),

    #[error("Could not find checklist line in the meal plan: {0}")]
    LineNotFound(String),

    #[error("Week {week}, {day} not found in the meal plan")]
    EntryNotFound { week: usize, day: String },

    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Invalid(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Invalid(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Invalid(format!($fmt, $($arg)*)))
    };
}
