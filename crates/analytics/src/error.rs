use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("Invalid UTC offset: {0} hours")]
    InvalidOffset(i32),

    #[error("Unknown symbol filter: '{0}'")]
    InvalidFilter(String),
}
