//! Data module - survey loading and caching

mod cache;
mod loader;

pub use cache::SurveyCache;
pub use loader::{
    fill_missing_availability, load_survey, LoaderError, SurveyData, CHALLENGE_COLUMN,
    SATISFACTION_COLUMN, SCHEMA,
};
