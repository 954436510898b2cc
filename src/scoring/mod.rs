pub mod engine;
pub mod validation;

pub use engine::{
    compute_quote, CriterionContribution, FeeSchedule, Quote, QuoteError, RatingSet,
    DEFAULT_RATING, MAX_RATING, MIN_RATING,
};
pub use validation::{validate_catalog, validate_schedule};
