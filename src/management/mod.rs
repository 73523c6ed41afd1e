mod auth;
mod recommend;

pub use auth::TokenManager;
pub use recommend::DEFAULT_LIMIT;
pub use recommend::FEATURE_BATCH_SIZE;
pub use recommend::MAX_SEED_TRACKS;
pub use recommend::RecommendationEngine;
pub use recommend::TARGET_FEATURES;
pub use recommend::apply_activity_weights;
pub use recommend::apply_mood_weights;
pub use recommend::build_recommendation_request;
pub use recommend::mean_features;
