pub mod engine;
pub mod scoring_model;
pub mod scoring_repository;
pub mod scoring_service;
pub mod scoring_traits;

pub use scoring_model::{
    Classification, Criteria, CriterionScore, NewCriteria, RecalculationSummary, RiskLabel,
    ScoreResult, StudentCriterion, StudentScoreSummary,
};
pub use scoring_repository::ScoringRepository;
pub use scoring_service::ScoringService;
pub use scoring_traits::{ScoringRepositoryTrait, ScoringServiceTrait};
