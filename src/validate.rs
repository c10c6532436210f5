//! Request validation.
//!
//! A request reaches the model only if its channel shares add up to exactly
//! 100% and its duration and budget lie inside the [`TrainingRange`].
//! The allocation check runs first, so a request failing both is reported as
//! an allocation mismatch.

use thiserror::Error;

use crate::config::TrainingRange;
use crate::request::CampaignRequest;

/// Why a request was rejected before inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Channel shares do not sum to 100.
    #[error("Budget distribution must equal 100% (got {total}%)")]
    AllocationMismatch { total: u32 },

    /// Duration or budget outside the range the model was trained on.
    #[error("Not enough data to make a reliable prediction. Try adjusting budget or duration.")]
    OutOfTrainingRange { weeks: u32, budget: u32 },
}

impl ValidationError {
    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::AllocationMismatch { .. } => "allocation-mismatch",
            Self::OutOfTrainingRange { .. } => "out-of-training-range",
        }
    }
}

/// A request that passed validation.
///
/// Only [`Validator::validate`] creates these, so holding one proves the
/// checks ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted(CampaignRequest);

impl Accepted {
    pub fn request(&self) -> &CampaignRequest {
        &self.0
    }
}

/// Checks requests against the allocation and training-range constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    range: TrainingRange,
}

impl Validator {
    pub fn new(range: TrainingRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> &TrainingRange {
        &self.range
    }

    /// Accept or reject `request`.
    pub fn validate(&self, request: &CampaignRequest) -> Result<Accepted, ValidationError> {
        let total = request.sum_budget_pct();
        if total != 100 {
            tracing::debug!(total, "rejected: allocation mismatch");
            return Err(ValidationError::AllocationMismatch { total });
        }

        let (weeks, budget) = (request.campaign_weeks(), request.total_add_budget());
        if !self.range.covers(weeks, budget) {
            tracing::debug!(weeks, budget, "rejected: outside training range");
            return Err(ValidationError::OutOfTrainingRange { weeks, budget });
        }

        Ok(Accepted(*request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use rstest::rstest;

    fn request(weeks: u32, budget: u32, shares: [u8; 5]) -> CampaignRequest {
        CampaignRequest::builder()
            .campaign_weeks(weeks)
            .total_add_budget(budget)
            .allocation(shares.into())
            .build()
    }

    #[rstest]
    #[case(2, 750)]
    #[case(8, 3000)]
    #[case(4, 1000)]
    #[case(2, 3000)]
    #[case(8, 750)]
    fn accepts_inside_range(#[case] weeks: u32, #[case] budget: u32) {
        let req = request(weeks, budget, [20; 5]);
        let accepted = Validator::default().validate(&req).unwrap();
        assert_eq!(accepted.request(), &req);
    }

    #[rstest]
    #[case(1, 1000)]
    #[case(9, 1000)]
    #[case(4, 749)]
    #[case(4, 3001)]
    #[case(0, 0)]
    #[case(12, 2500)]
    fn rejects_outside_range(#[case] weeks: u32, #[case] budget: u32) {
        let err = Validator::default()
            .validate(&request(weeks, budget, [20; 5]))
            .unwrap_err();
        assert_eq!(err, ValidationError::OutOfTrainingRange { weeks, budget });
        assert_eq!(err.reason(), "out-of-training-range");
    }

    #[rstest]
    #[case([30, 20, 20, 20, 20], 110)]
    #[case([0, 0, 0, 0, 0], 0)]
    #[case([20, 20, 20, 20, 19], 99)]
    #[case([255, 255, 255, 255, 255], 1275)]
    fn rejects_allocation_mismatch(#[case] shares: [u8; 5], #[case] total: u32) {
        let err = Validator::default()
            .validate(&request(4, 1000, shares))
            .unwrap_err();
        assert_eq!(err, ValidationError::AllocationMismatch { total });
        assert_eq!(err.reason(), "allocation-mismatch");
    }

    #[test]
    fn allocation_checked_before_range() {
        let err = Validator::default()
            .validate(&request(20, 10, [50, 50, 50, 0, 0]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::AllocationMismatch { total: 150 }));
    }

    #[test]
    fn single_channel_allocation_is_valid() {
        assert!(Validator::default().validate(&request(4, 1000, [0, 0, 100, 0, 0])).is_ok());
    }

    #[test]
    fn custom_range() {
        let validator = Validator::new(TrainingRange {
            weeks: Bounds::new(1, 12),
            budget: Bounds::new(0, 2500),
        });
        assert!(validator.validate(&request(1, 0, [20; 5])).is_ok());
        assert!(validator.validate(&request(12, 2501, [20; 5])).is_err());
    }

    #[test]
    fn messages_show_allocation_total() {
        let err = ValidationError::AllocationMismatch { total: 110 };
        assert_eq!(err.to_string(), "Budget distribution must equal 100% (got 110%)");
    }

    #[test]
    fn messages_for_out_of_range() {
        let err = Validator::default()
            .validate(&request(9, 1000, [20; 5]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not enough data to make a reliable prediction. Try adjusting budget or duration."
        );
    }
}
