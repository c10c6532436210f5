//! Model input assembly.
//!
//! The scaler and reducer were fitted on columns in exactly the order of
//! [`FEATURE_NAMES`]. Any other order still produces numbers, just wrong
//! ones, so the layout is fixed here and nowhere else.

use ndarray::ArrayView1;

use crate::validate::Accepted;

/// Number of model input columns.
pub const N_FEATURES: usize = 9;

/// Model input columns, in fitted order.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "campaign_weeks",
    "total_add_budget",
    "difficulty_level_num",
    "meta_pct",
    "indeed_pct",
    "linkedin_pct",
    "google_ads_pct",
    "youtube_pct",
    "sum_budget_pct",
];

/// One row of model input, laid out as [`FEATURE_NAMES`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    /// Build the input row for a validated request.
    pub fn assemble(accepted: Accepted) -> Self {
        let request = accepted.request();
        let mut values = [0.0; N_FEATURES];

        values[0] = f64::from(request.campaign_weeks());
        values[1] = f64::from(request.total_add_budget());
        values[2] = f64::from(request.difficulty().level());
        for (slot, (_, pct)) in values[3..8].iter_mut().zip(request.allocation().iter()) {
            *slot = f64::from(pct);
        }
        values[8] = f64::from(request.sum_budget_pct());

        Self(values)
    }

    #[inline]
    pub fn as_array(&self) -> &[f64; N_FEATURES] {
        &self.0
    }

    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(&self.0[..])
    }

    /// Value of the named column.
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| self.0[idx])
    }

    /// `(name, value)` pairs in column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{CampaignRequest, Channel, Difficulty};
    use crate::validate::Validator;

    fn assemble(request: &CampaignRequest) -> FeatureVector {
        FeatureVector::assemble(Validator::default().validate(request).unwrap())
    }

    #[test]
    fn even_split_scenario() {
        let request = CampaignRequest::builder()
            .campaign_weeks(4)
            .total_add_budget(1000)
            .difficulty(Difficulty::Medium)
            .allocation([20; 5].into())
            .build();

        assert_eq!(
            assemble(&request).as_array(),
            &[4.0, 1000.0, 1.0, 20.0, 20.0, 20.0, 20.0, 20.0, 100.0]
        );
    }

    #[test]
    fn channels_land_in_their_named_columns() {
        let request = CampaignRequest::builder()
            .campaign_weeks(6)
            .total_add_budget(2000)
            .difficulty(Difficulty::Hard)
            .allocation([10, 15, 25, 35, 15].into())
            .build();
        let features = assemble(&request);

        for channel in Channel::ALL {
            assert_eq!(
                features.get(channel.feature_name()),
                Some(f64::from(request.allocation().get(channel))),
                "{channel}"
            );
        }
        assert_eq!(features.get("difficulty_level_num"), Some(2.0));
        assert_eq!(features.get("sum_budget_pct"), Some(100.0));
        assert_eq!(features.get("unknown"), None);
    }

    #[test]
    fn channel_feature_names_are_in_schema_order() {
        let names: Vec<_> = Channel::ALL.iter().map(|c| c.feature_name()).collect();
        assert_eq!(names, FEATURE_NAMES[3..8]);
    }

    #[test]
    fn view_and_named_agree() {
        let request = CampaignRequest::builder()
            .campaign_weeks(3)
            .total_add_budget(900)
            .allocation([40, 30, 10, 10, 10].into())
            .build();
        let features = assemble(&request);

        assert_eq!(features.view().len(), N_FEATURES);
        for (idx, (name, value)) in features.named().enumerate() {
            assert_eq!(name, FEATURE_NAMES[idx]);
            assert_eq!(value, features.view()[idx]);
        }
    }
}
