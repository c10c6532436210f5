//! Campaign request data model.
//!
//! A [`CampaignRequest`] is created once per prediction and never mutated.
//! The budget share of each advertising channel lives in a
//! [`ChannelAllocation`]; their total is derived, never stored.

use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

// =============================================================================
// Difficulty
// =============================================================================

/// How hard the advertised role is to fill.
///
/// Encoded as `difficulty_level_num` (0, 1, 2) in the model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Level 0.
    Easy,
    /// Level 1. Used when no difficulty is selected.
    #[default]
    Medium,
    /// Level 2.
    Hard,
}

impl Difficulty {
    /// Numeric level as seen by the model.
    #[inline]
    pub fn level(self) -> u8 {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        })
    }
}

// =============================================================================
// Channels
// =============================================================================

/// Advertising channel receiving a share of the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Meta,
    Indeed,
    LinkedIn,
    GoogleAds,
    YouTube,
}

impl Channel {
    /// All channels, in model feature order.
    pub const ALL: [Channel; 5] = [
        Channel::Meta,
        Channel::Indeed,
        Channel::LinkedIn,
        Channel::GoogleAds,
        Channel::YouTube,
    ];

    /// Name of the percentage column this channel feeds.
    pub fn feature_name(self) -> &'static str {
        match self {
            Self::Meta => "meta_pct",
            Self::Indeed => "indeed_pct",
            Self::LinkedIn => "linkedin_pct",
            Self::GoogleAds => "google_ads_pct",
            Self::YouTube => "youtube_pct",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Meta => "Meta",
            Self::Indeed => "Indeed",
            Self::LinkedIn => "LinkedIn",
            Self::GoogleAds => "Google Ads",
            Self::YouTube => "YouTube",
        })
    }
}

/// Budget split over the five channels, in whole percent.
///
/// Shares are unsigned, so a total of exactly 100 already bounds every
/// share to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelAllocation {
    #[serde(rename = "meta_pct")]
    pub meta: u8,
    #[serde(rename = "indeed_pct")]
    pub indeed: u8,
    #[serde(rename = "linkedin_pct")]
    pub linkedin: u8,
    #[serde(rename = "google_ads_pct")]
    pub google_ads: u8,
    #[serde(rename = "youtube_pct")]
    pub youtube: u8,
}

impl ChannelAllocation {
    /// Share assigned to `channel`.
    #[inline]
    pub fn get(&self, channel: Channel) -> u8 {
        match channel {
            Channel::Meta => self.meta,
            Channel::Indeed => self.indeed,
            Channel::LinkedIn => self.linkedin,
            Channel::GoogleAds => self.google_ads,
            Channel::YouTube => self.youtube,
        }
    }

    /// `(channel, share)` pairs in model feature order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, u8)> + '_ {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Sum of all shares (`sum_budget_pct`).
    #[inline]
    pub fn total(&self) -> u32 {
        self.iter().map(|(_, pct)| u32::from(pct)).sum()
    }
}

/// Shares in model feature order: meta, indeed, linkedin, google ads, youtube.
impl From<[u8; 5]> for ChannelAllocation {
    fn from([meta, indeed, linkedin, google_ads, youtube]: [u8; 5]) -> Self {
        Self {
            meta,
            indeed,
            linkedin,
            google_ads,
            youtube,
        }
    }
}

// =============================================================================
// CampaignRequest
// =============================================================================

/// Parameters of one campaign to score.
///
/// # Example
///
/// ```
/// use campaign_predictor::{CampaignRequest, Difficulty};
///
/// let request = CampaignRequest::builder()
///     .campaign_weeks(4)
///     .total_add_budget(1000)
///     .difficulty(Difficulty::Hard)
///     .allocation([30, 20, 20, 20, 10].into())
///     .build();
///
/// assert_eq!(request.sum_budget_pct(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Builder, Serialize, Deserialize)]
pub struct CampaignRequest {
    /// Campaign duration in weeks.
    campaign_weeks: u32,
    /// Total advertising budget in euro.
    total_add_budget: u32,
    /// Role difficulty. Default: `Medium`.
    #[builder(default)]
    #[serde(default)]
    difficulty: Difficulty,
    /// Budget split over the channels.
    #[serde(flatten)]
    allocation: ChannelAllocation,
}

impl CampaignRequest {
    pub fn campaign_weeks(&self) -> u32 {
        self.campaign_weeks
    }

    pub fn total_add_budget(&self) -> u32 {
        self.total_add_budget
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn allocation(&self) -> &ChannelAllocation {
        &self.allocation
    }

    /// Derived total of the channel shares.
    pub fn sum_budget_pct(&self) -> u32 {
        self.allocation.total()
    }

    /// Copy of this request with another difficulty.
    #[must_use]
    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        Self { difficulty, ..self }
    }
}
