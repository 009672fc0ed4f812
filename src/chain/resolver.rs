//! Chain resolution - ranks intents and classifies how they combine
//!
//! Each intent gets a priority tier from its category and a score of
//! `intensity × temporal weight`. The chain is stably sorted by
//! (priority, score) descending, and the top two are compared to pick a
//! [`ResolutionMode`]. The winner is always the effective intent.

use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

use crate::core::config::ResolverConfig;
use crate::intent::{Intent, ResolutionMode};

pub const EMPTY_EXPLANATION: &str = "No active intentions.";
pub const SINGLE_EXPLANATION: &str = "Single active intent resolved directly.";

/// One intent's place in the resolution ordering
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedIntent {
    /// Index in the chain that was resolved
    pub position: usize,
    pub intent: Intent,
    pub priority: u8,
    pub score: f64,
}

/// Outcome of resolving a chain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub mode: ResolutionMode,
    /// The rank-0 intent, `None` only for an empty chain
    pub effective: Option<Intent>,
    pub explanation: String,
    /// Every intent, highest ranked first
    pub ranking: Vec<RankedIntent>,
}

impl Resolution {
    fn empty() -> Self {
        Self {
            mode: ResolutionMode::Dominant,
            effective: None,
            explanation: EMPTY_EXPLANATION.to_string(),
            ranking: Vec::new(),
        }
    }

    pub fn winner(&self) -> Option<&RankedIntent> {
        self.ranking.first()
    }

    pub fn runner_up(&self) -> Option<&RankedIntent> {
        self.ranking.get(1)
    }
}

/// Resolve a chain with the default thresholds and weights
pub fn resolve(chain: &[Intent]) -> Resolution {
    resolve_with(chain, &ResolverConfig::default())
}

/// Resolve a chain with explicit thresholds and weights
pub fn resolve_with(chain: &[Intent], config: &ResolverConfig) -> Resolution {
    let ranking = rank(chain, config);

    let (winner, runner_up) = match ranking.as_slice() {
        [] => return Resolution::empty(),
        [single] => {
            tracing::debug!("Resolved single intent {}", single.intent.intent_type);
            return Resolution {
                mode: ResolutionMode::Dominant,
                effective: Some(single.intent),
                explanation: SINGLE_EXPLANATION.to_string(),
                ranking,
            };
        }
        [winner, runner_up, ..] => (*winner, *runner_up),
    };

    let mode = classify(&winner, &runner_up, config);
    let explanation = explain(mode, &winner, &runner_up);

    tracing::debug!(
        "Resolved {} intents: {} ({} over {})",
        ranking.len(),
        mode,
        winner.intent.intent_type,
        runner_up.intent.intent_type
    );

    Resolution {
        mode,
        effective: Some(winner.intent),
        explanation,
        ranking,
    }
}

/// Stable descending sort by (priority, score); equal keys keep chain order
fn rank(chain: &[Intent], config: &ResolverConfig) -> Vec<RankedIntent> {
    let mut ranking: Vec<RankedIntent> = chain
        .iter()
        .enumerate()
        .map(|(position, intent)| RankedIntent {
            position,
            intent: *intent,
            priority: config.priorities.tier(intent.category()),
            score: intent.intensity.value() * config.temporal_weights.weight(intent.temporal),
        })
        .collect();

    ranking.sort_by_key(|r| Reverse((r.priority, OrderedFloat(r.score))));
    ranking
}

fn classify(
    winner: &RankedIntent,
    runner_up: &RankedIntent,
    config: &ResolverConfig,
) -> ResolutionMode {
    let score_diff = winner.score - runner_up.score;
    let different_categories = winner.priority != runner_up.priority;

    if different_categories
        && winner.score < config.conflict_score_ceiling
        && score_diff < config.conflict_score_gap
    {
        ResolutionMode::Conflicted
    } else if score_diff < config.blend_score_gap {
        ResolutionMode::Blended
    } else {
        ResolutionMode::Dominant
    }
}

fn explain(mode: ResolutionMode, winner: &RankedIntent, runner_up: &RankedIntent) -> String {
    let w = winner.intent.intent_type;
    let r = runner_up.intent.intent_type;
    match mode {
        ResolutionMode::Conflicted => format!(
            "Conflict between {} and {}. Priority rules favor {}-series.",
            w,
            r,
            winner.intent.category().letter()
        ),
        ResolutionMode::Blended => {
            format!("Similar intensities for {} and {} result in a blended state.", w, r)
        }
        ResolutionMode::Dominant => {
            format!("{} is dominant due to higher intensity and priority.", w)
        }
    }
}
