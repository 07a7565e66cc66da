//! Property tests for the risk scoring model.

use proptest::prelude::*;

use custodian::scoring::{level_from_score, overall_level, risk_score};
use custodian::{Risk, RiskLevel};

fn any_level() -> impl Strategy<Value = RiskLevel> {
    proptest::sample::select(RiskLevel::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the score is always the product of the weights.
    #[test]
    fn property_score_is_weight_product(
        likelihood in any_level(),
        impact in any_level(),
    ) {
        let score = risk_score(likelihood, impact);
        prop_assert_eq!(score, likelihood.weight() * impact.weight());
        prop_assert!((1..=25).contains(&score));
    }

    /// PROPERTY: `level_from_score` is monotonically non-decreasing.
    #[test]
    fn property_level_from_score_is_monotone(
        a in 1u8..=25,
        b in 1u8..=25,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_from_score(lo) <= level_from_score(hi));
    }

    /// PROPERTY: the overall level is the level of the maximum score.
    #[test]
    fn property_overall_level_is_level_of_max(
        scores in proptest::collection::vec(1u8..=25, 0..12),
    ) {
        let overall = overall_level(scores.clone());
        match scores.iter().max() {
            Some(&max) => prop_assert_eq!(overall, level_from_score(max)),
            None => prop_assert_eq!(overall, RiskLevel::Low),
        }
    }

    /// PROPERTY: after any sequence of re-ratings, a risk's stored
    /// score and residual level agree with its likelihood and impact.
    #[test]
    fn property_score_and_level_never_disagree(
        ratings in proptest::collection::vec((any_level(), any_level()), 1..8),
    ) {
        let mut risk = Risk::new("probe", "test", RiskLevel::Low, RiskLevel::Low);
        for (likelihood, impact) in ratings {
            risk.set_ratings(likelihood, impact);
            prop_assert_eq!(risk.risk_score, risk_score(risk.likelihood, risk.impact));
            prop_assert_eq!(risk.residual_risk, level_from_score(risk.risk_score));
        }
    }
}
