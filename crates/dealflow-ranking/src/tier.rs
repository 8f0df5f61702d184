//! Tier classification and acquisition-appetite helpers.

use dealflow_core::{Tier, TierThresholds};

/// Sort ordinal for an acquisition appetite: lower sorts earlier.
///
/// `aggressive`=0, `active`=1, `selective`=2, `opportunistic`=3, anything
/// else (including missing) = 4. Matching ignores case and surrounding
/// whitespace.
#[must_use]
pub fn appetite_ordinal(appetite: Option<&str>) -> u8 {
    let normalized = appetite.map(|a| a.trim().to_ascii_lowercase());
    match normalized.as_deref() {
        Some("aggressive") => 0,
        Some("active") => 1,
        Some("selective") => 2,
        Some("opportunistic") => 3,
        _ => 4,
    }
}

/// `true` for `aggressive` or `active` appetites.
#[must_use]
pub fn is_hot_appetite(appetite: Option<&str>) -> bool {
    appetite_ordinal(appetite) <= 1
}

/// Place a buyer into a [`Tier`].
///
/// Monotonic in `score` for fixed signals; a fee agreement or hot appetite
/// can only move a buyer up.
#[must_use]
pub fn classify_tier(
    score: f64,
    has_fee_agreement: bool,
    appetite: Option<&str>,
    thresholds: &TierThresholds,
) -> Tier {
    let ready = has_fee_agreement || is_hot_appetite(appetite);

    if score >= thresholds.move_now_min && (ready || !thresholds.move_now_requires_readiness) {
        Tier::MoveNow
    } else if score >= thresholds.strong_candidate_min {
        Tier::StrongCandidate
    } else {
        Tier::Speculative
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appetite_ordinal_known_values() {
        assert_eq!(appetite_ordinal(Some("aggressive")), 0);
        assert_eq!(appetite_ordinal(Some("Active")), 1);
        assert_eq!(appetite_ordinal(Some(" SELECTIVE ")), 2);
        assert_eq!(appetite_ordinal(Some("opportunistic")), 3);
    }

    #[test]
    fn appetite_ordinal_unknown_and_missing() {
        assert_eq!(appetite_ordinal(Some("dormant")), 4);
        assert_eq!(appetite_ordinal(Some("")), 4);
        assert_eq!(appetite_ordinal(None), 4);
    }

    #[test]
    fn high_score_with_fee_and_aggressive_is_move_now() {
        let tier = classify_tier(90.0, true, Some("aggressive"), &TierThresholds::default());
        assert_eq!(tier, Tier::MoveNow);
    }

    #[test]
    fn high_score_without_readiness_is_strong_candidate() {
        let tier = classify_tier(95.0, false, Some("selective"), &TierThresholds::default());
        assert_eq!(tier, Tier::StrongCandidate);
    }

    #[test]
    fn readiness_requirement_can_be_disabled() {
        let thresholds = TierThresholds {
            move_now_requires_readiness: false,
            ..TierThresholds::default()
        };
        assert_eq!(classify_tier(80.0, false, None, &thresholds), Tier::MoveNow);
    }

    #[test]
    fn mid_score_is_strong_candidate() {
        let tier = classify_tier(60.0, false, None, &TierThresholds::default());
        assert_eq!(tier, Tier::StrongCandidate);
    }

    #[test]
    fn low_score_is_speculative_even_with_signals() {
        let tier = classify_tier(59.9, true, Some("aggressive"), &TierThresholds::default());
        assert_eq!(tier, Tier::Speculative);
    }

    #[test]
    fn classification_is_monotonic_in_score() {
        let thresholds = TierThresholds::default();
        let rank = |tier: Tier| match tier {
            Tier::Speculative => 0,
            Tier::StrongCandidate => 1,
            Tier::MoveNow => 2,
        };
        for (fee, appetite) in [
            (false, None),
            (true, None),
            (false, Some("active")),
            (true, Some("aggressive")),
        ] {
            let mut previous = 0;
            for score in 0..=100 {
                let current = rank(classify_tier(f64::from(score), fee, appetite, &thresholds));
                assert!(current >= previous, "tier dropped at score {score}");
                previous = current;
            }
        }
    }
}
