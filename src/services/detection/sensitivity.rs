// Sensitivity utilities
// Sensitivity scales the weighted score AND serves as the decision threshold.
//
// With one number doing both jobs, for any sensitivity > 0 that doesn't push
// the score into the 100 clamp the verdict is effectively
// `weighted_score >= 70`; only the reported confidence moves.

/// Sensitivity at which the multiplier is 1.0.
pub const CALIBRATION_BASELINE: f64 = 70.0;

pub const MIN_SENSITIVITY: u32 = 0;
pub const MAX_SENSITIVITY: u32 = 100;

pub fn sensitivity_multiplier(sensitivity: u32) -> f64 {
    f64::from(sensitivity) / CALIBRATION_BASELINE
}

/// Scale the weighted score and clamp into [0, 100]. Unrounded.
pub fn adjusted_confidence(weighted_score: f64, sensitivity: u32) -> f64 {
    (weighted_score * sensitivity_multiplier(sensitivity)).clamp(0.0, 100.0)
}

/// Integer confidence reported to callers.
pub fn reported_confidence(confidence: f64) -> u8 {
    confidence.round() as u8
}

/// Verdict against the same sensitivity used to scale the score.
/// Compares the unrounded confidence.
pub fn decide(confidence: f64, sensitivity: u32) -> bool {
    confidence >= f64::from(sensitivity)
}

pub fn is_valid_sensitivity(sensitivity: i64) -> bool {
    (i64::from(MIN_SENSITIVITY)..=i64::from(MAX_SENSITIVITY)).contains(&sensitivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_is_a_no_op() {
        assert_eq!(sensitivity_multiplier(70), 1.0);
        assert_eq!(adjusted_confidence(42.4, 70), 42.4);
        assert_eq!(reported_confidence(adjusted_confidence(42.4, 70)), 42);
    }

    #[test]
    fn test_multiplier_extremes() {
        assert_eq!(adjusted_confidence(40.0, 140), 80.0);
        assert_eq!(adjusted_confidence(80.0, 0), 0.0);
        assert_eq!(adjusted_confidence(90.0, 100), 100.0);
    }

    #[test]
    fn test_decision_ignores_output_rounding() {
        let confidence = adjusted_confidence(69.6, 70);
        assert_eq!(reported_confidence(confidence), 70);
        assert!(!decide(confidence, 70));
        assert!(decide(adjusted_confidence(70.0, 70), 70));
    }

    #[test]
    fn test_threshold_doubles_as_multiplier() {
        // Below the 70 baseline the verdict is negative at every positive sensitivity.
        for sensitivity in [10, 50, 70, 90, 100] {
            let confidence = adjusted_confidence(60.0, sensitivity);
            assert!(!decide(confidence, sensitivity), "sensitivity {}", sensitivity);
        }
        for sensitivity in [10, 50, 70, 90] {
            let confidence = adjusted_confidence(75.0, sensitivity);
            assert!(decide(confidence, sensitivity), "sensitivity {}", sensitivity);
        }
        // Zero sensitivity zeroes the score and accepts it.
        assert!(decide(adjusted_confidence(10.0, 0), 0));
    }

    #[test]
    fn test_valid_range() {
        assert!(is_valid_sensitivity(0));
        assert!(is_valid_sensitivity(100));
        assert!(!is_valid_sensitivity(-1));
        assert!(!is_valid_sensitivity(101));
    }
}
