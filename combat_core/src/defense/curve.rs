//! Defense curve - Diminishing returns on defense stats
//!
//! `mitigation = defense / (defense + divisor)`
//!
//! Approaches but never reaches 100%. The divisor sets how fast defense
//! saturates: at `defense == divisor` the curve gives exactly 50%.

/// Defense left after flat then percentage penetration, floored at 0
///
/// `max(0, (defense - flat_pen) * (1 - pen_percent / 100))`
pub fn effective_defense(defense: f64, flat_penetration: f64, percent_penetration: f64) -> f64 {
    ((defense - flat_penetration) * (1.0 - percent_penetration / 100.0)).max(0.0)
}

/// Mitigation fraction for an effective defense value
pub fn curve_mitigation(defense: f64, divisor: f64) -> f64 {
    if defense <= 0.0 {
        return 0.0;
    }
    defense / (defense + divisor)
}

/// Damage left after the defense curve
pub fn mitigate(damage: f64, defense: f64, divisor: f64) -> f64 {
    if damage <= 0.0 {
        return 0.0;
    }
    damage * (1.0 - curve_mitigation(defense, divisor))
}

/// Defense needed to reach a target mitigation fraction
pub fn defense_needed_for(target_mitigation: f64, divisor: f64) -> f64 {
    if target_mitigation <= 0.0 {
        return 0.0;
    }
    if target_mitigation >= 1.0 {
        return f64::INFINITY;
    }

    // m = d / (d + k)  =>  d = m * k / (1 - m)
    target_mitigation * divisor / (1.0 - target_mitigation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_defense() {
        assert!((curve_mitigation(0.0, 20.0) - 0.0).abs() < f64::EPSILON);
        assert!((mitigate(100.0, 0.0, 20.0) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_half_at_divisor() {
        assert!((curve_mitigation(20.0, 20.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_100_defense_vs_20_divisor() {
        // 100 / 120 = 83.33%
        let m = curve_mitigation(100.0, 20.0);
        assert!((m - 0.8333).abs() < 0.001);
        assert!((mitigate(16.5, 100.0, 20.0) - 2.75).abs() < 0.01);
    }

    #[test]
    fn test_diminishing_returns() {
        let first = curve_mitigation(100.0, 100.0) - curve_mitigation(0.0, 100.0);
        let second = curve_mitigation(200.0, 100.0) - curve_mitigation(100.0, 100.0);
        assert!(second < first);
    }

    #[test]
    fn test_effective_defense_penetration() {
        assert!((effective_defense(100.0, 0.0, 0.0) - 100.0).abs() < f64::EPSILON);
        assert!((effective_defense(100.0, 20.0, 0.0) - 80.0).abs() < f64::EPSILON);
        // (100 - 20) * (1 - 0.25) = 60
        assert!((effective_defense(100.0, 20.0, 25.0) - 60.0).abs() < f64::EPSILON);
        assert!((effective_defense(10.0, 50.0, 0.0) - 0.0).abs() < f64::EPSILON);
        assert!((effective_defense(100.0, 0.0, 100.0) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_defense_needed() {
        let needed = defense_needed_for(0.5, 20.0);
        assert!((needed - 20.0).abs() < 1e-9);
        assert!((curve_mitigation(needed, 20.0) - 0.5).abs() < 1e-9);
        assert!(defense_needed_for(1.0, 20.0).is_infinite());
    }
}
