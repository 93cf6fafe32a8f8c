/// Bounds `value` to `[min, max]`.
///
/// When the range is inverted the lower bound wins, so callers that compute
/// `[-max, 0]` from a negative `max` still land on a finite value.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    min.max(max.min(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_range_is_identity() {
        assert_eq!(clamp(-40.0, -100.0, 0.0), -40.0);
    }

    #[test]
    fn clamp_pins_to_edges() {
        assert_eq!(clamp(25.0, -100.0, 0.0), 0.0);
        assert_eq!(clamp(-250.0, -100.0, 0.0), -100.0);
    }

    #[test]
    fn clamp_inverted_range_prefers_min() {
        assert_eq!(clamp(5.0, 10.0, 0.0), 10.0);
    }
}
