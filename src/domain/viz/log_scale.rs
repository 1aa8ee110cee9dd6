/// Maps values spanning several orders of magnitude onto a linear range,
/// e.g. a slider position onto an attention cut-off.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogScale {
    range: (f64, f64),
    log_values: (f64, f64),
    factor: f64,
}

impl LogScale {
    /// `range` is the linear output range, `values` the (positive) min and max
    /// of the values being scaled.
    pub fn new(range: (f64, f64), values: (f64, f64)) -> Self {
        let log_values = (values.0.ln(), values.1.ln());
        let factor = (log_values.1 - log_values.0) / (range.1 - range.0);
        Self {
            range,
            log_values,
            factor,
        }
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Position of `value` within the range
    pub fn scale(&self, value: f64) -> f64 {
        self.range.0 + (value.ln() - self.log_values.0) / self.factor
    }

    /// Value at position `pos`; position zero always maps to zero
    pub fn value(&self, pos: f64) -> f64 {
        if pos == 0.0 {
            return 0.0;
        }
        ((pos - self.range.0) * self.factor + self.log_values.0).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_endpoints() {
        let scale = LogScale::new((0.0, 100.0), (0.001, 1.0));
        assert!((scale.scale(0.001) - 0.0).abs() < EPSILON);
        assert!((scale.scale(1.0) - 100.0).abs() < EPSILON);
        assert!((scale.value(100.0) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_zero_position() {
        let scale = LogScale::new((0.0, 100.0), (0.001, 1.0));
        assert_eq!(scale.value(0.0), 0.0);
    }

    #[test]
    fn test_midpoint_is_geometric_mean() {
        let scale = LogScale::new((0.0, 100.0), (0.01, 1.0));
        assert!((scale.value(50.0) - 0.1).abs() < EPSILON);
    }

    #[test]
    fn test_round_trip_within_bounds() {
        let scale = LogScale::new((1.0, 100.0), (1e-4, 1.0));
        let mut v = 1e-4;
        while v <= 1.0 {
            let pos = scale.scale(v);
            let back = scale.scale(scale.value(pos));
            assert!((back - pos).abs() < 1e-6, "v={} pos={} back={}", v, pos, back);
            v *= 1.7;
        }
    }
}
