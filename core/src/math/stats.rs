pub struct StatsHelper;

impl StatsHelper {
    pub fn rms(samples: &[f32]) -> f32 {
        if samples.is_empty() {
            return 0.0;
        }
        let sum_sq: f32 = samples.iter().map(|&v| v * v).sum();
        (sum_sq / samples.len() as f32).sqrt()
    }

    /// RMS of successive differences; a still signal scores zero.
    pub fn jitter(samples: &[f32]) -> f32 {
        let deltas: Vec<f32> = samples.windows(2).map(|w| w[1] - w[0]).collect();
        Self::rms(&deltas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rms_zero_sequence_yields_zero() {
        assert_eq!(StatsHelper::rms(&[]), 0.0);
        assert_eq!(StatsHelper::rms(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn rms_handles_single_value() {
        assert_eq!(StatsHelper::rms(&[4.0]), 4.0);
    }

    #[test]
    fn jitter_ignores_constant_offset() {
        assert_eq!(StatsHelper::jitter(&[0.7, 0.7, 0.7]), 0.0);
        assert_eq!(StatsHelper::jitter(&[0.0, 1.0, 0.0]), 1.0);
        assert_eq!(StatsHelper::jitter(&[0.5]), 0.0);
    }
}
