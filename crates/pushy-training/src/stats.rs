/// Descriptive statistics summarizing a set of `f32` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptiveStats {
    pub min: f32,
    pub max: f32,
    pub mean: f32,
    pub std_dev: f32,
    /// Standard deviation divided by the range (0 when all values are equal).
    pub normalized_std_dev: f32,
}

impl DescriptiveStats {
    /// Returns `None` for an empty input.
    ///
    /// ```
    /// # use pushy_training::stats::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let values = values.into_iter().collect::<Vec<_>>();
        let min = values.iter().copied().min_by(f32::total_cmp)?;
        let max = values.iter().copied().max_by(f32::total_cmp)?;
        let n = values.len() as f32;
        let mean = values.iter().sum::<f32>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / n;
        let std_dev = variance.sqrt();
        let range = max - min;
        let normalized_std_dev = if range > 0.0 { std_dev / range } else { 0.0 };
        Some(Self {
            min,
            max,
            mean,
            std_dev,
            normalized_std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(DescriptiveStats::new(Vec::<f32>::new()), None);
    }

    #[test]
    fn test_constant_values() {
        let stats = DescriptiveStats::new([2.0; 4]).unwrap();
        assert!(stats.std_dev.abs() < f32::EPSILON);
        assert!(stats.normalized_std_dev.abs() < f32::EPSILON);
    }

    #[test]
    fn test_spread_values() {
        let stats = DescriptiveStats::new([0.0, 10.0]).unwrap();
        assert!((stats.mean - 5.0).abs() < f32::EPSILON);
        assert!((stats.std_dev - 5.0).abs() < 1e-5);
        assert!((stats.normalized_std_dev - 0.5).abs() < 1e-5);
    }
}
