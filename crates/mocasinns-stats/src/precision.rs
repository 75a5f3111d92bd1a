/// Floating-point precision used when accumulating sample means.
///
/// Samples are always stored as `f64`. Selecting [`Precision::F32`] rounds
/// every summand and the running sum to single precision, which only changes
/// rounding, never the algorithm.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::FromStr)]
pub enum Precision {
    #[display("f32")]
    F32,
    #[default]
    #[display("f64")]
    F64,
}

impl Precision {
    /// Arithmetic mean of `values` accumulated at this precision.
    ///
    /// Returns NaN for an empty input.
    ///
    /// # Examples
    ///
    /// ```
    /// use mocasinns_stats::precision::Precision;
    ///
    /// assert_eq!(Precision::F64.mean([1.0, 2.0, 3.0, 4.0]), 2.5);
    /// assert!(Precision::F32.mean([]).is_nan());
    /// ```
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    #[must_use]
    pub fn mean<I>(self, values: I) -> f64
    where
        I: IntoIterator<Item = f64>,
    {
        match self {
            Self::F32 => {
                let (sum, count) = values
                    .into_iter()
                    .fold((0.0_f32, 0_usize), |(sum, count), v| (sum + v as f32, count + 1));
                f64::from(sum / count as f32)
            }
            Self::F64 => {
                let (sum, count) = values
                    .into_iter()
                    .fold((0.0_f64, 0_usize), |(sum, count), v| (sum + v, count + 1));
                sum / count as f64
            }
        }
    }

    /// Rounds a parsed value to this precision.
    #[expect(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn round(self, value: f64) -> f64 {
        match self {
            Self::F32 => f64::from(value as f32),
            Self::F64 => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("f32".parse::<Precision>().unwrap(), Precision::F32);
        assert_eq!("F64".parse::<Precision>().unwrap(), Precision::F64);
        assert!("f16".parse::<Precision>().is_err());
    }

    #[test]
    fn test_f32_rounds_accumulation() {
        let values = [0.1, 0.2, 0.3];
        let single = Precision::F32.mean(values);
        let double = Precision::F64.mean(values);
        assert!((single - double).abs() < 1e-6);
        assert_eq!(single, f64::from(single as f32));
    }

    #[test]
    fn test_round() {
        assert_eq!(Precision::F64.round(0.1), 0.1);
        assert_eq!(Precision::F32.round(0.1), f64::from(0.1_f32));
    }
}
