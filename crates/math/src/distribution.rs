//! Reference distributions for coefficient significance tests.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::MathError;

/// Distribution against which t-statistics are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceDistribution {
    /// Standard normal (asymptotic inference, the usual choice with HAC errors).
    #[default]
    Normal,
    /// Student-t with the residual degrees of freedom.
    StudentT,
}

impl ReferenceDistribution {
    /// Two-sided p-value `P(|T| > |t|)`.
    ///
    /// # Arguments
    /// * `t_value` - Test statistic
    /// * `df` - Degrees of freedom (ignored for the normal distribution)
    ///
    /// # Errors
    /// Returns error if the statistic is not finite or `df` is zero for
    /// the Student-t distribution.
    pub fn two_sided_p_value(&self, t_value: f64, df: usize) -> Result<f64, MathError> {
        if !t_value.is_finite() {
            return Err(MathError::NonFinite("test statistic"));
        }

        let tail = match self {
            Self::Normal => Normal::new(0.0, 1.0)
                .map_err(|e| MathError::Distribution(e.to_string()))?
                .sf(t_value.abs()),
            Self::StudentT => {
                if df == 0 {
                    return Err(MathError::Distribution(
                        "Student-t needs at least one degree of freedom".to_string(),
                    ));
                }
                StudentsT::new(0.0, 1.0, df as f64)
                    .map_err(|e| MathError::Distribution(e.to_string()))?
                    .sf(t_value.abs())
            }
        };

        Ok((2.0 * tail).min(1.0))
    }
}

impl std::fmt::Display for ReferenceDistribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::StudentT => write!(f, "student-t"),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(1.959_963_984_540_054, 0.05)]
    #[case(-1.959_963_984_540_054, 0.05)]
    #[case(2.575_829_303_548_901, 0.01)]
    fn normal_p_values(#[case] t: f64, #[case] expected: f64) {
        let p = ReferenceDistribution::Normal.two_sided_p_value(t, 0).unwrap();
        assert_relative_eq!(p, expected, epsilon = 1e-9);
    }

    #[test]
    fn student_t_p_value() {
        // t(10) critical value for a 5% two-sided test
        let p = ReferenceDistribution::StudentT.two_sided_p_value(2.228_138_851_986_273, 10).unwrap();
        assert_relative_eq!(p, 0.05, epsilon = 1e-8);
    }

    #[test]
    fn student_t_is_wider_than_normal() {
        let t = 2.0;
        let normal = ReferenceDistribution::Normal.two_sided_p_value(t, 5).unwrap();
        let student = ReferenceDistribution::StudentT.two_sided_p_value(t, 5).unwrap();
        assert!(student > normal);
    }

    #[test]
    fn invalid_inputs() {
        assert!(ReferenceDistribution::Normal.two_sided_p_value(f64::NAN, 10).is_err());
        assert!(ReferenceDistribution::StudentT.two_sided_p_value(1.0, 0).is_err());
    }

    #[test]
    fn display() {
        assert_eq!(ReferenceDistribution::Normal.to_string(), "normal");
        assert_eq!(ReferenceDistribution::StudentT.to_string(), "student-t");
    }
}
