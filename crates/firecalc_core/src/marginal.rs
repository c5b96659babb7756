//! Progressive bracket allocation
//!
//! Splits a dependent value across ascending cutoffs, the way income tax is
//! split across brackets, and multiplies each slice by its rate. Every slice
//! is truncated toward zero on its own before being summed.

use crate::model::MarginalBracket;

/// Portion of `value` falling between `prior` and `cutoff`
#[inline]
fn slice(value: i64, prior: i64, cutoff: i64) -> i64 {
    if value >= cutoff {
        cutoff - prior
    } else if value > prior {
        value - prior
    } else {
        0
    }
}

/// Truncated amount contributed by each bracket, in bracket order
pub fn bracket_amounts(value: i64, brackets: &[MarginalBracket]) -> impl Iterator<Item = i64> + '_ {
    brackets.iter().scan(0_i64, move |prior, bracket| {
        let in_bracket = slice(value, *prior, bracket.cutoff);
        *prior = bracket.cutoff;
        Some((bracket.rate * in_bracket as f32) as i64)
    })
}

/// Sum of the truncated per-bracket amounts
pub fn marginal_amount(value: i64, brackets: &[MarginalBracket]) -> i64 {
    bracket_amounts(value, brackets).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brackets() -> Vec<MarginalBracket> {
        vec![
            MarginalBracket {
                cutoff: 10_000,
                rate: 0.10,
            },
            MarginalBracket {
                cutoff: 40_000,
                rate: 0.12,
            },
            MarginalBracket {
                cutoff: 90_000,
                rate: 0.22,
            },
        ]
    }

    #[test]
    fn test_value_above_top_cutoff_fills_every_bracket() {
        // 10,000 at 10% + 30,000 at 12% + 50,000 at 22%
        assert_eq!(marginal_amount(150_000, &brackets()), 1_000 + 3_600 + 11_000);
        assert_eq!(marginal_amount(90_000, &brackets()), 1_000 + 3_600 + 11_000);
    }

    #[test]
    fn test_value_inside_second_bracket() {
        // 10,000 at 10% + 15,000 at 12%
        assert_eq!(marginal_amount(25_000, &brackets()), 1_000 + 1_800);
        let parts: Vec<i64> = bracket_amounts(25_000, &brackets()).collect();
        assert_eq!(parts, vec![1_000, 1_800, 0]);
    }

    #[test]
    fn test_non_positive_value_allocates_nothing() {
        assert_eq!(marginal_amount(0, &brackets()), 0);
        assert_eq!(marginal_amount(-5_000, &brackets()), 0);
    }

    #[test]
    fn test_each_bracket_truncates_separately() {
        let brackets = [
            MarginalBracket {
                cutoff: 15,
                rate: 0.1,
            },
            MarginalBracket {
                cutoff: 30,
                rate: 0.1,
            },
        ];
        // 1.5 + 1.5 truncated per bracket is 2, not 3
        assert_eq!(marginal_amount(30, &brackets), 2);
    }

    #[test]
    fn test_negative_rates_truncate_toward_zero() {
        let brackets = [MarginalBracket {
            cutoff: 1_000,
            rate: -0.255,
        }];
        // -25.5 truncates to -25
        assert_eq!(marginal_amount(100, &brackets), -25);
    }

    #[test]
    fn test_single_precision_rate_truncation() {
        let bracket = |rate| {
            [MarginalBracket {
                cutoff: 1_000_000,
                rate,
            }]
        };
        assert_eq!(marginal_amount(100, &bracket(0.29)), 29);
        assert_eq!(marginal_amount(100, &bracket(0.57)), 57);
        assert_eq!(marginal_amount(100, &bracket(-0.29)), -29);
    }

    #[test]
    fn test_empty_brackets() {
        assert_eq!(marginal_amount(50_000, &[]), 0);
    }
}
