//! Rolling indicators over close prices.

use rust_decimal::Decimal;

use crate::error::EngineError;

/// Trailing simple moving average.
///
/// Index `i` holds the arithmetic mean of `closes[i - window + 1..=i]` once
/// the window is fully populated, and `None` for the leading `window - 1`
/// bars. A window larger than the series yields all-`None`, never an error.
pub fn compute_moving_average(
    closes: &[Decimal],
    window: usize,
) -> Result<Vec<Option<Decimal>>, EngineError> {
    if window == 0 {
        return Err(EngineError::InvalidWindow { window });
    }

    let divisor = Decimal::from(window as u64);
    let mut out = Vec::with_capacity(closes.len());
    let mut rolling_sum = Decimal::ZERO;

    for (i, close) in closes.iter().enumerate() {
        rolling_sum += *close;
        if i >= window {
            rolling_sum -= closes[i - window];
        }
        if i + 1 >= window {
            out.push(Some(rolling_sum / divisor));
        } else {
            out.push(None);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_window_one_is_identity() {
        let closes = vec![dec!(100), dec!(105)];
        let ma = compute_moving_average(&closes, 1).unwrap();
        assert_eq!(ma, vec![Some(dec!(100)), Some(dec!(105))]);
    }

    #[test]
    fn test_first_defined_value_at_window_minus_one() {
        let closes = vec![dec!(1), dec!(2), dec!(3), dec!(4)];
        let ma = compute_moving_average(&closes, 3).unwrap();
        assert_eq!(ma[0], None);
        assert_eq!(ma[1], None);
        assert_eq!(ma[2], Some(dec!(2)));
        assert_eq!(ma[3], Some(dec!(3)));
    }

    #[test]
    fn test_window_larger_than_series_is_all_undefined() {
        let closes = vec![dec!(1), dec!(2)];
        let ma = compute_moving_average(&closes, 5).unwrap();
        assert_eq!(ma, vec![None, None]);
    }

    #[test]
    fn test_zero_window_rejected() {
        let closes = vec![dec!(1)];
        assert_eq!(
            compute_moving_average(&closes, 0).unwrap_err(),
            EngineError::InvalidWindow { window: 0 }
        );
    }

    #[test]
    fn test_twenty_bar_series_window_twenty() {
        // Closes 10..=29: the MA is defined only at the last bar, where it
        // equals the midpoint mean 19.5.
        let closes: Vec<Decimal> = (10..30).map(Decimal::from).collect();
        let ma = compute_moving_average(&closes, 20).unwrap();
        assert!(ma[..19].iter().all(Option::is_none));
        assert_eq!(ma[19], Some(dec!(19.5)));
    }
}
