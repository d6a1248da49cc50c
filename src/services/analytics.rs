//! Pure aggregation logic: month parsing, the fixed price histogram and
//! pagination math. Everything here is independent of the store so it can be
//! tested without a database.

use crate::error::AppError;
use crate::schemas::PriceRangeCount;

/// Labels of the 10 fixed histogram buckets, in output order.
pub const BUCKET_LABELS: [&str; 10] = [
    "0-100", "101-200", "201-300", "301-400", "401-500", "501-600", "601-700", "701-800",
    "801-900", "901-above",
];

// Upper bound of every bucket except the open-ended last one. A price of
// exactly 100 belongs to "0-100", not "101-200".
const BUCKET_UPPERS: [f64; 9] = [
    100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0, 800.0, 900.0,
];

/// Parses a 1-based month number from a raw query value.
pub fn parse_month(raw: Option<&str>) -> Result<u32, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::InvalidParameter("month query parameter is required".to_string())
    })?;

    let month: u32 = raw.trim().parse().map_err(|_| {
        AppError::InvalidParameter(format!("month must be a number, got {raw:?}"))
    })?;

    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidParameter(format!(
            "month must be between 1 and 12, got {month}"
        )));
    }

    Ok(month)
}

fn bucket_index(price: f64) -> usize {
    BUCKET_UPPERS
        .iter()
        .position(|upper| price <= *upper)
        .unwrap_or(BUCKET_LABELS.len() - 1)
}

/// Folds prices into the 10 fixed buckets. Always returns all 10 entries in
/// ascending bucket order, zero-filled, so the bucket counts sum to
/// `prices.len()`.
pub fn price_histogram(prices: &[f64]) -> Vec<PriceRangeCount> {
    let mut counts = [0i64; BUCKET_LABELS.len()];
    for price in prices {
        counts[bucket_index(*price)] += 1;
    }

    BUCKET_LABELS
        .iter()
        .zip(counts)
        .map(|(range, count)| PriceRangeCount {
            price_range: (*range).to_string(),
            count,
        })
        .collect()
}

/// `ceil(total_count / per_page)`. Callers validate `per_page >= 1` first.
pub fn total_pages(total_count: i64, per_page: i64) -> i64 {
    (total_count + per_page - 1) / per_page
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month_valid_range() {
        for m in 1..=12 {
            assert_eq!(parse_month(Some(&m.to_string())).unwrap(), m);
        }
    }

    #[test]
    fn test_parse_month_missing() {
        assert!(parse_month(None).is_err());
    }

    #[test]
    fn test_parse_month_out_of_range() {
        assert!(parse_month(Some("0")).is_err());
        assert!(parse_month(Some("13")).is_err());
    }

    #[test]
    fn test_parse_month_not_a_number() {
        assert!(parse_month(Some("abc")).is_err());
        assert!(parse_month(Some("")).is_err());
        assert!(parse_month(Some("-3")).is_err());
    }

    #[test]
    fn test_histogram_empty_input_is_zero_filled() {
        let histogram = price_histogram(&[]);
        assert_eq!(histogram.len(), 10);
        assert!(histogram.iter().all(|b| b.count == 0));
        assert_eq!(histogram[0].price_range, "0-100");
        assert_eq!(histogram[9].price_range, "901-above");
    }

    #[test]
    fn test_histogram_boundaries() {
        // 100 lands in the first bucket, 101 in the second.
        let histogram = price_histogram(&[100.0, 101.0]);
        assert_eq!(histogram[0].count, 1);
        assert_eq!(histogram[1].count, 1);
    }

    #[test]
    fn test_histogram_open_ended_last_bucket() {
        let histogram = price_histogram(&[901.0, 15999.99]);
        assert_eq!(histogram[9].count, 2);
    }

    #[test]
    fn test_histogram_worked_example() {
        // The month=3 example: one sold item at 50, one unsold at 150.
        let histogram = price_histogram(&[50.0, 150.0]);
        assert_eq!(histogram[0].count, 1);
        assert_eq!(histogram[1].count, 1);
        assert!(histogram[2..].iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_histogram_counts_sum_to_input_length() {
        let prices: Vec<f64> = (0..500).map(|i| (i as f64) * 3.7).collect();
        let histogram = price_histogram(&prices);
        let sum: i64 = histogram.iter().map(|b| b.count).sum();
        assert_eq!(sum, prices.len() as i64);
    }

    #[test]
    fn test_total_pages_ceiling() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(60, 7), 9);
    }
}
