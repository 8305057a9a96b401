//! Numeric and paging helpers shared across handlers and services

/// 1-based page number; missing or zero means the first page
pub fn page_number(requested: Option<u64>) -> u64 {
    requested.unwrap_or(1).max(1)
}

/// Rounds half away from zero to `places` decimal places
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Share of `part` in `total` as a percentage with two decimals; zero when `total` is zero
pub fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to(part as f64 / total as f64 * 100.0, 2)
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        0
    } else {
        total.div_ceil(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 0, 0.0)]
    #[case(0, 5, 0.0)]
    #[case(3, 5, 60.0)]
    #[case(1, 3, 33.33)]
    #[case(2, 3, 66.67)]
    #[case(5, 5, 100.0)]
    fn percentage_rounds_to_two_places(#[case] part: u64, #[case] total: u64, #[case] expected: f64) {
        assert_eq!(percentage(part, total), expected);
    }

    #[test]
    fn round_to_handles_places() {
        assert_eq!(round_to(0.123456, 4), 0.1235);
        assert_eq!(round_to(2.5, 0), 3.0);
    }

    #[test]
    fn page_defaults_to_first() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some(0)), 1);
        assert_eq!(page_number(Some(3)), 3);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(41, 20), 3);
        assert_eq!(total_pages(5, 0), 0);
    }
}
