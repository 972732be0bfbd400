/// Ordinal name of a floor: `1` is "Ground", the rest take a suffix picked by
/// their last digit only, so 11 becomes "11st".
///
/// # Panics
/// Floors are counted from 1; passing 0 panics.
pub fn ordinal_label(num: u32) -> String {
    assert!(num > 0, "ordinal_label: floors are numbered from 1");

    if num == 1 {
        return String::from("Ground");
    }

    match num % 10 {
        1 => format!("{num}st"),
        2 => format!("{num}nd"),
        3 => format!("{num}rd"),
        _ => format!("{num}th"),
    }
}

/// Text on the first line of a floor's signs, e.g. "3rd Floor".
pub fn floor_label(num: u32) -> String {
    format!("{} Floor", ordinal_label(num))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1, "Ground")]
    #[test_case(2, "2nd")]
    #[test_case(3, "3rd")]
    #[test_case(4, "4th")]
    #[test_case(10, "10th")]
    #[test_case(21, "21st")]
    #[test_case(102, "102nd")]
    fn names_floors(num: u32, expected: &str) {
        assert_eq!(ordinal_label(num), expected);
    }

    // Only the last digit decides the suffix.
    #[test_case(11, "11st")]
    #[test_case(12, "12nd")]
    #[test_case(13, "13rd")]
    #[test_case(111, "111st")]
    fn teens_follow_last_digit(num: u32, expected: &str) {
        assert_eq!(ordinal_label(num), expected);
    }

    #[test]
    fn floor_label_appends_floor() {
        assert_eq!(floor_label(1), "Ground Floor");
        assert_eq!(floor_label(5), "5th Floor");
    }

    #[test]
    #[should_panic(expected = "numbered from 1")]
    fn floor_zero_panics() {
        ordinal_label(0);
    }
}
