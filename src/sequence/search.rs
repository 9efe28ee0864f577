/// Returns the first element satisfying `condition`, or `None`.
///
/// The returned reference borrows from `elements`, so it points at the
/// matched element itself for as long as the slice is alive.
///
/// # Examples
///
/// ```rust
/// use functools::sequence::find_first;
///
/// let numbers = [1, 2, 3, 4, 5, 6];
/// assert_eq!(find_first(|number| *number == 5, &numbers), Some(&5));
/// assert_eq!(find_first(|number| *number == 100, &numbers), None);
/// ```
pub fn find_first<A, F>(mut condition: F, elements: &[A]) -> Option<&A>
where
    F: FnMut(&A) -> bool,
{
    for element in elements {
        if condition(element) {
            return Some(element);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, Some(&5))]
    #[case(1, Some(&1))]
    #[case(6, Some(&6))]
    #[case(100, None)]
    fn find_first_by_value(#[case] target: i32, #[case] expected: Option<&i32>) {
        assert_eq!(find_first(|x| *x == target, &[1, 2, 3, 4, 5, 6]), expected);
    }

    #[rstest]
    fn find_first_returns_earliest_match() {
        let pairs = [(1, "a"), (2, "b"), (2, "c")];
        let found = find_first(|pair| pair.0 == 2, &pairs);
        assert_eq!(found, Some(&(2, "b")));
    }

    #[rstest]
    fn find_first_aliases_the_matched_slot() {
        let words = vec![String::from("x"), String::from("target"), String::from("y")];
        let found = find_first(|word| word.starts_with('t'), &words).expect("present");
        assert!(std::ptr::eq(found, &words[1]));
    }

    #[rstest]
    fn find_first_stops_scanning_after_match() {
        let mut inspected = 0;
        let _ = find_first(
            |x| {
                inspected += 1;
                *x == 2
            },
            &[1, 2, 3, 4],
        );
        assert_eq!(inspected, 2);
    }

    #[rstest]
    fn find_first_of_empty_is_none() {
        let empty: [i32; 0] = [];
        assert_eq!(find_first(|_| true, &empty), None);
    }
}
