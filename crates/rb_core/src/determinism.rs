//! Stable ordering helpers for derived rows.
//!
//! All sorts here are stable (`slice::sort_by`), so rows with equal keys keep
//! their input order.

use core::cmp::Ordering;

/// Compare by `domain`, then by control id, both as plain string order.
#[inline]
pub fn cmp_domain_then_id(a_domain: &str, a_id: &str, b_domain: &str, b_id: &str) -> Ordering {
    match a_domain.cmp(b_domain) {
        Ordering::Equal => a_id.cmp(b_id),
        o => o,
    }
}

/// Stable sort, descending by a numeric key. Uses IEEE total order, so a
/// NaN key sorts ahead of every number.
pub fn sort_desc_stable<T, F>(xs: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    xs.sort_by(|a, b| key(b).total_cmp(&key(a)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_is_primary_key() {
        assert_eq!(cmp_domain_then_id("IAM", "CCC-9", "Network", "CCC-1"), Ordering::Less);
        assert_eq!(cmp_domain_then_id("IAM", "CCC-2", "IAM", "CCC-10"), Ordering::Greater);
        assert_eq!(cmp_domain_then_id("IAM", "CCC-1", "IAM", "CCC-1"), Ordering::Equal);
    }

    #[test]
    fn desc_sort_keeps_ties_in_input_order() {
        let mut v = vec![("a", 1.0), ("b", 3.0), ("c", 1.0), ("d", 2.0)];
        sort_desc_stable(&mut v, |x| x.1);
        let got: Vec<&str> = v.iter().map(|x| x.0).collect();
        assert_eq!(got, vec!["b", "d", "a", "c"]);
    }
}
