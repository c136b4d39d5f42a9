//! Substring-tolerant fuzzy similarity.
//!
//! `ratio` is the normalized indel similarity `2 * LCS / (len_a + len_b)` scaled to
//! 0..=100. `partial_ratio` slides the shorter string over the longer one, including
//! the windows that hang off either end, and keeps the best `ratio`.

/// Similarity of two strings after lowercasing and trimming, in 0..=100.
///
/// Returns 0 when either side is empty, so a blank query never matches anything.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a = normalize(a);
    let b = normalize(b);
    partial_ratio_chars(&a, &b)
}

/// Lowercases, trims and splits into chars; reuse the output when scoring one
/// query against many targets.
pub fn normalize(text: &str) -> Vec<char> {
    text.trim().to_lowercase().chars().collect()
}

/// [`partial_ratio`] over pre-normalized input.
pub fn partial_ratio_chars(a: &[char], b: &[char]) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let m = short.len();
    let n = long.len();

    let mut best = 0.0_f64;
    let mut consider = |window: &[char]| {
        let score = ratio_chars(short, window);
        if score > best {
            best = score;
        }
    };

    for end in 1..m {
        consider(&long[..end]);
    }
    for start in 0..=(n - m) {
        consider(&long[start..start + m]);
    }
    for start in (n - m + 1)..n {
        consider(&long[start..]);
    }

    best.round().clamp(0.0, 100.0) as u8
}

fn ratio_chars(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    200.0 * lcs_len(a, b) as f64 / total as f64
}

fn lcs_len(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut cur = vec![0usize; b.len() + 1];
    for &x in a {
        for (j, &y) in b.iter().enumerate() {
            cur[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(cur[j])
            };
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(partial_ratio("printer offline", "printer offline"), 100);
    }

    #[test]
    fn case_and_surrounding_whitespace_are_ignored() {
        assert_eq!(partial_ratio("  PRINTER Offline ", "printer offline"), 100);
    }

    #[test]
    fn substring_scores_100_in_either_order() {
        assert_eq!(partial_ratio("card reader", "card reader not responding"), 100);
        assert_eq!(partial_ratio("card reader not responding", "card reader"), 100);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "printer offline"), 0);
        assert_eq!(partial_ratio("   ", "printer offline"), 0);
        assert_eq!(partial_ratio("printer", ""), 0);
    }

    #[test]
    fn unrelated_text_scores_low() {
        assert_eq!(partial_ratio("screen frozen", "printer offline"), 38);
        assert_eq!(partial_ratio("screen frozen", "check cable"), 38);
        assert_eq!(partial_ratio("wifi", "restart the router"), 0);
    }

    #[test]
    fn paraphrase_scores_in_between() {
        assert_eq!(partial_ratio("printer offline", "printer battery low"), 70);
        assert_eq!(partial_ratio("printer not working", "printer offline"), 75);
        assert_eq!(partial_ratio("screen is blank", "screen blank"), 75);
    }

    #[test]
    fn lcs_counts_subsequence() {
        let a: Vec<char> = "abcde".chars().collect();
        let b: Vec<char> = "ace".chars().collect();
        assert_eq!(lcs_len(&a, &b), 3);
    }
}
