//! String similarity scoring.
//!
//! Uses contiguous matching blocks (Ratcliff/Obershelp): find the longest
//! common substring, recurse on the unmatched left and right remainders, and
//! score `2 * matched / (len(a) + len(b))`.
//!
//! The Indel similarity from `rapidfuzz` (`2 * LCS / (len(a) + len(b))`) is
//! never below the block ratio, since matching blocks form a common
//! subsequence. [`best_match`] uses it as a cheap upper bound for pruning.

use rapidfuzz::distance::indel;

/// Tolerance applied to the upper bound so float rounding never prunes a
/// pair whose exact ratio reaches the threshold.
const PRUNE_SLACK: f64 = 1e-9;

/// Similarity ratio in `[0, 1]`.
///
/// Equal strings short-circuit to 1.0. Arguments are put in a canonical order
/// first so the result is symmetric even when several longest blocks tie.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Number of characters covered by the matching blocks of `a` and `b`.
pub fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_block(a, b, (alo, ahi), (blo, bhi));
        if size == 0 {
            continue;
        }
        matched += size;
        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + size < ahi && j + size < bhi {
            pending.push((i + size, ahi, j + size, bhi));
        }
    }
    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]` as
/// `(start_a, start_b, len)`. Ties keep the block that ends first in `a`,
/// then in `b`.
fn longest_block(
    a: &[char],
    b: &[char],
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let mut best = (alo, blo, 0);
    if alo >= ahi || blo >= bhi {
        return best;
    }
    // current[k]: length of the common run ending at a[i] and b[blo + k - 1]
    let width = bhi - blo;
    let mut previous = vec![0usize; width + 1];
    let mut current = vec![0usize; width + 1];
    for i in alo..ahi {
        for j in blo..bhi {
            let k = j - blo + 1;
            if a[i] == b[j] {
                let run = previous[k - 1] + 1;
                current[k] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                current[k] = 0;
            }
        }
        std::mem::swap(&mut previous, &mut current);
    }
    best
}

/// Upper bound on [`ratio`], computed from the longest common subsequence.
pub fn upper_bound(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

/// Best ratio between `target` and any of `terms`.
///
/// Returns 1.0 on an exact hit. Ratios below `min_ratio` are non-matches and
/// contribute nothing, so the result is either 0.0 or at least `min_ratio`.
/// When `case_sensitive` is false, both sides are lowered first.
pub fn best_match<I, S>(terms: I, target: &str, min_ratio: f64, case_sensitive: bool) -> f64
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let target = fold(target, case_sensitive);
    let mut best = 0.0_f64;
    for term in terms {
        let term = fold(term.as_ref(), case_sensitive);
        if term == target {
            return 1.0;
        }
        if upper_bound(&term, &target) + PRUNE_SLACK < min_ratio {
            continue;
        }
        let score = ratio(&term, &target);
        if score >= min_ratio {
            best = best.max(score);
        }
    }
    best
}

fn fold(text: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        text.to_string()
    } else {
        text.to_lowercase()
    }
}
