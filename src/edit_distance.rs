use std::mem;

use smallvec::SmallVec;

const VEC_SIZE: usize = 16;
pub type FastVec<T> = SmallVec<[T; VEC_SIZE]>;

/// Damerau-Levenshtein edit distance, like Levenshtein but allows for adjacent transpositions.
/// Optimal string alignment version (OSA): each substring can only be edited once.
/// E.g., "CA" to "ABC" has an edit distance of 2 for Damerau-Levenshtein, but a distance of 3 when using the optimal string alignment algorithm.
/// Returns the edit distance, >= 0 representing the number of edits required to transform one string to the other,
/// or -1 if the distance is greater than the specified max_distance.
/// https://en.wikipedia.org/wiki/Damerau%E2%80%93Levenshtein_distance#Optimal_string_alignment_distance
pub fn damerau_levenshtein_osa(string_1: &str, string_2: &str, max_distance: i64) -> i64 {
    EditDistance::new().compare(string_1, string_2, max_distance)
}

/// OSA distance comparer with two reusable scratch rows: one cost row and
/// one previous-diagonal row for transposition tracking. Stateless across
/// calls apart from the buffers; instantiate per thread or per query.
pub struct EditDistance {
    char_1_costs: FastVec<i64>,
    prev_char_1_costs: FastVec<i64>,
}

impl Default for EditDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl EditDistance {
    pub fn new() -> Self {
        Self {
            char_1_costs: FastVec::new(),
            prev_char_1_costs: FastVec::new(),
        }
    }

    /// Compare two strings, bounded by `max_distance`. Empty strings take
    /// the role of absent inputs: two empty strings are at distance 0, one
    /// empty string is at the other's length (capped by `max_distance`).
    pub fn compare(&mut self, string_1: &str, string_2: &str, max_distance: i64) -> i64 {
        if max_distance <= 0 {
            return if string_1 == string_2 { 0 } else { -1 };
        }

        let mut chars_1: FastVec<char> = string_1.chars().collect();
        let mut chars_2: FastVec<char> = string_2.chars().collect();

        // the shorter string goes first, so len_2 >= len_1
        if chars_1.len() > chars_2.len() {
            mem::swap(&mut chars_1, &mut chars_2);
        }

        // the edit distance can't be less than the difference of the lengths of the strings
        if (chars_2.len() - chars_1.len()) as i64 > max_distance {
            return -1;
        }

        // strip the common suffix, then the common prefix
        let mut len_1 = chars_1.len();
        let mut len_2 = chars_2.len();
        while len_1 != 0 && chars_1[len_1 - 1] == chars_2[len_2 - 1] {
            len_1 -= 1;
            len_2 -= 1;
        }
        let mut start = 0;
        while start != len_1 && chars_1[start] == chars_2[start] {
            start += 1;
        }
        if start != 0 {
            len_1 -= start;
            len_2 -= start;
        }

        if len_1 == 0 {
            return if len_2 as i64 <= max_distance {
                len_2 as i64
            } else {
                -1
            };
        }

        if max_distance < len_2 as i64 {
            self.distance_banded(&chars_1, &chars_2, len_1, len_2, start, max_distance)
        } else {
            self.distance(&chars_1, &chars_2, len_1, len_2, start)
        }
    }

    fn distance(
        &mut self,
        chars_1: &[char],
        chars_2: &[char],
        len_1: usize,
        len_2: usize,
        start: usize,
    ) -> i64 {
        self.char_1_costs.clear();
        self.char_1_costs.extend(1..=len_2 as i64);
        self.prev_char_1_costs.clear();
        self.prev_char_1_costs.extend(std::iter::repeat(0).take(len_2));

        let mut char_1 = char::MAX;
        let mut current_cost = 0;
        for i in 0..len_1 {
            let prev_char_1 = char_1;
            char_1 = chars_1[start + i];
            let mut char_2 = char::MAX;
            let mut left_char_cost = i as i64;
            let mut above_char_cost = i as i64;
            let mut next_trans_cost = 0;
            for j in 0..len_2 {
                let this_trans_cost = next_trans_cost;
                next_trans_cost = self.prev_char_1_costs[j];
                // cost of diagonal (substitution)
                current_cost = left_char_cost;
                self.prev_char_1_costs[j] = current_cost;
                left_char_cost = self.char_1_costs[j];
                let prev_char_2 = char_2;
                char_2 = chars_2[start + j];
                if char_1 != char_2 {
                    if above_char_cost < current_cost {
                        current_cost = above_char_cost;
                    }
                    if left_char_cost < current_cost {
                        current_cost = left_char_cost;
                    }
                    current_cost += 1;
                    if i != 0
                        && j != 0
                        && char_1 == prev_char_2
                        && prev_char_1 == char_2
                        && this_trans_cost + 1 < current_cost
                    {
                        // transposition
                        current_cost = this_trans_cost + 1;
                    }
                }
                self.char_1_costs[j] = current_cost;
                above_char_cost = current_cost;
            }
        }
        current_cost
    }

    fn distance_banded(
        &mut self,
        chars_1: &[char],
        chars_2: &[char],
        len_1: usize,
        len_2: usize,
        start: usize,
        max_distance: i64,
    ) -> i64 {
        self.char_1_costs.clear();
        self.char_1_costs.extend(
            (0..len_2 as i64).map(|j| if j < max_distance { j + 1 } else { max_distance + 1 }),
        );
        self.prev_char_1_costs.clear();
        self.prev_char_1_costs.extend(std::iter::repeat(0).take(len_2));

        let len_diff = (len_2 - len_1) as i64;
        let j_start_offset = max_distance - len_diff;
        let mut j_start = 0usize;
        let mut j_end = max_distance as usize;

        let mut char_1 = char::MAX;
        let mut current_cost = 0;
        for i in 0..len_1 {
            let prev_char_1 = char_1;
            char_1 = chars_1[start + i];
            let mut char_2 = char::MAX;
            let mut left_char_cost = i as i64;
            let mut above_char_cost = i as i64;
            let mut next_trans_cost = 0;

            // no need to look beyond the window of the lower right diagonal minus
            // max_distance cells (lower right diagonal is i - len_diff) and the
            // upper left diagonal plus max_distance cells (upper left is i)
            if i as i64 > j_start_offset {
                j_start += 1;
            }
            if j_end < len_2 {
                j_end += 1;
            }

            for j in j_start..j_end {
                let this_trans_cost = next_trans_cost;
                next_trans_cost = self.prev_char_1_costs[j];
                // cost of diagonal (substitution)
                current_cost = left_char_cost;
                self.prev_char_1_costs[j] = current_cost;
                left_char_cost = self.char_1_costs[j];
                let prev_char_2 = char_2;
                char_2 = chars_2[start + j];
                if char_1 != char_2 {
                    if above_char_cost < current_cost {
                        current_cost = above_char_cost;
                    }
                    if left_char_cost < current_cost {
                        current_cost = left_char_cost;
                    }
                    current_cost += 1;
                    if i != 0
                        && j != 0
                        && char_1 == prev_char_2
                        && prev_char_1 == char_2
                        && this_trans_cost + 1 < current_cost
                    {
                        // transposition
                        current_cost = this_trans_cost + 1;
                    }
                }
                self.char_1_costs[j] = current_cost;
                above_char_cost = current_cost;
            }

            if self.char_1_costs[i + len_diff as usize] > max_distance {
                return -1;
            }
        }
        if current_cost <= max_distance {
            current_cost
        } else {
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_are_zero() {
        assert_eq!(damerau_levenshtein_osa("", "", 5), 0);
        assert_eq!(damerau_levenshtein_osa("house", "house", 2), 0);
        assert_eq!(damerau_levenshtein_osa("部分", "部分", 1), 0);
    }

    #[test]
    fn empty_string_costs_other_length() {
        assert_eq!(damerau_levenshtein_osa("", "ab", 5), 2);
        assert_eq!(damerau_levenshtein_osa("abc", "", 5), 3);
        assert_eq!(damerau_levenshtein_osa("", "abc", 2), -1);
    }

    #[test]
    fn zero_max_distance_only_matches_equal() {
        assert_eq!(damerau_levenshtein_osa("abc", "abc", 0), 0);
        assert_eq!(damerau_levenshtein_osa("abc", "abd", 0), -1);
    }

    #[test]
    fn basic_edits() {
        assert_eq!(damerau_levenshtein_osa("hous", "house", 2), 1);
        assert_eq!(damerau_levenshtein_osa("kitten", "sitting", 7), 3);
        assert_eq!(damerau_levenshtein_osa("ab", "ba", 1), 1);
        assert_eq!(damerau_levenshtein_osa("bank", "bnak", 1), 1);
    }

    #[test]
    fn osa_forbids_editing_a_substring_twice() {
        // true Damerau-Levenshtein would give 2 here
        assert_eq!(damerau_levenshtein_osa("CA", "ABC", 3), 3);
        assert_eq!(damerau_levenshtein_osa("CA", "ABC", 2), -1);
    }

    #[test]
    fn exceeding_the_bound_returns_sentinel() {
        assert_eq!(damerau_levenshtein_osa("aaaa", "bbbb", 2), -1);
        assert_eq!(damerau_levenshtein_osa("abcdef", "ab", 3), -1);
    }

    #[test]
    fn symmetric() {
        let pairs = [("steems", "steam"), ("pip", "pips"), ("xy", "yxz")];
        for (a, b) in pairs {
            assert_eq!(
                damerau_levenshtein_osa(a, b, 4),
                damerau_levenshtein_osa(b, a, 4)
            );
        }
    }

    #[test]
    fn banded_agrees_with_unbounded() {
        let cases = [
            ("whereis", "where is"),
            ("steems", "steams"),
            ("elove", "love"),
            ("abcdefgh", "abcdfegh"),
            ("acommodation", "accommodation"),
        ];
        for (a, b) in cases {
            let unbounded = damerau_levenshtein_osa(a, b, 100);
            assert!(unbounded >= 0);
            assert_eq!(damerau_levenshtein_osa(a, b, unbounded), unbounded);
        }
    }

    #[test]
    fn scratch_buffers_are_reusable() {
        let mut comparer = EditDistance::new();
        assert_eq!(comparer.compare("steems", "steem", 2), 1);
        assert_eq!(comparer.compare("a", "abcd", 3), 3);
        assert_eq!(comparer.compare("abcd", "abcd", 2), 0);
    }
}
