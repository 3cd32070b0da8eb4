use ahash::AHashMap;
use itertools::{EitherOrBoth, Itertools};

/// Opcode tags of the character-level diff used by `transfer_casing_similar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

#[derive(Debug, Clone, Copy)]
struct Opcode {
    tag: OpTag,
    i1: usize,
    i2: usize,
    j1: usize,
    j2: usize,
}

#[derive(Debug, Clone, Copy)]
struct MatchingBlock {
    a: usize,
    b: usize,
    size: usize,
}

// Longest contiguous matching block of a[alo..ahi] and b[blo..bhi];
// ties resolve to the earliest position in a, then in b.
fn longest_match(
    a: &[char],
    b2j: &AHashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> MatchingBlock {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;
    let mut j2len: AHashMap<usize, usize> = AHashMap::new();

    for (i, ch) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut new_j2len: AHashMap<usize, usize> = AHashMap::new();
        if let Some(positions) = b2j.get(ch) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = if j == 0 {
                    1
                } else {
                    j2len.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                new_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = new_j2len;
    }

    MatchingBlock {
        a: best_i,
        b: best_j,
        size: best_size,
    }
}

fn matching_blocks(a: &[char], b: &[char]) -> Vec<MatchingBlock> {
    let mut b2j: AHashMap<char, Vec<usize>> = AHashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b2j.entry(ch).or_default().push(j);
    }

    let mut queue = vec![(0, a.len(), 0, b.len())];
    let mut blocks: Vec<MatchingBlock> = Vec::new();
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let m = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if m.size != 0 {
            if alo < m.a && blo < m.b {
                queue.push((alo, m.a, blo, m.b));
            }
            if m.a + m.size < ahi && m.b + m.size < bhi {
                queue.push((m.a + m.size, ahi, m.b + m.size, bhi));
            }
            blocks.push(m);
        }
    }
    blocks.sort_by_key(|m| (m.a, m.b));

    // collapse adjacent blocks into one
    let mut merged: Vec<MatchingBlock> = Vec::new();
    let mut current = MatchingBlock { a: 0, b: 0, size: 0 };
    for m in blocks {
        if current.a + current.size == m.a && current.b + current.size == m.b {
            current.size += m.size;
        } else {
            if current.size != 0 {
                merged.push(current);
            }
            current = m;
        }
    }
    if current.size != 0 {
        merged.push(current);
    }
    merged.push(MatchingBlock {
        a: a.len(),
        b: b.len(),
        size: 0,
    });
    merged
}

fn opcodes(a: &[char], b: &[char]) -> Vec<Opcode> {
    let mut ops = Vec::new();
    let mut i = 0;
    let mut j = 0;
    for block in matching_blocks(a, b) {
        let tag = if i < block.a && j < block.b {
            Some(OpTag::Replace)
        } else if i < block.a {
            Some(OpTag::Delete)
        } else if j < block.b {
            Some(OpTag::Insert)
        } else {
            None
        };
        if let Some(tag) = tag {
            ops.push(Opcode {
                tag,
                i1: i,
                i2: block.a,
                j1: j,
                j2: block.b,
            });
        }
        i = block.a + block.size;
        j = block.b + block.size;
        if block.size != 0 {
            ops.push(Opcode {
                tag: OpTag::Equal,
                i1: block.a,
                i2: i,
                j1: block.b,
                j2: j,
            });
        }
    }
    ops
}

fn push_cased(result: &mut String, ch: char, uppercase: bool) {
    if uppercase {
        result.extend(ch.to_uppercase());
    } else {
        result.extend(ch.to_lowercase());
    }
}

/// Transfer the letter case position-wise from `cased` to `uncased`.
/// Both strings must have the same number of characters.
pub fn transfer_casing_matching(cased: &str, uncased: &str) -> String {
    debug_assert_eq!(cased.chars().count(), uncased.chars().count());

    let mut result = String::with_capacity(uncased.len());
    for (c, u) in cased.chars().zip(uncased.chars()) {
        push_cased(&mut result, u, c.is_uppercase());
    }
    result
}

/// Transfer the letter case from `cased` to the lowercase `uncased`, for
/// strings of similar but not necessarily equal content and length.
pub fn transfer_casing_similar(cased: &str, uncased: &str) -> String {
    let cased_chars: Vec<char> = cased.chars().collect();
    let cased_lower: Vec<char> = cased_chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();
    let uncased_chars: Vec<char> = uncased.chars().collect();

    let mut result = String::with_capacity(uncased.len());
    for op in opcodes(&cased_lower, &uncased_chars) {
        match op.tag {
            OpTag::Equal => {
                result.extend(&cased_chars[op.i1..op.i2]);
            }
            OpTag::Delete => {}
            OpTag::Insert => {
                // an inserted span at a word start copies the case of the
                // word-initial source character, otherwise of the character
                // just before the insertion point
                let uppercase = if op.i1 == 0 || cased_chars[op.i1 - 1] == ' ' {
                    cased_chars.get(op.i1).is_some_and(|c| c.is_uppercase())
                } else {
                    cased_chars[op.i1 - 1].is_uppercase()
                };
                for &u in &uncased_chars[op.j1..op.j2] {
                    push_cased(&mut result, u, uppercase);
                }
            }
            OpTag::Replace => {
                if op.i2 - op.i1 == op.j2 - op.j1 {
                    for (c, &u) in cased_chars[op.i1..op.i2]
                        .iter()
                        .zip(&uncased_chars[op.j1..op.j2])
                    {
                        push_cased(&mut result, u, c.is_uppercase());
                    }
                } else {
                    // spans of unequal length: walk both in parallel and
                    // carry the last observed case once the source runs out
                    let mut last_is_upper = false;
                    for pair in cased_chars[op.i1..op.i2]
                        .iter()
                        .zip_longest(uncased_chars[op.j1..op.j2].iter())
                    {
                        match pair {
                            EitherOrBoth::Both(c, &u) => {
                                last_is_upper = c.is_uppercase();
                                push_cased(&mut result, u, last_is_upper);
                            }
                            EitherOrBoth::Right(&u) => {
                                push_cased(&mut result, u, last_is_upper);
                            }
                            EitherOrBoth::Left(_) => {}
                        }
                    }
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_copies_case_per_position() {
        assert_eq!(transfer_casing_matching("Haw", "how"), "How");
        assert_eq!(transfer_casing_matching("AbC", "xyz"), "XyZ");
        assert_eq!(transfer_casing_matching("HOUSE", "house"), "HOUSE");
    }

    #[test]
    fn similar_transfers_across_unequal_lengths() {
        assert_eq!(
            transfer_casing_similar(
                "Haaw is the weeather in New York?",
                "how is the weather in new york?"
            ),
            "How is the weather in New York?"
        );
    }

    #[test]
    fn similar_handles_equal_strings() {
        assert_eq!(
            transfer_casing_similar("New York", "new york"),
            "New York"
        );
        assert_eq!(transfer_casing_similar("WHEREIS", "whereis"), "WHEREIS");
    }

    #[test]
    fn similar_uppercases_insertions_after_uppercase_runs() {
        assert_eq!(transfer_casing_similar("HOUS", "house"), "HOUSE");
        assert_eq!(transfer_casing_similar("Hous", "house"), "House");
    }

    #[test]
    fn similar_handles_whole_sentence_corrections() {
        assert_eq!(
            transfer_casing_similar("WHEREIS TH ELOVE", "where is the love"),
            "WHERE IS THE LOVE"
        );
    }
}
