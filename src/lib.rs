/*!

Spelling correction, compound correction & word segmentation based on the Symmetric Delete algorithm.

#### Single word spelling correction

```rust
use symdel::{SymSpell, Verbosity};

let max_edit_distance_dictionary = 2; //maximum edit distance per dictionary precalculation
let mut symspell = SymSpell::new(max_edit_distance_dictionary, 7, 1).unwrap();

// term frequencies, e.g. streamed from a frequency dictionary file
symspell.create_dictionary_entry("house", 231_310_420);
symspell.create_dictionary_entry("hours", 97_794_458);

//lookup suggestions for single-word input strings
let input_term = "hous";
let suggestion_verbosity = Verbosity::Top; //Top, Closest, All
let max_edit_distance_lookup = 2; //max edit distance per lookup (<= max_edit_distance_dictionary)
let suggestions = symspell
    .lookup(input_term, suggestion_verbosity, max_edit_distance_lookup)
    .unwrap();
//suggestions are ordered by edit distance, then by term frequency
assert_eq!(suggestions[0].term, "house");
```

#### Compound aware multi-word spelling correction

```rust
use symdel::SymSpell;

let mut symspell = SymSpell::new(2, 7, 1).unwrap();
for (term, count) in [("can", 600_000usize), ("you", 700_000), ("read", 400_000), ("this", 800_000)] {
    symspell.create_dictionary_entry(term, count);
}
// bigram dictionary, optionally used for improved correction quality
symspell.load_bigram_dictionary_line("read this 50000", 0, 2, " ");

//lookup suggestions for multi-word input strings (supports compound splitting & merging)
let compound_suggestions = symspell.lookup_compound("can yu readthis", 2).unwrap();
assert_eq!(compound_suggestions[0].term, "can you read this");
```

#### Word segmentation of noisy text

```rust
use symdel::SymSpell;

let mut symspell = SymSpell::new(0, 7, 1).unwrap();
symspell.create_dictionary_entry("it", 10_741_073_446usize);
symspell.create_dictionary_entry("was", 4_303_955_244usize);

//word segmentation and correction for multi-word input strings with/without spaces
let result = symspell.word_segmentation("itwas", 0).unwrap();
assert_eq!(result.segmented_string, "it was");
```

*/

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;

mod casing;
mod composition;
mod edit_distance;
mod error;
mod strings;
mod suggestion;
mod symspell;

pub use casing::{transfer_casing_matching, transfer_casing_similar};
pub use composition::Composition;
pub use edit_distance::{damerau_levenshtein_osa, EditDistance};
pub use error::SpellError;
pub use strings::{is_acronym, parse_words, unicode_normalization_form_kc};
pub use suggestion::{Suggestion, Verbosity};
pub use symspell::{CompoundOptions, LookupOptions, SegmentationOptions, SymSpell};
