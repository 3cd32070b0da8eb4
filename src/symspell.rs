// SymSpell: Symmetric Delete spelling correction
//
// The Symmetric Delete spelling correction algorithm reduces the complexity of edit candidate generation and dictionary lookup
// for a given Damerau-Levenshtein distance. Opposite to other algorithms only deletes are required, no transposes + replaces + inserts.
// Transposes + replaces + inserts of the input term are transformed into deletes of the dictionary term.
// Replaces and inserts are expensive and language dependent: e.g. Chinese has 70,000 Unicode Han characters!
//
// Compound splitting / decompounding of multi-word input strings is supported with three cases:
// 1. mistakenly inserted space into a correct word led to two incorrect terms
// 2. mistakenly omitted space between two correct words led to one incorrect combined term
// 3. multiple independent input terms with/without spelling errors

use std::cmp::{self, min};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet, RandomState};
use log::{debug, warn};
use regex::Regex;

use crate::casing::transfer_casing_similar;
use crate::composition::Composition;
use crate::edit_distance::EditDistance;
use crate::error::SpellError;
use crate::strings::{
    at, is_acronym, len, parse_words, remove, slice, suffix, try_parse_i64,
    unicode_normalization_form_kc,
};
use crate::suggestion::{Suggestion, Verbosity};

// stable seeded hash, so delete-variant keys are identical across runs and platforms
static HASHER_64: LazyLock<RandomState> =
    LazyLock::new(|| RandomState::with_seeds(808259318, 750368348, 84901999, 789810389));

#[inline]
pub(crate) fn hash64(term_bytes: &[u8]) -> u64 {
    HASHER_64.hash_one(term_bytes)
}

// Word counts saturate here instead of wrapping.
const COUNT_MAX: usize = usize::MAX;

// Practical ceiling for the dictionary edit distance; beyond this the
// delete-variant universe explodes.
const MAX_EDIT_DISTANCE_CEILING: i64 = 16;

/// Options for [`SymSpell::lookup_with_options`].
#[derive(Debug, Clone, Default)]
pub struct LookupOptions {
    /// Append a synthetic suggestion (distance `max_edit_distance + 1`, count 0)
    /// when no suggestion was found.
    pub include_unknown: bool,
    /// Inputs matched by this pattern (anchored at the start) count as correct.
    pub ignore_token: Option<Regex>,
    /// Match case-insensitively, then re-apply the input casing to each
    /// returned term.
    pub transfer_casing: bool,
}

/// Options for [`SymSpell::lookup_compound_with_options`].
#[derive(Debug, Clone, Default)]
pub struct CompoundOptions {
    /// Pass numeric tokens and all-caps acronyms through uncorrected.
    pub ignore_non_words: bool,
    /// Re-apply the input casing to the corrected sentence.
    pub transfer_casing: bool,
}

/// Options for [`SymSpell::word_segmentation_with_options`].
#[derive(Debug, Clone, Default)]
pub struct SegmentationOptions {
    /// Maximum edit distance per looked-up part; defaults to the dictionary maximum.
    pub max_edit_distance: Option<i64>,
    /// Longest part length considered; defaults to the longest dictionary word.
    pub max_segmentation_word_length: Option<i64>,
    /// Parts matched by this pattern (anchored at the start) count as correct.
    pub ignore_token: Option<Regex>,
}

/// SymSpell spell checker and corrector.
pub struct SymSpell {
    // Maximum edit distance for dictionary precalculation.
    max_dictionary_edit_distance: i64,
    // The length of word prefixes, from which deletes are generated. (5..7).
    prefix_length: i64,
    // The minimum frequency count for dictionary words to be considered a valid for spelling correction.
    count_threshold: usize,
    // Number of all words in the corpus used to generate the frequency dictionary
    // this is used to calculate the word occurrence probability p from word counts c : p=c/N
    // N equals the sum of all counts c in the dictionary only if the dictionary is complete, but not if the dictionary is truncated or filtered
    corpus_word_count: usize,
    // Maximum dictionary term length
    max_dictionary_term_length: i64,
    // Dictionary that contains a mapping of lists of suggested correction words to the hashCodes
    // of the original words and the deletes derived from them. Collisions of hashCodes are tolerated,
    // because suggestions are ultimately verified via an edit distance function.
    deletes: AHashMap<u64, Vec<Box<str>>>,
    // Dictionary of unique correct spelling words, and the frequency count for each word.
    words: AHashMap<Box<str>, usize>,
    // Words whose accumulated count has not yet reached count_threshold; disjoint from `words`.
    below_threshold_words: AHashMap<Box<str>, usize>,
    // Bigrams optionally used for improved correction quality in lookup_compound
    bigrams: AHashMap<Box<str>, usize>,
    // Minimum bigram count in the bigram dictionary
    bigram_min_count: usize,
}

impl Default for SymSpell {
    fn default() -> Self {
        Self::with_config(2, 7, 1)
    }
}

impl SymSpell {
    /// Creates a new SymSpell instance.
    ///
    /// `max_dictionary_edit_distance` must lie in `0..=16` and
    /// `prefix_length` must be positive and not smaller than the edit
    /// distance bound.
    pub fn new(
        max_dictionary_edit_distance: i64,
        prefix_length: i64,
        count_threshold: usize,
    ) -> Result<Self, SpellError> {
        if !(0..=MAX_EDIT_DISTANCE_CEILING).contains(&max_dictionary_edit_distance) {
            return Err(SpellError::InvalidConfig(format!(
                "max_dictionary_edit_distance must be in 0..={MAX_EDIT_DISTANCE_CEILING}, got {max_dictionary_edit_distance}"
            )));
        }
        if prefix_length < 1 || prefix_length < max_dictionary_edit_distance {
            return Err(SpellError::InvalidConfig(format!(
                "prefix_length must be positive and at least max_dictionary_edit_distance, got {prefix_length}"
            )));
        }
        Ok(Self::with_config(
            max_dictionary_edit_distance,
            prefix_length,
            count_threshold,
        ))
    }

    fn with_config(
        max_dictionary_edit_distance: i64,
        prefix_length: i64,
        count_threshold: usize,
    ) -> Self {
        Self {
            max_dictionary_edit_distance, //2
            prefix_length,                //7
            count_threshold,              //1
            corpus_word_count: 1_024_908_267_229,
            max_dictionary_term_length: 0,
            deletes: AHashMap::new(),
            words: AHashMap::new(),
            below_threshold_words: AHashMap::new(),
            bigrams: AHashMap::new(),
            bigram_min_count: usize::MAX,
        }
    }

    /// Get the number of entries in the dictionary.
    pub fn get_dictionary_size(&self) -> usize {
        self.words.len()
    }

    /// Length of the longest word in the dictionary.
    pub fn max_word_length(&self) -> i64 {
        self.max_dictionary_term_length
    }

    /// Create/update an entry in the dictionary.
    ///
    /// For every word there are deletes with an edit distance of
    /// 1..max_edit_distance created and added to the dictionary. Every delete
    /// entry has a suggestions list, which points to the original term(s) it
    /// was created from. The dictionary may be dynamically updated (word
    /// frequency and new words) at any time by calling this.
    ///
    /// Returns true if the word was added as a new correctly spelled word,
    /// false if it was added as a below-threshold word or updated an existing
    /// one.
    pub fn create_dictionary_entry<K>(&mut self, key: K, count: usize) -> bool
    where
        K: Clone + AsRef<str> + Into<String>,
    {
        if count == 0 && self.count_threshold > 0 {
            // no threshold to meet and nothing to count
            return false;
        }
        let mut count = count;

        // previously below threshold: accumulate, and promote once the
        // threshold is reached
        if let Some(&count_previous) = self.below_threshold_words.get(key.as_ref()) {
            count = if COUNT_MAX - count_previous > count {
                count_previous + count
            } else {
                COUNT_MAX
            };
            if count >= self.count_threshold {
                self.below_threshold_words.remove(key.as_ref());
                // fall through to the promotion path below
            } else {
                self.below_threshold_words
                    .insert(key.clone().into().into_boxed_str(), count);
                return false;
            }
        } else if let Some(&count_previous) = self.words.get(key.as_ref()) {
            let updated_count = if COUNT_MAX - count_previous > count {
                count_previous + count
            } else {
                COUNT_MAX
            };
            self.words
                .insert(key.clone().into().into_boxed_str(), updated_count);
            return false;
        } else if count < self.count_threshold {
            self.below_threshold_words
                .insert(key.clone().into().into_boxed_str(), count);
            return false;
        }

        self.words
            .insert(key.clone().into().into_boxed_str(), count);

        let key_len = len(key.as_ref());
        if key_len as i64 > self.max_dictionary_term_length {
            self.max_dictionary_term_length = key_len as i64;
        }

        let edits = self.edits_prefix(key.as_ref());
        for delete in edits {
            let delete_hash = hash64(delete.as_bytes());
            self.deletes
                .entry(delete_hash)
                .or_default()
                .push(key.clone().into().into_boxed_str());
        }

        true
    }

    /// Load multiple dictionary entries from a file of word/frequency count pairs.
    ///
    /// Returns `Ok(false)` when the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `corpus` - The path+filename of the file.
    /// * `term_index` - The column position of the word.
    /// * `count_index` - The column position of the frequency count.
    /// * `separator` - Separator between word and frequency
    pub fn load_dictionary<P: AsRef<Path>>(
        &mut self,
        corpus: P,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, SpellError> {
        let corpus = corpus.as_ref();
        if !corpus.exists() {
            return Ok(false);
        }

        let file = File::open(corpus)?;
        let reader = BufReader::new(file);
        let words_before = self.words.len();
        for line in reader.lines() {
            self.load_dictionary_line(&line?, term_index, count_index, separator);
        }
        debug!(
            "loaded {} dictionary entries from {}",
            self.words.len() - words_before,
            corpus.display()
        );
        Ok(true)
    }

    /// Load a single dictionary entry from a word/frequency count pair.
    /// Lines with too few fields or an unparseable count are skipped.
    pub fn load_dictionary_line(
        &mut self,
        line: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        let line_parts: Vec<&str> = line.split(separator).collect();
        if line_parts.len() <= cmp::max(term_index, count_index) {
            return false;
        }
        let key = line_parts[term_index];
        match line_parts[count_index].parse::<usize>() {
            Ok(count) => {
                self.create_dictionary_entry(key.to_string(), count);
                true
            }
            Err(_) => {
                warn!("skipping dictionary line with unparseable count: {line:?}");
                false
            }
        }
    }

    /// Load multiple bigram entries from a file of bigram/frequency count pairs.
    /// Only used in lookup_compound for improved compound splitting/merging/correction quality.
    ///
    /// Returns `Ok(false)` when the file does not exist.
    pub fn load_bigram_dictionary<P: AsRef<Path>>(
        &mut self,
        corpus: P,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> Result<bool, SpellError> {
        let corpus = corpus.as_ref();
        if !corpus.exists() {
            return Ok(false);
        }

        let file = File::open(corpus)?;
        let reader = BufReader::new(file);
        let bigrams_before = self.bigrams.len();
        for line in reader.lines() {
            self.load_bigram_dictionary_line(&line?, term_index, count_index, separator);
        }
        debug!(
            "loaded {} bigram entries from {}",
            self.bigrams.len() - bigrams_before,
            corpus.display()
        );
        Ok(true)
    }

    /// Load a single bigram entry from a bigram/frequency count pair.
    ///
    /// With the `" "` separator a line must yield at least three fields and
    /// the bigram key spans `term_index` and the following field; otherwise
    /// two fields suffice and the key is the single field at `term_index`.
    pub fn load_bigram_dictionary_line(
        &mut self,
        line: &str,
        term_index: usize,
        count_index: usize,
        separator: &str,
    ) -> bool {
        let line_parts: Vec<&str> = line.split(separator).collect();
        let key_end = if separator == " " {
            term_index + 1
        } else {
            term_index
        };
        let min_parts = if separator == " " { 3 } else { 2 };
        if line_parts.len() < min_parts || line_parts.len() <= cmp::max(key_end, count_index) {
            return false;
        }
        let key = if separator == " " {
            [line_parts[term_index], line_parts[term_index + 1]].join(" ")
        } else {
            line_parts[term_index].to_string()
        };
        match line_parts[count_index].parse::<usize>() {
            Ok(count) => {
                self.bigrams.insert(key.into_boxed_str(), count);
                if count < self.bigram_min_count {
                    self.bigram_min_count = count;
                }
                true
            }
            Err(_) => {
                warn!("skipping bigram line with unparseable count: {line:?}");
                false
            }
        }
    }

    /// Find suggested spellings for a given input word, using the maximum
    /// edit distance specified during construction of the SymSpell dictionary.
    ///
    /// # Arguments
    ///
    /// * `input` - The word being spell checked.
    /// * `verbosity` - The value controlling the quantity/closeness of the returned suggestions.
    /// * `max_edit_distance` - The maximum edit distance between input and suggested words.
    ///
    /// # Examples
    ///
    /// ```
    /// use symdel::{SymSpell, Verbosity};
    ///
    /// let mut symspell = SymSpell::new(2, 7, 1).unwrap();
    /// symspell.create_dictionary_entry("house", 231_310_420);
    /// let suggestions = symspell.lookup("hous", Verbosity::Top, 2).unwrap();
    /// assert_eq!(suggestions[0].term, "house");
    /// ```
    pub fn lookup(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
    ) -> Result<Vec<Suggestion>, SpellError> {
        self.lookup_with_options(input, verbosity, max_edit_distance, &LookupOptions::default())
    }

    /// [`SymSpell::lookup`] with unknown-word, ignore-token and case-transfer handling.
    pub fn lookup_with_options(
        &self,
        input: &str,
        verbosity: Verbosity,
        max_edit_distance: i64,
        options: &LookupOptions,
    ) -> Result<Vec<Suggestion>, SpellError> {
        if max_edit_distance > self.max_dictionary_edit_distance {
            return Err(SpellError::DistanceTooLarge {
                requested: max_edit_distance,
                max: self.max_dictionary_edit_distance,
            });
        }

        let original_input = input;
        let lowered;
        let input = if options.transfer_casing {
            lowered = input.to_lowercase();
            lowered.as_str()
        } else {
            input
        };
        let input_len = len(input) as i64;

        let unknown_or = |suggestions: Vec<Suggestion>| {
            if options.include_unknown && suggestions.is_empty() {
                vec![Suggestion::new(input, max_edit_distance + 1, 0)]
            } else {
                suggestions
            }
        };

        let mut suggestions: Vec<Suggestion> = Vec::new();

        // early termination - word is too big to possibly match any words
        if input_len - max_edit_distance > self.max_dictionary_term_length {
            return Ok(unknown_or(suggestions));
        }

        if let Some(&suggestion_count) = self.words.get(input) {
            suggestions.push(Suggestion::new(input, 0, suggestion_count));
            // early termination - return exact match, unless caller wants all matches
            if verbosity != Verbosity::All {
                return Ok(unknown_or(suggestions));
            }
        }

        // a token the caller wants left alone counts as an exact match
        if let Some(pattern) = options.ignore_token.as_ref() {
            if pattern.find(input).is_some_and(|m| m.start() == 0) {
                suggestions.push(Suggestion::new(input, 0, 1));
                if verbosity != Verbosity::All {
                    return Ok(unknown_or(suggestions));
                }
            }
        }

        // early termination, if we only want to check if the word is in the dictionary
        // or get its frequency e.g. for word segmentation
        if max_edit_distance == 0 {
            return Ok(unknown_or(suggestions));
        }

        let mut considered_deletes: AHashSet<String> = AHashSet::new();
        let mut considered_suggestions: AHashSet<String> = AHashSet::new();
        considered_suggestions.insert(input.to_string());

        let mut max_edit_distance_2 = max_edit_distance;
        let mut candidate_pointer = 0;
        let mut candidates: Vec<String> = Vec::new();

        let mut input_prefix_len = input_len;
        if input_prefix_len > self.prefix_length {
            input_prefix_len = self.prefix_length;
            candidates.push(slice(input, 0, input_prefix_len as usize));
        } else {
            candidates.push(input.to_string());
        }

        let mut distance_comparer = EditDistance::new();

        while candidate_pointer < candidates.len() {
            let candidate = candidates[candidate_pointer].clone();
            candidate_pointer += 1;
            let candidate_len = len(&candidate) as i64;
            let length_diff = input_prefix_len - candidate_len;

            // if the candidate distance is already higher than the suggestion distance,
            // there are no better suggestions to be expected
            if length_diff > max_edit_distance_2 {
                // skip to next candidate if Verbosity::All, look no further otherwise
                // (candidates are ordered by delete distance, so none are closer than the current one)
                if verbosity == Verbosity::All {
                    continue;
                }
                break;
            }

            if let Some(dict_suggestions) = self.deletes.get(&hash64(candidate.as_bytes())) {
                // iterate through the suggestions (to other correct dictionary items)
                // of the delete item and add them to the suggestion list
                for suggestion in dict_suggestions {
                    if suggestion.as_ref() == input {
                        continue;
                    }
                    let suggestion_len = len(suggestion) as i64;

                    if (suggestion_len - input_len).abs() > max_edit_distance_2
                        || suggestion_len < candidate_len
                        // identical lengths but different strings: just a hash collision
                        || (suggestion_len == candidate_len && suggestion.as_ref() != candidate)
                    {
                        continue;
                    }

                    let sugg_prefix_len = min(suggestion_len, self.prefix_length);
                    if sugg_prefix_len > input_prefix_len
                        && sugg_prefix_len - candidate_len > max_edit_distance_2
                    {
                        continue;
                    }

                    // We allow simultaneous edits (deletes) of max_edit_distance on both the
                    // dictionary and the input term. For replaces and adjacent transposes the
                    // resulting edit distance stays <= max_edit_distance. For inserts and
                    // deletes the resulting edit distance might exceed max_edit_distance.
                    // To prevent suggestions of a higher edit distance we need to calculate the
                    // resulting edit distance if there are simultaneous edits on both sides.
                    // Example: (bank==bnak and bank==bink, but bank!=kanb and bank!=xban and
                    // bank!=baxn for max_edit_distance=1)
                    let distance;
                    if candidate_len == 0 {
                        // suggestions which have no common chars with the input
                        // (input_len <= max_edit_distance && suggestion_len <= max_edit_distance)
                        distance = cmp::max(input_len, suggestion_len);
                        if distance > max_edit_distance_2
                            || considered_suggestions.contains(suggestion.as_ref())
                        {
                            continue;
                        }
                        considered_suggestions.insert(suggestion.to_string());
                    } else if suggestion_len == 1 {
                        distance = if !input.contains(&slice(suggestion, 0, 1)) {
                            input_len
                        } else {
                            input_len - 1
                        };
                        if distance > max_edit_distance_2
                            || considered_suggestions.contains(suggestion.as_ref())
                        {
                            continue;
                        }
                        considered_suggestions.insert(suggestion.to_string());
                    } else if self.has_suffix_mismatch(
                        max_edit_distance,
                        input,
                        input_len,
                        candidate_len,
                        suggestion,
                        suggestion_len,
                    ) {
                        // number of edits in the prefix already equals max_edit_distance
                        // and the suffixes differ beyond a transposition:
                        // edit distance > max_edit_distance, no Levenshtein calculation needed
                        continue;
                    } else {
                        // delete_in_suggestion_prefix is somewhat expensive, and only
                        // pays off when verbosity is Top or Closest
                        if verbosity != Verbosity::All
                            && !self.delete_in_suggestion_prefix(
                                &candidate,
                                candidate_len,
                                suggestion,
                                suggestion_len,
                            )
                        {
                            continue;
                        }
                        if considered_suggestions.contains(suggestion.as_ref()) {
                            continue;
                        }
                        considered_suggestions.insert(suggestion.to_string());

                        distance =
                            distance_comparer.compare(input, suggestion, max_edit_distance_2);
                        if distance < 0 {
                            continue;
                        }
                    }

                    // do not process higher distances than those already found, if verbosity < All
                    // (max_edit_distance_2 always equals max_edit_distance for Verbosity::All)
                    if distance <= max_edit_distance_2 {
                        let suggestion_count = self.words[suggestion.as_ref()];
                        let si = Suggestion::new(suggestion.as_ref(), distance, suggestion_count);

                        if !suggestions.is_empty() {
                            match verbosity {
                                Verbosity::Closest => {
                                    // only suggestions of the smallest distance found so far survive
                                    if distance < max_edit_distance_2 {
                                        suggestions.clear();
                                    }
                                }
                                Verbosity::Top => {
                                    if distance < max_edit_distance_2
                                        || suggestion_count > suggestions[0].count
                                    {
                                        max_edit_distance_2 = distance;
                                        suggestions[0] = si;
                                    }
                                    continue;
                                }
                                Verbosity::All => (),
                            }
                        }

                        if verbosity != Verbosity::All {
                            max_edit_distance_2 = distance;
                        }
                        suggestions.push(si);
                    }
                }
            }

            // derive edits (deletes) from the candidate and add them to the candidate list,
            // recursively until the maximum edit distance has been reached
            if length_diff < max_edit_distance && candidate_len <= self.prefix_length {
                // do not create edits with an edit distance smaller than the suggestions already found
                if verbosity != Verbosity::All && length_diff >= max_edit_distance_2 {
                    continue;
                }
                for i in 0..candidate_len {
                    let delete = remove(&candidate, i as usize);
                    if !considered_deletes.contains(&delete) {
                        considered_deletes.insert(delete.clone());
                        candidates.push(delete);
                    }
                }
            }
        }

        // sort by ascending edit distance, then by descending word frequency
        if suggestions.len() > 1 {
            suggestions.sort();
        }
        if options.transfer_casing {
            for suggestion in &mut suggestions {
                suggestion.term = transfer_casing_similar(original_input, &suggestion.term);
            }
        }
        Ok(unknown_or(suggestions))
    }

    /// Find suggested spellings for a multi-word input string (supports word splitting/merging).
    /// Returns a single [`Suggestion`] representing the corrected input string.
    ///
    /// Supports compound aware automatic spelling correction of multi-word input strings
    /// with three cases:
    /// 1. mistakenly inserted space into a correct word led to two incorrect terms
    /// 2. mistakenly omitted space between two correct words led to one incorrect combined term
    /// 3. multiple independent input terms with/without spelling errors
    ///
    /// # Arguments
    ///
    /// * `input` - The sentence being spell checked.
    /// * `max_edit_distance` - The maximum edit distance between input and suggested words.
    pub fn lookup_compound(
        &self,
        input: &str,
        max_edit_distance: i64,
    ) -> Result<Vec<Suggestion>, SpellError> {
        self.lookup_compound_with_options(input, max_edit_distance, &CompoundOptions::default())
    }

    /// [`SymSpell::lookup_compound`] with non-word pass-through and case-transfer handling.
    pub fn lookup_compound_with_options(
        &self,
        input: &str,
        max_edit_distance: i64,
        options: &CompoundOptions,
    ) -> Result<Vec<Suggestion>, SpellError> {
        // parse input string into single terms
        let term_list_1 = parse_words(input, false);
        // the original-case tokens are needed for acronym pass-through
        let term_list_2 = if options.ignore_non_words {
            parse_words(input, true)
        } else {
            Vec::new()
        };

        let mut suggestions: Vec<Suggestion>; // suggestions for a single term
        let mut suggestion_parts: Vec<Suggestion> = Vec::new(); // one line with separate parts
        let mut distance_comparer = EditDistance::new();

        // translate every term to its best suggestion, otherwise it remains unchanged
        let mut last_combi = false;

        for i in 0..term_list_1.len() {
            if options.ignore_non_words {
                if try_parse_i64(&term_list_1[i]).is_some() {
                    suggestion_parts.push(Suggestion::new(term_list_1[i].as_str(), 0, 0));
                    continue;
                }
                if is_acronym(&term_list_2[i]) {
                    suggestion_parts.push(Suggestion::new(term_list_2[i].as_str(), 0, 0));
                    continue;
                }
            }

            suggestions = self.lookup(&term_list_1[i], Verbosity::Top, max_edit_distance)?;

            // combi check, always before split
            if i > 0 && !last_combi {
                let mut suggestions_combi = self.lookup(
                    &[term_list_1[i - 1].as_str(), term_list_1[i].as_str()].join(""),
                    Verbosity::Top,
                    max_edit_distance,
                )?;

                if !suggestions_combi.is_empty() {
                    let best_1 = suggestion_parts[suggestion_parts.len() - 1].clone();
                    let best_2 = if !suggestions.is_empty() {
                        suggestions[0].clone()
                    } else {
                        // unknown word: estimated word occurrence probability
                        // P = 10 / (N * 10^word_length) (Norvig, Natural Language Corpus Data)
                        Suggestion::new(
                            term_list_1[i].as_str(),
                            max_edit_distance + 1,
                            (10f64 / 10usize.saturating_pow(len(&term_list_1[i]) as u32) as f64)
                                as usize,
                        )
                    };

                    // edit distance between the two split terms and their best corrections,
                    // as the comparative value for the combination
                    let distance_1 = best_1.distance + best_2.distance;
                    if distance_1 >= 0
                        && (suggestions_combi[0].distance + 1 < distance_1
                            || (suggestions_combi[0].distance + 1 == distance_1
                                && (suggestions_combi[0].count as f64
                                    > best_1.count as f64 / self.corpus_word_count as f64
                                        * best_2.count as f64)))
                    {
                        suggestions_combi[0].distance += 1;
                        let last = suggestion_parts.len() - 1;
                        suggestion_parts[last] = suggestions_combi[0].clone();
                        last_combi = true;
                        continue;
                    }
                }
            }
            last_combi = false;

            // always split terms without suggestion / never split terms with suggestion ed=0 /
            // never split single char terms
            if !suggestions.is_empty() && (suggestions[0].distance == 0 || len(&term_list_1[i]) == 1)
            {
                // choose the best suggestion
                suggestion_parts.push(suggestions[0].clone());
            } else {
                // if no perfect suggestion, split the word into pairs
                let mut suggestion_split_best = suggestions.first().cloned();

                let term_length = len(&term_list_1[i]);
                if term_length > 1 {
                    for j in 1..term_length {
                        let part_1 = slice(&term_list_1[i], 0, j);
                        let part_2 = slice(&term_list_1[i], j, term_length);

                        let suggestions_1 =
                            self.lookup(&part_1, Verbosity::Top, max_edit_distance)?;
                        if suggestions_1.is_empty() {
                            continue;
                        }
                        let suggestions_2 =
                            self.lookup(&part_2, Verbosity::Top, max_edit_distance)?;
                        if suggestions_2.is_empty() {
                            continue;
                        }

                        // select the best suggestion for the split pair
                        let split_term = [
                            suggestions_1[0].term.as_str(),
                            suggestions_2[0].term.as_str(),
                        ]
                        .join(" ");

                        let mut split_distance = distance_comparer.compare(
                            &term_list_1[i],
                            &split_term,
                            max_edit_distance,
                        );
                        if split_distance < 0 {
                            split_distance = max_edit_distance + 1;
                        }

                        if let Some(best) = &suggestion_split_best {
                            if split_distance > best.distance {
                                continue;
                            }
                            if split_distance < best.distance {
                                suggestion_split_best = None;
                            }
                        }

                        let split_count = match self.bigrams.get(split_term.as_str()) {
                            Some(&bigram_count) => {
                                let halves_concatenated = [
                                    suggestions_1[0].term.as_str(),
                                    suggestions_2[0].term.as_str(),
                                ]
                                .concat();
                                // boost the count if the split corrections are part of,
                                // or identical to, the input
                                if let Some(best_si) = suggestions.first() {
                                    if halves_concatenated == term_list_1[i] {
                                        // make the count bigger than the count of the single term correction
                                        cmp::max(bigram_count, best_si.count.saturating_add(2))
                                    } else if suggestions_1[0].term == best_si.term
                                        || suggestions_2[0].term == best_si.term
                                    {
                                        // make the count bigger than the count of the single term correction
                                        cmp::max(bigram_count, best_si.count.saturating_add(1))
                                    } else {
                                        bigram_count
                                    }
                                } else if halves_concatenated == term_list_1[i] {
                                    cmp::max(
                                        bigram_count,
                                        cmp::max(suggestions_1[0].count, suggestions_2[0].count)
                                            .saturating_add(2),
                                    )
                                } else {
                                    bigram_count
                                }
                            }
                            None => {
                                // The Naive Bayes probability of the word combination is the product
                                // of the two word probabilities: P(AB) = P(A) * P(B). Use it to
                                // estimate the frequency count of a combination missing from the
                                // bigram dictionary, which then ranks the splitting variants.
                                cmp::min(
                                    self.bigram_min_count,
                                    (suggestions_1[0].count as f64 / self.corpus_word_count as f64
                                        * suggestions_2[0].count as f64)
                                        as usize,
                                )
                            }
                        };

                        let suggestion_split =
                            Suggestion::new(split_term, split_distance, split_count);
                        if suggestion_split_best
                            .as_ref()
                            .is_none_or(|best| suggestion_split.count > best.count)
                        {
                            suggestion_split_best = Some(suggestion_split);
                        }
                    }
                }

                match suggestion_split_best {
                    Some(best) => suggestion_parts.push(best),
                    None => {
                        // unknown word: estimated count C = 10 / 10^word_length
                        suggestion_parts.push(Suggestion::new(
                            term_list_1[i].as_str(),
                            max_edit_distance + 1,
                            (10f64 / 10usize.saturating_pow(term_length as u32) as f64) as usize,
                        ));
                    }
                }
            }
        }

        let mut joined_term = String::new();
        let mut joined_count = self.corpus_word_count as f64;
        for si in &suggestion_parts {
            joined_term.push_str(&si.term);
            joined_term.push(' ');
            joined_count *= si.count as f64 / self.corpus_word_count as f64;
        }
        let mut joined_term = joined_term.trim_end().to_string();
        if options.transfer_casing {
            joined_term = transfer_casing_similar(input, &joined_term);
        }

        let distance = distance_comparer.compare(input, &joined_term, i64::MAX);
        Ok(vec![Suggestion::new(
            joined_term,
            distance,
            joined_count as usize,
        )])
    }

    /// Divides a string into words by inserting missing spaces at the appropriate positions.
    /// Misspelled words are corrected in the corrected string and left alone in the
    /// segmented string. Existing spaces are allowed and considered for optimum segmentation.
    ///
    /// word_segmentation uses an approach *without* recursion:
    /// while each string of length n can be segmented into 2^n-1 possible compositions
    /// https://en.wikipedia.org/wiki/Composition_(combinatorics)
    /// it finds the optimum composition in linear time O(n), using a circular buffer of
    /// `min(max_segmentation_word_length, chars(input))` intermediate compositions.
    ///
    /// # Arguments
    ///
    /// * `input` - The string being segmented.
    /// * `max_edit_distance` - The maximum edit distance between a part and its corrected word.
    pub fn word_segmentation(
        &self,
        input: &str,
        max_edit_distance: i64,
    ) -> Result<Composition, SpellError> {
        self.word_segmentation_with_options(
            input,
            &SegmentationOptions {
                max_edit_distance: Some(max_edit_distance),
                ..Default::default()
            },
        )
    }

    /// [`SymSpell::word_segmentation`] with part length bound and ignore-token handling.
    pub fn word_segmentation_with_options(
        &self,
        input: &str,
        options: &SegmentationOptions,
    ) -> Result<Composition, SpellError> {
        let max_edit_distance = options
            .max_edit_distance
            .unwrap_or(self.max_dictionary_edit_distance);
        let max_segmentation_word_length = options
            .max_segmentation_word_length
            .unwrap_or(self.max_dictionary_term_length);

        // normalize ligatures: "scientiﬁc" "ﬁelds" "ﬁnal"
        let input = unicode_normalization_form_kc(input);
        let input_len = len(&input);

        let array_size = min(max_segmentation_word_length.max(0) as usize, input_len);
        if array_size == 0 {
            return Ok(Composition::empty());
        }
        let mut compositions: Vec<Composition> = vec![Composition::empty(); array_size];
        // logically -1: advanced once before the first read
        let mut circular_index = array_size - 1;

        let lookup_options = LookupOptions {
            ignore_token: options.ignore_token.clone(),
            ..Default::default()
        };

        // outer loop (column): all possible part start positions
        for j in 0..input_len {
            // inner loop (row): all possible part lengths (from the start position):
            // a part can't be longer than the longest word in the dictionary
            let imax = min(input_len - j, max_segmentation_word_length as usize);
            for i in 1..=imax {
                // get the top spelling correction for the part
                let mut part = slice(&input, j, j + i);

                let mut separator_len: i64 = 0;
                let mut top_ed: i64 = 0;

                if at(&part, 0).is_some_and(char::is_whitespace) {
                    // remove the space for the Levenshtein calculation
                    part = remove(&part, 0);
                } else {
                    // the space did not exist and had to be inserted
                    separator_len = 1;
                }

                // the number of removed internal spaces counts into the edit distance
                top_ed += len(&part) as i64;
                part = part.replace(' ', "");
                top_ed -= len(&part) as i64;

                let results = self.lookup_with_options(
                    &part,
                    Verbosity::Top,
                    max_edit_distance,
                    &lookup_options,
                )?;

                let top_result;
                let top_prob_log;
                if let Some(best) = results.first() {
                    top_result = best.term.clone();
                    top_ed += best.distance;
                    // Naive Bayes Rule: we assume the word probabilities to be independent,
                    // so the probability of the composition is the product of the word
                    // probabilities. Summing logarithms instead of multiplying keeps the
                    // tiny per-word probabilities (about 10^-10) from underflowing to zero.
                    top_prob_log = (best.count as f64 / self.corpus_word_count as f64).log10();
                } else {
                    top_result = part.clone();
                    // penalize unknown words with their full length, otherwise a long
                    // input would win as one long unknown word instead of getting
                    // spaces inserted
                    top_ed += len(&part) as i64;
                    top_prob_log = (10.0
                        / (self.corpus_word_count as f64 * 10.0f64.powf(len(&part) as f64)))
                    .log10();
                }

                let destination_index = (i + circular_index) % array_size;
                if j == 0 {
                    // set the initial values in the first round
                    compositions[destination_index] = Composition {
                        segmented_string: part.clone(),
                        corrected_string: top_result.clone(),
                        distance_sum: top_ed,
                        prob_log_sum: top_prob_log,
                    };
                } else if i as i64 == max_segmentation_word_length
                    // replace values if a better probability is found, with the same
                    // edit distance or the same except for one separator space
                    || (((compositions[circular_index].distance_sum + top_ed
                        == compositions[destination_index].distance_sum)
                        || (compositions[circular_index].distance_sum + separator_len + top_ed
                            == compositions[destination_index].distance_sum))
                        && (compositions[destination_index].prob_log_sum
                            < compositions[circular_index].prob_log_sum + top_prob_log))
                    // replace values if a smaller edit distance is found
                    || (compositions[circular_index].distance_sum + separator_len + top_ed
                        < compositions[destination_index].distance_sum)
                {
                    compositions[destination_index] = Composition {
                        segmented_string: [
                            compositions[circular_index].segmented_string.as_str(),
                            part.as_str(),
                        ]
                        .join(" "),
                        corrected_string: [
                            compositions[circular_index].corrected_string.as_str(),
                            top_result.as_str(),
                        ]
                        .join(" "),
                        distance_sum: compositions[circular_index].distance_sum
                            + separator_len
                            + top_ed,
                        prob_log_sum: compositions[circular_index].prob_log_sum + top_prob_log,
                    };
                }
            }
            circular_index = (circular_index + 1) % array_size;
        }
        Ok(compositions[circular_index].clone())
    }

    // Check whether all delete chars are present in the suggestion prefix in
    // the correct order; otherwise this is just a hash collision.
    fn delete_in_suggestion_prefix(
        &self,
        delete: &str,
        delete_len: i64,
        suggestion: &str,
        suggestion_len: i64,
    ) -> bool {
        if delete_len == 0 {
            return true;
        }
        let suggestion_len = min(self.prefix_length, suggestion_len);
        let mut j = 0;
        for del_char in delete.chars() {
            while j < suggestion_len && Some(del_char) != at(suggestion, j as isize) {
                j += 1;
            }
            if j == suggestion_len {
                return false;
            }
        }
        true
    }

    // Once the whole edit budget was spent inside the prefix, the suffixes must
    // agree except for at most one adjacent transposition at the boundary.
    fn has_suffix_mismatch(
        &self,
        max_edit_distance: i64,
        input: &str,
        input_len: i64,
        candidate_len: i64,
        suggestion: &str,
        suggestion_len: i64,
    ) -> bool {
        if self.prefix_length - max_edit_distance != candidate_len {
            return false;
        }
        let min_len = min(input_len, suggestion_len) - self.prefix_length;
        (min_len > 1
            && suffix(input, (input_len + 1 - min_len) as usize)
                != suffix(suggestion, (suggestion_len + 1 - min_len) as usize))
            || (min_len > 0
                && at(input, (input_len - min_len) as isize)
                    != at(suggestion, (suggestion_len - min_len) as isize)
                && (at(input, (input_len - min_len - 1) as isize)
                    != at(suggestion, (suggestion_len - min_len) as isize)
                    || at(input, (input_len - min_len) as isize)
                        != at(suggestion, (suggestion_len - min_len - 1) as isize)))
    }

    fn edits_prefix(&self, key: &str) -> AHashSet<String> {
        let mut hash_set = AHashSet::new();

        let key_len = len(key) as i64;
        if key_len <= self.max_dictionary_edit_distance {
            hash_set.insert("".to_string());
        }

        if key_len > self.prefix_length {
            let shortened_key = slice(key, 0, self.prefix_length as usize);
            hash_set.insert(shortened_key.clone());
            self.edits(&shortened_key, 0, &mut hash_set);
        } else {
            hash_set.insert(key.to_string());
            self.edits(key, 0, &mut hash_set);
        }

        hash_set
    }

    // inexpensive and language independent: only deletes, no transposes + replaces + inserts
    // replaces and inserts are expensive and language dependent (Chinese has 70,000 Unicode Han characters)
    fn edits(&self, word: &str, edit_distance: i64, delete_words: &mut AHashSet<String>) {
        let edit_distance = edit_distance + 1;
        if edit_distance > self.max_dictionary_edit_distance {
            return;
        }
        let word_len = len(word);
        if word_len > 1 {
            for i in 0..word_len {
                let delete = remove(word, i);
                if !delete_words.contains(&delete) {
                    delete_words.insert(delete.clone());
                    if edit_distance < self.max_dictionary_edit_distance {
                        self.edits(&delete, edit_distance, delete_words);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn rejects_invalid_configuration() {
        assert!(matches!(
            SymSpell::new(-1, 7, 1),
            Err(SpellError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymSpell::new(17, 20, 1),
            Err(SpellError::InvalidConfig(_))
        ));
        assert!(matches!(
            SymSpell::new(3, 2, 1),
            Err(SpellError::InvalidConfig(_))
        ));
        assert!(SymSpell::new(0, 1, 0).is_ok());
    }

    #[test]
    fn rejects_oversized_lookup_distance() {
        let symspell = SymSpell::default();
        assert!(matches!(
            symspell.lookup("word", Verbosity::Top, 3),
            Err(SpellError::DistanceTooLarge {
                requested: 3,
                max: 2
            })
        ));
    }

    #[test]
    fn entry_below_threshold_is_staged_then_promoted() {
        let mut symspell = SymSpell::new(2, 7, 10).unwrap();
        assert!(!symspell.create_dictionary_entry("pawn", 4));
        assert_eq!(symspell.get_dictionary_size(), 0);
        assert_eq!(symspell.below_threshold_words["pawn"], 4);

        // the accumulated count reaches the threshold: promote
        assert!(symspell.create_dictionary_entry("pawn", 6));
        assert_eq!(symspell.get_dictionary_size(), 1);
        assert!(symspell.below_threshold_words.is_empty());
        assert_eq!(symspell.words["pawn"], 10);

        // further additions only accumulate
        assert!(!symspell.create_dictionary_entry("pawn", 5));
        assert_eq!(symspell.get_dictionary_size(), 1);
        assert_eq!(symspell.words["pawn"], 15);
    }

    #[test]
    fn zero_count_is_a_noop_under_positive_threshold() {
        let mut symspell = SymSpell::new(2, 7, 1).unwrap();
        assert!(!symspell.create_dictionary_entry("word", 0));
        assert_eq!(symspell.get_dictionary_size(), 0);
        assert!(symspell.below_threshold_words.is_empty());

        let mut unthresholded = SymSpell::new(2, 7, 0).unwrap();
        assert!(unthresholded.create_dictionary_entry("word", 0));
        assert_eq!(unthresholded.words["word"], 0);
    }

    #[test]
    fn counts_saturate_instead_of_wrapping() {
        let mut symspell = SymSpell::new(2, 7, 1).unwrap();
        symspell.create_dictionary_entry("word", usize::MAX - 1);
        symspell.create_dictionary_entry("word", 5);
        assert_eq!(symspell.words["word"], usize::MAX);
        symspell.create_dictionary_entry("word", 5);
        assert_eq!(symspell.words["word"], usize::MAX);
    }

    #[test]
    fn every_delete_variant_points_back_to_its_term() {
        let mut symspell = SymSpell::new(2, 7, 1).unwrap();
        symspell.create_dictionary_entry("steam", 5);

        let variants = symspell.edits_prefix("steam");
        assert!(variants.contains("steam"));
        assert!(variants.contains("team"));
        assert!(variants.contains("eam"));
        assert!(!variants.contains(""));
        for variant in &variants {
            let bucket = &symspell.deletes[&hash64(variant.as_bytes())];
            assert!(bucket.iter().any(|term| term.as_ref() == "steam"));
        }
    }

    #[test]
    fn short_terms_contribute_the_empty_variant() {
        let mut symspell = SymSpell::new(2, 7, 1).unwrap();
        symspell.create_dictionary_entry("is", 100);
        let variants = symspell.edits_prefix("is");
        assert!(variants.contains(""));
        let bucket = &symspell.deletes[&hash64(b"")];
        assert!(bucket.iter().any(|term| term.as_ref() == "is"));
    }

    #[test]
    fn zero_distance_index_holds_only_prefixes() {
        let symspell = SymSpell::new(0, 7, 1).unwrap();
        let variants = symspell.edits_prefix("word");
        assert_eq!(variants.len(), 1);
        assert!(variants.contains("word"));
    }

    #[test]
    fn deletes_cover_only_the_prefix() {
        let symspell = SymSpell::new(1, 4, 1).unwrap();
        let variants = symspell.edits_prefix("abcdefgh");
        // the shortened prefix itself plus its single deletes
        assert!(variants.contains("abcd"));
        assert!(variants.contains("bcd"));
        assert!(variants.contains("acd"));
        assert!(variants.contains("abd"));
        assert!(variants.contains("abc"));
        assert!(!variants.contains("abcdefgh"));
        assert_eq!(variants.len(), 5);
    }

    #[test]
    fn words_and_below_threshold_stay_disjoint() {
        let mut symspell = SymSpell::new(2, 7, 3).unwrap();
        symspell.create_dictionary_entry("alpha", 1);
        symspell.create_dictionary_entry("beta", 5);
        symspell.create_dictionary_entry("alpha", 1);
        for key in symspell.words.keys() {
            assert!(!symspell.below_threshold_words.contains_key(key));
        }
        assert_eq!(symspell.words.len(), 1);
        assert_eq!(symspell.below_threshold_words.len(), 1);
    }

    #[test]
    fn max_word_length_tracks_the_longest_word() {
        let mut symspell = SymSpell::default();
        assert_eq!(symspell.max_word_length(), 0);
        symspell.create_dictionary_entry("go", 1);
        assert_eq!(symspell.max_word_length(), 2);
        symspell.create_dictionary_entry("going", 1);
        assert_eq!(symspell.max_word_length(), 5);
        symspell.create_dictionary_entry("on", 1);
        assert_eq!(symspell.max_word_length(), 5);
    }

    #[test]
    fn loads_dictionary_from_file_and_skips_malformed_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "the 23135851162").unwrap();
        writeln!(file, "of 13151942776").unwrap();
        writeln!(file, "justonefield").unwrap();
        writeln!(file, "bad notanumber").unwrap();
        file.flush().unwrap();

        let mut symspell = SymSpell::default();
        assert!(symspell.load_dictionary(file.path(), 0, 1, " ").unwrap());
        assert_eq!(symspell.get_dictionary_size(), 2);
        assert_eq!(symspell.words["the"], 23135851162);

        assert!(!symspell
            .load_dictionary("no/such/file.txt", 0, 1, " ")
            .unwrap());
    }

    #[test]
    fn loads_bigrams_with_space_separator() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "where is 10000").unwrap();
        writeln!(file, "is the 25000").unwrap();
        writeln!(file, "twofields 7").unwrap();
        file.flush().unwrap();

        let mut symspell = SymSpell::default();
        assert!(symspell
            .load_bigram_dictionary(file.path(), 0, 2, " ")
            .unwrap());
        assert_eq!(symspell.bigrams.len(), 2);
        assert_eq!(symspell.bigrams["where is"], 10000);
        assert_eq!(symspell.bigram_min_count, 10000);
    }

    #[test]
    fn loads_bigrams_with_custom_separator() {
        let mut symspell = SymSpell::default();
        assert!(symspell.load_bigram_dictionary_line("where is\t125", 0, 1, "\t"));
        assert_eq!(symspell.bigrams["where is"], 125);
        assert_eq!(symspell.bigram_min_count, 125);
        assert!(!symspell.load_bigram_dictionary_line("nocount", 0, 1, "\t"));
    }
}
