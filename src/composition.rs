/// Result of `word_segmentation`: one optimal composition of the input.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    /// The input with spaces inserted at word boundaries, spelling kept as-is.
    pub segmented_string: String,
    /// The segmented string with each part replaced by its top correction.
    pub corrected_string: String,
    /// Edit distance sum between input string and corrected string.
    pub distance_sum: i64,
    /// Sum of word occurrence probabilities in log scale (a measure of how common and probable the corrected segmentation is).
    pub prob_log_sum: f64,
}

impl Composition {
    pub fn empty() -> Self {
        Self {
            segmented_string: "".to_string(),
            corrected_string: "".to_string(),
            distance_sum: 0,
            prob_log_sum: 0.0,
        }
    }
}
