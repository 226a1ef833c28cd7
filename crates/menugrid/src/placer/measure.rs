//! Line-count estimation.
//!
//! An intentional approximation: every character is assumed to occupy
//! `AVERAGE_CHAR_WIDTH_EM` of the variant's font size, and lines break by
//! greedy word wrap. Static averages catch the violations that matter
//! (descriptions blowing a content budget) while tolerating borderline
//! ambiguity of a character or two per line. True text shaping belongs to the
//! host renderer, which owns real font metrics; the heuristic's behavior is
//! the contract here, not a bug to fix.

/// Average glyph width as a fraction of font size. Named constant so the
/// heuristic's one tuning knob is visible, not a magic number.
pub const AVERAGE_CHAR_WIDTH_EM: f32 = 0.5;

/// Measures text in layout units for one tile variant's font size.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer {
    font_size: f32,
}

impl TextMeasurer {
    pub fn new(font_size: f32) -> Self {
        TextMeasurer { font_size }
    }

    fn char_width(&self) -> f32 {
        AVERAGE_CHAR_WIDTH_EM * self.font_size
    }

    /// Approximate rendered width of a string, in layout units.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width()
    }

    /// Estimates how many printed lines `text` occupies when word-wrapped at
    /// `max_width`. Greedy wrap: a word that does not fit on the current line
    /// starts the next one; a single over-long word still occupies one line.
    /// Empty text is zero lines.
    pub fn estimated_lines(&self, text: &str, max_width: f32) -> u8 {
        let words: Vec<&str> = text.split_whitespace().collect();
        if words.is_empty() {
            return 0;
        }

        let space = self.char_width();
        let mut line_count = 1u8;
        let mut current_width = 0.0_f32;
        let mut first = true;

        for word in &words {
            let word_width = self.measure(word);
            let space_width = if first { 0.0 } else { space };

            if !first && current_width + space_width + word_width > max_width {
                line_count = line_count.saturating_add(1);
                current_width = word_width;
            } else {
                current_width += space_width + word_width;
                first = false;
            }
        }
        line_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_is_zero_lines() {
        let measurer = TextMeasurer::new(10.0);
        assert_eq!(measurer.estimated_lines("", 100.0), 0);
        assert_eq!(measurer.estimated_lines("   ", 100.0), 0);
    }

    #[test]
    fn test_single_word_is_one_line() {
        let measurer = TextMeasurer::new(10.0);
        assert_eq!(measurer.estimated_lines("Burger", 100.0), 1);
    }

    #[test]
    fn test_measure_scales_with_font_size() {
        let small = TextMeasurer::new(8.0);
        let large = TextMeasurer::new(16.0);
        let text = "Halloumi";
        assert!((large.measure(text) - small.measure(text) * 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_long_text_wraps() {
        let measurer = TextMeasurer::new(10.0);
        // char width = 5.0; "pan seared scallops" ≈ 19 chars → 95 units, must
        // wrap at a 50-unit line.
        let lines = measurer.estimated_lines("pan seared scallops with lemon butter", 50.0);
        assert!(lines >= 3, "expected 3+ lines, got {lines}");
    }

    #[test]
    fn test_overlong_single_word_still_one_line() {
        let measurer = TextMeasurer::new(10.0);
        assert_eq!(
            measurer.estimated_lines("Supercalifragilistic", 20.0),
            1,
            "greedy wrap never splits inside a word"
        );
    }

    #[test]
    fn test_exact_fit_does_not_wrap() {
        let measurer = TextMeasurer::new(10.0);
        // "ab cd" = 2 + 1 + 2 chars = 25.0 units exactly.
        assert_eq!(measurer.estimated_lines("ab cd", 25.0), 1);
        assert_eq!(measurer.estimated_lines("ab cd", 24.9), 2);
    }
}
