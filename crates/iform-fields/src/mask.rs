#![forbid(unsafe_code)]

//! Fixed-slot input masks.
//!
//! A mask is a template where every space is a digit slot and every other
//! character is a literal. Re-applying the mask strips the raw value down to
//! its digits and refills the slots left to right; surplus digits are
//! dropped.
//!
//! The caret is carried across by digit count: if `n` digits preceded the
//! caret in the raw value, the caret lands just after the `n`-th filled slot.
//! Carets are grapheme indexes, matching the text editor.

use unicode_segmentation::UnicodeSegmentation;

/// Mask used by date fields: `DD/MM/YYYY`.
pub const DATE_MASK: &str = "  /  /    ";

/// A digit-slot mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataMask {
    template: Vec<char>,
}

impl DataMask {
    /// Create a mask from a template; spaces are slots.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.chars().collect(),
        }
    }

    /// The mask used by date fields.
    pub fn date() -> Self {
        Self::new(DATE_MASK)
    }

    /// Number of digit slots.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.template.iter().filter(|&&c| c == ' ').count()
    }

    /// The template with every slot empty.
    #[must_use]
    pub fn empty(&self) -> String {
        self.template.iter().collect()
    }

    /// Re-apply the mask to `raw`, moving `caret` (a grapheme index into
    /// `raw`) to the equivalent position in the result.
    #[must_use]
    pub fn apply(&self, raw: &str, caret: usize) -> (String, usize) {
        let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
        let digits_before = raw
            .graphemes(true)
            .take(caret)
            .map(digit_count)
            .sum::<usize>()
            .min(self.slots());

        let mut remaining = digits.into_iter();
        let mut masked = String::with_capacity(self.template.len());
        let mut filled = 0;
        let mut new_caret = 0;
        for (i, &c) in self.template.iter().enumerate() {
            if c != ' ' {
                masked.push(c);
                continue;
            }
            match remaining.next() {
                Some(d) => {
                    masked.push(d);
                    filled += 1;
                    if filled == digits_before {
                        new_caret = i + 1;
                    }
                }
                None => masked.push(' '),
            }
        }
        (masked, new_caret)
    }

}

/// Count the ASCII digits in `s`.
#[must_use]
pub fn digit_count(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn masked(raw: &str) -> String {
        DataMask::date().apply(raw, 0).0
    }

    #[test]
    fn date_mask_shape() {
        let mask = DataMask::date();
        assert_eq!(mask.slots(), 8);
        assert_eq!(mask.empty(), "  /  /    ");
    }

    #[test]
    fn fills_slots_left_to_right() {
        assert_eq!(masked("01021990"), "01/02/1990");
        assert_eq!(masked("0102"), "01/02/    ");
        assert_eq!(masked("ab1c"), "1 /  /    ");
    }

    #[test]
    fn surplus_digits_are_dropped() {
        assert_eq!(masked("0102199045"), "01/02/1990");
    }

    #[test]
    fn caret_follows_digit_count() {
        let mask = DataMask::date();
        // "12" typed, third digit inserted before the slash.
        let (masked, caret) = mask.apply("120/  /    ", 3);
        assert_eq!(masked, "12/0 /    ");
        assert_eq!(caret, 4);
        // Caret before any digit stays at the start.
        let (_, caret) = mask.apply("5  /  /    ", 0);
        assert_eq!(caret, 0);
    }

    #[test]
    fn caret_counts_graphemes() {
        // The accented digit is one grapheme but two chars.
        let (masked, caret) = DataMask::date().apply("1\u{301}2", 2);
        assert_eq!(masked, "12/  /    ");
        assert_eq!(caret, 2);
    }

    #[test]
    fn digit_count_ignores_literals() {
        assert_eq!(digit_count("01/02/19  "), 6);
    }
}
