//! Direction detection
//!
//! Heuristic Unicode-range test, not a bidi algorithm: a string is
//! treated as RTL as soon as it contains one Arabic-script code point.

/// True iff the string contains at least one code point in the Arabic
/// (U+0600–U+06FF), Arabic Supplement (U+0750–U+077F), or Arabic
/// Extended-A (U+08A0–U+08FF) blocks.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(
            c,
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}'
        )
    })
}

/// Text direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Detect from text content
    pub fn of(text: &str) -> Self {
        if contains_arabic(text) {
            Self::Rtl
        } else {
            Self::Ltr
        }
    }

    /// Value for the dir attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }

    /// Physical text-align value for explicit alignment
    pub fn alignment(&self) -> &'static str {
        match self {
            Self::Ltr => "left",
            Self::Rtl => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latin_only_is_not_arabic() {
        assert!(!contains_arabic("hello"));
        assert!(!contains_arabic(""));
        assert!(!contains_arabic("12345 !?"));
    }

    #[test]
    fn test_arabic_detected() {
        assert!(contains_arabic("سلام"));
        assert!(contains_arabic("مرحبا"));
        // Persian text uses the same block
        assert!(contains_arabic("فارسی"));
    }

    #[test]
    fn test_mixed_text_detected() {
        assert!(contains_arabic("hello سلام"));
        assert!(contains_arabic("سلام hello"));
    }

    #[test]
    fn test_extended_blocks_detected() {
        // Arabic Supplement (U+0750) and Arabic Extended-A (U+08A0)
        assert!(contains_arabic("\u{0750}"));
        assert!(contains_arabic("\u{08A0}"));
        // Hebrew is RTL but outside the detector's scope
        assert!(!contains_arabic("שלום"));
    }

    #[test]
    fn test_direction_of() {
        assert_eq!(Direction::of("hello"), Direction::Ltr);
        assert_eq!(Direction::of("مرحبا"), Direction::Rtl);
        assert_eq!(Direction::Rtl.as_str(), "rtl");
        assert_eq!(Direction::Rtl.alignment(), "right");
        assert_eq!(Direction::Ltr.alignment(), "left");
    }
}
