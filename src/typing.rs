//! Looping "typewriter" over a list of phrases.

#[derive(Clone, Debug, PartialEq)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Pause with the full phrase on screen before deleting starts.
    pub hold_ms: u32,
    /// Pause on an empty line before the next phrase starts.
    pub gap_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: [
                "Systems programmer.",
                "Graphics tinkerer.",
                "Open-source contributor.",
            ]
            .map(String::from)
            .to_vec(),
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            gap_ms: 500,
        }
    }
}

impl TypingConfig {
    /// Replaces the phrase list with a `|`-separated override, ignoring
    /// blank entries. An override with no usable phrase leaves the list alone.
    pub fn with_phrase_override(mut self, raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return self;
        };
        let phrases: Vec<String> = raw
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if !phrases.is_empty() {
            self.phrases = phrases;
        }
        self
    }
}

/// What to display after a tick and how long to wait before the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    config: TypingConfig,
    phrase: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    /// `None` when there is nothing to type.
    pub fn new(config: TypingConfig) -> Option<Self> {
        if config.phrases.is_empty() {
            return None;
        }
        Some(Self {
            config,
            phrase: 0,
            chars: 0,
            deleting: false,
        })
    }

    /// Text shown when motion is reduced: the first phrase, never animated.
    pub fn static_text(&self) -> &str {
        &self.config.phrases[0]
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    /// Adds or removes one character and reports the visible prefix.
    pub fn tick(&mut self) -> Frame {
        let current = &self.config.phrases[self.phrase];
        let len = current.chars().count();

        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
        } else {
            self.chars = (self.chars + 1).min(len);
        }
        let text: String = current.chars().take(self.chars).collect();

        let delay_ms = if !self.deleting && self.chars == len {
            self.deleting = true;
            self.config.hold_ms
        } else if self.deleting && self.chars == 0 {
            self.deleting = false;
            self.phrase = (self.phrase + 1) % self.config.phrases.len();
            self.config.gap_ms
        } else if self.deleting {
            self.config.delete_ms
        } else {
            self.config.type_ms
        };

        Frame { text, delay_ms }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        let config = TypingConfig {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            ..TypingConfig::default()
        };
        Typewriter::new(config).unwrap()
    }

    #[test]
    fn grows_then_shrinks_without_skipping() {
        let mut tw = writer(&["a.", "bb."]);
        let texts: Vec<String> = (0..4).map(|_| tw.tick().text).collect();
        assert_eq!(texts, ["a", "a.", "a", ""]);
        assert_eq!(tw.phrase_index(), 1);
        assert_eq!(tw.tick().text, "b");
    }

    #[test]
    fn delays_follow_phase() {
        let mut tw = writer(&["ab"]);
        let delays: Vec<u32> = (0..5).map(|_| tw.tick().delay_ms).collect();
        // type, hold at full, delete, gap at empty, type again
        assert_eq!(delays, [100, 2000, 50, 500, 100]);
    }

    #[test]
    fn phrase_index_wraps() {
        let mut tw = writer(&["x", "y"]);
        for _ in 0..4 {
            tw.tick();
        }
        assert_eq!(tw.phrase_index(), 0);
        assert!(!tw.is_deleting());
    }

    #[test]
    fn multibyte_phrases_advance_by_character() {
        let mut tw = writer(&["héllo"]);
        assert_eq!(tw.tick().text, "h");
        assert_eq!(tw.tick().text, "hé");
    }

    #[test]
    fn empty_list_is_inert() {
        let config = TypingConfig {
            phrases: Vec::new(),
            ..TypingConfig::default()
        };
        assert!(Typewriter::new(config).is_none());
    }

    #[test]
    fn phrase_override_parsing() {
        let config = TypingConfig::default().with_phrase_override(Some(" Rustacean. | | Builder. "));
        assert_eq!(config.phrases, ["Rustacean.", "Builder."]);

        let untouched = TypingConfig::default().with_phrase_override(Some(" | "));
        assert_eq!(untouched.phrases, TypingConfig::default().phrases);
    }
}
