//! Emoji removal.
//!
//! README authors sprinkle emoji through headings and bullet points. The
//! popover renders in a fixed, monochrome style, so every emoji code point is
//! removed before escaping and before any inline pattern runs. Doing it first
//! also means an emoji can never sit between a delimiter and its content.
use std::borrow::Cow;

/// Inclusive code point ranges treated as emoji.
const EMOJI_RANGES: &[(u32, u32)] = &[
  // Combining marks for symbols (keycaps and enclosing circles).
  (0x20D0, 0x20FF),
  (0x231A, 0x231B),
  // Miscellaneous technical symbols through the OCR block.
  (0x238C, 0x2454),
  // Miscellaneous symbols and dingbats.
  (0x2600, 0x27BF),
  (0x2B1B, 0x2B1C),
  (0x2B50, 0x2B50),
  (0x2B55, 0x2B55),
  // Variation selectors.
  (0xFE00, 0xFE0F),
  // Mahjong tiles up to the end of the supplemental symbols and pictographs,
  // including regional indicators (flags) and skin tone modifiers.
  (0x1F000, 0x1FFFF),
  // Tag characters used by subdivision flags.
  (0xE0020, 0xE007F),
];

/// Whether `c` falls in one of the emoji ranges.
#[must_use]
pub fn is_emoji(c: char) -> bool {
  let code = u32::from(c);
  EMOJI_RANGES
    .iter()
    .any(|&(start, end)| (start..=end).contains(&code))
}

/// Remove all emoji code points from `text`.
///
/// Surrounding whitespace is left alone, so `"a 🎉 b"` becomes `"a  b"`.
#[must_use]
pub fn strip_emoji(text: &str) -> Cow<'_, str> {
  if text.chars().any(is_emoji) {
    Cow::Owned(text.chars().filter(|&c| !is_emoji(c)).collect())
  } else {
    Cow::Borrowed(text)
  }
}
