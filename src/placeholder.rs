//! Placeholder thumbnails for records without an image

use std::fmt;

use serde::Serialize;

use crate::app_record::AppRecord;
use crate::constants::{INITIALS_FALLBACK, PLACEHOLDER_LIGHTNESS, PLACEHOLDER_SATURATION};

/// Short label for a placeholder tile.
///
/// "Voice Conversion" becomes "VC", "Studio" becomes "S", a blank title
/// becomes "?".
pub fn initials(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return INITIALS_FALLBACK.to_string();
    }
    let tokens = text
        .split(|c: char| c.is_whitespace() || c == '.' || c == '-')
        .filter(|token| !token.is_empty());
    let mut label = String::new();
    for token in tokens.take(2) {
        if let Some(c) = token.chars().next() {
            label.push(c);
        }
    }
    label.to_uppercase()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Hsl {
    pub hue: u16,
    pub saturation: u8,
    pub lightness: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsl({} {}% {}%)",
            self.hue, self.saturation, self.lightness
        )
    }
}

/// Deterministic tile color for `seed`
pub fn seeded_color(seed: &str) -> Hsl {
    let hash = seed
        .encode_utf16()
        .fold(0u32, |hash, unit| hash.wrapping_mul(31).wrapping_add(unit as u32));
    Hsl {
        hue: (hash % 360) as u16,
        saturation: PLACEHOLDER_SATURATION,
        lightness: PLACEHOLDER_LIGHTNESS,
    }
}

/// What a card shows in its image slot
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Thumbnail<'a> {
    Image { src: &'a str },
    Placeholder { initials: String, color: Hsl },
}

impl<'a> Thumbnail<'a> {
    pub fn for_record(app: &'a AppRecord) -> Self {
        match app.thumbnail.as_deref() {
            Some(src) if !src.trim().is_empty() => Self::Image { src },
            _ => Self::Placeholder {
                initials: initials(&app.title),
                color: seeded_color(&app.title),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_record::record;

    #[test]
    fn initials_of_titles() {
        assert_eq!(initials("Voice Conversion"), "VC");
        assert_eq!(initials("Studio"), "S");
        assert_eq!(initials(""), "?");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn initials_split_on_dots_and_dashes() {
        assert_eq!(initials("speech-to text"), "ST");
        assert_eq!(initials("..docs.site"), "DS");
        assert_eq!(initials("  studio   app  extra"), "SA");
    }

    #[test]
    fn seeded_color_known_values() {
        assert_eq!(seeded_color("").hue, 0);
        // 'a' = 97
        assert_eq!(seeded_color("a").hue, 97);
        // 97 * 31 + 98 = 3105, 3105 mod 360 = 225
        assert_eq!(seeded_color("ab").hue, 225);
    }

    #[test]
    fn seeded_color_is_pure_and_in_range() {
        let long = "x".repeat(500);
        for seed in ["", "Studio", "Voice Conversion", "ü漢字🎙", long.as_str()] {
            let color = seeded_color(seed);
            assert!(color.hue < 360);
            assert_eq!(color, seeded_color(seed));
            assert_eq!(color.saturation, 65);
            assert_eq!(color.lightness, 50);
        }
    }

    #[test]
    fn hsl_renders_as_css() {
        let color = seeded_color("ab");
        assert_eq!(color.to_string(), "hsl(225 65% 50%)");
    }

    #[test]
    fn thumbnail_prefers_image() {
        let mut app = record("Studio", "https://studio.example.dev", None);
        app.thumbnail = Some("/thumbs/studio.png".to_string());
        assert_eq!(
            Thumbnail::for_record(&app),
            Thumbnail::Image {
                src: "/thumbs/studio.png"
            }
        );
    }

    #[test]
    fn thumbnail_placeholder_is_not_stored() {
        let app = record("Voice Conversion", "https://voice.example.dev", None);
        match Thumbnail::for_record(&app) {
            Thumbnail::Placeholder { initials, .. } => assert_eq!(initials, "VC"),
            other => panic!("unexpected thumbnail {:?}", other),
        }
        assert_eq!(app.thumbnail, None);
    }
}
