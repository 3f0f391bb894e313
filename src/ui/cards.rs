//! Card rendering for catalog entries

use std::fmt::Write;

use crate::app_record::AppRecord;
use crate::host::hostname;
use crate::placeholder::Thumbnail;

/// Text shown in the image slot of a card
pub fn thumbnail_label(app: &AppRecord) -> String {
    match Thumbnail::for_record(app) {
        Thumbnail::Image { src } => format!("[{}]", src),
        Thumbnail::Placeholder { initials, color } => format!("[{} {}]", initials, color),
    }
}

/// Write one card: image slot, title and host, then the description
pub fn write_card(out: &mut String, app: &AppRecord, indent: &str) {
    let _ = writeln!(
        out,
        "{}{} {}  {}",
        indent,
        thumbnail_label(app),
        app.title,
        hostname(&app.url)
    );
    let description = app.description().trim();
    if !description.is_empty() {
        let _ = writeln!(out, "{}    {}", indent, description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_record::record;

    #[test]
    fn placeholder_card() {
        let mut app = record("Voice Conversion", "https://voice.example.dev/app", None);
        app.description = Some("Convert recordings".to_string());
        let mut out = String::new();
        write_card(&mut out, &app, "");
        let mut lines = out.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("[VC hsl("), "{}", first);
        assert!(first.ends_with("Voice Conversion  voice.example.dev"));
        assert_eq!(lines.next(), Some("    Convert recordings"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn image_card_without_description() {
        let mut app = record("Studio", "https://studio.example.dev", None);
        app.thumbnail = Some("/thumbs/studio.png".to_string());
        let mut out = String::new();
        write_card(&mut out, &app, "  ");
        assert_eq!(out, "  [/thumbs/studio.png] Studio  studio.example.dev\n");
    }
}
