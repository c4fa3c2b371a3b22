//! # Notification Formatter
//!
//! Renders an item into the markdown post sent to a room.

use crate::domain::types::{Item, Notification};
use crate::strings::messages;

pub const TITLE_LIMIT: usize = 120;
pub const BODY_LIMIT: usize = 4000;

/// Cuts `text` to at most `max` characters, ending in `...` when shortened.
pub fn trim(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Shortens, strips breaking-news markers, and closes the sentence.
pub fn headline_text(title: &str) -> String {
    let mut title = trim(&decode(title), TITLE_LIMIT);
    for marker in messages::BREAKING_MARKERS {
        title = title.replace(marker, "");
    }
    let title = title.trim();

    let punctuation = if title.is_empty() || title.ends_with(['.', '!']) {
        ""
    } else if title.ends_with("yor") || title.ends_with("yorlar") {
        // Turkish present-continuous headlines read as exclamations.
        "!"
    } else {
        "."
    };
    format!("{title}{punctuation}")
}

/// Sources send HTML-escaped text.
fn decode(text: &str) -> String {
    html_escape::decode_html_entities(text.trim()).into_owned()
}

pub fn mention_text(target: &str) -> Option<String> {
    let target = target.trim();
    if target.is_empty() {
        return None;
    }
    if messages::ROOM_MENTIONS.contains(&target) {
        return Some(messages::ROOM_MENTION.to_string());
    }
    if target.starts_with('@') {
        return Some(messages::user_mention(target));
    }
    Some(target.to_string())
}

pub fn render(item: &Item, mention: &str) -> Notification {
    let mut sections = Vec::new();
    if let Some(mention) = mention_text(mention) {
        sections.push(mention);
    }
    sections.push(messages::headline(&headline_text(&item.title)));

    let body = trim(decode(&item.body).trim(), BODY_LIMIT);
    if !body.is_empty() {
        sections.push(body);
    }
    if let Some(url) = item.media.as_deref().filter(|u| !u.is_empty()) {
        sections.push(messages::media_link(url));
    }

    Notification {
        text: sections.join("\n\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim() {
        assert_eq!(trim("Hello", 10), "Hello");
        assert_eq!(trim("Hello, World!", 8), "Hello...");
        assert_eq!(trim("çğıöşü", 5), "çğ...");
    }

    #[test]
    fn test_headline_punctuation() {
        assert_eq!(headline_text("Piyasalar yükseldi"), "Piyasalar yükseldi.");
        assert_eq!(headline_text("Kar yağışı sürüyor"), "Kar yağışı sürüyor!");
        assert_eq!(headline_text("Öğrenciler bekliyorlar"), "Öğrenciler bekliyorlar!");
        assert_eq!(headline_text("Maç bitti!"), "Maç bitti!");
        assert_eq!(headline_text("Seçim ne zaman?"), "Seçim ne zaman?.");
    }

    #[test]
    fn test_headline_strips_breaking_marker() {
        assert_eq!(headline_text("SON DAKİKA! Deprem oldu"), "Deprem oldu.");
    }

    #[test]
    fn test_marker_is_stripped_after_limiting() {
        // The cut lands inside the marker, so it is no longer recognised.
        let title = format!("{} SON DAKİKA! Deprem", "a".repeat(110));
        let headline = headline_text(&title);
        assert_eq!(headline, format!("{} SON DA...", "a".repeat(110)));
    }

    #[test]
    fn test_render_decodes_html_entities() {
        let item = Item {
            id: "a3".to_string(),
            title: "Faiz &amp; enflasyon".to_string(),
            body: "Merkez Bank&#305; &quot;sabit&quot;".to_string(),
            published: 3,
            media: None,
        };
        assert_eq!(
            render(&item, "").text,
            "**Faiz & enflasyon.**\n\nMerkez Bankı \"sabit\""
        );
    }

    #[test]
    fn test_entities_count_as_one_character_when_limiting() {
        let body = "&amp;".repeat(BODY_LIMIT);
        let item = Item {
            id: "a4".to_string(),
            title: "Uzun".to_string(),
            body,
            published: 4,
            media: None,
        };
        let text = render(&item, "").text;
        let body = text.split("\n\n").nth(1).unwrap();
        assert_eq!(body, "&".repeat(BODY_LIMIT));
    }

    #[test]
    fn test_headline_is_limited() {
        let long = "a".repeat(300);
        let headline = headline_text(&long);
        // 117 chars + "..." then a closing period is not added after '.'
        assert_eq!(headline.chars().count(), TITLE_LIMIT);
        assert!(headline.ends_with("..."));
    }

    #[test]
    fn test_mentions() {
        assert_eq!(mention_text(""), None);
        assert_eq!(mention_text("room").as_deref(), Some("@room"));
        assert_eq!(mention_text("@room").as_deref(), Some("@room"));
        assert_eq!(
            mention_text("@ali:example.org").as_deref(),
            Some("[@ali:example.org](https://matrix.to/#/@ali:example.org)")
        );
    }

    #[test]
    fn test_render_layout() {
        let item = Item {
            id: "a1".to_string(),
            title: "Yeni yasa kabul edildi".to_string(),
            body: "  Meclis bugün oyladı.  ".to_string(),
            published: 100,
            media: Some("https://cdn.example.org/a1.jpg".to_string()),
        };

        let notification = render(&item, "@room");
        assert_eq!(
            notification.text,
            "@room\n\n**Yeni yasa kabul edildi.**\n\nMeclis bugün oyladı.\n\n🖼️ [Görsel](https://cdn.example.org/a1.jpg)"
        );
    }

    #[test]
    fn test_render_without_optional_parts() {
        let item = Item {
            id: "a2".to_string(),
            title: "Kısa".to_string(),
            body: String::new(),
            published: 1,
            media: None,
        };
        assert_eq!(render(&item, "").text, "**Kısa.**");
    }
}
