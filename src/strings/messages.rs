//! # Messages
//!
//! Constant strings and templates for the posts sent to rooms and the CLI output.

/// Leading markers some sources prepend to breaking headlines.
pub const BREAKING_MARKERS: &[&str] = &["SON DAKİKA!"];

/// Room-wide mention keywords accepted in bindings.
pub const ROOM_MENTIONS: &[&str] = &["@room", "room", "everyone"];

pub const ROOM_MENTION: &str = "@room";

pub fn user_mention(user_id: &str) -> String {
    format!("[{user_id}](https://matrix.to/#/{user_id})")
}

pub fn headline(title: &str) -> String {
    format!("**{title}**")
}

pub fn media_link(url: &str) -> String {
    format!("🖼️ [Görsel]({url})")
}

pub fn feed_line(id: &str, name: &str, emoji: Option<&str>, description: &str) -> String {
    match emoji {
        Some(emoji) => format!("{emoji} {id} - {name}: {description}"),
        None => format!("{id} - {name}: {description}"),
    }
}

pub fn binding_line(group: &str, feed: &str, room: &str, mention: &str) -> String {
    format!("[{group}] {feed} -> {room} (mention {mention})")
}

pub fn binding_saved(group: &str, feed: &str) -> String {
    format!("✅ Saved binding for feed '{feed}' in group '{group}'.")
}

pub fn binding_removed(group: &str, feed: &str) -> String {
    format!("🗑️ Removed binding for feed '{feed}' from group '{group}'.")
}

pub fn unknown_feed(feed: &str) -> String {
    format!("Unknown feed '{feed}'. Run `feedcast feeds` to list available feeds.")
}

pub const NO_BINDINGS: &str = "No bindings configured.";
