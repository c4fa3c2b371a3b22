use crate::domain::registry::FeedRegistry;
use crate::strings::messages;

pub fn feed_lines(registry: &FeedRegistry) -> Vec<String> {
    registry
        .iter()
        .map(|feed| {
            messages::feed_line(&feed.id, &feed.name, feed.emoji.as_deref(), &feed.description)
        })
        .collect()
}

pub fn handle_feeds(registry: &FeedRegistry) {
    for line in feed_lines(registry) {
        println!("{line}");
    }
}
