//! Caption and title templates shared by every platform.

use crate::store::{Dojo, Submission};

pub const HASHTAGS: &[&str] = &["judo", "triplewaza", "judochallenge", "martialarts", "dojo"];

pub const DEFAULT_CAPTION_MESSAGE: &str = "Check out this Triple Waza submission!";

const UNKNOWN_DOJO: &str = "Unknown Dojo";

// YouTube rejects longer titles.
const MAX_TITLE_CHARS: usize = 100;

fn field(value: &Option<String>) -> &str {
    value.as_deref().map(str::trim).unwrap_or("")
}

fn dojo_name(dojo: &Dojo) -> &str {
    match field(&dojo.name) {
        "" => UNKNOWN_DOJO,
        name => name,
    }
}

/// "City, Country", either part alone, or empty.
fn location(dojo: &Dojo) -> String {
    [field(&dojo.city), field(&dojo.country)]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the post caption for a submission.
pub fn compose_caption(submission: &Submission) -> String {
    let dojo = submission.dojo();
    let location = location(&dojo);
    let heading = if location.is_empty() {
        format!("🥋 Triple Waza Challenge: {}", dojo_name(&dojo))
    } else {
        format!("🥋 Triple Waza Challenge: {} ({})", dojo_name(&dojo), location)
    };

    let message = match field(&submission.message) {
        "" => DEFAULT_CAPTION_MESSAGE,
        message => message,
    };

    let hashtags = HASHTAGS
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ");

    format!("{}\n\n{}\n\n{}", heading, message, hashtags)
}

pub fn video_title(submission: &Submission) -> String {
    let title = format!("{} - Triple Waza Challenge", dojo_name(&submission.dojo()));
    title.chars().take(MAX_TITLE_CHARS).collect()
}
