//! HTML rendering for referral emails.
//!
//! The sender's free-text message is split into paragraphs on blank lines.
//! The first paragraph opens with a bold lead-in (everything up to and
//! including its first comma); the second and the last paragraph are
//! emphasized. A single paragraph is both first and last, so it gets both.

use super::ReferralRequest;

const PARAGRAPH_STYLE: &str = "margin:0 0 16px;font-size:16px;line-height:1.6;color:#1f2937;";
const EMPHASIS_STYLE: &str =
    "margin:0 0 16px;font-size:16px;line-height:1.6;color:#b91c1c;font-style:italic;font-weight:600;";
const LEAD_STYLE: &str = "font-size:18px;font-weight:700;color:#111827;";

/// Shown when the sender left no message.
pub const DEFAULT_MESSAGE: &str =
    "I'd love for our dojo to take part in the Triple Waza Challenge. Join us as a founding member!";

/// Split a message into trimmed, non-empty paragraphs on blank lines.
pub fn split_paragraphs(message: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in message.lines() {
        if line.trim().is_empty() {
            flush(&mut current, &mut paragraphs);
        } else {
            current.push(line.trim_end());
        }
    }
    flush(&mut current, &mut paragraphs);

    paragraphs
}

fn flush(current: &mut Vec<&str>, paragraphs: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    let paragraph = current.join("\n").trim().to_string();
    if !paragraph.is_empty() {
        paragraphs.push(paragraph);
    }
    current.clear();
}

/// Split the first paragraph at its first comma.
///
/// The lead keeps the comma. Without a comma the whole paragraph is the lead.
pub fn split_lead(paragraph: &str) -> (&str, &str) {
    match paragraph.find(',') {
        Some(idx) => (&paragraph[..=idx], paragraph[idx + 1..].trim()),
        None => (paragraph, ""),
    }
}

/// Render the message paragraphs as styled HTML.
pub fn render_message(message: Option<&str>) -> String {
    let paragraphs = split_paragraphs(message.unwrap_or(""));
    if paragraphs.is_empty() {
        return format!(
            "<p style=\"{}\">{}</p>",
            PARAGRAPH_STYLE,
            escape_html(DEFAULT_MESSAGE)
        );
    }

    let last = paragraphs.len() - 1;
    paragraphs
        .iter()
        .enumerate()
        .map(|(i, paragraph)| {
            let body = if i == 0 {
                render_lead(paragraph)
            } else {
                render_text(paragraph)
            };
            let style = if i == 1 || i == last {
                EMPHASIS_STYLE
            } else {
                PARAGRAPH_STYLE
            };
            format!("<p style=\"{}\">{}</p>", style, body)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_lead(paragraph: &str) -> String {
    let (lead, rest) = split_lead(paragraph);
    let mut html = format!("<strong style=\"{}\">{}</strong>", LEAD_STYLE, render_text(lead));
    if !rest.is_empty() {
        html.push(' ');
        html.push_str(&render_text(rest));
    }
    html
}

/// Escape text and keep single line breaks.
fn render_text(text: &str) -> String {
    escape_html(text).replace('\n', "<br>")
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn render_subject(request: &ReferralRequest) -> String {
    format!(
        "{} invited you to the Triple Waza Challenge",
        request.sender_name.as_deref().unwrap_or("A fellow judoka").trim()
    )
}

/// Render the complete HTML document for a referral email.
pub fn render_email(request: &ReferralRequest, app_url: &str) -> String {
    let sender_name = escape_html(request.sender_name.as_deref().unwrap_or("").trim());
    let sender_line = match request.sender_email.as_deref().map(str::trim) {
        Some(email) if !email.is_empty() => {
            format!("{} (<a href=\"mailto:{1}\">{1}</a>)", sender_name, escape_html(email))
        }
        _ => sender_name.clone(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<body style="margin:0;padding:0;background:#f3f4f6;font-family:Arial,Helvetica,sans-serif;">
<div style="max-width:600px;margin:0 auto;padding:32px 24px;background:#ffffff;">
<h1 style="margin:0 0 24px;font-size:24px;color:#111827;">🥋 You're invited to the Triple Waza Challenge</h1>
{message}
<p style="margin:32px 0;text-align:center;">
<a href="{app_url}" style="display:inline-block;padding:14px 28px;background:#b91c1c;color:#ffffff;text-decoration:none;border-radius:6px;font-weight:700;">Join as a founding member</a>
</p>
<p style="margin:0;font-size:13px;color:#6b7280;">Sent on behalf of {sender_line}.</p>
</div>
</body>
</html>"#,
        message = render_message(request.message.as_deref()),
        app_url = escape_html(app_url),
        sender_line = sender_line,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(message: Option<&str>) -> ReferralRequest {
        ReferralRequest {
            sender_name: Some("Sensei Kano".to_string()),
            sender_email: Some("kano@kodokan.jp".to_string()),
            recipient_email: Some("dojo@example.com".to_string()),
            message: message.map(str::to_string),
        }
    }

    #[test]
    fn test_split_paragraphs_blank_lines() {
        let paragraphs = split_paragraphs("One\n\nTwo\n   \nThree\r\n\r\nFour");
        assert_eq!(paragraphs, vec!["One", "Two", "Three", "Four"]);
    }

    #[test]
    fn test_split_paragraphs_keeps_single_breaks() {
        let paragraphs = split_paragraphs("Line one\nline two\n\n\n\nNext");
        assert_eq!(paragraphs, vec!["Line one\nline two", "Next"]);
    }

    #[test]
    fn test_split_paragraphs_empty() {
        assert!(split_paragraphs("").is_empty());
        assert!(split_paragraphs("\n\n  \n").is_empty());
    }

    #[test]
    fn test_split_lead() {
        assert_eq!(split_lead("Hello, friend"), ("Hello,", "friend"));
        assert_eq!(split_lead("No comma here"), ("No comma here", ""));
        assert_eq!(split_lead("Trailing,"), ("Trailing,", ""));
        assert_eq!(split_lead("a, b, c"), ("a,", "b, c"));
    }

    #[test]
    fn test_render_two_paragraphs() {
        let html = render_message(Some("Hello, friend\n\nSee you soon"));
        let lines: Vec<&str> = html.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            format!(
                "<p style=\"{}\"><strong style=\"{}\">Hello,</strong> friend</p>",
                PARAGRAPH_STYLE, LEAD_STYLE
            )
        );
        assert_eq!(
            lines[1],
            format!("<p style=\"{}\">See you soon</p>", EMPHASIS_STYLE)
        );
    }

    #[test]
    fn test_render_middle_paragraphs_plain() {
        let html = render_message(Some("Hi, all\n\nSecond\n\nThird\n\nFourth\n\nLast"));
        let lines: Vec<&str> = html.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with(&format!("<p style=\"{}\">", EMPHASIS_STYLE)));
        assert!(lines[2].starts_with(&format!("<p style=\"{}\">", PARAGRAPH_STYLE)));
        assert!(lines[3].starts_with(&format!("<p style=\"{}\">", PARAGRAPH_STYLE)));
        assert!(lines[4].starts_with(&format!("<p style=\"{}\">", EMPHASIS_STYLE)));
    }

    #[test]
    fn test_render_single_paragraph_gets_both_styles() {
        let html = render_message(Some("Osu, let's train"));
        assert_eq!(
            html,
            format!(
                "<p style=\"{}\"><strong style=\"{}\">Osu,</strong> let&#39;s train</p>",
                EMPHASIS_STYLE, LEAD_STYLE
            )
        );
    }

    #[test]
    fn test_render_single_sentence_without_comma() {
        let html = render_message(Some("Join us"));
        assert!(html.contains("<strong"));
        assert!(html.contains(">Join us</strong></p>"));
    }

    #[test]
    fn test_render_empty_message_uses_default() {
        for message in [None, Some(""), Some("\n\n")] {
            let html = render_message(message);
            assert!(html.contains("founding member"));
            assert!(!html.contains("<strong"));
        }
    }

    #[test]
    fn test_render_escapes_html() {
        let html = render_message(Some("<b>Hi</b>, \"friends\" & co"));
        assert!(html.contains("&lt;b&gt;Hi&lt;/b&gt;,"));
        assert!(html.contains("&quot;friends&quot; &amp; co"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn test_render_line_breaks() {
        let html = render_message(Some("Hello, line one\nline two"));
        assert!(html.contains("line one<br>line two"));
    }

    #[test]
    fn test_render_email_document() {
        let html = render_email(&request(Some("Hello, friend")), "https://triplewaza.com");
        assert!(html.contains("href=\"https://triplewaza.com\""));
        assert!(html.contains("Sensei Kano (<a href=\"mailto:kano@kodokan.jp\">"));
        assert!(html.contains("Hello,</strong> friend"));
    }

    #[test]
    fn test_render_email_without_sender_email() {
        let mut req = request(None);
        req.sender_email = None;
        let html = render_email(&req, "https://triplewaza.com");
        assert!(html.contains("Sent on behalf of Sensei Kano."));
        assert!(!html.contains("mailto:"));
    }

    #[test]
    fn test_render_subject() {
        assert_eq!(
            render_subject(&request(None)),
            "Sensei Kano invited you to the Triple Waza Challenge"
        );
    }
}
