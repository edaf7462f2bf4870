//! HTML message composition.
//!
//! Builds the email body from the user's text, the amount owed and an
//! optional GIF. All user-supplied fields pass through `escape_html` before
//! interpolation; the composed markup is the only place user input meets
//! HTML.

use crate::enrich::GifImage;

/// A fully composed outgoing message. Immutable once built.
#[derive(Debug, Clone)]
pub struct ComposedMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the inline image tag for a fetched GIF.
fn image_tag(gif: &GifImage) -> String {
    format!(
        "<img src=\"{}\" width=\"{}\" height=\"{}\" alt=\"{}\" border=\"0\">",
        escape_html(&gif.url),
        gif.width,
        gif.height,
        escape_html(&gif.title),
    )
}

/// Build the notice body: text, optional image, then the amount line.
///
/// The GIF is optional by contract; a failed lookup simply drops the image
/// line and nothing else changes.
pub fn compose_body(text: &str, value: f64, currency: &str, gif: Option<&GifImage>) -> String {
    let amount_line = format!("<strong>Amount: {}{}</strong>", escape_html(currency), value);
    match gif {
        Some(gif) => format!(
            "{}<br><br>{}<br>{}",
            escape_html(text),
            image_tag(gif),
            amount_line
        ),
        None => format!("{}<br><br>{}", escape_html(text), amount_line),
    }
}
