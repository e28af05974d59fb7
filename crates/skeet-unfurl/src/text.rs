//! Composition of the preview text

/// Longest text a compact (video) embed may carry
pub const COMPACT_TEXT_LIMIT: usize = 255;

const ELLIPSIS: &str = "...";

/// Attribution for an embedded quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum QuoteBlock {
    Quoted {
        author: String,
        handle: String,
        text: String,
    },
    Deleted {
        author: String,
        handle: String,
    },
}

impl QuoteBlock {
    pub(crate) fn render(&self) -> String {
        match self {
            QuoteBlock::Quoted {
                author,
                handle,
                text,
            } => format!("\n\n↘️ Quoting {author} (@{handle}):\n\n{text}"),
            QuoteBlock::Deleted { author, handle } => {
                format!("\n\nQuoting deleted skeet from {author} (@{handle})")
            }
        }
    }
}

/// Name to show for an author: display name, else handle
pub(crate) fn author_name(display_name: Option<&str>, handle: &str) -> String {
    display_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(handle)
        .to_string()
}

pub(crate) fn reply_prefix(handle: &str) -> String {
    format!("Reply to @{handle}: ")
}

pub(crate) fn compose(reply: Option<&str>, text: &str, quote: Option<&str>) -> String {
    let mut composed = String::with_capacity(text.len());
    composed.push_str(reply.unwrap_or_default());
    composed.push_str(text);
    composed.push_str(quote.unwrap_or_default());
    composed
}

/// Fit `text` into `width` characters.
///
/// Whitespace runs are always collapsed to single spaces. If the result
/// still does not fit, whole words are dropped from the end until the
/// remainder plus `...` fits.
pub fn shorten(text: &str, width: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    let collapsed = words.join(" ");
    if collapsed.chars().count() <= width {
        return collapsed;
    }

    let budget = width.saturating_sub(ELLIPSIS.len());
    let mut shortened = String::new();
    let mut len = 0;
    for word in words {
        let needed = word.chars().count() + usize::from(!shortened.is_empty());
        if len + needed > budget {
            break;
        }
        if !shortened.is_empty() {
            shortened.push(' ');
        }
        shortened.push_str(word);
        len += needed;
    }

    // A lone word longer than the limit is cut mid-word instead of leaving
    // only the ellipsis
    if shortened.is_empty() {
        shortened = collapsed.chars().take(budget).collect();
    }
    shortened.push_str(ELLIPSIS);
    shortened
}
