//! Rich-text markup around a word.
//!
//! Card text wraps words in tags such as `<b>` or `<color=red>`. Transforms
//! that read the first or last letter of a word, or attach something to its
//! end, work on the visible text between the leading and trailing tag runs.

/// A word split into its leading tags, visible text, and trailing tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Wrapped<'a> {
    pub open: &'a str,
    pub visible: &'a str,
    pub close: &'a str,
}

impl<'a> Wrapped<'a> {
    pub fn split(text: &'a str) -> Self {
        let (open, rest) = text.split_at(leading_len(text));
        let (visible, close) = rest.split_at(rest.len() - trailing_len(rest));
        Self {
            open,
            visible,
            close,
        }
    }

    /// Rebuild the word around new visible text.
    pub fn rewrap(&self, visible: &str) -> String {
        format!("{}{visible}{}", self.open, self.close)
    }
}

/// Byte length of the run of `<...>` tags at the start of `text`.
pub(super) fn leading_len(text: &str) -> usize {
    let mut pos = 0;
    while text[pos..].starts_with('<')
        && let Some(close) = text[pos..].find('>')
    {
        pos += close + 1;
    }
    pos
}

/// Byte length of the run of `<...>` tags at the end of `text`.
pub(super) fn trailing_len(text: &str) -> usize {
    let mut end = text.len();
    while text[..end].ends_with('>')
        && let Some(open) = text[..end].rfind('<')
    {
        end = open;
    }
    text.len() - end
}
