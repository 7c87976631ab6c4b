use std::borrow::Cow;

/// Escape `text` for embedding inside a single-quoted SQL literal.
///
/// The input is only rewritten when it contains `quote` at least once; the
/// common case hands back the borrowed input untouched. The rewrite always
/// doubles apostrophes, whichever `quote` triggered it.
pub fn escape(text: &str, quote: char) -> Cow<'_, str> {
    if text.contains(quote) {
        Cow::Owned(text.replace('\'', "''"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Shorthand for the only delimiter the generated statements use.
pub fn escape_sql(text: &str) -> Cow<'_, str> {
    escape(text, '\'')
}
