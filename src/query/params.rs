use std::borrow::Cow;

/// Splits a fragment (`#` optional) into decoded `(name, value)` pairs.
///
/// Pairs without `=`, with an empty name, or whose escapes do not decode to
/// UTF-8 are skipped. Order and duplicates are preserved.
pub fn parse_params(fragment: &str) -> Vec<(String, String)> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    fragment
        .split('&')
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            let name = urlencoding::decode(name).ok()?;
            if name.is_empty() {
                return None;
            }
            let value = urlencoding::decode(value).ok()?;
            Some((name.into_owned(), value.into_owned()))
        })
        .collect()
}

#[derive(Debug, Default)]
pub(crate) struct QueryString {
    buf: String,
}

impl QueryString {
    pub(crate) fn push(&mut self, name: &str, value: &str) {
        if !self.buf.is_empty() {
            self.buf.push('&');
        }
        self.buf.push_str(&encode(name));
        self.buf.push('=');
        self.buf.push_str(&encode(value));
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}

pub(crate) fn encode(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}
