//! Save form decoding.
//!
//! Page bodies are raw bytes, so the `application/x-www-form-urlencoded`
//! body is decoded by hand: percent escapes become bytes as-is instead of
//! going through a UTF-8 string.

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use percent_encoding::percent_decode;

/// Form submitted by the edit page.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct SaveForm {
    /// Title to save under; absent or empty keeps the path identifier.
    pub(crate) title: Option<String>,
    /// Raw page body; absent saves an empty page.
    pub(crate) body: Vec<u8>,
}

impl SaveForm {
    /// Decode a urlencoded form. The first occurrence of a field wins.
    pub(crate) fn parse(input: &[u8]) -> Self {
        let mut title = None;
        let mut body = None;

        for pair in input.split(|&b| b == b'&').filter(|pair| !pair.is_empty()) {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(pos) => (&pair[..pos], &pair[pos + 1..]),
                None => (pair, &[][..]),
            };

            match decode(key).as_slice() {
                b"title" if title.is_none() => {
                    title = Some(String::from_utf8_lossy(&decode(value)).into_owned());
                }
                b"body" if body.is_none() => body = Some(decode(value)),
                _ => {}
            }
        }

        Self {
            title,
            body: body.unwrap_or_default(),
        }
    }
}

/// Undo form encoding: `+` is a space, then percent escapes.
fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

impl<S> FromRequest<S> for SaveForm
where
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await?;
        Ok(Self::parse(&bytes))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_title_and_body() {
        let form = SaveForm::parse(b"title=Home&body=hello+world%21");

        assert_eq!(form.title.as_deref(), Some("Home"));
        assert_eq!(form.body, b"hello world!");
    }

    #[test]
    fn test_parse_keeps_non_utf8_body_bytes() {
        let form = SaveForm::parse(b"title=Bin&body=%FF%00%0D%0A");

        assert_eq!(form.body, vec![0xff, 0x00, b'\r', b'\n']);
    }

    #[test]
    fn test_parse_missing_fields() {
        assert_eq!(SaveForm::parse(b""), SaveForm::default());
        assert_eq!(SaveForm::parse(b"other=1&body"), SaveForm::default());
    }

    #[test]
    fn test_parse_first_value_wins() {
        let form = SaveForm::parse(b"title=A&title=B&body=1&body=2");

        assert_eq!(form.title.as_deref(), Some("A"));
        assert_eq!(form.body, b"1");
    }

    #[test]
    fn test_parse_literal_plus_and_equals() {
        let form = SaveForm::parse(b"body=a%2Bb=c");

        assert_eq!(form.body, b"a+b=c");
    }

    #[test]
    fn test_parse_invalid_utf8_title_is_lossy() {
        let form = SaveForm::parse(b"title=%FFx");

        assert_eq!(form.title.as_deref(), Some("\u{fffd}x"));
    }
}
