use crate::error::{BgResult, BigramError};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Characters that separate words. Carriage return is included so CRLF text
/// tokenizes the same as LF text.
pub const DELIMITERS: &[char] = &[
    ' ', '\t', '\n', '\r', '.', ',', ';', ':', '!', '?', '\'', '"', '-', '(', ')',
];

/// Loads the whole corpus into memory.
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// aborting the run.
pub fn read_corpus<P: AsRef<Path>>(path: P) -> BgResult<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| BigramError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            warn!(
                "⚠️  '{}' is not valid UTF-8 (at byte {}); decoding lossily",
                path.display(),
                e.utf8_error().valid_up_to()
            );
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// ASCII case folding in place. Non-ASCII characters are left untouched.
pub fn normalize(text: &mut String) {
    text.make_ascii_lowercase();
}

pub fn normalized(text: &str) -> String {
    text.to_ascii_lowercase()
}

/// Word tokens of `text`, in order. Never yields an empty token.
pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(DELIMITERS).filter(|t| !t.is_empty())
}

/// Adjacent `(tokens[i], tokens[i + 1])` pairs.
pub fn pairs<'a>(tokens: &'a [&'a str]) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
    tokens.windows(2).map(|w| (w[0], w[1]))
}
