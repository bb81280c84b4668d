//! Provides the `read_words` function, which turns a text file into the list
//! of words to sort.
//!
//! A word is what's left of a whitespace-separated token after throwing away
//! everything that isn't an ASCII letter: `don't` becomes `dont`, and `1984`
//! disappears entirely.
use anyhow::{Context, Result};
use bstr::io::BufReadExt;
use bstr::ByteSlice;
use encoding_rs_io::DecodeReaderBytesBuilder;
use log::{info, warn};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// The default limit on the number of words read from one file
pub const MAX_WORDS: usize = 100_000;

/// Reads at most `max_words` words from the file at `path`.
pub fn read_words(path: &Path, max_words: usize) -> Result<Vec<String>> {
    let file = File::open(path).with_context(|| format!("Can't open file: {}", path.display()))?;
    let words = words_from(file, max_words)
        .with_context(|| format!("Error reading file: {}", path.display()))?;
    info!("read {} words from {}", words.len(), path.display());
    Ok(words)
}

/// Reads at most `max_words` words from `source`. UTF-16 input (with a Byte
/// Order Mark) is translated to UTF-8 first; anything else is passed through
/// as is.
pub fn words_from(source: impl Read, max_words: usize) -> Result<Vec<String>> {
    let mut reader = BufReader::new(
        DecodeReaderBytesBuilder::new()
            .bom_sniffing(true) // Look at the BOM to detect UTF-16 files and convert to UTF-8
            .strip_bom(true) // Remove the BOM before sending data to us
            .utf8_passthru(true) // Don't enforce UTF-8 (BOM or no BOM)
            .build(source),
    );
    let mut words = Vec::new();
    let mut truncated = false;
    reader.for_byte_line(|line| {
        for token in line.fields_with(|c| c.is_ascii_whitespace()) {
            let Some(word) = clean(token) else { continue };
            if words.len() == max_words {
                truncated = true;
                return Ok(false);
            }
            words.push(word);
        }
        Ok(true)
    })?;
    if truncated {
        warn!("Too many words; only the first {max_words} are used");
    }
    Ok(words)
}

/// Keeps the ASCII letters of `token`, or returns `None` if there aren't any.
fn clean(token: &[u8]) -> Option<String> {
    let word: String =
        token.iter().filter(|b| b.is_ascii_alphabetic()).map(|&b| char::from(b)).collect();
    if word.is_empty() {
        None
    } else {
        Some(word)
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};

    fn words(text: &str) -> Vec<String> {
        words_from(text.as_bytes(), MAX_WORDS).unwrap()
    }

    fn to_utf_16le(source: &str) -> Vec<u8> {
        let mut result = b"\xff\xfe".to_vec();
        for b in source.as_bytes().iter() {
            result.push(*b);
            result.push(0);
        }
        result
    }

    fn to_utf_16be(source: &str) -> Vec<u8> {
        let mut result = b"\xfe\xff".to_vec();
        for b in source.as_bytes().iter() {
            result.push(0);
            result.push(*b);
        }
        result
    }

    #[test]
    fn tokens_are_split_on_whitespace_and_stripped_to_letters() {
        assert_eq!(
            words("The cat's\tpajamas,  don't\n\n  (really) 1984 x-ray\r\n"),
            ["The", "cats", "pajamas", "dont", "really", "xray"]
        );
    }

    #[test]
    fn tokens_of_no_letters_are_dropped() {
        assert!(words("42 -- ... \n 3.14159").is_empty());
        assert!(words("").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_dropped_too() {
        assert_eq!(words("caf\u{e9} na\u{ef}ve \u{3b1}\u{3b2}"), ["caf", "nave"]);
    }

    #[test]
    fn a_utf8_bom_is_not_part_of_the_first_word() {
        assert_eq!(words("\u{FEFF}Hello world"), ["Hello", "world"]);
    }

    #[test]
    fn utf_16_is_translated() {
        let text = "The cute red crab\n jumps over the lazy blue gopher\n";
        let expected = words(text);
        assert_eq!(words_from(&to_utf_16le(text)[..], MAX_WORDS).unwrap(), expected);
        assert_eq!(words_from(&to_utf_16be(text)[..], MAX_WORDS).unwrap(), expected);
    }

    #[test]
    fn reading_stops_at_the_word_limit() {
        assert_eq!(words_from(&b"one two three\nfour"[..], 2).unwrap(), ["one", "two"]);
        assert_eq!(words_from(&b"one two 33 three"[..], 3).unwrap(), ["one", "two", "three"]);
    }

    #[test]
    fn read_words_names_the_missing_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.child("nope.txt");
        let err = read_words(missing.path(), MAX_WORDS).unwrap_err();
        assert!(err.to_string().contains("nope.txt"), "{err}");
    }

    #[test]
    fn read_words_reads_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("words.txt");
        file.write_str("banana apple\ncherry!\n").unwrap();
        assert_eq!(read_words(file.path(), MAX_WORDS).unwrap(), ["banana", "apple", "cherry"]);
    }
}
