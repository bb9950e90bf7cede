use anyhow::{Result, anyhow};
use base64::{Engine as _, engine::general_purpose};
use mailparse::MailHeaderMap;
use std::fs;
use std::path::Path;

use crate::compose::ComposeHost;

/// Treats a message file on disk as an open draft: the path is the handle.
pub struct EmlComposeHost;

impl ComposeHost for EmlComposeHost {
    type Handle = Path;

    fn get_subject(&self, path: &Path) -> Result<String> {
        let raw = fs::read(path)?;
        let (headers, _) = mailparse::parse_headers(&raw)
            .map_err(|e| anyhow!("cannot parse headers of {}: {e}", path.display()))?;
        Ok(headers.get_first_value("Subject").unwrap_or_default())
    }

    fn set_subject(&self, path: &Path, subject: &str) -> Result<()> {
        let raw = fs::read(path)?;
        fs::write(path, replace_subject(&raw, subject))?;
        Ok(())
    }
}

/// Rewrite the (possibly folded) Subject header of `raw`, keeping the
/// message's line endings. Without a Subject header one is appended to the
/// header block.
pub fn replace_subject(raw: &[u8], subject: &str) -> Vec<u8> {
    let crlf = raw.windows(2).any(|w| w == b"\r\n");
    let eol = if crlf { "\r\n" } else { "\n" };
    let mut new_line = format!("Subject: {}", encode_header_value(subject, eol)).into_bytes();
    if crlf {
        new_line.push(b'\r');
    }

    let lines: Vec<&[u8]> = raw.split(|b| *b == b'\n').collect();
    let header_end = lines
        .iter()
        .position(|l| l.is_empty() || *l == b"\r")
        .unwrap_or(lines.len());

    let mut out_lines: Vec<&[u8]> = Vec::with_capacity(lines.len() + 1);
    let mut replaced = false;
    let mut in_subject = false;

    for line in &lines[..header_end] {
        if in_subject && matches!(line.first(), Some(b' ') | Some(b'\t')) {
            continue;
        }
        in_subject = false;

        if is_subject_header(line) {
            in_subject = true;
            if !replaced {
                out_lines.push(&new_line);
                replaced = true;
            }
            continue;
        }
        out_lines.push(line);
    }
    if !replaced {
        out_lines.push(&new_line);
    }
    out_lines.extend_from_slice(&lines[header_end..]);

    out_lines.join(&b'\n')
}

// Max UTF-8 bytes per encoded-word. The first word shares its line with
// `Subject: `; later ones sit on continuation lines after a single space.
// Both keep lines within 78 characters.
const FIRST_ENCODED_WORD_BYTES: usize = 42;
const ENCODED_WORD_BYTES: usize = 45;

/// Plain ASCII is written as is; anything else becomes a run of RFC 2047
/// base64 encoded-words folded onto continuation lines.
pub fn encode_header_value(value: &str, eol: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let mut words = Vec::new();
    let mut chunk = String::new();
    for c in value.chars() {
        let limit = if words.is_empty() {
            FIRST_ENCODED_WORD_BYTES
        } else {
            ENCODED_WORD_BYTES
        };
        if chunk.len() + c.len_utf8() > limit {
            words.push(encoded_word(&chunk));
            chunk.clear();
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        words.push(encoded_word(&chunk));
    }
    words.join(&format!("{eol} "))
}

fn encoded_word(chunk: &str) -> String {
    format!("=?UTF-8?B?{}?=", general_purpose::STANDARD.encode(chunk.as_bytes()))
}

fn is_subject_header(line: &[u8]) -> bool {
    line.len() >= 8 && line[..8].eq_ignore_ascii_case(b"subject:")
}
