//! Sentence and word tokenization.
//!
//! Deliberately lightweight: scoring only needs sentences split well
//! enough to isolate defining patterns, and word tokens split well enough
//! that a parenthesized shortform surfaces as the token triple
//! `(`, shortform, `)`.

/// Split text into sentences.
///
/// A terminator (`.`, `!`, `?`) ends a sentence when it is followed by
/// whitespace and the next character opens a new sentence (uppercase,
/// digit, quote or parenthesis) or the text ends. Runs of terminators and
/// trailing quotes or parentheses stay with their sentence. Abbreviations
/// like "U.S." survive because no whitespace follows their inner periods.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < chars.len() {
        if is_terminator(chars[i]) {
            let mut end = i + 1;
            while end < chars.len() && closes_sentence(chars[end]) {
                end += 1;
            }
            let mut next = end;
            while next < chars.len() && chars[next].is_whitespace() {
                next += 1;
            }
            let boundary =
                next == chars.len() || (next > end && starts_sentence(chars[next]));
            if boundary {
                push_trimmed(&chars[start..end], &mut sentences);
                start = next;
                i = next;
                continue;
            }
        }
        i += 1;
    }
    if start < chars.len() {
        push_trimmed(&chars[start..], &mut sentences);
    }
    sentences
}

/// Split a sentence into word and punctuation tokens.
///
/// Alphanumeric runs form word tokens; an apostrophe or hyphen stays
/// inside a token only when flanked by alphanumerics on both sides. Every
/// other non-whitespace character becomes its own single-character token,
/// so "(ER)" tokenizes to `(`, `ER`, `)`.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if c.is_alphanumeric() {
            let start = i;
            i += 1;
            while i < chars.len() {
                if chars[i].is_alphanumeric() {
                    i += 1;
                } else if matches!(chars[i], '\'' | '-')
                    && i + 1 < chars.len()
                    && chars[i + 1].is_alphanumeric()
                {
                    i += 2;
                } else {
                    break;
                }
            }
            tokens.push(chars[start..i].iter().collect());
            continue;
        }
        tokens.push(c.to_string());
        i += 1;
    }
    tokens
}

#[inline]
fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

#[inline]
fn closes_sentence(c: char) -> bool {
    is_terminator(c) || matches!(c, '"' | '\'' | ')' | ']')
}

#[inline]
fn starts_sentence(c: char) -> bool {
    c.is_uppercase() || c.is_ascii_digit() || matches!(c, '"' | '\'' | '(')
}

fn push_trimmed(chars: &[char], sentences: &mut Vec<String>) {
    let sentence: String = chars.iter().collect();
    let trimmed = sentence.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
