//! Plain text from (X)HTML chapter content.
//!
//! Only the body is kept. Tags are dropped, block-level tags become line
//! breaks, `script`/`style` content is skipped and character entities are
//! decoded.

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "h1", "h2", "h3", "h4", "h5", "h6", "li", "tr", "blockquote", "section",
    "article", "pre", "hr",
];

const SKIPPED_TAGS: &[&str] = &["script", "style", "head", "title"];

/// Extract plain text from HTML content by removing tags.
pub fn extract_plain_text(html: &str) -> String {
    let body = body_of(html);
    let mut result = String::with_capacity(body.len());
    let mut rest = body;
    let mut skipping: Option<String> = None;

    while let Some(c) = rest.chars().next() {
        match c {
            '<' => {
                let end = rest.find('>').unwrap_or(rest.len());
                let tag = &rest[1..end];
                rest = rest.get(end + 1..).unwrap_or("");

                let (closing, name) = tag_name(tag);
                if let Some(skipped) = &skipping {
                    if closing && name == *skipped {
                        skipping = None;
                    }
                    continue;
                }

                if !closing && !tag.ends_with('/') && SKIPPED_TAGS.contains(&name.as_str()) {
                    skipping = Some(name);
                } else if BLOCK_TAGS.contains(&name.as_str()) {
                    result.push('\n');
                }
            }
            '&' if skipping.is_none() => {
                let (decoded, consumed) = decode_entity(rest);
                result.push_str(&decoded);
                rest = &rest[consumed..];
            }
            _ => {
                if skipping.is_none() {
                    result.push(c);
                }
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    result
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn body_of(html: &str) -> &str {
    let lower = html.to_ascii_lowercase();
    let start = lower
        .find("<body")
        .and_then(|open| lower[open..].find('>').map(|close| open + close + 1))
        .unwrap_or(0);
    let end = lower.rfind("</body").filter(|&end| end >= start).unwrap_or(html.len());
    &html[start..end]
}

/// Returns (is_closing_tag, lowercase local name).
fn tag_name(tag: &str) -> (bool, String) {
    let (closing, tag) = match tag.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, tag),
    };
    let name: String = tag
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == ':' || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase();
    let local = name.rsplit(':').next().unwrap_or("").to_string();
    (closing, local)
}

/// Decodes the entity at the start of `input` (which begins with `&`).
/// Returns the replacement text and the number of bytes consumed.
fn decode_entity(input: &str) -> (String, usize) {
    let Some(semicolon) = input[1..].find(';').map(|i| i + 1) else {
        return ("&".to_string(), 1);
    };
    if semicolon > 10 {
        return ("&".to_string(), 1);
    }

    let name = &input[1..semicolon];
    match named_entity(name).or_else(|| numeric_entity(name)) {
        Some(c) => (c.to_string(), semicolon + 1),
        None => ("&".to_string(), 1),
    }
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "bdquo" => '\u{201e}',
        "laquo" => '\u{ab}',
        "raquo" => '\u{bb}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "auml" => 'ä',
        "ouml" => 'ö',
        "uuml" => 'ü',
        "Auml" => 'Ä',
        "Ouml" => 'Ö',
        "Uuml" => 'Ü',
        "szlig" => 'ß',
        "eacute" => 'é',
        "egrave" => 'è',
        "aacute" => 'á',
        "agrave" => 'à',
        "ccedil" => 'ç',
        _ => return None,
    };
    Some(c)
}

fn numeric_entity(name: &str) -> Option<char> {
    let digits = name.strip_prefix('#')?;
    let hex = digits
        .strip_prefix('x')
        .or_else(|| digits.strip_prefix('X'));
    let value = match hex {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(value)
}
