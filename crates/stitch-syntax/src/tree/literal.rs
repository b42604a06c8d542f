//! String literal escaping and static value extraction.

use super::{Node, NodeKind};

/// Escapes `value` for use between `quote` characters in a string or
/// template literal.
#[must_use]
pub fn escape_js_string(value: &str, quote: char) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' if quote != '`' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' if quote != '`' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            '$' if quote == '`' && chars.peek() == Some(&'{') => out.push_str("\\$"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}

/// Resolves the escape sequences in the body of a string literal.
///
/// Unknown escapes resolve to the escaped character; line continuations
/// disappear.
#[must_use]
pub fn unescape_js_string(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\n' | '\u{2028}' | '\u{2029}' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => push_hex_escape(&mut out, &mut chars, 2),
            'u' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    let digits: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    push_code_point(&mut out, &digits);
                } else {
                    push_hex_escape(&mut out, &mut chars, 4);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn push_hex_escape(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
) {
    let digits: String = chars.by_ref().take(width).collect();
    push_code_point(out, &digits);
}

fn push_code_point(out: &mut String, digits: &str) {
    match u32::from_str_radix(digits, 16).ok().and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => out.push(char::REPLACEMENT_CHARACTER),
    }
}

/// Returns the quote character of a string or template literal node.
#[must_use]
pub fn literal_quote(node: &Node) -> Option<char> {
    match node.kind() {
        NodeKind::StringLiteral | NodeKind::TemplateString => node.text()?.chars().next(),
        _ => None,
    }
}

/// Returns the value of a literal that needs no evaluation.
///
/// String literals always qualify. Template literals qualify only when they
/// contain no substitutions. Every other node yields `None`.
#[must_use]
pub fn static_string_value(node: &Node) -> Option<String> {
    let text = node.text()?;
    match node.kind() {
        NodeKind::StringLiteral => Some(unescape_js_string(strip_quotes(text)?)),
        NodeKind::TemplateString => {
            let body = strip_quotes(text)?;
            if has_substitution(body) {
                None
            } else {
                Some(unescape_js_string(body))
            }
        }
        _ => None,
    }
}

/// Returns the text a markup text node renders, before entity decoding.
///
/// Lines are trimmed where they meet a line break, whitespace-only lines
/// disappear and the remaining lines are joined with single spaces. Text
/// without line breaks is returned unchanged.
#[must_use]
pub fn jsx_visible_text(raw: &str) -> String {
    let lines: Vec<&str> = raw.split('\n').collect();
    let last = lines.len().saturating_sub(1);
    let mut parts = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let mut part = line.trim_end_matches('\r');
        if index > 0 {
            part = part.trim_start();
        }
        if index < last {
            part = part.trim_end();
        }
        if !part.is_empty() {
            parts.push(part);
        }
    }
    parts.join(" ")
}

fn strip_quotes(text: &str) -> Option<&str> {
    let mut chars = text.chars();
    let open = chars.next()?;
    let close = chars.next_back()?;
    if open != close {
        return None;
    }
    Some(chars.as_str())
}

fn has_substitution(body: &str) -> bool {
    let mut chars = body.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                chars.next();
            }
            '$' if chars.peek() == Some(&'{') => return true,
            _ => {}
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("a\\nb", "a\nb")]
    #[case("it\\'s", "it's")]
    #[case("\\u0041\\x42\\u{1F600}", "AB😀")]
    #[case("line\\\ncontinued", "linecontinued")]
    fn unescape_resolves_sequences(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(unescape_js_string(body), expected);
    }

    #[rstest]
    #[case("say \"hi\"", '"', "say \\\"hi\\\"")]
    #[case("it's", '\'', "it\\'s")]
    #[case("cost ${n}", '`', "cost \\${n}")]
    #[case("a\\b", '"', "a\\\\b")]
    fn escape_protects_quotes(#[case] value: &str, #[case] quote: char, #[case] expected: &str) {
        assert_eq!(escape_js_string(value, quote), expected);
    }

    #[rstest]
    #[case("Hello world", "Hello world")]
    #[case("\n    Hello\n    world\n  ", "Hello world")]
    #[case("  \n  ", "")]
    #[case(" ", " ")]
    #[case("Save \n", "Save")]
    fn visible_text_follows_markup_whitespace_rules(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(jsx_visible_text(raw), expected);
    }

    #[rstest]
    #[case(NodeKind::StringLiteral, "'Hello'", Some("Hello"))]
    #[case(NodeKind::TemplateString, "`Hello`", Some("Hello"))]
    #[case(NodeKind::TemplateString, "`Hi ${name}`", None)]
    #[case(NodeKind::TemplateString, "`Hi \\${name}`", Some("Hi ${name}"))]
    #[case(NodeKind::Identifier, "Hello", None)]
    fn static_values(#[case] kind: NodeKind, #[case] text: &str, #[case] expected: Option<&str>) {
        let node = Node::leaf(kind, text);
        assert_eq!(static_string_value(&node).as_deref(), expected);
    }
}
