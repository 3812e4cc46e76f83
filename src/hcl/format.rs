//! Alignment of attribute assignments, `terraform fmt` style.

/// A parsed attribute line: indentation width and key length
struct AttrLine {
    indent: usize,
    key_len: usize,
    /// Byte offset of the `=` sign
    equals_at: usize,
    opens_multiline: bool,
}

/// Align the `=` of consecutive attribute lines sharing the same indentation.
///
/// A group of lines ends at a blank line, a non-attribute line, a change of
/// indentation, or right after an attribute whose value continues on the
/// following lines.
pub fn align_attributes(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let parsed: Vec<Option<AttrLine>> = lines.iter().map(|l| parse_attr_line(l)).collect();

    let mut widths = vec![0usize; lines.len()];
    let mut start = 0;
    while start < lines.len() {
        let Some(first) = &parsed[start] else {
            start += 1;
            continue;
        };

        let mut end = start;
        let mut width = first.key_len;
        loop {
            let current = parsed[end].as_ref();
            if current.map(|a| a.opens_multiline).unwrap_or(true) {
                break;
            }
            match parsed.get(end + 1).and_then(|p| p.as_ref()) {
                Some(next) if next.indent == first.indent => {
                    end += 1;
                    width = width.max(next.key_len);
                }
                _ => break,
            }
        }

        for w in widths.iter_mut().take(end + 1).skip(start) {
            *w = width;
        }
        start = end + 1;
    }

    let mut out = String::with_capacity(text.len());
    for (i, line) in lines.iter().enumerate() {
        match &parsed[i] {
            Some(attr) => {
                out.push_str(&line[..attr.indent + attr.key_len]);
                out.push_str(&" ".repeat(widths[i] - attr.key_len + 1));
                out.push_str(&line[attr.equals_at..]);
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }
    out
}

fn parse_attr_line(line: &str) -> Option<AttrLine> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    let rest = &line[indent..];

    let key_len = if rest.starts_with('"') {
        quoted_len(rest)?
    } else {
        rest.find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '-'))
            .unwrap_or(rest.len())
    };
    let after_key = &rest[key_len..];
    let assignment = after_key.trim_start_matches(' ');
    if key_len == 0 || after_key.len() == assignment.len() || !assignment.starts_with("= ") {
        return None;
    }

    let value = assignment[2..].trim_end();
    Some(AttrLine {
        indent,
        key_len,
        equals_at: line.len() - assignment.len(),
        opens_multiline: value.ends_with('{') || value.ends_with('['),
    })
}

/// Length of a leading quoted string including both quotes
fn quoted_len(s: &str) -> Option<usize> {
    let mut escaped = false;
    for (i, c) in s.char_indices().skip(1) {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '"' => return Some(i + 1),
            _ => {}
        }
    }
    None
}
