//! Multi-line text normalization.
//!
//! Attribute values written as indented blocks in source code (the common
//! shape of a docstring) are cleaned of their shared indentation and turned
//! into the inline markup ArcGIS renders in item descriptions: one `<span>`
//! per line, separated by `<br></br>`.

/// Paragraph-break marker placed between lines.
pub const LINE_BREAK: &str = "<br></br>";

/// Tab stop width used when expanding tabs.
pub const TAB_WIDTH: usize = 8;

/// Expand tab characters to spaces using column-aware tab stops.
///
/// The column resets at every line ending.
pub fn expand_tabs(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut column = 0usize;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let spaces = width - column % width;
                out.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Remove indentation shared by a block of text.
///
/// Tabs are expanded first. Leading whitespace of the first line is always
/// stripped; the smallest indentation of the remaining non-blank lines is
/// removed from each of them. Empty lines at the start and end are dropped.
pub fn clean_indentation(text: &str) -> String {
    let expanded = expand_tabs(text, TAB_WIDTH);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let content = line.trim_start();
            if content.is_empty() {
                None
            } else {
                Some(line.chars().count() - content.chars().count())
            }
        })
        .min();

    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            cleaned.push(line.trim_start().to_string());
        } else if let Some(margin) = margin {
            cleaned.push(line.chars().skip(margin).collect());
        } else {
            cleaned.push((*line).to_string());
        }
    }

    while cleaned.last().is_some_and(String::is_empty) {
        cleaned.pop();
    }
    let leading = cleaned.iter().take_while(|l| l.is_empty()).count();
    cleaned.drain(..leading);

    cleaned.join("\n")
}

/// True when cleaning the indentation would change the text.
pub fn is_multiline_block(text: &str) -> bool {
    clean_indentation(text) != text
}

/// Split on `\n`, `\r\n` and `\r`; a trailing terminator does not produce an
/// extra empty line.
fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Wrap each line in a `<span>` and join them with [`LINE_BREAK`].
pub fn spans<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| format!("<span>{}</span>", line.as_ref()))
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

/// Convert text to display markup unconditionally.
///
/// # Examples
///
/// ```
/// use toolbox_meta::text::to_markup;
///
/// assert_eq!(
///     to_markup("first\n    second"),
///     "<span>first</span><br></br><span>second</span>"
/// );
/// ```
pub fn to_markup(text: &str) -> String {
    let cleaned = clean_indentation(text);
    spans(split_lines(&cleaned))
}

/// Convert indented multi-line blocks to display markup; leave flat text as is.
///
/// The output of a conversion is a single flat line, so applying this twice
/// gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use toolbox_meta::text::normalize;
///
/// assert_eq!(normalize("plain text"), "plain text");
/// assert_eq!(
///     normalize("  line1\n  line2"),
///     "<span>line1</span><br></br><span>line2</span>"
/// );
/// ```
pub fn normalize(text: &str) -> String {
    if is_multiline_block(text) {
        to_markup(text)
    } else {
        text.to_string()
    }
}
