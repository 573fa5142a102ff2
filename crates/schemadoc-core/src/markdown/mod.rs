//! Markdown building blocks shared by every renderer
//!
//! The output targets a markdown dialect with disclosure blocks
//! (`{% cut %}`), attribute suffixes (`{.class}`) and `#| ... |#` tables.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

pub mod table;

pub use table::{decorate, table, unmask_table_content, TableRow};

/// Line separator inside a fragment
pub const EOL: &str = "\n";

/// Separator between independent fragments
pub const BLOCK: &str = "\n\n";

/// Code blocks longer than this fall back to plain `text` highlighting
pub const SYNTAX_HIGHLIGHT_LIMIT: usize = 5000;

/// Annotation used by compact deprecation markers
pub const DEPRECATED_ANNOTATION: &str = "Deprecated";

/// Join non-blank fragments with a blank line
pub fn block<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|part| !part.as_ref().trim().is_empty())
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(BLOCK)
}

/// Wrap `text` into a disclosure block titled `heading`
pub fn cut(text: &str, heading: &str, attrs: &[&str]) -> String {
    let attrs = attrs.join(" ");
    let opening = if attrs.is_empty() {
        format!("{{% cut \"{heading}\" %}}")
    } else {
        format!("{{% cut \"{heading}\" %}}{{{attrs}}}")
    };

    block([opening.as_str(), text, "{% endcut %}"])
}

/// Fenced code block, excluded from translation
pub fn code(text: &str, lang: &str) -> String {
    let lang = if !lang.is_empty() && text.len() <= SYNTAX_HIGHLIGHT_LIMIT {
        lang
    } else {
        "text"
    };

    [format!("```{lang} translate=no"), text.to_string(), "```".to_string()].join(EOL)
}

/// Heading of the given depth with an optional `{anchor}` suffix
pub fn title(depth: usize, content: &str, anchor: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let anchor = anchor.trim();
    let markup = "#".repeat(depth);
    if anchor.is_empty() {
        format!("{markup} {content}")
    } else {
        format!("{markup} {content} {{{anchor}}}")
    }
}

pub fn bold(text: &str) -> String {
    format!("**{text}**")
}

/// Standalone entity section wrapper
pub fn entity(content: &str) -> String {
    block(["<div class=\"openapi-entity\">", content, "</div>"])
}

/// Deprecation marker placed next to a label
pub fn deprecated(compact: bool) -> String {
    if compact {
        format!("_[ ](*{DEPRECATED_ANNOTATION})_{{.openapi-deprecated .openapi-deprecated-compact}}")
    } else {
        format!("[{DEPRECATED_ANNOTATION}](*{DEPRECATED_ANNOTATION}){{.openapi-deprecated}}")
    }
}

/// URL-safe anchor fragment for a label
///
/// Non-ASCII characters are transliterated, whitespace collapses into `-`,
/// and characters outside `[A-Za-z0-9-_.~]` are dropped. Letters keep their case.
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_dash = false;

    for ch in label.trim().chars() {
        if ch.is_ascii() {
            push_slug_char(&mut slug, &mut pending_dash, ch);
            continue;
        }

        match deunicode::deunicode_char(ch) {
            Some(ascii) => {
                for ch in ascii.chars() {
                    push_slug_char(&mut slug, &mut pending_dash, ch);
                }
            }
            None => pending_dash = true,
        }
    }

    slug
}

fn push_slug_char(slug: &mut String, pending_dash: &mut bool, ch: char) {
    if ch.is_whitespace() {
        *pending_dash = true;
        return;
    }

    if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '~') {
        if *pending_dash && !slug.is_empty() {
            slug.push('-');
        }
        *pending_dash = false;
        slug.push(ch);
    }
}
