//! Masked-pipe tables and label decoration
//!
//! Nested tables are emitted with every `|` masked so that an inner table
//! placed in a cell of an outer table does not break the outer column
//! structure. Only the outermost render call unmasks the final output.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

const MASKED_PIPE: &str = "__masked(&#124;)";

/// A table row: either a preformatted line or a `(label, content)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    Raw(String),
    Cells(String, String),
}

impl TableRow {
    pub fn cells(label: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Cells(label.into(), content.into())
    }

    fn format(&self) -> String {
        match self {
            Self::Raw(line) => line.clone(),
            Self::Cells(label, content) => format!(
                "||\n\n{}\n{{.table-cell}}|\n{}\n{{.table-cell}}\n||",
                escape_table_text(label),
                escape_table_text(content)
            ),
        }
    }
}

/// Build a masked table from rows, with optional classes on the table
pub fn table(rows: &[TableRow], classes: &[&str]) -> String {
    let class_attr = if classes.is_empty() {
        String::new()
    } else {
        let joined = classes
            .iter()
            .map(|class| format!(".{class}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!("{{{joined}}}")
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push("#|".to_string());
    lines.extend(rows.iter().map(TableRow::format));
    lines.push("|#".to_string());

    mask_table_pipes(&(lines.join("\n") + &class_attr))
}

fn escape_table_text(value: &str) -> String {
    value.replace('|', "&#124;")
}

fn mask_table_pipes(value: &str) -> String {
    value.replace('|', MASKED_PIPE)
}

/// Restore masked pipes; called once by the outermost renderer
pub fn unmask_table_content(value: &str) -> String {
    value.replace(MASKED_PIPE, "|")
}

/// Emphasize a label and attach semantic classes
///
/// `json-schema-reset` always comes first; duplicates collapse. A label with
/// no classes is returned unchanged.
pub fn decorate(label: &str, classes: &[&str]) -> String {
    if classes.is_empty() {
        return label.to_string();
    }

    let mut unique: Vec<&str> = vec!["json-schema-reset"];
    for class in classes {
        if !unique.contains(class) {
            unique.push(class);
        }
    }

    let suffix = unique
        .iter()
        .map(|class| format!(".{class}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!("_{}_{{{suffix}}}", label.trim_matches('_'))
}
