//! Syntax language catalog
//!
//! A small, fixed set of languages offered by the language selector. Each entry
//! maps to a syntax token understood by syntect's bundled grammars.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    #[value(name = "json")]
    Json,
    #[value(name = "text")]
    PlainText,
    #[value(name = "javascript")]
    JavaScript,
    #[value(name = "yaml")]
    Yaml,
    #[value(name = "xml")]
    Xml,
    #[value(name = "html")]
    Html,
    #[value(name = "css")]
    Css,
    #[value(name = "markdown")]
    Markdown,
    #[value(name = "python")]
    Python,
    #[value(name = "rust")]
    Rust,
    #[value(name = "sql")]
    Sql,
}

impl Language {
    /// Every language in the order the selector lists them
    pub const ALL: [Language; 11] = [
        Language::Json,
        Language::PlainText,
        Language::JavaScript,
        Language::Yaml,
        Language::Xml,
        Language::Html,
        Language::Css,
        Language::Markdown,
        Language::Python,
        Language::Rust,
        Language::Sql,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Language::Json => "JSON",
            Language::PlainText => "Plain Text",
            Language::JavaScript => "JavaScript",
            Language::Yaml => "YAML",
            Language::Xml => "XML",
            Language::Html => "HTML",
            Language::Css => "CSS",
            Language::Markdown => "Markdown",
            Language::Python => "Python",
            Language::Rust => "Rust",
            Language::Sql => "SQL",
        }
    }

    /// File extension used to look the grammar up in a syntect `SyntaxSet`
    pub fn syntax_token(self) -> &'static str {
        match self {
            Language::Json => "json",
            Language::PlainText => "txt",
            Language::JavaScript => "js",
            Language::Yaml => "yaml",
            Language::Xml => "xml",
            Language::Html => "html",
            Language::Css => "css",
            Language::Markdown => "md",
            Language::Python => "py",
            Language::Rust => "rs",
            Language::Sql => "sql",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_with_json() {
        assert_eq!(Language::ALL[0], Language::Json);
        assert_eq!(Language::default(), Language::Json);
    }

    #[test]
    fn catalog_entries_are_unique() {
        for (i, a) in Language::ALL.iter().enumerate() {
            for b in &Language::ALL[i + 1..] {
                assert_ne!(a, b);
                assert_ne!(a.syntax_token(), b.syntax_token());
            }
        }
    }

    #[test]
    fn serde_names_are_snake_case() {
        let json = serde_json::to_string(&Language::PlainText).unwrap();
        assert_eq!(json, "\"plain_text\"");
        let back: Language = serde_json::from_str("\"java_script\"").unwrap();
        assert_eq!(back, Language::JavaScript);
    }
}
