//! Language detection and comment syntax lookup.
//!
//! Detection is delegated to `tokei`, which maps file extensions to languages
//! and carries the comment syntax tables the metrics pass and the detectors
//! need. Files tokei does not recognize degrade to a neutral plaintext mode
//! in which comment detection is disabled.

use std::path::Path;

use tokei::{Config, LanguageType};

/// Syntax family used by the language-dependent detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    /// Python `import` / `from .. import` syntax.
    Python,
    /// JavaScript, JSX, TypeScript and TSX module syntax.
    EcmaScript,
    /// Rust `use` declarations.
    Rust,
    /// Go `import` declarations.
    Go,
    /// Java `import` declarations.
    Java,
}

/// Language detected for a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    /// A language tokei recognizes.
    Known(LanguageType),
    /// Unknown extension, analyzed in degraded plaintext mode.
    Plain,
}

impl Language {
    /// Detect the language of a file from its name.
    pub fn detect(filename: &str) -> Self {
        Self::detect_path(Path::new(filename))
    }

    /// Detect the language of a file from its path.
    pub fn detect_path(path: &Path) -> Self {
        LanguageType::from_path(path, &Config::default())
            .map(Self::Known)
            .unwrap_or(Self::Plain)
    }

    /// Display name of the language, `plaintext` for the degraded mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Known(language) => language.name(),
            Self::Plain => "plaintext",
        }
    }

    /// Syntax family for import and definition parsing, when supported.
    pub fn family(&self) -> Option<Family> {
        let Self::Known(language) = self else {
            return None;
        };
        match language {
            LanguageType::Python => Some(Family::Python),
            LanguageType::JavaScript
            | LanguageType::Jsx
            | LanguageType::TypeScript
            | LanguageType::Tsx => Some(Family::EcmaScript),
            LanguageType::Rust => Some(Family::Rust),
            LanguageType::Go => Some(Family::Go),
            LanguageType::Java => Some(Family::Java),
            _ => None,
        }
    }

    /// Whether a line reads as a comment for this language.
    ///
    /// Plaintext mode recognizes no comments at all.
    pub fn is_comment_line(&self, line: &str) -> bool {
        let Self::Known(language) = self else {
            return false;
        };
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return false;
        }
        language
            .line_comments()
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
            || language
                .multi_line_comments()
                .iter()
                .any(|(open, _)| trimmed.starts_with(open))
            || language
                .doc_quotes()
                .iter()
                .any(|(open, _)| trimmed.starts_with(open))
    }

    /// Whether a line opens a documentation string (e.g. a Python docstring).
    pub fn starts_doc_quote(&self, line: &str) -> bool {
        let Self::Known(language) = self else {
            return false;
        };
        let trimmed = line.trim_start();
        language
            .doc_quotes()
            .iter()
            .any(|(open, _)| trimmed.starts_with(open))
    }
}
