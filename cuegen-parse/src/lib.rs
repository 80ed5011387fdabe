//! Parser for the import section of a CUE source file.
//!
//! The generation pipeline only needs a file's package clause skipped and
//! its import declarations extracted; everything after the import section
//! is left to the schema engine. Covers all three declaration forms:
//!
//! ```cue
//! import "github.com/grafana/thema"
//! import schema "github.com/grafana/grafana/packages/grafana-schema/src/schema"
//! import (
//!     "example.com/a"
//!     b "example.com/b"
//! )
//! ```

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace1},
    combinator::{opt, peek, recognize, value},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated},
};
use thiserror::Error;

/// One import declaration: the quoted source path and its optional alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// The import path as written, quotes stripped. May carry a `:package`
    /// marker suffix on its final segment.
    pub path: String,
    /// Explicit binding identifier, when one was written.
    pub alias: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// An `import` keyword whose declaration could not be parsed.
    #[error("malformed import declaration at byte offset {offset}")]
    MalformedImport { offset: usize },
}

/// Extract every import declaration from the head of a CUE file.
///
/// Parsing stops at the first construct that is neither trivia, the package
/// clause, nor an import declaration; a dangling `import` keyword at that
/// point is an error.
pub fn parse_imports(src: &str) -> Result<Vec<ImportDecl>, ParseError> {
    let mut rest = strip(src);
    if let Ok((after, ())) = package_clause(rest) {
        rest = strip(after);
    }

    let mut decls = Vec::new();
    while let Ok((after, mut batch)) = import_decl(rest) {
        decls.append(&mut batch);
        rest = strip(after);
    }

    if import_keyword(rest).is_ok() {
        return Err(ParseError::MalformedImport {
            offset: src.len() - rest.len(),
        });
    }
    Ok(decls)
}

/// Skip whitespace and line comments.
fn strip(input: &str) -> &str {
    match trivia(input) {
        Ok((rest, ())) => rest,
        Err(_) => input,
    }
}

fn trivia(input: &str) -> IResult<&str, ()> {
    value(
        (),
        many0(alt((
            value((), multispace1),
            value((), pair(tag("//"), take_while(|c| c != '\n'))),
        ))),
    )
    .parse(input)
}

fn ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

fn package_clause(input: &str) -> IResult<&str, ()> {
    value((), (tag("package"), multispace1, ident)).parse(input)
}

/// The `import` keyword, followed by whitespace or an opening paren.
fn import_keyword(input: &str) -> IResult<&str, ()> {
    value(
        (),
        pair(
            tag("import"),
            peek(alt((value((), multispace1), value((), char('('))))),
        ),
    )
    .parse(input)
}

fn quoted_path(input: &str) -> IResult<&str, &str> {
    delimited(
        char('"'),
        take_while1(|c| c != '"' && c != '\n'),
        char('"'),
    )
    .parse(input)
}

/// `"path"` or `alias "path"`.
fn import_spec(input: &str) -> IResult<&str, ImportDecl> {
    let (rest, alias) = opt(terminated(ident, multispace1)).parse(input)?;
    let (rest, path) = quoted_path(rest)?;
    Ok((
        rest,
        ImportDecl {
            path: path.to_string(),
            alias: alias.map(str::to_string),
        },
    ))
}

fn import_block(input: &str) -> IResult<&str, Vec<ImportDecl>> {
    delimited(
        char('('),
        many0(preceded(trivia, import_spec)),
        preceded(trivia, char(')')),
    )
    .parse(input)
}

fn import_decl(input: &str) -> IResult<&str, Vec<ImportDecl>> {
    preceded(
        pair(import_keyword, trivia),
        alt((import_block, import_spec.map(|d| vec![d]))),
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl(path: &str, alias: Option<&str>) -> ImportDecl {
        ImportDecl {
            path: path.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    #[test]
    fn single_import() {
        let decls = parse_imports(r#"import "github.com/grafana/thema""#).expect("parse");
        assert_eq!(decls, vec![decl("github.com/grafana/thema", None)]);
    }

    #[test]
    fn aliased_import() {
        let decls = parse_imports(r#"import ui "example.com/ui/types""#).expect("parse");
        assert_eq!(decls, vec![decl("example.com/ui/types", Some("ui"))]);
    }

    #[test]
    fn import_block_with_comments() {
        let src = r#"
// panel schema
package grafanaschema

import (
    "github.com/grafana/thema"
    // UI building blocks
    ui "example.com/ui"
)
"#;
        let decls = parse_imports(src).expect("parse");
        assert_eq!(
            decls,
            vec![
                decl("github.com/grafana/thema", None),
                decl("example.com/ui", Some("ui")),
            ]
        );
    }

    #[test]
    fn consecutive_import_declarations() {
        let src = "import \"a/b\"\nimport x \"c/d\"\n\nPanel: {}\n";
        let decls = parse_imports(src).expect("parse");
        assert_eq!(decls, vec![decl("a/b", None), decl("c/d", Some("x"))]);
    }

    #[test]
    fn colon_marker_stays_in_path() {
        let decls = parse_imports(r#"import "example.com/pkg:variant""#).expect("parse");
        assert_eq!(decls, vec![decl("example.com/pkg:variant", None)]);
    }

    #[test]
    fn no_imports_yields_empty() {
        assert_eq!(parse_imports("package foo\n\nPanel: {}\n").expect("parse"), vec![]);
        assert_eq!(parse_imports("").expect("parse"), vec![]);
    }

    #[test]
    fn body_mentioning_import_is_not_parsed() {
        // Parsing stops at the first non-import construct; the word in the
        // string literal below is never reached.
        let src = "import \"a/b\"\n\ndescription: \"import things\"\n";
        let decls = parse_imports(src).expect("parse");
        assert_eq!(decls, vec![decl("a/b", None)]);
    }

    #[test]
    fn malformed_import_is_an_error() {
        let err = parse_imports("import foo bar\n").unwrap_err();
        assert_eq!(err, ParseError::MalformedImport { offset: 0 });
    }

    #[test]
    fn malformed_entry_inside_block_is_an_error() {
        let src = "package p\n\nimport (\n  \"a/b\"\n  oops\n)\n";
        assert!(matches!(
            parse_imports(src),
            Err(ParseError::MalformedImport { .. })
        ));
    }
}
