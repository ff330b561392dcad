//! logos-based selector tokenizer.
//!
//! Token priority in logos is determined by:
//! 1. Longest match wins (e.g. `$=` as [`Token::SuffixMatch`])
//! 2. For equal length matches, earlier-defined variants win
//!
//! Our ordering ensures:
//! - `*=` matches [`Token::SubstringMatch`], not `Star` + `Equals`
//! - `:not` matches [`Token::PseudoClass`], not a bare colon
//! - `#empty-form` lexes as `Hash` + `Ident`

use logos::Logos;

/// Selector token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    // ── Compound tokens (longer matches, defined first) ──────────────

    /// `^=` attribute operator.
    #[token("^=")]
    PrefixMatch,

    /// `$=` attribute operator.
    #[token("$=")]
    SuffixMatch,

    /// `*=` attribute operator.
    #[token("*=")]
    SubstringMatch,

    /// `~=` attribute operator.
    #[token("~=")]
    IncludesMatch,

    /// `|=` attribute operator.
    #[token("|=")]
    DashMatch,

    /// Pseudo-class: `:not`, `:hover`, etc.
    #[regex(r":[a-zA-Z][a-zA-Z0-9_-]*")]
    PseudoClass,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Bare integer, only meaningful as an unquoted attribute value.
    #[regex(r"[0-9]+")]
    Number,

    /// Identifier: tag names, class names, ids, attribute names. Any
    /// non-ASCII character counts as a name character.
    #[regex(r"-?[a-zA-Z_\u{80}-\u{10FFFF}][a-zA-Z0-9_\u{80}-\u{10FFFF}-]*")]
    Ident,

    // ── Single-character punctuation ─────────────────────────────────

    /// `=`
    #[token("=")]
    Equals,

    /// `[`
    #[token("[")]
    BracketOpen,

    /// `]`
    #[token("]")]
    BracketClose,

    /// `(`
    #[token("(")]
    ParenOpen,

    /// `)`
    #[token(")")]
    ParenClose,

    /// `,`
    #[token(",")]
    Comma,

    /// `.`
    #[token(".")]
    Dot,

    /// `#`
    #[token("#")]
    Hash,

    /// `*`
    #[token("*")]
    Star,

    /// `>`
    #[token(">")]
    GreaterThan,
}

/// Tokenize a selector string into a vector of `(Token, String)` pairs.
///
/// Characters that fail to lex are skipped; the parser uses its own
/// span-preserving pass and reports them instead.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| {
            result.ok().map(|token| (token, input[span].to_string()))
        })
        .collect()
}
