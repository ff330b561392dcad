//! Recursive descent selector parser.
//!
//! Parses selector text into a [`SelectorList`]. Uses the logos-based
//! tokenizer from [`crate::selector::tokenizer`], keeping byte spans so that
//! whitespace (the descendant combinator) can be told apart from adjacency
//! inside a compound selector.

use logos::Logos;

use crate::selector::model::*;
use crate::selector::tokenizer::Token;

/// Errors from selector parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("invalid character at byte {0}")]
    InvalidCharacter(usize),
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
    #[error("unsupported pseudo-class `:{0}`")]
    UnsupportedPseudoClass(String),
}

/// A positioned token with byte-level span information for whitespace detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    /// Byte offset where this token starts in the source.
    byte_start: usize,
    /// Byte offset where this token ends in the source.
    byte_end: usize,
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Result<Vec<PToken>, SelectorError> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    for (idx, (result, span)) in lexer.spanned().enumerate() {
        let token = result.map_err(|_| SelectorError::InvalidCharacter(span.start))?;
        tokens.push(PToken {
            text: input[span.clone()].to_string(),
            token,
            pos: idx,
            byte_start: span.start,
            byte_end: span.end,
        });
    }

    Ok(tokens)
}

/// Parse a selector list such as `input, select, textarea` or
/// `#formset #empty-form .form`.
pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorError> {
    let tokens = tokenize_with_spans(input)?;
    if tokens.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut parser = Parser { tokens, cursor: 0 };
    let list = parser.parse_list()?;
    if let Some(tok) = parser.peek() {
        return Err(SelectorError::UnexpectedToken {
            position: tok.pos,
            message: format!("unexpected {:?} '{}'", tok.token, tok.text),
        });
    }
    Ok(list)
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<PToken> {
        let tok = self.tokens.get(self.cursor).cloned();
        if tok.is_some() {
            self.cursor += 1;
        }
        tok
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, SelectorError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok),
            Some(tok) => Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected {:?}, got {:?} '{}'", expected, tok.token, tok.text),
            }),
            None => Err(SelectorError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Parse a comma-separated list of selectors.
    fn parse_list(&mut self) -> Result<SelectorList, SelectorError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek().is_some_and(|t| t.token == Token::Comma) {
            self.advance(); // consume comma
            selectors.push(self.parse_selector()?);
        }

        Ok(SelectorList { selectors })
    }

    /// Parse a single selector: a sequence of compound selectors with combinators.
    fn parse_selector(&mut self) -> Result<Selector, SelectorError> {
        let mut parts = vec![SelectorPart::Compound(self.parse_compound_selector()?)];

        loop {
            match self.peek() {
                Some(t) if t.token == Token::GreaterThan => {
                    self.advance();
                    parts.push(SelectorPart::Combinator(Combinator::Child));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                // A selector-starting token that was not consumed by the
                // compound parser is separated by whitespace.
                Some(t) if starts_compound(&t.token) => {
                    parts.push(SelectorPart::Combinator(Combinator::Descendant));
                    parts.push(SelectorPart::Compound(self.parse_compound_selector()?));
                }
                _ => break,
            }
        }

        Ok(Selector { parts })
    }

    /// Parse a compound selector: simple selector components with no
    /// whitespace between them, e.g. `input.field[name$="ORDER"]`.
    fn parse_compound_selector(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut components = Vec::new();

        match self.peek().map(|t| t.token.clone()) {
            Some(Token::Ident) => {
                let tok = self.advance().ok_or_else(eof("expected type selector"))?;
                components.push(SelectorComponent::Type(tok.text.to_ascii_lowercase()));
            }
            Some(Token::Star) => {
                self.advance();
                components.push(SelectorComponent::Universal);
            }
            Some(_) => components.push(self.parse_subclass_component()?),
            None => {
                return Err(SelectorError::UnexpectedEof("expected selector part".into()));
            }
        }

        // Continue appending to this compound only if the next token is adjacent.
        while self.is_adjacent()
            && self.peek().is_some_and(|t| {
                matches!(
                    t.token,
                    Token::Dot | Token::Hash | Token::PseudoClass | Token::BracketOpen
                )
            })
        {
            components.push(self.parse_subclass_component()?);
        }

        Ok(CompoundSelector { components })
    }

    /// Parse `.class`, `#id`, `[attr...]` or `:pseudo(...)`.
    fn parse_subclass_component(&mut self) -> Result<SelectorComponent, SelectorError> {
        let tok = self.advance().ok_or_else(eof("expected selector part"))?;
        match tok.token {
            Token::Dot => Ok(SelectorComponent::Class(self.expect_name("class name")?)),
            Token::Hash => Ok(SelectorComponent::Id(self.expect_name("id")?)),
            Token::BracketOpen => self.parse_attribute(),
            Token::PseudoClass => {
                let name = tok.text[1..].to_ascii_lowercase();
                if name != "not" {
                    return Err(SelectorError::UnsupportedPseudoClass(name));
                }
                self.expect(&Token::ParenOpen)?;
                let inner = self.parse_list()?;
                self.expect(&Token::ParenClose)?;
                Ok(SelectorComponent::Not(inner))
            }
            _ => Err(SelectorError::UnexpectedToken {
                position: tok.pos,
                message: format!("expected selector part, got {:?} '{}'", tok.token, tok.text),
            }),
        }
    }

    /// Parse the remainder of an attribute selector after `[`.
    fn parse_attribute(&mut self) -> Result<SelectorComponent, SelectorError> {
        let name = self.expect_name("attribute name")?.to_ascii_lowercase();

        let op_tok = self.advance().ok_or_else(eof("expected `]` or attribute operator"))?;
        let make: fn(String) -> AttributeOperator = match op_tok.token {
            Token::BracketClose => {
                return Ok(SelectorComponent::Attribute {
                    name,
                    operator: AttributeOperator::Exists,
                });
            }
            Token::Equals => AttributeOperator::Equals,
            Token::PrefixMatch => AttributeOperator::StartsWith,
            Token::SuffixMatch => AttributeOperator::EndsWith,
            Token::SubstringMatch => AttributeOperator::Contains,
            Token::IncludesMatch => AttributeOperator::Includes,
            Token::DashMatch => AttributeOperator::DashMatch,
            other => {
                return Err(SelectorError::UnexpectedToken {
                    position: op_tok.pos,
                    message: format!("expected attribute operator, got {:?} '{}'", other, op_tok.text),
                });
            }
        };

        let value_tok = self.advance().ok_or_else(eof("expected attribute value"))?;
        let value = match value_tok.token {
            Token::StringLiteral | Token::StringLiteralSingle => {
                value_tok.text[1..value_tok.text.len() - 1].to_string()
            }
            Token::Ident | Token::Number => value_tok.text.clone(),
            other => {
                return Err(SelectorError::UnexpectedToken {
                    position: value_tok.pos,
                    message: format!("expected attribute value, got {:?} '{}'", other, value_tok.text),
                });
            }
        };

        self.expect(&Token::BracketClose)?;
        Ok(SelectorComponent::Attribute {
            name,
            operator: make(value),
        })
    }

    fn expect_name(&mut self, what: &str) -> Result<String, SelectorError> {
        let position = self.current_pos();
        match self.advance() {
            Some(tok) if tok.token == Token::Ident => Ok(tok.text),
            Some(tok) => Err(SelectorError::UnexpectedToken {
                position,
                message: format!("expected {what}, got {:?} '{}'", tok.token, tok.text),
            }),
            None => Err(SelectorError::UnexpectedEof(format!("expected {what}"))),
        }
    }
}

fn starts_compound(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident
            | Token::Hash
            | Token::Dot
            | Token::Star
            | Token::PseudoClass
            | Token::BracketOpen
    )
}

fn eof(message: &'static str) -> impl FnOnce() -> SelectorError {
    move || SelectorError::UnexpectedEof(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_compound(input: &str) -> Vec<SelectorComponent> {
        let list = parse_selector_list(input).unwrap();
        assert_eq!(list.selectors.len(), 1);
        match &list.selectors[0].parts[..] {
            [SelectorPart::Compound(c)] => c.components.clone(),
            other => panic!("expected a single compound, got {other:?}"),
        }
    }

    #[test]
    fn parse_type_selector() {
        assert_eq!(single_compound("INPUT"), vec![SelectorComponent::Type("input".into())]);
    }

    #[test]
    fn parse_non_ascii_class() {
        assert_eq!(
            single_compound(".formulário"),
            vec![SelectorComponent::Class("formulário".into())]
        );
    }

    #[test]
    fn parse_class_and_id() {
        assert_eq!(
            single_compound("div#formset.wide"),
            vec![
                SelectorComponent::Type("div".into()),
                SelectorComponent::Id("formset".into()),
                SelectorComponent::Class("wide".into()),
            ]
        );
    }

    #[test]
    fn parse_attribute_suffix() {
        assert_eq!(
            single_compound(r#"input[name$="DELETE"]"#),
            vec![
                SelectorComponent::Type("input".into()),
                SelectorComponent::Attribute {
                    name: "name".into(),
                    operator: AttributeOperator::EndsWith("DELETE".into()),
                },
            ]
        );
    }

    #[test]
    fn parse_attribute_exists_and_bare_value() {
        assert_eq!(
            single_compound("[hidden][type=text][data-n=3]"),
            vec![
                SelectorComponent::Attribute {
                    name: "hidden".into(),
                    operator: AttributeOperator::Exists,
                },
                SelectorComponent::Attribute {
                    name: "type".into(),
                    operator: AttributeOperator::Equals("text".into()),
                },
                SelectorComponent::Attribute {
                    name: "data-n".into(),
                    operator: AttributeOperator::Equals("3".into()),
                },
            ]
        );
    }

    #[test]
    fn parse_not_pseudo_class() {
        let components = single_compound(".form:not([hidden])");
        assert_eq!(components.len(), 2);
        assert_eq!(components[0], SelectorComponent::Class("form".into()));
        match &components[1] {
            SelectorComponent::Not(inner) => assert_eq!(inner.to_string(), "[hidden]"),
            other => panic!("expected :not, got {other:?}"),
        }
    }

    #[test]
    fn parse_descendant_chain() {
        let list = parse_selector_list("#formset #empty-form .form").unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 5);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Descendant)));
        assert!(matches!(parts[3], SelectorPart::Combinator(Combinator::Descendant)));
        assert_eq!(list.to_string(), "#formset #empty-form .form");
    }

    #[test]
    fn parse_child_combinator() {
        let list = parse_selector_list("#forms-container>.form").unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Child)));
    }

    #[test]
    fn parse_descendant_attribute_after_whitespace() {
        let list = parse_selector_list("form [hidden]").unwrap();
        let parts = &list.selectors[0].parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[1], SelectorPart::Combinator(Combinator::Descendant)));
    }

    #[test]
    fn parse_selector_list_of_types() {
        let list = parse_selector_list("input, select, textarea").unwrap();
        assert_eq!(list, SelectorList::of_types(&["input", "select", "textarea"]));
    }

    #[test]
    fn parse_error_empty() {
        assert_eq!(parse_selector_list("   "), Err(SelectorError::Empty));
    }

    #[test]
    fn parse_error_invalid_character() {
        assert!(matches!(
            parse_selector_list("#form@x"),
            Err(SelectorError::InvalidCharacter(5))
        ));
    }

    #[test]
    fn parse_error_dangling_combinator() {
        assert!(matches!(
            parse_selector_list(".form >"),
            Err(SelectorError::UnexpectedEof(_))
        ));
    }

    #[test]
    fn parse_error_unclosed_attribute() {
        assert!(parse_selector_list("input[name").is_err());
        assert!(parse_selector_list("input[name=").is_err());
    }

    #[test]
    fn parse_error_unsupported_pseudo_class() {
        assert_eq!(
            parse_selector_list("a:hover"),
            Err(SelectorError::UnsupportedPseudoClass("hover".into()))
        );
    }

    #[test]
    fn parse_error_trailing_comma() {
        assert!(parse_selector_list(".a,").is_err());
    }

    #[test]
    fn parse_error_stray_close_paren() {
        assert!(matches!(
            parse_selector_list(".a)"),
            Err(SelectorError::UnexpectedToken { .. })
        ));
    }
}
