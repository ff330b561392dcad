//! Selector AST: SelectorList, Selector, CompoundSelector, components.

use std::fmt;

/// How an attribute selector compares the attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOperator {
    /// `[name]`
    Exists,
    /// `[name=value]`
    Equals(String),
    /// `[name^=value]`
    StartsWith(String),
    /// `[name$=value]`
    EndsWith(String),
    /// `[name*=value]`
    Contains(String),
    /// `[name~=value]`: whitespace-separated word match.
    Includes(String),
    /// `[name|=value]`: exact or `value-` prefix.
    DashMatch(String),
}

impl AttributeOperator {
    /// Test an attribute value (`None` when the attribute is absent).
    pub fn test(&self, actual: Option<&str>) -> bool {
        let Some(actual) = actual else {
            return false;
        };
        match self {
            Self::Exists => true,
            Self::Equals(v) => actual == v,
            Self::StartsWith(v) => !v.is_empty() && actual.starts_with(v.as_str()),
            Self::EndsWith(v) => !v.is_empty() && actual.ends_with(v.as_str()),
            Self::Contains(v) => !v.is_empty() && actual.contains(v.as_str()),
            Self::Includes(v) => actual.split_whitespace().any(|word| word == v),
            Self::DashMatch(v) => {
                actual == v || actual.strip_prefix(v.as_str()).is_some_and(|rest| rest.starts_with('-'))
            }
        }
    }
}

/// A single selector component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorComponent {
    /// Type selector: matches the tag name (e.g. `input`).
    Type(String),
    /// Universal selector: `*`.
    Universal,
    /// Class selector: `.classname`.
    Class(String),
    /// ID selector: `#id`.
    Id(String),
    /// Attribute selector: `[name$="DELETE"]`.
    Attribute {
        name: String,
        operator: AttributeOperator,
    },
    /// Negation: `:not(<selector-list>)`.
    Not(SelectorList),
}

/// A combinator between selector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant combinator (whitespace): `A B`.
    Descendant,
    /// Child combinator: `A > B`.
    Child,
}

/// A single compound selector (sequence of components without combinators).
///
/// For example, `input[name$="ORDER"]` is one `CompoundSelector` with two
/// components: `Type("input")` and an `Attribute` suffix match.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

impl CompoundSelector {
    /// Create an empty compound selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component to this compound selector.
    pub fn push(&mut self, component: SelectorComponent) {
        self.components.push(component);
    }

    /// Append a component (builder).
    pub fn with(mut self, component: SelectorComponent) -> Self {
        self.push(component);
        self
    }
}

/// One element in a selector chain: either a compound selector or a combinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectorPart {
    Compound(CompoundSelector),
    Combinator(Combinator),
}

/// A full selector: chain of compound selectors joined by combinators.
///
/// `#formset > .form` has parts
/// `[Compound(#formset), Combinator(Child), Compound(.form)]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selector {
    /// Alternating compound selectors and combinators.
    /// Always starts and ends with a `SelectorPart::Compound`.
    pub parts: Vec<SelectorPart>,
}

impl Selector {
    /// Create an empty selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selector made of a single compound.
    pub fn compound(compound: CompoundSelector) -> Self {
        Self {
            parts: vec![SelectorPart::Compound(compound)],
        }
    }
}

/// Comma-separated selectors; matches when any member matches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectorList {
    pub selectors: Vec<Selector>,
}

impl SelectorList {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self { selectors }
    }

    /// `tag1, tag2, ...`
    pub fn of_types(tags: &[&str]) -> Self {
        Self::new(
            tags.iter()
                .map(|tag| {
                    Selector::compound(
                        CompoundSelector::new().with(SelectorComponent::Type((*tag).to_owned())),
                    )
                })
                .collect(),
        )
    }

    /// `tag[name<op>]`
    pub fn tag_with_attribute(tag: &str, name: &str, operator: AttributeOperator) -> Self {
        Self::new(vec![Selector::compound(
            CompoundSelector::new()
                .with(SelectorComponent::Type(tag.to_owned()))
                .with(SelectorComponent::Attribute {
                    name: name.to_owned(),
                    operator,
                }),
        )])
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Display (canonical serialization, used in messages and logs)
// ---------------------------------------------------------------------------

fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "\"{}\"", value)
}

impl fmt::Display for SelectorComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(name) => write!(f, "{name}"),
            Self::Universal => write!(f, "*"),
            Self::Class(name) => write!(f, ".{name}"),
            Self::Id(name) => write!(f, "#{name}"),
            Self::Attribute { name, operator } => {
                write!(f, "[{name}")?;
                let (op, value) = match operator {
                    AttributeOperator::Exists => return write!(f, "]"),
                    AttributeOperator::Equals(v) => ("=", v),
                    AttributeOperator::StartsWith(v) => ("^=", v),
                    AttributeOperator::EndsWith(v) => ("$=", v),
                    AttributeOperator::Contains(v) => ("*=", v),
                    AttributeOperator::Includes(v) => ("~=", v),
                    AttributeOperator::DashMatch(v) => ("|=", v),
                };
                write!(f, "{op}")?;
                write_quoted(f, value)?;
                write!(f, "]")
            }
            Self::Not(list) => write!(f, ":not({list})"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for part in &self.parts {
            match part {
                SelectorPart::Compound(compound) => {
                    for component in &compound.components {
                        write!(f, "{component}")?;
                    }
                }
                SelectorPart::Combinator(Combinator::Descendant) => write!(f, " ")?,
                SelectorPart::Combinator(Combinator::Child) => write!(f, " > ")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for SelectorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, selector) in self.selectors.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{selector}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_selector_builder() {
        let cs = CompoundSelector::new()
            .with(SelectorComponent::Type("input".into()))
            .with(SelectorComponent::Class("field".into()));
        assert_eq!(cs.components.len(), 2);
    }

    #[test]
    fn test_attribute_operator_exists() {
        assert!(AttributeOperator::Exists.test(Some("")));
        assert!(!AttributeOperator::Exists.test(None));
    }

    #[test]
    fn test_attribute_operator_suffix() {
        let op = AttributeOperator::EndsWith("DELETE".into());
        assert!(op.test(Some("formset-0-DELETE")));
        assert!(!op.test(Some("formset-0-DELETED")));
        assert!(!op.test(None));
        // Empty operands never match, as in CSS.
        assert!(!AttributeOperator::EndsWith(String::new()).test(Some("x")));
    }

    #[test]
    fn test_attribute_operator_word_and_dash() {
        assert!(AttributeOperator::Includes("b".into()).test(Some("a b c")));
        assert!(!AttributeOperator::Includes("b".into()).test(Some("abc")));
        assert!(AttributeOperator::DashMatch("en".into()).test(Some("en-US")));
        assert!(AttributeOperator::DashMatch("en".into()).test(Some("en")));
        assert!(!AttributeOperator::DashMatch("en".into()).test(Some("english")));
    }

    #[test]
    fn test_of_types_display() {
        let list = SelectorList::of_types(&["input", "select", "textarea"]);
        assert_eq!(list.to_string(), "input, select, textarea");
    }

    #[test]
    fn test_tag_with_attribute_display() {
        let list = SelectorList::tag_with_attribute(
            "input",
            "name",
            AttributeOperator::EndsWith("ORDER".into()),
        );
        assert_eq!(list.to_string(), r#"input[name$="ORDER"]"#);
    }

    #[test]
    fn test_selector_display_with_combinators() {
        let selector = Selector {
            parts: vec![
                SelectorPart::Compound(
                    CompoundSelector::new().with(SelectorComponent::Id("formset".into())),
                ),
                SelectorPart::Combinator(Combinator::Child),
                SelectorPart::Compound(
                    CompoundSelector::new()
                        .with(SelectorComponent::Class("form".into()))
                        .with(SelectorComponent::Not(SelectorList::new(vec![
                            Selector::compound(CompoundSelector::new().with(
                                SelectorComponent::Attribute {
                                    name: "hidden".into(),
                                    operator: AttributeOperator::Exists,
                                },
                            )),
                        ]))),
                ),
            ],
        };
        assert_eq!(selector.to_string(), "#formset > .form:not([hidden])");
    }

    #[test]
    fn test_empty_list() {
        assert!(SelectorList::default().is_empty());
        assert!(!SelectorList::of_types(&["a"]).is_empty());
    }
}
