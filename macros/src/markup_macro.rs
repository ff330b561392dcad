//! markup! macro: parse HTML-like syntax and generate `ElementSpec` builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::{Error, Ident, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A tag or attribute name: identifiers (keywords allowed) joined by `-`.
#[derive(Clone)]
pub(crate) struct Name {
    pub text: String,
    pub span: Span,
}

impl Parse for Name {
    fn parse(input: ParseStream) -> Result<Self> {
        let first = Ident::parse_any(input)?;
        let span = first.span();
        let mut text = first.to_string();
        while input.peek(Token![-]) {
            input.parse::<Token![-]>()?;
            let part = Ident::parse_any(input)?;
            text.push('-');
            text.push_str(&part.to_string());
        }
        Ok(Name { text, span })
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.text)
    }
}

/// A parsed attribute: `name="value"`, or a bare `name` with an empty value.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub name: Name,
    pub value: Option<LitStr>,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("name", &self.name)
            .field("value", &self.value.as_ref().map(LitStr::value))
            .finish()
    }
}

/// A parsed element: `<tag attrs... />` or `<tag attrs...> children </tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Name,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level markup! input: a sequence of elements.
#[derive(Debug)]
struct MarkupInput {
    elements: Vec<Element>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for MarkupInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut elements = Vec::new();
        while !input.is_empty() {
            elements.push(parse_element(input)?);
        }
        Ok(MarkupInput { elements })
    }
}

/// Parse a single element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag: Name = input.parse()?;

    // Attributes until `/>` or `>`.
    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        let name: Name = input.parse()?;
        let value = if input.peek(Token![=]) {
            input.parse::<Token![=]>()?;
            Some(input.parse::<LitStr>()?)
        } else {
            None
        };
        attrs.push(Attribute { name, value });
    }

    // Children until the closing tag `</tag>`.
    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing: Name = input.parse()?;
            if closing.text != tag.text {
                return Err(Error::new(
                    closing.span,
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag.text, closing.text
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate the builder expression for a single element.
fn generate_element(elem: &Element) -> TokenStream {
    let tag = LitStr::new(&elem.tag.text, elem.tag.span);

    let attr_calls = elem.attrs.iter().map(|attr| {
        let name = LitStr::new(&attr.name.text, attr.name.span);
        let value = attr
            .value
            .clone()
            .unwrap_or_else(|| LitStr::new("", attr.name.span));
        quote! { .with_attr(#name, #value) }
    });

    let child_calls = elem.children.iter().map(|child| {
        let child_code = generate_element(child);
        quote! { .with_child(#child_code) }
    });

    quote! {
        ::convenient_formsets::dom::ElementSpec::new(#tag) #(#attr_calls)* #(#child_calls)*
    }
}

/// Entry point: generate code for the entire markup! macro.
pub(crate) fn markup_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: MarkupInput = syn::parse2(input)?;

    if parsed.elements.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "markup! macro requires at least one element",
        ));
    }

    let element_exprs = parsed.elements.iter().map(generate_element);

    Ok(quote! {
        {
            let __elements: ::std::vec::Vec<::convenient_formsets::dom::ElementSpec> =
                ::std::vec![#(#element_exprs),*];
            __elements
        }
    })
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_markup(tokens: TokenStream) -> Result<MarkupInput> {
        syn::parse2(tokens)
    }

    fn parse_single_element(tokens: TokenStream) -> Result<Element> {
        syn::parse2::<MarkupInput>(tokens).map(|m| m.elements.into_iter().next().unwrap())
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_single_element(quote! { <input name="formset-0-user" /> }).unwrap();
        assert_eq!(elem.tag.text, "input");
        assert!(elem.self_closing);
        assert!(elem.children.is_empty());
        assert_eq!(elem.attrs.len(), 1);
        assert_eq!(elem.attrs[0].name.text, "name");
        assert_eq!(elem.attrs[0].value.as_ref().unwrap().value(), "formset-0-user");
    }

    #[test]
    fn debug_shows_closing_form() {
        let elem = parse_single_element(quote! { <input hidden /> }).unwrap();
        let debug = format!("{elem:?}");
        assert!(debug.contains("tag: \"input\""), "got: {debug}");
        assert!(debug.contains("self_closing: true"), "got: {debug}");

        let elem = parse_single_element(quote! { <div></div> }).unwrap();
        assert!(format!("{elem:?}").contains("self_closing: false"));
    }

    #[test]
    fn parse_keyword_attribute_names() {
        let elem = parse_single_element(quote! {
            <label for="id_formset-0-user" type="x" />
        })
        .unwrap();
        assert_eq!(elem.attrs[0].name.text, "for");
        assert_eq!(elem.attrs[1].name.text, "type");
    }

    #[test]
    fn parse_hyphenated_attribute_name() {
        let elem = parse_single_element(quote! { <div data-form-role="row" /> }).unwrap();
        assert_eq!(elem.attrs[0].name.text, "data-form-role");
    }

    #[test]
    fn parse_bare_attribute() {
        let elem = parse_single_element(quote! { <div class="form" hidden /> }).unwrap();
        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[1].name.text, "hidden");
        assert!(elem.attrs[1].value.is_none());
    }

    #[test]
    fn parse_element_with_children() {
        let elem = parse_single_element(quote! {
            <div class="form">
                <label for="id_formset-0-user"></label>
                <input type="text" name="formset-0-user" />
            </div>
        })
        .unwrap();
        assert_eq!(elem.tag.text, "div");
        assert!(!elem.self_closing);
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children[0].tag.text, "label");
        assert_eq!(elem.children[1].tag.text, "input");
    }

    #[test]
    fn parse_multiple_root_elements() {
        let markup = parse_markup(quote! {
            <div id="forms-container"></div>
            <button id="add-form-button" />
            <div id="management-form"></div>
        })
        .unwrap();
        assert_eq!(markup.elements.len(), 3);
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let result = parse_single_element(quote! {
            <div>
                <input />
            </span>
        });
        let err = result.unwrap_err().to_string();
        assert!(err.contains("mismatched closing tag"));
    }

    #[test]
    fn parse_error_text_child() {
        let result = parse_single_element(quote! { <label>"User"</label> });
        assert!(result.is_err());
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_element_with_attrs() {
        let elem = parse_single_element(quote! { <input type="hidden" name="x" /> }).unwrap();
        let code_str = generate_element(&elem).to_string();
        assert!(code_str.contains("ElementSpec :: new (\"input\")"), "got: {code_str}");
        assert!(code_str.contains(". with_attr (\"type\" , \"hidden\")"), "got: {code_str}");
        assert!(code_str.contains(". with_attr (\"name\" , \"x\")"), "got: {code_str}");
    }

    #[test]
    fn codegen_bare_attribute_is_empty_string() {
        let elem = parse_single_element(quote! { <div hidden /> }).unwrap();
        let code_str = generate_element(&elem).to_string();
        assert!(code_str.contains(". with_attr (\"hidden\" , \"\")"), "got: {code_str}");
    }

    #[test]
    fn codegen_children() {
        let elem = parse_single_element(quote! {
            <div>
                <input />
            </div>
        })
        .unwrap();
        let code_str = generate_element(&elem).to_string();
        assert!(code_str.contains("with_child"));
        assert!(code_str.contains("ElementSpec :: new (\"input\")"));
    }

    #[test]
    fn codegen_full_markup() {
        let code_str = markup_impl(quote! {
            <div id="formset" />
            <button id="add-form-button" />
        })
        .unwrap()
        .to_string();
        assert!(code_str.contains("__elements"));
        assert!(code_str.contains("ElementSpec :: new (\"div\")"));
        assert!(code_str.contains("ElementSpec :: new (\"button\")"));
    }

    #[test]
    fn codegen_empty_markup_is_error() {
        let result = markup_impl(quote! {});
        assert!(result.unwrap_err().to_string().contains("at least one element"));
    }
}
