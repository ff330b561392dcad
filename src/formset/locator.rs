//! Typed group locator: the `<prefix>-<index>` token embedded in field
//! identifiers, e.g. `id_formset-2-name` or `formset-__prefix__-name`.
//!
//! Identifiers are scanned structurally instead of with a pattern: the first
//! position where `<prefix>-` is followed by ASCII digits or by the literal
//! `__prefix__` is the token, and only that span is ever rewritten.

/// Placeholder index used by the empty-form template.
pub const TEMPLATE_PLACEHOLDER: &str = "__prefix__";

/// Index part of a group token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupIndex {
    /// A numeric position. Saturates at `usize::MAX`.
    Position(usize),
    /// The template placeholder: a clone that has not been numbered yet.
    Unassigned,
}

/// A located `<prefix>-<index>` token within an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupLocator {
    pub index: GroupIndex,
    /// Byte range of the whole token (prefix included) in the scanned value.
    pub start: usize,
    pub end: usize,
}

impl GroupLocator {
    /// Find the first group token for `prefix` in `value`.
    pub fn find(prefix: &str, value: &str) -> Option<Self> {
        let head_len = prefix.len() + 1;
        for (start, _) in value.char_indices() {
            let rest = &value[start..];
            if !(rest.starts_with(prefix) && rest[prefix.len()..].starts_with('-')) {
                continue;
            }
            let tail = &rest[head_len..];
            let digits = tail.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 0 {
                let position = tail[..digits].parse().unwrap_or(usize::MAX);
                return Some(Self {
                    index: GroupIndex::Position(position),
                    start,
                    end: start + head_len + digits,
                });
            }
            if tail.starts_with(TEMPLATE_PLACEHOLDER) {
                return Some(Self {
                    index: GroupIndex::Unassigned,
                    start,
                    end: start + head_len + TEMPLATE_PLACEHOLDER.len(),
                });
            }
        }
        None
    }
}

/// Replace the first group token in `value` with `<prefix>-<index>`.
///
/// Returns `None` when `value` carries no token for `prefix`.
pub fn renumbered(prefix: &str, value: &str, index: usize) -> Option<String> {
    let locator = GroupLocator::find(prefix, value)?;
    let mut out = String::with_capacity(value.len() + 4);
    out.push_str(&value[..locator.start]);
    out.push_str(prefix);
    out.push('-');
    out.push_str(&index.to_string());
    out.push_str(&value[locator.end..]);
    Some(out)
}
