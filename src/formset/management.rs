//! Management form: the four bookkeeping fields a server reads to rebuild the
//! submitted list of forms.

use crate::error::FormsetError;
use crate::host::DomHost;
use crate::selector::{AttributeOperator, SelectorList};

pub const TOTAL_FORMS: &str = "TOTAL_FORMS";
pub const INITIAL_FORMS: &str = "INITIAL_FORMS";
pub const MIN_NUM_FORMS: &str = "MIN_NUM_FORMS";
pub const MAX_NUM_FORMS: &str = "MAX_NUM_FORMS";

/// `input[name="<prefix>-<field>"]`
pub fn field_selector(prefix: &str, field: &str) -> SelectorList {
    SelectorList::tag_with_attribute(
        "input",
        "name",
        AttributeOperator::Equals(format!("{prefix}-{field}")),
    )
}

/// Live handles to the management fields. Values are always read from and
/// written to the document; nothing is cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagementForm<N> {
    pub total_forms: N,
    pub initial_forms: N,
    pub min_num_forms: N,
    pub max_num_forms: N,
}

impl<N: Copy> ManagementForm<N> {
    /// Locate all four fields anywhere in the document.
    ///
    /// Fails with one generic error if any is absent, without naming it.
    pub fn resolve<H>(host: &H, prefix: &str) -> Result<Self, FormsetError>
    where
        H: DomHost<Node = N>,
    {
        let find = |field: &str| host.query_selector(None, &field_selector(prefix, field));
        match (
            find(TOTAL_FORMS),
            find(INITIAL_FORMS),
            find(MIN_NUM_FORMS),
            find(MAX_NUM_FORMS),
        ) {
            (Some(total_forms), Some(initial_forms), Some(min_num_forms), Some(max_num_forms)) => {
                Ok(Self {
                    total_forms,
                    initial_forms,
                    min_num_forms,
                    max_num_forms,
                })
            }
            _ => Err(FormsetError::ManagementForm {
                prefix: prefix.to_owned(),
            }),
        }
    }

    /// Current maximum, parsed from `MAX_NUM_FORMS`.
    pub fn max_forms<H: DomHost<Node = N>>(&self, host: &H) -> MaxForms {
        MaxForms::parse(host.value(self.max_num_forms))
    }

    pub fn total_forms<H: DomHost<Node = N>>(&self, host: &H) -> Option<i64> {
        parse_leading_int(host.value(self.total_forms))
    }

    pub fn initial_forms<H: DomHost<Node = N>>(&self, host: &H) -> Option<i64> {
        parse_leading_int(host.value(self.initial_forms))
    }

    pub fn min_num_forms<H: DomHost<Node = N>>(&self, host: &H) -> Option<i64> {
        parse_leading_int(host.value(self.min_num_forms))
    }

    pub fn set_total_forms<H: DomHost<Node = N>>(&self, host: &mut H, total: usize) {
        host.set_value(self.total_forms, &total.to_string());
    }
}

// ---------------------------------------------------------------------------
// MaxForms
// ---------------------------------------------------------------------------

/// Upper bound on visible forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxForms {
    Limited(i64),
    /// `MAX_NUM_FORMS` holds no number.
    Unlimited,
}

impl MaxForms {
    /// Parse the leading integer of `value`; no digits (or a value too large
    /// to represent) means unlimited.
    pub fn parse(value: &str) -> Self {
        match parse_leading_int(value) {
            Some(max) => Self::Limited(max),
            None => Self::Unlimited,
        }
    }

    /// Whether another form may be added while `visible` forms are shown.
    pub fn allows(self, visible: usize) -> bool {
        match self {
            Self::Limited(max) => i64::try_from(visible).is_ok_and(|visible| visible < max),
            Self::Unlimited => true,
        }
    }
}

/// Leading-integer parse: optional whitespace, optional sign, ASCII digits;
/// anything after the digits is ignored. Positive overflow yields `None`
/// and negative overflow saturates.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude = &unsigned[..digits];
    if negative {
        Some(format!("-{magnitude}").parse().unwrap_or(i64::MIN))
    } else {
        magnitude.parse().ok()
    }
}
