//! Click dispatch table.
//!
//! [`DispatchTable`] maps trigger elements to the [`FormAction`] they fire.
//! Keys are node handles, which stay valid when forms are renumbered or
//! moved, so bindings never need to be rewired. A click is resolved along its
//! bubble path: the target first, then each ancestor.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::host::DomHost;

/// What a trigger does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction<N> {
    AddForm,
    /// Delete the bound form.
    DeleteForm(N),
    MoveFormUp(N),
    MoveFormDown(N),
}

impl<N: Copy> FormAction<N> {
    /// The form this action is bound to, if any.
    pub fn form(&self) -> Option<N> {
        match *self {
            Self::AddForm => None,
            Self::DeleteForm(form) | Self::MoveFormUp(form) | Self::MoveFormDown(form) => Some(form),
        }
    }
}

/// Registry of trigger → action bindings.
#[derive(Debug, Clone)]
pub struct DispatchTable<N> {
    bindings: HashMap<N, FormAction<N>>,
}

impl<N> DispatchTable<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind a trigger. An existing binding for the same trigger is replaced.
    pub fn bind(&mut self, trigger: N, action: FormAction<N>) {
        self.bindings.insert(trigger, action);
    }

    /// Remove a trigger's binding, returning it.
    pub fn unbind(&mut self, trigger: N) -> Option<FormAction<N>> {
        self.bindings.remove(&trigger)
    }

    /// Drop every binding owned by `form`.
    pub fn unbind_form(&mut self, form: N) {
        self.bindings.retain(|_, action| action.form() != Some(form));
    }

    pub fn get(&self, trigger: N) -> Option<FormAction<N>> {
        self.bindings.get(&trigger).copied()
    }

    /// First bound element on the bubble path of `target`, with its action.
    pub fn resolve<H>(&self, host: &H, target: N) -> Option<(N, FormAction<N>)>
    where
        H: DomHost<Node = N>,
    {
        bubble_path(host, target)
            .into_iter()
            .find_map(|node| self.get(node).map(|action| (node, action)))
    }

    /// Triggers bound to `form`.
    pub fn triggers_of(&self, form: N) -> Vec<N> {
        self.bindings
            .iter()
            .filter(|(_, action)| action.form() == Some(form))
            .map(|(&trigger, _)| trigger)
            .collect()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl<N> Default for DispatchTable<N>
where
    N: Copy + Eq + Hash + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

/// `[target, parent, grandparent, ..., root]`, or empty for a stale target.
pub fn bubble_path<H: DomHost>(host: &H, target: H::Node) -> Vec<H::Node> {
    if !host.contains(target) {
        return Vec::new();
    }
    let mut path = vec![target];
    path.extend(host.ancestors(target));
    path
}
