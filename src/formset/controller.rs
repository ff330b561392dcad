//! Mutations: add, delete and move forms, and keep the add button and the
//! management form in step.
//!
//! None of these operations fail. A request the current state does not allow
//! (adding past the maximum, moving the first form up, acting on a form that
//! is not part of the formset) is ignored.

use std::fmt::Debug;
use std::hash::Hash;

use crate::formset::dispatch::FormAction;
use crate::formset::lifecycle::{ConvenientFormset, DELETE_MARKER};
use crate::formset::management::parse_leading_int;
use crate::formset::renumber::{canonical_order, renumber};
use crate::host::DomHost;

/// Direction of a move among visible forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl<N> ConvenientFormset<N>
where
    N: Copy + Eq + Hash + Debug,
{
    /// Route a click on `target` to the action bound on its bubble path.
    ///
    /// Returns whether a binding was found. The action itself may still be a
    /// no-op.
    pub fn handle_click<H>(&mut self, host: &mut H, target: N) -> bool
    where
        H: DomHost<Node = N>,
    {
        let Some((trigger, action)) = self.dispatch.resolve(host, target) else {
            log::debug!("click on {target:?} hit no trigger");
            return false;
        };
        log::debug!("trigger {trigger:?} fired {action:?}");
        match action {
            FormAction::AddForm => {
                self.add_form(host);
            }
            FormAction::DeleteForm(form) => {
                self.delete_form(host, form);
            }
            FormAction::MoveFormUp(form) => {
                self.move_form(host, form, MoveDirection::Up);
            }
            FormAction::MoveFormDown(form) => {
                self.move_form(host, form, MoveDirection::Down);
            }
        }
        true
    }

    /// Append a copy of the empty form, if adding is enabled and the number of
    /// visible forms is below the maximum. Returns the new form.
    pub fn add_form<H>(&mut self, host: &mut H) -> Option<N>
    where
        H: DomHost<Node = N>,
    {
        let Some(add) = self.elements.add else {
            log::debug!("add ignored: adding is disabled");
            return None;
        };

        let visible = self.visible_forms(host);
        let max = self.management.max_forms(host);
        if !max.allows(visible.len()) {
            log::debug!("add ignored: {} visible form(s), max {max:?}", visible.len());
            return None;
        }
        let order = if self.config.can_order() {
            Some(self.next_order_value(host, &visible))
        } else {
            None
        };

        let form = host.clone_subtree(add.template)?;
        host.append_child(self.elements.forms_container, form);
        self.bind_form(host, form);
        if let Some(order) = order {
            if let Some(field) = host.query_selector(Some(form), &self.order_field) {
                host.set_value(field, &order.to_string());
            }
        }

        self.sync(host);
        Some(form)
    }

    /// Delete `form`: soft-delete it when it has a DELETE field, otherwise
    /// remove it from the document. Returns whether anything changed.
    pub fn delete_form<H>(&mut self, host: &mut H, form: N) -> bool
    where
        H: DomHost<Node = N>,
    {
        if !self.config.can_delete() {
            log::debug!("delete ignored: deleting is disabled");
            return false;
        }
        if !self.forms(host).contains(&form) {
            log::debug!("delete ignored: {form:?} is not a form of this formset");
            return false;
        }

        match host.query_selector(Some(form), &self.delete_field) {
            Some(field) => {
                host.set_value(field, DELETE_MARKER);
                host.set_hidden(form, true);
            }
            None => {
                self.dispatch.unbind_form(form);
                host.remove(form);
            }
        }

        self.sync(host);
        true
    }

    /// Swap `form` with the previous visible form.
    pub fn move_form_up<H>(&mut self, host: &mut H, form: N) -> bool
    where
        H: DomHost<Node = N>,
    {
        self.move_form(host, form, MoveDirection::Up)
    }

    /// Swap `form` with the next visible form.
    pub fn move_form_down<H>(&mut self, host: &mut H, form: N) -> bool
    where
        H: DomHost<Node = N>,
    {
        self.move_form(host, form, MoveDirection::Down)
    }

    /// Swap `form` with its visible neighbour: document position and order
    /// value are exchanged. Names and the management form are left as they
    /// are.
    pub fn move_form<H>(&mut self, host: &mut H, form: N, direction: MoveDirection) -> bool
    where
        H: DomHost<Node = N>,
    {
        if !self.config.can_order() {
            log::debug!("move ignored: ordering is disabled");
            return false;
        }
        let visible = self.visible_forms(host);
        let Some(position) = visible.iter().position(|&f| f == form) else {
            log::debug!("move ignored: {form:?} is not a visible form");
            return false;
        };
        let neighbour = match direction {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => Some(position + 1).filter(|&i| i < visible.len()),
        };
        let Some(other) = neighbour.map(|i| visible[i]) else {
            log::debug!("move {direction:?} ignored: {form:?} is already at the edge");
            return false;
        };

        match direction {
            MoveDirection::Up => {
                if let Some(parent) = host.parent(other) {
                    host.insert_before(parent, form, other);
                }
            }
            MoveDirection::Down => {
                if let Some(parent) = host.parent(form) {
                    host.insert_before(parent, other, form);
                }
            }
        }

        let fields = (
            host.query_selector(Some(form), &self.order_field),
            host.query_selector(Some(other), &self.order_field),
        );
        if let (Some(field), Some(other_field)) = fields {
            let value = host.value(field).to_owned();
            let other_value = host.value(other_field).to_owned();
            host.set_value(field, &other_value);
            host.set_value(other_field, &value);
        }
        true
    }

    /// Hide the add button iff the visible forms reached the maximum.
    pub fn update_add_button_visibility<H>(&self, host: &mut H)
    where
        H: DomHost<Node = N>,
    {
        let Some(add) = self.elements.add else {
            return;
        };
        let visible = self.visible_forms(host).len();
        let at_max = !self.management.max_forms(host).allows(visible);
        host.set_hidden(add.add_button, at_max);
    }

    /// Recompute the add button, renumber every form and store the total.
    fn sync<H>(&self, host: &mut H)
    where
        H: DomHost<Node = N>,
    {
        if self.config.hides_add_button() {
            self.update_add_button_visibility(host);
        }

        let forms = self.forms(host);
        let total = forms.len();
        let order_field = self.config.can_order().then_some(&self.order_field);
        let ordered = canonical_order(host, &self.config.prefix, forms, order_field);
        renumber(host, &self.config.prefix, &ordered);
        self.management.set_total_forms(host, total);
    }

    /// Order value for a new form: one past the last visible form's, or 1.
    fn next_order_value<H>(&self, host: &H, visible: &[N]) -> i64
    where
        H: DomHost<Node = N>,
    {
        match visible.last() {
            None => 1,
            Some(&last) => host
                .query_selector(Some(last), &self.order_field)
                .and_then(|field| parse_leading_int(host.value(field)))
                .unwrap_or(0)
                .saturating_add(1),
        }
    }
}
