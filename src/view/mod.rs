//! Reconciling view-model for the todo list.
//!
//! A [`TodoView`] is an immutable snapshot of everything the screen shows: the
//! working set of todos, the checked subset, the active filter context, the detail
//! editor, and the tag list. Every user intent and every server reply produces a
//! *new* snapshot plus the remote calls still to be made ([`Effect`]); callers
//! replace their copy wholesale, so no partially-updated state is ever observable.

mod collection;
mod reconcile;
pub mod search;
mod state;

pub use collection::{is_due_ordered, order_by_due_date, CheckedSet};
pub use state::{
    Call, Command, Context, DetailEditor, Effect, Policy, Rejected, Reply, Ticket, TodoEdit,
    TodoView,
};
