use std::collections::BTreeSet;

use crate::api::types::Todo;

/// Ids of the done todos in the current collection, most recently checked first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedSet {
    ids: Vec<i64>,
}

impl CheckedSet {
    pub fn from_todos(todos: &[Todo]) -> Self {
        Self {
            ids: todos.iter().filter(|t| t.done).map(|t| t.id).collect(),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn to_set(&self) -> BTreeSet<i64> {
        self.ids.iter().copied().collect()
    }

    pub(crate) fn mark(&mut self, id: i64) {
        if !self.contains(id) {
            self.ids.insert(0, id);
        }
    }

    pub(crate) fn unmark(&mut self, id: i64) {
        self.ids.retain(|&x| x != id);
    }

    /// Follows the server's `done` for this todo.
    pub(crate) fn sync(&mut self, todo: &Todo) {
        if todo.done {
            self.mark(todo.id);
        } else {
            self.unmark(todo.id);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }
}

/// Dated todos first, ascending by due date; undated ones after, in the order given.
///
/// Both tiers are stable, so todos sharing a due date keep the server's order.
pub fn order_by_due_date(todos: Vec<Todo>) -> Vec<Todo> {
    let (mut dated, undated): (Vec<Todo>, Vec<Todo>) =
        todos.into_iter().partition(|t| t.due_date.is_some());
    dated.sort_by_key(|t| t.due_date);
    dated.extend(undated);
    dated
}

pub fn is_due_ordered(todos: &[Todo]) -> bool {
    todos.windows(2).all(|pair| match (pair[0].due_date, pair[1].due_date) {
        (Some(a), Some(b)) => a <= b,
        (None, Some(_)) => false,
        _ => true,
    })
}

pub(crate) fn position_of(todos: &[Todo], id: i64) -> Option<usize> {
    todos.iter().position(|t| t.id == id)
}

/// Removes every todo whose id is in `ids` in a single pass; returns how many went.
pub(crate) fn remove_ids(todos: &mut Vec<Todo>, ids: &BTreeSet<i64>) -> usize {
    let before = todos.len();
    todos.retain(|t| !ids.contains(&t.id));
    before - todos.len()
}
