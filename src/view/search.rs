use crate::api::types::Todo;

/// Lowercased with every whitespace character removed.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

pub fn title_matches(title: &str, query: &str) -> bool {
    normalize(title).contains(&normalize(query))
}

pub fn filter_by_title(todos: Vec<Todo>, query: &str) -> Vec<Todo> {
    let needle = normalize(query);
    todos
        .into_iter()
        .filter(|t| normalize(&t.title).contains(&needle))
        .collect()
}
