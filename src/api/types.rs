use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Id carried by the detail editor when nothing is open.
pub const PLACEHOLDER_ID: i64 = -1;

/// Longest title or tag name the server accepts.
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_false")]
    pub done: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tag_list: Vec<String>,
    #[serde(
        rename = "dueDate",
        default,
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
}

impl Todo {
    pub fn has_tag(&self, name: &str) -> bool {
        self.tag_list.iter().any(|t| t == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub taggings_count: u32,
}

/// Body of `POST /todos`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTodo {
    pub title: String,
    pub done: bool,
    pub tag_list: String,
}

/// Partial body of `PUT /todos/{id}`. Absent fields are left untouched by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_list: Option<String>,
    /// `Some(None)` clears the due date, `None` leaves it alone.
    #[serde(rename = "dueDate", skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
}

#[derive(Debug, Serialize)]
pub struct TodoEnvelope<'a, T> {
    pub todo: &'a T,
}

#[derive(Debug, Serialize)]
pub struct TagEnvelope<'a> {
    pub tag: TagName<'a>,
}

#[derive(Debug, Serialize)]
pub struct TagName<'a> {
    pub name: &'a str,
}

/// Validation failure reported with a 200 status, e.g. `{"error": true, "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerRejection {
    pub error: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Either the entity or the server's domain rejection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Reply<T> {
    Rejected(ServerRejection),
    Accepted(T),
}

/// Parses `YYYY-MM-DD`, tolerating a trailing time part (`2021-01-05T00:00:00.000Z`).
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Trims names, drops empty ones and collapses duplicates, keeping first occurrence order.
pub fn normalize_tag_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if !name.is_empty() && !out.iter().any(|n| n == name) {
            out.push(name.to_string());
        }
    }
    out
}

/// Comma-joined form the server expects for `tag_list`.
pub fn join_tag_list(names: &[String]) -> String {
    names.join(",")
}

fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_due_date(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {}", s))),
    }
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn todo_deserializes_server_shape() {
        let raw = json!({
            "id": 3,
            "title": "Buy milk",
            "done": true,
            "tag_list": ["home", "errands"],
            "dueDate": "2021-01-05",
            "created_at": "2020-12-28T09:56:29.000Z"
        });
        let todo: Todo = serde_json::from_value(raw).unwrap();
        assert_eq!(todo.id, 3);
        assert!(todo.done);
        assert_eq!(todo.tag_list, vec!["home", "errands"]);
        assert_eq!(todo.due_date, Some(date(2021, 1, 5)));
    }

    #[test]
    fn todo_accepts_timestamp_due_date() {
        let raw = json!({"id": 1, "title": "x", "done": false, "tag_list": [], "dueDate": "2021-02-03T00:00:00.000Z"});
        let todo: Todo = serde_json::from_value(raw).unwrap();
        assert_eq!(todo.due_date, Some(date(2021, 2, 3)));
    }

    #[test]
    fn todo_tolerates_nulls_and_missing_fields() {
        let raw = json!({"id": 1, "title": "x", "done": null, "dueDate": null});
        let todo: Todo = serde_json::from_value(raw).unwrap();
        assert!(!todo.done);
        assert!(todo.tag_list.is_empty());
        assert_eq!(todo.due_date, None);
    }

    #[test]
    fn todo_rejects_garbage_due_date() {
        let raw = json!({"id": 1, "title": "x", "dueDate": "next tuesday"});
        assert!(serde_json::from_value::<Todo>(raw).is_err());
    }

    #[test]
    fn tag_deserializes_taggings_count() {
        let tag: Tag =
            serde_json::from_value(json!({"id": 2, "name": "work", "taggings_count": 4})).unwrap();
        assert_eq!(tag.name, "work");
        assert_eq!(tag.taggings_count, 4);
    }

    #[test]
    fn patch_omits_unset_fields() {
        let patch = TodoPatch {
            done: Some(true),
            ..Default::default()
        };
        let json = serde_json::to_value(TodoEnvelope { todo: &patch }).unwrap();
        assert_eq!(json, json!({"todo": {"done": true}}));
    }

    #[test]
    fn patch_clears_due_date_with_null() {
        let patch = TodoPatch {
            title: Some("Walk dog".into()),
            tag_list: Some("home,pets".into()),
            due_date: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            json!({"title": "Walk dog", "tag_list": "home,pets", "dueDate": null})
        );
    }

    #[test]
    fn patch_serializes_due_date_as_plain_date() {
        let patch = TodoPatch {
            due_date: Some(Some(date(2021, 1, 5))),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["dueDate"], "2021-01-05");
    }

    #[test]
    fn new_todo_serializes_tag_list_as_string() {
        let new = NewTodo {
            title: "Write report".into(),
            done: false,
            tag_list: "work".into(),
        };
        let json = serde_json::to_value(TodoEnvelope { todo: &new }).unwrap();
        assert_eq!(
            json,
            json!({"todo": {"title": "Write report", "done": false, "tag_list": "work"}})
        );
    }

    #[test]
    fn tag_envelope_serializes() {
        let body = TagEnvelope {
            tag: TagName { name: "errands" },
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"tag": {"name": "errands"}})
        );
    }

    #[test]
    fn reply_detects_rejection() {
        let reply: Reply<Tag> = serde_json::from_value(json!({"error": true})).unwrap();
        assert!(matches!(reply, Reply::Rejected(ServerRejection { error: true, .. })));

        let reply: Reply<Todo> = serde_json::from_value(
            json!({"error": true, "message": "title cannot be empty"}),
        )
        .unwrap();
        match reply {
            Reply::Rejected(r) => assert_eq!(r.message.as_deref(), Some("title cannot be empty")),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn reply_falls_through_to_entity() {
        let reply: Reply<Tag> =
            serde_json::from_value(json!({"id": 1, "name": "home", "taggings_count": 0})).unwrap();
        assert_eq!(
            reply,
            Reply::Accepted(Tag {
                id: 1,
                name: "home".into(),
                taggings_count: 0
            })
        );
    }

    #[test]
    fn parse_due_date_variants() {
        assert_eq!(parse_due_date("2021-01-05"), Some(date(2021, 1, 5)));
        assert_eq!(parse_due_date(" 2021-01-05 "), Some(date(2021, 1, 5)));
        assert_eq!(parse_due_date("2021-01-05T10:00:00Z"), Some(date(2021, 1, 5)));
        assert_eq!(parse_due_date("2021-13-01"), None);
        assert_eq!(parse_due_date(""), None);
    }

    #[test]
    fn normalize_tag_names_trims_and_dedupes() {
        let names = normalize_tag_names([" work", "home ", "", "work", "  "]);
        assert_eq!(names, vec!["work", "home"]);
        assert_eq!(join_tag_list(&names), "work,home");
    }

    #[test]
    fn has_tag_is_exact() {
        let todo = Todo {
            id: 1,
            title: "x".into(),
            done: false,
            tag_list: vec!["work".into()],
            due_date: None,
        };
        assert!(todo.has_tag("work"));
        assert!(!todo.has_tag("wor"));
    }
}
