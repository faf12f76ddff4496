use reqwest::{Client, Response};

use crate::api::types::{
    NewTodo, Reply, Tag, TagEnvelope, TagName, Todo, TodoEnvelope, TodoPatch,
};
use crate::error::{Result, TodoError};

#[derive(Clone)]
pub struct TodoClient {
    client: Client,
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        let resp = self
            .client
            .get(format!("{}/todos", self.base_url))
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Vec<Todo>>().await?)
    }

    pub async fn list_todos_for_tag(&self, tag_id: i64) -> Result<Vec<Todo>> {
        let resp = self
            .client
            .get(format!("{}/tags/{}", self.base_url, tag_id))
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Vec<Todo>>().await?)
    }

    /// Search has no server endpoint: it fetches everything and the caller filters.
    pub async fn search_todos(&self) -> Result<Vec<Todo>> {
        self.list_todos().await
    }

    pub async fn create_todo(&self, todo: &NewTodo) -> Result<Reply<Todo>> {
        let resp = self
            .client
            .post(format!("{}/todos", self.base_url))
            .json(&TodoEnvelope { todo })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Reply<Todo>>().await?)
    }

    pub async fn update_todo(&self, id: i64, patch: &TodoPatch) -> Result<Todo> {
        let resp = self
            .client
            .put(format!("{}/todos/{}", self.base_url, id))
            .json(&TodoEnvelope { todo: patch })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Todo>().await?)
    }

    pub async fn delete_todo(&self, id: i64) -> Result<()> {
        let resp = self
            .client
            .delete(format!("{}/todos/{}", self.base_url, id))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        let resp = self
            .client
            .get(format!("{}/tags", self.base_url))
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Vec<Tag>>().await?)
    }

    pub async fn update_tag(&self, id: i64, name: &str) -> Result<Reply<Tag>> {
        let resp = self
            .client
            .put(format!("{}/tags/{}", self.base_url, id))
            .json(&TagEnvelope {
                tag: TagName { name },
            })
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        Ok(resp.json::<Reply<Tag>>().await?)
    }

    pub async fn delete_tag(&self, id: i64) -> Result<()> {
        let resp = self
            .client
            .delete(format!("{}/tags/{}", self.base_url, id))
            .send()
            .await?;
        ensure_success(resp).await?;
        Ok(())
    }
}

async fn ensure_success(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let message = resp.text().await.unwrap_or_default();
        return Err(TodoError::Api { status, message });
    }
    Ok(resp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::ServerRejection;
    use chrono::NaiveDate;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, TodoClient) {
        let server = MockServer::start().await;
        let client = TodoClient::new(&server.uri());
        (server, client)
    }

    #[test]
    fn new_strips_trailing_slash() {
        let client = TodoClient::new("http://localhost:3000/api/v1/");
        assert_eq!(client.base_url(), "http://localhost:3000/api/v1");
    }

    #[tokio::test]
    async fn list_todos_parses_array() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 2, "title": "Walk dog", "done": false, "tag_list": [], "dueDate": "2021-01-03"},
                {"id": 1, "title": "Buy milk", "done": true, "tag_list": ["home"], "dueDate": null}
            ])))
            .mount(&server)
            .await;

        let todos = client.list_todos().await.unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].due_date, NaiveDate::from_ymd_opt(2021, 1, 3));
        assert!(todos[1].done);
    }

    #[tokio::test]
    async fn list_todos_for_tag_hits_tag_path() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/tags/4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 9, "title": "Report", "done": false, "tag_list": ["work"], "dueDate": null}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let todos = client.list_todos_for_tag(4).await.unwrap();
        assert_eq!(todos[0].tag_list, vec!["work"]);
    }

    #[tokio::test]
    async fn create_todo_sends_envelope() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/todos"))
            .and(body_json(json!({"todo": {"title": "Report", "done": false, "tag_list": "work"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 10, "title": "Report", "done": false, "tag_list": ["work"], "dueDate": null}),
            ))
            .mount(&server)
            .await;

        let reply = client
            .create_todo(&NewTodo {
                title: "Report".into(),
                done: false,
                tag_list: "work".into(),
            })
            .await
            .unwrap();

        match reply {
            Reply::Accepted(todo) => assert_eq!(todo.id, 10),
            other => panic!("expected created todo, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_todo_surfaces_domain_rejection() {
        let (server, client) = setup().await;

        Mock::given(method("POST"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"error": true, "message": "title cannot be empty"}),
            ))
            .mount(&server)
            .await;

        let reply = client
            .create_todo(&NewTodo {
                title: "".into(),
                done: false,
                tag_list: "".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            reply,
            Reply::Rejected(ServerRejection {
                error: true,
                message: Some("title cannot be empty".into())
            })
        );
    }

    #[tokio::test]
    async fn update_todo_sends_only_patched_fields() {
        let (server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/todos/3"))
            .and(body_json(json!({"todo": {"done": true}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 3, "title": "Buy milk", "done": true, "tag_list": [], "dueDate": null}),
            ))
            .mount(&server)
            .await;

        let todo = client
            .update_todo(
                3,
                &TodoPatch {
                    done: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(todo.done);
    }

    #[tokio::test]
    async fn delete_todo_accepts_no_content() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/todos/7"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.delete_todo(7).await.is_ok());
    }

    #[tokio::test]
    async fn delete_todo_reports_missing_record() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/todos/7"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&server)
            .await;

        match client.delete_todo(7).await.unwrap_err() {
            TodoError::Api { status, .. } => assert_eq!(status, 404),
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_tags_parses_counts() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "home", "taggings_count": 2},
                {"id": 2, "name": "old", "taggings_count": 0}
            ])))
            .mount(&server)
            .await;

        let tags = client.list_tags().await.unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[1].taggings_count, 0);
    }

    #[tokio::test]
    async fn update_tag_returns_conflict_as_rejection() {
        let (server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/tags/1"))
            .and(body_json(json!({"tag": {"name": "work"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": true})))
            .mount(&server)
            .await;

        let reply = client.update_tag(1, "work").await.unwrap();
        assert!(matches!(reply, Reply::Rejected(_)));
    }

    #[tokio::test]
    async fn update_tag_returns_renamed_tag() {
        let (server, client) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/tags/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({"id": 1, "name": "chores", "taggings_count": 3}),
            ))
            .mount(&server)
            .await;

        match client.update_tag(1, "chores").await.unwrap() {
            Reply::Accepted(tag) => assert_eq!(tag.name, "chores"),
            other => panic!("expected renamed tag, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_tag_hits_tag_path() {
        let (server, client) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/tags/5"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        assert!(client.delete_tag(5).await.is_ok());
    }

    #[tokio::test]
    async fn server_error_becomes_api_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/todos"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        match client.list_todos().await.unwrap_err() {
            TodoError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Internal Server Error");
            }
            other => panic!("Expected Api error, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let (server, client) = setup().await;

        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        assert!(client.list_tags().await.is_err());
    }
}
