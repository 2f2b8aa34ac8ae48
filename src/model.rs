// src/model.rs
use bson::{doc, oid::ObjectId, Bson, Document};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DATABASE: &str = "todoapp";
pub const COLLECTION: &str = "todos";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub done: bool,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    pub fn new(title: &str, done: bool, now: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.to_string(),
            done,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The three sample todos, all stamped with `now`.
pub fn sample_todos(now: DateTime<Utc>) -> Vec<Todo> {
    vec![
        Todo::new("เรียน Go Programming", false, now),
        Todo::new("ทำโปรเจกต์ Todo API", true, now),
        Todo::new("เรียน MongoDB", false, now),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub role: String,
    pub db: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppUser {
    pub user: String,
    pub pwd: String,
    pub roles: Vec<Grant>,
}

impl AppUser {
    /// `createUser` command document, to be run on the user's auth database.
    pub fn create_command(&self) -> Document {
        let roles: Vec<Bson> = self
            .roles
            .iter()
            .map(|g| Bson::Document(doc! { "role": g.role.as_str(), "db": g.db.as_str() }))
            .collect();
        doc! {
            "createUser": self.user.as_str(),
            "pwd": self.pwd.as_str(),
            "roles": roles,
        }
    }
}

/// Application user with read/write access to the todoapp database only.
pub fn app_user() -> AppUser {
    AppUser {
        user: "todouser".to_string(),
        pwd: "todopass".to_string(),
        roles: vec![Grant {
            role: "readWrite".to_string(),
            db: DATABASE.to_string(),
        }],
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpec {
    pub keys: Document,
}

impl IndexSpec {
    /// Name the server derives from the keys, e.g. `created_at_-1`.
    pub fn default_name(&self) -> String {
        self.keys
            .iter()
            .map(|(field, kind)| match kind {
                Bson::String(s) => format!("{}_{}", field, s),
                Bson::Int32(n) => format!("{}_{}", field, n),
                Bson::Int64(n) => format!("{}_{}", field, n),
                other => format!("{}_{}", field, other),
            })
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Newest-first ordering on `created_at`, then full-text search on `title`.
pub fn todo_indexes() -> Vec<IndexSpec> {
    vec![
        IndexSpec { keys: doc! { "created_at": -1 } },
        IndexSpec { keys: doc! { "title": "text" } },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_todos_have_fixed_titles_and_flags() {
        let now = Utc::now();
        let todos = sample_todos(now);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            ["เรียน Go Programming", "ทำโปรเจกต์ Todo API", "เรียน MongoDB"]
        );
        let done: Vec<bool> = todos.iter().map(|t| t.done).collect();
        assert_eq!(done, [false, true, false]);
        assert!(todos.iter().all(|t| t.created_at == now && t.updated_at == now));
        assert!(todos.iter().all(|t| t.id.is_none()));
    }

    #[test]
    fn todo_serializes_without_id_and_with_bson_dates() {
        let todo = Todo::new("เรียน MongoDB", false, Utc::now());
        let doc = bson::to_document(&todo).unwrap();
        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("title").unwrap(), "เรียน MongoDB");
        assert!(!doc.get_bool("done").unwrap());
        assert!(matches!(doc.get("created_at"), Some(Bson::DateTime(_))));
        assert!(matches!(doc.get("updated_at"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn create_user_command_grants_read_write_on_todoapp() {
        let cmd = app_user().create_command();
        assert_eq!(cmd.keys().next().map(String::as_str), Some("createUser"));
        assert_eq!(cmd.get_str("createUser").unwrap(), "todouser");
        assert_eq!(cmd.get_str("pwd").unwrap(), "todopass");
        let roles = cmd.get_array("roles").unwrap();
        assert_eq!(roles.len(), 1);
        assert_eq!(
            roles[0],
            Bson::Document(doc! { "role": "readWrite", "db": "todoapp" })
        );
    }

    #[test]
    fn index_names_match_server_defaults() {
        let names: Vec<String> = todo_indexes().iter().map(IndexSpec::default_name).collect();
        assert_eq!(names, ["created_at_-1", "title_text"]);
    }
}
