// src/seed.rs
use crate::model::{app_user, sample_todos, todo_indexes, AppUser, IndexSpec, Todo, DATABASE};
use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use std::io::Write;
use tracing::{debug, info};

pub const COMPLETION_MESSAGE: &str = "Database initialization completed!";

/// A selected database that the seeder writes into.
#[allow(async_fn_in_trait)]
pub trait SeedTarget {
    fn name(&self) -> &str;

    async fn create_user(&self, user: &AppUser) -> Result<()>;

    /// Ordered insert. Documents before a failing one stay written.
    async fn insert_todos(&self, todos: &[Todo]) -> Result<usize>;

    async fn create_index(&self, index: &IndexSpec) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedReport {
    pub database: String,
    pub user: String,
    pub inserted: usize,
    pub indexes: Vec<String>,
}

/// Seeds `target`, then writes the completion line to `out`.
///
/// Steps run in order and stop at the first error. Nothing is checked for
/// existence first, so running twice fails at user creation.
pub async fn run<T: SeedTarget>(target: &T, out: &mut impl Write) -> Result<SeedReport> {
    if target.name() != DATABASE {
        return Err(anyhow!(
            "Expected database '{}', got '{}'",
            DATABASE,
            target.name()
        ));
    }
    info!(database = target.name(), "Seeding database");

    let user = app_user();
    target
        .create_user(&user)
        .await
        .with_context(|| format!("Failed to create user '{}'", user.user))?;
    info!(user = %user.user, "Created user");

    let todos = sample_todos(Utc::now());
    let inserted = target
        .insert_todos(&todos)
        .await
        .context("Failed to insert sample todos")?;
    info!(inserted, "Inserted sample todos");

    let mut indexes = Vec::new();
    for index in todo_indexes() {
        let name = target
            .create_index(&index)
            .await
            .with_context(|| format!("Failed to create index {}", index.keys))?;
        debug!(index = %name, "Created index");
        indexes.push(name);
    }
    info!(count = indexes.len(), "Created indexes");

    writeln!(out, "{}", COMPLETION_MESSAGE)?;

    Ok(SeedReport {
        database: target.name().to_string(),
        user: user.user,
        inserted,
        indexes,
    })
}
