// src/mongo.rs
use crate::model::{AppUser, IndexSpec, Todo, COLLECTION, DATABASE};
use crate::seed::SeedTarget;
use anyhow::{Context, Result};
use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database, IndexModel};
use tracing::debug;

/// Connects and pings `admin`, so an unreachable server fails before any write.
pub async fn connect(uri: &str) -> Result<Client> {
    let mut client_options = ClientOptions::parse(uri)
        .await
        .context("Failed to parse MongoDB URI")?;
    client_options.app_name = Some("todoapp-seed".to_string());
    let client =
        Client::with_options(client_options).context("Failed to create MongoDB client")?;
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .context("MongoDB ping failed")?;
    Ok(client)
}

pub fn select_database(client: &Client) -> Database {
    client.database(DATABASE)
}

impl SeedTarget for Database {
    fn name(&self) -> &str {
        Database::name(self)
    }

    async fn create_user(&self, user: &AppUser) -> Result<()> {
        let reply = self.run_command(user.create_command()).await?;
        debug!(?reply, "createUser");
        Ok(())
    }

    async fn insert_todos(&self, todos: &[Todo]) -> Result<usize> {
        let result = self
            .collection::<Todo>(COLLECTION)
            .insert_many(todos)
            .await?;
        Ok(result.inserted_ids.len())
    }

    async fn create_index(&self, index: &IndexSpec) -> Result<String> {
        let model = IndexModel::builder().keys(index.keys.clone()).build();
        let result = self
            .collection::<Todo>(COLLECTION)
            .create_index(model)
            .await?;
        Ok(result.index_name)
    }
}
