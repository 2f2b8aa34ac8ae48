// src/dry_run.rs
use crate::model::{AppUser, IndexSpec, Todo, COLLECTION, DATABASE};
use crate::seed::SeedTarget;
use anyhow::Result;
use bson::{doc, Bson, Document};
use std::cell::RefCell;
use std::io::Write;

/// Prints each command as relaxed Extended JSON instead of sending it.
pub struct DryRun<W: Write> {
    out: RefCell<W>,
}

impl<W: Write> DryRun<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn print(&self, command: Document) -> Result<()> {
        let json = serde_json::to_string(&Bson::Document(command).into_relaxed_extjson())?;
        writeln!(self.out.borrow_mut(), "{}", json)?;
        Ok(())
    }
}

impl<W: Write> SeedTarget for DryRun<W> {
    fn name(&self) -> &str {
        DATABASE
    }

    async fn create_user(&self, user: &AppUser) -> Result<()> {
        let mut command = user.create_command();
        command.insert("pwd", "********");
        self.print(command)
    }

    async fn insert_todos(&self, todos: &[Todo]) -> Result<usize> {
        let documents = todos
            .iter()
            .map(bson::to_document)
            .collect::<Result<Vec<_>, _>>()?;
        self.print(doc! { "insert": COLLECTION, "documents": documents, "ordered": true })?;
        Ok(todos.len())
    }

    async fn create_index(&self, index: &IndexSpec) -> Result<String> {
        let name = index.default_name();
        self.print(doc! {
            "createIndexes": COLLECTION,
            "indexes": [ { "key": index.keys.clone(), "name": name.as_str() } ],
        })?;
        Ok(name)
    }
}
