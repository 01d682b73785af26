// ABOUTME: Scope-isolated registry over shared task, title, and group tables
// ABOUTME: Provides typed lookups and result write-back for one execution context

use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::error::{RegistryError, Result};
use crate::task::{TaskCallable, TaskDescriptor};

/// Entries accepted by [`Scope::add`].
#[derive(Debug, Clone)]
pub enum RegistryEntry {
    /// A per-run task descriptor. Duplicate keys are a failure.
    Task(TaskDescriptor),
    /// A display title for a function name. Last registration wins.
    Title { function: String, title: String },
    /// One member appended to a group's ordered callable list.
    GroupMember { group: String, callable: TaskCallable },
}

#[derive(Debug, Default)]
struct Tables {
    tasks: IndexMap<String, TaskDescriptor>,
    titles: HashMap<String, String>,
    groups: IndexMap<String, Vec<TaskCallable>>,
}

/// Handle to one isolated registry scope.
///
/// Cloning shares the same scope; `Scope::new` starts with empty tables.
/// Concurrent runs in distinct scopes never observe each other's entries.
/// Within one scope, concurrent writers targeting the same key are
/// last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    tables: Arc<RwLock<Tables>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh scope inheriting definition-time tables (titles and
    /// groups) but none of the per-run task descriptors.
    pub async fn inherit(&self) -> Self {
        let tables = self.tables.read().await;

        Self {
            tables: Arc::new(RwLock::new(Tables {
                tasks: IndexMap::new(),
                titles: tables.titles.clone(),
                groups: tables.groups.clone(),
            })),
        }
    }

    /// Add an entry to this scope.
    ///
    /// Task keys are unique within a scope and never overwritten; titles
    /// overwrite by function name; group members append, creating the
    /// group's list on first member.
    pub async fn add(&self, entry: RegistryEntry) -> Result<()> {
        let mut tables = self.tables.write().await;

        match entry {
            RegistryEntry::Task(descriptor) => {
                let key = descriptor.key().to_string();
                if tables.tasks.contains_key(&key) {
                    return Err(RegistryError::DuplicateTask { key });
                }

                debug!("registering task: {}", key);
                tables.tasks.insert(key, descriptor);
            }
            RegistryEntry::Title { function, title } => {
                debug!("registering title for {}: {}", function, title);
                tables.titles.insert(function, title);
            }
            RegistryEntry::GroupMember { group, callable } => {
                debug!("registering group member: {} -> {}", group, callable.name());
                tables.groups.entry(group).or_default().push(callable);
            }
        }

        Ok(())
    }

    /// Register a display title for a function. Last registration wins.
    pub async fn register_title(&self, function: impl Into<String>, title: impl Into<String>) {
        let mut tables = self.tables.write().await;
        tables.titles.insert(function.into(), title.into());
    }

    /// Register a group with its ordered members. Registering a second
    /// group under an existing id is a failure.
    pub async fn register_group(
        &self,
        group_id: impl Into<String>,
        members: Vec<TaskCallable>,
    ) -> Result<()> {
        let group_id = group_id.into();
        let mut tables = self.tables.write().await;

        if tables.groups.contains_key(&group_id) {
            return Err(RegistryError::DuplicateGroup { group_id });
        }

        debug!("registering group: {} ({} members)", group_id, members.len());
        tables.groups.insert(group_id, members);

        Ok(())
    }

    /// Look up one task descriptor by key.
    pub async fn task(&self, key: &str) -> Result<TaskDescriptor> {
        let tables = self.tables.read().await;
        tables
            .tasks
            .get(key)
            .cloned()
            .ok_or_else(|| RegistryError::TaskNotFound {
                key: key.to_string(),
            })
    }

    /// Look up the registered title for a function name, if any.
    pub async fn title(&self, function: &str) -> Option<String> {
        let tables = self.tables.read().await;
        tables.titles.get(function).cloned()
    }

    /// Look up a group's ordered member list.
    pub async fn group(&self, group_id: &str) -> Result<Vec<TaskCallable>> {
        let tables = self.tables.read().await;
        tables
            .groups
            .get(group_id)
            .cloned()
            .ok_or_else(|| RegistryError::GroupNotFound {
                group_id: group_id.to_string(),
            })
    }

    /// Snapshot of the whole task table, in registration order.
    pub async fn tasks(&self) -> IndexMap<String, TaskDescriptor> {
        let tables = self.tables.read().await;
        tables.tasks.clone()
    }

    /// Snapshot of the whole title table.
    pub async fn titles(&self) -> HashMap<String, String> {
        let tables = self.tables.read().await;
        tables.titles.clone()
    }

    /// Snapshot of the whole group table, in registration order.
    pub async fn groups(&self) -> IndexMap<String, Vec<TaskCallable>> {
        let tables = self.tables.read().await;
        tables.groups.clone()
    }

    /// Persist a task's result. Called from the executor's completion hook.
    pub async fn set_task_result(&self, key: &str, result: Value) -> Result<()> {
        let mut tables = self.tables.write().await;

        match tables.tasks.get_mut(key) {
            Some(descriptor) => {
                descriptor.result = Some(result);
                Ok(())
            }
            None => Err(RegistryError::TaskNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Write back a resolved title for a task.
    pub async fn set_task_title(&self, key: &str, title: String) -> Result<()> {
        let mut tables = self.tables.write().await;

        match tables.tasks.get_mut(key) {
            Some(descriptor) => {
                descriptor.title = title;
                Ok(())
            }
            None => Err(RegistryError::TaskNotFound {
                key: key.to_string(),
            }),
        }
    }
}
