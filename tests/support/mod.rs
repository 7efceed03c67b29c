//! Shared fixtures for the integration suites: sample domain models, their
//! validators and a wired task backend.
#![allow(dead_code)]

use crudkit::prelude::*;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

pub const TASK_TITLE_MAX_LENGTH: usize = 256;
pub const TASK_DESCRIPTION_MAX_LENGTH: usize = 1024;

pub const ROLE_NAME_MIN_LENGTH: usize = 3;
pub const ROLE_NAME_MAX_LENGTH: usize = 50;
pub const ROLE_DESCRIPTION_MAX_LENGTH: usize = 1024;

/// Fixed principals so headers stay readable in assertions.
pub const MANAGER_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const VIEWER_ID: &str = "22222222-2222-2222-2222-222222222222";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskState {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskModel {
    #[serde(default)]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: TaskState,
    #[serde(default)]
    pub priority: i32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub modified_at: Option<DateTime<Utc>>,
}

impl TaskModel {
    pub fn new(title: &str, priority: i32) -> Self {
        Self {
            id: Uuid::nil(),
            title: title.to_string(),
            description: None,
            state: TaskState::Todo,
            priority,
            created_at: None,
            modified_at: None,
        }
    }
}

impl MasterModel for TaskModel {
    type Key = Uuid;

    fn id(&self) -> Uuid {
        self.id
    }

    fn set_id(&mut self, id: Uuid) {
        self.id = id;
    }

    fn stamp_created(&mut self, at: DateTime<Utc>) {
        self.created_at = Some(at);
    }

    fn stamp_modified(&mut self, at: DateTime<Utc>) {
        self.modified_at = Some(at);
    }
}

pub struct TaskValidator {
    messages: Arc<Messages>,
}

impl TaskValidator {
    pub fn new(messages: Arc<Messages>) -> Self {
        Self { messages }
    }
}

#[async_trait]
impl ModelValidator<TaskModel> for TaskValidator {
    async fn validate(&self, model: &TaskModel) -> Vec<FieldError> {
        let mut rules = Rules::new(&self.messages);
        rules
            .required("title", &model.title, "Task.Fields.Title.Required")
            .max_length(
                "title",
                &model.title,
                TASK_TITLE_MAX_LENGTH,
                "Task.Fields.Title.MaximumLength",
            );
        if let Some(description) = &model.description {
            rules.max_length(
                "description",
                description,
                TASK_DESCRIPTION_MAX_LENGTH,
                "Task.Fields.Description.MaximumLength",
            );
        }
        rules.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleModel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl RoleModel {
    pub fn named(name: &str) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            description: None,
            permissions: Vec::new(),
        }
    }
}

impl MasterModel for RoleModel {
    type Key = i64;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// Role validation: name presence, length bounds, character set and
/// uniqueness against the store, description bound, duplicate-free
/// permission list.
pub struct RoleValidator {
    store: Arc<InMemoryCrudService<i64, RoleModel>>,
    messages: Arc<Messages>,
    name_pattern: Regex,
}

impl RoleValidator {
    pub fn new(store: Arc<InMemoryCrudService<i64, RoleModel>>, messages: Arc<Messages>) -> Self {
        Self {
            store,
            messages,
            name_pattern: Regex::new(r"^[A-Za-z0-9_\- ]+$").expect("valid pattern"),
        }
    }
}

#[async_trait]
impl ModelValidator<RoleModel> for RoleValidator {
    async fn validate(&self, model: &RoleModel) -> Vec<FieldError> {
        let mut rules = Rules::new(&self.messages);
        rules
            .required("name", &model.name, "Role.Fields.Name.Required")
            .min_length(
                "name",
                &model.name,
                ROLE_NAME_MIN_LENGTH,
                "Role.Fields.Name.MinimumLength",
            )
            .max_length(
                "name",
                &model.name,
                ROLE_NAME_MAX_LENGTH,
                "Role.Fields.Name.MaximumLength",
            )
            .matches(
                "name",
                &model.name,
                &self.name_pattern,
                "Role.Fields.Name.Invalid",
            );

        if !model.name.trim().is_empty() {
            let taken = self
                .store
                .exists(|role| role.id != model.id && role.name.eq_ignore_ascii_case(&model.name))
                .unwrap_or(false);
            rules.ensure("name", !taken, "Role.Fields.Name.Unique");
        }

        if let Some(description) = &model.description {
            rules.max_length(
                "description",
                description,
                ROLE_DESCRIPTION_MAX_LENGTH,
                "Role.Fields.Description.MaximumLength",
            );
        }

        let mut seen = HashSet::new();
        let duplicated = model.permissions.iter().any(|p| !seen.insert(p.as_str()));
        rules.ensure("permissions", !duplicated, "Role.Fields.Permissions.Unique");

        rules.finish()
    }
}

pub fn task_service_with(messages: Arc<Messages>) -> Arc<InMemoryCrudService<Uuid, TaskModel>> {
    Arc::new(InMemoryCrudService::new("tasks").with_validator(TaskValidator::new(messages)))
}

pub fn task_service() -> Arc<InMemoryCrudService<Uuid, TaskModel>> {
    task_service_with(Arc::new(Messages::new()))
}

/// The task backend used by the HTTP suite: managers hold every task
/// permission, viewers only `tasks.view`.
pub fn task_app(service: Arc<InMemoryCrudService<Uuid, TaskModel>>) -> Router {
    let authorizer: Arc<dyn Authorizer> = Arc::new(
        GrantsAuthorizer::new()
            .grant_role(
                "manager",
                ["tasks.view", "tasks.create", "tasks.edit", "tasks.delete"],
            )
            .grant_role("viewer", ["tasks.view"]),
    );

    AppBuilder::new()
        .mount(
            "/api/tasks",
            crud_routes(CrudState::new("tasks", service, authorizer)),
        )
        .build()
}
