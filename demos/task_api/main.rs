//! Minimal task backend built on the CRUD scaffolding.
//!
//! Run with `cargo run --example task_api`, then:
//!
//! ```text
//! curl -H 'x-user-id: 11111111-1111-1111-1111-111111111111' \
//!      -H 'x-roles: manager' \
//!      -H 'content-type: application/json' \
//!      -d '{"title":"write the brief"}' \
//!      http://127.0.0.1:3000/api/tasks
//! ```
//!
//! Point `TASK_API_CONFIG` at a YAML file to change the bind address.

use crudkit::prelude::*;
use std::sync::Arc;

const MESSAGES: &str = include_str!("messages.yaml");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
enum TaskState {
    #[default]
    Todo,
    InProgress,
    Done,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TaskModel {
    #[serde(default)]
    id: Uuid,
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    state: TaskState,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    modified_at: Option<DateTime<Utc>>,
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

struct TaskValidator {
    messages: Arc<Messages>,
}

#[async_trait]
impl ModelValidator<TaskModel> for TaskValidator {
    async fn validate(&self, model: &TaskModel) -> Vec<FieldError> {
        let mut rules = Rules::new(&self.messages);
        rules
            .required("title", &model.title, "Task.Fields.Title.Required")
            .max_length("title", &model.title, 256, "Task.Fields.Title.MaximumLength");
        if let Some(description) = &model.description {
            rules.max_length(
                "description",
                description,
                1024,
                "Task.Fields.Description.MaximumLength",
            );
        }
        rules.finish()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match std::env::var("TASK_API_CONFIG") {
        Ok(path) => ServerConfig::from_yaml_file(path)?,
        Err(_) => ServerConfig::default(),
    };
    let messages = Arc::new(Messages::from_yaml_str(MESSAGES)?);

    let service = Arc::new(
        InMemoryCrudService::<Uuid, TaskModel>::new("tasks")
            .with_validator(TaskValidator { messages }),
    );
    let authorizer: Arc<dyn Authorizer> = Arc::new(
        GrantsAuthorizer::new()
            .grant_role(
                "manager",
                ["tasks.view", "tasks.create", "tasks.edit", "tasks.delete"],
            )
            .grant_role("viewer", ["tasks.view"]),
    );

    let state = CrudState::new("tasks", service, authorizer);

    AppBuilder::new()
        .mount("/api/tasks", crud_routes(state))
        .with_permissive_cors(config.permissive_cors)
        .serve(&config.bind_addr)
        .await
}
