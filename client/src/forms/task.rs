use shared::{CreateTaskRequest, EnergyTag, Task, TaskStatus};
use validator::Validate;

use super::{field_messages, Notice, Phase};
use crate::api::ApiClient;
use crate::error::ClientError;
use crate::format;
use crate::transport::Transport;

pub const TITLE_REQUIRED: &str = "Task title is required";
pub const TITLE_TOO_LONG: &str = "Task title must be at most 500 characters";
pub const PRIORITY_OUT_OF_RANGE: &str = "Priority must be between 1 and 5";
pub const ESTIMATE_OUT_OF_RANGE: &str = "Estimated minutes must be between 5 and 480";
pub const DUE_AT_INVALID: &str = "Due time is not a valid date";
pub const TASK_CREATED: &str = "Task created";
pub const TASK_FAILED: &str = "Something went wrong";

pub const DEFAULT_PRIORITY: u8 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub priority: u8,
    pub estimated_minutes: Option<u32>,
    /// Raw `datetime-local` value, blank when unset
    pub due_at: String,
    pub energy_tag: Option<EnergyTag>,
    /// Tasks created in this session, in creation order
    pub tasks: Vec<Task>,
    pub phase: Phase,
    pub errors: Vec<String>,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskFormAction {
    Title(String),
    Priority(u8),
    EstimatedMinutes(Option<u32>),
    DueAt(String),
    EnergyTag(Option<EnergyTag>),
    Invalid(Vec<String>),
    Submitting,
    Completed(Result<Task, ClientError>),
    /// Local, optimistic status change
    Advance { task_id: String, status: TaskStatus },
}

impl Default for TaskForm {
    fn default() -> Self {
        Self::with_tasks(Vec::new())
    }
}

impl TaskForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            title: String::new(),
            priority: DEFAULT_PRIORITY,
            estimated_minutes: None,
            due_at: String::new(),
            energy_tag: None,
            tasks,
            phase: Phase::Idle,
            errors: Vec::new(),
            notice: None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == Phase::Submitting
    }

    /// Build the request, or the messages explaining why it cannot be sent.
    ///
    /// A blank title short-circuits with [`TITLE_REQUIRED`] alone.
    pub fn validate(&self) -> Result<CreateTaskRequest, Vec<String>> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(vec![TITLE_REQUIRED.to_string()]);
        }

        let mut messages = Vec::new();
        let due_at = if self.due_at.trim().is_empty() {
            None
        } else {
            let parsed = format::parse_input(&self.due_at);
            if parsed.is_none() {
                messages.push(DUE_AT_INVALID.to_string());
            }
            parsed
        };

        let request = CreateTaskRequest {
            title: title.to_string(),
            priority: Some(self.priority),
            estimated_minutes: self.estimated_minutes,
            due_at,
            energy_tag: self.energy_tag,
        };

        if let Err(errors) = request.validate() {
            messages.extend(field_messages(
                &errors,
                &[
                    ("title", TITLE_TOO_LONG),
                    ("priority", PRIORITY_OUT_OF_RANGE),
                    ("estimated_minutes", ESTIMATE_OUT_OF_RANGE),
                ],
            ));
        }

        if messages.is_empty() {
            Ok(request)
        } else {
            Err(messages)
        }
    }

    pub fn apply(&mut self, action: TaskFormAction) {
        match action {
            TaskFormAction::Title(title) => self.title = title,
            TaskFormAction::Priority(priority) => self.priority = priority,
            TaskFormAction::EstimatedMinutes(minutes) => self.estimated_minutes = minutes,
            TaskFormAction::DueAt(due_at) => self.due_at = due_at,
            TaskFormAction::EnergyTag(tag) => self.energy_tag = tag,
            TaskFormAction::Invalid(messages) => {
                self.errors = messages;
                self.notice = None;
                self.phase = Phase::Idle;
            }
            TaskFormAction::Submitting => {
                self.errors.clear();
                self.notice = None;
                self.phase = Phase::Submitting;
            }
            TaskFormAction::Completed(Ok(task)) => {
                tracing::info!(task_id = %task.id, "task created");
                self.tasks.push(task);
                self.notice = Some(Notice::Success(TASK_CREATED));
                self.phase = Phase::Idle;
                self.reset_fields();
            }
            TaskFormAction::Completed(Err(e)) => {
                tracing::warn!(error = %e, "task creation failed");
                self.notice = Some(Notice::Error(TASK_FAILED));
                self.phase = Phase::Idle;
            }
            TaskFormAction::Advance { task_id, status } => {
                if let Some(task) = self.tasks.iter_mut().find(|t| t.id == task_id) {
                    if task.status.can_transition_to(status) {
                        task.status = status;
                    } else {
                        tracing::debug!(%task_id, from = %task.status, to = %status, "ignoring status change");
                    }
                }
            }
        }
    }

    /// Validate and submit in one go; returns the created task on success
    pub async fn submit<T: Transport>(&mut self, api: &ApiClient<T>) -> Option<Task> {
        let request = match self.validate() {
            Ok(request) => request,
            Err(messages) => {
                self.apply(TaskFormAction::Invalid(messages));
                return None;
            }
        };

        self.apply(TaskFormAction::Submitting);
        let result = api.create_task(&request).await;
        let created = result.as_ref().ok().cloned();
        self.apply(TaskFormAction::Completed(result));
        created
    }

    fn reset_fields(&mut self) {
        self.title.clear();
        self.priority = DEFAULT_PRIORITY;
        self.estimated_minutes = None;
        self.due_at.clear();
        self.energy_tag = None;
    }
}
