//! Tab navigation and the selection handed between tabs.

use std::fmt;

use shared::{SlotSuggestion, Task};

use crate::forms::{TaskForm, TaskFormAction};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Tasks,
    Slots,
    Events,
    Integrations,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Self::Tasks, Self::Slots, Self::Events, Self::Integrations];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Tasks => "Tasks",
            Self::Slots => "Slots",
            Self::Events => "Events",
            Self::Integrations => "Integrations",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageAction {
    Open(Tab),
    SelectTask(Task),
    SelectSlot(SlotSuggestion),
    /// Task form and list, kept here so they outlive the Tasks tab
    Task(TaskFormAction),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageState {
    pub active: Tab,
    pub selected_task: Option<Task>,
    pub selected_slot: Option<SlotSuggestion>,
    pub tasks: TaskForm,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slots need a task to suggest for
    pub fn is_enabled(&self, tab: Tab) -> bool {
        tab != Tab::Slots || self.selected_task.is_some()
    }

    /// Title to pre-populate the event form with
    pub fn event_title(&self) -> Option<&str> {
        self.selected_task.as_ref().map(|t| t.title.as_str())
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::Open(tab) => {
                if self.is_enabled(tab) {
                    self.active = tab;
                }
            }
            PageAction::SelectTask(task) => {
                if self.selected_task.as_ref().map(|t| &t.id) != Some(&task.id) {
                    self.selected_slot = None;
                }
                self.selected_task = Some(task);
            }
            PageAction::SelectSlot(slot) => {
                self.selected_slot = Some(slot);
                self.active = Tab::Events;
            }
            PageAction::Task(action) => {
                self.tasks.apply(action);
                // Keep the selection in step with optimistic status changes
                if let Some(selected) = &mut self.selected_task {
                    if let Some(task) = self.tasks.tasks.iter().find(|t| t.id == selected.id) {
                        *selected = task.clone();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::task;
    use pretty_assertions::assert_eq;
    use shared::TaskStatus;

    fn slot() -> SlotSuggestion {
        SlotSuggestion {
            start_at: "2025-08-13T09:00:00Z".parse().unwrap(),
            end_at: "2025-08-13T10:30:00Z".parse().unwrap(),
            score: 1.85,
        }
    }

    #[test]
    fn slots_tab_locked_until_task_selected() {
        let mut page = PageState::new();
        assert!(!page.is_enabled(Tab::Slots));

        page.apply(PageAction::Open(Tab::Slots));
        assert_eq!(page.active, Tab::Tasks);

        page.apply(PageAction::SelectTask(task("task-1", "Write report")));
        page.apply(PageAction::Open(Tab::Slots));
        assert_eq!(page.active, Tab::Slots);
    }

    #[test]
    fn selecting_slot_switches_to_events_unchanged() {
        let mut page = PageState::new();
        page.apply(PageAction::SelectTask(task("task-1", "Write report")));
        page.apply(PageAction::SelectSlot(slot()));

        assert_eq!(page.active, Tab::Events);
        assert_eq!(page.selected_slot, Some(slot()));
        assert_eq!(page.event_title(), Some("Write report"));
    }

    #[test]
    fn new_task_drops_stale_slot() {
        let mut page = PageState::new();
        page.apply(PageAction::SelectTask(task("task-1", "A")));
        page.apply(PageAction::SelectSlot(slot()));

        page.apply(PageAction::SelectTask(task("task-1", "A")));
        assert!(page.selected_slot.is_some());

        page.apply(PageAction::SelectTask(task("task-2", "B")));
        assert_eq!(page.selected_slot, None);
    }

    #[test]
    fn task_list_survives_tab_switches() {
        let mut page = PageState::new();
        page.apply(PageAction::Task(TaskFormAction::Completed(Ok(task(
            "task-1",
            "Write report",
        )))));
        page.apply(PageAction::SelectTask(task("task-1", "Write report")));
        page.apply(PageAction::Task(TaskFormAction::Advance {
            task_id: "task-1".into(),
            status: TaskStatus::InProgress,
        }));

        page.apply(PageAction::Open(Tab::Events));
        page.apply(PageAction::Open(Tab::Tasks));

        assert_eq!(page.active, Tab::Tasks);
        assert_eq!(page.tasks.tasks.len(), 1);
        assert_eq!(page.tasks.tasks[0].status, TaskStatus::InProgress);
        assert_eq!(
            page.selected_task.as_ref().map(|t| t.status),
            Some(TaskStatus::InProgress)
        );
    }
}
