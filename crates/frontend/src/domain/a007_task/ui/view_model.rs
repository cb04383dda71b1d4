use crate::domain::a007_task::api;
use crate::shared::request_guard::RequestGuard;
use contracts::domain::a007_task::aggregate::{
    rank_technicians, TaskAssignment, Technician, TechnicianTask,
};
use contracts::shared::list_query::{sort_items, SortOrder};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Open tasks nobody has taken yet, most urgent first. Within one priority,
/// undated tasks lead, then by due date.
pub fn unassigned_queue(tasks: &[TechnicianTask]) -> Vec<TechnicianTask> {
    let mut queue: Vec<TechnicianTask> = tasks.iter().filter(|t| t.is_unassigned()).cloned().collect();
    sort_items(&mut queue, "dueDate", SortOrder::Asc);
    sort_items(&mut queue, "priority", SortOrder::Desc);
    queue
}

#[derive(Clone, Copy)]
pub struct AssignmentBoardVm {
    pub tasks: RwSignal<Vec<TechnicianTask>>,
    pub technicians: RwSignal<Vec<Technician>>,
    pub selected_task: RwSignal<Option<i64>>,
    pub note: RwSignal<String>,
    pub error: RwSignal<Option<String>>,
    pub notice: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub busy: RwSignal<bool>,
    pub is_loaded: RwSignal<bool>,
    guard: StoredValue<RequestGuard>,
}

impl AssignmentBoardVm {
    pub fn new(guard: StoredValue<RequestGuard>) -> Self {
        Self {
            tasks: RwSignal::new(Vec::new()),
            technicians: RwSignal::new(Vec::new()),
            selected_task: RwSignal::new(None),
            note: RwSignal::new(String::new()),
            error: RwSignal::new(None),
            notice: RwSignal::new(None),
            loading: RwSignal::new(false),
            busy: RwSignal::new(false),
            is_loaded: RwSignal::new(false),
            guard,
        }
    }

    pub fn queue(&self) -> Vec<TechnicianTask> {
        self.tasks.with(|t| unassigned_queue(t))
    }

    pub fn selected(&self) -> Option<TechnicianTask> {
        let id = self.selected_task.get()?;
        self.tasks.with(|t| t.iter().find(|task| task.id == id).cloned())
    }

    /// Technicians in picker order for the selected task.
    pub fn ranked(&self) -> Vec<Technician> {
        let skill = self.selected().and_then(|t| t.required_skill);
        self.technicians.with(|t| rank_technicians(t, skill.as_deref()))
    }

    pub fn load(&self) {
        let vm = *self;
        let ticket = vm.guard.get_value().begin();
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let tasks = api::fetch_tasks().await;
            let technicians = if tasks.is_ok() {
                Some(api::fetch_technicians().await)
            } else {
                None
            };
            ticket.commit(move || {
                match (tasks, technicians) {
                    (Ok(tasks), Some(Ok(technicians))) => {
                        log::debug!(
                            "assignment board: {} tasks, {} technicians",
                            tasks.len(),
                            technicians.len()
                        );
                        // Drop a selection that is no longer in the queue.
                        let still_open = vm
                            .selected_task
                            .get_untracked()
                            .is_some_and(|id| tasks.iter().any(|t| t.id == id && t.is_unassigned()));
                        if !still_open {
                            vm.selected_task.set(None);
                        }
                        vm.tasks.set(tasks);
                        vm.technicians.set(technicians);
                        vm.is_loaded.set(true);
                    }
                    (Err(e), _) | (_, Some(Err(e))) => vm.error.set(Some(e.to_string())),
                    (Ok(_), None) => {}
                }
                vm.loading.set(false);
            });
        });
    }

    pub fn assign(&self, technician: &Technician) {
        let vm = *self;
        let Some(task_id) = vm.selected_task.get_untracked() else {
            vm.error.set(Some("Select a task first.".to_string()));
            return;
        };
        if !technician.has_capacity() {
            vm.error.set(Some(format!("{} has no free capacity.", technician.name)));
            return;
        }

        let note = vm.note.get_untracked().trim().to_string();
        let assignment = TaskAssignment {
            task_id,
            technician_id: technician.id,
            note: (!note.is_empty()).then_some(note),
        };
        let technician_name = technician.name.clone();
        let guard = vm.guard.get_value();
        vm.busy.set(true);
        vm.error.set(None);
        spawn_local(async move {
            let result = api::assign_task(&assignment).await;
            if guard.is_disposed() {
                return;
            }
            vm.busy.set(false);
            match result {
                Ok(task) => {
                    log::info!("task {} assigned to technician {}", task.id, assignment.technician_id);
                    vm.notice.set(Some(format!("\"{}\" assigned to {}", task.title, technician_name)));
                    vm.selected_task.set(None);
                    vm.note.set(String::new());
                    vm.load();
                }
                Err(e) => vm.error.set(Some(e.to_string())),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::domain::a007_task::aggregate::{Priority, TaskStatus};

    fn task(id: i64, priority: Priority, due: Option<(i32, u32, u32)>, technician: Option<i64>) -> TechnicianTask {
        TechnicianTask {
            id,
            title: format!("Task {id}"),
            description: None,
            service_request_id: None,
            customer_name: None,
            required_skill: None,
            technician_id: technician,
            technician_name: None,
            priority,
            status: if technician.is_some() { TaskStatus::Assigned } else { TaskStatus::Open },
            due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        }
    }

    #[test]
    fn test_queue_order_and_filter() {
        let tasks = vec![
            task(1, Priority::Low, Some((2024, 5, 1)), None),
            task(2, Priority::Urgent, Some((2024, 6, 9)), None),
            task(3, Priority::Urgent, Some((2024, 6, 2)), None),
            task(4, Priority::High, None, Some(7)),
            task(5, Priority::Medium, None, None),
        ];
        let ids: Vec<i64> = unassigned_queue(&tasks).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 5, 1]);
    }
}
