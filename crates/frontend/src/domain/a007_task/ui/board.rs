use super::view_model::AssignmentBoardVm;
use crate::shared::components::error_panel::ErrorPanel;
use crate::shared::components::ui::badge::Badge as UiBadge;
use crate::shared::date_utils::{format_opt_date, EMPTY_CELL};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_WORKSPACE;
use crate::shared::request_guard::use_request_guard;
use contracts::domain::a007_task::aggregate::{Technician, TechnicianTask};
use leptos::prelude::*;
use thaw::*;

/// Unassigned tasks on the left, technicians on the right. Picking a task
/// re-ranks the technicians for its required skill.
#[component]
pub fn TaskAssignmentBoard() -> impl IntoView {
    let vm = AssignmentBoardVm::new(use_request_guard());

    Effect::new(move |_| {
        if !vm.is_loaded.get_untracked() {
            vm.load();
        }
    });

    let queue = Memo::new(move |_| vm.queue());
    let ranked = Memo::new(move |_| vm.ranked());
    let error = Signal::derive(move || vm.error.get());

    view! {
        <PageFrame page_id="a007_task--board" category=PAGE_CAT_WORKSPACE>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Technician assignment"</h1>
                    <UiBadge variant="warning".to_string()>
                        {move || queue.with(|q| q.len()).to_string()}
                    </UiBadge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| vm.load()
                        disabled=Signal::derive(move || vm.loading.get())
                    >
                        {move || if vm.loading.get() { "Loading..." } else { "Refresh" }}
                    </Button>
                </div>
            </div>

            <ErrorPanel error=error on_retry=Callback::new(move |_| vm.load()) />
            {move || vm.notice.get().map(|n| view! { <div class="alert alert--success">{n}</div> })}

            <div class="board">
                <section class="board__column">
                    <h2 class="board__title">"Unassigned tasks"</h2>
                    <Show
                        when=move || !queue.with(|q| q.is_empty())
                        fallback=move || view! {
                            <div class="board__empty">
                                {move || if vm.is_loaded.get() { "Every task has a technician." } else { "" }}
                            </div>
                        }
                    >
                        <For
                            each=move || queue.get()
                            key=|task| (task.id, task.priority)
                            children=move |task| view! { <TaskCard task=task vm=vm /> }
                        />
                    </Show>
                </section>

                <section class="board__column">
                    <h2 class="board__title">
                        "Technicians"
                        {move || vm.selected().and_then(|t| t.required_skill).map(|skill| view! {
                            <span class="board__hint">{format!(" · skill: {}", skill)}</span>
                        })}
                    </h2>
                    <Show when=move || vm.selected_task.get().is_some()>
                        <div class="board__note">
                            <Label>"Note for the technician"</Label>
                            <Input value=vm.note placeholder="Optional" />
                        </div>
                    </Show>
                    <For
                        each=move || ranked.get()
                        key=|t| (t.id, t.active_tasks, t.available)
                        children=move |technician| view! { <TechnicianCard technician=technician vm=vm /> }
                    />
                </section>
            </div>
        </PageFrame>
    }
}

#[component]
fn TaskCard(task: TechnicianTask, vm: AssignmentBoardVm) -> impl IntoView {
    let id = task.id;
    let today = chrono::Local::now().date_naive();
    let overdue = task.is_overdue(today);
    let is_selected = move || vm.selected_task.get() == Some(id);

    view! {
        <div
            class="task-card"
            class:task-card--selected=is_selected
            class:task-card--overdue=overdue
            on:click=move |_| {
                vm.notice.set(None);
                vm.selected_task.update(|s| *s = if *s == Some(id) { None } else { Some(id) });
            }
        >
            <div class="task-card__header">
                <span class="task-card__title">{task.title.clone()}</span>
                <UiBadge variant=task.priority.badge_variant().to_string()>{task.priority.label()}</UiBadge>
            </div>
            <div class="task-card__meta">
                <span>{task.customer_name.clone().unwrap_or_else(|| EMPTY_CELL.to_string())}</span>
                <span>"Due: " {format_opt_date(task.due_date)}</span>
                {task.required_skill.clone().map(|s| view! { <span class="task-card__skill">{s}</span> })}
            </div>
            {task.description.clone().map(|d| view! { <div class="task-card__description">{d}</div> })}
        </div>
    }
}

#[component]
fn TechnicianCard(technician: Technician, vm: AssignmentBoardVm) -> impl IntoView {
    let has_capacity = technician.has_capacity();
    let workload = technician.workload_percent();
    let stored = StoredValue::new(technician.clone());
    let skill_match = move || {
        vm.selected()
            .and_then(|t| t.required_skill)
            .is_some_and(|skill| stored.with_value(|t| t.has_skill(&skill)))
    };
    let assign_disabled = Signal::derive(move || {
        !has_capacity || vm.busy.get() || vm.selected_task.get().is_none()
    });

    view! {
        <div class="technician-card" class:technician-card--full=!has_capacity>
            <div class="technician-card__header">
                <span class="technician-card__name">{technician.name.clone()}</span>
                {move || skill_match().then(|| view! { <UiBadge variant="success".to_string()>"skill match"</UiBadge> })}
                {(!technician.available).then(|| view! { <UiBadge variant="neutral".to_string()>"unavailable"</UiBadge> })}
            </div>
            <div class="technician-card__skills">{technician.skills.join(", ")}</div>
            <div class="technician-card__workload">
                <div class="workload-bar">
                    <div
                        class=format!("workload-bar__fill workload-bar__fill--{}", technician.workload_variant())
                        style=format!("width: {}%;", workload)
                    ></div>
                </div>
                <span class="technician-card__load">
                    {format!("{}/{} tasks", technician.active_tasks, technician.max_tasks)}
                </span>
            </div>
            <Button
                appearance=ButtonAppearance::Primary
                size=ButtonSize::Small
                disabled=assign_disabled
                on_click=move |_| stored.with_value(|t| vm.assign(t))
            >
                {if has_capacity { "Assign" } else { "At capacity" }}
            </Button>
        </div>
    }
}
