use crate::*;

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct NewTaskForm {
    pub task: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateForm {
    pub id: Option<String>,
    pub done: Option<String>,
    pub task: Option<String>,
    pub priority: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub todos: Vec<Task>,
    pub count: usize,
}

pub async fn add_task(
    State(store): State<Store>,
    Vals(form): Vals<NewTaskForm>,
) -> Result<Success<NewTask>> {
    let text = TaskText::parse(form.task.as_deref().unwrap_or_default())?;
    let priority = form
        .priority
        .as_deref()
        .map(Priority::parse)
        .unwrap_or_default();
    let task = store.insert(&text, priority, now()).await.failed_to(Op::Add)?;
    debug!(id = %task.id, "added task");
    Ok(Success::new(task.into()))
}

pub async fn get_tasks(
    State(store): State<Store>,
    Vals(params): Vals<ListParams>,
) -> Result<Success<TaskList>> {
    let filter = Filter::from_param(params.filter.as_deref());
    let sort = Sort::from_param(params.sort.as_deref());
    let todos = store.list(filter, sort).await.failed_to(Op::Fetch)?;
    trace!(%filter, %sort, count = todos.len(), "listed tasks");
    Ok(Success::new(TaskList {
        count: todos.len(),
        todos,
    }))
}

pub async fn update_task(
    State(store): State<Store>,
    Vals(form): Vals<UpdateForm>,
) -> Result<Success<Message>> {
    let id = TaskId::parse(form.id.as_deref())?;
    let change = Change::pick(
        form.done.as_deref(),
        form.task.as_deref(),
        form.priority.as_deref(),
    )?;
    if !store.update(id, &change, now()).await.failed_to(Op::Update)? {
        return Err(Error::NotFound);
    }
    debug!(%id, ?change, "updated task");
    Ok(Success::message("Task updated"))
}

pub async fn delete_task(
    State(store): State<Store>,
    Vals(form): Vals<DeleteForm>,
) -> Result<Success<Message>> {
    let id = TaskId::parse(form.id.as_deref())?;
    if !store.delete(id).await.failed_to(Op::Delete)? {
        return Err(Error::NotFound);
    }
    debug!(%id, "deleted task");
    Ok(Success::message("Task deleted"))
}
