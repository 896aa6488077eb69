//! Browser client: a server-rendered page shell plus the script that drives it
//! through the JSON API. The script owns only the current filter and sort.

use crate::*;

mod head;
pub use head::*;

use maud::{html, Markup, DOCTYPE};

pub const APP_JS: &str = include_str!("../assets/app.js");
pub const STYLE_CSS: &str = include_str!("../assets/style.css");

pub fn page_routes() -> Router<Store> {
    Router::new()
        .route("/", get(index))
        .route("/assets/app.js", get(script))
        .route("/assets/style.css", get(stylesheet))
}

async fn index() -> Markup {
    page("My Tasks")
}

async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

pub fn page(title: &str) -> Markup {
    html! { (DOCTYPE) html lang="en" {
        (Head::default().title(title).css("/assets/style.css").theme_color("#4f46e5"))
        body {
            div.container {
                header {
                    h1 {"✓ " (title)}
                    div.stats {
                        span #totalTasks {"0"} " tasks · "
                        span #completedTasks {"0"} " completed"
                    }
                }
                form #todoForm {
                    div."input-group" {
                        input #taskInput type="text" name="task" placeholder="What needs to be done?"
                            maxlength=(MAX_TASK_CHARS) required;
                        select #prioritySelect name="priority" {
                            option value="0" {"Low"}
                            option value="1" selected {"Normal"}
                            option value="2" {"High"}
                        }
                        button."btn-add" type="submit" {"Add Task"}
                    }
                }
                div.filters {
                    @for (filter, label) in [(Filter::All, "All"), (Filter::Active, "Active"), (Filter::Completed, "Completed")] {
                        button."filter-btn" .active[filter == Filter::default()] data-filter=(filter.to_string()) {(label)}
                    }
                    div."sort-group" {
                        label for="sortSelect" {"Sort by:"}
                        select #sortSelect {
                            option value=(Sort::Created.to_string()) {"Date Added"}
                            option value=(Sort::Priority.to_string()) {"Priority"}
                            option value=(Sort::Task.to_string()) {"Name"}
                        }
                    }
                }
                div #emptyState ."empty-state" {
                    p {"No tasks yet. Add one to get started!"}
                }
                ul #todoList ."todo-list" {}
            }
            div #toast .toast {}
            script src="/assets/app.js" {}
        }
    }}
}
