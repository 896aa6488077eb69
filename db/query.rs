use std::fmt;

/// Completion-state predicate of the list query
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

/// Ordering rule of the list query
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Sort {
    #[default]
    Created,
    Priority,
    Task,
}

impl Filter {
    /// Unrecognized and missing values fall back to [`Filter::All`]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("active") => Filter::Active,
            Some("completed") => Filter::Completed,
            _ => Filter::All,
        }
    }

    pub fn where_clause(self) -> &'static str {
        match self {
            Filter::All => "",
            Filter::Active => "WHERE is_done = 0",
            Filter::Completed => "WHERE is_done = 1",
        }
    }
}

impl Sort {
    /// Unrecognized and missing values fall back to [`Sort::Created`]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("priority") => Sort::Priority,
            Some("task") => Sort::Task,
            _ => Sort::Created,
        }
    }

    // trailing id keys only settle identical timestamps or texts
    pub fn order_clause(self) -> &'static str {
        match self {
            Sort::Created => "ORDER BY created_at DESC, id DESC",
            Sort::Priority => "ORDER BY priority DESC, created_at DESC, id DESC",
            Sort::Task => "ORDER BY task COLLATE NOCASE ASC, id ASC",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        })
    }
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sort::Created => "created",
            Sort::Priority => "priority",
            Sort::Task => "task",
        })
    }
}

/// Maps a filter and sort pair into its `WHERE` and `ORDER BY` clauses
pub fn clauses(filter: Filter, sort: Sort) -> (&'static str, &'static str) {
    (filter.where_clause(), sort.order_clause())
}

pub(crate) fn select_tasks(filter: Filter, sort: Sort) -> String {
    let (where_clause, order_clause) = clauses(filter, sort);
    format!("SELECT id, task, is_done, priority, created_at, updated_at FROM todos {where_clause} {order_clause}")
}
