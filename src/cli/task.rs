//! td task command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::slug::{slug_for_title, validate_id};
use crate::state::{parse_state_arg, State};
use crate::storage::TaskStore;
use crate::task::{sort_tasks, ListFilter, StateCounts, Task};

use super::prompt;

/// Per-invocation settings shared by every command.
pub struct Context {
    pub start: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

impl Context {
    pub fn store(&self) -> Result<TaskStore> {
        TaskStore::discover(&self.start)
    }

    pub fn output(&self) -> OutputOptions {
        OutputOptions {
            json: self.json,
            quiet: self.quiet,
        }
    }
}

pub struct AddOptions {
    pub title: String,
    pub parent: Option<String>,
    pub state: Option<String>,
    pub custom_id: Option<String>,
    pub notes: Option<String>,
}

pub struct EditOptions {
    pub id: String,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub parent: Option<String>,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
}

#[derive(Serialize)]
struct TaskStateOutput<'a> {
    id: &'a str,
    from: State,
    to: State,
}

#[derive(Serialize)]
struct TaskEditOutput<'a> {
    id: &'a str,
    changed: bool,
    task: &'a Task,
}

#[derive(Serialize)]
struct TaskDeleteOutput<'a> {
    id: &'a str,
}

pub fn run_add(ctx: &Context, clock: &dyn Clock, options: AddOptions) -> Result<()> {
    let store = ctx.store()?;
    let title = options.title.trim();
    if title.is_empty() {
        return Err(Error::invalid("title", options.title.as_str()));
    }

    let state = match options.state.as_deref() {
        Some(value) => parse_state_arg(value)?,
        None => store.config().tasks.default_state(),
    };

    let id = match options.custom_id {
        Some(custom) => {
            let custom = custom.trim().to_string();
            validate_id(&custom)?;
            custom
        }
        None => store.resolve_unique_id(&slug_for_title(title)?)?,
    };

    let mut task = Task::new(id, title, state, clock.now());
    task.parent = non_empty(options.parent);
    task.notes = free_text(options.notes);
    store.create(&task)?;

    emit_success(
        ctx.output(),
        "add",
        &task,
        Some(&HumanOutput::new(task.id.clone())),
    )
}

pub fn run_set_state(ctx: &Context, clock: &dyn Clock, input: &str, state: State) -> Result<()> {
    let store = ctx.store()?;
    let id = store.resolve_id(input)?;
    let mut task = store.load(&id)?;
    let from = task.state;
    task.set_state(state, clock.now());
    store.save(&task)?;

    let output = TaskStateOutput {
        id: &id,
        from,
        to: state,
    };
    emit_success(
        ctx.output(),
        state.as_str(),
        &output,
        Some(&HumanOutput::new(format!("{id} → {state}"))),
    )
}

pub fn run_ls(ctx: &Context, state: Option<&str>, all: bool) -> Result<()> {
    let store = ctx.store()?;
    let filter = ListFilter {
        state: state.map(parse_state_arg).transpose()?,
        include_done: all,
    };

    let mut tasks = store.load_all()?;
    filter.apply(&mut tasks);
    sort_tasks(&mut tasks);

    let human = render_table(&tasks);
    let output = TaskListOutput {
        total: tasks.len(),
        tasks,
    };
    emit_success(ctx.output(), "ls", &output, Some(&human))
}

pub fn run_show(ctx: &Context, input: &str) -> Result<()> {
    let store = ctx.store()?;
    let id = store.resolve_id(input)?;
    let task = store.load(&id)?;

    let mut human = HumanOutput::new(format!("id:      {}", task.id));
    human.push_line(format!("title:   {}", task.title));
    human.push_line(format!("state:   {}", task.state));
    if let Some(parent) = task.parent.as_deref() {
        human.push_line(format!("parent:  {parent}"));
    }
    if let Some(notes) = task.notes.as_deref() {
        human.push_line(format!("notes:   {notes}"));
    }
    human.push_line(format!("created: {}", task.created.to_rfc3339()));
    human.push_line(format!("updated: {}", task.updated.to_rfc3339()));

    emit_success(ctx.output(), "show", &task, Some(&human))
}

pub fn run_edit(ctx: &Context, clock: &dyn Clock, options: EditOptions) -> Result<()> {
    let store = ctx.store()?;
    let id = store.resolve_id(&options.id)?;
    let mut task = store.load(&id)?;
    let now = clock.now();
    let mut changed = false;

    if let Some(title) = options.title.as_deref() {
        task.set_title(title, now)?;
        changed = true;
    }
    if let Some(notes) = options.notes {
        task.set_notes(free_text(Some(notes)), now);
        changed = true;
    }
    if let Some(parent) = options.parent {
        task.set_parent(non_empty(Some(parent)), now);
        changed = true;
    }

    let human = if changed {
        store.save(&task)?;
        HumanOutput::new(format!("Updated {id}"))
    } else {
        HumanOutput::new("Nothing to update.")
    };

    let output = TaskEditOutput {
        id: &id,
        changed,
        task: &task,
    };
    emit_success(ctx.output(), "edit", &output, Some(&human))
}

pub fn run_mv(ctx: &Context, clock: &dyn Clock, input: &str, parent: &str) -> Result<()> {
    let store = ctx.store()?;
    let id = store.resolve_id(input)?;
    let mut task = store.load(&id)?;
    let parent = non_empty(Some(parent.to_string()));
    task.set_parent(parent.clone(), clock.now());
    store.save(&task)?;

    let mut human = match parent.as_deref() {
        Some(parent) => HumanOutput::new(format!("Moved {id} → {parent}")),
        None => HumanOutput::new(format!("Moved {id} to top level")),
    };
    if let Some(parent) = parent.as_deref() {
        if !store.exists(parent) {
            human.push_warning(format!("parent '{parent}' does not exist"));
        }
    }
    emit_success(ctx.output(), "mv", &task, Some(&human))
}

pub fn run_rm(ctx: &Context, input: &str, force: bool) -> Result<()> {
    let store = ctx.store()?;
    // Existence is checked before asking, so a declined prompt never reaches the store.
    let id = store.resolve_id(input)?;
    store.load(&id)?;

    if !force && !prompt::confirm(&format!("Delete task '{id}'?"))? {
        return Err(Error::Aborted);
    }

    store.delete(&id)?;
    emit_success(
        ctx.output(),
        "rm",
        &TaskDeleteOutput { id: &id },
        Some(&HumanOutput::new(format!("Deleted {id}"))),
    )
}

pub fn run_status(ctx: &Context) -> Result<()> {
    let store = ctx.store()?;
    let tasks = store.load_all()?;
    let counts = StateCounts::from_tasks(&tasks);

    let mut parts: Vec<String> = State::ALL
        .iter()
        .map(|state| format!("{state}: {}", counts.get(*state)))
        .collect();
    parts.push(format!("total: {}", counts.total));

    emit_success(
        ctx.output(),
        "status",
        &counts,
        Some(&HumanOutput::new(parts.join("  "))),
    )
}

fn render_table(tasks: &[Task]) -> HumanOutput {
    if tasks.is_empty() {
        return HumanOutput::new("No tasks.");
    }

    let id_width = tasks.iter().map(|t| t.id.len()).max().unwrap_or(0).max(2);
    let state_width = tasks
        .iter()
        .map(|t| t.state.as_str().len())
        .max()
        .unwrap_or(0)
        .max(5);

    let mut human = HumanOutput::new(format!(
        "{:<state_width$}  {:<id_width$}  TITLE",
        "STATE", "ID"
    ));
    for task in tasks {
        human.push_line(format!(
            "{:<state_width$}  {:<id_width$}  {}",
            task.state.as_str(),
            task.id,
            task.title
        ));
    }
    human
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Blank text clears the field; anything else is kept verbatim.
fn free_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn table_aligns_columns() {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let tasks = vec![
            Task::new("a", "First", State::Focus, now),
            Task::new("longer-id", "Second", State::Later, now),
        ];
        let human = render_table(&tasks);
        assert_eq!(
            human.lines(),
            [
                "STATE  ID         TITLE",
                "focus  a          First",
                "later  longer-id  Second",
            ]
        );
    }

    #[test]
    fn empty_table_says_so() {
        assert_eq!(render_table(&[]).lines(), ["No tasks."]);
    }

    #[test]
    fn non_empty_clears_blank_values() {
        assert_eq!(non_empty(Some("  ".to_string())), None);
        assert_eq!(non_empty(Some(" p ".to_string())), Some("p".to_string()));
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn free_text_keeps_whitespace() {
        assert_eq!(free_text(Some(" \n ".to_string())), None);
        assert_eq!(free_text(Some(" a\n".to_string())), Some(" a\n".to_string()));
        assert_eq!(free_text(None), None);
    }
}
