//! td tree: parent/child rendering.
//!
//! The adjacency is rebuilt from the flat record list on every call. Parent
//! references are not validated by the store, so tasks whose parent is
//! missing or hidden are shown at the top level, and cycles are cut at the
//! first repeated task.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput};
use crate::state::State;
use crate::task::{sort_tasks, ListFilter, Task};

use super::task::Context;

#[derive(Debug, Serialize)]
pub struct TreeNode {
    pub id: String,
    pub title: String,
    pub state: State,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

pub fn run(ctx: &Context, root: Option<&str>) -> Result<()> {
    let store = ctx.store()?;
    let mut tasks = store.load_all()?;
    ListFilter::default().apply(&mut tasks);

    let root_id = match root {
        Some(input) => {
            let id = store.resolve_id(input)?;
            if !tasks.iter().any(|task| task.id == id) {
                return Err(Error::NotFound(id));
            }
            Some(id)
        }
        None => None,
    };

    let forest = build_forest(tasks, root_id.as_deref());
    let mut human = HumanOutput::empty();
    for node in &forest {
        render(node, 0, &mut human);
    }
    if forest.is_empty() {
        human.push_line("No tasks.");
    }

    emit_success(ctx.output(), "tree", &forest, Some(&human))
}

/// Arrange `tasks` into trees, either all of them or the one rooted at `root`.
pub fn build_forest(mut tasks: Vec<Task>, root: Option<&str>) -> Vec<TreeNode> {
    sort_tasks(&mut tasks);
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut children: HashMap<&str, Vec<&Task>> = HashMap::new();
    let mut tops: Vec<&Task> = Vec::new();
    for task in &tasks {
        match task.parent.as_deref() {
            Some(parent) if by_id.contains_key(parent) => {
                children.entry(parent).or_default().push(task);
            }
            _ => tops.push(task),
        }
    }

    let mut visited = HashSet::new();
    if let Some(root) = root {
        return by_id
            .get(root)
            .copied()
            .map(|task| vec![build_node(task, &children, &mut visited)])
            .unwrap_or_default();
    }

    let mut forest: Vec<TreeNode> = tops
        .into_iter()
        .map(|task| build_node(task, &children, &mut visited))
        .collect();

    // Members of parent cycles are unreachable from any top-level task.
    for task in &tasks {
        if !visited.contains(task.id.as_str()) {
            forest.push(build_node(task, &children, &mut visited));
        }
    }
    forest
}

fn build_node<'a>(
    task: &'a Task,
    children: &HashMap<&str, Vec<&'a Task>>,
    visited: &mut HashSet<&'a str>,
) -> TreeNode {
    visited.insert(task.id.as_str());

    let mut nodes = Vec::new();
    for kid in children.get(task.id.as_str()).into_iter().flatten() {
        if visited.contains(kid.id.as_str()) {
            continue;
        }
        nodes.push(build_node(kid, children, visited));
    }

    TreeNode {
        id: task.id.clone(),
        title: task.title.clone(),
        state: task.state,
        children: nodes,
    }
}

fn render(node: &TreeNode, depth: usize, human: &mut HumanOutput) {
    human.push_line(format!("{}{} [{}]", "  ".repeat(depth), node.id, node.state));
    for child in &node.children {
        render(child, depth + 1, human);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, state: State, parent: Option<&str>) -> Task {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut task = Task::new(id, id, state, now);
        task.parent = parent.map(str::to_string);
        task
    }

    fn lines(forest: &[TreeNode]) -> Vec<String> {
        let mut human = HumanOutput::empty();
        for node in forest {
            render(node, 0, &mut human);
        }
        human.lines().to_vec()
    }

    #[test]
    fn nests_children_under_parents() {
        let tasks = vec![
            task("root", State::Active, None),
            task("child", State::Later, Some("root")),
            task("grandchild", State::Focus, Some("child")),
            task("other", State::Focus, None),
        ];
        assert_eq!(
            lines(&build_forest(tasks, None)),
            vec![
                "other [focus]",
                "root [active]",
                "  child [later]",
                "    grandchild [focus]",
            ]
        );
    }

    #[test]
    fn dangling_parent_renders_at_top_level() {
        let tasks = vec![task("orphan", State::Active, Some("deleted"))];
        assert_eq!(lines(&build_forest(tasks, None)), vec!["orphan [active]"]);
    }

    #[test]
    fn cycles_are_cut() {
        let tasks = vec![
            task("a", State::Active, Some("b")),
            task("b", State::Active, Some("a")),
            task("self", State::Active, Some("self")),
        ];
        assert_eq!(
            lines(&build_forest(tasks, None)),
            vec!["a [active]", "  b [active]", "self [active]"]
        );
    }

    #[test]
    fn subtree_from_root() {
        let tasks = vec![
            task("root", State::Active, None),
            task("child", State::Active, Some("root")),
            task("elsewhere", State::Active, None),
        ];
        assert_eq!(
            lines(&build_forest(tasks, Some("child"))),
            vec!["child [active]"]
        );
    }
}
