use log::debug;

use crate::error::AddError;
use crate::task::{self, Task};

/// In-memory ordered task list plus the id counter for one session.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u32,
}

impl TaskStore {
    /// Start from previously loaded tasks; ids continue after the highest one.
    pub fn new(tasks: Vec<Task>) -> Self {
        let next_id = tasks
            .iter()
            .map(|t| t.id)
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self { tasks, next_id }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn next_id(&self) -> u32 {
        self.next_id
    }

    /// Append a new task with the next id.
    pub fn add(&mut self, text: &str) -> Result<&Task, AddError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AddError::EmptyText);
        }
        // the last id must keep a successor so the counter never wraps
        let next_id = self.next_id.checked_add(1).ok_or(AddError::IdsExhausted)?;

        let task = Task::new(self.next_id, text, task::now());
        self.next_id = next_id;
        debug!("added task #{}", task.id);
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.position(id).map(|idx| &self.tasks[idx])
    }

    /// Flip the done flag of the task with this id.
    pub fn toggle(&mut self, id: u32) -> Option<&Task> {
        let idx = self.position(id)?;
        let task = &mut self.tasks[idx];
        task.toggle();
        debug!("task #{} done={}", task.id, task.done);
        Some(&self.tasks[idx])
    }

    /// Remove the task with this id. The id is never handed out again.
    pub fn delete(&mut self, id: u32) -> Option<Task> {
        let idx = self.position(id)?;
        debug!("deleted task #{id}");
        Some(self.tasks.remove(idx))
    }

    fn position(&self, id: u32) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn loaded(ids: &[u32]) -> Vec<Task> {
        let created_at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        ids.iter()
            .map(|&id| Task::new(id, &format!("task {id}"), created_at))
            .collect()
    }

    #[test]
    fn empty_store_starts_at_one() {
        let store = TaskStore::new(Vec::new());
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn next_id_follows_highest_loaded_id() {
        let store = TaskStore::new(loaded(&[3, 11, 7]));
        assert_eq!(store.next_id(), 12);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_assigns_sequential_ids_and_appends() {
        let mut store = TaskStore::new(Vec::new());
        assert_eq!(store.add("buy milk").unwrap().id, 1);
        assert_eq!(store.add("  walk dog  ").unwrap().id, 2);

        let texts: Vec<&str> = store.tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["buy milk", "walk dog"]);
        assert!(store.tasks().iter().all(|t| !t.done));
    }

    #[test]
    fn add_rejects_blank_text() {
        let mut store = TaskStore::new(Vec::new());
        assert_eq!(store.add("").unwrap_err(), AddError::EmptyText);
        assert_eq!(store.add(" \t ").unwrap_err(), AddError::EmptyText);
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn add_sanitizes_text() {
        let mut store = TaskStore::new(Vec::new());
        let task = store.add("line one\nline\ttwo").unwrap();
        assert_eq!(task.text, "line one line two");
    }

    #[test]
    fn last_id_is_never_handed_out() {
        let mut store = TaskStore::new(loaded(&[u32::MAX - 2]));
        assert_eq!(store.add("penultimate").unwrap().id, u32::MAX - 1);
        assert_eq!(store.add("one too many").unwrap_err(), AddError::IdsExhausted);
        assert_eq!(store.len(), 2);
        assert_eq!(store.next_id(), u32::MAX);
    }

    #[test]
    fn highest_possible_loaded_id_does_not_overflow() {
        let mut store = TaskStore::new(loaded(&[u32::MAX]));
        assert_eq!(store.next_id(), u32::MAX);
        assert_eq!(store.add("x").unwrap_err(), AddError::IdsExhausted);
    }

    #[test]
    fn find_by_id_matches_only_existing_ids() {
        let store = TaskStore::new(loaded(&[1, 2]));
        assert_eq!(store.find_by_id(2).unwrap().text, "task 2");
        assert!(store.find_by_id(0).is_none());
        assert!(store.find_by_id(3).is_none());
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut store = TaskStore::new(loaded(&[1]));
        assert!(store.toggle(1).unwrap().done);
        assert!(!store.toggle(1).unwrap().done);
    }

    #[test]
    fn toggle_and_delete_of_unknown_id_leave_store_unchanged() {
        let mut store = TaskStore::new(loaded(&[1, 2]));
        let before = store.tasks().to_vec();

        assert!(store.toggle(9).is_none());
        assert!(store.delete(9).is_none());

        assert_eq!(store.tasks(), &before[..]);
        assert_eq!(store.next_id(), 3);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = TaskStore::new(loaded(&[1, 2, 3]));
        assert_eq!(store.delete(2).unwrap().id, 2);
        assert_eq!(store.add("new").unwrap().id, 4);

        let ids: Vec<u32> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn ids_grow_after_deleting_the_newest() {
        let mut store = TaskStore::new(Vec::new());
        let mut seen = Vec::new();
        for round in 0..5 {
            let id = store.add(&format!("t{round}")).unwrap().id;
            assert!(seen.iter().all(|&prev| id > prev));
            seen.push(id);
            store.delete(id);
        }
        assert!(store.is_empty());
        assert_eq!(store.next_id(), 6);
    }
}
