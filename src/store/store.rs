use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::expense::Expense;
use crate::errors::Result;

/// Insertion-ordered expenses with linear lookups. Duplicate ids are not rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, expense: Expense) {
        tracing::debug!(id = %expense.id(), title = expense.title(), "adding expense");
        self.expenses.push(expense);
    }

    /// Removes the first expense with `id`. Unknown ids leave the store untouched.
    pub fn remove(&mut self, id: Uuid) -> Option<Expense> {
        match self.expenses.iter().position(|expense| expense.id() == id) {
            Some(index) => {
                tracing::debug!(%id, "removing expense");
                Some(self.expenses.remove(index))
            }
            None => {
                tracing::debug!(%id, "remove skipped; no matching expense");
                None
            }
        }
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id() == id)
    }

    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|expense| expense.id() == id)
    }

    /// Case-sensitive exact title match, in insertion order.
    pub fn find_by_title(&self, title: &str) -> Vec<&Expense> {
        let matches: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|expense| expense.title() == title)
            .collect();
        tracing::debug!(title, hits = matches.len(), "title lookup");
        matches
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.iter()
    }

    /// Each expense's [`Expense::to_map`], in insertion order.
    pub fn to_maps(&self) -> Result<Vec<Map<String, Value>>> {
        self.expenses.iter().map(Expense::to_map).collect()
    }

    pub fn render(&self) -> String {
        self.render_with(&Config::default())
    }

    /// Newline-joined [`Expense::render_with`] output, in insertion order.
    pub fn render_with(&self, config: &Config) -> String {
        self.expenses
            .iter()
            .map(|expense| expense.render_with(config))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for ExpenseStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<'a> IntoIterator for &'a ExpenseStore {
    type Item = &'a Expense;
    type IntoIter = std::slice::Iter<'a, Expense>;

    fn into_iter(self) -> Self::IntoIter {
        self.expenses.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(store: &ExpenseStore) -> Vec<Uuid> {
        store.iter().map(Expense::id).collect()
    }

    fn sample_store() -> (ExpenseStore, Vec<Uuid>) {
        let mut store = ExpenseStore::new();
        let mut created = Vec::new();
        for (title, amount) in [("Rent", 900.0), ("Coffee", 3.5), ("Rent", 950.0)] {
            let expense = Expense::new(title, amount);
            created.push(expense.id());
            store.add(expense);
        }
        (store, created)
    }

    #[test]
    fn add_appends_in_insertion_order() {
        let (store, created) = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(ids(&store), created);
    }

    #[test]
    fn add_does_not_deduplicate() {
        let mut store = ExpenseStore::new();
        let expense = Expense::new("Gym", 30.0);
        store.add(expense.clone());
        store.add(expense.clone());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (mut store, created) = sample_store();
        let before = store.clone();

        assert!(store.remove(Uuid::new_v4()).is_none());
        assert_eq!(store, before);
        assert_eq!(ids(&store), created);
    }

    #[test]
    fn remove_drops_only_first_match_and_keeps_order() {
        let mut store = ExpenseStore::new();
        let duplicate = Expense::new("Gym", 30.0);
        let other = Expense::new("Books", 12.0);
        store.add(duplicate.clone());
        store.add(other.clone());
        store.add(duplicate.clone());

        let removed = store.remove(duplicate.id()).expect("duplicate present");
        assert_eq!(removed, duplicate);
        assert_eq!(ids(&store), vec![other.id(), duplicate.id()]);
    }

    #[test]
    fn find_by_id_returns_stored_expense() {
        let (store, created) = sample_store();
        let found = store.find_by_id(created[1]).expect("expense exists");
        assert_eq!(found.title(), "Coffee");
        assert!(store.find_by_id(Uuid::new_v4()).is_none());
    }

    #[test]
    fn find_by_id_mut_allows_in_place_update() {
        let (mut store, created) = sample_store();
        store
            .find_by_id_mut(created[1])
            .expect("expense exists")
            .update(Some("Espresso".into()), None);
        assert_eq!(store.find_by_id(created[1]).unwrap().title(), "Espresso");
    }

    #[test]
    fn find_by_title_is_exact_and_ordered() {
        let (store, created) = sample_store();

        let rents: Vec<Uuid> = store.find_by_title("Rent").iter().map(|e| e.id()).collect();
        assert_eq!(rents, vec![created[0], created[2]]);
        assert!(store.find_by_title("rent").is_empty());
        assert!(store.find_by_title("Ren").is_empty());
    }

    #[test]
    fn maps_and_render_follow_order() {
        let (store, created) = sample_store();

        let serialized = store.to_maps().expect("expense maps");
        let serialized_ids: Vec<String> = serialized
            .iter()
            .map(|map| map["id"].as_str().unwrap().to_string())
            .collect();
        let expected: Vec<String> = created.iter().map(Uuid::to_string).collect();
        assert_eq!(serialized_ids, expected);

        let rendered = store.render();
        let expected_render = store
            .iter()
            .map(Expense::render)
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(rendered, expected_render);
        assert_eq!(store.to_string(), rendered);
    }

    #[test]
    fn json_export_matches_record_maps() {
        let (store, _) = sample_store();
        let exported: Value =
            serde_json::from_str(&store.to_json_pretty().expect("export")).expect("valid json");
        let maps: Vec<Value> = store
            .to_maps()
            .expect("expense maps")
            .into_iter()
            .map(Value::Object)
            .collect();
        assert_eq!(exported, Value::Array(maps));
    }

    #[test]
    fn empty_store_renders_empty_text() {
        let store = ExpenseStore::new();
        assert!(store.is_empty());
        assert_eq!(store.render(), "");
        assert!(store.to_maps().expect("expense maps").is_empty());
        assert_eq!(store.to_json_pretty().unwrap(), "[]");
    }
}
