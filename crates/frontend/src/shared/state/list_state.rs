use contracts::domain::common::AggregateRoot;

/// In-memory mirror of a server collection.
///
/// Mutations are applied after the corresponding request succeeded, so the
/// list only ever reflects server-confirmed records.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: AggregateRoot + Clone> ListState<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// New records go first
    pub fn prepend(&mut self, item: T) {
        self.items.insert(0, item);
    }

    /// Replace the record with the same id; returns false if absent
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter_mut().find(|existing| existing.id() == item.id()) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|item| item.id() != id);
    }

    /// Patch one record in place; returns false if absent
    pub fn update(&mut self, id: &str, patch: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                patch(item);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_work_order::{CompletionResponse, WorkOrder};
    use contracts::enums::WorkOrderStatus;

    fn wo(id: &str, title: &str) -> WorkOrder {
        serde_json::from_value(serde_json::json!({ "_id": id, "titulo": title })).unwrap()
    }

    fn list() -> ListState<WorkOrder> {
        ListState::new(vec![wo("a", "uno"), wo("b", "dos"), wo("c", "tres")])
    }

    #[test]
    fn test_prepend_puts_new_item_first_and_keeps_others() {
        let mut state = list();
        let before = state.items().to_vec();

        state.prepend(wo("n", "nueva"));

        assert_eq!(state.items()[0].id, "n");
        assert_eq!(&state.items()[1..], &before[..]);
    }

    #[test]
    fn test_remove_by_id() {
        let mut state = list();
        state.remove("b");
        assert!(state.items().iter().all(|item| item.id != "b"));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_replace_matches_by_id_only() {
        let mut state = list();
        assert!(state.replace(wo("b", "editada")));
        assert_eq!(state.get("b").unwrap().title, "editada");
        assert_eq!(state.get("a").unwrap().title, "uno");
        assert!(!state.replace(wo("zz", "fantasma")));
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn test_update_applies_completion_patch() {
        let mut state = list();
        let patched = state.update("c", |item| {
            item.apply_completion(&Default::default(), CompletionResponse::default(), chrono::Utc::now())
        });
        assert!(patched);
        assert_eq!(state.get("c").unwrap().status, WorkOrderStatus::Completed);
        assert_eq!(state.get("a").unwrap().status, WorkOrderStatus::Pending);
    }
}
