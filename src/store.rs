//! The in-memory worker collection.
//!
//! An insertion-ordered sequence. Order matters for `head` and `remove_head`; nothing else
//! about the order is guaranteed or maintained.

use im::Vector;

use crate::model::{Worker, WorkerId};

#[derive(Debug, Clone, Default)]
pub struct WorkerStore {
    workers: Vector<Worker>,
}

impl WorkerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a worker at the end of the collection.
    pub fn add(&mut self, worker: Worker) {
        self.workers.push_back(worker);
    }

    /// Removes every worker matching `predicate` and returns how many were removed.
    pub fn remove_where<F>(&mut self, mut predicate: F) -> usize
    where
        F: FnMut(&Worker) -> bool,
    {
        let before = self.workers.len();
        self.workers.retain(|worker| !predicate(worker));
        before - self.workers.len()
    }

    pub fn find_first<F>(&self, mut predicate: F) -> Option<&Worker>
    where
        F: FnMut(&Worker) -> bool,
    {
        self.workers.iter().find(|worker| predicate(worker))
    }

    pub fn find_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|worker| worker.id == id)
    }

    pub fn first(&self) -> Option<&Worker> {
        self.workers.front()
    }

    pub fn remove_first(&mut self) -> Option<Worker> {
        self.workers.pop_front()
    }

    pub fn clear(&mut self) {
        self.workers.clear();
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Live iteration in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Worker> + '_ {
        self.workers.iter()
    }

    /// Highest identifier currently stored.
    pub fn max_id(&self) -> Option<WorkerId> {
        self.workers.iter().map(|worker| worker.id).max()
    }
}

impl FromIterator<Worker> for WorkerStore {
    fn from_iter<I: IntoIterator<Item = Worker>>(iter: I) -> Self {
        Self {
            workers: iter.into_iter().collect(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::worker;
    use super::*;
    use crate::model::Position;

    fn ids(store: &WorkerStore) -> Vec<WorkerId> {
        store.iter().map(|w| w.id).collect()
    }

    #[test]
    fn keeps_insertion_order() {
        let mut store = WorkerStore::new();
        store.add(worker(3, "Cara", None));
        store.add(worker(1, "Abel", None));
        store.add(worker(2, "Bea", None));
        assert_eq!(ids(&store), vec![3, 1, 2]);
        assert_eq!(store.first().map(|w| w.id), Some(3));
    }

    #[test]
    fn remove_where_reports_count() {
        let mut store: WorkerStore = [1, 2, 3, 5]
            .into_iter()
            .map(|id| worker(id, "Ann", None))
            .collect();
        assert_eq!(store.remove_where(|w| w.id > 2), 2);
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.remove_where(|w| w.id > 2), 0);
    }

    #[test]
    fn remove_first_pops_the_head() {
        let mut store: WorkerStore = [4, 9].into_iter().map(|id| worker(id, "Ann", None)).collect();
        assert_eq!(store.remove_first().map(|w| w.id), Some(4));
        assert_eq!(ids(&store), vec![9]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.remove_first().is_none());
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut store: WorkerStore = [1, 2].into_iter().map(|id| worker(id, "Ann", None)).collect();
        store.find_mut(2).unwrap().position = Some(Position::Cook);
        assert_eq!(
            store.find_first(|w| w.id == 2).and_then(|w| w.position),
            Some(Position::Cook)
        );
        assert!(store.find_mut(7).is_none());
        assert_eq!(store.max_id(), Some(2));
    }
}
