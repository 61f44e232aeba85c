use super::models::{Item, ItemId, Snapshot};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, trace};

// Shared by every store so ids stay unique for the whole process.
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> ItemId {
    ItemId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Snapshot)>;

/// Handle the view layer holds on to. The store is single-threaded.
pub type StoreHandle = Rc<RefCell<TodoStore>>;

/// Owns the item collection.
///
/// Every mutation builds a new collection, swaps it in and then calls each
/// listener in registration order with the new snapshot. Targets are matched
/// by id; a target that no longer exists turns the mutation into a no-op, but
/// listeners are still notified exactly once.
pub struct TodoStore {
    items: Snapshot,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            items: Rc::from(Vec::new()),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn into_handle(self) -> StoreHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn items(&self) -> Snapshot {
        Rc::clone(&self.items)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&Snapshot) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        debug!(subscription = id.0, listeners = self.listeners.len(), "listener subscribed");
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        let removed = self.listeners.len() != before;
        debug!(subscription = id.0, removed, "listener unsubscribed");
        removed
    }

    /// Empty and whitespace-only titles are accepted as-is.
    pub fn add(&mut self, title: impl Into<String>) -> ItemId {
        let id = next_id();
        let item = Item::new(id, title.into());
        debug!(%id, title = %item.title, "add");

        let items: Vec<Item> = std::iter::once(item)
            .chain(self.items.iter().cloned())
            .collect();
        self.replace(items);
        id
    }

    pub fn remove(&mut self, target: impl Into<ItemId>) {
        let id = target.into();
        debug!(%id, "remove");
        let items: Vec<Item> = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        self.replace(items);
    }

    pub fn rename(&mut self, target: impl Into<ItemId>, title: impl Into<String>) {
        let id = target.into();
        let title = title.into();
        debug!(%id, %title, "rename");
        let items: Vec<Item> = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.with_title(title.clone())
                } else {
                    item.clone()
                }
            })
            .collect();
        self.replace(items);
    }

    pub fn toggle(&mut self, target: impl Into<ItemId>) {
        let id = target.into();
        debug!(%id, "toggle");
        let items: Vec<Item> = self
            .items
            .iter()
            .map(|item| {
                if item.id == id {
                    item.with_completed(!item.completed)
                } else {
                    item.clone()
                }
            })
            .collect();
        self.replace(items);
    }

    pub fn toggle_all(&mut self, completed: bool) {
        let mut changed = 0;
        let items: Vec<Item> = self
            .items
            .iter()
            .map(|item| {
                if item.completed != completed {
                    changed += 1;
                    item.with_completed(completed)
                } else {
                    item.clone()
                }
            })
            .collect();
        debug!(completed, changed, "toggle all");
        self.replace(items);
    }

    pub fn clear_completed(&mut self) {
        let items: Vec<Item> = self
            .items
            .iter()
            .filter(|item| !item.completed)
            .cloned()
            .collect();
        debug!(removed = self.items.len() - items.len(), "clear completed");
        self.replace(items);
    }

    fn replace(&mut self, items: Vec<Item>) {
        self.items = Rc::from(items);
        self.notify();
    }

    fn notify(&mut self) {
        trace!(listeners = self.listeners.len(), items = self.items.len(), "notify");
        let snapshot = Rc::clone(&self.items);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TodoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::models::{completed_count, remaining_count};
    use std::collections::HashSet;

    fn titles(store: &TodoStore) -> Vec<String> {
        store.items().iter().map(|item| item.title.clone()).collect()
    }

    /// Counts notifications and remembers the last snapshot seen.
    fn recorder(store: &mut TodoStore) -> Rc<RefCell<Vec<Snapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |items| sink.borrow_mut().push(Rc::clone(items)));
        seen
    }

    #[test]
    fn test_add_prepends_active_item() {
        let mut store = TodoStore::new();
        store.add("first");
        let id = store.add("second");

        let items = store.items();
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].title, "second");
        assert!(!items[0].completed);
        assert_eq!(titles(&store), vec!["second", "first"]);
    }

    #[test]
    fn test_add_accepts_blank_titles() {
        let mut store = TodoStore::new();
        store.add("");
        store.add("   ");
        assert_eq!(titles(&store), vec!["   ", ""]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        store.remove(a);
        let b = store.add("b");
        assert_ne!(a, b);
        assert!(b > a);

        // A second store draws from the same counter.
        let mut other = TodoStore::new();
        let c = other.add("c");
        assert!(c > b);
    }

    #[test]
    fn test_ids_unique_after_mixed_operations() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        let b = store.add("b");
        store.toggle(a);
        store.rename(b, "bee");
        store.add("c");
        store.toggle_all(true);
        store.add("d");
        store.clear_completed();
        store.add("e");
        store.remove(b);

        let ids: HashSet<ItemId> = store.items().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut store = TodoStore::new();
        let id = store.add("a");
        store.toggle(id);
        assert!(store.get(id).unwrap().completed);
        store.toggle(id);
        assert!(!store.get(id).unwrap().completed);
    }

    #[test]
    fn test_toggle_only_touches_target() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        let b = store.add("b");
        store.toggle(a);
        assert!(store.get(a).unwrap().completed);
        assert!(!store.get(b).unwrap().completed);
    }

    #[test]
    fn test_toggle_accepts_stale_item_value() {
        let mut store = TodoStore::new();
        store.add("a");
        let stale = store.items()[0].clone();
        store.rename(&stale, "renamed");

        // The old value still targets the same item.
        store.toggle(&stale);
        let current = store.get(stale.id).unwrap();
        assert_eq!(current.title, "renamed");
        assert!(current.completed);
    }

    #[test]
    fn test_rename_keeps_id_and_completion() {
        let mut store = TodoStore::new();
        let id = store.add("old");
        store.toggle(id);
        store.rename(id, "new");

        let item = store.get(id).unwrap();
        assert_eq!(item.title, "new");
        assert!(item.completed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_all_round_trip() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        store.add("b");
        store.add("c");
        store.toggle(a);

        store.toggle_all(true);
        assert!(store.items().iter().all(|item| item.completed));

        store.toggle_all(false);
        assert!(store.items().iter().all(|item| !item.completed));
    }

    #[test]
    fn test_clear_completed_preserves_order() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        store.add("b");
        let c = store.add("c");
        store.add("d");
        store.toggle(a);
        store.toggle(c);

        store.clear_completed();
        assert_eq!(titles(&store), vec!["d", "b"]);
        assert_eq!(completed_count(&store.items()), 0);
    }

    #[test]
    fn test_remove_existing_and_missing() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        store.add("b");
        let seen = recorder(&mut store);

        store.remove(a);
        assert_eq!(store.len(), 1);
        assert_eq!(seen.borrow().len(), 1);

        store.remove(a);
        assert_eq!(store.len(), 1);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_missing_targets_still_notify() {
        let mut store = TodoStore::new();
        store.add("a");
        let seen = recorder(&mut store);
        let missing = ItemId(u64::MAX);

        store.rename(missing, "x");
        store.toggle(missing);
        store.remove(missing);
        assert_eq!(seen.borrow().len(), 3);
        assert_eq!(titles(&store), vec!["a"]);
    }

    #[test]
    fn test_every_mutation_notifies_once_with_new_snapshot() {
        let mut store = TodoStore::new();
        let seen = recorder(&mut store);

        let a = store.add("a");
        store.rename(a, "b");
        store.toggle(a);
        store.toggle_all(false);
        store.clear_completed();
        store.remove(a);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 6);
        assert_eq!(seen[1][0].title, "b");
        assert!(seen[2][0].completed);
        assert!(seen[5].is_empty());
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut store = TodoStore::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let log = Rc::clone(&log);
            store.subscribe(move |_| log.borrow_mut().push(name));
        }

        store.add("a");
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_listener_sees_applied_mutation() {
        let mut store = TodoStore::new();
        let seen_len = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen_len);
        store.subscribe(move |items| *sink.borrow_mut() = items.len());

        store.add("a");
        assert_eq!(*seen_len.borrow(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut store = TodoStore::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let sub = store.subscribe(move |_| *sink.borrow_mut() += 1);

        store.add("a");
        assert!(store.unsubscribe(sub));
        store.add("b");
        assert_eq!(*count.borrow(), 1);
        assert!(!store.unsubscribe(sub));
    }

    #[test]
    fn test_old_snapshots_are_untouched() {
        let mut store = TodoStore::new();
        let id = store.add("a");
        let before = store.items();
        store.toggle(id);
        store.rename(id, "b");

        assert_eq!(before[0].title, "a");
        assert!(!before[0].completed);
    }

    #[test]
    fn test_reference_scenario() {
        let mut store = TodoStore::new();
        let a = store.add("a");
        store.add("b");

        let items = store.items();
        assert_eq!(titles(&store), vec!["b", "a"]);
        assert!(items.iter().all(|item| !item.completed));

        store.toggle(a);
        let items = store.items();
        assert_eq!(items[1].title, "a");
        assert!(items[1].completed);
        assert!(!items[0].completed);

        store.clear_completed();
        assert_eq!(titles(&store), vec!["b"]);
        assert_eq!(remaining_count(&store.items()), 1);
        assert_eq!(completed_count(&store.items()), 0);
    }
}
