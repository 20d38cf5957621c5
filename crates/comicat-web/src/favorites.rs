use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::rc::Rc;

use futures_signals::{
    signal::{Mutable, Signal},
    signal_vec::{MutableVec, SignalVec},
};
use wasm_bindgen_futures::spawn_local;

use crate::api;
use crate::common::Comic;

/// Keeps every rendered representation of a comic's favorite state in sync.
///
/// The membership registry hands out one shared `Mutable<bool>` per comic id;
/// catalog cards, favorites cards and the detail modal all bind their active
/// class and button label to the same cell, so flipping it is the whole
/// fan-out. Membership only changes after the server acknowledges a mutation;
/// there is no optimistic update, and a failed request changes nothing.
///
/// Overlapping toggles on the same id are deliberately not serialized:
/// requests are spawned independently, nothing is cancelled, and the last
/// response to settle wins.
pub struct FavoriteSync {
    memberships: RefCell<HashMap<i64, Mutable<bool>>>,
    favorites: MutableVec<Rc<Comic>>,
    pending_removal: Mutable<Option<Rc<Comic>>>,
}

impl FavoriteSync {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            memberships: RefCell::new(HashMap::new()),
            favorites: MutableVec::new(),
            pending_removal: Mutable::new(None),
        })
    }

    /// The shared membership cell for a comic, created on first sight.
    pub fn membership(&self, comic_id: i64) -> Mutable<bool> {
        self.memberships
            .borrow_mut()
            .entry(comic_id)
            .or_insert_with(|| Mutable::new(false))
            .clone()
    }

    /// Reconciles the registry against the authoritative id list the server
    /// sends with every catalog page.
    pub fn reconcile(&self, favorite_ids: &[i64]) {
        let mut memberships = self.memberships.borrow_mut();

        for (id, cell) in memberships.iter() {
            cell.set_neq(favorite_ids.contains(id));
        }

        for id in favorite_ids {
            memberships
                .entry(*id)
                .or_insert_with(|| Mutable::new(true));
        }
    }

    /// Entry point for every favorite button. Removal asks for confirmation
    /// first and touches the network only after the user confirms; adding goes
    /// straight to the server.
    pub fn request_toggle(sync: &Rc<Self>, comic: &Rc<Comic>) {
        if sync.membership(comic.id).get() {
            sync.pending_removal.set(Some(comic.clone()));
        } else {
            Self::add(sync.clone(), comic.clone());
        }
    }

    pub fn confirm_removal(sync: &Rc<Self>) {
        if let Some(comic) = sync.pending_removal.replace(None) {
            Self::remove(sync.clone(), comic.id);
        }
    }

    pub fn cancel_removal(&self) {
        self.pending_removal.set(None);
    }

    fn add(sync: Rc<Self>, comic: Rc<Comic>) {
        spawn_local(async move {
            let result = api::add_favorite(&comic).await;
            sync.settled_add(comic, result);
        });
    }

    fn remove(sync: Rc<Self>, comic_id: i64) {
        spawn_local(async move {
            let result = api::remove_favorite(comic_id).await;
            sync.settled_remove(comic_id, result);
        });
    }

    fn settled_add(&self, comic: Rc<Comic>, result: Result<(), Box<dyn Error>>) {
        match result {
            Ok(()) => {
                self.membership(comic.id).set_neq(true);
                self.favorites.lock_mut().push_cloned(comic);
            }
            Err(e) => {
                error!("error adding favorite {}: {}", comic.id, e);
            }
        }
    }

    fn settled_remove(&self, comic_id: i64, result: Result<(), Box<dyn Error>>) {
        match result {
            Ok(()) => {
                self.membership(comic_id).set_neq(false);
                self.favorites.lock_mut().retain(|comic| comic.id != comic_id);
            }
            Err(e) => {
                error!("error removing favorite {}: {}", comic_id, e);
            }
        }
    }

    pub fn favorites_signal_vec(&self) -> impl SignalVec<Item = Rc<Comic>> + use<> {
        self.favorites.signal_vec_cloned()
    }

    pub fn pending_removal_signal(&self) -> impl Signal<Item = Option<Rc<Comic>>> + use<> {
        self.pending_removal.signal_cloned()
    }

    pub fn is_confirming_signal(&self) -> impl Signal<Item = bool> + use<> {
        self.pending_removal.signal_ref(|x| x.is_some())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::common::Thumbnail;

    fn comic(id: i64) -> Rc<Comic> {
        Rc::new(Comic {
            id,
            title: format!("Comic #{}", id),
            page_count: Some(32),
            prices: vec![],
            thumbnail: Thumbnail {
                path: "http://i.example.com/x".to_string(),
                extension: "jpg".to_string(),
            },
            description: None,
        })
    }

    fn favorite_ids(sync: &Rc<FavoriteSync>) -> Vec<i64> {
        sync.favorites
            .lock_ref()
            .iter()
            .map(|comic| comic.id)
            .collect()
    }

    #[test]
    fn test_add_then_remove_round_trip() {
        let sync = FavoriteSync::new();
        let comic = comic(1);

        sync.settled_add(comic.clone(), Ok(()));
        assert!(sync.membership(1).get());
        assert_eq!(favorite_ids(&sync), vec![1]);

        sync.settled_remove(1, Ok(()));
        assert!(!sync.membership(1).get());
        assert!(favorite_ids(&sync).is_empty());
    }

    #[test]
    fn test_membership_cell_is_shared_across_instances() {
        let sync = FavoriteSync::new();

        // one cell per id, handed to catalog card, favorites card and modal
        let catalog_card = sync.membership(5);
        let favorites_card = sync.membership(5);
        let modal = sync.membership(5);

        sync.settled_add(comic(5), Ok(()));

        assert!(catalog_card.get());
        assert!(favorites_card.get());
        assert!(modal.get());

        sync.settled_remove(5, Ok(()));

        assert!(!catalog_card.get());
        assert!(!favorites_card.get());
        assert!(!modal.get());
    }

    #[test]
    fn test_failed_add_changes_nothing() {
        let sync = FavoriteSync::new();

        sync.settled_add(comic(2), Err("server unreachable".into()));

        assert!(!sync.membership(2).get());
        assert!(favorite_ids(&sync).is_empty());
    }

    #[test]
    fn test_failed_remove_changes_nothing() {
        let sync = FavoriteSync::new();
        sync.settled_add(comic(3), Ok(()));

        sync.settled_remove(3, Err("server unreachable".into()));

        assert!(sync.membership(3).get());
        assert_eq!(favorite_ids(&sync), vec![3]);
    }

    #[test]
    fn test_toggle_on_active_comic_only_opens_confirmation() {
        let sync = FavoriteSync::new();
        let comic = comic(4);
        sync.settled_add(comic.clone(), Ok(()));

        FavoriteSync::request_toggle(&sync, &comic);

        // confirmation is pending, nothing has changed yet
        assert_eq!(
            sync.pending_removal.get_cloned().map(|c| c.id),
            Some(4)
        );
        assert!(sync.membership(4).get());
        assert_eq!(favorite_ids(&sync), vec![4]);
    }

    #[test]
    fn test_cancelling_confirmation_changes_nothing() {
        let sync = FavoriteSync::new();
        let comic = comic(6);
        sync.settled_add(comic.clone(), Ok(()));

        FavoriteSync::request_toggle(&sync, &comic);
        sync.cancel_removal();

        assert!(sync.pending_removal.get_cloned().is_none());
        assert!(sync.membership(6).get());
        assert_eq!(favorite_ids(&sync), vec![6]);
    }

    #[test]
    fn test_reconcile_follows_server_list() {
        let sync = FavoriteSync::new();
        let seen = sync.membership(1);
        sync.membership(2);

        sync.reconcile(&[2, 3]);

        assert!(!seen.get());
        assert!(sync.membership(2).get());
        assert!(sync.membership(3).get());

        // a later page no longer lists 2
        sync.reconcile(&[3]);
        assert!(!sync.membership(2).get());
        assert!(sync.membership(3).get());
    }
}
