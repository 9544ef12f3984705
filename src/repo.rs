use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    #[error("{kind} with id {id} not found")]
    NotFound { kind: &'static str, id: Id },
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Internal(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

#[async_trait]
pub trait CardRepo: Send + Sync {
    async fn list_cards(&self) -> RepoResult<Vec<Card>>;
    async fn get_card(&self, id: &str) -> RepoResult<Card>;
    async fn create_card(&self, new: NewCard) -> RepoResult<Card>;
    /// Removes the card and strips its id from every list that references it.
    async fn delete_card(&self, id: &str) -> RepoResult<()>;
}

#[async_trait]
pub trait ListRepo: Send + Sync {
    async fn list_lists(&self) -> RepoResult<Vec<List>>;
    async fn get_list(&self, id: &str) -> RepoResult<List>;
    /// Rejects the whole list if any referenced card does not exist.
    async fn create_list(&self, new: NewList) -> RepoResult<List>;
    async fn delete_list(&self, id: &str) -> RepoResult<()>;
}

pub trait Repo: CardRepo + ListRepo {}

impl<T> Repo for T where T: CardRepo + ListRepo {}

/// Accepts the field only if it carries non-whitespace text.
fn required(field: Option<String>, message: &str) -> RepoResult<String> {
    match field {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => {
            warn!(reason = message, "rejected invalid payload");
            Err(RepoError::Validation(message.to_string()))
        }
    }
}

fn not_found(kind: &'static str, id: &str) -> RepoError {
    warn!(kind, id, "{kind} not found");
    RepoError::NotFound { kind, id: id.to_string() }
}

fn fresh_id() -> Id {
    uuid::Uuid::new_v4().to_string()
}

pub mod inmem {
    use super::*;

    #[derive(Default)]
    struct State {
        cards: Vec<Card>,
        lists: Vec<List>,
    }

    /// Process-local store. Insertion order is preserved for listings.
    #[derive(Clone, Default)]
    pub struct InMemRepo {
        state: Arc<RwLock<State>>,
    }

    impl InMemRepo {
        pub fn new() -> Self {
            Self::default()
        }

        /// Store preloaded with the sample board shipped with the service.
        pub fn seeded() -> Self {
            let card = |id: &str, title: &str, content: &str| Card {
                id: id.into(),
                title: title.into(),
                content: content.into(),
            };
            let list = |id: &str, header: &str, card_ids: &[&str]| List {
                id: id.into(),
                header: header.into(),
                card_ids: card_ids.iter().map(|c| c.to_string()).collect(),
            };
            let state = State {
                cards: vec![
                    card("1", "Task One", "This is card one"),
                    card("2", "Task Two", "This is card two"),
                    card("3", "Task Three", "This is card three"),
                ],
                lists: vec![list("1", "List One", &["1"]), list("2", "List Two", &["2", "3"])],
            };
            Self { state: Arc::new(RwLock::new(state)) }
        }

        fn read(&self) -> RepoResult<RwLockReadGuard<'_, State>> {
            self.state.read().map_err(|_| RepoError::Internal("store lock poisoned".into()))
        }

        fn write(&self) -> RepoResult<RwLockWriteGuard<'_, State>> {
            self.state.write().map_err(|_| RepoError::Internal("store lock poisoned".into()))
        }
    }

    #[async_trait]
    impl CardRepo for InMemRepo {
        async fn list_cards(&self) -> RepoResult<Vec<Card>> {
            Ok(self.read()?.cards.clone())
        }

        async fn get_card(&self, id: &str) -> RepoResult<Card> {
            let s = self.read()?;
            s.cards.iter().find(|c| c.id == id).cloned().ok_or_else(|| not_found("card", id))
        }

        async fn create_card(&self, new: NewCard) -> RepoResult<Card> {
            let title = required(new.title, "Invalid data. Title required.")?;
            let content = required(new.content, "Invalid data. Content required.")?;
            let card = Card { id: fresh_id(), title, content };
            self.write()?.cards.push(card.clone());
            info!(card_id = %card.id, "card created");
            Ok(card)
        }

        async fn delete_card(&self, id: &str) -> RepoResult<()> {
            let mut s = self.write()?;
            let idx = s.cards.iter().position(|c| c.id == id).ok_or_else(|| not_found("card", id))?;
            for list in s.lists.iter_mut() {
                list.card_ids.retain(|cid| cid != id);
            }
            s.cards.remove(idx);
            info!(card_id = id, "card deleted");
            Ok(())
        }
    }

    #[async_trait]
    impl ListRepo for InMemRepo {
        async fn list_lists(&self) -> RepoResult<Vec<List>> {
            Ok(self.read()?.lists.clone())
        }

        async fn get_list(&self, id: &str) -> RepoResult<List> {
            let s = self.read()?;
            s.lists.iter().find(|l| l.id == id).cloned().ok_or_else(|| not_found("list", id))
        }

        async fn create_list(&self, new: NewList) -> RepoResult<List> {
            let header = required(new.header, "Invalid data. Header required.")?;
            let card_ids = new.card_ids.unwrap_or_default();

            // validate and insert under one lock so a concurrent delete can't slip in between
            let mut s = self.write()?;
            if let Some(missing) = card_ids.iter().find(|cid| !s.cards.iter().any(|c| &c.id == *cid)) {
                warn!(card_id = %missing, "list references unknown card");
                return Err(RepoError::Validation(format!("Invalid data. Card with id {missing} not found.")));
            }
            let list = List { id: fresh_id(), header, card_ids };
            s.lists.push(list.clone());
            info!(list_id = %list.id, "list created");
            Ok(list)
        }

        async fn delete_list(&self, id: &str) -> RepoResult<()> {
            let mut s = self.write()?;
            let idx = s.lists.iter().position(|l| l.id == id).ok_or_else(|| not_found("list", id))?;
            s.lists.remove(idx);
            info!(list_id = id, "list deleted");
            Ok(())
        }
    }
}
