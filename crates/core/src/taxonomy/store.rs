#![forbid(unsafe_code)]

use super::model::Taxonomy;
use super::ops::{Rejection, TaxonomyAction, reduce};

type Subscriber = Box<dyn FnMut(&Taxonomy) + Send>;

/// Holds the current taxonomy and replaces it on every accepted action.
///
/// Subscribers run after each accepted transition, in registration order.
/// A rejected action leaves the state untouched and notifies nobody.
pub struct TaxonomyStore {
    state: Taxonomy,
    subscribers: Vec<Subscriber>,
}

impl TaxonomyStore {
    pub fn new(state: Taxonomy) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &Taxonomy {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&Taxonomy) + Send + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn dispatch(&mut self, action: &TaxonomyAction) -> Result<&Taxonomy, Rejection> {
        let next = reduce(&self.state, action)?;
        self.state = next;
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
        Ok(&self.state)
    }
}

impl std::fmt::Debug for TaxonomyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaxonomyStore")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
