//! Content pools per room role.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{ConfigError, RoomRole};

/// The content a room of one role may receive.
///
/// A pool has two tiers: an optional `mandatory` item, placed first in rooms
/// of a gated role, and the `tail` the remaining items are drawn from. Rooms
/// of other roles draw from both tiers alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentPool<H> {
    mandatory: Option<H>,
    tail: Vec<H>,
}

impl<H> ContentPool<H> {
    /// A pool without a mandatory item.
    pub fn new(items: Vec<H>) -> Self {
        Self {
            mandatory: None,
            tail: items,
        }
    }

    /// A pool whose `mandatory` item is placed before anything else in
    /// gated rooms.
    pub fn gated(mandatory: H, tail: Vec<H>) -> Self {
        Self {
            mandatory: Some(mandatory),
            tail,
        }
    }

    /// The item placed first in gated rooms, if any.
    #[inline]
    pub fn mandatory(&self) -> Option<&H> {
        self.mandatory.as_ref()
    }

    /// Items drawn at random after the mandatory one.
    #[inline]
    pub fn tail(&self) -> &[H] {
        &self.tail
    }

    /// Number of items across both tiers.
    pub fn len(&self) -> usize {
        usize::from(self.mandatory.is_some()) + self.tail.len()
    }

    /// Returns `true` if neither tier holds an item.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates both tiers, mandatory item first.
    pub fn iter(&self) -> impl Iterator<Item = &H> {
        self.mandatory.iter().chain(&self.tail)
    }

    /// Draws uniformly from both tiers. `None` if the pool is empty.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&H> {
        if self.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.len());
        self.iter().nth(index)
    }

    /// Draws uniformly from the tail. `None` if the tail is empty.
    pub fn draw_tail<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&H> {
        if self.tail.is_empty() {
            return None;
        }
        self.tail.get(rng.random_range(0..self.tail.len()))
    }
}

/// Content pools keyed by room role.
///
/// Handles are opaque to the generator: they are cloned into the placements
/// and never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentCatalog<H> {
    pools: BTreeMap<RoomRole, ContentPool<H>>,
}

impl<H> Default for ContentCatalog<H> {
    fn default() -> Self {
        Self {
            pools: BTreeMap::new(),
        }
    }
}

impl<H> ContentCatalog<H> {
    /// Creates a catalog without pools.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ContentCatalog::insert`].
    pub fn with_pool(mut self, role: RoomRole, pool: ContentPool<H>) -> Self {
        self.insert(role, pool);
        self
    }

    /// Sets the pool of `role`, returning the one it replaces.
    pub fn insert(&mut self, role: RoomRole, pool: ContentPool<H>) -> Option<ContentPool<H>> {
        self.pools.insert(role, pool)
    }

    /// The pool of `role`, if one was added.
    #[inline]
    pub fn pool(&self, role: RoomRole) -> Option<&ContentPool<H>> {
        self.pools.get(&role)
    }

    /// Iterates the pools in role order.
    pub fn iter(&self) -> impl Iterator<Item = (RoomRole, &ContentPool<H>)> {
        self.pools.iter().map(|(&role, pool)| (role, pool))
    }

    /// Checks that every gated role has a mandatory item.
    ///
    /// Every generated level has a key room and a locked room, so this is
    /// checked once up front instead of per room.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for role in RoomRole::ALL.into_iter().filter(|role| role.is_gated()) {
            if self.pool(role).and_then(ContentPool::mandatory).is_none() {
                return Err(ConfigError::MissingMandatoryContent { role });
            }
        }
        Ok(())
    }
}
