//! The full generation pipeline.
//!
//! A run partitions the configured volume, connects neighbouring leaves,
//! carves walls, assigns roles and finally furnishes every room. All
//! randomness comes from a single ChaCha stream seeded from the config, so a
//! seed reproduces a level exactly.

use std::collections::BTreeMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::config::{GenerationConfig, RoomSizeRange};
use crate::connect::{ConnectionSet, connect_rooms, shrink_rooms};
use crate::placement::{ContentCatalog, Placement, place_content};
use crate::roles::{RolePlan, assign_roles};
use crate::room::{Room, RoomRole, RoomTree};
use crate::tree::{self, FnVisitor, NodeId, VisitedNode};
use crate::{ConfigError, GenerationError, bsp};

/// A generated level.
#[derive(Debug, Clone, Serialize)]
pub struct Level<H> {
    seed: u64,
    tree: RoomTree,
    connections: ConnectionSet,
    roles: RolePlan,
    placements: BTreeMap<NodeId, Vec<Placement<H>>>,
}

impl<H> Level<H> {
    /// The seed this level was generated from. Feeding it back into the
    /// config reproduces the level.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The full partition tree, inner nodes included.
    #[inline]
    pub fn tree(&self) -> &RoomTree {
        &self.tree
    }

    /// Openings between neighbouring rooms.
    #[inline]
    pub fn connections(&self) -> &ConnectionSet {
        &self.connections
    }

    /// Where the structural roles ended up.
    #[inline]
    pub fn roles(&self) -> &RolePlan {
        &self.roles
    }

    /// Leaf rooms in depth-first order.
    pub fn rooms(&self) -> impl Iterator<Item = (NodeId, &Room)> {
        let tree = &self.tree;
        tree::leaves(tree, tree.root()).map(move |id| (id, &tree[id]))
    }

    /// Number of leaf rooms.
    pub fn room_count(&self) -> usize {
        self.placements.len()
    }

    /// The first room holding `role`, in depth-first order.
    pub fn room_with_role(&self, role: RoomRole) -> Option<NodeId> {
        self.rooms()
            .find(|(_, room)| room.role() == role)
            .map(|(id, _)| id)
    }

    /// Items placed in `room`, in placement order. Empty for non-leaf or
    /// foreign ids.
    pub fn placements(&self, room: NodeId) -> &[Placement<H>] {
        self.placements
            .get(&room)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every room with its placements, in room id order.
    pub fn iter_placements(&self) -> impl Iterator<Item = (NodeId, &[Placement<H>])> {
        self.placements
            .iter()
            .map(|(&id, placed)| (id, placed.as_slice()))
    }
}

/// Generates levels from a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GenerationConfig,
}

impl Generator {
    /// Creates a generator. The config is validated on every run.
    pub fn new(config: GenerationConfig) -> Self {
        Self { config }
    }

    /// The configuration every run uses.
    #[inline]
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Generates a level furnished from `catalog`.
    ///
    /// The config and catalog are validated before any randomness is drawn.
    /// A layout that cannot hold every structural role is retried with the
    /// next seed while the config's attempt budget lasts; other errors are
    /// returned at once.
    pub fn generate<H: Clone>(
        &self,
        catalog: &ContentCatalog<H>,
    ) -> Result<Level<H>, GenerationError> {
        self.config.validate()?;
        catalog.validate()?;

        let base = self.config.resolve_seed();
        let attempts = self.config.attempts();
        let mut attempt = 0;
        loop {
            let seed = attempt_seed(base, attempt);
            let err = match self.build(seed, catalog) {
                Ok(level) => return Ok(level),
                Err(err) => err,
            };
            attempt += 1;
            if attempts == 1 || !err.depends_on_layout() {
                return Err(err.into());
            }
            if attempt == attempts {
                return Err(GenerationError::RetryExhausted {
                    attempts,
                    last: err,
                });
            }
            log::warn!("attempt {attempt}/{attempts} with seed {seed} failed: {err}; retrying");
        }
    }

    /// Generates a level from exactly `seed`, without retrying.
    ///
    /// A `seed` of `0` is used as is.
    pub fn generate_with_seed<H: Clone>(
        &self,
        seed: u64,
        catalog: &ContentCatalog<H>,
    ) -> Result<Level<H>, ConfigError> {
        self.config.validate()?;
        catalog.validate()?;
        self.build(seed, catalog)
    }

    fn build<H: Clone>(
        &self,
        seed: u64,
        catalog: &ContentCatalog<H>,
    ) -> Result<Level<H>, ConfigError> {
        let config = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut tree = bsp::partition(config.bounds, config.room_size.min, &mut rng)?;
        let leaves: Vec<NodeId> = tree::leaves(&tree, tree.root()).collect();
        log::debug!("partitioned {} nodes into {} rooms", tree.len(), leaves.len());

        let connections = connect_rooms(&mut tree, &leaves, &config.opening);
        for &leaf in &leaves {
            if connections.is_isolated(leaf) {
                log::warn!("room {} has no opening to any other room", leaf.index());
            }
        }
        shrink_rooms(&mut tree, &leaves, config.wall_thickness)?;
        report_oversized(&tree, &config.room_size);

        let roles = assign_roles(&mut tree, &mut rng)?;

        let mut placements = BTreeMap::new();
        for &leaf in &leaves {
            let room = &tree[leaf];
            let placed = place_content(room, catalog.pool(room.role()), &config.content, &mut rng)?;
            log::debug!(
                "placed {} items in {} {}",
                placed.len(),
                room.role(),
                leaf.index()
            );
            placements.insert(leaf, placed);
        }

        log::info!(
            "generated level from seed {seed}: {} rooms, {} connections",
            leaves.len(),
            connections.len()
        );
        Ok(Level {
            seed,
            tree,
            connections,
            roles,
            placements,
        })
    }
}

/// Seed of the given retry: `base + attempt`, skipping `0` on wrap-around.
fn attempt_seed(base: u64, attempt: u32) -> u64 {
    let (seed, wrapped) = base.overflowing_add(u64::from(attempt));
    seed + u64::from(wrapped)
}

fn report_oversized(tree: &RoomTree, room_size: &RoomSizeRange) {
    let mut visitor = FnVisitor::new(|node: VisitedNode<'_, Room>| {
        let extents = node.value.bounds().extents();
        if node.is_leaf && !room_size.fits(&extents) {
            log::warn!(
                "room {} at depth {} exceeds the maximum room size: {:?} > {:?}",
                node.id.index(),
                node.depth,
                extents,
                room_size.max
            );
        }
    });
    tree::walk(tree, tree.root(), &mut visitor);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingVolume;
    use crate::placement::ContentPool;

    fn make_catalog() -> ContentCatalog<&'static str> {
        ContentCatalog::new()
            .with_pool(RoomRole::KeyRoom, ContentPool::gated("key", vec!["shelf"]))
            .with_pool(RoomRole::LockedRoom, ContentPool::gated("door", vec!["chest"]))
            .with_pool(RoomRole::Entrance, ContentPool::new(vec!["mat"]))
            .with_pool(RoomRole::TreasureRoom, ContentPool::new(vec!["gold"]))
    }

    fn make_config(max: [f32; 3], seed: u64) -> GenerationConfig {
        GenerationConfig {
            bounds: BoundingVolume::from_arrays([0.0; 3], max).unwrap(),
            seed,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn attempt_seeds_skip_zero() {
        assert_eq!(attempt_seed(7, 0), 7);
        assert_eq!(attempt_seed(7, 3), 10);
        assert_eq!(attempt_seed(u64::MAX, 0), u64::MAX);
        assert_eq!(attempt_seed(u64::MAX, 1), 1);
        assert_eq!(attempt_seed(u64::MAX, 2), 2);
    }

    #[test]
    fn level_reports_its_seed() {
        let level = Generator::new(make_config([40.0, 9.0, 40.0], 123))
            .generate(&make_catalog())
            .unwrap();
        assert_eq!(level.seed(), 123);
        assert_eq!(level.room_count(), level.rooms().count());
    }

    #[test]
    fn rooms_are_furnished_from_their_pool() {
        let level = Generator::new(make_config([40.0, 9.0, 40.0], 5))
            .generate(&make_catalog())
            .unwrap();
        for (id, room) in level.rooms() {
            let placed = level.placements(id);
            match room.role() {
                RoomRole::KeyRoom => assert_eq!(placed[0].content, "key"),
                RoomRole::LockedRoom => assert_eq!(placed[0].content, "door"),
                RoomRole::Exit | RoomRole::EnemyRoom | RoomRole::PuzzleRoom => {
                    assert!(placed.is_empty())
                }
                _ => {}
            }
        }
    }

    #[test]
    fn invalid_catalog_fails_before_generation() {
        let generator = Generator::new(make_config([40.0, 9.0, 40.0], 5));
        let catalog = ContentCatalog::<&str>::new();
        assert_eq!(
            generator.generate(&catalog).unwrap_err(),
            GenerationError::Configuration(ConfigError::MissingMandatoryContent {
                role: RoomRole::KeyRoom
            })
        );
    }

    #[test]
    fn single_room_volume_is_not_retried_by_default() {
        let generator = Generator::new(make_config([7.0, 3.0, 7.0], 5));
        assert_eq!(
            generator.generate(&make_catalog()).unwrap_err(),
            GenerationError::Configuration(ConfigError::InsufficientLeaves {
                leaves: 1,
                required: 4
            })
        );
    }

    #[test]
    fn single_room_volume_exhausts_retries() {
        let config = GenerationConfig {
            max_attempts: 3,
            ..make_config([7.0, 3.0, 7.0], 5)
        };
        let err = Generator::new(config).generate(&make_catalog()).unwrap_err();
        assert_eq!(
            err,
            GenerationError::RetryExhausted {
                attempts: 3,
                last: ConfigError::InsufficientLeaves {
                    leaves: 1,
                    required: 4
                }
            }
        );
    }

    #[test]
    fn explicit_seed_reproduces_level() {
        let generator = Generator::new(make_config([40.0, 9.0, 40.0], 0));
        let a = generator.generate_with_seed(77, &make_catalog()).unwrap();
        let b = generator.generate_with_seed(77, &make_catalog()).unwrap();
        assert_eq!(a.seed(), 77);
        assert_eq!(a.roles(), b.roles());
        assert_eq!(a.connections(), b.connections());
    }
}
