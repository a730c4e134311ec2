//! Assignment of structural and flavor roles to leaf rooms.
//!
//! Roles are decided in a strict order, each step seeing the choices of the
//! previous ones:
//!
//! 1. every leaf is reset to [`RoomRole::None`],
//! 2. the first leaf in depth-first order becomes the [`RoomRole::Entrance`],
//! 3. the deepest remaining leaf becomes the [`RoomRole::Exit`],
//! 4. a leaf at least two levels below the root becomes the
//!    [`RoomRole::LockedRoom`],
//! 5. a leaf sharing a non-root ancestor with the lock becomes the
//!    [`RoomRole::KeyRoom`],
//! 6. every other leaf draws a flavor role.
//!
//! Candidates are computed up front, so an unsatisfiable tree fails fast
//! instead of looping on rejected draws.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::room::{Room, RoomRole, RoomTree};
use crate::tree::{self, NodeId, TreeVisitor, VisitedNode};

/// Ancestor levels required above a locked room.
const MIN_LOCKED_ROOM_DEPTH: usize = 2;

/// Leaves excluded from the locked-room draw before the leaf count check.
const EXCLUDED_FROM_LOCK: usize = 1;

/// The roles chosen for every leaf of a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePlan {
    pub entrance: NodeId,
    pub exit: NodeId,
    pub locked_room: NodeId,
    pub key_room: NodeId,
    /// Flavor roles of the remaining leaves, in depth-first order.
    pub flavors: Vec<(NodeId, RoomRole)>,
}

impl RolePlan {
    /// Iterates over every `(leaf, role)` pair of the plan, structural roles
    /// first.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, RoomRole)> + '_ {
        [
            (self.entrance, RoomRole::Entrance),
            (self.exit, RoomRole::Exit),
            (self.locked_room, RoomRole::LockedRoom),
            (self.key_room, RoomRole::KeyRoom),
        ]
        .into_iter()
        .chain(self.flavors.iter().copied())
    }

    /// Returns the role planned for `id`, or [`RoomRole::None`] if the plan
    /// does not mention it.
    pub fn role_of(&self, id: NodeId) -> RoomRole {
        self.iter()
            .find(|&(leaf, _)| leaf == id)
            .map_or(RoomRole::None, |(_, role)| role)
    }
}

/// Finds the deepest leaf, ties going to the first one found.
struct DeepestLeaf {
    skip: NodeId,
    best: Option<(NodeId, usize)>,
}

impl TreeVisitor<Room> for DeepestLeaf {
    fn visit(&mut self, node: VisitedNode<'_, Room>) {
        if !node.is_leaf || node.id == self.skip {
            return;
        }
        if self.best.is_none_or(|(_, depth)| node.depth > depth) {
            self.best = Some((node.id, node.depth));
        }
    }
}

/// Chooses roles for every leaf of `tree` without modifying it.
///
/// Fails with [`ConfigError::InsufficientLeaves`] on trees with fewer than
/// four leaves, and with [`ConfigError::NoEligibleLockedRoom`] if no leaf
/// can host a locked room whose key room is reachable through a shared
/// non-root ancestor. No randomness is consumed when failing.
pub fn plan_roles<R: Rng + ?Sized>(tree: &RoomTree, rng: &mut R) -> Result<RolePlan, ConfigError> {
    let root = tree.root();
    let leaves: Vec<NodeId> = tree::leaves(tree, root).collect();
    if leaves.len() <= EXCLUDED_FROM_LOCK + 2 {
        return Err(ConfigError::InsufficientLeaves {
            leaves: leaves.len(),
            required: EXCLUDED_FROM_LOCK + 3,
        });
    }

    let entrance = leaves[0];
    let mut deepest = DeepestLeaf {
        skip: entrance,
        best: None,
    };
    tree::walk(tree, root, &mut deepest);
    let (exit, _) = deepest.best.ok_or(ConfigError::InsufficientLeaves {
        leaves: leaves.len(),
        required: EXCLUDED_FROM_LOCK + 3,
    })?;

    let lock_candidates: Vec<NodeId> = leaves
        .iter()
        .copied()
        .filter(|&id| id != entrance && id != exit)
        .filter(|&id| tree::depth(tree, id) >= MIN_LOCKED_ROOM_DEPTH)
        .filter(|&id| !key_candidates(tree, id, &[entrance, exit]).is_empty())
        .collect();
    if lock_candidates.is_empty() {
        return Err(ConfigError::NoEligibleLockedRoom);
    }
    let locked_room = lock_candidates[rng.random_range(0..lock_candidates.len())];

    let by_ancestor = key_candidates(tree, locked_room, &[entrance, exit]);
    let keys = &by_ancestor[rng.random_range(0..by_ancestor.len())];
    let key_room = keys[rng.random_range(0..keys.len())];

    let taken = [entrance, exit, locked_room, key_room];
    let flavors = leaves
        .iter()
        .copied()
        .filter(|id| !taken.contains(id))
        .map(|id| {
            let flavor = RoomRole::FLAVORS[rng.random_range(0..RoomRole::FLAVORS.len())];
            (id, flavor)
        })
        .collect();

    Ok(RolePlan {
        entrance,
        exit,
        locked_room,
        key_room,
        flavors,
    })
}

/// Plans roles with [`plan_roles`] and writes them into the tree.
///
/// Every leaf is reset to [`RoomRole::None`] before the plan is applied. On
/// error the tree is left untouched.
pub fn assign_roles<R: Rng + ?Sized>(
    tree: &mut RoomTree,
    rng: &mut R,
) -> Result<RolePlan, ConfigError> {
    let plan = plan_roles(tree, rng)?;

    let leaves: Vec<NodeId> = tree::leaves(tree, tree.root()).collect();
    for &leaf in &leaves {
        tree[leaf].role = RoomRole::None;
    }
    for (leaf, role) in plan.iter() {
        tree[leaf].role = role;
    }

    log::debug!(
        "assigned roles: entrance {:?}, exit {:?}, locked {:?}, key {:?}, {} flavored",
        plan.entrance,
        plan.exit,
        plan.locked_room,
        plan.key_room,
        plan.flavors.len()
    );
    Ok(plan)
}

/// Possible key rooms for a lock at `locked_room`, grouped by the non-root
/// ancestor they share with it (nearest ancestor first).
///
/// Ancestors whose subtree holds no free leaf are left out.
fn key_candidates(tree: &RoomTree, locked_room: NodeId, taken: &[NodeId]) -> Vec<Vec<NodeId>> {
    tree::ancestors(tree, locked_room)
        .filter(|&ancestor| tree.parent(ancestor).is_some())
        .map(|ancestor| {
            tree::leaves(tree, ancestor)
                .filter(|&leaf| leaf != locked_room && !taken.contains(&leaf))
                .collect::<Vec<_>>()
        })
        .filter(|keys| !keys.is_empty())
        .collect()
}
