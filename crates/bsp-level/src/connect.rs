//! Room connectivity: which leaf rooms share a border large enough to walk
//! through.

use serde::{Deserialize, Serialize};

use crate::room::RoomTree;
use crate::tree::NodeId;
use crate::{Axis, BoundingVolume, ConfigError};

/// Minimum clearance of an opening between two rooms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpeningSize {
    /// Required horizontal clearance, along either X or Z.
    pub width: f32,
    /// Required vertical clearance.
    pub height: f32,
}

impl Default for OpeningSize {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 2.0,
        }
    }
}

/// An opening between two leaf rooms.
///
/// Connections are unordered: the pair is stored with the smaller id first,
/// so `(a, b)` and `(b, a)` describe the same connection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    rooms: [NodeId; 2],
    border: BoundingVolume,
}

impl Connection {
    /// Creates a connection between `a` and `b` through `border`.
    pub fn new(a: NodeId, b: NodeId, border: BoundingVolume) -> Self {
        let rooms = if a <= b { [a, b] } else { [b, a] };
        Self { rooms, border }
    }

    /// The two connected rooms, smaller id first.
    #[inline]
    pub fn rooms(&self) -> [NodeId; 2] {
        self.rooms
    }

    /// The shared border volume (flat along the axis the rooms meet on).
    #[inline]
    pub fn border(&self) -> &BoundingVolume {
        &self.border
    }

    /// Returns `true` if `room` is one of the two ends.
    #[inline]
    pub fn involves(&self, room: NodeId) -> bool {
        self.rooms.contains(&room)
    }

    /// Returns the end opposite to `room`, or `None` if `room` is not an end.
    pub fn other(&self, room: NodeId) -> Option<NodeId> {
        match self.rooms {
            [a, b] if a == room => Some(b),
            [a, b] if b == room => Some(a),
            _ => None,
        }
    }
}

/// All connections of a level, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSet {
    connections: Vec<Connection>,
}

impl ConnectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connection. Returns `false` (and records nothing) if the
    /// pair is already connected or both ends are the same room.
    pub fn insert(&mut self, connection: Connection) -> bool {
        let [a, b] = connection.rooms();
        if a == b || self.contains(a, b) {
            return false;
        }
        self.connections.push(connection);
        true
    }

    /// Number of connected pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` if no rooms are connected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connections in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Connection> {
        self.connections.iter()
    }

    /// Returns the connection between `a` and `b`, in either order.
    pub fn get(&self, a: NodeId, b: NodeId) -> Option<&Connection> {
        let key = if a <= b { [a, b] } else { [b, a] };
        self.connections.iter().find(|c| c.rooms() == key)
    }

    /// Returns `true` if `a` and `b` are connected, in either order.
    pub fn contains(&self, a: NodeId, b: NodeId) -> bool {
        self.get(a, b).is_some()
    }

    /// Rooms connected to `room`, in discovery order.
    pub fn neighbours(&self, room: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.connections.iter().filter_map(move |c| c.other(room))
    }

    /// Returns `true` if `room` has no connections.
    pub fn is_isolated(&self, room: NodeId) -> bool {
        self.neighbours(room).next().is_none()
    }
}

/// Returns the border shared by two volumes, `[max(min1, min2),
/// min(max1, max2)]`, or `None` if they do not touch.
#[inline]
pub fn shared_border(a: &BoundingVolume, b: &BoundingVolume) -> Option<BoundingVolume> {
    a.intersection(b)
}

/// Returns the shared border of `a` and `b` if it is large enough for an
/// opening: full vertical clearance and enough width along X or Z.
pub fn can_connect(
    a: &BoundingVolume,
    b: &BoundingVolume,
    opening: &OpeningSize,
) -> Option<BoundingVolume> {
    let border = shared_border(a, b)?;
    let tall_enough = border.extent(Axis::Y) >= opening.height;
    let wide_enough =
        border.extent(Axis::X) >= opening.width || border.extent(Axis::Z) >= opening.width;
    (tall_enough && wide_enough).then_some(border)
}

/// Tests every unordered pair of `leaves` and connects those that share a
/// large enough border.
///
/// Each connection is recorded once in the returned set and in both rooms'
/// connection lists. Ids that do not belong to `tree` are ignored. Finding no
/// openings at all is not an error.
pub fn connect_rooms(
    tree: &mut RoomTree,
    leaves: &[NodeId],
    opening: &OpeningSize,
) -> ConnectionSet {
    let rooms: Vec<(NodeId, BoundingVolume)> = leaves
        .iter()
        .filter_map(|&id| tree.get(id).map(|room| (id, *room.bounds())))
        .collect();

    let mut connections = ConnectionSet::new();
    for (i, (a, bounds_a)) in rooms.iter().enumerate() {
        for (b, bounds_b) in &rooms[i + 1..] {
            if let Some(border) = can_connect(bounds_a, bounds_b, opening) {
                if connections.insert(Connection::new(*a, *b, border)) {
                    tree[*a].connections.insert(*b);
                    tree[*b].connections.insert(*a);
                }
            }
        }
    }
    log::debug!(
        "connected {} rooms with {} openings",
        rooms.len(),
        connections.len()
    );
    connections
}

/// Returns `true` if both rooms list each other as connected.
pub fn connected(tree: &RoomTree, a: NodeId, b: NodeId) -> bool {
    match (tree.get(a), tree.get(b)) {
        (Some(room_a), Some(room_b)) => {
            room_a.connections().contains(&b) && room_b.connections().contains(&a)
        }
        _ => false,
    }
}

/// Carves walls out of each leaf: its interior becomes its bounds shrunk by
/// half of `wall_thickness` on every side, so neighbouring rooms end up one
/// wall thickness apart.
///
/// Partition bounds are left untouched. If any interior would turn inside
/// out, nothing is modified and an error is returned.
pub fn shrink_rooms(
    tree: &mut RoomTree,
    leaves: &[NodeId],
    wall_thickness: f32,
) -> Result<(), ConfigError> {
    let by = wall_thickness * 0.5;
    let interiors = leaves
        .iter()
        .filter_map(|&id| tree.get(id).map(|room| (id, room.bounds().shrink(by))))
        .map(|(id, interior)| interior.map(|interior| (id, interior)))
        .collect::<Result<Vec<_>, _>>()?;

    for (id, interior) in interiors {
        tree[id].set_interior(interior);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::Room;

    fn make_volume(min: [f32; 3], max: [f32; 3]) -> BoundingVolume {
        BoundingVolume::from_arrays(min, max).unwrap()
    }

    fn opening(height: f32, width: f32) -> OpeningSize {
        OpeningSize { width, height }
    }

    /// Root split along X; the right half is split again into two floors.
    fn make_tree() -> (RoomTree, Vec<NodeId>) {
        let mut tree = RoomTree::new(Room::new(make_volume([0.0; 3], [8.0, 6.0, 4.0]), None));
        let [left, right] = tree.split(
            tree.root(),
            Room::new(make_volume([0.0; 3], [4.0, 6.0, 4.0]), None),
            Room::new(make_volume([4.0, 0.0, 0.0], [8.0, 6.0, 4.0]), None),
        );
        let [low, high] = tree.split(
            right,
            Room::new(make_volume([4.0, 0.0, 0.0], [8.0, 3.0, 4.0]), None),
            Room::new(make_volume([4.0, 3.0, 0.0], [8.0, 6.0, 4.0]), None),
        );
        (tree, vec![left, low, high])
    }

    #[test]
    fn side_by_side_rooms_connect() {
        let a = make_volume([0.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let b = make_volume([4.0, 0.0, 0.0], [8.0, 3.0, 4.0]);
        let border = can_connect(&a, &b, &opening(2.0, 2.0)).unwrap();
        assert_eq!(border, make_volume([4.0, 0.0, 0.0], [4.0, 3.0, 4.0]));
    }

    #[test]
    fn low_border_does_not_connect() {
        let a = make_volume([0.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let b = make_volume([4.0, 2.0, 0.0], [8.0, 5.0, 4.0]);
        assert!(shared_border(&a, &b).is_some());
        assert!(can_connect(&a, &b, &opening(2.0, 2.0)).is_none());
    }

    #[test]
    fn narrow_border_does_not_connect() {
        let a = make_volume([0.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let b = make_volume([4.0, 0.0, 3.0], [8.0, 3.0, 7.0]);
        assert!(can_connect(&a, &b, &opening(2.0, 2.0)).is_none());
        assert!(can_connect(&a, &b, &opening(2.0, 1.0)).is_some());
    }

    #[test]
    fn stacked_rooms_do_not_connect() {
        let a = make_volume([0.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let b = make_volume([0.0, 3.0, 0.0], [4.0, 6.0, 4.0]);
        assert!(shared_border(&a, &b).is_some());
        assert!(can_connect(&a, &b, &opening(2.0, 2.0)).is_none());
    }

    #[test]
    fn connect_rooms_is_symmetric() {
        let (mut tree, leaves) = make_tree();
        let connections = connect_rooms(&mut tree, &leaves, &opening(2.0, 2.0));

        // Left room (full height) touches both stacked rooms; stacked rooms
        // share only a floor.
        assert_eq!(connections.len(), 2);
        assert!(connected(&tree, leaves[0], leaves[1]));
        assert!(connected(&tree, leaves[1], leaves[0]));
        assert!(connected(&tree, leaves[0], leaves[2]));
        assert!(!connected(&tree, leaves[1], leaves[2]));
        for connection in connections.iter() {
            let [a, b] = connection.rooms();
            assert!(tree[a].connections().contains(&b));
            assert!(tree[b].connections().contains(&a));
        }
    }

    #[test]
    fn connection_set_ignores_duplicates() {
        let border = make_volume([4.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let (_, leaves) = make_tree();
        let mut set = ConnectionSet::new();
        assert!(set.insert(Connection::new(leaves[0], leaves[1], border)));
        assert!(!set.insert(Connection::new(leaves[1], leaves[0], border)));
        assert!(!set.insert(Connection::new(leaves[2], leaves[2], border)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.neighbours(leaves[1]).collect::<Vec<_>>(), vec![leaves[0]]);
        assert!(set.is_isolated(leaves[2]));
    }

    #[test]
    fn connection_other_end() {
        let border = make_volume([4.0, 0.0, 0.0], [4.0, 3.0, 4.0]);
        let (_, leaves) = make_tree();
        let connection = Connection::new(leaves[1], leaves[0], border);
        assert_eq!(connection.rooms(), [leaves[0], leaves[1]]);
        assert_eq!(connection.other(leaves[0]), Some(leaves[1]));
        assert_eq!(connection.other(leaves[2]), None);
        assert!(connection.involves(leaves[1]));
        assert!(!connection.involves(leaves[2]));
    }

    #[test]
    fn no_openings_is_not_an_error() {
        let (mut tree, leaves) = make_tree();
        let connections = connect_rooms(&mut tree, &leaves, &opening(10.0, 2.0));
        assert!(connections.is_empty());
        assert!(leaves.iter().all(|&id| tree[id].connections().is_empty()));
    }

    #[test]
    fn shrink_rooms_only_touches_interiors() {
        let (mut tree, leaves) = make_tree();
        shrink_rooms(&mut tree, &leaves, 0.5).unwrap();
        let room = &tree[leaves[0]];
        assert_eq!(room.bounds(), &make_volume([0.0; 3], [4.0, 6.0, 4.0]));
        assert_eq!(
            room.interior(),
            &make_volume([0.25, 0.25, 0.25], [3.75, 5.75, 3.75])
        );
    }

    #[test]
    fn shrink_rooms_is_all_or_nothing() {
        let (mut tree, leaves) = make_tree();
        // 3.5 / 2 shrinks the 3-high rooms past their center.
        assert!(shrink_rooms(&mut tree, &leaves, 3.5).is_err());
        assert!(leaves
            .iter()
            .all(|&id| tree[id].interior() == tree[id].bounds()));
    }
}
