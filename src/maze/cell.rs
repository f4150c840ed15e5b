use super::Direction;

/// Upper bound on concurrently running agents. Each agent owns one seen bit and one paint bit.
pub const MAX_AGENTS: usize = 4;

/// A packed bit record for one grid position.
///
/// Layout, low to high:
/// - bits 0..4: wall flags (north, south, east, west)
/// - bit 4: passage
/// - bit 5: incorporated by the builder
/// - bit 6: on the current random walk (loop-erased walk only)
/// - bits 7..10: backtrack direction (0 means unset)
/// - bit 10: start, bit 11: goal
/// - bits 12..16: per-agent seen flags
/// - bits 16..20: per-agent paint flags
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell(u32);

impl Cell {
    pub const NORTH_WALL: u32 = 1 << 0;
    pub const SOUTH_WALL: u32 = 1 << 1;
    pub const EAST_WALL: u32 = 1 << 2;
    pub const WEST_WALL: u32 = 1 << 3;
    pub const WALL_MASK: u32 = 0b1111;
    pub const PASSAGE: u32 = 1 << 4;
    pub const BUILDER: u32 = 1 << 5;
    pub const WALK: u32 = 1 << 6;
    const MARKER_SHIFT: u32 = 7;
    const MARKER_MASK: u32 = 0b111 << Self::MARKER_SHIFT;
    pub const START: u32 = 1 << 10;
    pub const GOAL: u32 = 1 << 11;
    const SEEN_SHIFT: u32 = 12;
    pub const SEEN_MASK: u32 = 0b1111 << Self::SEEN_SHIFT;
    const PAINT_SHIFT: u32 = 16;
    pub const PAINT_MASK: u32 = 0b1111 << Self::PAINT_SHIFT;

    /// A fully walled, uncarved cell.
    pub const WALLED: Cell = Cell(Self::WALL_MASK);

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag
    }

    pub fn intersects(self, mask: u32) -> bool {
        self.0 & mask != 0
    }

    pub fn insert(&mut self, flag: u32) {
        self.0 |= flag;
    }

    pub fn remove(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    pub fn is_passage(self) -> bool {
        self.contains(Self::PASSAGE)
    }

    pub fn is_start(self) -> bool {
        self.contains(Self::START)
    }

    pub fn is_goal(self) -> bool {
        self.contains(Self::GOAL)
    }

    pub fn has_wall(self, direction: Direction) -> bool {
        self.contains(direction.wall_bit())
    }

    /// The four wall flags as a nibble, in `NORTH | SOUTH | EAST | WEST` order.
    pub fn walls(self) -> u32 {
        self.0 & Self::WALL_MASK
    }

    /// Direction back toward the cell this one was carved or walked from.
    pub fn backtrack(self) -> Option<Direction> {
        match (self.0 & Self::MARKER_MASK) >> Self::MARKER_SHIFT {
            1 => Some(Direction::North),
            2 => Some(Direction::South),
            3 => Some(Direction::East),
            4 => Some(Direction::West),
            _ => None,
        }
    }

    pub fn set_backtrack(&mut self, direction: Option<Direction>) {
        let mark = match direction {
            None => 0,
            Some(Direction::North) => 1,
            Some(Direction::South) => 2,
            Some(Direction::East) => 3,
            Some(Direction::West) => 4,
        };
        self.0 = (self.0 & !Self::MARKER_MASK) | (mark << Self::MARKER_SHIFT);
    }

    pub fn seen_bit(agent: usize) -> u32 {
        debug_assert!(agent < MAX_AGENTS);
        1 << (Self::SEEN_SHIFT + agent as u32)
    }

    pub fn paint_bit(agent: usize) -> u32 {
        debug_assert!(agent < MAX_AGENTS);
        1 << (Self::PAINT_SHIFT + agent as u32)
    }

    pub fn is_seen_by(self, agent: usize) -> bool {
        self.contains(Self::seen_bit(agent))
    }

    pub fn is_painted_by(self, agent: usize) -> bool {
        self.contains(Self::paint_bit(agent))
    }

    /// Paint flags shifted down to a nibble where bit `i` is agent `i`.
    pub fn paint(self) -> u32 {
        (self.0 & Self::PAINT_MASK) >> Self::PAINT_SHIFT
    }
}
