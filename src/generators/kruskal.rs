use rand::{rngs::StdRng, seq::SliceRandom};

use crate::maze::{Grid, Point};

struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // Path compression
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    fn unite(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        true
    }
}

/// Joint between two rooms two cells apart
#[derive(Clone, Copy)]
struct Edge {
    room1: Point,
    room2: Point,
}

/// Disjoint-set spanning tree: visit every joint in random order and carve it only when it
/// connects two separate components.
pub fn randomized_kruskal(grid: &mut Grid, rng: &mut StdRng) {
    let (rows, cols) = (grid.rows(), grid.cols());
    let room_cols = (cols - 1) / 2;
    let room_index = |p: Point| (p.row / 2) * room_cols + p.col / 2;

    let mut uf = UnionFind::new(grid.rooms().count());

    let mut edges = grid
        .rooms()
        .flat_map(|room| {
            [
                (room.col + 2 < cols - 1).then(|| Edge {
                    room1: room,
                    room2: Point::new(room.row, room.col + 2),
                }),
                (room.row + 2 < rows - 1).then(|| Edge {
                    room1: room,
                    room2: Point::new(room.row + 2, room.col),
                }),
            ]
        })
        .flatten()
        .collect::<Vec<_>>();

    edges.shuffle(rng);

    for Edge { room1, room2 } in edges {
        if uf.unite(room_index(room1), room_index(room2)) {
            grid.join_rooms(room1, room2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generators::tests::assert_spanning_tree, maze::get_rng};

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);
        assert!(uf.unite(0, 1));
        assert!(uf.unite(3, 4));
        assert!(!uf.unite(1, 0));
        assert!(uf.unite(1, 4));
        assert_eq!(uf.find(0), uf.find(3));
        assert_ne!(uf.find(2), uf.find(0));
    }

    #[test]
    fn test_randomized_kruskal_spanning_tree() {
        for seed in 0..5 {
            let mut grid = Grid::new(11, 27);
            randomized_kruskal(&mut grid, &mut get_rng(Some(seed)));
            assert_spanning_tree(&grid);
        }
    }
}
