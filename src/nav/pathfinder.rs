//! Best-first shortest-path search over open grid cells.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::grid::Cell;

/// Open-set entry ranked by f = g + h.
///
/// Ties on f are broken by insertion sequence so the heap pops candidates in
/// a stable order and the search is deterministic for a fixed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenEntry {
    f_cost: u32,
    seq: u64,
    cell: Cell,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the std max-heap yields the lowest f first.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a shortest path from `start` to `end` around the given walls.
///
/// The search is best-first with accumulated cost plus a Manhattan heuristic,
/// over 4-connected unit-cost moves with neighbors expanded in the fixed
/// order +x, -x, +y, -y. A cell popped as the current best is finalized and
/// never reopened; a cheaper route discovered to a still-open cell replaces
/// its priority entry (lazy deletion).
///
/// `forbidden` cells are excluded from expansion like temporary walls, but
/// the set is kept distinct from the permanent wall set so callers can route
/// around hazards such as an enemy's current cell.
///
/// Returns the cells from (but excluding) `start` up to and including `end`.
/// When `start == end` or no route exists, returns an empty vector; callers
/// treat that as "no plan available". The wall set is expected to enclose
/// the playable area, as board layouts carry a solid border.
#[must_use]
pub fn find_path(
    start: Cell,
    end: Cell,
    walls: &HashSet<Cell>,
    forbidden: Option<&HashSet<Cell>>,
) -> Vec<Cell> {
    if start == end {
        return Vec::new();
    }

    let blocked =
        |cell: Cell| walls.contains(&cell) || forbidden.is_some_and(|f| f.contains(&cell));
    if blocked(end) {
        return Vec::new();
    }

    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<Cell, u32> = HashMap::new();
    let mut parent: HashMap<Cell, Cell> = HashMap::new();
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut seq = 0u64;

    best_g.insert(start, 0);
    open.push(OpenEntry {
        f_cost: start.manhattan(end),
        seq,
        cell: start,
    });

    while let Some(entry) = open.pop() {
        let current = entry.cell;
        if !closed.insert(current) {
            // Stale entry superseded by a cheaper route before closing.
            continue;
        }

        if current == end {
            return reconstruct(&parent, start, end);
        }

        let Some(&g) = best_g.get(&current) else {
            continue;
        };

        for neighbor in current.neighbors() {
            if blocked(neighbor) || closed.contains(&neighbor) {
                continue;
            }

            let tentative = g + 1;
            if best_g
                .get(&neighbor)
                .is_some_and(|&known| known <= tentative)
            {
                continue;
            }

            best_g.insert(neighbor, tentative);
            parent.insert(neighbor, current);
            seq += 1;
            open.push(OpenEntry {
                f_cost: tentative + neighbor.manhattan(end),
                seq,
                cell: neighbor,
            });
        }
    }

    Vec::new()
}

/// Walk the parent links back from `end`, producing the step sequence.
fn reconstruct(parent: &HashMap<Cell, Cell>, start: Cell, end: Cell) -> Vec<Cell> {
    let mut cells = vec![end];
    let mut cursor = end;
    while let Some(&prev) = parent.get(&cursor) {
        if prev == start {
            break;
        }
        cells.push(prev);
        cursor = prev;
    }
    cells.reverse();
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walls_from(cells: &[(i32, i32)]) -> HashSet<Cell> {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    /// Solid border around a `width` x `height` board.
    fn border(width: i32, height: i32) -> HashSet<Cell> {
        let mut walls = HashSet::new();
        for x in -1..=width {
            walls.insert(Cell::new(x, -1));
            walls.insert(Cell::new(x, height));
        }
        for y in -1..=height {
            walls.insert(Cell::new(-1, y));
            walls.insert(Cell::new(width, y));
        }
        walls
    }

    #[test]
    fn test_straight_line() {
        let walls = border(5, 5);
        let path = find_path(Cell::new(0, 0), Cell::new(3, 0), &walls, None);
        assert_eq!(
            path,
            vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(3, 0)]
        );
    }

    #[test]
    fn test_excludes_start_includes_end() {
        let walls = border(5, 5);
        let path = find_path(Cell::new(1, 1), Cell::new(3, 3), &walls, None);
        assert_eq!(path.len(), 4);
        assert!(!path.contains(&Cell::new(1, 1)));
        assert_eq!(path.last(), Some(&Cell::new(3, 3)));
    }

    #[test]
    fn test_start_equals_end_is_empty() {
        let walls = border(5, 5);
        assert!(find_path(Cell::new(2, 2), Cell::new(2, 2), &walls, None).is_empty());
    }

    #[test]
    fn test_routes_around_wall() {
        let mut walls = border(5, 5);
        // Vertical wall at x = 2 with a gap at y = 4.
        walls.extend(walls_from(&[(2, 0), (2, 1), (2, 2), (2, 3)]));
        let path = find_path(Cell::new(0, 0), Cell::new(4, 0), &walls, None);
        assert_eq!(path.last(), Some(&Cell::new(4, 0)));
        // Detour through the gap: 4 up, 4 across, 4 down.
        assert_eq!(path.len(), 12);
        assert!(path.contains(&Cell::new(2, 4)));
    }

    #[test]
    fn test_unreachable_is_empty() {
        let mut walls = border(5, 5);
        // Seal off the target corner.
        walls.extend(walls_from(&[(3, 4), (4, 3), (3, 3)]));
        assert!(find_path(Cell::new(0, 0), Cell::new(4, 4), &walls, None).is_empty());
    }

    #[test]
    fn test_forbidden_forces_detour() {
        let walls = border(5, 5);
        let direct = find_path(Cell::new(0, 0), Cell::new(2, 0), &walls, None);
        assert_eq!(direct.len(), 2);

        let forbidden = walls_from(&[(1, 0)]);
        let detour = find_path(Cell::new(0, 0), Cell::new(2, 0), &walls, Some(&forbidden));
        assert_eq!(detour.last(), Some(&Cell::new(2, 0)));
        assert!(detour.len() >= direct.len());
        assert!(!detour.contains(&Cell::new(1, 0)));
    }

    #[test]
    fn test_forbidden_can_make_unreachable() {
        let walls = border(3, 1);
        // Single corridor; forbidding the middle cell cuts it.
        let forbidden = walls_from(&[(1, 0)]);
        assert!(find_path(Cell::new(0, 0), Cell::new(2, 0), &walls, Some(&forbidden)).is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_input() {
        let mut walls = border(8, 8);
        walls.extend(walls_from(&[(3, 3), (3, 4), (4, 3), (6, 1), (1, 6)]));
        let first = find_path(Cell::new(0, 0), Cell::new(7, 7), &walls, None);
        let second = find_path(Cell::new(0, 0), Cell::new(7, 7), &walls, None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_open_grid_prefers_plus_x_first() {
        // Tie-break by insertion order expands +x before +y.
        let walls = border(3, 3);
        let path = find_path(Cell::new(0, 0), Cell::new(2, 2), &walls, None);
        assert_eq!(path.len(), 4);
        assert_eq!(path[0], Cell::new(1, 0));
    }
}
