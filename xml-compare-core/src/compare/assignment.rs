//! Minimum-cost pairing of sibling slots (Hungarian method).
//!
//! Rows are matched one at a time along shortest alternating paths over
//! reduced costs, O(n^3) overall. The matrices fed in are what remains of a
//! sibling group after exact matches were locked, so `n` stays small.

const UNREACHABLE: i64 = i64::MAX / 4;

/// Row-to-column assignment minimizing the total cost of a square matrix.
///
/// `result[row]` is the column paired with `row`.
pub(crate) fn solve(costs: &[Vec<i64>]) -> Vec<usize> {
    debug_assert!(costs.iter().all(|row| row.len() == costs.len()));
    let mut state = Potentials::new(costs);
    for row in 0..costs.len() {
        state.augment(row);
    }
    state.into_assignment()
}

/// Dual potentials plus the partial matching they support.
///
/// Every matched cell has a reduced cost of zero and no cell is negative.
struct Potentials<'c> {
    costs: &'c [Vec<i64>],
    row: Vec<i64>,
    column: Vec<i64>,
    owner: Vec<Option<usize>>,
}

/// Shortest alternating path search from one free row.
struct Search {
    slack: Vec<i64>,
    reached: Vec<bool>,
    /// Column preceding each column on the path; `None` for the free row.
    via: Vec<Option<usize>>,
}

impl<'c> Potentials<'c> {
    fn new(costs: &'c [Vec<i64>]) -> Self {
        let size = costs.len();
        Self {
            costs,
            row: vec![0; size],
            column: vec![0; size],
            owner: vec![None; size],
        }
    }

    fn reduced(&self, row: usize, column: usize) -> i64 {
        self.costs[row][column] - self.row[row] - self.column[column]
    }

    /// Match `free_row`, re-pairing matched rows along the cheapest path.
    fn augment(&mut self, free_row: usize) {
        let size = self.costs.len();
        let mut search = Search {
            slack: vec![UNREACHABLE; size],
            reached: vec![false; size],
            via: vec![None; size],
        };

        let mut row = free_row;
        let mut from = None;
        let end = loop {
            let (delta, next) = self.relax(&mut search, row, from);
            self.shift(&mut search, free_row, delta);
            search.reached[next] = true;
            match self.owner[next] {
                Some(owner) => {
                    row = owner;
                    from = Some(next);
                }
                None => break next,
            }
        };

        let mut column = end;
        while let Some(previous) = search.via[column] {
            self.owner[column] = self.owner[previous];
            column = previous;
        }
        self.owner[column] = Some(free_row);
    }

    /// Tighten slacks through `row`; return the smallest slack and its column.
    fn relax(&self, search: &mut Search, row: usize, from: Option<usize>) -> (i64, usize) {
        let mut best = (UNREACHABLE, 0);
        for column in 0..self.costs.len() {
            if search.reached[column] {
                continue;
            }
            let reduced = self.reduced(row, column);
            if reduced < search.slack[column] {
                search.slack[column] = reduced;
                search.via[column] = from;
            }
            if search.slack[column] < best.0 {
                best = (search.slack[column], column);
            }
        }
        best
    }

    /// Move the potentials of the explored tree by `delta`.
    fn shift(&mut self, search: &mut Search, free_row: usize, delta: i64) {
        self.row[free_row] += delta;
        for column in 0..self.costs.len() {
            if search.reached[column] {
                if let Some(owner) = self.owner[column] {
                    self.row[owner] += delta;
                }
                self.column[column] -= delta;
            } else {
                search.slack[column] -= delta;
            }
        }
    }

    fn into_assignment(self) -> Vec<usize> {
        let mut assignment = vec![0; self.owner.len()];
        for (column, owner) in self.owner.into_iter().enumerate() {
            if let Some(row) = owner {
                assignment[row] = column;
            }
        }
        assignment
    }
}

#[cfg(test)]
mod tests {
    use super::solve;

    fn total(costs: &[Vec<i64>], assignment: &[usize]) -> i64 {
        assignment
            .iter()
            .enumerate()
            .map(|(row, &column)| costs[row][column])
            .sum()
    }

    #[test]
    fn finds_minimal_total() {
        let costs = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        let assignment = solve(&costs);
        assert_eq!(total(&costs, &assignment), 5);
    }

    #[test]
    fn assignment_is_a_permutation() {
        let costs = vec![
            vec![7, 3, 9, 1],
            vec![2, 8, 4, 6],
            vec![5, 5, 5, 5],
            vec![1, 9, 2, 3],
        ];
        let mut columns = solve(&costs);
        columns.sort_unstable();
        assert_eq!(columns, vec![0, 1, 2, 3]);
    }

    #[test]
    fn prefers_diagonal_zeros() {
        let costs = vec![vec![0, 3], vec![3, 0]];
        assert_eq!(solve(&costs), vec![0, 1]);

        let crossed = vec![vec![2, 0], vec![0, 2]];
        assert_eq!(solve(&crossed), vec![1, 0]);
    }

    #[test]
    fn empty_matrix_has_empty_assignment() {
        assert!(solve(&[]).is_empty());
    }

    #[test]
    fn rematches_earlier_rows_when_cheaper_overall() {
        // Row 0 alone would take column 0; row 1 needs it more.
        let costs = vec![vec![1, 2, 9], vec![1, 9, 9], vec![9, 9, 1]];
        let assignment = solve(&costs);
        assert_eq!(assignment, vec![1, 0, 2]);
        assert_eq!(total(&costs, &assignment), 4);
    }

    #[test]
    fn single_cell() {
        assert_eq!(solve(&[vec![42]]), vec![0]);
    }
}
