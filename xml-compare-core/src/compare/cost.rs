//! Cost matrix over one group of same-kind siblings.
//!
//! Rows are the group's slots in the first document, columns the slots in the
//! second. The shorter side is padded with [`SiblingSlot::Absent`] so the
//! matrix is square. A cell holds the full differences of pairing its row with
//! its column; the cost of the cell is how many there are.

use tracing::trace;

use crate::compare::{assignment, Pipeline};
use crate::diff::{DifferenceCode, DifferenceDetails};
use crate::error::CompareError;
use crate::node::Node;

/// A position in a sibling group, possibly padding.
#[derive(Debug, Clone, Copy)]
pub enum SiblingSlot<'a> {
    Present(&'a Node),
    Absent,
}

impl<'a> SiblingSlot<'a> {
    /// `group` followed by `Absent` padding up to `size` slots.
    fn padded(group: &'a [Node], size: usize) -> Vec<Self> {
        group
            .iter()
            .map(SiblingSlot::Present)
            .chain(std::iter::repeat(SiblingSlot::Absent))
            .take(size)
            .collect()
    }

    pub fn node(self) -> Option<&'a Node> {
        match self {
            SiblingSlot::Present(node) => Some(node),
            SiblingSlot::Absent => None,
        }
    }
}

/// Square matrix of pairing costs plus the pairs locked so far.
#[derive(Debug)]
pub struct CostMatrix<'a> {
    simple_path: String,
    rows: Vec<SiblingSlot<'a>>,
    columns: Vec<SiblingSlot<'a>>,
    cells: Vec<Vec<Option<DifferenceDetails>>>,
    row_pairs: Vec<Option<usize>>,
    column_taken: Vec<bool>,
}

impl<'a> CostMatrix<'a> {
    pub fn new(simple_path: impl Into<String>, first: &'a [Node], second: &'a [Node]) -> Self {
        let size = first.len().max(second.len());
        Self {
            simple_path: simple_path.into(),
            rows: SiblingSlot::padded(first, size),
            columns: SiblingSlot::padded(second, size),
            cells: vec![vec![None; size]; size],
            row_pairs: vec![None; size],
            column_taken: vec![false; size],
        }
    }

    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Fill the matrix row by row, locking every zero-cost cell on sight.
    ///
    /// Once a row or column is locked none of its other cells are computed.
    pub fn match_exact(&mut self, pipeline: &Pipeline) -> Result<usize, CompareError> {
        let mut matched = 0;
        for row in 0..self.size() {
            for column in 0..self.size() {
                if self.row_pairs[row].is_some() {
                    break;
                }
                if self.column_taken[column] {
                    continue;
                }
                if self.cell(pipeline, row, column)?.is_best_match() {
                    self.lock(row, column);
                    matched += 1;
                }
            }
        }
        trace!(
            simple_path = %self.simple_path,
            size = self.size(),
            matched,
            "exact sibling matches"
        );
        Ok(matched)
    }

    /// Pair every row still free at minimum total cost.
    pub fn assign_remaining(&mut self, pipeline: &Pipeline) -> Result<(), CompareError> {
        let free_rows: Vec<usize> = (0..self.size())
            .filter(|&row| self.row_pairs[row].is_none())
            .collect();
        let free_columns: Vec<usize> = (0..self.size())
            .filter(|&column| !self.column_taken[column])
            .collect();
        if free_rows.is_empty() {
            return Ok(());
        }

        let mut costs = Vec::with_capacity(free_rows.len());
        for &row in &free_rows {
            let mut line = Vec::with_capacity(free_columns.len());
            for &column in &free_columns {
                line.push(self.cell(pipeline, row, column)?.count() as i64);
            }
            costs.push(line);
        }

        trace!(
            simple_path = %self.simple_path,
            remaining = free_rows.len(),
            "solving sibling assignment"
        );
        for (position, column) in assignment::solve(&costs).into_iter().enumerate() {
            self.lock(free_rows[position], free_columns[column]);
        }
        Ok(())
    }

    /// Locked `(row, column)` pairs, by row.
    pub fn pairs(&self) -> Vec<(usize, usize)> {
        self.row_pairs
            .iter()
            .enumerate()
            .filter_map(|(row, column)| column.map(|column| (row, column)))
            .collect()
    }

    /// Union of the differences of every locked pair.
    pub fn into_details(self) -> DifferenceDetails {
        let mut cells = self.cells;
        let mut details = DifferenceDetails::new();
        for (row, column) in self.row_pairs.iter().enumerate() {
            if let Some(cell) = column.and_then(|column| cells[row][column].take()) {
                details.merge(cell);
            }
        }
        details
    }

    fn lock(&mut self, row: usize, column: usize) {
        self.row_pairs[row] = Some(column);
        self.column_taken[column] = true;
    }

    fn cell(
        &mut self,
        pipeline: &Pipeline,
        row: usize,
        column: usize,
    ) -> Result<&DifferenceDetails, CompareError> {
        let (first, second) = (self.rows[row], self.columns[column]);
        let slot = &mut self.cells[row][column];
        let details = match slot.take() {
            Some(details) => details,
            None => pair(pipeline, &self.simple_path, first, second)?,
        };
        Ok(slot.insert(details))
    }
}

/// Differences of pairing two slots of the group at `simple_path`.
fn pair(
    pipeline: &Pipeline,
    simple_path: &str,
    first: SiblingSlot<'_>,
    second: SiblingSlot<'_>,
) -> Result<DifferenceDetails, CompareError> {
    match (first, second) {
        (SiblingSlot::Present(node1), SiblingSlot::Present(node2)) => pipeline.compare(node1, node2),
        (SiblingSlot::Absent, SiblingSlot::Present(node2)) => DifferenceDetails::of(
            None,
            Some(node2),
            DifferenceCode::MissingElementInFirstDocument,
        ),
        (SiblingSlot::Present(node1), SiblingSlot::Absent) => DifferenceDetails::of(
            Some(node1),
            None,
            DifferenceCode::MissingElementInSecondDocument,
        ),
        (SiblingSlot::Absent, SiblingSlot::Absent) => Err(CompareError::AbsentPair {
            simple_path: simple_path.to_string(),
        }),
    }
}
