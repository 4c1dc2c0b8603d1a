//! # Karnaugh Maps
//!
//! Builds a Karnaugh map for 2 to 4 variables from a list of minterms and
//! simplifies it with a greedy grouping pass.
//!
//! ## Layout
//!
//! The first ⌈v/2⌉ bits of a minterm pick the row, the remaining ⌊v/2⌋ bits
//! pick the column. Both are Gray-coded so neighbouring cells (including
//! across the edges) differ in exactly one variable.
//!
//! ```text
//! v = 3            C=0  C=1
//!          AB=00 [  m0   m1 ]
//!          AB=01 [  m2   m3 ]
//!          AB=11 [  m6   m7 ]
//!          AB=10 [  m4   m5 ]
//! ```
//!
//! ## Simplification
//!
//! Groups are taken greedily in a fixed priority (4×2, 2×2, 1×2, 2×1, single
//! cell), scanning row-major and wrapping around the edges. Each accepted
//! group becomes one product term. This is a heuristic: it never produces a
//! wrong expression, but the result may contain redundant or non-minimal
//! terms because no prime-implicant cover is computed.

use thiserror::Error;

pub const VARIABLE_NAMES: [char; 4] = ['A', 'B', 'C', 'D'];

/// Block shapes tried while grouping, as (height, width).
const OCTET: (usize, usize) = (4, 2);
const QUAD: (usize, usize) = (2, 2);
const PAIR_HORIZONTAL: (usize, usize) = (1, 2);
const PAIR_VERTICAL: (usize, usize) = (2, 1);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KmapError {
    #[error("Karnaugh maps support 2 to 4 variables, not {0}")]
    UnsupportedVariables(usize),
}

pub fn binary_to_gray(n: usize) -> usize {
    n ^ (n >> 1)
}

pub fn gray_to_binary(gray: usize) -> usize {
    let mut binary = gray;
    let mut shifted = gray >> 1;
    while shifted > 0 {
        binary ^= shifted;
        shifted >>= 1;
    }
    binary
}

/// Parse a comma-separated minterm list, keeping only indices valid for
/// `var_count` variables.
pub fn parse_minterms(text: &str, var_count: usize) -> Vec<usize> {
    let limit = 1usize << var_count.min(usize::BITS as usize - 1);
    text.split(',')
        .filter_map(|part| part.trim().parse::<usize>().ok())
        .filter(|m| *m < limit)
        .collect()
}

pub type Cell = (usize, usize);

/// One product term: the cells it groups and, per variable, the constant bit
/// shared by every cell (`None` where the group spans both values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implicant {
    pub cells: Vec<Cell>,
    pub literals: Vec<Option<bool>>,
}

impl Implicant {
    /// Render as a product: `¬A` for a constant 0, `A` for a constant 1,
    /// `1` when no variable is constant.
    pub fn term(&self) -> String {
        let term: String = self
            .literals
            .iter()
            .zip(VARIABLE_NAMES)
            .filter_map(|(lit, name)| match lit {
                Some(true) => Some(name.to_string()),
                Some(false) => Some(format!("¬{name}")),
                None => None,
            })
            .collect();
        if term.is_empty() { "1".to_string() } else { term }
    }

    /// Whether minterm `m` satisfies every literal of this term.
    pub fn covers(&self, m: usize) -> bool {
        let v = self.literals.len();
        self.literals.iter().enumerate().all(|(idx, lit)| match lit {
            Some(bit) => ((m >> (v - 1 - idx)) & 1 == 1) == *bit,
            None => true,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KarnaughMap {
    var_count: usize,
    minterms: Vec<usize>,
    grid: Vec<Vec<bool>>,
}

impl KarnaughMap {
    /// Build the map. Minterms outside `0..2^var_count` are dropped and
    /// duplicates are ignored.
    pub fn new(var_count: usize, minterms: &[usize]) -> Result<Self, KmapError> {
        if !(2..=4).contains(&var_count) {
            return Err(KmapError::UnsupportedVariables(var_count));
        }

        let mut accepted: Vec<usize> = minterms
            .iter()
            .copied()
            .filter(|m| *m < (1 << var_count))
            .collect();
        accepted.sort_unstable();
        accepted.dedup();

        let mut map = Self {
            var_count,
            minterms: Vec::new(),
            grid: vec![vec![false; 1 << (var_count / 2)]; 1 << var_count.div_ceil(2)],
        };
        for &m in &accepted {
            let (row, col) = map.position(m);
            map.grid[row][col] = true;
        }
        map.minterms = accepted;
        Ok(map)
    }

    pub fn var_count(&self) -> usize {
        self.var_count
    }

    pub fn variables(&self) -> &[char] {
        &VARIABLE_NAMES[..self.var_count]
    }

    pub fn minterms(&self) -> &[usize] {
        &self.minterms
    }

    /// Number of truth-table rows that evaluate to 0.
    pub fn maxterm_count(&self) -> usize {
        (1 << self.var_count) - self.minterms.len()
    }

    pub fn grid(&self) -> &[Vec<bool>] {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid[0].len()
    }

    fn row_vars(&self) -> usize {
        self.var_count.div_ceil(2)
    }

    fn col_vars(&self) -> usize {
        self.var_count / 2
    }

    /// Grid cell holding minterm `m`.
    pub fn position(&self, m: usize) -> Cell {
        let col_vars = self.col_vars();
        let row_bits = m >> col_vars;
        let col_bits = m & ((1 << col_vars) - 1);
        (binary_to_gray(row_bits), binary_to_gray(col_bits))
    }

    /// Minterm stored at a grid cell.
    pub fn minterm_at(&self, (row, col): Cell) -> usize {
        (gray_to_binary(row) << self.col_vars()) | gray_to_binary(col)
    }

    /// Binary labels for the row and column headers, in grid order.
    pub fn headers(&self) -> (Vec<String>, Vec<String>) {
        let label = |index: usize, width: usize| format!("{:0width$b}", gray_to_binary(index));
        let row_vars = self.row_vars();
        let col_vars = self.col_vars();
        let rows = (0..self.rows()).map(|r| label(r, row_vars)).collect();
        let cols = (0..self.cols()).map(|c| label(c, col_vars)).collect();
        (rows, cols)
    }

    /// Greedy grouping of every set cell.
    pub fn implicants(&self) -> Vec<Implicant> {
        let mut visited = vec![vec![false; self.cols()]; self.rows()];
        let mut groups: Vec<Vec<Cell>> = Vec::new();

        for shape in [OCTET, QUAD] {
            for row in 0..self.rows() {
                for col in 0..self.cols() {
                    if !self.grid[row][col] || visited[row][col] {
                        continue;
                    }
                    if let Some(block) = self.block_at((row, col), shape) {
                        mark(&mut visited, &block);
                        groups.push(block);
                    }
                }
            }
        }

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if !self.grid[row][col] || visited[row][col] {
                    continue;
                }
                let block = self
                    .block_at((row, col), PAIR_HORIZONTAL)
                    .or_else(|| self.block_at((row, col), PAIR_VERTICAL))
                    .unwrap_or_else(|| vec![(row, col)]);
                mark(&mut visited, &block);
                groups.push(block);
            }
        }

        groups.into_iter().map(|cells| self.implicant(cells)).collect()
    }

    /// The simplified sum of products, `0` when no cell is set.
    pub fn minimize(&self) -> String {
        let terms: Vec<String> = self.implicants().iter().map(Implicant::term).collect();
        if terms.is_empty() {
            "0".to_string()
        } else {
            terms.join(" + ")
        }
    }

    /// The `height`×`width` block anchored at `start`, wrapping at the edges,
    /// if every cell in it is set. Cells repeat when the block is larger than
    /// the grid; repeats are kept once.
    fn block_at(&self, (start_row, start_col): Cell, (height, width): (usize, usize)) -> Option<Vec<Cell>> {
        let mut cells = Vec::with_capacity(height * width);
        for r in 0..height {
            for c in 0..width {
                let cell = ((start_row + r) % self.rows(), (start_col + c) % self.cols());
                if !self.grid[cell.0][cell.1] {
                    return None;
                }
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        Some(cells)
    }

    fn implicant(&self, cells: Vec<Cell>) -> Implicant {
        let v = self.var_count;
        let minterms: Vec<usize> = cells.iter().map(|cell| self.minterm_at(*cell)).collect();
        let literals = (0..v)
            .map(|idx| {
                let bit = |m: usize| (m >> (v - 1 - idx)) & 1 == 1;
                let first = bit(minterms[0]);
                minterms.iter().all(|m| bit(*m) == first).then_some(first)
            })
            .collect();
        Implicant { cells, literals }
    }

    /// Tab-separated grid with Gray-code headers.
    pub fn to_tsv(&self) -> String {
        let (row_labels, col_labels) = self.headers();
        let mut out = String::from("\t");
        for label in &col_labels {
            out.push_str(label);
            out.push('\t');
        }
        out.push('\n');
        for (label, row) in row_labels.iter().zip(&self.grid) {
            out.push_str(label);
            out.push('\t');
            for cell in row {
                out.push(if *cell { '1' } else { '0' });
                out.push('\t');
            }
            out.push('\n');
        }
        out
    }
}

fn mark(visited: &mut [Vec<bool>], cells: &[Cell]) {
    for &(r, c) in cells {
        visited[r][c] = true;
    }
}
