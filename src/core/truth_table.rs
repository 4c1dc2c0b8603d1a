//! Truth tables for [`BoolExpr`].
//!
//! Rows enumerate assignments in binary counting order with the first
//! (alphabetically smallest) variable as the most significant bit.
//!
//! Tables stop at [`MAX_VARIABLES`]: beyond that the row count outgrows
//! anything a terminal can show.

use thiserror::Error;

use super::boolean::{Assignment, BoolExpr, ParseError};

pub const MAX_VARIABLES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("expression has no single-letter variables")]
    NoVariables,
    #[error("{0} variables is too many; truth tables stop at {MAX_VARIABLES}")]
    TooManyVariables(usize),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthRow {
    pub inputs: Assignment,
    pub output: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    pub variables: Vec<char>,
    pub rows: Vec<TruthRow>,
}

/// Value of the variable at sorted position `idx` in row `row`.
pub fn row_bit(row: usize, idx: usize, var_count: usize) -> bool {
    (row >> (var_count - 1 - idx)) & 1 == 1
}

/// Build the table for `text`. Malformed rows evaluate to false, so the only
/// errors are about the variable count.
pub fn build_truth_table(text: &str) -> Result<TruthTable, TableError> {
    let expr = BoolExpr::new(text);
    build_rows(&expr, |expr, inputs| Ok(expr.evaluate(inputs)))
}

/// Like [`build_truth_table`], but the first malformed evaluation aborts
/// with its parse error.
pub fn build_truth_table_strict(text: &str) -> Result<TruthTable, TableError> {
    let expr = BoolExpr::new(text);
    build_rows(&expr, BoolExpr::evaluate_strict)
}

fn build_rows<F>(expr: &BoolExpr, eval: F) -> Result<TruthTable, TableError>
where
    F: Fn(&BoolExpr, &Assignment) -> Result<bool, ParseError>,
{
    let variables = expr.variables().to_vec();
    let v = variables.len();
    if v == 0 {
        return Err(TableError::NoVariables);
    }
    if v > MAX_VARIABLES {
        return Err(TableError::TooManyVariables(v));
    }

    let mut rows = Vec::with_capacity(1 << v);
    for i in 0..(1usize << v) {
        let inputs: Assignment = variables
            .iter()
            .enumerate()
            .map(|(idx, var)| (*var, row_bit(i, idx, v)))
            .collect();
        let output = eval(expr, &inputs)?;
        rows.push(TruthRow { inputs, output });
    }

    Ok(TruthTable { variables, rows })
}

impl TruthTable {
    /// Indices of the rows whose output is true, usable as K-map minterms.
    pub fn minterms(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.output)
            .map(|(i, _)| i)
            .collect()
    }

    /// Tab-separated rendering: header, dashed rule, one line per row.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        for var in &self.variables {
            out.push(var.to_ascii_uppercase());
            out.push('\t');
        }
        out.push_str("Output\n");
        out.push_str(&"-".repeat((self.variables.len() + 1) * 8));
        out.push('\n');
        for row in &self.rows {
            for var in &self.variables {
                let bit = row.inputs.get(var).copied().unwrap_or(false);
                out.push(if bit { '1' } else { '0' });
                out.push('\t');
            }
            out.push(if row.output { '1' } else { '0' });
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xor_table_order_and_outputs() {
        let table = build_truth_table("A ^ B").unwrap();
        assert_eq!(table.variables, vec!['a', 'b']);
        assert_eq!(table.rows.len(), 4);

        let inputs: Vec<(bool, bool)> = table
            .rows
            .iter()
            .map(|r| (r.inputs[&'a'], r.inputs[&'b']))
            .collect();
        assert_eq!(
            inputs,
            vec![(false, false), (false, true), (true, false), (true, true)]
        );

        let outputs: Vec<bool> = table.rows.iter().map(|r| r.output).collect();
        assert_eq!(outputs, vec![false, true, true, false]);
    }

    #[test]
    fn test_no_variables_no_table() {
        assert_eq!(build_truth_table("1 & 0"), Err(TableError::NoVariables));
        assert_eq!(build_truth_table(""), Err(TableError::NoVariables));
        assert_eq!(build_truth_table_strict("1 | 0"), Err(TableError::NoVariables));
    }

    #[test]
    fn test_variable_cap() {
        let at_cap = "a & b & c & d & e & f & g & h & i & j";
        let table = build_truth_table(at_cap).unwrap();
        assert_eq!(table.rows.len(), 1 << MAX_VARIABLES);
        assert_eq!(table.minterms(), vec![(1 << MAX_VARIABLES) - 1]);

        let over = "a & b & c & d & e & f & g & h & i & j & k";
        assert_eq!(build_truth_table(over), Err(TableError::TooManyVariables(11)));
        let alphabet: Vec<String> = ('a'..='z').map(String::from).collect();
        assert_eq!(
            build_truth_table_strict(&alphabet.join(" ^ ")),
            Err(TableError::TooManyVariables(26))
        );
    }

    #[test]
    fn test_malformed_rows_are_false() {
        let table = build_truth_table("A &").unwrap();
        assert!(table.rows.iter().all(|r| !r.output));
        assert!(matches!(
            build_truth_table_strict("A &"),
            Err(TableError::Parse(_))
        ));
    }

    #[test]
    fn test_minterms() {
        let table = build_truth_table("A | B").unwrap();
        assert_eq!(table.minterms(), vec![1, 2, 3]);
    }

    #[test]
    fn test_tsv() {
        let table = build_truth_table("a & b").unwrap();
        let tsv = table.to_tsv();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "A\tB\tOutput");
        assert_eq!(lines[1], "-".repeat(24));
        assert_eq!(lines[2], "0\t0\t0");
        assert_eq!(lines[5], "1\t1\t1");
    }
}
