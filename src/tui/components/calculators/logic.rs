//! Logic calculators: truth tables and Karnaugh map minimisation.

use crate::core::boolean::BoolExpr;
use crate::core::kmap::{KarnaughMap, parse_minterms};
use crate::core::modules::ModuleKey;
use crate::core::truth_table::{
    TableError, TruthTable, build_truth_table, build_truth_table_strict,
};
use crate::tui::components::card::{Calculator, ReadoutLine};
use crate::tui::components::field::Field;

const KMAP_VARIABLES: &[&str] = &["2", "3", "4"];

/// Rows of a truth table as aligned text: `A B C │ Out`.
fn table_lines(table: &TruthTable) -> Vec<ReadoutLine> {
    let mut header: String = table
        .variables
        .iter()
        .map(|v| format!("{} ", v.to_ascii_uppercase()))
        .collect();
    header.push_str("│ Out");

    let mut lines = vec![ReadoutLine::Text(header)];
    for row in &table.rows {
        let mut line: String = table
            .variables
            .iter()
            .map(|v| if row.inputs.get(v).copied().unwrap_or(false) { "1 " } else { "0 " })
            .collect();
        line.push_str(if row.output { "│  1" } else { "│  0" });
        lines.push(ReadoutLine::Text(line));
    }
    lines
}

// ============================================================================
// Truth Table
// ============================================================================

pub struct TruthTableCard {
    fields: [Field; 1],
    strict: bool,
}

impl TruthTableCard {
    pub fn new(strict: bool) -> Self {
        Self {
            fields: [Field::text("Expression", "A ∧ B | ¬C")],
            strict,
        }
    }
}

impl Calculator for TruthTableCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::TruthTable
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let text = self.fields[0].value();
        let expr = BoolExpr::new(text);
        let mut lines = vec![ReadoutLine::pair("Normalized", expr.normalized())];

        let table = if self.strict {
            build_truth_table_strict(text)
        } else {
            build_truth_table(text)
        };

        match table {
            Ok(table) => {
                let minterms = table
                    .minterms()
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                lines.extend(table_lines(&table));
                lines.push(ReadoutLine::maybe(
                    "Minterms",
                    (!minterms.is_empty()).then_some(minterms),
                ));
            }
            Err(TableError::NoVariables) => lines.push(ReadoutLine::Hint(
                "Use single-letter variables with ∧ & ∨ | ¬ ~ ⊕ ^ and parentheses".into(),
            )),
            Err(e @ TableError::TooManyVariables(_)) => {
                lines.push(ReadoutLine::Hint(e.to_string()))
            }
            Err(e) => lines.push(ReadoutLine::Error(e.to_string())),
        }
        lines
    }
}

// ============================================================================
// K-Map Solver
// ============================================================================

pub struct KmapCard {
    fields: [Field; 2],
}

impl KmapCard {
    /// `variables` outside 2..=4 start the selector at 3.
    pub fn new(variables: usize) -> Self {
        let selected = match variables {
            2..=4 => variables - 2,
            _ => 1,
        };
        Self {
            fields: [
                Field::choice("Variables", KMAP_VARIABLES, selected),
                Field::text("Minterms", "0,1,3,7"),
            ],
        }
    }

    fn var_count(&self) -> usize {
        self.fields[0].selected() + 2
    }
}

impl Calculator for KmapCard {
    fn key(&self) -> ModuleKey {
        ModuleKey::Kmap
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }

    fn fields_mut(&mut self) -> &mut [Field] {
        &mut self.fields
    }

    fn readout(&self) -> Vec<ReadoutLine> {
        let v = self.var_count();
        let minterms = parse_minterms(self.fields[1].value(), v);
        let map = match KarnaughMap::new(v, &minterms) {
            Ok(map) => map,
            Err(e) => return vec![ReadoutLine::Error(e.to_string())],
        };

        let (row_labels, col_labels) = map.headers();
        let variables: String = map.variables().iter().collect();
        let (row_vars, col_vars) = variables.split_at(variables.len().div_ceil(2));
        let corner = format!("{row_vars}\\{col_vars}");
        let label_width = row_labels
            .first()
            .map_or(0, String::len)
            .max(corner.len());

        let mut lines = vec![ReadoutLine::Text(format!(
            "{corner:<label_width$} │ {}",
            col_labels.join("  ")
        ))];
        for (label, row) in row_labels.iter().zip(map.grid()) {
            let cells = row
                .iter()
                .zip(&col_labels)
                .map(|(set, col)| {
                    let mark = if *set { "1" } else { "0" };
                    format!("{mark:<width$}", width = col.len())
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(ReadoutLine::Text(format!("{label:<label_width$} │ {cells}")));
        }

        lines.push(ReadoutLine::pair("Minimized", map.minimize()));
        lines.push(ReadoutLine::Hint(
            "Greedy grouping: correct, not always minimal".into(),
        ));
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::component::EventHandler;
    use crate::tui::event::TuiEvent;

    fn pair<'a>(lines: &'a [ReadoutLine], label: &str) -> Option<&'a str> {
        lines.iter().find_map(|line| match line {
            ReadoutLine::Pair(l, v) if l == label => Some(v.as_str()),
            _ => None,
        })
    }

    fn texts(lines: &[ReadoutLine]) -> Vec<&str> {
        lines
            .iter()
            .filter_map(|line| match line {
                ReadoutLine::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_truth_table_default_expression() {
        let card = TruthTableCard::new(false);
        let lines = card.readout();
        assert_eq!(pair(&lines, "Normalized"), Some("A∧B∨¬C"));
        let rows = texts(&lines);
        assert_eq!(rows[0], "A B C │ Out");
        assert_eq!(rows.len(), 9);
        assert_eq!(rows[1], "0 0 0 │  1");
        assert_eq!(pair(&lines, "Minterms"), Some("0,2,4,6,7"));
    }

    #[test]
    fn test_truth_table_strict_reports_errors() {
        let mut card = TruthTableCard::new(true);
        card.fields[0].set_text("A &");
        assert!(matches!(card.readout().last(), Some(ReadoutLine::Error(_))));

        let mut lenient = TruthTableCard::new(false);
        lenient.fields[0].set_text("A &");
        assert_eq!(pair(&lenient.readout(), "Minterms"), Some("—"));
    }

    #[test]
    fn test_truth_table_without_variables() {
        let mut card = TruthTableCard::new(false);
        card.fields[0].set_text("1 | 0");
        assert!(matches!(card.readout().last(), Some(ReadoutLine::Hint(_))));
    }

    #[test]
    fn test_truth_table_too_many_variables() {
        let mut card = TruthTableCard::new(false);
        card.fields[0].set_text("a | b | c | d | e | f | g | h | i | j | k | l");
        let lines = card.readout();
        assert_eq!(lines.len(), 2);
        match &lines[1] {
            ReadoutLine::Hint(text) => assert!(text.contains("12 variables")),
            other => panic!("expected a hint, got {other:?}"),
        }
    }

    #[test]
    fn test_kmap_default() {
        let card = KmapCard::new(3);
        let lines = card.readout();
        assert_eq!(pair(&lines, "Minimized"), Some("¬A¬B + BC"));
        let grid = texts(&lines);
        assert_eq!(grid[0], "AB\\C │ 0  1");
        assert_eq!(grid[1], "00   │ 1  1");
        assert_eq!(grid[3], "11   │ 0  1");
    }

    #[test]
    fn test_kmap_variable_selector() {
        let mut card = KmapCard::new(9);
        assert_eq!(card.var_count(), 3);
        card.fields[0].handle_event(&TuiEvent::CursorRight);
        card.fields[1].set_text("0,2,8,10");
        assert_eq!(pair(&card.readout(), "Minimized"), Some("¬B¬D"));
    }

    #[test]
    fn test_kmap_no_minterms() {
        let mut card = KmapCard::new(2);
        card.fields[1].set_text("");
        assert_eq!(pair(&card.readout(), "Minimized"), Some("0"));
    }
}
