use nalgebra::{DMatrix, DVector};
use prettytable::{Cell, Row, Table};

use super::simplifier::AbstractCompound;

/// Synthetic row symbol accumulating the net charge of every compound.
pub const CHARGE_SYMBOL: &str = "charge";

/// The conservation system A x = B of one equation. One row per element
/// symbol, one row for the charge accumulator, one pinning row; one column
/// per compound with reactant columns positive and product columns negated.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    pub a: DMatrix<f64>,
    pub b: DVector<f64>,
    /// row labels, `CHARGE_SYMBOL` last
    pub symbols: Vec<String>,
}

/// Builds the conservation system from the simplified sides.
///
/// Element symbols are ordered by first appearance across the reactant side
/// then the product side. The final row pins one coefficient so the otherwise
/// homogeneous system has a unique least-squares solution: the user-declared
/// default coefficient when one exists, otherwise the first compound at 1.
pub fn build(left: &[AbstractCompound], right: &[AbstractCompound]) -> LinearSystem {
    let mut symbols: Vec<String> = Vec::new();
    for compound in left.iter().chain(right.iter()) {
        for (name, _) in &compound.atoms {
            if !symbols.contains(name) {
                symbols.push(name.clone());
            }
        }
    }
    symbols.push(CHARGE_SYMBOL.to_string());

    let n_rows = symbols.len() + 1;
    let n_cols = left.len() + right.len();
    let mut a = DMatrix::zeros(n_rows, n_cols);
    let mut b = DVector::zeros(n_rows);

    for (j, compound) in left.iter().chain(right.iter()).enumerate() {
        let sign = if j < left.len() { 1.0 } else { -1.0 };
        for (i, symbol) in symbols.iter().enumerate() {
            let value = if symbol == CHARGE_SYMBOL {
                compound.charge
            } else {
                compound.count_of(symbol)
            };
            a[(i, j)] = sign * value;
        }
    }

    if n_cols > 0 {
        let (pin_col, pin_value) = left
            .iter()
            .chain(right.iter())
            .enumerate()
            .find_map(|(j, c)| c.pinned.map(|v| (j, v)))
            .unwrap_or((0, 1.0));
        a[(n_rows - 1, pin_col)] = 1.0;
        b[n_rows - 1] = pin_value;
    }

    LinearSystem { a, b, symbols }
}

impl LinearSystem {
    /// Prints the system as a table, one row per conserved symbol plus the
    /// pinning row, with the right-hand side in the last column.
    pub fn pretty_print(&self) {
        let mut table = Table::new();
        let mut header = vec![Cell::new("symbol")];
        for j in 0..self.a.ncols() {
            header.push(Cell::new(&format!("x{}", j + 1)));
        }
        header.push(Cell::new("rhs"));
        table.add_row(Row::new(header));
        for i in 0..self.a.nrows() {
            let label = self
                .symbols
                .get(i)
                .map(|s| s.as_str())
                .unwrap_or("pinned");
            let mut row = vec![Cell::new(label)];
            for j in 0..self.a.ncols() {
                row.push(Cell::new(&format!("{}", self.a[(i, j)])));
            }
            row.push(Cell::new(&format!("{}", self.b[i])));
            table.add_row(Row::new(row));
        }
        table.printstd();
    }
}
