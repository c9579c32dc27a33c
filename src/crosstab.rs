//! Contingency tables and the chi-square test of independence.
//!
//! A [`ContingencyTable`] cross-tabulates counts by two categorical
//! variables. Categories are ordered and unique, preserving insertion
//! order for display; counts are non-negative. Margins, expected counts,
//! and percentage tables are derived in full on demand — edits never
//! update anything incrementally.
//!
//! The table must keep at least 2 rows and 2 columns at all times so the
//! independence test stays well-defined (`df ≥ 1`); constructors and
//! edits enforce this.
//!
//! # Example
//!
//! ```
//! use statlab::crosstab::ContingencyTable;
//!
//! let table = ContingencyTable::new(
//!     vec!["under 30".into(), "30 and over".into()],
//!     vec!["agree".into(), "disagree".into()],
//!     vec![vec![30.0, 10.0], vec![20.0, 40.0]],
//! )
//! .unwrap();
//!
//! assert_eq!(table.grand_total(), 100.0);
//! let test = table.independence_test().unwrap();
//! assert_eq!(test.df, 1);
//! assert!(test.p_value < 0.01);
//! ```

use crate::error::EngineError;
use crate::special::chi_squared_cdf;

/// One category's count and share of a total, the record shape chart
/// renderers consume.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    pub label: String,
    pub count: f64,
    pub percent: f64,
}

/// Result of the chi-square test of independence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndependenceTest {
    /// The χ² statistic, Σ (observed − expected)² / expected.
    pub statistic: f64,
    /// Degrees of freedom, (rows − 1)(cols − 1).
    pub df: usize,
    /// Upper-tail p-value.
    pub p_value: f64,
}

/// Cross-tabulation of counts by two ordered categorical variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    /// Row-major counts, `rows × cols`.
    counts: Vec<f64>,
}

fn validate_cell(value: f64, row: usize, col: usize) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::NegativeCell { row, col });
    }
    Ok(())
}

fn validate_unique(labels: &[String]) -> Result<(), EngineError> {
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            return Err(EngineError::DuplicateCategory {
                label: label.clone(),
            });
        }
    }
    Ok(())
}

impl ContingencyTable {
    /// Builds a table from row labels, column labels, and one counts
    /// vector per row.
    ///
    /// # Errors
    /// Configuration errors for fewer than 2 rows or columns, duplicate
    /// labels, mismatched row lengths, or negative/non-finite cells.
    pub fn new(
        row_labels: Vec<String>,
        col_labels: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, EngineError> {
        if row_labels.len() < 2 || col_labels.len() < 2 {
            return Err(EngineError::TableTooSmall {
                rows: row_labels.len(),
                cols: col_labels.len(),
            });
        }
        validate_unique(&row_labels)?;
        validate_unique(&col_labels)?;
        if rows.len() != row_labels.len() {
            return Err(EngineError::LengthMismatch {
                expected: row_labels.len(),
                actual: rows.len(),
            });
        }

        let cols = col_labels.len();
        let mut counts = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(EngineError::LengthMismatch {
                    expected: cols,
                    actual: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                validate_cell(value, i, j)?;
                counts.push(value);
            }
        }

        Ok(Self {
            row_labels,
            col_labels,
            counts,
        })
    }

    pub fn row_count(&self) -> usize {
        self.row_labels.len()
    }

    pub fn col_count(&self) -> usize {
        self.col_labels.len()
    }

    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// The observed count at (row, col).
    pub fn count(&self, row: usize, col: usize) -> f64 {
        self.counts[row * self.col_count() + col]
    }

    pub fn row_totals(&self) -> Vec<f64> {
        (0..self.row_count())
            .map(|i| (0..self.col_count()).map(|j| self.count(i, j)).sum())
            .collect()
    }

    pub fn col_totals(&self) -> Vec<f64> {
        (0..self.col_count())
            .map(|j| (0..self.row_count()).map(|i| self.count(i, j)).sum())
            .collect()
    }

    pub fn grand_total(&self) -> f64 {
        self.counts.iter().sum()
    }

    /// Expected counts under independence:
    /// `expected[i][j] = rowTotal[i] · colTotal[j] / grandTotal`
    /// (zero when the grand total is zero).
    pub fn expected(&self) -> Vec<Vec<f64>> {
        let row_totals = self.row_totals();
        let col_totals = self.col_totals();
        let total = self.grand_total();
        row_totals
            .iter()
            .map(|&rt| {
                col_totals
                    .iter()
                    .map(|&ct| if total > 0.0 { rt * ct / total } else { 0.0 })
                    .collect()
            })
            .collect()
    }

    fn percent_table(&self, denominator: impl Fn(usize, usize) -> f64) -> Vec<Vec<f64>> {
        (0..self.row_count())
            .map(|i| {
                (0..self.col_count())
                    .map(|j| {
                        let d = denominator(i, j);
                        if d > 0.0 {
                            self.count(i, j) / d * 100.0
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Each cell as a percentage of its row total (0 when the row is
    /// empty).
    pub fn row_percents(&self) -> Vec<Vec<f64>> {
        let row_totals = self.row_totals();
        self.percent_table(|i, _| row_totals[i])
    }

    /// Each cell as a percentage of its column total.
    pub fn col_percents(&self) -> Vec<Vec<f64>> {
        let col_totals = self.col_totals();
        self.percent_table(|_, j| col_totals[j])
    }

    /// Each cell as a percentage of the grand total.
    pub fn total_percents(&self) -> Vec<Vec<f64>> {
        let total = self.grand_total();
        self.percent_table(|_, _| total)
    }

    /// One row's cells as `{label, count, percent-of-row}` records.
    pub fn row_shares(&self, label: &str) -> Result<Vec<CategoryShare>, EngineError> {
        let i = self.row_index(label)?;
        let total: f64 = (0..self.col_count()).map(|j| self.count(i, j)).sum();
        Ok((0..self.col_count())
            .map(|j| {
                let count = self.count(i, j);
                CategoryShare {
                    label: self.col_labels[j].clone(),
                    count,
                    percent: if total > 0.0 { count / total * 100.0 } else { 0.0 },
                }
            })
            .collect())
    }

    /// One column's cells as `{label, count, percent-of-column}` records.
    pub fn col_shares(&self, label: &str) -> Result<Vec<CategoryShare>, EngineError> {
        let j = self.col_index(label)?;
        let total: f64 = (0..self.row_count()).map(|i| self.count(i, j)).sum();
        Ok((0..self.row_count())
            .map(|i| {
                let count = self.count(i, j);
                CategoryShare {
                    label: self.row_labels[i].clone(),
                    count,
                    percent: if total > 0.0 { count / total * 100.0 } else { 0.0 },
                }
            })
            .collect())
    }

    fn row_index(&self, label: &str) -> Result<usize, EngineError> {
        self.row_labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| EngineError::UnknownCategory {
                label: label.to_string(),
            })
    }

    fn col_index(&self, label: &str) -> Result<usize, EngineError> {
        self.col_labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| EngineError::UnknownCategory {
                label: label.to_string(),
            })
    }

    /// Appends a row category with its counts.
    pub fn add_row(&mut self, label: String, cells: Vec<f64>) -> Result<(), EngineError> {
        if self.row_labels.contains(&label) {
            return Err(EngineError::DuplicateCategory { label });
        }
        if cells.len() != self.col_count() {
            return Err(EngineError::LengthMismatch {
                expected: self.col_count(),
                actual: cells.len(),
            });
        }
        let row = self.row_count();
        for (j, &value) in cells.iter().enumerate() {
            validate_cell(value, row, j)?;
        }
        self.row_labels.push(label);
        self.counts.extend(cells);
        Ok(())
    }

    /// Appends a column category with its counts.
    pub fn add_column(&mut self, label: String, cells: Vec<f64>) -> Result<(), EngineError> {
        if self.col_labels.contains(&label) {
            return Err(EngineError::DuplicateCategory { label });
        }
        if cells.len() != self.row_count() {
            return Err(EngineError::LengthMismatch {
                expected: self.row_count(),
                actual: cells.len(),
            });
        }
        let col = self.col_count();
        for (i, &value) in cells.iter().enumerate() {
            validate_cell(value, i, col)?;
        }

        let old_cols = self.col_count();
        let mut rebuilt = Vec::with_capacity(self.counts.len() + cells.len());
        for i in 0..self.row_count() {
            rebuilt.extend_from_slice(&self.counts[i * old_cols..(i + 1) * old_cols]);
            rebuilt.push(cells[i]);
        }
        self.col_labels.push(label);
        self.counts = rebuilt;
        Ok(())
    }

    /// Removes a row category. Rejected if it would leave fewer than 2
    /// rows.
    pub fn remove_row(&mut self, label: &str) -> Result<(), EngineError> {
        let i = self.row_index(label)?;
        if self.row_count() - 1 < 2 {
            return Err(EngineError::TableTooSmall {
                rows: self.row_count() - 1,
                cols: self.col_count(),
            });
        }
        let cols = self.col_count();
        self.row_labels.remove(i);
        self.counts.drain(i * cols..(i + 1) * cols);
        Ok(())
    }

    /// Removes a column category. Rejected if it would leave fewer than 2
    /// columns.
    pub fn remove_column(&mut self, label: &str) -> Result<(), EngineError> {
        let j = self.col_index(label)?;
        if self.col_count() - 1 < 2 {
            return Err(EngineError::TableTooSmall {
                rows: self.row_count(),
                cols: self.col_count() - 1,
            });
        }
        let old_cols = self.col_count();
        let mut rebuilt = Vec::with_capacity(self.counts.len() - self.row_count());
        for (idx, &value) in self.counts.iter().enumerate() {
            if idx % old_cols != j {
                rebuilt.push(value);
            }
        }
        self.col_labels.remove(j);
        self.counts = rebuilt;
        Ok(())
    }

    /// Chi-square test of independence.
    ///
    /// `χ² = Σ (observed − expected)² / expected` over all cells,
    /// `df = (rows − 1)(cols − 1)`, upper-tail
    /// `p = 1 − chi_squared_cdf(χ², df)`.
    ///
    /// # Errors
    /// [`EngineError::ZeroExpectedCell`] (a data error) when any expected
    /// count is zero — the statistic is undefined there.
    pub fn independence_test(&self) -> Result<IndependenceTest, EngineError> {
        let expected = self.expected();
        let mut statistic = 0.0;
        for (i, expected_row) in expected.iter().enumerate() {
            for (j, &e) in expected_row.iter().enumerate() {
                if e == 0.0 {
                    return Err(EngineError::ZeroExpectedCell { row: i, col: j });
                }
                let o = self.count(i, j);
                statistic += (o - e) * (o - e) / e;
            }
        }

        let df = (self.row_count() - 1) * (self.col_count() - 1);
        let p_value = 1.0 - chi_squared_cdf(statistic, df as f64);

        Ok(IndependenceTest {
            statistic,
            df,
            p_value,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn count_table(rows: usize, cols: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
        proptest::collection::vec(
            proptest::collection::vec(1.0_f64..500.0, cols..=cols),
            rows..=rows,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(150))]

        #[test]
        fn margins_always_consistent(
            rows in 2_usize..6,
            cols in 2_usize..6,
            seed_cells in count_table(5, 5),
        ) {
            let cells: Vec<Vec<f64>> = seed_cells[..rows]
                .iter()
                .map(|r| r[..cols].to_vec())
                .collect();
            let row_labels: Vec<String> = (0..rows).map(|i| format!("r{i}")).collect();
            let col_labels: Vec<String> = (0..cols).map(|j| format!("c{j}")).collect();
            let table = ContingencyTable::new(row_labels, col_labels, cells).unwrap();

            let grand = table.grand_total();
            let row_sum: f64 = table.row_totals().iter().sum();
            let col_sum: f64 = table.col_totals().iter().sum();
            prop_assert!((row_sum - grand).abs() < 1e-9 * grand.max(1.0));
            prop_assert!((col_sum - grand).abs() < 1e-9 * grand.max(1.0));
        }

        #[test]
        fn chi_square_non_negative_p_in_unit_interval(
            rows in 2_usize..6,
            cols in 2_usize..6,
            seed_cells in count_table(5, 5),
        ) {
            let cells: Vec<Vec<f64>> = seed_cells[..rows]
                .iter()
                .map(|r| r[..cols].to_vec())
                .collect();
            let row_labels: Vec<String> = (0..rows).map(|i| format!("r{i}")).collect();
            let col_labels: Vec<String> = (0..cols).map(|j| format!("c{j}")).collect();
            let table = ContingencyTable::new(row_labels, col_labels, cells).unwrap();

            let test = table.independence_test().unwrap();
            prop_assert!(test.statistic >= 0.0);
            prop_assert!((0.0..=1.0).contains(&test.p_value));
            prop_assert_eq!(test.df, (rows - 1) * (cols - 1));
        }

        #[test]
        fn expected_margins_match_observed_margins(
            rows in 2_usize..5,
            cols in 2_usize..5,
            seed_cells in count_table(4, 4),
        ) {
            let cells: Vec<Vec<f64>> = seed_cells[..rows]
                .iter()
                .map(|r| r[..cols].to_vec())
                .collect();
            let row_labels: Vec<String> = (0..rows).map(|i| format!("r{i}")).collect();
            let col_labels: Vec<String> = (0..cols).map(|j| format!("c{j}")).collect();
            let table = ContingencyTable::new(row_labels, col_labels, cells).unwrap();

            let expected = table.expected();
            for (i, &rt) in table.row_totals().iter().enumerate() {
                let e_rt: f64 = expected[i].iter().sum();
                prop_assert!((e_rt - rt).abs() < 1e-9 * rt.max(1.0));
            }
        }
    }
}
