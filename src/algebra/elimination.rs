//! Gauss-Jordan elimination over exact rationals.

use super::{Assignment, EngineError, Poly, Rational};

/// Solve linear `poly = 0` equalities for `unknowns`.
///
/// Pivot unknowns are expressed in terms of the free ones; free unknowns do
/// not appear in the assignment.
pub(super) fn solve_linear(
    equalities: &[Poly],
    unknowns: &[String],
) -> Result<Vec<Assignment>, EngineError> {
    let cols = unknowns.len();

    // Augmented matrix: coefficients | -constant
    let mut rows: Vec<Vec<Rational>> = equalities
        .iter()
        .map(|poly| -> Result<Vec<Rational>, EngineError> {
            let mut row: Vec<Rational> = unknowns.iter().map(|u| poly.coeff(u, 1)).collect();
            row.push(poly.constant_term().checked_neg()?);
            Ok(row)
        })
        .collect::<Result<_, _>>()?;

    let mut pivots: Vec<(usize, usize)> = Vec::new();
    let mut pivot_row = 0;

    for col in 0..cols {
        let Some(found) = (pivot_row..rows.len()).find(|&r| !rows[r][col].is_zero()) else {
            continue;
        };
        rows.swap(pivot_row, found);

        let lead = rows[pivot_row][col];
        for value in rows[pivot_row].iter_mut() {
            *value = value.checked_div(lead)?;
        }

        for r in 0..rows.len() {
            if r == pivot_row || rows[r][col].is_zero() {
                continue;
            }
            let factor = rows[r][col];
            for c in 0..=cols {
                let delta = factor.checked_mul(rows[pivot_row][c])?;
                rows[r][c] = rows[r][c].checked_sub(delta)?;
            }
        }

        pivots.push((pivot_row, col));
        pivot_row += 1;
        if pivot_row == rows.len() {
            break;
        }
    }

    let inconsistent = rows
        .iter()
        .any(|row| row[..cols].iter().all(Rational::is_zero) && !row[cols].is_zero());
    if inconsistent {
        return Ok(Vec::new());
    }

    let pivot_cols: Vec<usize> = pivots.iter().map(|&(_, c)| c).collect();
    let mut assignment = Assignment::new();
    for &(r, col) in &pivots {
        let mut value = Poly::constant(rows[r][cols]);
        for free in (0..cols).filter(|c| !pivot_cols.contains(c)) {
            let coeff = rows[r][free];
            if coeff.is_zero() {
                continue;
            }
            let term = Poly::variable(unknowns[free].clone()).scale(coeff)?;
            value = value.checked_sub(&term)?;
        }
        assignment.insert(unknowns[col].clone(), value);
    }

    Ok(vec![assignment])
}
