use serde::Serialize;

use crate::Point;
use crate::config::InfluenceWeights;
use crate::goban::Goban;

/// Whole-board influence map in row-major layout. After aggregation every
/// cell lies in `[-1, 1]`; positive values favour Black.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfluenceField {
    size: u8,
    values: Vec<f64>,
}

impl InfluenceField {
    pub fn zeros(size: u8) -> Self {
        Self {
            size,
            values: vec![0.0; size as usize * size as usize],
        }
    }

    pub fn size(&self) -> u8 {
        self.size
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value at a cell, `None` off the board.
    pub fn get(&self, (row, col): Point) -> Option<f64> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(self.values[row as usize * self.size as usize + col as usize])
    }

    /// Sum of the positive (Black-leaning) cells.
    pub fn black_total(&self) -> f64 {
        self.values.iter().filter(|v| **v > 0.0).sum()
    }

    /// Sum of the magnitudes of the negative (White-leaning) cells.
    pub fn white_total(&self) -> f64 {
        self.values.iter().filter(|v| **v < 0.0).map(|v| -v).sum()
    }

    pub fn max_abs(&self) -> f64 {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }

    fn add(&mut self, other: &InfluenceField) {
        for (a, b) in self.values.iter_mut().zip(&other.values) {
            *a += b;
        }
    }

    fn normalize(&mut self) {
        let max = self.max_abs();
        if max > 0.0 {
            for v in &mut self.values {
                *v /= max;
            }
        }
    }
}

/// Raw, signed influence projected by the stone at `source` onto every cell.
/// Returns `None` for an empty or off-board source.
pub fn contribution_of(
    goban: &Goban,
    source: Point,
    weights: &InfluenceWeights,
) -> Option<InfluenceField> {
    let color = goban.stone_at(source)?;
    let size = goban.size();
    let mut field = InfluenceField::zeros(size);

    for (i, cell) in goban.points().enumerate() {
        let distance = u32::from(source.0.abs_diff(cell.0)) + u32::from(source.1.abs_diff(cell.1));
        let mut value = weights.strength(distance);
        if value == 0.0 {
            continue;
        }

        match goban.stone_at(cell) {
            Some(s) if s == color => value *= weights.friendly_scale,
            Some(_) => value *= weights.opposing_scale,
            None => {}
        }

        let edge_distance = cell
            .0
            .min(cell.1)
            .min(size - 1 - cell.0)
            .min(size - 1 - cell.1);
        if edge_distance <= weights.edge_band {
            value *= weights.edge_scale;
        }

        field.values[i] = value * color.sign();
    }

    Some(field)
}

/// Sum every stone's contribution and scale by the largest magnitude.
/// An empty board yields all zeros.
pub fn aggregate(goban: &Goban, weights: &InfluenceWeights) -> InfluenceField {
    let mut field = InfluenceField::zeros(goban.size());
    for point in goban.points() {
        if let Some(contribution) = contribution_of(goban, point, weights) {
            field.add(&contribution);
        }
    }
    field.normalize();
    field
}
