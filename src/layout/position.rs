// src/layout/position.rs

use serde::Serialize;

use crate::types::Alignment;

/// 2D node position in output coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Coordinate along which generations advance.
    pub fn rank(&self, alignment: Alignment) -> f64 {
        match alignment {
            Alignment::Vertical => self.y,
            Alignment::Horizontal => self.x,
        }
    }

    /// Coordinate along which same-generation nodes are spread.
    pub fn cross(&self, alignment: Alignment) -> f64 {
        match alignment {
            Alignment::Vertical => self.x,
            Alignment::Horizontal => self.y,
        }
    }

    fn from_axes(rank: f64, cross: f64, alignment: Alignment) -> Self {
        match alignment {
            Alignment::Vertical => Self::new(cross, rank),
            Alignment::Horizontal => Self::new(rank, cross),
        }
    }
}

/// Multipartite placement of generation sizes.
///
/// Returns one position per node, generation by generation and in order
/// inside each generation. Raw coordinates are generation index (rank) and
/// slot index (cross), each centred on its own generation/slot count; the
/// cloud is then shifted to mean zero and scaled so its largest absolute
/// coordinate equals `scale`, and finally translated by `center`.
pub fn multipartite_positions(
    generation_sizes: &[usize],
    alignment: Alignment,
    scale: f64,
    center: (f64, f64),
) -> Vec<Position> {
    let width = generation_sizes.len() as f64;
    let mut raw: Vec<(f64, f64)> = Vec::with_capacity(generation_sizes.iter().sum());

    for (i, &height) in generation_sizes.iter().enumerate() {
        let rank = i as f64 - (width - 1.0) / 2.0;
        let offset = (height as f64 - 1.0) / 2.0;
        for j in 0..height {
            raw.push((rank, j as f64 - offset));
        }
    }

    if raw.is_empty() {
        return Vec::new();
    }

    let n = raw.len() as f64;
    let mean_rank = raw.iter().map(|(r, _)| r).sum::<f64>() / n;
    let mean_cross = raw.iter().map(|(_, c)| c).sum::<f64>() / n;
    for (r, c) in raw.iter_mut() {
        *r -= mean_rank;
        *c -= mean_cross;
    }

    let lim = raw
        .iter()
        .flat_map(|(r, c)| [r.abs(), c.abs()])
        .fold(0.0_f64, f64::max);
    let factor = if lim > 0.0 { scale / lim } else { 1.0 };

    raw.into_iter()
        .map(|(r, c)| {
            let p = Position::from_axes(r * factor, c * factor, alignment);
            Position::new(p.x + center.0, p.y + center.1)
        })
        .collect()
}
