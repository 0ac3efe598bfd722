//! Grade catalog
//!
//! Static table of every grade a falling block can carry, plus the weighted
//! lookup the spawner uses to pick one.

use serde::{Deserialize, Serialize};

/// A letter grade carried by a falling block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    APlus,
    AZero,
    BPlus,
    BZero,
    CPlus,
    CZero,
    F,
}

/// Per-grade constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeInfo {
    pub grade: Grade,
    pub label: &'static str,
    /// Grade points added to the running sum when caught
    pub score: f64,
    /// CSS color used by the DOM strip
    pub color_hex: &'static str,
    /// `color_hex` as sRGB-encoded RGBA for the GPU pipeline
    pub color: [f32; 4],
    /// Spawn probability mass (the table sums to 1.0)
    pub weight: f64,
    /// Fall speed in pixels per frame
    pub speed: f32,
}

/// Catalog in declaration order. Selection walks this order.
pub const GRADE_TABLE: [GradeInfo; 7] = [
    GradeInfo {
        grade: Grade::APlus,
        label: "A+",
        score: 4.5,
        color_hex: "#CC0000",
        color: [0.8, 0.0, 0.0, 1.0],
        weight: 0.05,
        speed: 20.0,
    },
    GradeInfo {
        grade: Grade::AZero,
        label: "A0",
        score: 4.0,
        color_hex: "#CC6600",
        color: [0.8, 0.4, 0.0, 1.0],
        weight: 0.07,
        speed: 18.0,
    },
    GradeInfo {
        grade: Grade::BPlus,
        label: "B+",
        score: 3.5,
        color_hex: "#CCCC00",
        color: [0.8, 0.8, 0.0, 1.0],
        weight: 0.10,
        speed: 16.0,
    },
    GradeInfo {
        grade: Grade::BZero,
        label: "B0",
        score: 3.0,
        color_hex: "#006600",
        color: [0.0, 0.4, 0.0, 1.0],
        weight: 0.13,
        speed: 14.0,
    },
    GradeInfo {
        grade: Grade::CPlus,
        label: "C+",
        score: 2.5,
        color_hex: "#0000CC",
        color: [0.0, 0.0, 0.8, 1.0],
        weight: 0.30,
        speed: 12.0,
    },
    GradeInfo {
        grade: Grade::CZero,
        label: "C0",
        score: 2.0,
        color_hex: "#330066",
        color: [0.2, 0.0, 0.4, 1.0],
        weight: 0.20,
        speed: 10.0,
    },
    GradeInfo {
        grade: Grade::F,
        label: "F",
        score: 0.0,
        color_hex: "#000000",
        color: [0.0, 0.0, 0.0, 1.0],
        weight: 0.15,
        speed: 20.0,
    },
];

impl Grade {
    /// Grade used when rounding leaves a draw unmatched
    pub const DEFAULT: Grade = Grade::F;
    /// Grade that counts toward academic probation
    pub const FAILING: Grade = Grade::F;

    /// All grades in catalog order
    pub fn all() -> impl Iterator<Item = Grade> {
        GRADE_TABLE.iter().map(|info| info.grade)
    }

    pub fn info(self) -> &'static GradeInfo {
        // Table is indexed in enum declaration order
        &GRADE_TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    pub fn score(self) -> f64 {
        self.info().score
    }

    pub fn speed(self) -> f32 {
        self.info().speed
    }

    pub fn color(self) -> [f32; 4] {
        self.info().color
    }

    pub fn color_hex(self) -> &'static str {
        self.info().color_hex
    }

    pub fn is_failing(self) -> bool {
        self == Self::FAILING
    }

    /// Map a uniform draw in [0, 1) to a grade by cumulative weight.
    ///
    /// The first entry whose running total meets or exceeds the draw wins.
    pub fn from_draw(draw: f64) -> Grade {
        let mut cumulative = 0.0;
        for info in &GRADE_TABLE {
            cumulative += info.weight;
            if draw <= cumulative {
                return info.grade;
            }
        }
        Self::DEFAULT
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, info) in GRADE_TABLE.iter().enumerate() {
            assert_eq!(info.grade as usize, i);
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let total: f64 = GRADE_TABLE.iter().map(|g| g.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_draw_boundaries() {
        assert_eq!(Grade::from_draw(0.0), Grade::APlus);
        assert_eq!(Grade::from_draw(0.05), Grade::APlus);
        assert_eq!(Grade::from_draw(0.050001), Grade::AZero);
        assert_eq!(Grade::from_draw(0.5), Grade::CPlus);
        assert_eq!(Grade::from_draw(0.9), Grade::F);
    }

    #[test]
    fn test_unmatched_draw_falls_back() {
        assert_eq!(Grade::from_draw(1.5), Grade::DEFAULT);
    }

    #[test]
    fn test_selection_converges_to_weights() {
        let mut rng = Pcg32::seed_from_u64(7);
        let draws = 200_000;
        let mut counts = [0u32; 7];
        for _ in 0..draws {
            let grade = Grade::from_draw(rng.random::<f64>());
            counts[grade as usize] += 1;
        }
        for info in &GRADE_TABLE {
            let observed = counts[info.grade as usize] as f64 / draws as f64;
            assert!(
                (observed - info.weight).abs() < 0.01,
                "{} observed {observed:.4}, expected {}",
                info.label,
                info.weight
            );
        }
    }

    #[test]
    fn test_failing_grade() {
        assert!(Grade::F.is_failing());
        assert!(Grade::all().filter(|g| g.is_failing()).count() == 1);
        assert_eq!(Grade::APlus.to_string(), "A+");
    }
}
