//! Greedy rectangle merging within one mask.
//!
//! The scan visits rows (vertical) in order and cells (horizontal) within a
//! row. At each unconsumed visible cell it grows a rectangle: first along
//! the row while the value matches, then downward row by row while the
//! whole width matches. Consumed cells are reset to empty so nothing is
//! emitted twice.
//!
//! The result is deterministic for a given mask but not a minimum partition.

use crate::cull::Mask;
use crate::grid::Voxel;
use crate::palette::ColorId;

/// Uniformly colored rectangle in mask space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Quad {
    /// Horizontal mask coordinate of the first cell.
    pub h: usize,
    /// Vertical mask coordinate of the first cell.
    pub v: usize,
    /// Absolute slice coordinate along the sweep axis.
    pub depth: i64,
    /// Extent along the horizontal axis (>= 1).
    pub width: usize,
    /// Extent along the vertical axis (>= 1).
    pub height: usize,
    pub color: ColorId,
}

impl Quad {
    /// Number of mask cells covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the quad covers mask cell `(h, v)`.
    pub fn covers(&self, h: usize, v: usize) -> bool {
        (self.h..self.h + self.width).contains(&h) && (self.v..self.v + self.height).contains(&v)
    }
}

/// Greedily merge a mask into quads, consuming it.
///
/// On return every cell of `mask` is empty.
///
/// # Examples
/// ```
/// use quad_mesher::{cull::Mask, merge::get_quads};
///
/// let mut mask = Mask::from_rows(&[[1, 1], [1, 1]]);
/// let quads = get_quads(&mut mask, 0);
/// assert_eq!(quads.len(), 1);
/// assert_eq!((quads[0].width, quads[0].height), (2, 2));
/// ```
pub fn get_quads(mask: &mut Mask, depth: i64) -> Vec<Quad> {
    let (mask_w, mask_h) = (mask.width(), mask.height());
    let mut quads = Vec::new();

    for v in 0..mask_h {
        let mut h = 0;
        while h < mask_w {
            let seed = mask.get(h, v);
            let Voxel::Filled(color) = seed else {
                h += 1;
                continue;
            };

            // Extend width along the row
            let mut width = 1;
            while h + width < mask_w && mask.get(h + width, v) == seed {
                width += 1;
            }

            // Extend height while the entire width matches
            let mut height = 1;
            'height_loop: while v + height < mask_h {
                for dh in 0..width {
                    if mask.get(h + dh, v + height) != seed {
                        break 'height_loop;
                    }
                }
                height += 1;
            }

            // Consume the region
            for mv in v..v + height {
                for mh in h..h + width {
                    mask.set(mh, mv, Voxel::Empty);
                }
            }

            quads.push(Quad { h, v, depth, width, height, color });
            h += width;
        }
    }

    quads
}

/// Like [`get_quads`] but leaves the caller's mask untouched.
pub fn get_quads_from(mask: &Mask, depth: i64) -> Vec<Quad> {
    get_quads(&mut mask.clone(), depth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn quads_of<const W: usize>(rows: &[[u32; W]]) -> Vec<Quad> {
        get_quads(&mut Mask::from_rows(rows), 0)
    }

    #[test]
    fn uniform_square_is_one_quad() {
        let quads = quads_of(&[[1, 1], [1, 1]]);
        assert_eq!(quads, vec![Quad { h: 0, v: 0, depth: 0, width: 2, height: 2, color: 1 }]);
    }

    #[test]
    fn two_columns_two_quads() {
        let quads = quads_of(&[[1, 2], [1, 2]]);
        assert_eq!(quads.len(), 2);
        assert_eq!((quads[0].h, quads[0].width, quads[0].height, quads[0].color), (0, 1, 2, 1));
        assert_eq!((quads[1].h, quads[1].width, quads[1].height, quads[1].color), (1, 1, 2, 2));
    }

    #[test]
    fn empty_mask_no_quads() {
        assert!(quads_of(&[[0, 0, 0], [0, 0, 0]]).is_empty());
        assert!(get_quads(&mut Mask::new(0, 0), 0).is_empty());
    }

    #[test]
    fn whole_mask_one_value() {
        let quads = quads_of(&[[7; 5]; 4]);
        assert_eq!(quads.len(), 1);
        assert_eq!((quads[0].width, quads[0].height), (5, 4));
    }

    #[test]
    fn width_grows_before_height() {
        // L-shape: the top row wins the first quad.
        let quads = quads_of(&[[1, 1], [1, 0]]);
        assert_eq!(quads.len(), 2);
        assert_eq!((quads[0].h, quads[0].v, quads[0].width, quads[0].height), (0, 0, 2, 1));
        assert_eq!((quads[1].h, quads[1].v, quads[1].width, quads[1].height), (0, 1, 1, 1));

        // Mirrored L: a narrow first row lets the column grow.
        let quads = quads_of(&[[1, 0], [1, 1]]);
        assert_eq!((quads[0].width, quads[0].height), (1, 2));
        assert_eq!((quads[1].h, quads[1].v), (1, 1));
    }

    #[test]
    fn height_stops_at_first_mismatching_row() {
        let quads = quads_of(&[[3, 3], [3, 3], [3, 4], [3, 3]]);
        assert_eq!((quads[0].width, quads[0].height), (2, 2));
    }

    #[test]
    fn consumes_the_mask() {
        let mut mask = Mask::from_rows(&[[1, 2, 2], [0, 2, 2]]);
        let quads = get_quads(&mut mask, 3);
        assert!(mask.is_empty());
        assert!(quads.iter().all(|q| q.depth == 3));
    }

    #[test]
    fn random_masks_are_partitioned_exactly() {
        let mut rng = StdRng::seed_from_u64(0x51ce);
        for _ in 0..200 {
            let w = rng.gen_range(1..9);
            let h = rng.gen_range(1..9);
            let mut mask = Mask::new(w, h);
            for v in 0..h {
                for hh in 0..w {
                    let id: u32 = rng.gen_range(0..4);
                    if id != 0 {
                        mask.set(hh, v, Voxel::Filled(id));
                    }
                }
            }

            let quads = get_quads_from(&mask, 0);
            for v in 0..h {
                for hh in 0..w {
                    let covering: Vec<_> = quads.iter().filter(|q| q.covers(hh, v)).collect();
                    match mask.get(hh, v) {
                        Voxel::Empty => assert!(covering.is_empty()),
                        Voxel::Filled(id) => {
                            assert_eq!(covering.len(), 1, "cell ({hh}, {v}) in {mask:?}");
                            assert_eq!(covering[0].color, id);
                        }
                    }
                }
            }
            let area: usize = quads.iter().map(Quad::area).sum();
            assert_eq!(area, mask.visible_count());

            // Same input, same output.
            assert_eq!(get_quads_from(&mask, 0), quads);
        }
    }
}
