//! Pure geometry for the ten-patch compass diagram.
//!
//! Everything here is backend-free: given ten magnitudes this computes the
//! rectangles, label anchors, callout arrows, and axis limits that the
//! drawing code then paints. Corner patches scale with the square root of
//! their magnitude so their area stays proportional under the diagonal
//! compression; edge patches scale linearly.

use crate::quadrant::Quadrant;

/// Input magnitudes for one panel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Magnitudes {
    pub center: f64,
    pub auth: f64,
    pub auth_left: f64,
    pub left: f64,
    pub lib_left: f64,
    pub lib: f64,
    pub lib_right: f64,
    pub right: f64,
    pub auth_right: f64,
    pub unflaired: f64,
}

impl Magnitudes {
    /// Build from a per-quadrant array in index order.
    pub fn from_values(values: [f64; Quadrant::COUNT]) -> Self {
        Self {
            center: values[Quadrant::Centrist.index()],
            auth: values[Quadrant::Auth.index()],
            auth_left: values[Quadrant::AuthLeft.index()],
            left: values[Quadrant::Left.index()],
            lib_left: values[Quadrant::LibLeft.index()],
            lib: values[Quadrant::Lib.index()],
            lib_right: values[Quadrant::LibRight.index()],
            right: values[Quadrant::Right.index()],
            auth_right: values[Quadrant::AuthRight.index()],
            unflaired: values[Quadrant::Unflaired.index()],
        }
    }
}

/// An axis-aligned rectangle given by an origin and signed extents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Patch {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Corner pair ordered as ((min x, min y), (max x, max y)).
    pub fn corners(&self) -> ((f64, f64), (f64, f64)) {
        let (x0, x1) = if self.width < 0.0 {
            (self.x + self.width, self.x)
        } else {
            (self.x, self.x + self.width)
        };
        let (y0, y1) = if self.height < 0.0 {
            (self.y + self.height, self.y)
        } else {
            (self.y, self.y + self.height)
        };
        ((x0, y0), (x1, y1))
    }
}

/// Horizontal text alignment relative to an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical text alignment relative to an anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// A directional callout: an arrow from a named annotation toward its patch.
#[derive(Debug, Clone)]
pub struct Callout {
    pub name: &'static str,
    /// Annotation anchor; the arrow tail starts here.
    pub anchor: (f64, f64),
    /// Arrow head position.
    pub tip: (f64, f64),
    pub h_align: HAlign,
    pub v_align: VAlign,
}

/// Normalized side lengths; corners are already square-rooted.
#[derive(Debug, Clone, Copy)]
struct Sides {
    center: f64,
    auth: f64,
    auth_left: f64,
    left: f64,
    lib_left: f64,
    lib: f64,
    lib_right: f64,
    right: f64,
    auth_right: f64,
    unflaired: f64,
}

/// Fully computed panel geometry.
#[derive(Debug, Clone)]
pub struct Layout {
    /// The normalization denominator that was actually used.
    #[allow(dead_code)] // Diagnostic; the proportionality tests assert on it
    pub scale: f64,
    /// One patch per quadrant, in index order.
    pub patches: [Patch; Quadrant::COUNT],
    /// Centered label anchor per quadrant, in index order.
    pub labels: [(f64, f64); Quadrant::COUNT],
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    sides: Sides,
}

impl Layout {
    /// Compute the panel geometry for the given magnitudes.
    pub fn compute(m: &Magnitudes) -> Self {
        // The center magnitude is the normalization denominator. A zero
        // center falls back to the mean of the other nine, then to 1.
        let mut scale = m.center;
        if scale == 0.0 {
            scale = (m.auth
                + m.auth_left
                + m.left
                + m.lib_left
                + m.lib
                + m.lib_right
                + m.right
                + m.auth_right
                + m.unflaired)
                / 9.0;
            if scale == 0.0 {
                scale = 1.0;
            }
        }

        let sides = Sides {
            center: m.center / scale,
            auth: m.auth / scale,
            auth_left: (m.auth_left / scale).sqrt(),
            left: m.left / scale,
            lib_left: (m.lib_left / scale).sqrt(),
            lib: m.lib / scale,
            lib_right: (m.lib_right / scale).sqrt(),
            right: m.right / scale,
            auth_right: (m.auth_right / scale).sqrt(),
            unflaired: (m.unflaired / scale).sqrt(),
        };

        let unflaired_x = 0.75 + sides.right.max(sides.lib_right).max(sides.auth_right);

        let patches = [
            Patch::new(-0.5, -0.5, sides.center, sides.center),
            Patch::new(-0.5, 0.5, 1.0, sides.auth),
            Patch::new(-0.5, 0.5, -sides.auth_left, sides.auth_left),
            Patch::new(-0.5, -0.5, -sides.left, 1.0),
            Patch::new(-0.5, -0.5, -sides.lib_left, -sides.lib_left),
            Patch::new(-0.5, -0.5, 1.0, -sides.lib),
            Patch::new(0.5, -0.5, sides.lib_right, -sides.lib_right),
            Patch::new(0.5, -0.5, sides.right, 1.0),
            Patch::new(0.5, 0.5, sides.auth_right, sides.auth_right),
            Patch::new(
                unflaired_x,
                -0.5 * sides.unflaired,
                sides.unflaired,
                sides.unflaired,
            ),
        ];

        // Labels sit half an extent past the patch origin/edge.
        let labels = [
            (0.0, 0.0),
            (0.0, 0.5 + 0.5 * sides.auth),
            (-0.5 - 0.5 * sides.auth_left, 0.5 + 0.5 * sides.auth_left),
            (-0.5 - 0.5 * sides.left, 0.0),
            (-0.5 - 0.5 * sides.lib_left, -0.5 - 0.5 * sides.lib_left),
            (0.0, -0.5 - 0.5 * sides.lib),
            (0.5 + 0.5 * sides.lib_right, -0.5 - 0.5 * sides.lib_right),
            (0.5 + 0.5 * sides.right, 0.0),
            (0.5 + 0.5 * sides.auth_right, 0.5 + 0.5 * sides.auth_right),
            (unflaired_x + 0.5 * sides.unflaired, 0.0),
        ];

        // Keep everything visible and roughly isometric: the limits follow
        // the widest extent on each side, with a pad on the left and room
        // for the unflaired square on the right.
        let y_range = (
            -0.5 - sides.lib.max(sides.lib_right).max(sides.lib_left),
            0.5 + sides.auth.max(sides.auth_right).max(sides.auth_left),
        );
        let x_range = (
            -0.5 - sides.left.max(sides.lib_left).max(sides.auth_left) - 0.5,
            1.0 + sides.right.max(sides.lib_right).max(sides.auth_right) + sides.unflaired,
        );

        Self {
            scale,
            patches,
            labels,
            x_range,
            y_range,
            sides,
        }
    }

    /// Directional callouts, one per quadrant, anchored outside the
    /// shape cluster with arrows pointing back in.
    pub fn callouts(&self) -> Vec<Callout> {
        let s = &self.sides;
        let unflaired_label_x =
            1.0 + s.right.max(s.lib_right).max(s.auth_right) + 0.5 * s.unflaired;

        vec![
            Callout {
                name: Quadrant::Auth.name(),
                anchor: (0.0, 0.75 + s.auth),
                tip: (0.0, 0.6 + s.auth),
                h_align: HAlign::Center,
                v_align: VAlign::Bottom,
            },
            Callout {
                name: Quadrant::AuthLeft.name(),
                anchor: (-1.0 - s.auth_left, 1.0 + s.auth_left),
                tip: (-0.6 - s.auth_left, 0.6 + s.auth_left),
                h_align: HAlign::Right,
                v_align: VAlign::Bottom,
            },
            Callout {
                name: Quadrant::Left.name(),
                anchor: (-1.0 - s.left, 0.5),
                tip: (-0.6 - s.left, 0.4),
                h_align: HAlign::Right,
                v_align: VAlign::Center,
            },
            Callout {
                name: Quadrant::Centrist.name(),
                anchor: (-0.8 - s.left, -0.4),
                tip: (-0.6, -0.3),
                h_align: HAlign::Right,
                v_align: VAlign::Center,
            },
            Callout {
                name: Quadrant::LibLeft.name(),
                anchor: (-1.0 - s.lib_left, -1.0 - s.lib_left),
                tip: (-0.6 - s.lib_left, -0.6 - s.lib_left),
                h_align: HAlign::Right,
                v_align: VAlign::Top,
            },
            Callout {
                name: Quadrant::Lib.name(),
                anchor: (0.0, -0.75 - s.lib),
                tip: (0.0, -0.6 - s.lib),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            },
            Callout {
                name: Quadrant::LibRight.name(),
                anchor: (1.0 + s.lib_right, -1.0 - s.lib_right),
                tip: (0.6 + s.lib_right, -0.6 - s.lib_right),
                h_align: HAlign::Left,
                v_align: VAlign::Top,
            },
            Callout {
                name: Quadrant::Right.name(),
                anchor: (1.0 + s.right, 0.75 * s.unflaired),
                tip: (
                    0.6 + s.right,
                    0.75 * s.unflaired + (0.4 - 0.75 * s.unflaired).min(-0.1),
                ),
                h_align: HAlign::Left,
                v_align: VAlign::Bottom,
            },
            Callout {
                name: Quadrant::AuthRight.name(),
                anchor: (1.0 + s.auth_right, 1.0 + s.auth_right),
                tip: (0.6 + s.auth_right, 0.6 + s.auth_right),
                h_align: HAlign::Left,
                v_align: VAlign::Bottom,
            },
            Callout {
                name: Quadrant::Unflaired.name(),
                anchor: (unflaired_label_x, -0.5 - 0.5 * s.unflaired),
                tip: (unflaired_label_x - 0.05, -0.1 - 0.5 * s.unflaired),
                h_align: HAlign::Center,
                v_align: VAlign::Top,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn uniform(value: f64) -> Magnitudes {
        Magnitudes {
            center: value,
            auth: value,
            auth_left: value,
            left: value,
            lib_left: value,
            lib: value,
            lib_right: value,
            right: value,
            auth_right: value,
            unflaired: value,
        }
    }

    #[test]
    fn test_edge_patches_scale_linearly() {
        let mut m = uniform(0.1);
        m.center = 0.2;
        m.auth = 0.4;
        m.left = 0.1;

        let layout = Layout::compute(&m);
        let auth = layout.patches[Quadrant::Auth.index()];
        let left = layout.patches[Quadrant::Left.index()];

        assert!((auth.height - 0.4 / 0.2).abs() < EPSILON);
        assert!((left.width + 0.1 / 0.2).abs() < EPSILON);
        // Doubling the magnitude doubles the extent.
        m.auth = 0.8;
        let doubled = Layout::compute(&m);
        assert!(
            (doubled.patches[Quadrant::Auth.index()].height - 2.0 * auth.height).abs() < EPSILON
        );
    }

    #[test]
    fn test_corner_patches_are_area_proportional() {
        let mut m = uniform(0.1);
        m.center = 0.25;
        m.auth_left = 0.16;
        m.lib_right = 0.04;

        let layout = Layout::compute(&m);
        let auth_left = layout.patches[Quadrant::AuthLeft.index()];
        let lib_right = layout.patches[Quadrant::LibRight.index()];

        // side^2 == magnitude / scale
        assert!((auth_left.width.powi(2) - 0.16 / 0.25).abs() < EPSILON);
        assert!((lib_right.height.powi(2) - 0.04 / 0.25).abs() < EPSILON);
        // Quadrupling the magnitude doubles the side.
        m.auth_left = 0.64;
        let quadrupled = Layout::compute(&m);
        assert!(
            (quadrupled.patches[Quadrant::AuthLeft.index()].width.abs()
                - 2.0 * auth_left.width.abs())
            .abs()
                < EPSILON
        );
    }

    #[test]
    fn test_zero_sum_input_does_not_divide_by_zero() {
        let layout = Layout::compute(&Magnitudes::default());
        assert_eq!(layout.scale, 1.0);
        for patch in &layout.patches {
            assert!(patch.x.is_finite() && patch.y.is_finite());
            assert!(patch.width.is_finite() && patch.height.is_finite());
        }
        assert!(layout.x_range.0.is_finite() && layout.x_range.1.is_finite());
        assert!(layout.y_range.0.is_finite() && layout.y_range.1.is_finite());
    }

    #[test]
    fn test_zero_center_falls_back_to_mean_of_rest() {
        let mut m = uniform(0.9);
        m.center = 0.0;
        let layout = Layout::compute(&m);
        assert!((layout.scale - 0.9).abs() < EPSILON);
        // The center patch itself is drawn with its true (zero) size.
        assert_eq!(layout.patches[Quadrant::Centrist.index()].width, 0.0);
    }

    #[test]
    fn test_unflaired_square_clears_right_side_shapes() {
        let mut m = uniform(0.05);
        m.center = 0.1;
        m.right = 0.3;
        m.unflaired = 0.2;

        let layout = Layout::compute(&m);
        let right_extent = (0.3f64 / 0.1)
            .max((0.05f64 / 0.1).sqrt())
            .max((0.05f64 / 0.1).sqrt());
        let unflaired = layout.patches[Quadrant::Unflaired.index()];
        assert!(unflaired.x >= 0.5 + right_extent + 0.25 - EPSILON);
        // Vertically centered on the horizontal axis.
        assert!((unflaired.y + 0.5 * unflaired.height).abs() < EPSILON);
    }

    #[test]
    fn test_labels_sit_half_an_extent_out() {
        let mut m = uniform(0.1);
        m.center = 0.2;
        m.auth = 0.3;
        let layout = Layout::compute(&m);

        let (x, y) = layout.labels[Quadrant::Auth.index()];
        assert_eq!(x, 0.0);
        assert!((y - (0.5 + 0.5 * 0.3 / 0.2)).abs() < EPSILON);
        assert_eq!(layout.labels[Quadrant::Centrist.index()], (0.0, 0.0));
    }

    #[test]
    fn test_ranges_cover_all_patches() {
        let mut m = uniform(0.12);
        m.center = 0.05;
        m.lib = 0.4;
        m.auth_right = 0.3;
        let layout = Layout::compute(&m);

        for patch in &layout.patches {
            let ((x0, y0), (x1, y1)) = patch.corners();
            assert!(x0 >= layout.x_range.0 - EPSILON);
            assert!(x1 <= layout.x_range.1 + EPSILON);
            assert!(y0 >= layout.y_range.0 - EPSILON);
            assert!(y1 <= layout.y_range.1 + EPSILON);
        }
    }

    #[test]
    fn test_callouts_name_every_quadrant() {
        let layout = Layout::compute(&uniform(0.1));
        let callouts = layout.callouts();
        assert_eq!(callouts.len(), Quadrant::COUNT);
        for quadrant in Quadrant::ALL {
            assert!(callouts.iter().any(|c| c.name == quadrant.name()));
        }
    }

    #[test]
    fn test_corners_are_ordered() {
        let patch = Patch::new(0.5, -0.5, -1.0, 2.0);
        let ((x0, y0), (x1, y1)) = patch.corners();
        assert!(x0 <= x1 && y0 <= y1);
        assert_eq!((x0, y0), (-0.5, -0.5));
        assert_eq!((x1, y1), (0.5, 1.5));
    }
}
