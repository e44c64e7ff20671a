//! Cosmetic descriptors: colors, fonts, the frame (spines and ticks) of
//! a chart region, and tick-label settings.
//!
//! Everything here is plain Rust data.  [`crate::plt::Axes`] turns these
//! values into Matplotlib calls, so the styling rules can be checked
//! without a Python interpreter.

use std::fmt::{Display, Formatter};

/// An opaque RGB color, rendered as `#rrggbb` for Matplotlib.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    /// Light gray used behind the whole figure.
    pub const BACKGROUND: Color = Color::rgb(0xF5, 0xF5, 0xF5);
    /// Forest green of the figure's super-title.
    pub const FOREST_GREEN: Color = Color::rgb(0x22, 0x8B, 0x22);
    /// Dark blue of every chart title.
    pub const DARK_BLUE: Color = Color::rgb(0x00, 0x00, 0x8B);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b }
    }

    /// `#rrggbb` form understood by Matplotlib.
    pub fn hex(&self) -> String {
        self.to_string()
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Matplotlib's qualitative `Paired` colormap.
const PAIRED: [Color; 12] = [
    Color::rgb(0xa6, 0xce, 0xe3),
    Color::rgb(0x1f, 0x78, 0xb4),
    Color::rgb(0xb2, 0xdf, 0x8a),
    Color::rgb(0x33, 0xa0, 0x2c),
    Color::rgb(0xfb, 0x9a, 0x99),
    Color::rgb(0xe3, 0x1a, 0x1c),
    Color::rgb(0xfd, 0xbf, 0x6f),
    Color::rgb(0xff, 0x7f, 0x00),
    Color::rgb(0xca, 0xb2, 0xd6),
    Color::rgb(0x6a, 0x3d, 0x9a),
    Color::rgb(0xff, 0xff, 0x99),
    Color::rgb(0xb1, 0x59, 0x28),
];

/// A cyclic list of colors indexed by category.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// The 12 colors of Matplotlib's `Paired` colormap, in order.
    pub fn paired() -> Palette {
        Palette { colors: PAIRED.to_vec() }
    }

    /// Color of the `i`-th category.  Indices past the end wrap around.
    pub fn get(&self, i: usize) -> Color {
        self.colors[i % self.colors.len()]
    }

    /// The first `n` category colors.
    pub fn take(&self, n: usize) -> Vec<Color> {
        (0 .. n).map(|i| self.get(i)).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

impl FontWeight {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontWeight::Normal => "normal",
            FontWeight::Bold => "bold",
        }
    }
}

/// Font settings of a text element.  `None` keeps Matplotlib's default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: Option<f64>,
    pub weight: FontWeight,
    pub color: Option<Color>,
}

impl Font {
    pub const fn new() -> Font {
        Font { size: None, weight: FontWeight::Normal, color: None }
    }

    pub const fn size(mut self, size: f64) -> Font {
        self.size = Some(size);
        self
    }

    pub const fn bold(mut self) -> Font {
        self.weight = FontWeight::Bold;
        self
    }

    pub const fn color(mut self, c: Color) -> Font {
        self.color = Some(c);
        self
    }
}

impl Default for Font {
    fn default() -> Self { Font::new() }
}

/// Which border of an axes region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// Key of the side in `Axes.spines`.
    pub fn name(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Appearance of one border line.  `None` fields keep the default.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spine {
    pub color: Option<Color>,
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirection {
    In,
}

impl TickDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TickDirection::In => "in",
        }
    }
}

/// Tick mark geometry, applied to both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickMarks {
    pub direction: Option<TickDirection>,
    pub length: Option<f64>,
    pub width: Option<f64>,
}

/// The frame of a region: its four borders and its tick marks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStyle {
    pub spines: [Spine; 4], // Indexed like `Side::ALL`.
    pub ticks: TickMarks,
}

impl FrameStyle {
    pub fn spine(&self, side: Side) -> &Spine {
        &self.spines[side as usize]
    }

    /// Iterate over `(side, spine)` in `Side::ALL` order.
    pub fn sides(&self) -> impl Iterator<Item = (Side, &Spine)> {
        Side::ALL.into_iter().zip(self.spines.iter())
    }
}

/// Border width set by [`format_plot`].
pub const BORDER_WIDTH: f64 = 2.;
/// Tick length set by [`format_plot`].
pub const TICK_LENGTH: f64 = 6.;
/// Tick width set by [`format_plot`].
pub const TICK_WIDTH: f64 = 2.;

/// Give a region uniform borders of `color` and inward ticks.
///
/// Every field touched is overwritten, so applying it twice is the same
/// as applying it once.
pub fn format_plot(frame: &mut FrameStyle, color: Color) {
    for spine in frame.spines.iter_mut() {
        spine.color = Some(color);
        spine.width = Some(BORDER_WIDTH);
    }
    frame.ticks = TickMarks {
        direction: Some(TickDirection::In),
        length: Some(TICK_LENGTH),
        width: Some(TICK_WIDTH),
    };
}

/// Tick-label settings of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisLabels {
    pub size: Option<f64>,
    /// Rotation in degrees; `None` leaves the current rotation.
    pub rotation: Option<f64>,
    pub bold: bool,
}

/// Tick-label settings of a chart region, x then y.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickLabels {
    pub x: AxisLabels,
    pub y: AxisLabels,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_hex() {
        assert_eq!(Color::BLACK.hex(), "#000000");
        assert_eq!(Color::BACKGROUND.hex(), "#f5f5f5");
        assert_eq!(Color::FOREST_GREEN.to_string(), "#228b22");
    }

    #[test]
    fn paired_wraps() {
        let p = Palette::paired();
        assert_eq!(p.get(0), Color::rgb(0xa6, 0xce, 0xe3));
        assert_eq!(p.get(12), p.get(0));
        assert_eq!(p.get(13), p.get(1));
        assert_eq!(p.take(3), vec![p.get(0), p.get(1), p.get(2)]);
    }

    #[test]
    fn format_plot_sets_every_side() {
        let mut frame = FrameStyle::default();
        format_plot(&mut frame, Color::BLACK);
        for (_, s) in frame.sides() {
            assert_eq!(s.color, Some(Color::BLACK));
            assert_eq!(s.width, Some(BORDER_WIDTH));
        }
        assert_eq!(frame.ticks.direction, Some(TickDirection::In));
        assert_eq!(frame.ticks.length, Some(6.));
        assert_eq!(frame.ticks.width, Some(2.));
    }

    #[test]
    fn format_plot_is_idempotent() {
        let mut once = FrameStyle::default();
        format_plot(&mut once, Color::BLACK);
        let mut twice = once;
        format_plot(&mut twice, Color::BLACK);
        assert_eq!(once, twice);
    }

    #[test]
    fn format_plot_overwrites() {
        let mut frame = FrameStyle::default();
        format_plot(&mut frame, Color::DARK_BLUE);
        format_plot(&mut frame, Color::BLACK);
        assert_eq!(frame.spine(Side::Top).color, Some(Color::BLACK));
        let mut fresh = FrameStyle::default();
        format_plot(&mut fresh, Color::BLACK);
        assert_eq!(frame, fresh);
    }
}
