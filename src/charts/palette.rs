//! Color palettes for category charts: sampled colormaps plus tab10.

/// Plain RGB triple, converted to egui or plotters colors at draw time.
pub type Rgb = [u8; 3];

const VIRIDIS: [Rgb; 10] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [110, 206, 88],
    [181, 222, 43],
    [253, 231, 37],
];

const MAGMA: [Rgb; 10] = [
    [0, 0, 4],
    [24, 15, 61],
    [68, 15, 118],
    [114, 31, 129],
    [158, 47, 127],
    [205, 64, 113],
    [241, 96, 93],
    [253, 150, 104],
    [254, 202, 141],
    [252, 253, 191],
];

const MAKO: [Rgb; 8] = [
    [11, 4, 5],
    [46, 30, 60],
    [65, 61, 123],
    [55, 101, 158],
    [52, 143, 167],
    [64, 183, 173],
    [138, 217, 177],
    [222, 245, 229],
];

const CIVIDIS: [Rgb; 10] = [
    [0, 34, 78],
    [18, 53, 112],
    [59, 73, 108],
    [87, 93, 109],
    [112, 113, 115],
    [138, 135, 121],
    [166, 157, 117],
    [196, 181, 108],
    [228, 207, 91],
    [254, 232, 56],
];

/// Matplotlib's default categorical cycle.
const TAB10: [Rgb; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Viridis,
    Magma,
    Mako,
    Cividis,
    Tab10,
}

impl Palette {
    /// `n` colors for `n` categories.
    ///
    /// Continuous maps are sampled at evenly spaced interior points, skipping
    /// both extremes. `Tab10` cycles.
    pub fn colors(self, n: usize) -> Vec<Rgb> {
        let stops: &[Rgb] = match self {
            Palette::Viridis => &VIRIDIS,
            Palette::Magma => &MAGMA,
            Palette::Mako => &MAKO,
            Palette::Cividis => &CIVIDIS,
            Palette::Tab10 => return (0..n).map(|i| TAB10[i % TAB10.len()]).collect(),
        };

        (0..n)
            .map(|i| Self::sample(stops, (i + 1) as f64 / (n + 1) as f64))
            .collect()
    }

    /// Linear interpolation between neighbouring stops, `t` in `[0, 1]`.
    fn sample(stops: &[Rgb], t: f64) -> Rgb {
        let scaled = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        let lower = scaled.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = scaled - lower as f64;

        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        [
            mix(stops[lower][0], stops[upper][0]),
            mix(stops[lower][1], stops[upper][1]),
            mix(stops[lower][2], stops[upper][2]),
        ]
    }
}
