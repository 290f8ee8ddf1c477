/// How a `'.'` in a frame maps onto digit slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PointMode {
    /// `'.'` is a glyph of its own and takes a whole slot.
    #[default]
    Standalone,
    /// `'.'` lights the point of the slot before it and takes no slot.
    Folded,
}

/// Electrical level of the output-enable line that makes the display visible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Visible while the line is low (`/OE` on 74HC595 style registers).
    #[default]
    ActiveLow,
    /// Visible while the line is high, e.g. behind an inverting buffer.
    ActiveHigh,
}

impl Polarity {
    pub const fn level(self, visible: bool) -> bool {
        match self {
            Polarity::ActiveLow => !visible,
            Polarity::ActiveHigh => visible,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub point_mode: PointMode,
    pub output_enable: Polarity,
    /// Trace every shifted digit (needs the `defmt` feature to go anywhere).
    pub verbose: bool,
}

impl Config {
    pub const fn new() -> Self {
        Self {
            point_mode: PointMode::Standalone,
            output_enable: Polarity::ActiveLow,
            verbose: false,
        }
    }

    pub const fn point_mode(mut self, point_mode: PointMode) -> Self {
        self.point_mode = point_mode;
        self
    }

    pub const fn output_enable(mut self, polarity: Polarity) -> Self {
        self.output_enable = polarity;
        self
    }

    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
