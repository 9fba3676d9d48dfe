pub mod vankrevelen;

pub use vankrevelen::{
    ChartAppearance, GaussianKde, PlotError, PlotStyle, RatioRecord, ScatterSurface, StyleValue, VanKrevelenChart,
};
