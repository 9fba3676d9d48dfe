mod chart;
mod color;
mod density;
mod error;
mod plot;
mod ratio;
mod style;

use anyhow::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

pub use chart::{ChartAppearance, VanKrevelenChart, load_appearance};
pub use color::{DensityColorMap, parse_color};
pub use density::{GaussianKde, kernel_density};
pub use error::PlotError;
pub use plot::{COLOR_KEY, DENSITY, ScatterSurface, X_LABEL, Y_LABEL, render};
pub use ratio::{HC_KEY, OC_KEY, RatioRecord, TableFormat, extract_ratios, load_ratio_table};
pub use style::{PlotStyle, StyleValue};

fn plot_on<DB>(area: DrawingArea<DB, Shift>, ratios: &[RatioRecord], style: &PlotStyle, appearance: &ChartAppearance) -> Result<(), PlotError>
where
    DB: DrawingBackend,
{
    area.fill(&WHITE).map_err(|e| PlotError::Render(e.to_string()))?;
    let mut chart = VanKrevelenChart::new(area, appearance.clone());
    render(ratios, style, &mut chart)?;
    chart.present()
}

/// Render a van krevelen diagram into an image file. The backend is chosen
/// by extension: ".svg" produces a vector image, anything else a bitmap.
pub fn plot(name: &str, ratios: &[RatioRecord], style: &PlotStyle, appearance: &ChartAppearance, dim: (u32, u32)) -> Result<()> {
    if name.ends_with(".svg") {
        let area = SVGBackend::new(name, dim).into_drawing_area();
        plot_on(area, ratios, style, appearance)?;
    } else {
        let area = BitMapBackend::new(name, dim).into_drawing_area();
        plot_on(area, ratios, style, appearance)?;
    }
    Ok(())
}
