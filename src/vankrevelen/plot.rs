// @file plot.rs
// @brief van krevelen scatter assembler

use crate::vankrevelen::density::kernel_density;
use crate::vankrevelen::error::PlotError;
use crate::vankrevelen::ratio::{RatioRecord, extract_ratios};
use crate::vankrevelen::style::{PlotStyle, StyleValue};

/// Short-form color key interpreted by the assembler.
pub const COLOR_KEY: &str = "c";

/// Sentinel color value that triggers kernel density estimation.
pub const DENSITY: &str = "density";

/// Long-form alias rejected outright. The rendering surface would accept
/// both spellings and silently prioritizing one over the other produces
/// confusing results.
const RESERVED_COLOR_KEY: &str = "color";

const DEFAULT_COLOR: &str = "blue";

pub const X_LABEL: &str = "Atomic ratio of O/C";
pub const Y_LABEL: &str = "Atomic ratio of H/C";

/// Drawing surface fed by `render`.
///
/// Implementations must tolerate style keys they do not understand.
pub trait ScatterSurface {
    fn scatter(&mut self, x: &[f64], y: &[f64], style: &PlotStyle) -> Result<(), PlotError>;
    fn grid(&mut self, enabled: bool) -> Result<(), PlotError>;
    fn xlabel(&mut self, text: &str) -> Result<(), PlotError>;
    fn ylabel(&mut self, text: &str) -> Result<(), PlotError>;
}

// first match wins: default monochrome, density sentinel, explicit series
// (validated against the record count), anything else passes through
fn resolve_color(style: &mut PlotStyle, ratios: &[RatioRecord]) -> Result<(), PlotError> {
    if style.contains(RESERVED_COLOR_KEY) {
        return Err(PlotError::InvalidOption(format!(
            "supply the color as the short-form key {COLOR_KEY:?}"
        )));
    }

    match style.get(COLOR_KEY) {
        None => {
            style.insert(COLOR_KEY, StyleValue::Text(DEFAULT_COLOR.to_string()));
        }
        Some(StyleValue::Text(value)) if value == DENSITY => {
            style.insert(COLOR_KEY, StyleValue::Series(kernel_density(ratios)?));
        }
        Some(StyleValue::Series(values)) if values.len() != ratios.len() => {
            return Err(PlotError::LengthMismatch {
                expected: ratios.len(),
                actual: values.len(),
            });
        }
        _ => {}
    }
    Ok(())
}

/// Validate, resolve the color channel, and draw one scatter onto `surface`
/// with grid lines and the atomic-ratio axis labels.
///
/// Every failure is raised before the first surface call, so a failed render
/// leaves the surface untouched.
pub fn render<S>(ratios: &[RatioRecord], style: &PlotStyle, surface: &mut S) -> Result<(), PlotError>
where
    S: ScatterSurface,
{
    let mut style = style.clone();
    resolve_color(&mut style, ratios)?;
    let (x, y) = extract_ratios(ratios)?;

    surface.scatter(&x, &y, &style)?;
    surface.grid(true)?;
    surface.xlabel(X_LABEL)?;
    surface.ylabel(Y_LABEL)?;
    Ok(())
}
