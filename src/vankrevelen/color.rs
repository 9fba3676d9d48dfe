use crate::vankrevelen::error::PlotError;
use hex_color::HexColor;
use plotters::prelude::RGBColor;

/// Two-color gradient mapping per-point density values onto marker colors.
#[derive(Copy, Clone, Debug)]
pub struct DensityColorMap {
    pub palette: [RGBColor; 2], // [low, high]
}

impl DensityColorMap {
    pub(crate) fn to_picker(self, values: &[f64]) -> DensityColorPicker {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &v in values.iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        let scale = if max > min { 1.0 / (max - min) } else { 0.0 };
        DensityColorPicker {
            palette: self.palette,
            offset: if min.is_finite() { min } else { 0.0 },
            scale,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct DensityColorPicker {
    palette: [RGBColor; 2],
    offset: f64,
    scale: f64,
}

impl DensityColorPicker {
    pub fn get_color(&self, value: f64) -> RGBColor {
        let t = ((value - self.offset) * self.scale).clamp(0.0, 1.0);
        let (lo, hi) = (self.palette[0], self.palette[1]);
        let lerp = |a: u8, b: u8| (a as f64 + t * (b as f64 - a as f64)).round() as u8;
        RGBColor(lerp(lo.0, hi.0), lerp(lo.1, hi.1), lerp(lo.2, hi.2))
    }
}

/// Parse a color given as a simple name or a "#rrggbb" hex literal.
pub fn parse_color(name: &str) -> Result<RGBColor, PlotError> {
    let named = match name.to_ascii_lowercase().as_str() {
        "black" => Some(RGBColor(0, 0, 0)),
        "white" => Some(RGBColor(255, 255, 255)),
        "red" => Some(RGBColor(255, 0, 0)),
        "green" => Some(RGBColor(0, 128, 0)),
        "blue" => Some(RGBColor(0, 0, 255)),
        "yellow" => Some(RGBColor(255, 255, 0)),
        "cyan" => Some(RGBColor(0, 255, 255)),
        "magenta" => Some(RGBColor(255, 0, 255)),
        "orange" => Some(RGBColor(255, 165, 0)),
        "grey" | "gray" => Some(RGBColor(128, 128, 128)),
        _ => None,
    };
    if let Some(color) = named {
        return Ok(color);
    }
    let color =
        HexColor::parse(name).map_err(|_| PlotError::InvalidOption(format!("unrecognized color {name:?}")))?;
    Ok(RGBColor(color.r, color.g, color.b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_and_hex() {
        assert_eq!(parse_color("blue").unwrap(), RGBColor(0, 0, 255));
        assert_eq!(parse_color("Orange").unwrap(), RGBColor(255, 165, 0));
        assert_eq!(parse_color("#ff0040").unwrap(), RGBColor(255, 0, 64));
        assert!(matches!(parse_color("plaid"), Err(PlotError::InvalidOption(_))));
    }

    #[test]
    fn picker_spans_the_palette() {
        let map = DensityColorMap {
            palette: [RGBColor(0, 64, 255), RGBColor(255, 0, 64)],
        };
        let picker = map.to_picker(&[1.0, 2.0, 3.0]);
        assert_eq!(picker.get_color(1.0), RGBColor(0, 64, 255));
        assert_eq!(picker.get_color(3.0), RGBColor(255, 0, 64));
        // midpoint lands halfway between the endpoints
        assert_eq!(picker.get_color(2.0), RGBColor(128, 32, 160));
    }

    #[test]
    fn constant_values_pick_the_low_end() {
        let map = DensityColorMap {
            palette: [RGBColor(0, 0, 0), RGBColor(255, 255, 255)],
        };
        let picker = map.to_picker(&[0.7, 0.7]);
        assert_eq!(picker.get_color(0.7), RGBColor(0, 0, 0));
    }
}
