use std::collections::BTreeMap;

/// Value of a single style attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleValue {
    Text(String),
    Scalar(f64),
    Series(Vec<f64>),
}

/// Open-ended style attributes forwarded to the rendering surface.
///
/// The assembler interprets only the color channel (`c`); everything else
/// is passed through opaquely and surfaces must tolerate keys they do not
/// understand.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotStyle {
    entries: BTreeMap<String, StyleValue>,
}

impl PlotStyle {
    pub fn new() -> PlotStyle {
        PlotStyle::default()
    }

    pub fn set(mut self, key: &str, value: StyleValue) -> PlotStyle {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: &str, value: StyleValue) {
        self.entries.insert(key.to_string(), value);
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let style = PlotStyle::new()
            .set("c", StyleValue::Text("blue".to_string()))
            .set("s", StyleValue::Scalar(4.0));
        assert!(style.contains("c"));
        assert_eq!(style.get("s"), Some(&StyleValue::Scalar(4.0)));
        assert_eq!(style.get("alpha"), None);
        assert_eq!(style.iter().count(), 2);
    }
}
