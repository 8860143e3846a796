use std::collections::BTreeMap;

use palette::{Hsl, IntoColor, Srgb};
use serde::Serialize;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct `#rrggbb` colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            let rgb: Srgb<u8> = rgb.into_format();
            format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Lead palette: project lead → series colour
// ---------------------------------------------------------------------------

/// Assigns each project lead a stable colour for stacked / grouped charts.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct LeadPalette {
    mapping: BTreeMap<String, String>,
    #[serde(skip)]
    default_color: String,
}

impl LeadPalette {
    /// Build a palette over `leads`; duplicates share one colour.
    pub fn new<I, S>(leads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let leads: std::collections::BTreeSet<String> =
            leads.into_iter().map(Into::into).collect();
        let palette = generate_palette(leads.len());
        let mapping = leads.into_iter().zip(palette).collect();

        LeadPalette {
            mapping,
            default_color: "#808080".to_string(),
        }
    }

    /// Look up the colour for a lead, grey if it is unknown.
    pub fn color_for(&self, lead: &str) -> &str {
        self.mapping
            .get(lead)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    /// Legend entries (lead → colour) in lead order.
    pub fn legend_entries(&self) -> Vec<(String, String)> {
        self.mapping
            .iter()
            .map(|(lead, color)| (lead.clone(), color.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct_hex() {
        let colours = generate_palette(4);
        assert_eq!(colours.len(), 4);
        assert!(colours.iter().all(|c| c.len() == 7 && c.starts_with('#')));
        let unique: std::collections::BTreeSet<_> = colours.iter().collect();
        assert_eq!(unique.len(), 4);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn leads_share_colour_by_name() {
        let palette = LeadPalette::new(["Bob", "Alice", "Bob"]);
        assert_eq!(palette.legend_entries().len(), 2);
        assert_eq!(palette.legend_entries()[0].0, "Alice");
        assert_ne!(palette.color_for("Alice"), palette.color_for("Bob"));
        assert_eq!(palette.color_for("Nobody"), "#808080");
    }
}
