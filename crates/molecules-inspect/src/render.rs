//! Output formatting for resolved styles.

use anyhow::Result;
use clap::ValueEnum;
use console::Style;
use molecules::style::PropertyValue;
use molecules::ResolvedStyle;

use crate::color::{parse_hex, rgb_to_ansi256};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Slot-by-slot listing with color swatches
    #[default]
    Term,
    Json,
    Yaml,
}

/// Formats a resolved style for printing.
pub fn render(resolved: &ResolvedStyle, format: Format) -> Result<String> {
    match format {
        Format::Term => Ok(render_term(resolved)),
        Format::Json => Ok(serde_json::to_string_pretty(resolved)? + "\n"),
        Format::Yaml => Ok(serde_yaml::to_string(resolved)?),
    }
}

fn render_term(resolved: &ResolvedStyle) -> String {
    if resolved.is_empty() {
        return format!("{}\n", Style::new().dim().apply_to("(no slots)"));
    }

    let slot_style = Style::new().bold();
    let key_style = Style::new().cyan();
    let width = resolved
        .iter()
        .flat_map(|(_, props)| props.keys())
        .map(String::len)
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (slot, props) in resolved.iter() {
        out.push_str(&format!("{}\n", slot_style.apply_to(slot)));
        for (key, value) in props {
            out.push_str(&format!(
                "  {}  {}{}\n",
                key_style.apply_to(format!("{:<width$}", key, width = width)),
                swatch(value),
                value
            ));
        }
    }
    out
}

fn swatch(value: &PropertyValue) -> String {
    match value.as_text().and_then(parse_hex) {
        Some(rgb) => format!("{} ", Style::new().color256(rgb_to_ansi256(rgb)).apply_to("██")),
        None => String::new(),
    }
}
