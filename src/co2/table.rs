//! Rendering of the tabulated values into the include file.

use super::TableGrid;

/// The include-file template with `${...}` placeholders.
const TEMPLATE: &str = include_str!("co2values.inc.in");

/// A fully sampled table ready for rendering.
#[derive(Debug)]
pub struct Co2Table {
    /// The sampling grid the values were taken on.
    pub grid: TableGrid,
    /// Density \[kg/m3\], one row per temperature sample.
    pub density: Vec<Vec<f64>>,
    /// Enthalpy \[J/kg\], one row per temperature sample.
    pub enthalpy: Vec<Vec<f64>>,
}

impl Co2Table {
    /// Renders the include file by filling the template placeholders.
    #[must_use]
    pub fn render(&self) -> String {
        let replacements = [
            ("${MIN_TEMP}", format_number(self.grid.min_temperature)),
            ("${MAX_TEMP}", format_number(self.grid.max_temperature)),
            ("${NUM_TEMP_SAMPLES}", self.grid.temperature_samples.to_string()),
            ("${MIN_PRESS}", format_number(self.grid.min_pressure)),
            ("${MAX_PRESS}", format_number(self.grid.max_pressure)),
            ("${NUM_PRESS_SAMPLES}", self.grid.pressure_samples.to_string()),
            ("${DENSITY_VALS}", format_rows(&self.density)),
            ("${ENTHALPY_VALS}", format_rows(&self.enthalpy)),
        ];

        let mut output = TEMPLATE.to_string();
        for (placeholder, value) in replacements {
            output = output.replace(placeholder, &value);
        }
        output
    }
}

/// Formats the per-temperature rows as brace-wrapped array literals.
fn format_rows(rows: &[Vec<f64>]) -> String {
    rows.iter()
        .map(|row| {
            let values: Vec<String> = row.iter().map(|v| format_scientific(*v)).collect();
            format!("    {{{}}}", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// Formats a value in C-style scientific notation with twelve
/// fractional digits and a signed two-digit exponent.
fn format_scientific(value: f64) -> String {
    let formatted = format!("{value:.12e}");
    let (mantissa, exponent) = formatted.split_once('e').expect("exponent marker");
    let exponent: i32 = exponent.parse().expect("numeric exponent");
    format!("{mantissa}e{}{:02}", if exponent < 0 { '-' } else { '+' }, exponent.abs())
}

/// Formats a grid bound the way it appears in the file header.
fn format_number(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1.0e7 {
        format!("{value:.1}")
    } else {
        format_scientific(value)
    }
}
