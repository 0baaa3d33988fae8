//! Queries and parsing for the NIST Chemistry WebBook fluid endpoint.
//!
//! The endpoint returns tab-separated isotherm data. Values are
//! calculated from the Span and Wagner equation of state; copyright for
//! NIST Standard Reference Data is governed by the Standard Reference
//! Data Act.

use super::TableGrid;

/// The fluid-properties CGI endpoint.
pub const FLUID_ENDPOINT: &str = "https://webbook.nist.gov/cgi/fluid.cgi";

/// NIST species ID for carbon dioxide.
pub const CO2_ID: &str = "C124389";

/// One data row of an isotherm response.
#[derive(Debug, Clone, PartialEq)]
pub struct IsothermRow {
    /// Density \[kg/m3\].
    pub density: f64,
    /// Enthalpy \[kJ/kg\], as reported by the endpoint.
    pub enthalpy: f64,
    /// Phase label, e.g. "liquid", "vapor", "supercritical".
    pub phase: String,
}

/// Builds the isotherm query URL for one temperature.
///
/// Unit parameters with slashes are pre-encoded; everything else is
/// plain ASCII.
#[must_use]
pub fn isotherm_url(grid: &TableGrid, temperature: f64) -> String {
    format!(
        "{FLUID_ENDPOINT}?Action=Data&Wide=on&ID={CO2_ID}&Type=IsoTherm&Digits=12\
         &PLow={}&PHigh={}&PInc={}&T={temperature}&RefState=DEF\
         &TUnit=K&PUnit=Pa&DUnit=kg%2Fm3&HUnit=kJ%2Fkg&WUnit=m%2Fs&VisUnit=uPas&STUnit=N%2Fm",
        grid.min_pressure,
        grid.max_pressure,
        grid.pressure_step(),
    )
}

/// Parses a tab-separated isotherm response.
///
/// The first line names the columns; the density and enthalpy columns
/// are located by name and the phase label is the last column.
///
/// # Errors
///
/// Returns an error if the header is missing, an expected column is
/// absent, or a value does not parse as a number.
pub fn parse_isotherm(body: &str) -> Result<Vec<IsothermRow>, String> {
    let mut lines = body.lines();
    let header = lines.next().ok_or_else(|| "empty response".to_string())?;
    let columns: Vec<&str> = header.split('\t').collect();

    let density_col = find_column(&columns, "Density")?;
    let enthalpy_col = find_column(&columns, "Enthalpy")?;
    let phase_col = columns.len() - 1;

    let mut rows = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() != columns.len() {
            return Err(format!(
                "row has {} fields, header has {} columns",
                fields.len(),
                columns.len()
            ));
        }
        rows.push(IsothermRow {
            density: parse_field(fields[density_col], "density")?,
            enthalpy: parse_field(fields[enthalpy_col], "enthalpy")?,
            phase: fields[phase_col].trim().to_string(),
        });
    }
    Ok(rows)
}

fn find_column(columns: &[&str], name: &str) -> Result<usize, String> {
    columns
        .iter()
        .position(|c| c.contains(name))
        .ok_or_else(|| format!("no {name} column in response header"))
}

fn parse_field(field: &str, name: &str) -> Result<f64, String> {
    field.trim().parse().map_err(|_| format!("unparseable {name} value {field:?}"))
}

/// Removes the sample pair NIST inserts at a phase boundary.
///
/// The endpoint adds the saturation state on both sides of a phase
/// transition, giving two rows more than the requested sampling. The
/// pair is found as the first adjacent rows whose phase labels differ;
/// an isotherm with no transition passes through unchanged. A range
/// containing two transitions is not handled.
#[must_use]
pub fn strip_phase_transition(rows: Vec<IsothermRow>) -> Vec<IsothermRow> {
    for i in 1..rows.len().saturating_sub(1) {
        if rows[i].phase != rows[i + 1].phase {
            let mut stripped = rows;
            stripped.drain(i..=i + 1);
            return stripped;
        }
    }
    rows
}
