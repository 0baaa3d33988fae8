//! CO2 property-table generation from the NIST reference database.
//!
//! Queries one isotherm per temperature sample, strips the extra
//! phase-transition points NIST inserts, and renders the density and
//! enthalpy grids into a C include file.

pub mod nist;
pub mod table;

use std::path::Path;

use crate::context::ServiceContext;

pub use table::Co2Table;

/// The sampling grid for the generated table.
///
/// Both axes are inclusive: the minimum and maximum are the first and
/// last sample points.
#[derive(Debug, Clone)]
pub struct TableGrid {
    /// Lowest sampled temperature \[K\].
    pub min_temperature: f64,
    /// Highest sampled temperature \[K\].
    pub max_temperature: f64,
    /// Number of temperature samples.
    pub temperature_samples: usize,
    /// Lowest sampled pressure \[Pa\].
    pub min_pressure: f64,
    /// Highest sampled pressure \[Pa\].
    pub max_pressure: f64,
    /// Number of pressure samples.
    pub pressure_samples: usize,
}

impl Default for TableGrid {
    fn default() -> Self {
        Self {
            min_temperature: 290.0,
            max_temperature: 340.0,
            temperature_samples: 50,
            min_pressure: 1.0e5,
            max_pressure: 1.0e8,
            pressure_samples: 495,
        }
    }
}

impl TableGrid {
    /// Spacing between adjacent temperature samples.
    #[must_use]
    pub fn temperature_step(&self) -> f64 {
        (self.max_temperature - self.min_temperature) / (self.temperature_samples as f64 - 1.0)
    }

    /// Spacing between adjacent pressure samples.
    #[must_use]
    pub fn pressure_step(&self) -> f64 {
        (self.max_pressure - self.min_pressure) / (self.pressure_samples as f64 - 1.0)
    }

    /// The sampled temperatures, lowest first.
    pub fn temperatures(&self) -> impl Iterator<Item = f64> + '_ {
        let step = self.temperature_step();
        (0..self.temperature_samples).map(move |i| self.min_temperature + i as f64 * step)
    }
}

/// Fetches every isotherm and writes the rendered table to `output`.
///
/// # Errors
///
/// Returns an error if a query fails, a response cannot be parsed, an
/// isotherm yields the wrong number of samples, or the output file
/// cannot be written.
pub async fn generate(
    ctx: &ServiceContext,
    grid: &TableGrid,
    output: &Path,
) -> Result<(), String> {
    let mut density = Vec::with_capacity(grid.temperature_samples);
    let mut enthalpy = Vec::with_capacity(grid.temperature_samples);

    for (index, temperature) in grid.temperatures().enumerate() {
        println!(
            "Fetching isotherm T = {temperature:.2} K ({}/{})",
            index + 1,
            grid.temperature_samples
        );
        let url = nist::isotherm_url(grid, temperature);
        let body = ctx
            .http
            .get_text(&url)
            .await
            .map_err(|e| format!("Failed to query isotherm at {temperature} K: {e}"))?;

        let rows = nist::parse_isotherm(&body)
            .map_err(|e| format!("Failed to parse isotherm at {temperature} K: {e}"))?;
        let rows = nist::strip_phase_transition(rows);
        if rows.len() != grid.pressure_samples {
            return Err(format!(
                "Isotherm at {temperature} K has {} samples, expected {}",
                rows.len(),
                grid.pressure_samples
            ));
        }

        density.push(rows.iter().map(|r| r.density).collect());
        // The reference data reports enthalpy in kJ/kg; the table is in J/kg.
        enthalpy.push(rows.iter().map(|r| r.enthalpy * 1000.0).collect());
    }

    let table = Co2Table { grid: grid.clone(), density, enthalpy };
    ctx.fs
        .write(output, &table.render())
        .map_err(|e| format!("Failed to write {}: {e}", output.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grid_matches_published_table_bounds() {
        let grid = TableGrid::default();
        assert!((grid.min_temperature - 290.0).abs() < f64::EPSILON);
        assert!((grid.max_temperature - 340.0).abs() < f64::EPSILON);
        assert_eq!(grid.temperature_samples, 50);
        assert_eq!(grid.pressure_samples, 495);
    }

    #[test]
    fn temperature_samples_are_evenly_spaced_and_inclusive() {
        let grid = TableGrid {
            min_temperature: 290.0,
            max_temperature: 300.0,
            temperature_samples: 3,
            ..TableGrid::default()
        };
        let temps: Vec<f64> = grid.temperatures().collect();
        assert_eq!(temps, vec![290.0, 295.0, 300.0]);
    }
}
