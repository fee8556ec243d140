//! The mission classes as the notebooks see them.

use pyo3::prelude::*;

use super::echo;
use super::types::{PyFitReport, PyStepReport};
use crate::algorithms::period_search::PeriodScan;
use crate::algorithms::transit::TransitParameters;
use crate::config::ToolkitConfig;
use crate::core::LightCurve;
use crate::error::{ToolkitError, ToolkitResult};
use crate::missions::{kepler, KeplerTool, StepReport, TrappistHabitable, TrappistMission};
use crate::simulation::DEFAULT_SEED;

type Columns = (Vec<f64>, Vec<f64>);

fn shown(py: Python<'_>, report: ToolkitResult<StepReport>) -> PyResult<PyStepReport> {
    let report = PyStepReport::from_report(report?)?;
    echo(py, &report.lines)?;
    Ok(report)
}

fn curve_from(time: Vec<f64>, flux: Vec<f64>) -> PyResult<LightCurve> {
    Ok(LightCurve::new(time, flux)?)
}

/// Kepler-22b transit lab.
#[pyclass(module = "exoplanet_toolkit", name = "Kepler_Tool")]
#[derive(Debug, Clone)]
pub struct PyKeplerTool {
    inner: KeplerTool,
}

#[pymethods]
impl PyKeplerTool {
    #[new]
    #[pyo3(signature = (seed = DEFAULT_SEED))]
    fn new(py: Python<'_>, seed: u64) -> PyResult<Self> {
        let inner = KeplerTool::new(seed);
        echo(py, &[inner.greeting().to_string()])?;
        Ok(Self { inner })
    }

    /// Returns `(time, flux)`, or `(None, None)` if the file is missing.
    #[pyo3(signature = (filename = kepler::DEFAULT_DATA_FILE))]
    fn load_data(&self, py: Python<'_>, filename: &str) -> PyResult<(Option<Vec<f64>>, Option<Vec<f64>>)> {
        match self.inner.load_or_report(filename) {
            Ok((curve, lines)) => {
                echo(py, &lines)?;
                let (time, flux) = curve.into_parts();
                Ok((Some(time), Some(flux)))
            }
            Err(lines) => {
                echo(py, &lines)?;
                Ok((None, None))
            }
        }
    }

    /// Synthetic Kepler-22b data as `(time, flux)`.
    fn simulated_data(&self) -> PyResult<Columns> {
        Ok(self.inner.simulated_data()?.into_parts())
    }

    /// Figure JSON for the raw light curve.
    #[pyo3(signature = (time, flux, title = None))]
    fn plot_light_curve(&self, time: Vec<f64>, flux: Vec<f64>, title: Option<&str>) -> PyResult<String> {
        let curve = curve_from(time, flux)?;
        Ok(self.inner.plot_light_curve(&curve, title).to_json(false)?)
    }

    /// Slider descriptions as a JSON list.
    #[staticmethod]
    fn slider_ranges() -> PyResult<String> {
        let json = serde_json::to_string(&KeplerTool::slider_ranges()).map_err(ToolkitError::from)?;
        Ok(json)
    }

    fn interactive_intro(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, Ok(self.inner.interactive_intro()))
    }

    #[pyo3(signature = (time, flux, planet_size = 0.05, orbital_period = 260.0, speed_factor = 4.0))]
    fn evaluate_fit(
        &self,
        py: Python<'_>,
        time: Vec<f64>,
        flux: Vec<f64>,
        planet_size: f64,
        orbital_period: f64,
        speed_factor: f64,
    ) -> PyResult<PyFitReport> {
        let curve = curve_from(time, flux)?;
        let params = TransitParameters::new(planet_size, orbital_period, speed_factor);
        let report = PyFitReport::from_report(self.inner.evaluate_fit(&curve, params)?)?;
        echo(py, &report.lines)?;
        Ok(report)
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.inner.seed()
    }
}

/// TRAPPIST-1 detective mission.
#[pyclass(module = "exoplanet_toolkit", name = "TRAPPISTMission")]
#[derive(Debug, Clone)]
pub struct PyTrappistMission {
    inner: TrappistMission,
}

#[pymethods]
impl PyTrappistMission {
    #[new]
    fn new(py: Python<'_>) -> PyResult<Self> {
        echo(py, &TrappistMission::briefing())?;
        Ok(Self {
            inner: TrappistMission::new(),
        })
    }

    /// Returns whether the file was loaded.
    #[pyo3(signature = (filename = crate::missions::detective::DEFAULT_DATA_FILE))]
    fn load_data(&mut self, py: Python<'_>, filename: &str) -> PyResult<bool> {
        match self.inner.load_data(filename) {
            Ok(lines) => {
                echo(py, &lines)?;
                Ok(true)
            }
            Err(ToolkitError::DataNotFound { .. }) => {
                echo(py, &TrappistMission::not_found_lines(filename))?;
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Use arrays already in the notebook.
    fn set_data(&mut self, time: Vec<f64>, flux: Vec<f64>) -> PyResult<()> {
        self.inner.set_data(curve_from(time, flux)?);
        Ok(())
    }

    #[getter]
    fn planet_b_period(&self) -> f64 {
        self.inner.planet_b_period()
    }

    #[getter]
    fn planet_c_period(&self) -> f64 {
        self.inner.planet_c_period()
    }

    fn fold_at_period(&self, py: Python<'_>, period: f64) -> PyResult<PyStepReport> {
        let report = PyStepReport::from_fold(self.inner.fold_at_period(period)?)?;
        echo(py, &report.lines)?;
        Ok(report)
    }

    fn step1_view_data(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.step1_view_data())
    }

    fn step2_fold_first_planet(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.step2_fold_first_planet())
    }

    fn step3_remove_planet(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.step3_remove_planet())
    }

    fn step4_find_second_planet(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.step4_find_second_planet())
    }

    fn step5_conclusion(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, Ok(self.inner.step5_conclusion()))
    }
}

/// TRAPPIST-1 habitable-zone mission. Loads its data on construction.
#[pyclass(module = "exoplanet_toolkit", name = "TRAPPISTHabitable")]
#[derive(Debug, Clone)]
pub struct PyTrappistHabitable {
    inner: TrappistHabitable,
}

#[pymethods]
impl PyTrappistHabitable {
    /// Raises `ValueError` if an `exoplanet.toml` is found but cannot be read.
    #[new]
    #[pyo3(signature = (data_file = None))]
    fn new(py: Python<'_>, data_file: Option<&str>) -> PyResult<Self> {
        let config = ToolkitConfig::load_or_default()?;
        let inner = TrappistHabitable::with_config(data_file, config);
        echo(py, &inner.startup().lines)?;
        Ok(Self { inner })
    }

    /// Returns whether any samples were loaded.
    #[pyo3(signature = (filename = None))]
    fn load_data(&mut self, py: Python<'_>, filename: Option<&str>) -> PyResult<bool> {
        let (loaded, lines) = self.inner.load_data(filename);
        echo(py, &lines)?;
        Ok(loaded)
    }

    #[getter]
    fn has_data(&self) -> bool {
        self.inner.has_data()
    }

    fn visualize_data(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.visualize_data())
    }

    fn find_habitable_periods(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.find_habitable_periods())
    }

    /// Brute-force period scan over the loaded data.
    #[pyo3(signature = (min_period = 1.0, max_period = 20.0, step = 0.01, count = 5))]
    fn find_periods(
        &self,
        py: Python<'_>,
        min_period: f64,
        max_period: f64,
        step: f64,
        count: usize,
    ) -> PyResult<PyStepReport> {
        let scan = PeriodScan {
            min_period,
            max_period,
            step,
            ..PeriodScan::default()
        };
        shown(py, self.inner.find_periods(&scan, count))
    }

    fn run_habitability_dashboard(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, self.inner.run_habitability_dashboard())
    }

    fn real_science_connection(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, Ok(self.inner.real_science_connection()))
    }

    /// Write the team report and return its path.
    #[pyo3(signature = (team_name = None))]
    fn save_report(&self, py: Python<'_>, team_name: Option<&str>) -> PyResult<String> {
        let saved = self.inner.save_report(team_name)?;
        echo(py, &saved.lines)?;
        Ok(saved.path.display().to_string())
    }

    fn fold_at_period(&self, py: Python<'_>, period: f64) -> PyResult<PyStepReport> {
        shown(py, self.inner.fold_at_period(period))
    }

    fn show_full_system(&self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, Ok(self.inner.show_full_system()))
    }

    fn solar_system_comparison(&mut self, py: Python<'_>) -> PyResult<PyStepReport> {
        shown(py, Ok(self.inner.solar_system_comparison()))
    }
}
