//! Wind farm simulation pipeline
//!
//! `SimulationEngine` ties the stages together:
//! - Request validation (fails fast, before any wake computation)
//! - Geodetic to planar projection (once per run)
//! - Per-direction wake analysis (optionally on the rayon pool)
//! - Energy accumulation (AEP, capacity factor, wake efficiency)
//! - Performance metrics and layout recommendations
//!
//! Every stage appends a [`TraceEvent`]; the returned [`SimulationOutcome`]
//! carries either the full artifact or the validation error, plus the trace.
//!
//! # Example
//!
//! ```
//! use wake_sim_core::{
//!     LayoutSpec, SimulationEngine, SimulationRequest, TurbinePosition, TurbineRegistry,
//! };
//!
//! let engine = SimulationEngine::new(TurbineRegistry::standard());
//! let layout = LayoutSpec::new(
//!     vec![
//!         TurbinePosition::new("T1", 55.0, 8.00),
//!         TurbinePosition::new("T2", 55.0, 8.02),
//!     ],
//!     "GE 2.5-120",
//! );
//! let outcome = engine.run(&SimulationRequest::new(layout));
//! let artifact = outcome.artifact().unwrap();
//! assert!(artifact.metadata.default_wind_resource);
//! assert!(*artifact.summary.annual_energy > 0.0);
//! ```

pub mod analysis;
pub mod artifact;
pub mod error;
pub mod optimization;
pub mod trace;

pub use analysis::{
    DirectionalPerformance, EnergyYield, PerformanceAnalyzer, PerformanceSummary,
    TurbinePerformance,
};
pub use artifact::{
    AnalysisParameters, ArtifactMetadata, LayoutConfiguration, SimulationArtifact,
    SimulationOutcome,
};
pub use error::{ValidationError, Warning};
pub use optimization::{
    AdvisorContext, OptimizationAdvisor, Priority, Recommendation, RecommendationCategory,
};
pub use trace::{PlainTextRenderer, TraceCategory, TraceEvent, TraceRenderer};

use crate::config::{ConfigError, EngineConfig, HOURS_PER_YEAR};
use crate::core_types::layout::{TurbinePosition, Vec2};
use crate::core_types::request::{AnalysisOptions, SimulationRequest, WakeModelVariant};
use crate::core_types::turbine::{TurbineRegistry, TurbineSpec};
use crate::core_types::units::{MegawattHours, Megawatts, Percent};
use crate::core_types::wind::{WindCondition, WindResource};
use crate::physics::coordinates::{project_to_local, spacing_stats};
use crate::physics::wake::{analyze_condition, JensenWake, NoWake, WakeAnalysisResult, WakeModel};
use std::fmt::Write as _;
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Stateless, deterministic wake simulation engine
///
/// Holds only the injected turbine registry and configuration; each call to
/// [`run`](Self::run) is independent and idempotent.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    registry: TurbineRegistry,
    config: EngineConfig,
}

/// Request after validation, with defaults resolved
struct ResolvedRequest<'a> {
    spec: &'a TurbineSpec,
    options: AnalysisOptions,
    wind: WindResource,
    total_capacity: Megawatts,
    warnings: Vec<Warning>,
    default_wind: bool,
}

impl SimulationEngine {
    /// Engine with default configuration
    pub fn new(registry: TurbineRegistry) -> Self {
        Self::assemble(registry, EngineConfig::default())
    }

    /// Engine with explicit configuration
    ///
    /// # Errors
    /// Returns [`ConfigError`] when `config` fails [`EngineConfig::validate`].
    pub fn with_config(
        registry: TurbineRegistry,
        config: EngineConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(registry, config))
    }

    fn assemble(registry: TurbineRegistry, config: EngineConfig) -> Self {
        info!(
            "Creating simulation engine: {} turbine models, parallel={:?}",
            registry.len(),
            config.parallel
        );
        Self { registry, config }
    }

    pub fn registry(&self) -> &TurbineRegistry {
        &self.registry
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full pipeline
    pub fn run(&self, request: &SimulationRequest) -> SimulationOutcome {
        let mut trace = Vec::new();

        let resolved = match self.validate(request) {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!("Simulation request rejected: {error}");
                trace.push(TraceEvent::new(
                    "Validation Failed",
                    error.to_string(),
                    TraceCategory::Validation,
                ));
                return SimulationOutcome::Failure { error, trace };
            }
        };
        let spec = resolved.spec;

        // Stage 1: setup
        let positions = project_to_local(&request.layout.turbines);
        let points: Vec<Vec2> = positions.iter().filter_map(TurbinePosition::planar).collect();
        let spacing = spacing_stats(&points);

        let (model, decay_constant): (Box<dyn WakeModel>, Option<f64>) =
            match resolved.options.wake_model {
                WakeModelVariant::Jensen => {
                    let jensen = JensenWake::new(resolved.options.ambient_turbulence);
                    let k = jensen.decay_constant();
                    (Box::new(jensen), Some(k))
                }
                WakeModelVariant::NoWake => (Box::new(NoWake), None),
            };

        info!(
            "Simulating {} x {} across {} wind conditions ({} wake model)",
            points.len(),
            spec.name,
            resolved.wind.len(),
            resolved.options.wake_model
        );
        trace.push(setup_event(&resolved, points.len(), model.name(), decay_constant));

        // Stage 2: wake analysis
        let results = self.analyze_all(model.as_ref(), spec, &points, &resolved.wind.conditions);
        trace.push(wake_event(&results));

        // Stage 3: accumulation and metrics
        let energy = self.accumulate(&results, resolved.total_capacity);
        let analyzer = PerformanceAnalyzer::new(&self.config);
        let directional = PerformanceAnalyzer::directional_table(&results);
        let turbines = PerformanceAnalyzer::turbine_breakdown(&positions, &results);
        let summary = analyzer.summarize(&energy, &turbines, resolved.options.analysis_years);
        info!(
            "Net AEP {:.0}, capacity factor {:.1}, average wake loss {:.2}",
            summary.annual_energy, summary.capacity_factor, summary.average_wake_loss
        );
        trace.push(performance_event(&summary));

        // Stage 4: recommendations
        let advisor = OptimizationAdvisor::new(&self.config.advisor);
        let recommendations = advisor.recommend(&AdvisorContext {
            average_wake_loss: energy.average_wake_loss,
            capacity_factor: energy.capacity_factor,
            directional: &directional,
            min_spacing: spacing.map(|s| s.min_spacing),
            rotor_diameter: spec.rotor_diameter,
            turbine_count: points.len(),
        });
        trace.push(optimization_event(&recommendations));

        let artifact = SimulationArtifact {
            summary,
            directional,
            turbines,
            recommendations,
            configuration: LayoutConfiguration {
                turbine: spec.clone(),
                turbine_count: positions.len(),
                total_capacity: resolved.total_capacity,
                min_spacing_diameters: spacing.map(|s| s.min_spacing.in_units_of(spec.rotor_diameter)),
                spacing,
                positions,
            },
            parameters: AnalysisParameters {
                wake_model: model.name().to_string(),
                wake_decay_constant: decay_constant,
                wake_speed_floor_fraction: self.config.wake_speed_floor_fraction,
                reference_capacity_factor: self.config.reference_capacity_factor,
                energy_price_per_mwh: self.config.energy_price_per_mwh,
                co2_tonnes_per_mwh: self.config.co2_tonnes_per_mwh,
                options: resolved.options,
                wind_resource: resolved.wind.clone(),
            },
            metadata: ArtifactMetadata {
                default_wind_resource: resolved.default_wind,
                frequency_sum: resolved.wind.frequency_sum(),
                conditions_analyzed: results.len(),
                warnings: resolved.warnings,
            },
        };

        SimulationOutcome::Success {
            artifact: Box::new(artifact),
            trace,
        }
    }

    /// Check the request and resolve defaults
    fn validate(&self, request: &SimulationRequest) -> Result<ResolvedRequest<'_>, ValidationError> {
        let layout = &request.layout;
        if layout.is_empty() {
            return Err(ValidationError::EmptyLayout);
        }

        let spec = self.registry.get(&layout.turbine_model).ok_or_else(|| {
            ValidationError::InvalidTurbineModel {
                requested: layout.turbine_model.clone(),
                valid_models: self.registry.model_names(),
            }
        })?;

        for turbine in &layout.turbines {
            if !turbine.latitude.is_finite() || turbine.latitude.abs() >= 90.0 {
                return Err(ValidationError::InvalidTurbinePosition {
                    id: turbine.id.clone(),
                    message: format!("latitude {} outside (-90, 90)", turbine.latitude),
                });
            }
            if !turbine.longitude.is_finite() {
                return Err(ValidationError::InvalidTurbinePosition {
                    id: turbine.id.clone(),
                    message: "longitude is not finite".to_string(),
                });
            }
        }

        let options = request.options.clone().unwrap_or_default();
        validate_options(&options)?;

        let mut warnings = Vec::new();

        let (wind, default_wind) = match &request.wind_resource {
            Some(wind) if !wind.is_empty() => (wind.clone(), false),
            _ => {
                warnings.push(Warning::DefaultWindResource);
                (WindResource::default_rose(), true)
            }
        };
        for (index, condition) in wind.conditions.iter().enumerate() {
            validate_condition(index, condition)?;
        }

        if !wind.is_normalized(self.config.frequency_tolerance) {
            warnings.push(Warning::FrequencySumMismatch {
                sum: wind.frequency_sum(),
            });
        }

        if options.terrain_effects {
            warnings.push(Warning::TerrainEffectsIgnored);
        }

        let computed = spec.capacity * layout.len() as f64;
        let total_capacity = match layout.total_capacity {
            Some(declared) if *declared > 0.0 => {
                let deviation = (*declared - *computed).abs() / *computed;
                if deviation > self.config.capacity_tolerance {
                    warnings.push(Warning::CapacityMismatch { declared, computed });
                }
                declared
            }
            _ => computed,
        };

        for warning in &warnings {
            warn!("{warning}");
        }

        Ok(ResolvedRequest {
            spec,
            options,
            wind,
            total_capacity,
            warnings,
            default_wind,
        })
    }

    /// Wake analysis for every condition, in input order
    fn analyze_all(
        &self,
        model: &dyn WakeModel,
        spec: &TurbineSpec,
        points: &[Vec2],
        conditions: &[WindCondition],
    ) -> Vec<WakeAnalysisResult> {
        let floor = self.config.wake_speed_floor_fraction;
        let analyze = |condition: &WindCondition| {
            let result = analyze_condition(model, spec, points, condition, floor);
            debug!(
                "Wind {:.0} at {:.1}: gross {:.3}, net {:.3}, loss {:.2}, {} pairs",
                result.direction,
                result.wind_speed,
                result.gross_power,
                result.net_power,
                result.wake_loss,
                result.interacting_pairs
            );
            result
        };

        #[cfg(feature = "parallel")]
        {
            if self.config.use_parallel(points.len() * conditions.len()) {
                debug!("Analysing {} wind conditions in parallel", conditions.len());
                // Collect preserves input order, so the reduction below is
                // identical to the serial path.
                return conditions.par_iter().map(analyze).collect();
            }
        }

        conditions.iter().map(analyze).collect()
    }

    /// AEP and derived ratios from per-condition results
    fn accumulate(&self, results: &[WakeAnalysisResult], total_capacity: Megawatts) -> EnergyYield {
        let mut net_aep = MegawattHours::ZERO;
        let mut weighted_loss = 0.0;
        let mut total_frequency = 0.0;

        for result in results {
            let hours = result.frequency.to_fraction() * HOURS_PER_YEAR;
            net_aep += result.net_power.over_hours(hours);
            weighted_loss += *result.wake_loss * *result.frequency;
            total_frequency += *result.frequency;
        }

        let average_wake_loss = if total_frequency > 0.0 {
            Percent::new(weighted_loss / total_frequency)
        } else {
            Percent::ZERO
        };

        let capacity_hours = total_capacity.over_hours(HOURS_PER_YEAR);
        let reference_gross_aep = capacity_hours * self.config.reference_capacity_factor;

        EnergyYield {
            net_aep,
            reference_gross_aep,
            capacity_factor: Percent::ratio(*net_aep, *capacity_hours),
            wake_efficiency: Percent::ratio(*net_aep, *reference_gross_aep),
            average_wake_loss,
        }
    }
}

fn validate_options(options: &AnalysisOptions) -> Result<(), ValidationError> {
    let invalid = |option: &str, message: String| ValidationError::InvalidAnalysisOption {
        option: option.to_string(),
        message,
    };

    let turbulence = options.ambient_turbulence;
    if !(turbulence.is_finite() && turbulence > 0.0 && turbulence < 0.5) {
        return Err(invalid(
            "ambient_turbulence",
            format!("must lie in (0, 0.5), got {turbulence}"),
        ));
    }
    if !(options.air_density.is_finite() && options.air_density > 0.0) {
        return Err(invalid(
            "air_density",
            format!("must be positive, got {}", options.air_density),
        ));
    }
    if options.analysis_years == 0 {
        return Err(invalid("analysis_years", "must be at least 1".to_string()));
    }
    Ok(())
}

fn validate_condition(index: usize, condition: &WindCondition) -> Result<(), ValidationError> {
    let invalid = |message: String| ValidationError::InvalidWindCondition { index, message };

    if !condition.direction.is_finite() {
        return Err(invalid("direction is not finite".to_string()));
    }
    if !condition.speed.is_finite() || *condition.speed < 0.0 {
        return Err(invalid(format!("speed must be >= 0, got {}", condition.speed)));
    }
    if !condition.frequency.is_finite() || *condition.frequency < 0.0 {
        return Err(invalid(format!(
            "frequency must be >= 0, got {}",
            condition.frequency
        )));
    }
    Ok(())
}

// ====== Trace events ======

fn setup_event(
    resolved: &ResolvedRequest<'_>,
    turbine_count: usize,
    model_name: &str,
    decay_constant: Option<f64>,
) -> TraceEvent {
    let spec = resolved.spec;
    let mut content = format!(
        "{turbine_count} x {} ({:.1}, {:.0} rotor, {:.0} hub), installed capacity {:.1}.\n\
         {} wind conditions, {} wake model",
        spec.name,
        spec.capacity,
        spec.rotor_diameter,
        spec.hub_height,
        resolved.total_capacity,
        resolved.wind.len(),
        model_name,
    );
    if let Some(k) = decay_constant {
        let _ = write!(
            content,
            " (ambient turbulence {:.3}, decay constant k = {k:.4})",
            resolved.options.ambient_turbulence
        );
    }
    content.push('.');
    if let Some((_, prevailing)) = resolved.wind.most_frequent() {
        let _ = write!(
            content,
            "\nPrevailing wind: {} ({:.0}, {:.1} m/s, {:.1} of the year).",
            prevailing.cardinal(),
            prevailing.direction,
            *prevailing.speed,
            prevailing.frequency
        );
    }
    for warning in &resolved.warnings {
        let _ = write!(content, "\nNote: {warning}.");
    }
    TraceEvent::new("Simulation Setup", content, TraceCategory::Setup)
}

fn wake_event(results: &[WakeAnalysisResult]) -> TraceEvent {
    let mut content = String::new();
    for r in results {
        let _ = writeln!(
            content,
            "{:>2} ({:.0}) {:.1}, {:.1} of year: gross {:.2}, net {:.2}, loss {:.2}, {} interacting pairs",
            r.cardinal,
            r.direction,
            r.wind_speed,
            r.frequency,
            r.gross_power,
            r.net_power,
            r.wake_loss,
            r.interacting_pairs
        );
    }
    TraceEvent::new("Wake Analysis", content, TraceCategory::WakeAnalysis)
}

fn performance_event(summary: &PerformanceSummary) -> TraceEvent {
    let mut content = format!(
        "Annual energy production: {:.0}\n\
         Capacity factor: {:.1}\n\
         Wake efficiency: {:.1} (against {:.0} reference)\n\
         Average wake loss: {:.2}\n\
         Estimated revenue: ${:.0}/year\n\
         CO2 offset: {:.0} t/year\n\
         Over {} years: {:.0}, ${:.0}, {:.0} t CO2",
        summary.annual_energy,
        summary.capacity_factor,
        summary.wake_efficiency,
        summary.reference_gross_energy,
        summary.average_wake_loss,
        summary.annual_revenue,
        summary.annual_co2_offset,
        summary.analysis_years,
        summary.lifetime_energy,
        summary.lifetime_revenue,
        summary.lifetime_co2_offset,
    );
    if let Some(id) = &summary.most_affected_turbine {
        let _ = write!(content, "\nMost wake-affected turbine: {id}");
    }
    TraceEvent::new("Performance Calculation", content, TraceCategory::Performance)
}

fn optimization_event(recommendations: &[Recommendation]) -> TraceEvent {
    let content = if recommendations.is_empty() {
        "No layout changes recommended.".to_string()
    } else {
        recommendations
            .iter()
            .map(|r| {
                format!(
                    "[{}] {}: {} (potential improvement up to {:.1})",
                    r.priority, r.category, r.description, r.potential_improvement
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    TraceEvent::new("Optimization Analysis", content, TraceCategory::Optimization)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParallelMode;
    use crate::core_types::layout::LayoutSpec;
    use approx::assert_relative_eq;

    fn engine() -> SimulationEngine {
        SimulationEngine::new(TurbineRegistry::standard())
    }

    fn grid_layout(rows: usize, cols: usize, spacing_m: f64) -> LayoutSpec {
        let deg = spacing_m / 111_320.0;
        let turbines = (0..rows * cols)
            .map(|i| {
                TurbinePosition::new(
                    format!("T{}", i + 1),
                    (i / cols) as f64 * deg,
                    (i % cols) as f64 * deg,
                )
            })
            .collect();
        LayoutSpec::new(turbines, "GE 2.5-120")
    }

    #[test]
    fn test_empty_layout_rejected() {
        let outcome = engine().run(&SimulationRequest::new(LayoutSpec::new(vec![], "GE 2.5-120")));
        assert_eq!(outcome.error(), Some(&ValidationError::EmptyLayout));
        assert_eq!(outcome.trace().len(), 1);
        assert_eq!(outcome.trace()[0].category, TraceCategory::Validation);
    }

    #[test]
    fn test_unknown_model_lists_valid_models() {
        let mut layout = grid_layout(1, 2, 500.0);
        layout.turbine_model = "Acme 9000".to_string();
        let err = engine().run(&SimulationRequest::new(layout)).into_result().unwrap_err();
        match err {
            ValidationError::InvalidTurbineModel {
                requested,
                valid_models,
            } => {
                assert_eq!(requested, "Acme 9000");
                assert_eq!(valid_models, TurbineRegistry::standard().model_names());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_invalid_turbulence_rejected() {
        let request = SimulationRequest::new(grid_layout(1, 2, 500.0)).with_options(AnalysisOptions {
            ambient_turbulence: 0.5,
            ..AnalysisOptions::default()
        });
        assert!(matches!(
            engine().run(&request).error(),
            Some(ValidationError::InvalidAnalysisOption { option, .. }) if option == "ambient_turbulence"
        ));
    }

    #[test]
    fn test_negative_frequency_rejected() {
        let request = SimulationRequest::new(grid_layout(1, 2, 500.0)).with_wind_resource(
            WindResource::new(vec![
                WindCondition::new(0.0, 8.0, 50.0),
                WindCondition::new(90.0, 8.0, -5.0),
            ]),
        );
        assert!(matches!(
            engine().run(&request).error(),
            Some(ValidationError::InvalidWindCondition { index: 1, .. })
        ));
    }

    #[test]
    fn test_bad_latitude_rejected() {
        let mut layout = grid_layout(1, 2, 500.0);
        layout.turbines[1].latitude = f64::NAN;
        assert!(matches!(
            engine().run(&SimulationRequest::new(layout)).error(),
            Some(ValidationError::InvalidTurbinePosition { id, .. }) if id == "T2"
        ));
    }

    #[test]
    fn test_default_wind_flagged() {
        let artifact = engine()
            .run(&SimulationRequest::new(grid_layout(2, 2, 700.0)))
            .into_result()
            .unwrap();
        assert!(artifact.metadata.default_wind_resource);
        assert_eq!(artifact.metadata.warnings, vec![Warning::DefaultWindResource]);
        assert_eq!(artifact.metadata.conditions_analyzed, 8);
        assert_eq!(artifact.parameters.wind_resource, WindResource::default_rose());
    }

    #[test]
    fn test_empty_wind_resource_treated_as_missing() {
        let request =
            SimulationRequest::new(grid_layout(1, 2, 700.0)).with_wind_resource(WindResource::new(vec![]));
        let artifact = engine().run(&request).into_result().unwrap();
        assert!(artifact.metadata.default_wind_resource);
    }

    #[test]
    fn test_unnormalized_frequencies_flagged_not_rejected() {
        let request = SimulationRequest::new(grid_layout(1, 2, 700.0)).with_wind_resource(
            WindResource::new(vec![
                WindCondition::new(270.0, 9.0, 40.0),
                WindCondition::new(90.0, 9.0, 40.0),
            ]),
        );
        let artifact = engine().run(&request).into_result().unwrap();
        assert!(artifact
            .metadata
            .warnings
            .contains(&Warning::FrequencySumMismatch { sum: Percent::new(80.0) }));
    }

    #[test]
    fn test_terrain_and_capacity_warnings() {
        let layout = grid_layout(1, 2, 700.0).with_total_capacity(Megawatts::new(6.0));
        let request = SimulationRequest::new(layout).with_options(AnalysisOptions {
            terrain_effects: true,
            ..AnalysisOptions::default()
        });
        let artifact = engine().run(&request).into_result().unwrap();
        assert!(artifact.metadata.warnings.contains(&Warning::TerrainEffectsIgnored));
        assert!(artifact.metadata.warnings.contains(&Warning::CapacityMismatch {
            declared: Megawatts::new(6.0),
            computed: Megawatts::new(5.0),
        }));
        assert_eq!(artifact.configuration.total_capacity, Megawatts::new(6.0));
    }

    #[test]
    fn test_aep_accumulation() {
        // Single turbine, one sector at 10 m/s for the whole year: 2.0 MW x 8760 h
        let request = SimulationRequest::new(grid_layout(1, 1, 0.0))
            .with_wind_resource(WindResource::new(vec![WindCondition::new(0.0, 10.0, 100.0)]));
        let artifact = engine().run(&request).into_result().unwrap();
        let summary = &artifact.summary;
        assert_relative_eq!(*summary.annual_energy, 2.0 * 8760.0, epsilon = 1e-6);
        assert_relative_eq!(*summary.capacity_factor, 80.0, epsilon = 1e-9);
        assert_relative_eq!(*summary.reference_gross_energy, 2.5 * 8760.0 * 0.35, epsilon = 1e-6);
        assert_relative_eq!(*summary.wake_efficiency, 80.0 / 0.35, epsilon = 1e-9);
        assert_eq!(*summary.average_wake_loss, 0.0);
        assert!(artifact.configuration.spacing.is_none());
    }

    #[test]
    fn test_trace_stages_in_order() {
        let outcome = engine().run(&SimulationRequest::new(grid_layout(2, 2, 700.0)));
        let titles: Vec<&str> = outcome.trace().iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Simulation Setup",
                "Wake Analysis",
                "Performance Calculation",
                "Optimization Analysis"
            ]
        );
        assert!(outcome.trace()[0].content.contains("default 8-sector"));
    }

    #[test]
    fn test_parallel_matches_serial() {
        let request = SimulationRequest::new(grid_layout(4, 5, 400.0));
        let serial = SimulationEngine::with_config(
            TurbineRegistry::standard(),
            EngineConfig {
                parallel: ParallelMode::Never,
                ..EngineConfig::default()
            },
        )
        .unwrap()
        .run(&request);
        let parallel = SimulationEngine::with_config(
            TurbineRegistry::standard(),
            EngineConfig {
                parallel: ParallelMode::Always,
                ..EngineConfig::default()
            },
        )
        .unwrap()
        .run(&request);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let err = SimulationEngine::with_config(
            TurbineRegistry::standard(),
            EngineConfig {
                wake_speed_floor_fraction: 1.5,
                ..EngineConfig::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::FractionOutOfRange { .. }));

        let err = SimulationEngine::with_config(
            TurbineRegistry::standard(),
            EngineConfig {
                reference_capacity_factor: 0.0,
                ..EngineConfig::default()
            },
        )
        .unwrap_err();
        assert!(err.to_string().contains("reference_capacity_factor"));
    }

    #[test]
    fn test_no_wake_variant_has_zero_loss() {
        let request = SimulationRequest::new(grid_layout(1, 5, 200.0)).with_options(AnalysisOptions {
            wake_model: WakeModelVariant::NoWake,
            ..AnalysisOptions::default()
        });
        let artifact = engine().run(&request).into_result().unwrap();
        assert_eq!(*artifact.summary.average_wake_loss, 0.0);
        assert!(artifact.parameters.wake_decay_constant.is_none());
        assert_eq!(artifact.parameters.wake_model, "No wake");
    }
}
