//! Rule-based layout recommendations
//!
//! Each rule is independent. Recommendations appear in rule order and only
//! when their trigger holds. Improvement estimates are heuristics capped at
//! [`AdvisorThresholds::improvement_cap`].

use crate::config::AdvisorThresholds;
use crate::core_types::units::{Meters, Percent};
use crate::simulation::analysis::DirectionalPerformance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Urgency of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        })
    }
}

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationCategory {
    LayoutOptimization,
    WindAlignment,
    SpacingOptimization,
    SiteAssessment,
    TechnologyUpgrade,
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RecommendationCategory::LayoutOptimization => "Layout Optimization",
            RecommendationCategory::WindAlignment => "Wind Alignment",
            RecommendationCategory::SpacingOptimization => "Spacing Optimization",
            RecommendationCategory::SiteAssessment => "Site Assessment",
            RecommendationCategory::TechnologyUpgrade => "Technology Upgrade",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub priority: Priority,
    pub description: String,
    /// Heuristic, capped estimate of the achievable energy gain
    pub potential_improvement: Percent,
}

/// Measured facts the rules look at
#[derive(Debug, Clone, Copy)]
pub struct AdvisorContext<'a> {
    pub average_wake_loss: Percent,
    pub capacity_factor: Percent,
    pub directional: &'a [DirectionalPerformance],
    /// Smallest pairwise spacing, `None` for single-turbine layouts
    pub min_spacing: Option<Meters>,
    pub rotor_diameter: Meters,
    pub turbine_count: usize,
}

/// Stateless rule evaluator
#[derive(Debug, Clone, Copy)]
pub struct OptimizationAdvisor<'a> {
    thresholds: &'a AdvisorThresholds,
}

impl<'a> OptimizationAdvisor<'a> {
    pub fn new(thresholds: &'a AdvisorThresholds) -> Self {
        Self { thresholds }
    }

    /// Evaluate every rule in order
    pub fn recommend(&self, ctx: &AdvisorContext<'_>) -> Vec<Recommendation> {
        [
            self.layout_rule(ctx),
            self.alignment_rule(ctx),
            self.spacing_rule(ctx),
            self.site_rule(ctx),
            self.technology_rule(ctx),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn capped(&self, estimate: f64) -> Percent {
        Percent::new(estimate.clamp(0.0, *self.thresholds.improvement_cap))
    }

    fn layout_rule(&self, ctx: &AdvisorContext<'_>) -> Option<Recommendation> {
        let t = self.thresholds;
        if ctx.average_wake_loss <= t.high_wake_loss {
            return None;
        }
        let (low, high) = t.target_wake_loss;
        Some(Recommendation {
            category: RecommendationCategory::LayoutOptimization,
            priority: Priority::High,
            description: format!(
                "Average wake loss of {:.1} exceeds {:.0}. Reconfigure the layout to reduce \
                 spacing-induced losses toward the {:.0}-{:.0} industry target.",
                ctx.average_wake_loss, t.high_wake_loss, *low, high
            ),
            potential_improvement: self.capped((*ctx.average_wake_loss - *high) * 0.75),
        })
    }

    fn alignment_rule(&self, ctx: &AdvisorContext<'_>) -> Option<Recommendation> {
        let prevailing = ctx.directional.iter().fold(None, |best: Option<&DirectionalPerformance>, row| {
            match best {
                Some(b) if b.frequency >= row.frequency => Some(b),
                _ => Some(row),
            }
        })?;

        let trigger = *ctx.average_wake_loss * self.thresholds.alignment_ratio;
        if *prevailing.wake_loss <= trigger {
            return None;
        }
        Some(Recommendation {
            category: RecommendationCategory::WindAlignment,
            priority: Priority::Medium,
            description: format!(
                "Prevailing {} wind ({:.0}, {:.1} of the year) loses {:.1} to wakes versus a \
                 {:.1} average. Rotate the layout orientation to open rows to the prevailing wind.",
                prevailing.cardinal,
                prevailing.direction,
                prevailing.frequency,
                prevailing.wake_loss,
                ctx.average_wake_loss
            ),
            potential_improvement: self
                .capped((*prevailing.wake_loss - *ctx.average_wake_loss) * prevailing.frequency.to_fraction() * 2.0),
        })
    }

    fn spacing_rule(&self, ctx: &AdvisorContext<'_>) -> Option<Recommendation> {
        let t = self.thresholds;
        let min_spacing = ctx.min_spacing?;
        let diameters = min_spacing.in_units_of(ctx.rotor_diameter);
        if diameters >= t.min_spacing_diameters {
            return None;
        }
        let (low, high) = t.target_spacing_diameters;
        Some(Recommendation {
            category: RecommendationCategory::SpacingOptimization,
            priority: Priority::High,
            description: format!(
                "Minimum turbine spacing is {:.0} ({:.1}D), below the {:.0}D minimum. \
                 Increase spacing to {:.0}-{:.0}D in the prevailing wind direction.",
                min_spacing, diameters, t.min_spacing_diameters, low, high
            ),
            potential_improvement: self
                .capped((t.min_spacing_diameters - diameters) / t.min_spacing_diameters * 15.0),
        })
    }

    fn site_rule(&self, ctx: &AdvisorContext<'_>) -> Option<Recommendation> {
        let t = self.thresholds;
        if ctx.capacity_factor >= t.low_capacity_factor {
            return None;
        }
        Some(Recommendation {
            category: RecommendationCategory::SiteAssessment,
            priority: Priority::Medium,
            description: format!(
                "Capacity factor of {:.1} is below {:.0}. Validate the wind resource with \
                 on-site measurements and consider higher hub heights.",
                ctx.capacity_factor, t.low_capacity_factor
            ),
            potential_improvement: self.capped((*t.low_capacity_factor - *ctx.capacity_factor) * 0.5),
        })
    }

    fn technology_rule(&self, ctx: &AdvisorContext<'_>) -> Option<Recommendation> {
        let t = self.thresholds;
        if ctx.rotor_diameter >= t.small_rotor || ctx.turbine_count <= t.large_farm_turbines {
            return None;
        }
        Some(Recommendation {
            category: RecommendationCategory::TechnologyUpgrade,
            priority: Priority::Low,
            description: format!(
                "{} turbines with a {:.0} rotor. Larger-rotor models (>= {:.0}) would capture \
                 more energy at the same positions.",
                ctx.turbine_count, ctx.rotor_diameter, t.small_rotor
            ),
            potential_improvement: self
                .capped((*t.small_rotor - *ctx.rotor_diameter) / *t.small_rotor * 30.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::units::{Degrees, Megawatts, MetersPerSecond};
    use crate::core_types::wind::CardinalDirection;

    fn row(direction: f64, frequency: f64, wake_loss: f64) -> DirectionalPerformance {
        DirectionalPerformance {
            direction: Degrees::new(direction),
            cardinal: CardinalDirection::from_degrees(Degrees::new(direction)),
            frequency: Percent::new(frequency),
            wind_speed: MetersPerSecond::new(8.0),
            gross_power: Megawatts::new(10.0),
            net_power: Megawatts::new(10.0 * (1.0 - wake_loss / 100.0)),
            wake_loss: Percent::new(wake_loss),
            efficiency: Percent::new(100.0 - wake_loss),
            interacting_pairs: 0,
        }
    }

    fn healthy<'a>(directional: &'a [DirectionalPerformance]) -> AdvisorContext<'a> {
        AdvisorContext {
            average_wake_loss: Percent::new(6.0),
            capacity_factor: Percent::new(40.0),
            directional,
            min_spacing: Some(Meters::new(1000.0)),
            rotor_diameter: Meters::new(120.0),
            turbine_count: 8,
        }
    }

    fn categories(recs: &[Recommendation]) -> Vec<RecommendationCategory> {
        recs.iter().map(|r| r.category).collect()
    }

    #[test]
    fn test_healthy_farm_has_no_recommendations() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 50.0, 6.0), row(180.0, 50.0, 6.0)];
        assert!(OptimizationAdvisor::new(&thresholds)
            .recommend(&healthy(&rows))
            .is_empty());
    }

    #[test]
    fn test_high_wake_loss() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 50.0, 18.0), row(180.0, 50.0, 18.0)];
        let mut ctx = healthy(&rows);
        ctx.average_wake_loss = Percent::new(18.0);
        let recs = OptimizationAdvisor::new(&thresholds).recommend(&ctx);
        assert_eq!(categories(&recs), vec![RecommendationCategory::LayoutOptimization]);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.contains("18.0%"));
        assert!(*recs[0].potential_improvement > 0.0);
    }

    #[test]
    fn test_prevailing_direction_alignment() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 20.0, 2.0), row(225.0, 60.0, 10.0), row(90.0, 20.0, 2.0)];
        let recs = OptimizationAdvisor::new(&thresholds).recommend(&healthy(&rows));
        assert_eq!(categories(&recs), vec![RecommendationCategory::WindAlignment]);
        assert_eq!(recs[0].priority, Priority::Medium);
        assert!(recs[0].description.contains("SW"));
    }

    #[test]
    fn test_spacing_threshold() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 100.0, 6.0)];
        let mut ctx = healthy(&rows);

        ctx.min_spacing = Some(Meters::new(480.0)); // 4D
        let recs = OptimizationAdvisor::new(&thresholds).recommend(&ctx);
        assert_eq!(categories(&recs), vec![RecommendationCategory::SpacingOptimization]);
        assert_eq!(recs[0].priority, Priority::High);
        assert!(recs[0].description.contains("4.0D"));

        ctx.min_spacing = Some(Meters::new(600.0)); // exactly 5D
        assert!(OptimizationAdvisor::new(&thresholds).recommend(&ctx).is_empty());

        ctx.min_spacing = None;
        assert!(OptimizationAdvisor::new(&thresholds).recommend(&ctx).is_empty());
    }

    #[test]
    fn test_low_capacity_factor_and_small_rotor() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 100.0, 6.0)];
        let mut ctx = healthy(&rows);
        ctx.capacity_factor = Percent::new(22.0);
        ctx.rotor_diameter = Meters::new(90.0);
        ctx.min_spacing = Some(Meters::new(900.0));
        ctx.turbine_count = 12;

        let recs = OptimizationAdvisor::new(&thresholds).recommend(&ctx);
        assert_eq!(
            categories(&recs),
            vec![
                RecommendationCategory::SiteAssessment,
                RecommendationCategory::TechnologyUpgrade
            ]
        );
        assert_eq!(recs[1].priority, Priority::Low);
    }

    #[test]
    fn test_small_farm_skips_technology_upgrade() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 100.0, 6.0)];
        let mut ctx = healthy(&rows);
        ctx.rotor_diameter = Meters::new(90.0);
        ctx.min_spacing = Some(Meters::new(900.0));
        ctx.turbine_count = 10;
        assert!(OptimizationAdvisor::new(&thresholds).recommend(&ctx).is_empty());
    }

    #[test]
    fn test_improvement_is_capped() {
        let thresholds = AdvisorThresholds::default();
        let rows = [row(0.0, 100.0, 90.0)];
        let mut ctx = healthy(&rows);
        ctx.average_wake_loss = Percent::new(90.0);
        let recs = OptimizationAdvisor::new(&thresholds).recommend(&ctx);
        assert_eq!(recs[0].potential_improvement, Percent::new(25.0));
    }
}
