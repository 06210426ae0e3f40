//! Physics modules for wind farm wake simulation

pub mod coordinates;
pub mod power_curve;
pub mod wake;

pub use coordinates::{project_to_local, spacing_stats, LocalFrame, SpacingStats};
pub use power_curve::{load_fraction, power_output};
pub use wake::{
    analyze_condition, wake_decay_constant, JensenWake, NoWake, TurbineWakeState,
    WakeAnalysisResult, WakeModel,
};
