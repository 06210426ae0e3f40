//! Pipeline trace events and their text presentation
//!
//! Each pipeline stage appends one [`TraceEvent`] describing what it did.
//! The events are plain data; turning them into text is the job of a
//! [`TraceRenderer`], so the numerical core never formats for display.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Pipeline stage that produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceCategory {
    /// Request validation and setup
    Setup,
    /// Per-direction wake analysis
    WakeAnalysis,
    /// Energy and financial metrics
    Performance,
    /// Layout recommendations
    Optimization,
    /// Request rejected
    Validation,
}

impl fmt::Display for TraceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TraceCategory::Setup => "setup",
            TraceCategory::WakeAnalysis => "wake-analysis",
            TraceCategory::Performance => "performance",
            TraceCategory::Optimization => "optimization",
            TraceCategory::Validation => "validation",
        };
        f.write_str(label)
    }
}

/// One stage record: `{title, content, category}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub title: String,
    pub content: String,
    pub category: TraceCategory,
}

impl TraceEvent {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: TraceCategory,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category,
        }
    }
}

/// Renders a trace for presentation
pub trait TraceRenderer {
    fn render(&self, events: &[TraceEvent]) -> String;
}

/// Title, underline, content, blank line
#[derive(Debug, Clone, Copy)]
pub struct PlainTextRenderer {
    /// Character used to underline titles
    pub underline: char,
    /// Prefix titles with the category tag
    pub show_category: bool,
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self {
            underline: '=',
            show_category: false,
        }
    }
}

impl TraceRenderer for PlainTextRenderer {
    fn render(&self, events: &[TraceEvent]) -> String {
        let mut out = String::new();
        for event in events {
            let heading = if self.show_category {
                format!("[{}] {}", event.category, event.title)
            } else {
                event.title.clone()
            };
            let rule = self.underline.to_string().repeat(heading.chars().count());
            // Writing to a String cannot fail
            let _ = writeln!(out, "{heading}\n{rule}\n{}\n", event.content.trim_end());
        }
        out
    }
}
