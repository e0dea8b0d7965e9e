// Chart handle that logs each redraw instead of painting
use crate::application::chart_registry::ChartHandle;
use crate::domain::chart::{ChartData, RedrawMode};
use crate::domain::section::Section;

#[derive(Debug, Clone)]
pub struct TracingChart {
    section: Section,
    data: ChartData,
}

impl TracingChart {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            data: ChartData::default(),
        }
    }

    /// One line per dataset: `label: v1, v2, ...`
    fn summary(&self) -> String {
        self.data
            .datasets
            .iter()
            .map(|d| {
                let values: Vec<String> = d.values.iter().map(|v| format!("{}", v)).collect();
                format!("{}: {}", d.label.as_deref().unwrap_or("-"), values.join(", "))
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl ChartHandle for TracingChart {
    fn replace_data(&mut self, data: ChartData) {
        self.data = data;
    }

    fn redraw(&mut self, mode: RedrawMode) {
        tracing::info!(
            "{} ({:?}) [{}] {}",
            self.section.chart_id(),
            mode,
            self.data.labels.join(", "),
            self.summary()
        );
    }
}
