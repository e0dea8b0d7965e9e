// Chart instance registry - Charts are created by the page, looked up by the feed
use crate::domain::chart::{ChartData, RedrawMode};
use crate::domain::section::Section;
use std::collections::HashMap;

/// Rendering handle for one dashboard chart
pub trait ChartHandle: Send + Sync {
    /// Replace the whole dataset of the chart
    fn replace_data(&mut self, data: ChartData);

    fn redraw(&mut self, mode: RedrawMode);
}

#[derive(Default)]
pub struct ChartRegistry {
    charts: HashMap<Section, Box<dyn ChartHandle>>,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the chart drawn for `section`, replacing any earlier one
    pub fn with_chart(mut self, section: Section, chart: Box<dyn ChartHandle>) -> Self {
        self.charts.insert(section, chart);
        self
    }

    pub fn get_mut(&mut self, section: Section) -> Option<&mut (dyn ChartHandle + 'static)> {
        self.charts.get_mut(&section).map(|c| c.as_mut())
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }
}
