// Chart dataset domain models

/// Dashboard palette
pub mod palette {
    pub const PRIMARY: &str = "#6c63ff";
    pub const PRIMARY_TRANSPARENT: &str = "rgba(108, 99, 255, 0.2)";
    pub const SECONDARY: &str = "#ff6b6b";
    pub const SECONDARY_TRANSPARENT: &str = "rgba(255, 107, 107, 0.2)";
    pub const SUCCESS: &str = "#36e2a8";
    pub const SUCCESS_TRANSPARENT: &str = "rgba(54, 226, 168, 0.2)";
    pub const INFO: &str = "#4dc9ff";
    pub const WARNING: &str = "#ffcf5c";
    pub const PURPLE: &str = "#b266ff";
    pub const TEAL: &str = "#05dfd7";
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub values: Vec<f64>,
    pub border_color: Option<String>,
    /// One entry per point for categorical charts, a single entry otherwise
    pub background_colors: Vec<String>,
    pub fill: bool,
}

impl Dataset {
    pub fn new(label: Option<String>, values: Vec<f64>) -> Self {
        Self {
            label,
            values,
            border_color: None,
            background_colors: Vec::new(),
            fill: false,
        }
    }

    pub fn with_border(mut self, color: &str) -> Self {
        self.border_color = Some(color.to_string());
        self
    }

    pub fn with_background(mut self, color: &str) -> Self {
        self.background_colors = vec![color.to_string()];
        self
    }

    /// Per-point colours, cut down to the number of points
    pub fn with_point_colors(mut self, colors: &[&str], points: usize) -> Self {
        self.background_colors = colors.iter().take(points).map(|c| c.to_string()).collect();
        self
    }

    pub fn filled(mut self) -> Self {
        self.fill = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn new(labels: Vec<String>, datasets: Vec<Dataset>) -> Self {
        Self { labels, datasets }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawMode {
    Animated,
    /// Skip transitions so back-to-back pushes do not stack animations
    Immediate,
}
