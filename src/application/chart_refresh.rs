// Chart refresh - Applies a feed payload to the registered charts
use crate::application::chart_registry::ChartRegistry;
use crate::domain::chart::{palette, ChartData, Dataset, RedrawMode};
use crate::domain::payload::{ComparisonSection, SeriesSection, UpdatePayload};
use crate::domain::section::Section;

const CATEGORY_COLORS: [&str; 7] = [
    palette::PRIMARY,
    palette::SECONDARY,
    palette::SUCCESS,
    palette::WARNING,
    palette::INFO,
    palette::PURPLE,
    palette::TEAL,
];

const ORDER_STATUS_COLORS: [&str; 5] = [
    palette::WARNING,
    palette::PRIMARY,
    palette::INFO,
    palette::SUCCESS,
    palette::SECONDARY,
];

const PRODUCT_COLORS: [&str; 5] = [
    palette::PRIMARY,
    palette::SUCCESS,
    palette::INFO,
    palette::PURPLE,
    palette::WARNING,
];

/// Replace the dataset of every chart whose section is in `payload`, then
/// redraw it without animation.
///
/// Sections missing from the payload and sections without a registered
/// chart are left alone.
pub fn refresh(registry: &mut ChartRegistry, payload: &UpdatePayload) {
    for section in Section::ALL {
        if !payload.contains(section) {
            continue;
        }
        let Some(chart) = registry.get_mut(section) else {
            tracing::debug!("No chart registered for {}, skipping", section);
            continue;
        };
        let Some(data) = build_chart_data(section, payload) else {
            continue;
        };

        chart.replace_data(data);
        chart.redraw(RedrawMode::Immediate);
        tracing::debug!("Refreshed {}", section.chart_id());
    }
}

fn build_chart_data(section: Section, payload: &UpdatePayload) -> Option<ChartData> {
    match section {
        Section::CustomerComparison => payload.customer.as_ref().map(comparison_chart),
        _ => payload.series(section).map(|s| series_chart(section, s)),
    }
}

fn series_chart(section: Section, series: &SeriesSection) -> ChartData {
    let points = series.labels.len();
    let values = series.values.clone();

    let dataset = match section {
        Section::Sales => Dataset::new(Some("Sales".to_string()), values)
            .with_border(palette::PRIMARY)
            .with_background(palette::PRIMARY_TRANSPARENT)
            .filled(),
        Section::Category => {
            Dataset::new(None, values).with_point_colors(&CATEGORY_COLORS, points)
        }
        Section::OrderStatus => {
            Dataset::new(None, values).with_point_colors(&ORDER_STATUS_COLORS, points)
        }
        Section::Product => Dataset::new(Some("Sales".to_string()), values)
            .with_point_colors(&PRODUCT_COLORS, points),
        Section::Revenue => Dataset::new(Some("Revenue".to_string()), values)
            .with_border(palette::SUCCESS)
            .with_background(palette::SUCCESS_TRANSPARENT)
            .filled(),
        Section::CustomerComparison => Dataset::new(None, values),
    };

    ChartData::new(series.labels.clone(), vec![dataset])
}

fn comparison_chart(section: &ComparisonSection) -> ChartData {
    let first = section.first();
    let second = section.second();

    ChartData::new(
        section.labels.clone(),
        vec![
            Dataset::new(Some(first.label.clone()), first.values.clone())
                .with_border(palette::PRIMARY)
                .with_background(palette::PRIMARY_TRANSPARENT),
            Dataset::new(Some(second.label.clone()), second.values.clone())
                .with_border(palette::SECONDARY)
                .with_background(palette::SECONDARY_TRANSPARENT),
        ],
    )
}
