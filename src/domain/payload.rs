// Feed payload domain models
use crate::domain::section::Section;
use crate::error::PayloadError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Client request that asks the server for an immediate snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRequest {
    #[serde(default)]
    pub message: String,
}

impl DataRequest {
    pub const GET_DATA: &'static str = "get_data";

    pub fn get_data() -> Self {
        Self {
            message: Self::GET_DATA.to_string(),
        }
    }

    pub fn is_get_data(&self) -> bool {
        self.message == Self::GET_DATA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedValues {
    pub label: String,
    pub values: Vec<f64>,
}

impl NamedValues {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// `{labels, values}` section shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSection {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    // Extra breakdowns some sections carry; the dashboard charts only read `values`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<NamedValues>,
}

impl SeriesSection {
    pub fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        Self {
            labels,
            values,
            datasets: Vec::new(),
        }
    }
}

/// `{labels, datasets: [a, b]}` section shape used by the comparison chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSection {
    pub labels: Vec<String>,
    pub datasets: Vec<NamedValues>,
}

impl ComparisonSection {
    pub fn new(labels: Vec<String>, first: NamedValues, second: NamedValues) -> Self {
        Self {
            labels,
            datasets: vec![first, second],
        }
    }

    pub fn first(&self) -> &NamedValues {
        &self.datasets[0]
    }

    pub fn second(&self) -> &NamedValues {
        &self.datasets[1]
    }
}

/// One decoded feed message.
///
/// Every section is optional: a message may carry any subset of the six
/// dashboard sections. Unknown top-level keys are ignored on decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdatePayload {
    #[serde(rename = "sales_data", skip_serializing_if = "Option::is_none")]
    pub sales: Option<SeriesSection>,
    #[serde(rename = "category_data", skip_serializing_if = "Option::is_none")]
    pub category: Option<SeriesSection>,
    #[serde(rename = "order_status_data", skip_serializing_if = "Option::is_none")]
    pub order_status: Option<SeriesSection>,
    #[serde(rename = "product_data", skip_serializing_if = "Option::is_none")]
    pub product: Option<SeriesSection>,
    #[serde(rename = "customer_data", skip_serializing_if = "Option::is_none")]
    pub customer: Option<ComparisonSection>,
    #[serde(rename = "revenue_data", skip_serializing_if = "Option::is_none")]
    pub revenue: Option<SeriesSection>,
}

impl UpdatePayload {
    /// Decode a feed message.
    ///
    /// Fails only when the text is not a JSON object. A section whose value
    /// does not have the expected shape is dropped on its own, the rest of
    /// the message is kept.
    pub fn decode(text: &str) -> Result<Self, PayloadError> {
        let document: Value = serde_json::from_str(text)?;
        let Value::Object(mut fields) = document else {
            return Err(PayloadError::NotAnObject);
        };

        let customer = take_section::<ComparisonSection>(&mut fields, Section::CustomerComparison)
            .filter(|c| {
                let complete = c.datasets.len() >= 2;
                if !complete {
                    tracing::debug!(
                        "Skipping {}: expected 2 datasets, got {}",
                        Section::CustomerComparison,
                        c.datasets.len()
                    );
                }
                complete
            });

        let payload = Self {
            sales: take_section(&mut fields, Section::Sales),
            category: take_section(&mut fields, Section::Category),
            order_status: take_section(&mut fields, Section::OrderStatus),
            product: take_section(&mut fields, Section::Product),
            customer,
            revenue: take_section(&mut fields, Section::Revenue),
        };

        for key in fields.keys() {
            tracing::debug!("Ignoring unknown payload key {}", key);
        }

        Ok(payload)
    }

    pub fn contains(&self, section: Section) -> bool {
        match section {
            Section::Sales => self.sales.is_some(),
            Section::Category => self.category.is_some(),
            Section::OrderStatus => self.order_status.is_some(),
            Section::Product => self.product.is_some(),
            Section::CustomerComparison => self.customer.is_some(),
            Section::Revenue => self.revenue.is_some(),
        }
    }

    /// The `{labels, values}` section for `section`, if it is one and is present
    pub fn series(&self, section: Section) -> Option<&SeriesSection> {
        match section {
            Section::Sales => self.sales.as_ref(),
            Section::Category => self.category.as_ref(),
            Section::OrderStatus => self.order_status.as_ref(),
            Section::Product => self.product.as_ref(),
            Section::Revenue => self.revenue.as_ref(),
            Section::CustomerComparison => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        !Section::ALL.into_iter().any(|s| self.contains(s))
    }
}

fn take_section<T: DeserializeOwned>(fields: &mut Map<String, Value>, section: Section) -> Option<T> {
    let raw = fields.remove(section.payload_key())?;
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("Skipping malformed section {}: {}", section, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_single_section() {
        let payload =
            UpdatePayload::decode(r#"{"sales_data": {"labels": ["Mon","Tue"], "values": [10, 20]}}"#)
                .unwrap();

        let sales = payload.sales.as_ref().unwrap();
        assert_eq!(sales.labels, vec!["Mon", "Tue"]);
        assert_eq!(sales.values, vec![10.0, 20.0]);
        assert!(payload.category.is_none());
        assert!(payload.customer.is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let payload = UpdatePayload::decode(
            r#"{"inventory_data": {"labels": ["x"], "values": [1]}, "revenue_data": {"labels": ["Mon"], "values": [1200.5]}}"#,
        )
        .unwrap();

        assert!(payload.revenue.is_some());
        assert_eq!(
            Section::ALL.into_iter().filter(|s| payload.contains(*s)).count(),
            1
        );
    }

    #[test]
    fn test_decode_rejects_malformed_json() {
        assert!(matches!(
            UpdatePayload::decode("{not json"),
            Err(PayloadError::Json(_))
        ));
        assert!(matches!(
            UpdatePayload::decode("[1, 2]"),
            Err(PayloadError::NotAnObject)
        ));
    }

    #[test]
    fn test_malformed_section_is_dropped_alone() {
        let payload = UpdatePayload::decode(
            r#"{"sales_data": {"labels": ["Mon"]}, "product_data": {"labels": ["Books"], "values": [5]}, "order_status_data": null}"#,
        )
        .unwrap();

        assert!(payload.sales.is_none());
        assert!(payload.order_status.is_none());
        assert_eq!(payload.product.unwrap().values, vec![5.0]);
    }

    #[test]
    fn test_comparison_needs_two_datasets() {
        let payload = UpdatePayload::decode(
            r#"{"customer_data": {"labels": ["Jan"], "datasets": [{"label": "New Customers", "values": [120]}]}}"#,
        )
        .unwrap();
        assert!(payload.is_empty());

        let payload = UpdatePayload::decode(
            r#"{"customer_data": {"labels": ["Jan"], "datasets": [
                {"label": "New Customers", "values": [120]},
                {"label": "Returning Customers", "values": [80]}
            ]}}"#,
        )
        .unwrap();
        let customer = payload.customer.unwrap();
        assert_eq!(customer.first().label, "New Customers");
        assert_eq!(customer.second().values, vec![80.0]);
    }

    #[test]
    fn test_category_breakdown_is_optional() {
        let payload = UpdatePayload::decode(
            r#"{"category_data": {"labels": ["Books"], "values": [30], "datasets": [{"label": "Views", "values": [40]}]}}"#,
        )
        .unwrap();
        let category = payload.category.unwrap();
        assert_eq!(category.values, vec![30.0]);
        assert_eq!(category.datasets.len(), 1);
    }

    #[test]
    fn test_serialized_payload_uses_feed_keys() {
        let payload = UpdatePayload {
            sales: Some(SeriesSection::new(vec!["Jan".into()], vec![5400.0])),
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"sales_data": {"labels": ["Jan"], "values": [5400.0]}})
        );
    }

    #[test]
    fn test_data_request_wire_shape() {
        let text = serde_json::to_string(&DataRequest::get_data()).unwrap();
        assert_eq!(text, r#"{"message":"get_data"}"#);

        let request: DataRequest = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert!(!request.is_get_data());
    }
}
