// Snapshot service - Builds the dashboard payload pushed by the feed server
use crate::domain::payload::{ComparisonSection, NamedValues, SeriesSection, UpdatePayload};
use rand::Rng;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];
const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHLY_SALES: [i64; 12] = [
    5400, 5800, 6200, 6800, 7400, 8000, 8600, 9200, 9800, 10400, 10800, 11200,
];

const PRODUCTS: [&str; 5] = ["Electronics", "Clothing", "Home", "Beauty", "Books"];
const PRODUCT_SHARE: [i64; 5] = [35, 25, 20, 15, 5];

const NEW_CUSTOMERS: [i64; 12] = [120, 150, 170, 190, 210, 250, 280, 300, 330, 350, 370, 390];
const RETURNING_CUSTOMERS: [i64; 12] = [80, 100, 120, 140, 160, 190, 210, 230, 250, 270, 290, 310];

const CATEGORIES: [&str; 6] = ["Electronics", "Clothing", "Furniture", "Beauty", "Books", "Sports"];
const CATEGORY_SALES: [i64; 6] = [70, 60, 50, 40, 30, 20];
const CATEGORY_VIEWS: [i64; 6] = [80, 70, 60, 50, 40, 30];
const CATEGORY_INVENTORY: [i64; 6] = [60, 50, 40, 30, 20, 10];

const ORDER_STATUSES: [&str; 5] = ["Pending", "Processing", "Shipped", "Delivered", "Cancelled"];
const ORDER_STATUS_SHARE: [i64; 5] = [15, 25, 30, 25, 5];

const DAILY_REVENUE: [i64; 7] = [1200, 1900, 1500, 1800, 2200, 2600, 2300];

/// Produces dashboard snapshots from fixed baselines with random jitter.
#[derive(Debug, Clone, Default)]
pub struct SnapshotService;

impl SnapshotService {
    pub fn new() -> Self {
        Self
    }

    pub fn snapshot(&self) -> UpdatePayload {
        self.snapshot_with(&mut rand::thread_rng())
    }

    pub fn snapshot_with<R: Rng + ?Sized>(&self, rng: &mut R) -> UpdatePayload {
        let sales_by_category = jitter(rng, &CATEGORY_SALES, 5);
        let mut category = SeriesSection::new(labels(&CATEGORIES), sales_by_category.clone());
        category.datasets = vec![
            NamedValues::new("Sales", sales_by_category),
            NamedValues::new("Views", jitter(rng, &CATEGORY_VIEWS, 5)),
            NamedValues::new("Inventory", jitter(rng, &CATEGORY_INVENTORY, 3)),
        ];

        UpdatePayload {
            sales: Some(SeriesSection::new(
                labels(&MONTHS),
                jitter(rng, &MONTHLY_SALES, 200),
            )),
            category: Some(category),
            order_status: Some(SeriesSection::new(
                labels(&ORDER_STATUSES),
                jitter(rng, &ORDER_STATUS_SHARE, 2),
            )),
            product: Some(SeriesSection::new(
                labels(&PRODUCTS),
                jitter(rng, &PRODUCT_SHARE, 2),
            )),
            customer: Some(ComparisonSection::new(
                labels(&MONTHS),
                NamedValues::new("New Customers", jitter(rng, &NEW_CUSTOMERS, 10)),
                NamedValues::new("Returning Customers", jitter(rng, &RETURNING_CUSTOMERS, 10)),
            )),
            revenue: Some(SeriesSection::new(
                labels(&WEEKDAYS),
                jitter(rng, &DAILY_REVENUE, 100),
            )),
        }
    }
}

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

/// Each base value moved by a whole number in `-spread..=spread`
fn jitter<R: Rng + ?Sized>(rng: &mut R, base: &[i64], spread: i64) -> Vec<f64> {
    base.iter()
        .map(|b| (b + rng.gen_range(-spread..=spread)) as f64)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::section::Section;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn within(values: &[f64], base: &[i64], spread: i64) -> bool {
        values.len() == base.len()
            && values
                .iter()
                .zip(base)
                .all(|(v, b)| (*v - *b as f64).abs() <= spread as f64)
    }

    #[test]
    fn test_snapshot_carries_every_section() {
        let payload = SnapshotService::new().snapshot();
        for section in Section::ALL {
            assert!(payload.contains(section), "missing {}", section);
        }
    }

    #[test]
    fn test_snapshot_values_stay_near_baselines() {
        let mut rng = StdRng::seed_from_u64(7);
        let payload = SnapshotService::new().snapshot_with(&mut rng);

        let sales = payload.sales.unwrap();
        assert_eq!(sales.labels.first().map(String::as_str), Some("Jan"));
        assert!(within(&sales.values, &MONTHLY_SALES, 200));

        let revenue = payload.revenue.unwrap();
        assert_eq!(revenue.labels.len(), 7);
        assert!(within(&revenue.values, &DAILY_REVENUE, 100));

        let customer = payload.customer.unwrap();
        assert_eq!(customer.datasets.len(), 2);
        assert!(within(&customer.first().values, &NEW_CUSTOMERS, 10));
        assert!(within(&customer.second().values, &RETURNING_CUSTOMERS, 10));

        let category = payload.category.unwrap();
        assert_eq!(category.values, category.datasets[0].values);
        assert!(within(&category.datasets[2].values, &CATEGORY_INVENTORY, 3));
    }

    #[test]
    fn test_snapshot_round_trips_through_the_wire_format() {
        let payload = SnapshotService::new().snapshot_with(&mut StdRng::seed_from_u64(1));
        let text = serde_json::to_string(&payload).unwrap();
        assert_eq!(UpdatePayload::decode(&text).unwrap(), payload);
    }
}
