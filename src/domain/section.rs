// Dashboard sections - one per chart on the dashboard page

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    Sales,
    Category,
    OrderStatus,
    Product,
    CustomerComparison,
    Revenue,
}

impl Section {
    /// Refresh order used when applying a payload.
    pub const ALL: [Section; 6] = [
        Section::Sales,
        Section::Category,
        Section::OrderStatus,
        Section::Product,
        Section::CustomerComparison,
        Section::Revenue,
    ];

    /// Top-level key of this section in a feed message
    pub fn payload_key(self) -> &'static str {
        match self {
            Section::Sales => "sales_data",
            Section::Category => "category_data",
            Section::OrderStatus => "order_status_data",
            Section::Product => "product_data",
            Section::CustomerComparison => "customer_data",
            Section::Revenue => "revenue_data",
        }
    }

    /// Identifier of the chart element the section is drawn into
    pub fn chart_id(self) -> &'static str {
        match self {
            Section::Sales => "salesTrendChart",
            Section::Category => "categoryChart",
            Section::OrderStatus => "orderStatusChart",
            Section::Product => "topProductsChart",
            Section::CustomerComparison => "comparisonChart",
            Section::Revenue => "userRegistrationChart",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.payload_key())
    }
}
