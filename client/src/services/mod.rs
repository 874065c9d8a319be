//! Business logic services for the Candango ERP client

pub mod costs;
pub mod dashboard;
pub mod reports;
pub mod sales;

pub use costs::CostsService;
pub use dashboard::DashboardService;
pub use reports::ReportsService;
pub use sales::SalesService;

use crate::api::ErpClient;
use crate::config::{Config, DashboardConfig};
use crate::error::AppResult;

/// All services wired over one shared API client
#[derive(Clone)]
pub struct Erp {
    pub client: ErpClient,
    pub costs: CostsService,
    pub sales: SalesService,
    pub reports: ReportsService,
    pub dashboard: DashboardService,
}

impl Erp {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self::from_client(
            ErpClient::new(config)?,
            config.dashboard.clone(),
        ))
    }

    /// Wire every service against a custom base URL (for testing)
    pub fn with_base_url(base_url: &str, dashboard: DashboardConfig) -> Self {
        Self::from_client(ErpClient::with_base_url(base_url), dashboard)
    }

    fn from_client(client: ErpClient, dashboard: DashboardConfig) -> Self {
        let costs = CostsService::new(client.costs.clone());
        let sales = SalesService::new(client.sales.clone(), costs.clone());
        let reports = ReportsService::new(
            client.sales.clone(),
            client.products.clone(),
            client.customers.clone(),
            client.company.clone(),
        );
        let dashboard = DashboardService::new(
            client.dashboard.clone(),
            client.sales.clone(),
            client.expenses.clone(),
            dashboard,
        );
        Self {
            client,
            costs,
            sales,
            reports,
            dashboard,
        }
    }
}
