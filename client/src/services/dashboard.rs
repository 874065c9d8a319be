//! Dashboard overview: backend summary plus locally computed financials

use shared::{monthly_financials, MonthRef, MonthlyFinancials};

use crate::api::{DashboardApi, DashboardSummary, ExpenseQuery, ExpensesApi, SaleQuery, SalesApi};
use crate::config::DashboardConfig;
use crate::error::AppResult;

/// Everything the dashboard screen needs for one month
#[derive(Debug, Clone)]
pub struct DashboardOverview {
    pub summary: DashboardSummary,
    pub financials: MonthlyFinancials,
}

#[derive(Clone)]
pub struct DashboardService {
    api: DashboardApi,
    sales: SalesApi,
    expenses: ExpensesApi,
    config: DashboardConfig,
}

impl DashboardService {
    pub fn new(
        api: DashboardApi,
        sales: SalesApi,
        expenses: ExpensesApi,
        config: DashboardConfig,
    ) -> Self {
        Self {
            api,
            sales,
            expenses,
            config,
        }
    }

    /// Fetch the backend summary for a month and recompute the monthly
    /// financials locally from the full sale and expense lists. The
    /// local figures win over the backend's `monthly_result` so the
    /// card, the summary table and the reports all agree.
    pub async fn overview(&self, month: MonthRef) -> AppResult<DashboardOverview> {
        let mut summary = self.api.summary(Some(month)).await?;
        summary.recent_sales.truncate(self.config.recent_sales);
        summary.recent_movements.truncate(self.config.recent_movements);

        let financials = self.financials(month).await?;
        tracing::debug!(
            year = month.year,
            month = month.month,
            result = %financials.result,
            "dashboard overview assembled"
        );
        Ok(DashboardOverview { summary, financials })
    }

    /// Monthly profit, expenses, result and year-to-date result.
    pub async fn financials(&self, month: MonthRef) -> AppResult<MonthlyFinancials> {
        let sales = self.sales.list(&SaleQuery::default()).await?;
        let expenses = self
            .expenses
            .list(&ExpenseQuery {
                active: Some(true),
                ..Default::default()
            })
            .await?;
        Ok(monthly_financials(&sales, &expenses, month))
    }
}
