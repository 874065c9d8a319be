//! Report assembly: fetch data, apply the user selection, build documents

use std::collections::HashSet;

use chrono::Utc;

use shared::{
    build_document, download_filename, format_currency_brl, format_date_br, period_rows,
    total_rows, ColumnAlign, ColumnSpec, ColumnWidth, Customer, DateRange, Orientation, Product,
    ReportDocument, ReportRequest, SaleRow, TotalLine,
};

use crate::api::{CompanyApi, CustomersApi, ProductQuery, ProductsApi, SaleQuery, SalesApi};
use crate::error::AppResult;

/// A built document together with its suggested download name
#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub document: ReportDocument,
    pub filename: String,
}

#[derive(Clone)]
pub struct ReportsService {
    sales: SalesApi,
    products: ProductsApi,
    customers: CustomersApi,
    company: CompanyApi,
}

impl ReportsService {
    pub fn new(
        sales: SalesApi,
        products: ProductsApi,
        customers: CustomersApi,
        company: CompanyApi,
    ) -> Self {
        Self {
            sales,
            products,
            customers,
            company,
        }
    }

    /// Sales report over a period. Only the selected item rows are
    /// printed; the totals line covers the selection, not the period.
    pub async fn sales_report(
        &self,
        range: DateRange,
        selected_items: &[i64],
    ) -> AppResult<ReportBundle> {
        let sales = self.sales.list(&SaleQuery::default()).await?;
        let rows = period_rows(&sales, range);
        let wanted: HashSet<i64> = selected_items.iter().copied().collect();
        let selected: Vec<SaleRow> = rows
            .into_iter()
            .filter(|row| wanted.contains(&row.item_id))
            .collect();
        let totals = total_rows(&selected);

        let title = "Relatório de Vendas";
        let report_date = Utc::now().date_naive();
        let request = ReportRequest {
            title: title.to_string(),
            document_number: None,
            report_date,
            orientation: Orientation::Landscape,
            columns: sales_columns(),
            rows: selected.iter().map(sale_row_cells).collect(),
            totals: vec![
                TotalLine {
                    label: "Itens".to_string(),
                    value: totals.row_count.to_string(),
                },
                TotalLine {
                    label: "Quantidade".to_string(),
                    value: totals.quantity.to_string(),
                },
                TotalLine {
                    label: "Total Vendas".to_string(),
                    value: format_currency_brl(totals.total_price),
                },
                TotalLine {
                    label: "Total Custos".to_string(),
                    value: format_currency_brl(totals.total_cost),
                },
                TotalLine {
                    label: "Impostos".to_string(),
                    value: format_currency_brl(totals.tax),
                },
                TotalLine {
                    label: "Fretes".to_string(),
                    value: format_currency_brl(totals.freight),
                },
                TotalLine {
                    label: "Lucro".to_string(),
                    value: format_currency_brl(totals.profit),
                },
            ],
            observations: Some(format!(
                "Período: {} a {}",
                format_date_br(range.start),
                format_date_br(range.end)
            )),
            client: None,
        };
        self.finish(title, report_date, request).await
    }

    /// Product catalog report for the selected products.
    pub async fn products_report(&self, selected: &[i64]) -> AppResult<ReportBundle> {
        let products = self.products.list(&ProductQuery::default()).await?;
        let wanted: HashSet<i64> = selected.iter().copied().collect();
        let rows: Vec<Vec<String>> = products
            .iter()
            .filter(|product| wanted.contains(&product.id))
            .map(product_cells)
            .collect();

        let title = "Relatório de Produtos";
        let report_date = Utc::now().date_naive();
        let request = ReportRequest {
            title: title.to_string(),
            document_number: None,
            report_date,
            orientation: Orientation::Portrait,
            columns: vec![
                ColumnSpec::new("Código", ColumnWidth::Auto, ColumnAlign::Left),
                ColumnSpec::new("Nome", ColumnWidth::Fill, ColumnAlign::Left),
                ColumnSpec::new("Categoria", ColumnWidth::Auto, ColumnAlign::Left),
                ColumnSpec::new("Preço Compra", ColumnWidth::Auto, ColumnAlign::Right),
                ColumnSpec::new("Estoque", ColumnWidth::Auto, ColumnAlign::Right),
            ],
            rows,
            totals: Vec::new(),
            observations: None,
            client: None,
        };
        self.finish(title, report_date, request).await
    }

    /// Customer list report for the selected customers.
    pub async fn customers_report(&self, selected: &[i64]) -> AppResult<ReportBundle> {
        let customers = self.customers.list(None).await?;
        let wanted: HashSet<i64> = selected.iter().copied().collect();
        let rows: Vec<Vec<String>> = customers
            .iter()
            .filter(|customer| wanted.contains(&customer.id))
            .map(customer_cells)
            .collect();

        let title = "Relatório de Clientes";
        let report_date = Utc::now().date_naive();
        let request = ReportRequest {
            title: title.to_string(),
            document_number: None,
            report_date,
            orientation: Orientation::Portrait,
            columns: vec![
                ColumnSpec::new("Código", ColumnWidth::Auto, ColumnAlign::Left),
                ColumnSpec::new("Nome", ColumnWidth::Fill, ColumnAlign::Left),
                ColumnSpec::new("Documento", ColumnWidth::Auto, ColumnAlign::Left),
                ColumnSpec::new("Cidade", ColumnWidth::Auto, ColumnAlign::Left),
                ColumnSpec::new("UF", ColumnWidth::Fixed(30), ColumnAlign::Center),
                ColumnSpec::new("Telefone", ColumnWidth::Auto, ColumnAlign::Left),
            ],
            rows,
            totals: Vec::new(),
            observations: None,
            client: None,
        };
        self.finish(title, report_date, request).await
    }

    async fn finish(
        &self,
        title: &str,
        report_date: chrono::NaiveDate,
        request: ReportRequest,
    ) -> AppResult<ReportBundle> {
        let company = self.company.current().await?;
        let document = build_document(company.as_ref(), request)?;
        let filename = download_filename(title, report_date);
        tracing::info!(%filename, rows = document.rows.len(), "report built");
        Ok(ReportBundle { document, filename })
    }
}

fn sales_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("Venda", ColumnWidth::Auto, ColumnAlign::Left),
        ColumnSpec::new("Data", ColumnWidth::Auto, ColumnAlign::Center),
        ColumnSpec::new("Cliente", ColumnWidth::Fill, ColumnAlign::Left),
        ColumnSpec::new("Produto", ColumnWidth::Fill, ColumnAlign::Left),
        ColumnSpec::new("NF", ColumnWidth::Auto, ColumnAlign::Left),
        ColumnSpec::new("Qtd", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Preço Unit.", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Total", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Custo", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Imposto", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Frete", ColumnWidth::Auto, ColumnAlign::Right),
        ColumnSpec::new("Lucro", ColumnWidth::Auto, ColumnAlign::Right),
    ]
}

fn sale_row_cells(row: &SaleRow) -> Vec<String> {
    vec![
        row.sale_number.clone(),
        format_date_br(row.sale_date),
        row.customer_name.clone(),
        row.product_name.clone(),
        row.nf.clone().unwrap_or_default(),
        row.quantity.to_string(),
        format_currency_brl(row.unit_price),
        format_currency_brl(row.total_price),
        format_currency_brl(row.total_cost),
        format_currency_brl(row.tax),
        format_currency_brl(row.freight),
        format_currency_brl(row.profit),
    ]
}

fn product_cells(product: &Product) -> Vec<String> {
    vec![
        product.code.clone(),
        product.name.clone(),
        product.category_name.clone().unwrap_or_default(),
        format_currency_brl(product.purchase_price),
        format!("{} {}", product.current_stock, product.unit.as_str()),
    ]
}

fn customer_cells(customer: &Customer) -> Vec<String> {
    vec![
        customer.code.clone(),
        customer.name.clone(),
        customer.document.clone().unwrap_or_default(),
        customer.city.clone().unwrap_or_default(),
        customer.state.clone().unwrap_or_default(),
        customer.phone.clone().unwrap_or_default(),
    ]
}
