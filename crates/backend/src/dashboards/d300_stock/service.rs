use anyhow::Result;
use chrono::NaiveDate;
use contracts::dashboards::d300_stock::{
    CategoryStockRow, MonthlyStockResponse, StockByCategoryResponse, StockCoverageResponse,
    StockCoverageRow,
};
use contracts::shared::filters::FilterSet;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

use super::repository::{self, ProductStock};

pub async fn stock_by_month(db: &DatabaseConnection, filters: &FilterSet) -> Result<MonthlyStockResponse> {
    let rows = repository::stock_by_month(db, filters).await?;
    let mut response = MonthlyStockResponse {
        months: Vec::with_capacity(rows.len()),
        stock_quantities: Vec::with_capacity(rows.len()),
        stock_values: Vec::with_capacity(rows.len()),
    };
    for row in rows {
        response.months.push(row.month);
        response.stock_quantities.push(row.stock_quantity);
        response.stock_values.push(row.stock_value);
    }
    Ok(response)
}

pub async fn stock_by_category(db: &DatabaseConnection, filters: &FilterSet) -> Result<StockByCategoryResponse> {
    let rows = repository::stock_by_category(db, filters).await?;
    Ok(StockByCategoryResponse {
        categories: rows
            .into_iter()
            .map(|r| CategoryStockRow {
                category: r.category,
                stock_quantity: r.stock_quantity,
                stock_value: r.stock_value,
            })
            .collect(),
    })
}

/// Days of sales covered by current stock, most urgent first
pub async fn stock_coverage(db: &DatabaseConnection, filters: &FilterSet) -> Result<StockCoverageResponse> {
    let stock = repository::stock_by_product(db, filters).await?;
    let sold: HashMap<String, i64> = repository::sold_by_product(db, filters)
        .await?
        .into_iter()
        .map(|r| (r.code, r.quantity_sold))
        .collect();

    let days = match (filters.start_date, filters.end_date) {
        (Some(start), Some(end)) => Some(days_between(start, end)),
        _ => {
            let span = repository::sales_span(db, filters).await?;
            match (parse_date(span.first_sale), parse_date(span.last_sale)) {
                (Some(first), Some(last)) => Some(days_between(first, last)),
                _ => None,
            }
        }
    };

    Ok(StockCoverageResponse {
        products: coverage_rows(stock, &sold, days),
    })
}

fn parse_date(value: Option<String>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(&v, "%Y-%m-%d").ok())
}

/// Inclusive number of days between two dates, at least 1
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    ((end - start).num_days() + 1).max(1)
}

/// stock / (sold / days); `None` when nothing was sold
pub fn coverage_days(stock: i64, sold: i64, days: Option<i64>) -> Option<f64> {
    match days {
        Some(days) if sold > 0 => Some((stock.max(0) as f64) * days as f64 / sold as f64),
        _ => None,
    }
}

fn coverage_rows(
    stock: Vec<ProductStock>,
    sold: &HashMap<String, i64>,
    days: Option<i64>,
) -> Vec<StockCoverageRow> {
    let mut rows: Vec<StockCoverageRow> = stock
        .into_iter()
        .map(|s| {
            let quantity_sold = sold.get(&s.code).copied().unwrap_or(0);
            StockCoverageRow {
                coverage_days: coverage_days(s.stock_quantity, quantity_sold, days),
                name: s.name,
                code: s.code,
                stock_quantity: s.stock_quantity,
                quantity_sold,
            }
        })
        .collect();

    // Ascending coverage, unsold products last
    rows.sort_by(|a, b| match (a.coverage_days, b.coverage_days) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.code.cmp(&b.code)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.code.cmp(&b.code),
    });
    rows
}
