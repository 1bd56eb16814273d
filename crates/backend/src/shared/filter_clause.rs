//! Translates a [`FilterSet`] into a parameterized SQL `WHERE` clause.
//!
//! Queries alias the product table as `p` and the fact table (sales, stock
//! snapshots, purchases) as `f`. Values are always bound, never inlined.

use contracts::shared::filters::{FilterField, FilterSet, SelectedCategory};
use sea_orm::{DatabaseBackend, Statement, Value};

/// Column holding each list dimension
fn column(field: FilterField) -> Option<&'static str> {
    Some(match field {
        FilterField::Pharmacy => "f.pharmacy_id",
        FilterField::Universe => "p.universe",
        FilterField::Category => "p.category",
        FilterField::SubCategory => "p.sub_category",
        FilterField::LabDistributor => "p.lab_distributor",
        FilterField::BrandLab => "p.brand_lab",
        FilterField::RangeName => "p.range_name",
        FilterField::Family => "p.family",
        FilterField::SubFamily => "p.sub_family",
        FilterField::Product => "p.code13",
        FilterField::StartDate | FilterField::EndDate | FilterField::SelectedCategory => {
            return None
        }
    })
}

#[derive(Debug, Clone, Default)]
pub struct FilterClause {
    conditions: Vec<String>,
    values: Vec<Value>,
}

impl FilterClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Conditions for every active filter. `date_column` is the fact-table
    /// date the period bounds apply to; `None` ignores the period.
    pub fn build(filters: &FilterSet, date_column: Option<&str>) -> Self {
        let mut clause = Self::new();

        for field in FilterField::ALL.iter().copied().filter(|f| f.is_list()) {
            let values = filters.values(field);
            if let (Some(column), false) = (column(field), values.is_empty()) {
                clause.push_in(column, values);
            }
        }

        if let Some(date_column) = date_column {
            clause.push_period(date_column, filters);
        }

        match filters.selected_category.unwrap_or_default() {
            SelectedCategory::Global => {}
            SelectedCategory::Medicaments => clause.push("p.is_medicament = 1", []),
            SelectedCategory::Parapharmacie => clause.push("p.is_medicament = 0", []),
        }

        clause
    }

    /// Add a raw condition with its bound values
    pub fn push<I>(&mut self, sql: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.conditions.push(sql.into());
        self.values.extend(values);
    }

    fn push_in(&mut self, column: &str, values: Vec<String>) {
        let placeholders = vec!["?"; values.len()].join(", ");
        self.push(
            format!("{} IN ({})", column, placeholders),
            values.into_iter().map(Value::from),
        );
    }

    /// Period bounds on `date_column`, inclusive on both ends
    pub fn push_period(&mut self, date_column: &str, filters: &FilterSet) {
        if let Some(start) = filters.start_date {
            self.push(
                format!("{} >= ?", date_column),
                [Value::from(start.format("%Y-%m-%d").to_string())],
            );
        }
        if let Some(end) = filters.end_date {
            self.push(
                format!("{} <= ?", date_column),
                [Value::from(end.format("%Y-%m-%d").to_string())],
            );
        }
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// `WHERE a AND b`, or an empty string
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// SQLite statement for `sql`, which must contain `{where}` exactly once.
    ///
    /// `leading` values are bound before the clause values (placeholders that
    /// appear earlier in the query), `trailing` after them.
    pub fn statement(
        &self,
        sql: &str,
        leading: impl IntoIterator<Item = Value>,
        trailing: impl IntoIterator<Item = Value>,
    ) -> Statement {
        let sql = sql.replace("{where}", &self.where_clause());
        let values: Vec<Value> = leading
            .into_iter()
            .chain(self.values.iter().cloned())
            .chain(trailing)
            .collect();
        Statement::from_sql_and_values(DatabaseBackend::Sqlite, sql, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::shared::filters::FilterPatch;

    #[test]
    fn test_session_default_has_no_conditions() {
        let clause = FilterClause::build(&FilterSet::session_default(), Some("f.sale_date"));
        assert!(clause.is_empty());
        assert_eq!(clause.where_clause(), "");
    }

    #[test]
    fn test_values_are_bound_not_inlined() {
        let mut filters = FilterSet::session_default();
        filters.merge(
            FilterPatch::new()
                .with_values(FilterField::Category, ["Vitamines", "x' OR 1=1 --"])
                .with_values(FilterField::Pharmacy, ["ph-1"]),
        );

        let clause = FilterClause::build(&filters, None);
        assert_eq!(
            clause.where_clause(),
            "WHERE f.pharmacy_id IN (?) AND p.category IN (?, ?)"
        );
        assert_eq!(clause.values().len(), 3);
        assert!(!clause.where_clause().contains("OR 1=1"));
    }

    #[test]
    fn test_period_and_scope() {
        let mut filters = FilterSet::default();
        filters.merge(
            FilterPatch::new()
                .with_dates(NaiveDate::from_ymd_opt(2024, 1, 1), NaiveDate::from_ymd_opt(2024, 1, 31))
                .with_selected_category(Some(SelectedCategory::Parapharmacie)),
        );

        let clause = FilterClause::build(&filters, Some("f.sale_date"));
        assert_eq!(
            clause.where_clause(),
            "WHERE f.sale_date >= ? AND f.sale_date <= ? AND p.is_medicament = 0"
        );
        assert_eq!(
            clause.values(),
            &[Value::from("2024-01-01".to_string()), Value::from("2024-01-31".to_string())]
        );
    }

    #[test]
    fn test_period_ignored_without_date_column() {
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_dates(NaiveDate::from_ymd_opt(2024, 1, 1), None));
        assert!(FilterClause::build(&filters, None).is_empty());
    }

    #[test]
    fn test_statement_orders_values() {
        let mut filters = FilterSet::default();
        filters.merge(FilterPatch::new().with_values(FilterField::Family, ["Compléments"]));
        let clause = FilterClause::build(&filters, None);

        let stmt = clause.statement(
            "SELECT ? AS a FROM t {where} LIMIT ?",
            [Value::from(1i64)],
            [Value::from(20i64)],
        );
        assert_eq!(stmt.sql, "SELECT ? AS a FROM t WHERE p.family IN (?) LIMIT ?");
        let values = stmt.values.map(|v| v.0).unwrap_or_default();
        assert_eq!(
            values,
            vec![
                Value::from(1i64),
                Value::from("Compléments".to_string()),
                Value::from(20i64)
            ]
        );
    }
}
