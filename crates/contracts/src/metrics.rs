//! Metric catalogue. Each entry binds an endpoint, a label, a response shape
//! and the filter fields the metric depends on.

use crate::dashboards::d100_sales::{
    MonthlySalesResponse, PeakSalesResponse, SalesByCategoryResponse,
    SalesByLabDistributorResponse, SalesByPharmacyResponse, SalesByUniverseResponse,
    SalesSummaryResponse,
};
use crate::dashboards::d200_products::{PriceAnomaliesResponse, ProductRankingResponse};
use crate::dashboards::d300_stock::{
    MonthlyStockResponse, StockByCategoryResponse, StockCoverageResponse,
};
use crate::dashboards::d400_purchases::{
    MonthlyPurchasesResponse, PurchasesByCategoryResponse, PurchasesByLabDistributorResponse,
};
use crate::metric;
use crate::reference::{
    FamilyTreeResponse, LabDistributorTreeResponse, PharmacyListResponse, ProductCodesResponse,
    UniverseTreeResponse,
};
use crate::shared::filters::FilterField;

pub const API_PREFIX: &str = "/api";

// Sales
metric!(SalesByMonth, "/api/sales/by-month", "ventes par mois", MonthlySalesResponse, FilterField::ALL);
metric!(SalesByCategory, "/api/sales/by-category", "ventes par catégorie", SalesByCategoryResponse, FilterField::ALL);
metric!(SalesByUniverse, "/api/sales/by-universe", "ventes par univers", SalesByUniverseResponse, FilterField::ALL);
metric!(SalesByLabDistributor, "/api/sales/by-lab-distributor", "ventes par laboratoire", SalesByLabDistributorResponse, FilterField::ALL);
metric!(SalesByPharmacy, "/api/sales/by-pharmacy", "ventes par pharmacie", SalesByPharmacyResponse, FilterField::ALL);
metric!(SalesSummary, "/api/sales/summary", "indicateurs de ventes", SalesSummaryResponse, FilterField::ALL);
metric!(PeakSales, "/api/sales/peaks", "pics de ventes", PeakSalesResponse, FilterField::ALL);

// Products
metric!(TopProducts, "/api/products/top", "meilleures ventes", ProductRankingResponse, FilterField::ALL);
metric!(WorstProducts, "/api/products/worst", "plus faibles ventes", ProductRankingResponse, FilterField::ALL);
metric!(
    /// Only meaningful when exactly one product is selected
    ProductSalesByMonth, "/api/products/sales-by-month", "ventes du produit", MonthlySalesResponse, FilterField::ALL
);
metric!(PriceAnomalies, "/api/products/price-anomalies", "anomalies de prix", PriceAnomaliesResponse, FilterField::ALL);

// Stock
metric!(StockByMonth, "/api/stock/by-month", "stocks par mois", MonthlyStockResponse, FilterField::ALL);
metric!(StockByCategory, "/api/stock/by-category", "stocks par catégorie", StockByCategoryResponse, FilterField::ALL);
metric!(StockCoverage, "/api/stock/coverage", "couvertures de stock", StockCoverageResponse, FilterField::ALL);

// Purchases
metric!(PurchasesByMonth, "/api/purchases/by-month", "achats par mois", MonthlyPurchasesResponse, FilterField::ALL);
metric!(PurchasesByCategory, "/api/purchases/by-category", "achats par catégorie", PurchasesByCategoryResponse, FilterField::ALL);
metric!(PurchasesByLabDistributor, "/api/purchases/by-lab-distributor", "achats par laboratoire", PurchasesByLabDistributorResponse, FilterField::ALL);

// Reference lists: independent of the selection, fetched once
metric!(PharmacyList, "/api/reference/pharmacies", "pharmacies", PharmacyListResponse, FilterField::NONE);
metric!(UniverseTree, "/api/reference/universes", "univers", UniverseTreeResponse, FilterField::NONE);
metric!(FamilyTree, "/api/reference/families", "familles", FamilyTreeResponse, FilterField::NONE);
metric!(LabDistributorTree, "/api/reference/lab-distributors", "laboratoires", LabDistributorTreeResponse, FilterField::NONE);
metric!(ProductCodes, "/api/reference/product-codes", "codes produits", ProductCodesResponse, FilterField::NONE);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::filters::{FilterPatch, FilterSet};
    use crate::shared::metric::Metric;

    #[test]
    fn test_endpoints_are_under_api_prefix() {
        let endpoints = [
            SalesByMonth::ENDPOINT,
            TopProducts::ENDPOINT,
            StockCoverage::ENDPOINT,
            PurchasesByLabDistributor::ENDPOINT,
            ProductCodes::ENDPOINT,
        ];
        for endpoint in endpoints {
            assert!(endpoint.starts_with(API_PREFIX), "{}", endpoint);
        }
    }

    #[test]
    fn test_reference_query_key_ignores_filters() {
        let mut filters = FilterSet::session_default();
        filters.merge(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]));
        assert_eq!(PharmacyList::query_string(&filters), "");
        assert_eq!(
            SalesByCategory::query_string(&filters),
            "category=Vitamines&selectedCategory=global"
        );
    }
}
