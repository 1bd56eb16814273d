pub mod d100_sales;
pub mod d200_products;
pub mod d300_stock;
pub mod d400_purchases;
pub mod reference;

/// Label for rows whose dimension value is missing
pub const UNLABELLED: &str = "Non renseigné";
