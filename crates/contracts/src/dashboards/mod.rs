pub mod d100_sales;
pub mod d200_products;
pub mod d300_stock;
pub mod d400_purchases;
