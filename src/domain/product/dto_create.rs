use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct CreateProductDto {
    pub name: String,
    pub price: Decimal,
    /// Defaults to 0 when absent.
    pub stock: Option<i32>,
    pub category_id: i32,
}
