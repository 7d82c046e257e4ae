use rust_decimal::Decimal;

#[derive(Debug, Clone, Default)]
pub struct UpdateProductDto {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub category_id: Option<i32>,
}

impl UpdateProductDto {
    /// Drops empty strings and zero numbers so they never overwrite
    /// stored data.
    pub fn without_zero_values(self) -> Self {
        Self {
            name: self.name.filter(|n| !n.is_empty()),
            price: self.price.filter(|p| !p.is_zero()),
            stock: self.stock.filter(|s| *s != 0),
            category_id: self.category_id.filter(|c| *c != 0),
        }
    }
}
