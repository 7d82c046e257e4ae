#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
}

impl UpdateCategoryDto {
    /// Drops empty values so they never overwrite stored data.
    pub fn without_zero_values(self) -> Self {
        Self {
            name: self.name.filter(|n| !n.is_empty()),
        }
    }
}
