#[derive(Debug, Clone)]
pub struct CreateCategoryDto {
    pub name: String,
}
