use crate::domain::ContextPassage;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub passage: ContextPassage,
    pub score: f32,
}
