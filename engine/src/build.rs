use crate::parse::tokenize;
use crate::types::{Item, TermVector};

/// Get matchable text from an Item
pub fn item_searchable_text(item: &Item) -> String {
    format!(
        "{} {} {} {}",
        item.title, item.description, item.category, item.location
    )
}

/// Count occurrences of each token
pub fn build_term_vector<S: AsRef<str>>(tokens: &[S]) -> TermVector {
    let mut term_freqs = TermVector::new();
    for token in tokens {
        *term_freqs.entry(token.as_ref().to_string()).or_insert(0) += 1;
    }
    term_freqs
}

/// Tokenize and vectorize a text blob in one go
pub fn text_to_term_vector(text: &str) -> TermVector {
    build_term_vector(&tokenize(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ItemKind;

    #[test]
    fn test_build_term_vector() {
        let tv = build_term_vector(&["wallet", "black", "wallet"]);
        assert_eq!(tv.len(), 2);
        assert_eq!(tv["wallet"], 2);
        assert_eq!(tv["black"], 1);
    }

    #[test]
    fn test_build_term_vector_empty() {
        let tokens: Vec<String> = vec![];
        assert!(build_term_vector(&tokens).is_empty());
    }

    #[test]
    fn test_item_searchable_text() {
        let item = Item {
            id: "1".to_string(),
            kind: ItemKind::Found,
            title: "Keys".to_string(),
            description: "on a red lanyard".to_string(),
            category: "Keys".to_string(),
            location: "Library".to_string(),
            date: "2024-03-01".to_string(),
        };
        assert_eq!(item_searchable_text(&item), "Keys on a red lanyard Keys Library");
        let tv = text_to_term_vector(&item_searchable_text(&item));
        assert_eq!(tv["keys"], 2);
        assert!(!tv.contains_key("2024"));
    }
}
