use rust_decimal_macros::dec;
use crate::experience::Experience;

/// The fixed catalog loaded at process start, in display order.
pub fn seed_catalog() -> Vec<Experience> {
    vec![
        Experience {
            id: "meditation-retreats".to_string(),
            name: "Meditation Retreats".to_string(),
            description: "Guided meditation in a quiet mountain sanctuary, led by experienced teachers."
                .to_string(),
            price: dec!(120.00),
            duration: "2-3 hours".to_string(),
            image: "https://images.unsplash.com/photo-1506126613408-eca07ce68773".to_string(),
            kind: "wellness".to_string(),
        },
        Experience {
            id: "mountain-treks".to_string(),
            name: "Mountain Treks".to_string(),
            description: "A full-day ridge hike with a local guide, packed lunch included.".to_string(),
            price: dec!(185.00),
            duration: "6-8 hours".to_string(),
            image: "https://images.unsplash.com/photo-1551632811-561732d1e306".to_string(),
            kind: "adventure".to_string(),
        },
        Experience {
            id: "heritage-walks".to_string(),
            name: "Heritage Walks".to_string(),
            description: "Old-town streets, temples and markets with a historian.".to_string(),
            price: dec!(65.00),
            duration: "2-3 hours".to_string(),
            image: "https://images.unsplash.com/photo-1528127269322-539801943592".to_string(),
            kind: "cultural".to_string(),
        },
        Experience {
            id: "sunset-sailing".to_string(),
            name: "Sunset Sailing".to_string(),
            description: "An evening on the bay aboard a traditional sailboat.".to_string(),
            price: dec!(150.00),
            duration: "3-4 hours".to_string(),
            image: "https://images.unsplash.com/photo-1500514966906-fe245eea9344".to_string(),
            kind: "leisure".to_string(),
        },
    ]
}
