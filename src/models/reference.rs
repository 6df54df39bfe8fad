use serde::{Deserialize, Serialize};

/// One entry of the `therapy_types` singleton list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TherapyType {
    pub name: String,
    /// Typical session length in minutes.
    pub duration: u32,
    pub description: String,
}

/// Built-in Panchakarma catalogue, served when the `therapy_types` singleton
/// has not been seeded yet.
pub fn default_therapy_types() -> Vec<TherapyType> {
    [
        ("Abhyanga", 60, "Full-body warm oil massage"),
        ("Shirodhara", 45, "Continuous stream of warm oil on the forehead"),
        ("Swedana", 30, "Herbal steam therapy"),
        ("Nasya", 30, "Nasal administration of medicated oils"),
        ("Basti", 60, "Medicated enema therapy"),
        ("Virechana", 90, "Therapeutic purgation"),
        ("Udvartana", 45, "Herbal powder massage"),
    ]
    .into_iter()
    .map(|(name, duration, description)| TherapyType {
        name: name.to_string(),
        duration,
        description: description.to_string(),
    })
    .collect()
}
