use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A recipe as returned by the catalog backend.
///
/// Search results usually carry only the card fields (title, description,
/// image, category, cuisine, ready time); the detail endpoint fills in
/// ingredients, instructions and nutrition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Recipe {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub ready_in_minutes: Option<u32>,
    pub servings: Option<u32>,
    #[serde(deserialize_with = "null_as_default")]
    pub ingredients: Vec<IngredientEntry>,
    pub instructions: Option<Instructions>,
    pub instructions_text: Option<String>,
    pub nutrition: Option<Nutrition>,
}

impl Recipe {
    /// Summary when present, otherwise the description
    pub fn blurb(&self) -> Option<&str> {
        self.summary
            .as_deref()
            .or(self.description.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Ordered instruction steps, if the recipe has structured ones
    pub fn steps(&self) -> &[String] {
        match &self.instructions {
            Some(Instructions::Steps(steps)) => steps,
            _ => &[],
        }
    }

    /// Unstructured instructions, used when there are no steps
    pub fn instructions_body(&self) -> Option<&str> {
        match &self.instructions {
            Some(Instructions::Text(text)) if !text.trim().is_empty() => Some(text.as_str()),
            _ => self
                .instructions_text
                .as_deref()
                .filter(|text| !text.trim().is_empty()),
        }
    }
}

/// One line of an ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Text(String),
    Structured {
        #[serde(default)]
        quantity: Option<Amount>,
        #[serde(default)]
        unit: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

/// Backends send quantities and nutrition values either as text ("to taste",
/// "18g") or as bare numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    pub fn is_empty(&self) -> bool {
        match self {
            Amount::Number(n) => *n == 0.0,
            Amount::Text(s) => s.trim().is_empty(),
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Amount::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Amount::Number(n) => write!(f, "{}", n),
            Amount::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Steps(Vec<String>),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nutrition {
    Text(String),
    Facts(NutritionFacts),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    pub calories: Option<Amount>,
    pub protein: Option<Amount>,
    pub carbs: Option<Amount>,
    pub fat: Option<Amount>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultPage {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<Recipe>,
    #[serde(deserialize_with = "null_as_default")]
    pub total: u64,
}

/// `null` decodes like a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Ids arrive as strings or numbers; numbers keep their JSON spelling
fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Text(id)) => id,
        Some(RawId::Integer(id)) => id.to_string(),
        Some(RawId::Float(id)) => id.to_string(),
        None => String::new(),
    })
}
