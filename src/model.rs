use serde::{Deserialize, Serialize};

/// HTML delivered by the fast path or the render fallback.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub html: String,
}

/// The canonical recipe record handed to the caller.
///
/// Every field is always present; sparse source markup yields empty
/// strings and lists, never missing keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecipe {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub favourited_by_owner: bool,
    pub total_time: String,
    pub recipe_yield: String,
    pub recipe_ingredient: Vec<String>,
    pub recipe_instructions: Vec<String>,
    pub url: String,
    pub image: String,
    pub date_added: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_application_field_names() {
        let recipe = NormalizedRecipe {
            name: "Soup".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Soup",
                "description": "",
                "tags": [],
                "favouritedByOwner": false,
                "totalTime": "",
                "recipeYield": "",
                "recipeIngredient": [],
                "recipeInstructions": [],
                "url": "",
                "image": "",
                "dateAdded": ""
            })
        );
    }
}
