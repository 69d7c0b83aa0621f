use log::{debug, warn};
use serde_json::Value;

/// Find the schema.org Recipe among parsed JSON-LD blocks.
///
/// Every block is inspected and a later block replaces the current match.
/// A `@graph` block always replaces it with its first Recipe entry, or with
/// nothing when the graph holds no Recipe.
pub fn locate_recipe(blocks: &[Value]) -> Option<Value> {
    let mut found = None;

    for (index, block) in blocks.iter().enumerate() {
        if let Some(graph) = block.get("@graph").filter(|graph| is_truthy(graph)) {
            let Some(entries) = graph.as_array() else {
                warn!("Locator: block {} has a non-array @graph, skipping", index);
                continue;
            };
            found = entries.iter().find(|entry| is_recipe_type(entry)).cloned();
            debug!(
                "Locator: @graph of block {} has Recipe: {}",
                index,
                found.is_some()
            );
        } else if is_recipe_type(block) {
            debug!("Locator: Recipe found at root of block {}", index);
            found = Some(block.clone());
        }
    }

    found
}

fn is_recipe_type(value: &Value) -> bool {
    value.get("@type").and_then(Value::as_str) == Some("Recipe")
}

/// JSON-LD producers emit `null`, `false` or `""` for absent graphs.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_recipe_returned_unchanged() {
        let recipe = json!({
            "@context": "https://schema.org/",
            "@type": "Recipe",
            "name": "Soup",
            "recipeIngredient": ["water", "salt"]
        });

        assert_eq!(locate_recipe(&[recipe.clone()]), Some(recipe));
    }

    #[test]
    fn test_first_recipe_in_graph() {
        let block = json!({
            "@context": "https://schema.org",
            "@graph": [
                {"@type": "WebPage", "name": "Page"},
                {"@type": "Recipe", "name": "First"},
                {"@type": "Recipe", "name": "Second"}
            ]
        });

        let recipe = locate_recipe(&[block]).unwrap();
        assert_eq!(recipe["name"], "First");
    }

    #[test]
    fn test_last_qualifying_block_wins() {
        let blocks = vec![
            json!({"@graph": [{"@type": "Recipe", "name": "Earlier"}]}),
            json!({"@type": "WebSite", "name": "Site"}),
            json!({"@graph": [{"@type": "Recipe", "name": "Later"}]}),
        ];

        let recipe = locate_recipe(&blocks).unwrap();
        assert_eq!(recipe["name"], "Later");
    }

    #[test]
    fn test_later_flat_recipe_overwrites_graph_match() {
        let blocks = vec![
            json!({"@graph": [{"@type": "Recipe", "name": "Graph"}]}),
            json!({"@type": "Recipe", "name": "Flat"}),
        ];

        assert_eq!(locate_recipe(&blocks).unwrap()["name"], "Flat");
    }

    #[test]
    fn test_graph_without_recipe_clears_earlier_match() {
        let blocks = vec![
            json!({"@type": "Recipe", "name": "Flat"}),
            json!({"@graph": [{"@type": "WebPage"}]}),
        ];

        assert_eq!(locate_recipe(&blocks), None);
    }

    #[test]
    fn test_recipe_after_empty_graph_is_found() {
        let blocks = vec![
            json!({"@graph": [{"@type": "Organization"}]}),
            json!({"@type": "Recipe", "name": "After"}),
        ];

        assert_eq!(locate_recipe(&blocks).unwrap()["name"], "After");
    }

    #[test]
    fn test_graph_takes_precedence_over_root_type() {
        let block = json!({
            "@type": "Recipe",
            "name": "Root",
            "@graph": [{"@type": "Person"}]
        });

        assert_eq!(locate_recipe(&[block]), None);
    }

    #[test]
    fn test_null_graph_falls_back_to_root_type() {
        let block = json!({"@graph": null, "@type": "Recipe", "name": "Root"});
        assert_eq!(locate_recipe(&[block]).unwrap()["name"], "Root");
    }

    #[test]
    fn test_non_array_graph_is_skipped() {
        let blocks = vec![
            json!({"@type": "Recipe", "name": "Kept"}),
            json!({"@graph": {"@type": "Recipe", "name": "Object graph"}}),
        ];

        assert_eq!(locate_recipe(&blocks).unwrap()["name"], "Kept");
    }

    #[test]
    fn test_type_match_is_exact() {
        let blocks = vec![
            json!({"@type": "recipe", "name": "Lowercase"}),
            json!({"@type": ["Recipe", "NewsArticle"], "name": "Typed array"}),
            json!([{"@type": "Recipe", "name": "Inside array"}]),
        ];

        assert_eq!(locate_recipe(&blocks), None);
    }

    #[test]
    fn test_no_blocks() {
        assert_eq!(locate_recipe(&[]), None);
    }
}
