//! Maps the loosely-typed JSON-LD Recipe onto [`NormalizedRecipe`].

use crate::model::NormalizedRecipe;
use chrono::{DateTime, SecondsFormat, Utc};
use html_escape::decode_html_entities;
use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A located JSON-LD Recipe as published by an arbitrary site.
///
/// Every field is optional and read leniently: a field of unexpected shape
/// is treated as absent rather than rejecting the whole record. List fields
/// go one step further and drop only the entries they cannot read.
#[derive(Debug, Default, Deserialize)]
pub struct CandidateRecipe {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<DescriptionType>,
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Option<Keywords>,
    #[serde(rename = "totalTime", default, deserialize_with = "lenient")]
    pub total_time: Option<String>,
    #[serde(rename = "recipeYield", default, deserialize_with = "lenient")]
    pub recipe_yield: Option<RecipeYield>,
    #[serde(rename = "recipeIngredient", default, deserialize_with = "lenient")]
    pub recipe_ingredient: Option<Vec<Lenient<IngredientEntry>>>,
    #[serde(rename = "recipeInstructions", default, deserialize_with = "lenient")]
    pub recipe_instructions: Option<RecipeInstructions>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageType>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DescriptionType {
    String(String),
    Object(TextObject),
}

#[derive(Debug, Deserialize)]
pub struct TextObject {
    pub text: String,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Keywords {
    String(String),
    Multiple(Vec<Lenient<String>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeYield {
    String(String),
    Number(serde_json::Number),
    Array(Vec<Lenient<YieldEntry>>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum YieldEntry {
    String(String),
    Number(serde_json::Number),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IngredientEntry {
    Text(String),
    Object(IngredientObject),
}

#[derive(Debug, Deserialize)]
pub struct IngredientObject {
    pub name: String,
    pub amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecipeInstructions {
    Text(String),
    Items(Vec<Lenient<InstructionItem>>),
}

/// One entry of `recipeInstructions`. Steps must be tried last since every
/// field of a step is optional.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum InstructionItem {
    Text(String),
    Section(HowToSection),
    Nested(Vec<Lenient<InstructionItem>>),
    Step(HowToStep),
}

#[derive(Debug, Deserialize)]
pub struct HowToSection {
    #[serde(rename = "itemListElement")]
    pub item_list_element: Vec<Lenient<InstructionItem>>,
}

#[derive(Debug, Deserialize)]
pub struct HowToStep {
    pub text: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageType {
    String(String),
    Multiple(Vec<Lenient<ImageEntry>>),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ImageEntry {
    String(String),
    Object(ImageObject),
}

#[derive(Debug, Deserialize)]
pub struct ImageObject {
    #[serde(alias = "contentUrl")]
    pub url: String,
}

/// One entry of a JSON-LD list; `None` when the entry has an unexpected shape.
#[derive(Debug)]
pub struct Lenient<T>(pub Option<T>);

impl<'de, T: DeserializeOwned> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient(deserializer).map(Lenient)
    }
}

fn present<T>(entries: Vec<Lenient<T>>) -> impl Iterator<Item = T> {
    entries.into_iter().filter_map(|entry| entry.0)
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl CandidateRecipe {
    /// Read a located Recipe block. Never fails: a non-object yields an
    /// empty candidate.
    pub fn from_value(value: Value) -> Self {
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("Normalizer: Recipe block is not an object: {}", e);
            Self::default()
        })
    }
}

/// Build the canonical record for a freshly scraped recipe.
pub fn normalize(
    candidate: CandidateRecipe,
    source_url: &str,
    added_at: DateTime<Utc>,
) -> NormalizedRecipe {
    NormalizedRecipe {
        name: candidate
            .name
            .map(|name| decode_html_symbols(&name))
            .unwrap_or_default(),
        description: match candidate.description {
            Some(DescriptionType::String(desc)) => decode_html_symbols(&desc),
            Some(DescriptionType::Object(desc)) => decode_html_symbols(&desc.text),
            None => String::new(),
        },
        tags: match candidate.keywords {
            Some(Keywords::String(keywords)) => non_empty(keywords.split(',')),
            Some(Keywords::Multiple(keywords)) => {
                let keywords: Vec<String> = present(keywords).collect();
                non_empty(keywords.iter().map(String::as_str))
            }
            None => Vec::new(),
        },
        favourited_by_owner: false,
        total_time: candidate
            .total_time
            .map(|time| humanize_duration(&time))
            .unwrap_or_default(),
        recipe_yield: candidate.recipe_yield.map(yield_text).unwrap_or_default(),
        recipe_ingredient: candidate
            .recipe_ingredient
            .map(ingredient_lines)
            .unwrap_or_default(),
        recipe_instructions: match candidate.recipe_instructions {
            Some(RecipeInstructions::Text(text)) => non_empty(text.lines()),
            Some(RecipeInstructions::Items(items)) => {
                let mut steps = Vec::new();
                collect_steps(items, &mut steps);
                steps
            }
            None => Vec::new(),
        },
        url: source_url.to_string(),
        image: candidate.image.and_then(first_image).unwrap_or_default(),
        date_added: added_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities (&amp;amp;)
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(decode_html_symbols)
        .collect()
}

fn ingredient_lines(entries: Vec<Lenient<IngredientEntry>>) -> Vec<String> {
    present(entries)
        .filter_map(|entry| match entry {
            IngredientEntry::Text(text) => {
                Some(decode_html_symbols(text.trim())).filter(|line| !line.is_empty())
            }
            IngredientEntry::Object(ing) if ing.name.trim().is_empty() => None,
            IngredientEntry::Object(ing) => {
                let name = decode_html_symbols(ing.name.trim());
                Some(match ing.amount.as_deref().map(str::trim) {
                    Some(amount) if !amount.is_empty() => format!("{amount} {name}"),
                    _ => name,
                })
            }
        })
        .collect()
}

fn collect_steps(items: Vec<Lenient<InstructionItem>>, steps: &mut Vec<String>) {
    for item in present(items) {
        let text = match item {
            InstructionItem::Text(text) => Some(text),
            InstructionItem::Step(step) => step.text.or(step.name).or(step.description),
            InstructionItem::Section(section) => {
                collect_steps(section.item_list_element, steps);
                None
            }
            InstructionItem::Nested(items) => {
                collect_steps(items, steps);
                None
            }
        };
        if let Some(text) = text {
            let text = decode_html_symbols(text.trim());
            if !text.is_empty() {
                steps.push(text);
            }
        }
    }
}

fn yield_text(recipe_yield: RecipeYield) -> String {
    match recipe_yield {
        RecipeYield::String(text) => decode_html_symbols(text.trim()),
        RecipeYield::Number(n) => n.to_string(),
        RecipeYield::Array(entries) => {
            let entries: Vec<String> = present(entries)
                .map(|entry| match entry {
                    YieldEntry::String(text) => decode_html_symbols(text.trim()),
                    YieldEntry::Number(n) => n.to_string(),
                })
                .collect();
            // prefer the descriptive entry ("4 servings") over the bare count
            entries
                .iter()
                .find(|entry| entry.contains(char::is_alphabetic))
                .or_else(|| entries.first())
                .cloned()
                .unwrap_or_default()
        }
    }
}

fn first_image(image: ImageType) -> Option<String> {
    match image {
        ImageType::String(url) => Some(decode_html_symbols(&url)),
        ImageType::Object(obj) => Some(obj.url),
        ImageType::Multiple(entries) => present(entries).next().map(|entry| match entry {
            ImageEntry::String(url) => decode_html_symbols(&url),
            ImageEntry::Object(obj) => obj.url,
        }),
    }
}

/// Render an ISO 8601 duration for people: `PT1H30M` -> `1 hour 30 minutes`.
///
/// Ranges such as `PT15-20M` are kept verbatim with their unit. Anything
/// that is not a duration is returned unchanged.
fn humanize_duration(raw: &str) -> String {
    let raw = raw.trim();
    let Some(body) = raw.strip_prefix('P') else {
        return raw.to_string();
    };

    let mut total_seconds = 0.0;
    let mut ranges = Vec::new();
    let mut number = String::new();
    let mut in_time = false;

    for c in body.chars() {
        match c {
            'T' if number.is_empty() => in_time = true,
            '0'..='9' | '.' | '-' => number.push(c),
            unit => {
                let (scale, unit_name) = match (unit, in_time) {
                    ('D', false) => (86_400.0, "days"),
                    ('H', true) => (3_600.0, "hours"),
                    ('M', true) => (60.0, "minutes"),
                    ('S', true) => (1.0, "seconds"),
                    _ => return raw.to_string(),
                };
                if let Ok(value) = number.parse::<f64>() {
                    total_seconds += value * scale;
                } else if number.contains('-') {
                    ranges.push(format!("{number} {unit_name}"));
                } else {
                    return raw.to_string();
                }
                number.clear();
            }
        }
    }
    if !number.is_empty() {
        return raw.to_string();
    }

    let total_minutes = (total_seconds / 60.0).round() as u64;
    let mut parts: Vec<String> = [
        (total_minutes / 1440, "day"),
        (total_minutes % 1440 / 60, "hour"),
        (total_minutes % 60, "minute"),
    ]
    .into_iter()
    .filter(|(amount, _)| *amount > 0)
    .map(|(amount, unit)| {
        format!("{} {}{}", amount, unit, if amount == 1 { "" } else { "s" })
    })
    .collect();
    parts.extend(ranges);

    if parts.is_empty() {
        raw.to_string()
    } else {
        parts.join(" ")
    }
}
