use std::str::FromStr;
use std::sync::LazyLock;

use mealvault_shared::recipe::{Difficulty, Recipe, Season};
use regex::Regex;
use serde::Deserialize;

static RE_PREP_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)prep time:?\s*(\d+)").unwrap());
static RE_COOK_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cook time:?\s*(\d+)").unwrap());
static RE_DIFFICULTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)difficulty:?\s*(easy|medium|hard)").unwrap());

#[derive(Deserialize)]
#[serde(untagged)]
enum SeasonField {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct FrontMatter {
    #[serde(alias = "prepTime")]
    prep_time: Option<u32>,
    #[serde(alias = "cookTime")]
    cook_time: Option<u32>,
    difficulty: Option<String>,
    #[serde(rename = "lastUsed", alias = "last_used")]
    last_used: Option<i64>,
    season: Option<SeasonField>,
    #[serde(alias = "kidFriendly")]
    kid_friendly: Option<bool>,
    #[serde(alias = "familyFriendly")]
    family_friendly: Option<bool>,
    #[serde(alias = "mealType")]
    meal_type: Option<String>,
    rating: Option<f64>,
}

/// Splits `---` delimited front matter from the body.
///
/// Returns `None` when the note has no front matter block.
pub fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Builds a recipe from a note's markdown.
///
/// Front matter wins; body text (`## Ingredients` bullets, `Prep time: 10`,
/// `Difficulty: easy`) fills in what it leaves out.
pub fn parse_note(path: impl Into<String>, name: impl Into<String>, content: &str) -> Recipe {
    let path = path.into();
    let (front_matter, body) = match split_front_matter(content) {
        Some((yaml, body)) => {
            let front_matter = if yaml.trim().is_empty() {
                FrontMatter::default()
            } else {
                serde_yaml::from_str::<FrontMatter>(yaml).unwrap_or_else(|e| {
                    tracing::warn!(path = %path, "ignoring invalid front matter: {e}");
                    FrontMatter::default()
                })
            };
            (front_matter, body)
        }
        None => (FrontMatter::default(), content),
    };

    let difficulty = front_matter
        .difficulty
        .as_deref()
        .and_then(|d| Difficulty::from_str(d.trim()).ok())
        .or_else(|| extract_difficulty(body));

    let season = match front_matter.season {
        Some(SeasonField::One(raw)) => normalize_seasons([raw]),
        Some(SeasonField::Many(raw)) => normalize_seasons(raw),
        None => vec![],
    };

    Recipe {
        path,
        name: name.into(),
        ingredients: extract_ingredients(body),
        prep_time: front_matter
            .prep_time
            .filter(|t| *t > 0)
            .or_else(|| extract_time(&RE_PREP_TIME, body)),
        cook_time: front_matter
            .cook_time
            .filter(|t| *t > 0)
            .or_else(|| extract_time(&RE_COOK_TIME, body)),
        difficulty,
        kid_friendly: front_matter.kid_friendly.unwrap_or(false),
        family_friendly: front_matter.family_friendly.unwrap_or(false),
        last_used: front_matter.last_used,
        season,
        meal_type: front_matter
            .meal_type
            .map(|m| m.trim().to_lowercase())
            .filter(|m| !m.is_empty()),
        rating: front_matter
            .rating
            .map(|r| r.round().clamp(0.0, 5.0) as u8),
    }
}

fn normalize_seasons(raw: impl IntoIterator<Item = String>) -> Vec<Season> {
    let mut seasons = vec![];
    for season in raw.into_iter().filter_map(|s| Season::normalize(&s)) {
        if !seasons.contains(&season) {
            seasons.push(season);
        }
    }

    seasons
}

fn is_ingredients_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("##") else {
        return false;
    };

    let title = rest
        .trim_start_matches('#')
        .trim()
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim();

    title.eq_ignore_ascii_case("ingredients")
}

/// Bullet lines of the first `## Ingredients` section (an emoji may precede the word).
pub fn extract_ingredients(body: &str) -> Vec<String> {
    body.lines()
        .skip_while(|line| !is_ingredients_heading(line))
        .skip(1)
        .take_while(|line| !line.starts_with("##"))
        .filter_map(|line| line.trim_start().strip_prefix('-'))
        .map(|line| line.trim().to_owned())
        .filter(|line| !line.is_empty())
        .collect()
}

fn extract_time(re: &Regex, body: &str) -> Option<u32> {
    re.captures(body).and_then(|c| c[1].parse().ok())
}

fn extract_difficulty(body: &str) -> Option<Difficulty> {
    RE_DIFFICULTY
        .captures(body)
        .and_then(|c| Difficulty::from_str(&c[1]).ok())
}

/// Sets `lastUsed` in the note's front matter, creating the block if needed.
pub fn set_last_used(content: &str, at: i64) -> String {
    let field = format!("lastUsed: {at}");

    let Some((yaml, body)) = split_front_matter(content) else {
        return format!("---\n{field}\n---\n{content}");
    };

    let mut out = String::from("---\n");
    let mut replaced = false;

    for line in yaml.lines() {
        if line.starts_with("lastUsed:") {
            out.push_str(&field);
            replaced = true;
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    if !replaced {
        out.push_str(&field);
        out.push('\n');
    }

    out.push_str("---\n");
    out.push_str(body);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOUP: &str = "---
prep_time: 10
cookTime: 20
difficulty: Easy
kid_friendly: true
family_friendly: true
meal_type: Soup
rating: 4
season: [Late Autumn, winter, autumn]
lastUsed: 1700000000000
---
# Soup

## 🥕 Ingredients
- 2 carrots
- 1 onion
  - 500 ml stock

## Steps
- chop
";

    #[test]
    fn front_matter_fields() {
        let recipe = parse_note("Recipes/Soup.md", "Soup", SOUP);

        assert_eq!(recipe.path, "Recipes/Soup.md");
        assert_eq!(recipe.name, "Soup");
        assert_eq!(recipe.prep_time, Some(10));
        assert_eq!(recipe.cook_time, Some(20));
        assert_eq!(recipe.difficulty, Some(Difficulty::Easy));
        assert!(recipe.kid_friendly);
        assert!(recipe.family_friendly);
        assert_eq!(recipe.meal_type.as_deref(), Some("soup"));
        assert_eq!(recipe.rating, Some(4));
        assert_eq!(recipe.season, vec![Season::Fall, Season::Winter]);
        assert_eq!(recipe.last_used, Some(1_700_000_000_000));
        assert_eq!(
            recipe.ingredients,
            vec!["2 carrots", "1 onion", "500 ml stock"]
        );
    }

    #[test]
    fn body_fallbacks() {
        let content = "# Pancakes\nPrep time: 5 min\nCook Time 15\nDifficulty: hard\n\n### Ingredients\n- flour\n- milk\n";
        let recipe = parse_note("Recipes/Pancakes.md", "Pancakes", content);

        assert_eq!(recipe.prep_time, Some(5));
        assert_eq!(recipe.cook_time, Some(15));
        assert_eq!(recipe.difficulty, Some(Difficulty::Hard));
        assert_eq!(recipe.ingredients, vec!["flour", "milk"]);
        assert!(!recipe.kid_friendly);
        assert!(recipe.season.is_empty());
    }

    #[test]
    fn single_season_string() {
        let recipe = parse_note("a.md", "a", "---\nseason: Summer\n---\n");
        assert_eq!(recipe.season, vec![Season::Summer]);
    }

    #[test]
    fn invalid_front_matter_is_ignored() {
        let recipe = parse_note("a.md", "a", "---\nrating: [oops\n---\nPrep time: 7\n");

        assert_eq!(recipe.rating, None);
        assert_eq!(recipe.prep_time, Some(7));
    }

    #[test]
    fn no_ingredients_section() {
        assert!(extract_ingredients("# Title\n- not an ingredient\n").is_empty());
    }

    #[test]
    fn set_last_used_replaces_existing_value() {
        let updated = set_last_used(SOUP, 42);

        assert!(updated.contains("\nlastUsed: 42\n"));
        assert!(!updated.contains("1700000000000"));
        assert!(updated.ends_with("## Steps\n- chop\n"));
        assert_eq!(parse_note("a.md", "a", &updated).last_used, Some(42));
    }

    #[test]
    fn set_last_used_inserts_field() {
        let updated = set_last_used("---\nrating: 5\n---\nbody\n", 7);
        assert_eq!(updated, "---\nrating: 5\nlastUsed: 7\n---\nbody\n");
    }

    #[test]
    fn set_last_used_creates_front_matter() {
        let updated = set_last_used("# Plain\n", 7);
        assert_eq!(updated, "---\nlastUsed: 7\n---\n# Plain\n");
    }
}
