use std::collections::HashMap;
use std::sync::LazyLock;

use mealvault_shared::recipe::Recipe;
use regex::Regex;

static RE_QUANTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.?\d*)\s*(.*?)$").unwrap());

/// Ingredient line merged across recipes.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedIngredient {
    /// `None` for lines without a leading quantity, e.g. "salt to taste".
    pub quantity: Option<f64>,
    pub description: String,
    pub recipes: Vec<String>,
}

impl AggregatedIngredient {
    pub fn label(&self) -> String {
        let recipes = self.recipes.join(", ");
        match self.quantity {
            Some(quantity) => format!(
                "{} {} ({recipes})",
                format_quantity(quantity),
                self.description
            ),
            None => format!("{} ({recipes})", self.description),
        }
    }
}

/// Sums ingredient lines sharing a description.
///
/// "2 eggs" and "1 eggs" become "3 eggs"; lines without a leading number are
/// kept once per distinct text. Order follows first appearance.
pub fn aggregate<'a>(recipes: impl IntoIterator<Item = &'a Recipe>) -> Vec<AggregatedIngredient> {
    let mut items: Vec<AggregatedIngredient> = vec![];
    let mut index: HashMap<(bool, String), usize> = HashMap::new();

    for recipe in recipes {
        for line in &recipe.ingredients {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (quantity, description) = match RE_QUANTITY.captures(line) {
                Some(c) => (c[1].parse::<f64>().ok(), c[2].trim().to_owned()),
                None => (None, line.to_owned()),
            };
            let key = (quantity.is_some(), description.to_lowercase());

            match index.get(&key) {
                Some(&position) => {
                    let item = &mut items[position];
                    if let (Some(total), Some(quantity)) = (item.quantity.as_mut(), quantity) {
                        *total += quantity;
                    }
                    if !item.recipes.contains(&recipe.name) {
                        item.recipes.push(recipe.name.to_owned());
                    }
                }
                None => {
                    index.insert(key, items.len());
                    items.push(AggregatedIngredient {
                        quantity,
                        description,
                        recipes: vec![recipe.name.to_owned()],
                    });
                }
            }
        }
    }

    items
}

pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        return format!("{}", quantity as i64);
    }

    let formatted = format!("{quantity:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_owned()
}
