//! Templated recipe descriptions.
//!
//! There is no real generation here: one of four fixed templates is picked
//! uniformly at random and the inputs are substituted verbatim. Servings and
//! prep time are opaque text, never parsed.

use rand::{seq::SliceRandom, Rng};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    StirFry,
    Pasta,
    Soup,
    Grill,
}

impl Template {
    pub const ALL: [Template; 4] = [
        Template::StirFry,
        Template::Pasta,
        Template::Soup,
        Template::Grill,
    ];

    pub fn render(self, ingredients: &str, servings: &str, prep_time: &str, region: &str) -> String {
        match self {
            Template::StirFry => format!(
                "A delicious {region}-style stir fry with {ingredients}! Heat oil in a wok, \
                 add your ingredients with garlic and ginger, stir-fry for {prep_time} minutes, \
                 and season with soy sauce and sesame oil. Serves {servings} people perfectly."
            ),
            Template::Pasta => format!(
                "Try making {region} pasta with {ingredients} and fresh herbs. Boil pasta until \
                 al dente, sauté your ingredients with olive oil, garlic, and herbs for \
                 {prep_time} minutes, then toss everything together with parmesan cheese. \
                 Perfect for {servings} servings."
            ),
            Template::Soup => format!(
                "A hearty {region} soup with {ingredients} would be perfect! Sauté onions and \
                 garlic, add your ingredients with vegetable or chicken broth, simmer for \
                 {prep_time} minutes, and season to taste. Serves {servings} hungry people."
            ),
            Template::Grill => format!(
                "Grill some {ingredients} with {region} spices for a quick meal. Marinate your \
                 ingredients in olive oil, herbs, and regional spices for 30 minutes, then grill \
                 for {prep_time} minutes until perfectly cooked. Great for {servings} people."
            ),
        }
    }
}

/// Picks a template with the thread-local RNG.
pub fn compose(ingredients: &str, servings: &str, prep_time: &str, region: &str) -> String {
    compose_with(&mut rand::thread_rng(), ingredients, servings, prep_time, region)
}

pub fn compose_with<R: Rng + ?Sized>(
    rng: &mut R,
    ingredients: &str,
    servings: &str,
    prep_time: &str,
    region: &str,
) -> String {
    let template = Template::ALL
        .choose(rng)
        .copied()
        .unwrap_or(Template::StirFry);
    template.render(ingredients, servings, prep_time, region)
}
