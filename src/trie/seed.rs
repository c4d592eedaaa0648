//! Built-in vocabulary used when no persisted snapshot can be loaded.

pub const PRODUCT_SEED: &[&str] = &[
    "protein powder",
    "whey isolate",
    "casein protein",
    "creatine monohydrate",
    "bcaa powder",
    "eaa powder",
    "pre workout",
    "fat burner",
    "mass gainer",
    "multivitamin",
    "omega-3",
    "fish oil",
    "vitamin d",
    "magnesium",
    "zinc",
    "jacked3d",
    "c4",
    "pre-jym",
    "superpump250",
    "gold standard",
];

pub const BRAND_SEED: &[&str] = &[
    "optimum nutrition",
    "dymatize",
    "muscle tech",
    "bpi sports",
    "cellucor",
    "ghost",
    "quest nutrition",
    "gold standard",
    "isopure",
    "gnc",
    "vitamin shoppe",
    "nature made",
];

pub const FLAVOR_SEED: &[&str] = &[
    "chocolate",
    "vanilla",
    "strawberry",
    "cookies and cream",
    "peanut butter",
    "unflavored",
    "fruit punch",
    "blue raspberry",
    "watermelon",
    "lemon lime",
];
