//! Local prompt-to-data generation.
//!
//! Turns a free-text prompt into a canned JSON payload by pattern
//! matching: detect a count, detect whether a collection is wanted,
//! detect field names from keywords, then fill each field with a
//! plausible canned value. Also derives the endpoint slug/name from the
//! prompt and computes the structural schema of generated data.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use serde_json::{json, Map, Value};
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// Kinds of values the canned generator knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Id,
    Name,
    FirstName,
    LastName,
    Username,
    Email,
    Phone,
    Address,
    Price,
    Description,
    Category,
    Brand,
    Rating,
    Stock,
    Color,
    Size,
    ImageUrl,
    Avatar,
    Url,
    Date,
    Boolean,
    Age,
    City,
    Country,
    Content,
    Comment,
    Tags,
    Status,
    Title,
    Word,
}

static COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+[A-Za-z]").expect("count regex"));

static ARRAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(list|array|multiple|all|collection)\b").expect("array regex"));

/// Keyword detectors, checked in order; first match per field name wins.
static DETECTORS: LazyLock<Vec<(Regex, &'static str, FieldKind)>> = LazyLock::new(|| {
    let detector = |pattern: &str, name: &'static str, kind: FieldKind| {
        (Regex::new(pattern).expect("field regex"), name, kind)
    };
    vec![
        detector(r"\bfirst\s*name\b", "firstName", FieldKind::FirstName),
        detector(r"\blast\s*name\b", "lastName", FieldKind::LastName),
        detector(r"\busername\b", "username", FieldKind::Username),
        detector(r"\b(name|title)\b", "name", FieldKind::Name),
        detector(r"\bemail\b", "email", FieldKind::Email),
        detector(r"\b(phone|mobile)\b", "phone", FieldKind::Phone),
        detector(r"\baddress\b", "address", FieldKind::Address),
        detector(r"\b(price|cost|amount)\b", "price", FieldKind::Price),
        detector(r"\b(description|desc)\b", "description", FieldKind::Description),
        detector(r"\bcategory\b", "category", FieldKind::Category),
        detector(r"\bbrand\b", "brand", FieldKind::Brand),
        detector(r"\b(rating|score)\b", "rating", FieldKind::Rating),
        detector(r"\b(stock|quantity)\b", "stock", FieldKind::Stock),
        detector(r"\bcolou?r\b", "color", FieldKind::Color),
        detector(r"\bsize\b", "size", FieldKind::Size),
        detector(r"\b(image|photo|picture|thumbnail)\b", "imageUrl", FieldKind::ImageUrl),
        detector(r"\bavatar\b", "avatar", FieldKind::Avatar),
        detector(r"\b(url|link|website)\b", "url", FieldKind::Url),
        detector(r"\b(date|created)\b", "createdAt", FieldKind::Date),
        detector(r"\bupdated\b", "updatedAt", FieldKind::Date),
        detector(r"\b(active|enabled)\b", "isActive", FieldKind::Boolean),
        detector(r"\b(available|in\s*stock)\b", "isAvailable", FieldKind::Boolean),
        detector(r"\bage\b", "age", FieldKind::Age),
        detector(r"\bcity\b", "city", FieldKind::City),
        detector(r"\bcountry\b", "country", FieldKind::Country),
        detector(r"\b(content|body|text)\b", "content", FieldKind::Content),
        detector(r"\bcomment\b", "comment", FieldKind::Comment),
        detector(r"\btags?\b", "tags", FieldKind::Tags),
        detector(r"\bstatus\b", "status", FieldKind::Status),
    ]
});

struct ParsedPrompt {
    count: usize,
    is_array: bool,
    fields: Vec<(&'static str, FieldKind)>,
}

/// Generate a canned JSON payload for the prompt.
pub fn generate_data(prompt: &str) -> Value {
    let parsed = parse_prompt(prompt);
    let mut rng = rand::thread_rng();

    if parsed.is_array {
        Value::Array(
            (0..parsed.count)
                .map(|i| generate_item(&parsed.fields, i, &mut rng))
                .collect(),
        )
    } else {
        generate_item(&parsed.fields, 0, &mut rng)
    }
}

fn parse_prompt(prompt: &str) -> ParsedPrompt {
    let lower = prompt.to_lowercase();

    let explicit_count = COUNT_RE
        .captures(&lower)
        .and_then(|c| c[1].parse::<usize>().ok())
        // an absurd count is treated as unspecified
        .filter(|&n| n >= 1 && n <= 100);

    let is_array = ARRAY_RE.is_match(&lower) || explicit_count.map_or(false, |n| n > 1);
    let count = explicit_count.unwrap_or(10);

    let mut fields: Vec<(&'static str, FieldKind)> = vec![("id", FieldKind::Id)];
    for (pattern, name, kind) in DETECTORS.iter() {
        if pattern.is_match(&lower) && !fields.iter().any(|(n, _)| n == name) {
            fields.push((name, *kind));
        }
    }
    for (name, kind) in entity_context_fields(&lower) {
        if !fields.iter().any(|(n, _)| *n == name) {
            fields.push((name, kind));
        }
    }
    // Nothing recognized at all: fall back to a generic record
    if fields.len() == 1 {
        fields.push(("name", FieldKind::Name));
        fields.push(("value", FieldKind::Word));
        fields.push(("createdAt", FieldKind::Date));
    }

    ParsedPrompt {
        count,
        is_array,
        fields,
    }
}

fn mentions_any(prompt: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| prompt.contains(k))
}

/// Sensible default fields for recognized entity types.
fn entity_context_fields(prompt: &str) -> Vec<(&'static str, FieldKind)> {
    if mentions_any(prompt, &["user", "person", "member", "customer"]) {
        return vec![
            ("firstName", FieldKind::FirstName),
            ("lastName", FieldKind::LastName),
            ("email", FieldKind::Email),
            ("avatar", FieldKind::Avatar),
            ("createdAt", FieldKind::Date),
        ];
    }
    if mentions_any(prompt, &["product", "item", "sneaker", "shoe", "merchandise"]) {
        return vec![
            ("name", FieldKind::Name),
            ("price", FieldKind::Price),
            ("description", FieldKind::Description),
            ("category", FieldKind::Category),
            ("imageUrl", FieldKind::ImageUrl),
            ("rating", FieldKind::Rating),
        ];
    }
    if mentions_any(prompt, &["post", "article", "blog"]) {
        return vec![
            ("title", FieldKind::Title),
            ("content", FieldKind::Content),
            ("author", FieldKind::Name),
            ("createdAt", FieldKind::Date),
            ("tags", FieldKind::Tags),
        ];
    }
    if mentions_any(prompt, &["order", "purchase", "transaction"]) {
        return vec![
            ("total", FieldKind::Price),
            ("status", FieldKind::Status),
            ("customerName", FieldKind::Name),
            ("createdAt", FieldKind::Date),
        ];
    }
    if mentions_any(prompt, &["comment", "review", "feedback"]) {
        return vec![
            ("author", FieldKind::Name),
            ("content", FieldKind::Comment),
            ("rating", FieldKind::Rating),
            ("createdAt", FieldKind::Date),
        ];
    }
    vec![]
}

const FIRST_NAMES: &[&str] = &[
    "Amara", "Liam", "Yuki", "Sofia", "Mateo", "Priya", "Noah", "Ingrid", "Kwame", "Elena",
];
const LAST_NAMES: &[&str] = &[
    "Okafor", "Chen", "Silva", "Novak", "Haddad", "Johansson", "Patel", "Moreau", "Tanaka", "Reyes",
];
const PRODUCT_WORDS: &[&str] = &[
    "Compact", "Ergonomic", "Sleek", "Rustic", "Modern", "Durable", "Premium", "Lightweight",
];
const PRODUCT_NOUNS: &[&str] = &[
    "Chair", "Lamp", "Keyboard", "Backpack", "Bottle", "Notebook", "Speaker", "Mug",
];
const CATEGORIES: &[&str] = &["Electronics", "Home", "Outdoors", "Clothing", "Books", "Toys"];
const COLORS: &[&str] = &["red", "blue", "green", "black", "white", "teal", "maroon"];
const SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];
const CITIES: &[&str] = &["Lagos", "Oslo", "Kyoto", "Lima", "Austin", "Porto", "Mumbai"];
const COUNTRIES: &[&str] = &["Nigeria", "Norway", "Japan", "Peru", "Brazil", "India", "Canada"];
const TAGS: &[&str] = &["tech", "lifestyle", "news", "sports", "business", "health"];
const STATUSES: &[&str] = &["pending", "processing", "shipped", "delivered", "cancelled"];
const WORDS: &[&str] = &[
    "aurora", "basalt", "cedar", "delta", "ember", "fjord", "garnet", "harbor",
];
const SENTENCES: &[&str] = &[
    "Crafted with attention to detail and built to last.",
    "A dependable everyday choice for work or travel.",
    "Thoughtfully designed with sustainable materials.",
    "Trusted by thousands of happy customers worldwide.",
];

fn generate_item(fields: &[(&'static str, FieldKind)], index: usize, rng: &mut impl Rng) -> Value {
    let mut item = Map::new();
    for (name, kind) in fields {
        item.insert((*name).to_string(), value_for(*kind, index, rng));
    }
    Value::Object(item)
}

fn pick(list: &[&str], rng: &mut impl Rng) -> String {
    list.choose(rng).copied().unwrap_or_default().to_string()
}

fn recent_date(rng: &mut impl Rng) -> String {
    let ago = Duration::minutes(rng.gen_range(0..60 * 24 * 30));
    (OffsetDateTime::now_utc() - ago)
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn value_for(kind: FieldKind, index: usize, rng: &mut impl Rng) -> Value {
    match kind {
        FieldKind::Id => json!(Uuid::new_v4().to_string()),
        FieldKind::Name => json!(format!(
            "{} {}",
            pick(PRODUCT_WORDS, rng),
            pick(PRODUCT_NOUNS, rng)
        )),
        FieldKind::FirstName => json!(pick(FIRST_NAMES, rng)),
        FieldKind::LastName => json!(pick(LAST_NAMES, rng)),
        FieldKind::Username => json!(format!(
            "{}{}",
            pick(FIRST_NAMES, rng).to_lowercase(),
            rng.gen_range(10..1000)
        )),
        FieldKind::Email => json!(format!(
            "{}.{}@example.com",
            pick(FIRST_NAMES, rng).to_lowercase(),
            pick(LAST_NAMES, rng).to_lowercase()
        )),
        FieldKind::Phone => json!(format!(
            "+1-555-{:03}-{:04}",
            rng.gen_range(100..1000),
            rng.gen_range(0..10000)
        )),
        FieldKind::Address => json!(format!(
            "{} {} Street",
            rng.gen_range(1..2000),
            pick(WORDS, rng)
        )),
        FieldKind::Price => {
            json!((rng.gen_range(10.0_f64..500.0) * 100.0).round() / 100.0)
        }
        FieldKind::Description => json!(pick(SENTENCES, rng)),
        FieldKind::Category => json!(pick(CATEGORIES, rng)),
        FieldKind::Brand => json!(format!("{} Co", pick(WORDS, rng))),
        FieldKind::Rating => json!((rng.gen_range(1.0_f64..5.0) * 10.0).round() / 10.0),
        FieldKind::Stock => json!(rng.gen_range(0..1000)),
        FieldKind::Color => json!(pick(COLORS, rng)),
        FieldKind::Size => json!(pick(SIZES, rng)),
        FieldKind::ImageUrl => json!(format!(
            "https://picsum.photos/640/480?random={}",
            index + 1
        )),
        FieldKind::Avatar => json!(format!("https://i.pravatar.cc/150?u={}", index + 1)),
        FieldKind::Url => json!(format!("https://{}.example.com", pick(WORDS, rng))),
        FieldKind::Date => json!(recent_date(rng)),
        FieldKind::Boolean => json!(rng.gen_bool(0.7)),
        FieldKind::Age => json!(rng.gen_range(18..80)),
        FieldKind::City => json!(pick(CITIES, rng)),
        FieldKind::Country => json!(pick(COUNTRIES, rng)),
        FieldKind::Content => json!(format!("{} {}", pick(SENTENCES, rng), pick(SENTENCES, rng))),
        FieldKind::Comment => json!(pick(SENTENCES, rng)),
        FieldKind::Tags => {
            let n = rng.gen_range(1..=4);
            let mut tags: Vec<&str> = TAGS.to_vec();
            tags.shuffle(rng);
            json!(tags.into_iter().take(n).collect::<Vec<_>>())
        }
        FieldKind::Status => json!(pick(STATUSES, rng)),
        FieldKind::Title => json!(format!(
            "The {} {}",
            pick(PRODUCT_WORDS, rng),
            pick(WORDS, rng)
        )),
        FieldKind::Word => json!(pick(WORDS, rng)),
    }
}

/// Structural JSON-schema-like descriptor of a value. Array item schema
/// comes from the first element.
pub fn generate_schema(data: &Value) -> Value {
    match data {
        Value::Array(items) => json!({
            "type": "array",
            "items": items.first().map(generate_schema).unwrap_or_else(|| json!({})),
        }),
        Value::Object(map) => {
            let properties: Map<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), generate_schema(v)))
                .collect();
            json!({ "type": "object", "properties": properties })
        }
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                json!({ "type": "integer" })
            } else {
                json!({ "type": "number" })
            }
        }
        Value::Bool(_) => json!({ "type": "boolean" }),
        Value::String(_) => json!({ "type": "string" }),
        Value::Null => json!({ "type": "null" }),
    }
}

fn prompt_words(prompt: &str) -> Vec<String> {
    prompt
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .map(str::to_string)
        .collect()
}

/// URL-safe slug: up to three meaningful prompt words plus a random
/// base-36 suffix that makes collisions practically impossible.
pub fn derive_slug(prompt: &str) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();

    let words = prompt_words(prompt);
    if words.is_empty() {
        return format!("mock-{}", suffix);
    }
    format!("{}-{}", words[..words.len().min(3)].join("-"), suffix)
}

/// Human-readable label: up to four meaningful prompt words, Title Cased.
pub fn derive_name(prompt: &str) -> String {
    let words = prompt_words(prompt);
    if words.is_empty() {
        return "Mock Endpoint".to_string();
    }
    words
        .into_iter()
        .take(4)
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => w,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
