//! Keyword-taxonomy product categorization
//!
//! A pure function of `(title, description, url)` and the taxonomy table.
//! Categories and their keywords are scanned in table order and the first
//! substring hit wins, so more specific categories belong earlier.

use serde::{Deserialize, Serialize};

/// One category and the keywords that select it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Category assigned when the haystack mentions a known retailer domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainFallback {
    pub host_contains: String,
    pub category: String,
}

/// Ordered category table plus fallbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTaxonomy {
    pub categories: Vec<CategoryRule>,
    pub domain_fallbacks: Vec<DomainFallback>,
    pub catch_all: String,
}

/// Assign exactly one category
pub fn classify<'a>(
    title: &str,
    description: &str,
    url: &str,
    taxonomy: &'a CategoryTaxonomy,
) -> &'a str {
    let haystack = format!("{} {} {}", title, description, url).to_lowercase();

    if let Some(rule) = taxonomy.categories.iter().find(|rule| {
        rule.keywords
            .iter()
            .any(|kw| !kw.is_empty() && haystack.contains(&kw.to_lowercase()))
    }) {
        return &rule.name;
    }

    taxonomy
        .domain_fallbacks
        .iter()
        .find(|fb| {
            !fb.host_contains.is_empty() && haystack.contains(&fb.host_contains.to_lowercase())
        })
        .map(|fb| fb.category.as_str())
        .unwrap_or(taxonomy.catch_all.as_str())
}

fn rule(name: &str, keywords: &[&str]) -> CategoryRule {
    CategoryRule {
        name: name.to_string(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        let categories = vec![
            rule(
                "Elektronik",
                &[
                    "dator", "laptop", "pc", "skärm", "monitor", "tangentbord", "keyboard", "mus",
                    "mouse", "headset", "hörlurar", "gpu", "grafikkort", "processor", "cpu", "ram",
                    "ssd", "hdd", "router", "modem", "usb", "hdmi", "kabel", "webcam", "mikrofon",
                    "högtalare", "speaker", "bluetooth", "wifi",
                ],
            ),
            rule(
                "Mobiltelefoner & Surfplattor",
                &[
                    "iphone", "samsung", "galaxy", "smartphone", "mobil", "telefon", "ipad",
                    "surfplatta", "tablet", "android", "ios", "xiaomi", "oneplus", "skal",
                    "skärmskydd", "laddare", "powerbank", "airpods", "earbuds",
                ],
            ),
            rule(
                "Gaming",
                &[
                    "playstation", "ps5", "ps4", "xbox", "nintendo", "switch", "steam",
                    "controller", "handkontroll", "gaming", "gamer", "spel", "game", "headset",
                    "mus", "keyboard", "stol", "gamingstol", "vr", "oculus",
                ],
            ),
            rule(
                "Hem & Hushåll",
                &[
                    "stekpanna", "kastrull", "köksredskap", "mixer", "blender", "köksbord", "stol",
                    "soffa", "säng", "gardin", "matta", "lampa", "belysning", "städ", "dammsugare",
                    "tvättmaskin", "torktumlare", "diskmaskin", "kyl", "frys", "micro", "ugn",
                    "kaffebryggare", "vattenkokare",
                ],
            ),
            rule(
                "Smart Hem",
                &[
                    "google home", "alexa", "smart", "wifi", "app", "fjärrkontroll", "philips hue",
                    "glödlampa led", "sensor", "termostat", "kamera", "larm", "dörrklocka", "nest",
                    "smarta", "automation", "iot",
                ],
            ),
            rule(
                "TV & Ljud",
                &[
                    "tv", "television", "soundbar", "receiver", "förstärkare", "amplifier",
                    "högtalare", "subwoofer", "streaming", "chromecast", "apple tv", "roku", "hdmi",
                    "bluray", "dvd", "projektor", "screen",
                ],
            ),
            rule(
                "Kamera & Foto",
                &[
                    "kamera", "camera", "canon", "nikon", "sony alpha", "objektiv", "lens",
                    "stativ", "tripod", "blixt", "flash", "gopro", "actionkamera", "dslr",
                    "mirrorless", "fotoutrustning", "filter", "minneskort",
                ],
            ),
            rule(
                "Sport & Fritid",
                &[
                    "cykel", "löpning", "gym", "fitness", "träning", "yoga", "matta", "hantlar",
                    "vikter", "springskor", "sportklocka", "garmin", "polar", "tält", "sovsäck",
                    "vandring", "fiske", "skidor", "snowboard",
                ],
            ),
            rule(
                "Kläder & Mode",
                &[
                    "tröja", "skjorta", "byxor", "jeans", "jacka", "skor", "sneakers", "klänning",
                    "väska", "ryggsäck", "klocka", "smycke", "ring", "halsband", "örhängen",
                    "solglasögon", "keps", "mössa", "halsduk",
                ],
            ),
            rule(
                "Böcker & Media",
                &[
                    "bok", "book", "roman", "kokbok", "lärobok", "pocket", "häftad", "inbunden",
                    "e-bok", "ljudbok", "tidning", "magasin", "serie", "manga", "comic", "vinyl",
                    "cd", "dvd", "bluray",
                ],
            ),
            rule(
                "Leksaker & Spel",
                &[
                    "leksak", "lego", "playmobil", "docka", "bil", "tåg", "pussel", "brädspel",
                    "sällskapsspel", "kortspel", "barn", "baby", "bebis", "nalle", "gosedjur",
                    "figur", "modell", "hobby",
                ],
            ),
            rule(
                "Trädgård & Utomhus",
                &[
                    "gräsklippare", "trimmer", "trädgård", "kruka", "växt", "frö", "grill",
                    "grillkol", "utemöbel", "parasoll", "trampolin", "pool", "pump", "slang",
                    "spade", "redskap", "verktyg",
                ],
            ),
            rule(
                "Verktyg & Bygg",
                &[
                    "borrmaskin", "skruvdragare", "såg", "hammare", "tång", "mejsel", "verktyg",
                    "toolbox", "bosch", "makita", "dewalt", "milwaukee", "batteri", "laddare",
                    "bits", "borr", "slipmaskin", "vinkelslip",
                ],
            ),
            rule(
                "Bil & Motor",
                &[
                    "biltvättat", "lackskydd", "motorolja", "filter", "däck", "fälg", "däcktryck",
                    "spolarvätska", "polish", "schampo", "däckhotell", "takbox", "cykelhållare",
                    "dashcam", "gps", "parkeringskamera",
                ],
            ),
            rule(
                "Musikinstrument",
                &[
                    "gitarr", "piano", "keyboard", "synth", "trummor", "drums", "bas", "fiol",
                    "trumpet", "saxofon", "mikrofon", "förstärkare", "amp", "pedal", "effekt",
                    "strängar", "plektrum", "ställ", "stativ", "mixer",
                ],
            ),
            rule(
                "Konst & Inredning",
                &[
                    "tavla", "poster", "print", "konst", "affisch", "canvas", "ram", "målning",
                    "foto", "bild", "väggdekoration", "konstnär", "galleri", "litografi", "tryck",
                    "grafik", "design", "inredning", "dekoration", "vase", "skulptur", "prydnad",
                    "väggprydnad",
                ],
            ),
        ];

        let domain_fallbacks = [
            ("webhallen.com", "Elektronik"),
            ("inet.se", "Elektronik"),
            ("komplett.se", "Elektronik"),
            ("amazon", "Övrigt"),
        ]
        .into_iter()
        .map(|(host, category)| DomainFallback {
            host_contains: host.to_string(),
            category: category.to_string(),
        })
        .collect();

        Self {
            categories,
            domain_fallbacks,
            catch_all: "Övrigt".to_string(),
        }
    }
}
