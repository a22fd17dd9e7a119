use serde::Serialize;

pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Destination keywords in lookup order. Partial matches take the first entry
/// that qualifies, so more specific cities come before their fallbacks.
pub const DESTINATION_KEYWORDS: &[(&str, &str)] = &[
    ("paris", "/images/Paris.jpeg"),
    ("london", "/images/London.jpeg"),
    ("edinburgh", "/images/Edinburgh.jpeg"),
    ("rome", PLACEHOLDER_IMAGE),
    ("barcelona", PLACEHOLDER_IMAGE),
    ("amsterdam", PLACEHOLDER_IMAGE),
    ("tokyo", "/images/Tokyo.jpeg"),
    ("kyoto", "/images/Tokyo.jpeg"),
    ("osaka", "/images/Tokyo.jpeg"),
    ("seoul", PLACEHOLDER_IMAGE),
    ("bangkok", PLACEHOLDER_IMAGE),
    ("newyork", PLACEHOLDER_IMAGE),
    ("losangeles", PLACEHOLDER_IMAGE),
    ("chicago", PLACEHOLDER_IMAGE),
    ("sanfrancisco", PLACEHOLDER_IMAGE),
    ("sydney", PLACEHOLDER_IMAGE),
    ("dubai", PLACEHOLDER_IMAGE),
    ("singapore", PLACEHOLDER_IMAGE),
    ("istanbul", PLACEHOLDER_IMAGE),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AvailableImage {
    pub name: &'static str,
    pub path: &'static str,
}

pub fn available_images() -> &'static [AvailableImage] {
    const IMAGES: &[AvailableImage] = &[
        AvailableImage {
            name: "Paris",
            path: "/images/Paris.jpeg",
        },
        AvailableImage {
            name: "Tokyo",
            path: "/images/Tokyo.jpeg",
        },
        AvailableImage {
            name: "London",
            path: "/images/London.jpeg",
        },
        AvailableImage {
            name: "Edinburgh",
            path: "/images/Edinburgh.jpeg",
        },
        AvailableImage {
            name: "Custom",
            path: PLACEHOLDER_IMAGE,
        },
    ];
    IMAGES
}

/// Picks a static image for a free-text destination name, falling back to the
/// placeholder when nothing in the keyword table matches.
pub fn destination_image(name: &str) -> &'static str {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return PLACEHOLDER_IMAGE;
    }

    if let Some((_, path)) = DESTINATION_KEYWORDS
        .iter()
        .find(|(keyword, _)| *keyword == normalized)
    {
        return *path;
    }

    DESTINATION_KEYWORDS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword) || keyword.contains(normalized.as_str()))
        .map(|(_, path)| *path)
        .unwrap_or(PLACEHOLDER_IMAGE)
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
