//! Maps resolved metadata onto the `<head>` fields the page layer renders.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::seo::ResolvedMetadata;

const OPEN_GRAPH_TYPE: &str = "website";
const TWITTER_CARD: &str = "summary_large_image";
const MANIFEST_PATH: &str = "/site.webmanifest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct IconLink {
    pub url: String,
    pub sizes: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct IconSet {
    pub icon: Vec<IconLink>,
    pub apple: Vec<IconLink>,
}

impl Default for IconSet {
    fn default() -> Self {
        let png = |url: &str, sizes: &str| IconLink {
            url: url.to_string(),
            sizes: sizes.to_string(),
            mime_type: Some("image/png".to_string()),
        };
        Self {
            icon: vec![
                png("/favicon-32x32.png", "32x32"),
                png("/favicon-16x16.png", "16x16"),
            ],
            apple: vec![IconLink {
                url: "/apple-touch-icon.png".to_string(),
                sizes: "180x180".to_string(),
                mime_type: None,
            }],
        }
    }
}

/// Everything a page needs in its document head
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct PageHead {
    pub title: String,
    pub description: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub icons: IconSet,
    pub manifest: String,
}

impl From<ResolvedMetadata> for PageHead {
    fn from(resolved: ResolvedMetadata) -> Self {
        // No image: leave the list empty so the platform picks its own default.
        let images: Vec<String> = resolved.og_image.into_iter().collect();

        Self {
            open_graph: OpenGraph {
                title: resolved.title.clone(),
                description: resolved.description.clone(),
                images: images.clone(),
                kind: OPEN_GRAPH_TYPE.to_string(),
            },
            twitter: TwitterCard {
                card: TWITTER_CARD.to_string(),
                title: resolved.title.clone(),
                description: resolved.description.clone(),
                images,
            },
            title: resolved.title,
            description: resolved.description,
            icons: IconSet::default(),
            manifest: MANIFEST_PATH.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_head_mirrors_metadata_into_social_tags() {
        let head = PageHead::from(ResolvedMetadata {
            title: "Contact | Serendia Gems".to_string(),
            description: "Visit our Ratnapura studio".to_string(),
            og_image: Some("/hero/hero.jpeg".to_string()),
        });

        assert_eq!(head.open_graph.title, "Contact | Serendia Gems");
        assert_eq!(head.twitter.description, "Visit our Ratnapura studio");
        assert_eq!(head.open_graph.images, vec!["/hero/hero.jpeg"]);
        assert_eq!(head.twitter.card, "summary_large_image");
        assert_eq!(head.manifest, "/site.webmanifest");

        let json = serde_json::to_value(&head).unwrap();
        assert_eq!(json["openGraph"]["type"], "website");
        assert_eq!(json["icons"]["icon"][0]["type"], "image/png");
        assert!(json["icons"]["apple"][0].get("type").is_none());
    }

    #[test]
    fn test_missing_image_yields_empty_image_lists() {
        let head = PageHead::from(ResolvedMetadata {
            title: "Star Ruby | Serendia Gems".to_string(),
            description: "Luxury gemstone from Serendia Gems.".to_string(),
            og_image: None,
        });

        assert!(head.open_graph.images.is_empty());
        assert!(head.twitter.images.is_empty());
    }
}
