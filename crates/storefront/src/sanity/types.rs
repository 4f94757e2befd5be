//! Content types read from Sanity.
//!
//! Deserialized from the camelCase GROQ projections in `sanity::queries`,
//! serialized snake_case for the storefront API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved Sanity image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanityImage {
    pub url: String,
    pub alt: Option<String>,
}

/// Turns `image-<id>-<w>x<h>-<ext>` asset references into CDN URLs.
#[derive(Debug, Clone)]
pub struct ImageResolver {
    project_id: String,
    dataset: String,
}

impl ImageResolver {
    #[must_use]
    pub fn new(project_id: &str, dataset: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            dataset: dataset.to_string(),
        }
    }

    /// CDN URL for an asset reference, or `None` if it is not an image ref.
    #[must_use]
    pub fn url(&self, reference: &str) -> Option<String> {
        let rest = reference.strip_prefix("image-")?;
        let (id_and_size, ext) = rest.rsplit_once('-')?;
        if id_and_size.is_empty() || ext.is_empty() {
            return None;
        }
        Some(format!(
            "https://cdn.sanity.io/images/{}/{}/{id_and_size}.{ext}",
            self.project_id, self.dataset
        ))
    }

    fn resolve(&self, reference: Option<&str>, alt: Option<String>) -> Option<SanityImage> {
        reference
            .and_then(|r| self.url(r))
            .map(|url| SanityImage { url, alt })
    }
}

/// Implemented by content types that carry image references.
pub trait ResolveImages {
    fn resolve_images(&mut self, resolver: &ImageResolver);
}

impl<T: ResolveImages> ResolveImages for Vec<T> {
    fn resolve_images(&mut self, resolver: &ImageResolver) {
        for item in self {
            item.resolve_images(resolver);
        }
    }
}

impl<T: ResolveImages> ResolveImages for Option<T> {
    fn resolve_images(&mut self, resolver: &ImageResolver) {
        if let Some(item) = self {
            item.resolve_images(resolver);
        }
    }
}

// =============================================================================
// Taxonomy
// =============================================================================

/// A product category managed in the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Category {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_alt: Option<String>,
    #[serde(default, skip_deserializing)]
    pub image: Option<SanityImage>,
    /// Shopify collection holding this category's products.
    pub shopify_collection_handle: Option<String>,
}

impl ResolveImages for Category {
    fn resolve_images(&mut self, resolver: &ImageResolver) {
        self.image = resolver.resolve(self.image_ref.as_deref(), self.image_alt.take());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkinConcern {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

// =============================================================================
// Page content
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct HomepageContent {
    pub hero_title: String,
    pub hero_subtitle: Option<String>,
    #[serde(default, skip_serializing)]
    pub hero_image_ref: Option<String>,
    #[serde(default, skip_serializing)]
    pub hero_image_alt: Option<String>,
    #[serde(default, skip_deserializing)]
    pub hero_image: Option<SanityImage>,
    pub hero_cta_label: Option<String>,
    pub hero_cta_link: Option<String>,
    #[serde(default)]
    pub featured_product_handles: Vec<String>,
    #[serde(default)]
    pub sections: Vec<HomepageSection>,
}

impl ResolveImages for HomepageContent {
    fn resolve_images(&mut self, resolver: &ImageResolver) {
        self.hero_image =
            resolver.resolve(self.hero_image_ref.as_deref(), self.hero_image_alt.take());
    }
}

/// A block in the homepage body, e.g. `textBlock` or `ingredientSpotlight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomepageSection {
    pub key: String,
    pub kind: String,
    pub heading: Option<String>,
    pub body: Option<String>,
    pub link: Option<String>,
}

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub message: Option<String>,
    pub link: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_ref: Option<String>,
    #[serde(default, skip_serializing)]
    pub image_alt: Option<String>,
    #[serde(default, skip_deserializing)]
    pub image: Option<SanityImage>,
    #[serde(default)]
    pub active: bool,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Display date for the end of the promotion, e.g. `Jan 5, 2026`.
    #[serde(default, skip_deserializing)]
    pub ends_on: Option<String>,
}

impl Banner {
    /// Active and inside its schedule. Open-ended on a missing date; the
    /// end date is exclusive.
    #[must_use]
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.start_date.is_none_or(|start| start <= now)
            && self.end_date.is_none_or(|end| now < end)
    }
}

impl ResolveImages for Banner {
    fn resolve_images(&mut self, resolver: &ImageResolver) {
        self.image = resolver.resolve(self.image_ref.as_deref(), self.image_alt.take());
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub platform: String,
    pub url: String,
}

/// Site-wide copy shown in the header and footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct GlobalContent {
    pub site_name: String,
    pub announcement: Option<String>,
    pub footer_text: Option<String>,
    #[serde(default)]
    pub social_links: Vec<SocialLink>,
    pub contact_email: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn resolver() -> ImageResolver {
        ImageResolver::new("abc123", "production")
    }

    #[test]
    fn test_image_url_from_reference() {
        assert_eq!(
            resolver().url("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg"),
            Some(
                "https://cdn.sanity.io/images/abc123/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
                    .to_string()
            )
        );
        assert_eq!(resolver().url("file-abc-pdf"), None);
        assert_eq!(resolver().url("image-"), None);
    }

    #[test]
    fn test_category_deserialize_and_resolve() {
        let mut category: Category = serde_json::from_value(serde_json::json!({
            "id": "cat-serums",
            "title": "Serums",
            "slug": "serums",
            "description": null,
            "imageRef": "image-a1b2-800x800-png",
            "imageAlt": "Serum bottles",
            "shopifyCollectionHandle": "serums"
        }))
        .unwrap();
        category.resolve_images(&resolver());

        let image = category.image.clone().unwrap();
        assert!(image.url.ends_with("/a1b2-800x800.png"));
        assert_eq!(image.alt.as_deref(), Some("Serum bottles"));

        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("image_ref").is_none());
        assert_eq!(json["shopify_collection_handle"], "serums");
    }

    #[test]
    fn test_banner_schedule() {
        let now = Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap();
        let mut banner = Banner {
            id: "b1".to_string(),
            title: "Summer sale".to_string(),
            message: None,
            link: None,
            image_ref: None,
            image_alt: None,
            image: None,
            active: true,
            start_date: None,
            end_date: None,
            ends_on: None,
        };
        assert!(banner.is_live(now));

        banner.start_date = Some(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap());
        assert!(!banner.is_live(now));

        banner.start_date = Some(Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap());
        banner.end_date = Some(now);
        assert!(!banner.is_live(now));

        banner.end_date = None;
        banner.active = false;
        assert!(!banner.is_live(now));
    }
}
