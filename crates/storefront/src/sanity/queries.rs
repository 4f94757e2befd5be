//! GROQ queries.
//!
//! Projections rename Sanity's fields to the shapes in `sanity::types` so
//! deserialization stays flat. Image fields are projected as the raw asset
//! reference and resolved to CDN URLs afterwards.

pub const CATEGORIES: &str = r#"*[_type == "category"] | order(title asc) {
  "id": _id,
  title,
  "slug": slug.current,
  description,
  "imageRef": image.asset._ref,
  "imageAlt": image.alt,
  shopifyCollectionHandle
}"#;

pub const CATEGORY_BY_SLUG: &str = r#"*[_type == "category" && slug.current == $slug][0] {
  "id": _id,
  title,
  "slug": slug.current,
  description,
  "imageRef": image.asset._ref,
  "imageAlt": image.alt,
  shopifyCollectionHandle
}"#;

pub const SKIN_CONCERNS: &str = r#"*[_type == "skinConcern"] | order(title asc) {
  "id": _id,
  title,
  "slug": slug.current,
  description,
  icon
}"#;

pub const HOMEPAGE: &str = r#"*[_type == "homepage"][0] {
  heroTitle,
  heroSubtitle,
  "heroImageRef": heroImage.asset._ref,
  "heroImageAlt": heroImage.alt,
  heroCtaLabel,
  heroCtaLink,
  "featuredProductHandles": coalesce(featuredProducts[].handle, []),
  "sections": coalesce(sections[] {
    "key": _key,
    "kind": _type,
    heading,
    body,
    link
  }, [])
}"#;

/// Active flag is checked here; the date window is checked in Rust so the
/// cached result does not go stale at a boundary.
pub const BANNERS: &str = r#"*[_type == "banner" && active == true] | order(startDate desc) {
  "id": _id,
  title,
  message,
  link,
  "imageRef": image.asset._ref,
  "imageAlt": image.alt,
  active,
  startDate,
  endDate
}"#;

pub const GLOBAL_CONTENT: &str = r#"*[_type == "globalContent"][0] {
  siteName,
  announcement,
  footerText,
  "socialLinks": coalesce(socialLinks[] { platform, url }, []),
  contactEmail
}"#;
