//! Landing page view.

use askama::Template;
use askama_web::WebTemplate;

use crate::filters;

// =============================================================================
// Landing Content (static)
// =============================================================================

/// Anchor link in the landing page navigation bar.
#[derive(Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub anchor: &'static str,
}

/// Hero section content.
#[derive(Clone)]
pub struct Hero {
    pub title_lines: [&'static str; 2],
    pub subtitle: &'static str,
    pub image_url: &'static str,
    pub image_alt: &'static str,
}

/// A highlight card in the stats row.
#[derive(Clone)]
pub struct StatCard {
    pub stat: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// The "Our Heritage" story section.
#[derive(Clone)]
pub struct Story {
    pub heading: &'static str,
    pub paragraphs: [&'static str; 2],
    pub image_url: &'static str,
    pub image_alt: &'static str,
}

/// Footer contact details and links.
#[derive(Clone)]
pub struct Footer {
    pub tagline: &'static str,
    pub quick_links: &'static [&'static str],
    pub address_lines: [&'static str; 2],
    pub phone: &'static str,
    pub email: &'static str,
    pub socials: &'static [&'static str],
    pub newsletter_blurb: &'static str,
}

/// Everything the landing page shows besides the cart badge.
#[derive(Clone)]
pub struct LandingContent {
    pub nav_links: Vec<NavLink>,
    pub hero: Hero,
    pub stats: Vec<StatCard>,
    pub story: Story,
    pub footer: Footer,
}

impl Default for LandingContent {
    fn default() -> Self {
        Self {
            nav_links: vec![
                NavLink { label: "Home", anchor: "home" },
                NavLink { label: "Menu", anchor: "menu" },
                NavLink { label: "Our Story", anchor: "our-story" },
                NavLink { label: "Contact", anchor: "contact" },
            ],
            hero: Hero {
                title_lines: ["Ancient Ethiopian", "Coffee Excellence"],
                subtitle: "Journey through centuries of coffee heritage, from the mystical highlands \
                           of ancient Abyssinia to your cup",
                image_url: "https://images.unsplash.com/photo-1447933601403-0c6688de566e?auto=format&fit=crop&w=2000&q=80",
                image_alt: "Coffee beans background",
            },
            stats: vec![
                StatCard {
                    stat: "30+",
                    title: "Unique Blends",
                    description: "Carefully crafted coffee varieties",
                },
                StatCard {
                    stat: "100%",
                    title: "Organic",
                    description: "Pure Ethiopian highland coffee",
                },
                StatCard {
                    stat: "1200+",
                    title: "Years",
                    description: "Of coffee cultivation heritage",
                },
            ],
            story: Story {
                heading: "Our Heritage",
                paragraphs: [
                    "In the ancient lands of Abyssinia, now Ethiopia, our story begins with a legacy \
                     that spans over a millennium. From the mystical discovery of coffee by dancing \
                     goats to our modern-day artisanal roasting techniques, we carry forward the rich \
                     traditions of Ethiopian coffee cultivation.",
                    "Each bean we select tells a story of our highland terroir, careful cultivation, \
                     and generations of expertise in bringing you the finest coffee experience.",
                ],
                image_url: "https://images.unsplash.com/photo-1511537190424-bbbab87ac5eb?auto=format&fit=crop&w=1000&q=80",
                image_alt: "Ethiopian coffee farm",
            },
            footer: Footer {
                tagline: "Bringing the ancient coffee traditions of Ethiopia to the modern world, \
                          one carefully crafted cup at a time.",
                quick_links: &["About Us", "Our Coffee", "Visit Us", "Blog"],
                address_lines: ["Historic Coffee District", "Addis Ababa, Ethiopia"],
                phone: "+251 (123) 456-7890",
                email: "hello@abyssinia.coffee",
                socials: &["Instagram", "Facebook", "Twitter"],
                newsletter_blurb: "Subscribe to our newsletter for updates on new harvests and \
                                   special offers.",
            },
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// Base path prefix for links and form actions.
    pub base: String,
    pub nonce: String,
    /// Read-only cart badge.
    pub cart_count: u64,
    pub content: LandingContent,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn render(cart_count: u64) -> String {
        HomeTemplate {
            base: "/coffeestore".to_string(),
            nonce: "n0nce".to_string(),
            cart_count,
            content: LandingContent::default(),
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_home_renders_explore_action() {
        let html = render(0);
        assert!(html.contains("Coffee Excellence"));
        assert!(html.contains(r#"action="/coffeestore/navigate""#));
        assert!(html.contains(r#"value="explore_collection""#));
        assert!(html.contains("Explore Our Collection"));
    }

    #[test]
    fn test_home_renders_landing_sections() {
        let html = render(0);
        assert!(html.contains("Unique Blends"));
        assert!(html.contains("Our Heritage"));
        assert!(html.contains("hello@abyssinia.coffee"));
        assert!(html.contains(r#"nonce="n0nce""#));
    }

    #[test]
    fn test_badge_only_when_cart_has_items() {
        assert!(!render(0).contains("cart-badge"));
        assert!(render(3).contains("cart-badge"));
    }
}
