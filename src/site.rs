//! Public site assembly: navigation, slug resolution, the maintenance gate and
//! the full visitor-facing document around the page renderer.

use chrono::{Datelike, Utc};

use crate::models::ad::AdItem;
use crate::models::page::{Page, PageBackground};
use crate::models::site_config::{CallToAction, NavLink, SiteConfig};
use crate::models::user::User;
use crate::blocks::ROYAL_GRADIENT;
use crate::render::{css_value, html_escape, render_document, render_page, Locale, RenderContext};

pub fn page_href(page: &Page) -> String {
    format!("/{}", page.slug)
}

/// Header links: every non-hidden page, in stored order.
pub fn navigation(pages: &[Page]) -> Vec<NavLink> {
    pages
        .iter()
        .filter(|p| !p.is_hidden)
        .map(|p| NavLink {
            label: p.label.clone(),
            url: page_href(p),
        })
        .collect()
}

/// Page for a requested slug. An exact match wins even when hidden; otherwise the
/// first public page is shown. `None` means the site has nothing to show.
pub fn resolve_page<'a>(pages: &'a [Page], slug: Option<&str>) -> Option<&'a Page> {
    let wanted = slug.map(str::trim).filter(|s| !s.is_empty());
    if let Some(slug) = wanted {
        if let Some(page) = pages.iter().find(|p| p.slug == slug) {
            return Some(page);
        }
    }
    pages.iter().find(|p| !p.is_hidden)
}

/// Maintenance closes the site to everyone except administrators.
pub fn is_closed_for(config: &SiteConfig, viewer: Option<&User>) -> bool {
    config.maintenance_mode && !viewer.map(User::is_admin).unwrap_or(false)
}

fn render_cta(cta: &CallToAction, class: &str) -> String {
    if !cta.show || cta.label.trim().is_empty() {
        return String::new();
    }
    format!(
        "<a class=\"{}\" href=\"{}\" style=\"background:{};color:#020617;padding:.75rem 1.5rem;border-radius:9999px;font-weight:900\">{}</a>",
        class,
        html_escape(&cta.url),
        ROYAL_GRADIENT,
        html_escape(&cta.label)
    )
}

fn render_header(config: &SiteConfig, nav: &[NavLink], current: Option<&Page>) -> String {
    let position = if config.header_sticky { "sticky" } else { "relative" };
    let logo = if config.site_logo.trim().is_empty() {
        String::new()
    } else {
        format!(
            "<img class=\"site-logo\" src=\"{}\" alt=\"\" style=\"width:2.5rem;height:2.5rem;border-radius:.75rem\">",
            html_escape(&config.site_logo)
        )
    };
    let links: String = nav
        .iter()
        .map(|link| {
            let active = current
                .map(|p| page_href(p) == link.url)
                .unwrap_or(false);
            format!(
                "<a class=\"nav-link{}\" href=\"{}\">{}</a>",
                if active { " is-active" } else { "" },
                html_escape(&link.url),
                html_escape(&link.label)
            )
        })
        .collect();

    format!(
        "<header class=\"site-header header-{style}\" style=\"position:{position};top:0;z-index:50;display:flex;align-items:center;justify-content:space-between;gap:2rem;padding:1rem 2rem;backdrop-filter:blur(16px)\"><a class=\"site-brand\" href=\"/\" style=\"display:flex;align-items:center;gap:.75rem;color:inherit;font-weight:900\">{logo}<span>{name}</span></a><nav class=\"site-nav\" style=\"display:flex;gap:1.5rem\">{links}</nav>{cta}</header>",
        style = html_escape(&config.header_style),
        position = position,
        logo = logo,
        name = html_escape(&config.site_name),
        links = links,
        cta = render_cta(&config.header_cta, "header-cta"),
    )
}

fn render_footer(config: &SiteConfig) -> String {
    if !config.show_footer {
        return String::new();
    }
    let links: String = config
        .footer_links
        .iter()
        .map(|l| {
            format!(
                "<a class=\"footer-link\" href=\"{}\">{}</a>",
                html_escape(&l.url),
                html_escape(&l.label)
            )
        })
        .collect();
    format!(
        "<footer class=\"site-footer\" style=\"position:relative;z-index:1;padding:4rem 2rem;border-top:1px solid rgba(255,255,255,.05)\"><div class=\"container\"><p class=\"footer-text\">{text}</p><nav class=\"footer-links\" style=\"display:flex;gap:1.5rem;flex-wrap:wrap\">{links}</nav>{cta}<p class=\"footer-copy\">&copy; {year} {name}</p></div></footer>",
        text = html_escape(&config.footer_text),
        links = links,
        cta = render_cta(&config.footer_cta, "footer-cta"),
        year = Utc::now().year(),
        name = html_escape(&config.site_name),
    )
}

/// Sponsor strip above the footer. Inactive ads are never shown.
fn render_ads(ads: &[AdItem]) -> String {
    let cards: String = ads
        .iter()
        .filter(|ad| ad.is_active)
        .map(|ad| {
            format!(
                "<a class=\"site-ad\" href=\"{}\" rel=\"sponsored noopener\" target=\"_blank\" style=\"display:block;border-radius:1.5rem;overflow:hidden\"><img src=\"{}\" alt=\"{}\" style=\"width:100%;display:block\"></a>",
                html_escape(&ad.link),
                html_escape(&ad.image),
                html_escape(&ad.title)
            )
        })
        .collect();
    if cards.is_empty() {
        return String::new();
    }
    format!(
        "<aside class=\"site-ads\" style=\"position:relative;z-index:1;display:grid;grid-template-columns:repeat(auto-fit,minmax(16rem,1fr));gap:1.5rem;padding:2rem\">{}</aside>",
        cards
    )
}

fn maintenance_copy(locale: Locale) -> (&'static str, &'static str) {
    match locale {
        Locale::Ar => (
            "السفينة تحت الصيانة",
            "نقوم بتعزيز أنظمة الدفاع والهجوم. سنعود للسيطرة قريباً!",
        ),
        Locale::En => (
            "The ship is under maintenance",
            "We are reinforcing our defence systems. Back in command soon!",
        ),
    }
}

fn render_maintenance(ctx: &RenderContext, config: &SiteConfig) -> String {
    let (title, body) = maintenance_copy(ctx.locale);
    let html = format!(
        "<main class=\"maintenance\" style=\"min-height:100vh;display:flex;flex-direction:column;align-items:center;justify-content:center;text-align:center;padding:2rem\"><h1>{}</h1><p>{}</p><div class=\"maintenance-tag\" style=\"color:{}\">DOCKING PROTOCOL: ACTIVE</div></main>",
        title, body, css_value(&ctx.theme.primary)
    );
    render_document(ctx, &config.site_name, &html)
}

fn context_for(config: &SiteConfig, locale: Locale) -> RenderContext {
    let ctx = RenderContext::new(config.theme_colors(), locale);
    if config.global_font.trim().is_empty() {
        ctx
    } else {
        ctx.with_font(&config.global_font)
    }
}

/// Full visitor document for `slug`: header, page blocks, active ads, footer. Visitors
/// other than administrators get the maintenance screen while maintenance mode is on.
pub fn render_public_page(
    config: &SiteConfig,
    pages: &[Page],
    ads: &[AdItem],
    slug: Option<&str>,
    viewer: Option<&User>,
    locale: Locale,
) -> String {
    let ctx = context_for(config, locale);
    if is_closed_for(config, viewer) {
        return render_maintenance(&ctx, config);
    }

    let page = resolve_page(pages, slug);
    let nav = navigation(pages);
    let site_background = PageBackground::default();
    let (blocks, background) = match page {
        Some(p) => (p.blocks.as_slice(), &p.background),
        None => (&[][..], &site_background),
    };

    let mut body = render_header(config, &nav, page);
    body.push_str(&render_page(blocks, &ctx.theme, background, None));
    body.push_str(&render_ads(ads));
    body.push_str(&render_footer(config));

    let title = match page {
        Some(p) => format!("{} | {}", p.label, config.site_name),
        None => config.site_name.clone(),
    };
    render_document(&ctx, &title, &body)
}
