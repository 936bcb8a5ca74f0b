#![cfg(test)]

use std::collections::HashMap;

use crate::admin;
use crate::auth::{self, AuthError};
use crate::blocks::templates::instantiate;
use crate::blocks::{BlockKind, BlockPatch, BlockStyle, BlockType, LinkStyle, SmartLink};
use crate::db::{ADMIN_EMAIL, ADMIN_PASSWORD};
use crate::editor::{ops, PageEditor};
use crate::models::ad::AdItem;
use crate::models::asset::{Asset, AssetKind};
use crate::models::page::{Page, PageBackground};
use crate::models::site_config::ThemeColors;
use crate::models::user::{User, UserRole, UserStatus};
use crate::notice::NoticeLevel;
use crate::publish;
use crate::render::button::render_button;
use crate::render::page::{EMPTY_TITLE, EMPTY_BODY};
use crate::render::{render_block, render_page, Locale};
use crate::site::render_public_page;
use crate::store::sqlite::SqliteStore;
use crate::store::Store;

/// Atomic counter for unique shared-cache DB names so parallel tests don't collide.
static TEST_DB_COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(0);

/// Fresh in-memory store with migrations and seed data applied.
/// bcrypt cost 4 keeps the seeded admin hash fast in debug builds.
fn test_store() -> SqliteStore {
    let id = TEST_DB_COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    let store = SqliteStore::new_in_memory(&format!("crate_tests_{}", id))
        .expect("Failed to create test store")
        .with_bcrypt_cost(4);
    store.run_migrations().expect("Failed to run migrations");
    store.seed_defaults().expect("Failed to seed defaults");
    store
}

fn admin(store: &SqliteStore) -> User {
    store.user_get_by_email(ADMIN_EMAIL).unwrap()
}

fn sailor(store: &SqliteStore, name: &str) -> User {
    let session = auth::register(store, name, &format!("{}@sea.test", name), "secret1").unwrap();
    session.user
}

// ═══════════════════════════════════════════════════════════
// Seeding
// ═══════════════════════════════════════════════════════════

#[test]
fn seed_creates_home_admin_and_config() {
    let s = test_store();
    let pages = s.page_list_all();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].slug, "home");
    assert!(matches!(pages[0].blocks[0].kind, BlockKind::Hero));

    let admin = admin(&s);
    assert_eq!(admin.role, UserRole::Admin);
    assert_eq!(admin.status, UserStatus::Active);

    let config = s.site_config();
    assert_eq!(config.site_name, "Age of Hamour");
    assert!(!config.maintenance_mode);
}

#[test]
fn seed_is_idempotent() {
    let s = test_store();
    s.seed_defaults().unwrap();
    assert_eq!(s.page_count(), 1);
    assert_eq!(s.user_count(), 1);
    assert_eq!(s.asset_list_all().len(), 2);
}

#[test]
fn seed_fills_the_media_library_once() {
    let s = test_store();
    let ids: Vec<String> = s.asset_list_all().into_iter().map(|a| a.id).collect();
    assert_eq!(ids, vec!["ast_1", "ast_2"]);

    s.asset_delete("ast_1").unwrap();
    s.asset_delete("ast_2").unwrap();
    s.seed_defaults().unwrap();
    assert!(s.asset_list_all().is_empty());
    assert!(s.ad_list_all().is_empty());
}

// ═══════════════════════════════════════════════════════════
// Auth
// ═══════════════════════════════════════════════════════════

#[test]
fn admin_can_log_in() {
    let s = test_store();
    let session = auth::login(&s, "  Admin@Hamour.com ", ADMIN_PASSWORD).unwrap();
    assert_eq!(session.user.email, ADMIN_EMAIL);
    let current = auth::current_user(&s, Some(&session.token)).unwrap();
    assert_eq!(current.id, session.user.id);
    assert!(current.last_login_at.is_some());
}

#[test]
fn wrong_password_and_unknown_email_are_rejected() {
    let s = test_store();
    assert_eq!(
        auth::login(&s, ADMIN_EMAIL, "nope").unwrap_err(),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        auth::login(&s, "ghost@sea.test", ADMIN_PASSWORD).unwrap_err(),
        AuthError::InvalidCredentials
    );
}

#[test]
fn banned_user_cannot_log_in_and_loses_sessions() {
    let s = test_store();
    let session = auth::register(&s, "salem", "salem@sea.test", "secret1").unwrap();
    let boss = admin(&s);
    admin::toggle_user_ban(&s, &boss, session.user.id).unwrap();

    assert!(auth::current_user(&s, Some(&session.token)).is_none());
    assert_eq!(
        auth::login(&s, "salem@sea.test", "secret1").unwrap_err(),
        AuthError::AccountDisabled
    );
}

#[test]
fn register_validates_and_signs_in() {
    let s = test_store();
    assert!(matches!(
        auth::register(&s, " ", "a@sea.test", "secret1"),
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        auth::register(&s, "a", "not-an-email", "secret1"),
        Err(AuthError::Validation(_))
    ));
    assert!(matches!(
        auth::register(&s, "a", "a@sea.test", "123"),
        Err(AuthError::Validation(_))
    ));
    assert_eq!(
        auth::register(&s, "boss", "ADMIN@hamour.com", "secret1").unwrap_err(),
        AuthError::UserAlreadyExists
    );

    let session = auth::register(&s, "Nasser Ali", "Nasser@Sea.test", "secret1").unwrap();
    assert_eq!(session.user.email, "nasser@sea.test");
    assert_eq!(session.user.role, UserRole::User);
    assert!(session.user.avatar.contains("Nasser+Ali"));
    let current = auth::current_user(&s, Some(&session.token)).unwrap();
    assert_eq!(current.username, "Nasser Ali");
}

#[test]
fn logout_ends_the_session() {
    let s = test_store();
    let session = auth::login(&s, ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    auth::logout(&s, &session.token).unwrap();
    assert!(auth::current_user(&s, Some(&session.token)).is_none());
    assert!(auth::current_user(&s, None).is_none());
}

#[test]
fn expired_session_is_ignored() {
    let s = test_store();
    let id = admin(&s).id;
    s.session_create(id, "stale-token", "2000-01-01 00:00:00").unwrap();
    assert!(auth::current_user(&s, Some("stale-token")).is_none());
}

#[test]
fn profile_update_trims_and_requires_display_name() {
    let s = test_store();
    let user = sailor(&s, "fahad");
    assert!(matches!(
        auth::update_profile(&s, user.id, "   ", "x"),
        Err(AuthError::Validation(_))
    ));
    let updated = auth::update_profile(&s, user.id, "  Fahad the Bold ", " fb ").unwrap();
    assert_eq!(updated.display_name, "Fahad the Bold");
    assert_eq!(updated.nickname, "fb");
}

// ═══════════════════════════════════════════════════════════
// Admin console
// ═══════════════════════════════════════════════════════════

#[test]
fn plain_users_are_kept_out_of_the_console() {
    let s = test_store();
    let user = sailor(&s, "omar");
    assert_eq!(admin::list_users(&s, &user).unwrap_err(), AuthError::Forbidden);
    assert_eq!(admin::overview(&s, &user).unwrap_err(), AuthError::Forbidden);
    assert_eq!(admin::export_data(&s, &user).unwrap_err(), AuthError::Forbidden);
    assert_eq!(
        admin::toggle_user_ban(&s, &user, admin(&s).id).unwrap_err(),
        AuthError::Forbidden
    );
}

#[test]
fn admin_cannot_change_own_status() {
    let s = test_store();
    let boss = admin(&s);
    assert!(matches!(
        admin::update_user_status(&s, &boss, boss.id, UserStatus::Banned),
        Err(AuthError::Validation(_))
    ));
}

#[test]
fn toggle_ban_flips_back_and_forth() {
    let s = test_store();
    let boss = admin(&s);
    let user = sailor(&s, "khalid");
    let banned = admin::toggle_user_ban(&s, &boss, user.id).unwrap();
    assert_eq!(banned.status, UserStatus::Banned);
    let restored = admin::toggle_user_ban(&s, &boss, user.id).unwrap();
    assert_eq!(restored.status, UserStatus::Active);

    admin::update_user_status(&s, &boss, user.id, UserStatus::Suspended).unwrap();
    let reactivated = admin::toggle_user_ban(&s, &boss, user.id).unwrap();
    assert_eq!(reactivated.status, UserStatus::Active);
}

#[test]
fn overview_counts_users_and_pages() {
    let s = test_store();
    let boss = admin(&s);
    let user = sailor(&s, "majed");
    admin::toggle_user_ban(&s, &boss, user.id).unwrap();
    let mut hidden = ops::new_page("Vault");
    hidden.is_hidden = true;
    s.page_save(&hidden).unwrap();

    let o = admin::overview(&s, &boss).unwrap();
    assert_eq!(o.total_users, 2);
    assert_eq!(o.active_users, 1);
    assert_eq!(o.banned_users, 1);
    assert_eq!(o.staff_users, 1);
    assert_eq!(o.total_pages, 2);
    assert_eq!(o.hidden_pages, 1);
}

#[test]
fn config_update_rejects_unknown_keys_as_validation() {
    let s = test_store();
    let boss = admin(&s);
    let mut partial = HashMap::new();
    partial.insert("site_name".to_string(), "Hamour Fleet".to_string());
    partial.insert("bogus".to_string(), "1".to_string());
    assert!(matches!(
        admin::update_site_config(&s, &boss, &partial),
        Err(AuthError::Validation(_))
    ));
    assert_eq!(s.site_config().site_name, "Age of Hamour");

    partial.remove("bogus");
    let cfg = admin::update_site_config(&s, &boss, &partial).unwrap();
    assert_eq!(cfg.site_name, "Hamour Fleet");
}

#[test]
fn status_change_ends_sessions() {
    let s = test_store();
    let boss = admin(&s);
    let session = auth::register(&s, "nasser", "nasser@sea.test", "secret1").unwrap();
    assert_eq!(s.session_get_user_id(&session.token), Some(session.user.id));

    admin::update_user_status(&s, &boss, session.user.id, UserStatus::Suspended).unwrap();
    assert_eq!(s.session_get_user_id(&session.token), None);
}

#[test]
fn delete_page_is_admin_only_and_checks_the_id() {
    let s = test_store();
    let boss = admin(&s);
    let user = sailor(&s, "fahad");
    let news = ops::new_page("News");
    s.page_save(&news).unwrap();

    assert_eq!(
        admin::delete_page(&s, &user, &news.id).unwrap_err(),
        AuthError::Forbidden
    );
    assert!(matches!(
        admin::delete_page(&s, &boss, "page_missing"),
        Err(AuthError::Validation(_))
    ));
    admin::delete_page(&s, &boss, &news.id).unwrap();
    assert!(s.page_find_by_id(&news.id).is_none());
    assert_eq!(s.page_count(), 1);
}

#[test]
fn staff_manage_the_media_library() {
    let s = test_store();
    let boss = admin(&s);
    let user = sailor(&s, "yousef");
    let mut reef = Asset::new("Reef", "https://img.example/reef.jpg", AssetKind::Background);
    reef.category = Some("sea".into());

    assert_eq!(admin::list_assets(&s, &user).unwrap_err(), AuthError::Forbidden);
    assert_eq!(
        admin::save_asset(&s, &user, &reef).unwrap_err(),
        AuthError::Forbidden
    );

    let saved = admin::save_asset(&s, &boss, &reef).unwrap();
    assert_eq!(saved, reef);
    assert_eq!(admin::list_assets(&s, &boss).unwrap().len(), 3);

    reef.name = "Coral Reef".into();
    admin::save_asset(&s, &boss, &reef).unwrap();
    assert_eq!(s.asset_find_by_id(&reef.id).unwrap().name, "Coral Reef");
    assert_eq!(s.asset_list_all().len(), 3);

    let nameless = Asset::new("  ", "https://img.example/x.jpg", AssetKind::Icon);
    assert!(matches!(
        admin::save_asset(&s, &boss, &nameless),
        Err(AuthError::Validation(_))
    ));

    admin::delete_asset(&s, &boss, &reef.id).unwrap();
    assert!(s.asset_find_by_id(&reef.id).is_none());
    assert!(matches!(
        admin::delete_asset(&s, &boss, &reef.id),
        Err(AuthError::Validation(_))
    ));
}

#[test]
fn ads_are_admin_managed_and_toggle() {
    let s = test_store();
    let boss = admin(&s);
    let user = sailor(&s, "saud");
    let ad = AdItem::new("Pearl Divers", "/ads/pearl.png", "https://pearl.example");

    assert_eq!(admin::save_ad(&s, &user, &ad).unwrap_err(), AuthError::Forbidden);
    admin::save_ad(&s, &boss, &ad).unwrap();
    assert_eq!(s.ad_list_active().len(), 1);

    let paused = admin::toggle_ad(&s, &boss, &ad.id).unwrap();
    assert!(!paused.is_active);
    assert!(s.ad_list_active().is_empty());
    assert_eq!(admin::list_ads(&s, &boss).unwrap().len(), 1);

    let linkless = AdItem::new("No link", "/ads/x.png", "");
    assert!(matches!(
        admin::save_ad(&s, &boss, &linkless),
        Err(AuthError::Validation(_))
    ));

    admin::delete_ad(&s, &boss, &ad.id).unwrap();
    assert!(s.ad_list_all().is_empty());
    assert!(matches!(
        admin::toggle_ad(&s, &boss, &ad.id),
        Err(AuthError::Validation(_))
    ));
}

#[test]
fn export_includes_the_media_library() {
    let s = test_store();
    let boss = admin(&s);
    let dump = admin::export_data(&s, &boss).unwrap();
    let assets = dump["assets"].as_array().unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0]["id"], "ast_1");
    assert_eq!(assets[0]["type"], "gradient");
}

#[test]
fn export_leaves_out_password_hashes() {
    let s = test_store();
    let boss = admin(&s);
    let dump = admin::export_data(&s, &boss).unwrap();
    assert_eq!(dump["pages"].as_array().unwrap().len(), 1);
    assert_eq!(dump["users"].as_array().unwrap().len(), 1);
    assert!(dump["exportedAt"].is_string());
    let text = dump.to_string();
    assert!(!text.contains("password"));
    assert!(!text.contains(&boss.password_hash));
}

// ═══════════════════════════════════════════════════════════
// Editor against the store
// ═══════════════════════════════════════════════════════════

#[test]
fn editor_save_persists_the_whole_draft() {
    let s = test_store();
    let home = s.page_find_by_slug("home").unwrap();
    let mut editor = PageEditor::open(home);
    let faq = editor.add_block(BlockType::Faq);
    editor.set_label("Harbour");
    editor.save(&s).unwrap();

    let stored = s.page_find_by_id("home").unwrap();
    assert_eq!(stored.label, "Harbour");
    assert_eq!(stored.blocks.len(), 2);
    assert_eq!(stored.blocks[1].id, faq);
    assert_eq!(stored.blocks[1].kind.item_count(), 2);
    assert_eq!(editor.notice().unwrap().level, NoticeLevel::Success);
}

#[test]
fn duplicate_slug_fails_and_keeps_the_draft() {
    let s = test_store();
    let mut editor = PageEditor::open(ops::new_page("Other"));
    editor.add_block(BlockType::Divider);
    editor.set_slug("Home");
    assert_eq!(editor.draft().slug, "home");

    assert!(editor.save(&s).is_err());
    assert_eq!(editor.notice().unwrap().level, NoticeLevel::Error);
    assert_eq!(editor.draft().blocks.len(), 1);
    assert_eq!(s.page_count(), 1);

    editor.set_slug("other");
    editor.save(&s).unwrap();
    assert_eq!(s.page_count(), 2);
}

#[test]
fn one_bad_block_does_not_hide_the_page() {
    let s = test_store();
    let mut news = ops::new_page("News");
    news = ops::add_block(&news, BlockType::Hero).0;
    news = ops::add_block(&news, BlockType::Faq).0;
    s.page_save(&news).unwrap();

    let mut doc: serde_json::Value = serde_json::from_str(&news.to_document().unwrap()).unwrap();
    doc["blocks"][1]["style"]["textAlign"] = serde_json::json!("justify");
    doc["blocks"][0]["type"] = serde_json::json!("carousel");
    {
        let conn = s.pool.get().unwrap();
        conn.execute(
            "UPDATE pages SET document = ?1 WHERE id = ?2",
            rusqlite::params![doc.to_string(), news.id],
        )
        .unwrap();
    }

    let slugs: Vec<String> = s.page_list_all().into_iter().map(|p| p.slug).collect();
    assert_eq!(slugs, vec!["home", "news"]);
    let stored = s.page_find_by_slug("news").unwrap();
    assert_eq!(stored.blocks.len(), 1);
    assert_eq!(stored.blocks[0].kind.item_count(), 2);
}

#[test]
fn cancelled_edits_are_never_written() {
    let s = test_store();
    let mut editor = PageEditor::open(s.page_find_by_id("home").unwrap());
    editor.add_block(BlockType::Gallery);
    editor.cancel();
    assert_eq!(s.page_find_by_id("home").unwrap().blocks.len(), 1);
}

#[test]
fn hero_then_faq_then_remove_hero() {
    let mut editor = PageEditor::open(Page::new("p1", "Test", "test"));
    let hero = editor.add_block(BlockType::Hero);
    let faq = editor.add_block(BlockType::Faq);
    editor.select(&hero);
    editor.remove_block(&hero);

    let blocks = &editor.draft().blocks;
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].id, faq);
    match &blocks[0].kind {
        BlockKind::Faq(items) => assert_eq!(items.len(), 2),
        other => panic!("expected faq items, got {:?}", other),
    }
    assert!(editor.selected_block_id().is_none());
}

#[test]
fn features_grid_columns_render_without_touching_items() {
    let mut editor = PageEditor::open(Page::new("p1", "Test", "test"));
    let id = editor.add_block(BlockType::FeaturesGrid);
    let before = editor.selected_block().unwrap().kind.clone();
    let style = BlockStyle {
        grid_cols: Some(4),
        ..editor.selected_block().unwrap().style.clone()
    };
    assert!(editor.update_selected(&BlockPatch::style(style)));

    let block = editor.draft().block(&id).unwrap();
    assert_eq!(block.kind, before);
    let html = render_block(block, &ThemeColors::default());
    assert!(html.contains("data-cols=\"4\""));
}

// ═══════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════

#[test]
fn every_library_block_renders() {
    let theme = ThemeColors::default();
    let blocks: Vec<_> = BlockType::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| instantiate(*t, &format!("b{}", i)))
        .collect();
    for block in &blocks {
        assert!(!render_block(block, &theme).is_empty());
    }
    let html = render_page(&blocks, &theme, &PageBackground::default(), None);
    assert!(!html.contains("page-empty"));
}

#[test]
fn unspecialized_types_use_only_heading_and_actions() {
    for t in [BlockType::PricingTable, BlockType::CtaBar, BlockType::NewsTicker] {
        let mut block = instantiate(t, "b1");
        block.title = "Plans".to_string();
        block.subtitle = "Pick your fleet".to_string();
        block.content = "Hidden body copy".to_string();
        block.image = Some("https://img.example/plan.png".to_string());
        let html = render_block(&block, &ThemeColors::default());
        assert!(html.contains("Plans"), "{}", t.as_str());
        assert!(html.contains("Pick your fleet"), "{}", t.as_str());
        assert!(!html.contains("Hidden body copy"), "{}", t.as_str());
        assert!(!html.contains("img.example"), "{}", t.as_str());
    }
}

#[test]
fn custom_background_beats_outline() {
    let mut link = SmartLink::new("Join", "#join", LinkStyle::Outline);
    link.custom_bg = Some("#ff0000".to_string());
    let html = render_button(&link, &ThemeColors::default());
    assert!(html.contains("background:#ff0000;"));
    assert!(!html.contains("background:transparent"));
}

#[test]
fn empty_page_shows_construction_notice() {
    let html = render_page(&[], &ThemeColors::default(), &PageBackground::default(), None);
    assert!(html.contains(EMPTY_TITLE));
    assert!(html.contains(EMPTY_BODY));
}

// ═══════════════════════════════════════════════════════════
// Public site and publishing
// ═══════════════════════════════════════════════════════════

#[test]
fn maintenance_lets_only_admins_through() {
    let s = test_store();
    let mut partial = HashMap::new();
    partial.insert("maintenance_mode".to_string(), "true".to_string());
    s.site_config_update(&partial).unwrap();

    let config = s.site_config();
    let pages = s.page_list_all();
    let boss = admin(&s);
    let user = sailor(&s, "hamad");

    let visitor = render_public_page(&config, &pages, &[], Some("home"), None, Locale::Ar);
    assert!(visitor.contains("السفينة تحت الصيانة"));
    let member = render_public_page(&config, &pages, &[], Some("home"), Some(&user), Locale::Ar);
    assert!(member.contains("السفينة تحت الصيانة"));
    let captain = render_public_page(&config, &pages, &[], Some("home"), Some(&boss), Locale::Ar);
    assert!(!captain.contains("السفينة تحت الصيانة"));
    assert!(captain.contains("عصر الهامور"));
}

#[test]
fn export_writes_every_page_and_an_index() {
    let s = test_store();
    s.page_save(&ops::new_page("News")).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let report = publish::export_site(&s, dir.path(), Locale::En).unwrap();
    assert_eq!(report.files.len(), 3);
    assert!(dir.path().join("home.html").is_file());
    assert!(dir.path().join("news.html").is_file());
    let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains("dir=\"ltr\""));
    let news = std::fs::read_to_string(dir.path().join("news.html")).unwrap();
    assert!(news.contains("page-empty"));
}

#[test]
fn export_keeps_index_and_slug_pages_apart() {
    let s = test_store();
    let mut index_page = ops::new_page("Index");
    index_page.slug = "index".into();
    s.page_save(&index_page).unwrap();
    let mut nested = ops::new_page("Nested");
    nested.slug = "a/b".into();
    s.page_save(&nested).unwrap();
    let mut flat = ops::new_page("Flat");
    flat.slug = "a-b".into();
    s.page_save(&flat).unwrap();
    let dir = tempfile::tempdir().unwrap();

    let report = publish::export_site(&s, dir.path(), Locale::En).unwrap();
    assert_eq!(report.files.len(), 5);
    assert!(dir.path().join(format!("{}.html", index_page.id)).is_file());
    assert!(dir.path().join("a-b.html").is_file());
    assert!(dir.path().join(format!("{}.html", flat.id)).is_file());

    let index = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains("<title>الرئيسية | "));
}

#[test]
fn export_shows_only_active_ads() {
    let s = test_store();
    let live = AdItem::new("Pearl Divers", "/ads/pearl.png", "https://pearl.example");
    let mut paused = AdItem::new("Old Deal", "/ads/old.png", "https://old.example");
    paused.is_active = false;
    s.ad_save(&live).unwrap();
    s.ad_save(&paused).unwrap();
    let dir = tempfile::tempdir().unwrap();

    publish::export_site(&s, dir.path(), Locale::Ar).unwrap();
    let home = std::fs::read_to_string(dir.path().join("home.html")).unwrap();
    assert!(home.contains("https://pearl.example"));
    assert!(!home.contains("https://old.example"));
}
