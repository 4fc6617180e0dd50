use std::sync::Arc;

use serde_json::json;
use sniffer::{
    ConfigManager, DocumentSnapshot, JsonGlobals, ResultValue, RuleCatalog, RuleLoader, Sniffer,
};

const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta name="generator" content="WordPress 5.2">
    <meta name="viewport" content="width=device-width">
    <link rel="stylesheet" href="/wp-content/themes/twentyten/style.css">
    <link rel='stylesheet' type='text/css' href='http://f.fontdeck.com/s/css/abc/site.css'>
    <script src="/wp-includes/js/jquery/jquery.js?ver=1.12.4"></script>
    <script src="/wp-content/plugins/piwik/piwik.js"></script>
</head>
<body></body>
</html>"#;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("sniffer=debug")
        .with_test_writer()
        .try_init();
}

fn page_globals() -> Arc<JsonGlobals> {
    Arc::new(JsonGlobals::new(json!({
        "jQuery": { "fn": { "jquery": "1.12.4" } },
        "_gat": { "_getTracker": {} },
        "Typekit": {}
    })))
}

#[test]
fn builtin_catalog_detects_page() -> anyhow::Result<()> {
    init_logging();
    let catalog = RuleCatalog::builtin(page_globals())?;
    let sniffer = Sniffer::new(Arc::new(catalog), DocumentSnapshot::from_html(PAGE));

    let table = sniffer.run()?;

    assert_eq!(
        serde_json::to_value(table)?,
        json!({
            "JavaScript Libraries": {
                "jQuery": "1.12.4",
                "jQuery UI": false,
                "Prototype": false,
                "Scriptaculous": false,
                "MooTools": false,
                "Glow": false
            },
            "Content Management System": { "Wordpress": "5.2" },
            "Analytics": {
                "Google Analytics": true,
                "Reinvigorate": false,
                "Piwik": false
            },
            "Fonts": {
                "Cufon": false,
                "Typekit": true,
                "Fontdeck": true
            }
        })
    );
    Ok(())
}

#[test]
fn wordpress_falls_back_to_stylesheet_link() -> anyhow::Result<()> {
    init_logging();
    let catalog = RuleCatalog::builtin(Arc::new(JsonGlobals::empty()))?;
    let snapshot = DocumentSnapshot::from_html(
        r#"<html><head><link rel="stylesheet" href="/wp-content/themes/x.css"></head></html>"#,
    );
    let sniffer = Sniffer::new(Arc::new(catalog), snapshot);

    let table = sniffer.run()?;
    assert_eq!(
        table.get("Content Management System", "Wordpress"),
        Some(&ResultValue::Present)
    );
    assert!(table.detected().iter().all(|t| t.name == "Wordpress"));
    Ok(())
}

#[test]
fn script_tests_respect_scan_toggle() -> anyhow::Result<()> {
    init_logging();
    let rules = r#"[{ "description": "JavaScript Libraries", "tests": {
        "Piwik": [{ "type": "script", "test": "piwik\\.js" }]
    } }]"#;
    let catalog = Arc::new(RuleLoader::from_json(rules, Arc::new(JsonGlobals::empty()))?);

    let first_only = Sniffer::new(Arc::clone(&catalog), DocumentSnapshot::from_html(PAGE));
    assert_eq!(
        first_only.run()?.get("JavaScript Libraries", "Piwik"),
        Some(&ResultValue::Absent)
    );

    let config = ConfigManager::custom().scan_all_scripts(true).build();
    let scan_all = Sniffer::with_config(catalog, DocumentSnapshot::from_html(PAGE), config);
    assert_eq!(
        scan_all.run()?.get("JavaScript Libraries", "Piwik"),
        Some(&ResultValue::Present)
    );
    Ok(())
}

#[test]
fn extended_catalog_is_merged_before_run() -> anyhow::Result<()> {
    let globals = page_globals();
    let mut catalog = RuleCatalog::builtin(globals.clone())?;
    let extra = r#"[{ "description": "Content Management System", "tests": {
        "Joomla": [{ "type": "meta", "test": { "name": "generator", "match": "Joomla!\\s?([\\d.]*)" } }]
    } }]"#;
    catalog.merge(RuleLoader::from_json(extra, globals)?);

    let snapshot = DocumentSnapshot::from_html(
        r#"<meta name="generator" content="Joomla! 3.9"><meta name="author" content="someone">"#,
    );
    let sniffer = Sniffer::new(Arc::new(catalog), snapshot);
    let table = sniffer.run()?;

    assert_eq!(
        table.get("Content Management System", "Joomla"),
        Some(&ResultValue::Version("3.9".to_string()))
    );
    assert_eq!(
        table.get("Content Management System", "Wordpress"),
        Some(&ResultValue::Absent)
    );
    Ok(())
}
