//! 嗅探一段示例页面并输出 JSON 结果
//! 运行：RUST_LOG=sniffer=debug cargo run --example sniff_demo

use std::sync::Arc;

use serde_json::json;
use sniffer::{DocumentSnapshot, JsonGlobals, RuleCatalog, Sniffer};
use tracing_subscriber::EnvFilter;

const SAMPLE_HTML: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta name="generator" content="WordPress 6.4.2">
    <link rel="stylesheet" href="/wp-content/themes/astra/style.css">
    <script src="/wp-includes/js/jquery/jquery.min.js?ver=3.7.1"></script>
</head>
<body></body>
</html>"#;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // 宿主环境中读取到的 window 全局对象
    let globals = JsonGlobals::new(json!({
        "jQuery": { "fn": { "jquery": "3.7.1" }, "ui": { "version": "1.13.2" } },
        "Typekit": {}
    }));

    let catalog = RuleCatalog::builtin(Arc::new(globals))?;
    let sniffer = Sniffer::new(Arc::new(catalog), DocumentSnapshot::from_html(SAMPLE_HTML));

    let table = sniffer.run()?;
    println!("{}", serde_json::to_string_pretty(table)?);

    for tech in table.detected() {
        println!("[{}] {}", tech.category, tech);
    }
    Ok(())
}
