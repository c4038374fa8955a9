use anyhow::Result;
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wapi_fixtures::core::PageDefinitions;
use wapi_fixtures::{load_page_definitions, LocalStorage, PageRenderer, WapiError};

fn pages(value: serde_json::Value) -> PageDefinitions {
    serde_json::from_value(value).unwrap()
}

fn write_template(dir: &TempDir, source: &str) -> std::path::PathBuf {
    let path = dir.path().join("templates/base.html");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, source).unwrap();
    path
}

#[tokio::test]
async fn test_renders_one_file_per_page() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(&temp_dir, "<p>{{ greeting }}</p>");
    let output_dir = temp_dir.path().join("public");

    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    let written = renderer
        .render_all(&pages(json!({"home": {"title": "home", "greeting": "hi"}})))
        .await?;

    assert_eq!(written, vec!["pages/home.html".to_string()]);
    assert_eq!(fs::read_to_string(output_dir.join("pages/home.html"))?, "<p>hi</p>");
    Ok(())
}

#[tokio::test]
async fn test_title_names_the_file_and_overwrites() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(&temp_dir, "<h1>{{ title }}</h1>{{ body }}");
    let output_dir = temp_dir.path().join("public");
    fs::create_dir_all(output_dir.join("pages"))?;
    fs::write(output_dir.join("pages/Карта.html"), "stale")?;

    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    renderer
        .render_all(&pages(json!({
            "map": {"title": "Карта", "body": "<div id=\"map\"></div>"},
            "firm": {"title": "firm_card", "body": "<div class=\"firm\"></div>"}
        })))
        .await?;

    assert_eq!(
        fs::read_to_string(output_dir.join("pages/Карта.html"))?,
        "<h1>Карта</h1><div id=\"map\"></div>"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("pages/firm_card.html"))?,
        "<h1>firm_card</h1><div class=\"firm\"></div>"
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_template_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let output_dir = temp_dir.path().join("public");

    let renderer = PageRenderer::new(
        LocalStorage::new(&output_dir),
        temp_dir.path().join("templates/missing.html"),
    );
    let err = renderer
        .render_all(&pages(json!({"home": {"title": "home"}})))
        .await
        .unwrap_err();

    assert!(matches!(err, WapiError::IoError(_)));
    // 輸出目錄仍會先建立
    assert!(output_dir.join("pages").is_dir());
    assert_eq!(fs::read_dir(output_dir.join("pages"))?.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_title_aborts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(&temp_dir, "<p>{{ greeting }}</p>");
    let output_dir = temp_dir.path().join("public");

    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    let err = renderer
        .render_all(&pages(json!({"home": {"greeting": "hi"}})))
        .await
        .unwrap_err();

    assert!(matches!(err, WapiError::PageTitleError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_undefined_variable_renders_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(
        &temp_dir,
        "{% if greeting %}<p>{{ greeting }}</p>{% endif %}<h1>{{ title|upper }}</h1>{{ footer }}",
    );
    let output_dir = temp_dir.path().join("public");

    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    renderer
        .render_all(&pages(json!({
            "home": {"title": "home", "greeting": "hi"},
            "bare": {"title": "bare"}
        })))
        .await?;

    assert_eq!(
        fs::read_to_string(output_dir.join("pages/home.html"))?,
        "<p>hi</p><h1>HOME</h1>"
    );
    assert_eq!(fs::read_to_string(output_dir.join("pages/bare.html"))?, "<h1>BARE</h1>");
    Ok(())
}

#[tokio::test]
async fn test_render_error_aborts_remaining_pages() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(&temp_dir, "<ul>{% for item in menu %}<li>{{ item }}</li>{% endfor %}</ul>");
    let output_dir = temp_dir.path().join("public");

    // BTreeMap 依鍵排序："a_broken" 先於 "b_ok"
    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    let err = renderer
        .render_all(&pages(json!({
            "a_broken": {"title": "broken", "menu": 5},
            "b_ok": {"title": "ok", "menu": ["map"]}
        })))
        .await
        .unwrap_err();

    assert!(matches!(err, WapiError::TemplateError { .. }));
    assert!(err.to_string().contains("a_broken"));
    assert!(!output_dir.join("pages/ok.html").exists());
    Ok(())
}

#[tokio::test]
async fn test_template_syntax_error_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let template = write_template(&temp_dir, "{% if greeting %}<p>{{ greeting }}</p>");
    let output_dir = temp_dir.path().join("public");

    let renderer = PageRenderer::new(LocalStorage::new(&output_dir), &template);
    let err = renderer
        .render_all(&pages(json!({"home": {"title": "home", "greeting": "hi"}})))
        .await
        .unwrap_err();

    assert!(matches!(err, WapiError::TemplateError { .. }));
    assert_eq!(fs::read_dir(output_dir.join("pages"))?.count(), 0);
    Ok(())
}

#[test]
fn test_load_page_definitions_toml_and_json() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let toml_path = temp_dir.path().join("content.toml");
    fs::write(
        &toml_path,
        r#"
[home]
title = "home"
greeting = "hi"

[search]
title = "search"
zoom = 15
"#,
    )?;
    let from_toml = load_page_definitions(&toml_path)?;
    assert_eq!(from_toml.len(), 2);
    assert_eq!(from_toml["home"]["greeting"], "hi");
    assert_eq!(from_toml["search"]["zoom"], 15);

    let json_path = temp_dir.path().join("content.json");
    fs::write(&json_path, r#"{"home": {"title": "home", "greeting": "hi"}}"#)?;
    let from_json = load_page_definitions(&json_path)?;
    assert_eq!(from_json["home"]["title"], "home");

    let bad_path = temp_dir.path().join("content.py");
    fs::write(&bad_path, "pages = {}")?;
    assert!(load_page_definitions(&bad_path).is_err());
    Ok(())
}
