// Demo driver: build a page, cascade its styles, render it, click around.
use frontstage::{
    Document, Event, Renderer, Scene, StyleMap, StyleResolver, Stylesheet, TreeBuilder,
};
use std::io;
use std::rc::Rc;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Stock page, used when no scene file is given on the command line
const DEMO_SCENE: &str = r#"{
    "tree": {
        "type": "html",
        "children": [
            { "type": "head" },
            { "type": "body", "children": [
                { "type": "div", "children": [
                    { "type": "div", "children": [
                        { "type": "h1" }, { "type": "p" }, { "type": "p" }
                    ] },
                    { "type": "section", "children": [
                        { "type": "h1" }, { "type": "p" }, { "type": "p" }
                    ] }
                ] },
                { "type": "aside", "children": [
                    { "type": "h1" }, { "type": "p" }, { "type": "p" }
                ] }
            ] }
        ]
    },
    "rules": [
        { "selector": "body section", "style": { "color": "green", "size": 25 } },
        { "selector": "body", "style": { "background": "black" } },
        { "selector": "h1", "style": { "size": 50, "color": "red" } },
        { "selector": "aside h1", "style": { "size": 30 } }
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .without_time()
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let scene = match std::env::args().nth(1) {
        Some(path) => Scene::from_file(path)?,
        None => Scene::from_json(DEMO_SCENE)?,
    };

    let mut doc = TreeBuilder::new().build(&scene.tree)?;

    // inline style on body, the strongest cascade level
    if let Some(body) = doc.first_by_tag("body") {
        doc.set_own_style(body, "background", "red".into());
        doc.set_own_style(body, "color", "blue".into());
    }

    let resolver = StyleResolver::new(Stylesheet::from_defs(scene.rules));
    resolver.apply(&mut doc)?;

    println!("Style hierarchy:");
    for (depth, tag, style) in doc.style_hierarchy() {
        println!("{}{} {}", "  ".repeat(depth), tag, format_style(style));
    }

    println!();
    println!("Rendered page:");
    let stdout = io::stdout();
    Renderer::new().render(&doc, &mut stdout.lock())?;

    println!();
    demo_clicks(&mut doc)?;
    Ok(())
}

/// Registers a cancelling handler on the outer div and a plain one on
/// body, then clicks the first heading twice: once with the cancel in
/// place, once after `off` lets the click pass through.
fn demo_clicks(doc: &mut Document) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(h1), Some(div), Some(body)) = (
        doc.first_by_tag("h1"),
        doc.first_by_tag("div"),
        doc.first_by_tag("body"),
    ) else {
        return Ok(());
    };

    let div_tag = doc.tag(div).to_string();
    doc.on(
        div,
        "click",
        Rc::new(move |event: &Event| {
            println!("click consumed by <{}> (node {})", div_tag, event.current);
            false
        }),
    )?;

    let body_tag = doc.tag(body).to_string();
    doc.on(
        body,
        "click",
        Rc::new(move |event: &Event| {
            println!("click passed through <{}> (node {})", body_tag, event.current);
            true
        }),
    )?;

    println!("Clicking <{}> (node {}):", doc.tag(h1), h1);
    let reached_root = doc.dispatch_event(h1, "click");
    println!("  bubbled to the root: {}", reached_root);

    doc.off(div, "click");
    println!("Clicking <{}> again with the div handler off:", doc.tag(h1));
    let reached_root = doc.dispatch_event(h1, "click");
    println!("  bubbled to the root: {}", reached_root);
    Ok(())
}

/// Inline one-line rendering of a style map, keys sorted for stable output
fn format_style(style: &StyleMap) -> String {
    let mut entries: Vec<_> = style.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let body: Vec<String> = entries
        .iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect();
    format!("{{{}}}", body.join(", "))
}
