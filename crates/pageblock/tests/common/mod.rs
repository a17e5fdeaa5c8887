//! Shared fixtures for integration tests: a temporary view tree with two
//! namespaces and the compiled bodies that go with it.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use pageblock::{Environment, DEFAULT_NAMESPACE};
use serde_json::Value;
use tempfile::TempDir;

/// Temporary view directories kept alive for the duration of a test.
pub struct Fixture {
    pub views: TempDir,
    pub another: TempDir,
    pub env: Environment,
}

fn write_view(base: &Path, relative: &str, contents: &str) {
    let path = base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

/// Build the standard view tree:
///
/// ```text
/// views/
///   base.html, simple-page.html, simple-page.block, only-block.block,
///   foo/bar/baz.html, escaping.html, getter.html, composer.html,
///   page-with-insert.html, page-complex.html, layout.html
/// another_views/
///   widget.html, widget-with-js.html
/// ```
pub fn fixture() -> Fixture {
    let views = tempfile::tempdir().unwrap();
    let another = tempfile::tempdir().unwrap();

    let v = views.path();
    write_view(v, "base.html", "base");
    write_view(v, "simple-page.html", "<h1>{{message}}</h1>");
    write_view(v, "simple-page.block", "<h1>{{message}}</h1>");
    write_view(v, "only-block.block", "only {{ message }}");
    write_view(v, "foo/bar/baz.html", "<h1>{{message}}</h1>");
    write_view(
        v,
        "getter.html",
        r#"<div>
    Name: {{ get(path="user.name", default="Unknown") }}
    <br/>
    City: {{ get(path="user.city.name", default="Unknown") }}
    <br/>
    Province: {{ get(path="user.province.name", default="Unknown") }}
</div>"#,
    );
    write_view(
        v,
        "composer.html",
        "<h1>{{ data_from_render | default(value=\"\") }} {{ data_from_composer }}</h1>",
    );
    // Compiled bodies replace these files' contents; they only need to exist.
    write_view(v, "escaping.html", "");
    write_view(v, "page-with-insert.html", "");
    write_view(v, "page-complex.html", "");
    write_view(v, "layout.html", "");

    let a = another.path();
    write_view(a, "widget.html", "<div>widget content</div>");
    write_view(a, "widget-with-js.html", "");

    let mut env = Environment::new();
    env.set_directory(v, DEFAULT_NAMESPACE);
    env.set_directory(a, "another");
    define_views(&mut env);

    Fixture {
        views,
        another,
        env,
    }
}

fn define_views(env: &mut Environment) {
    env.define("escaping", |ctx| {
        let html = ctx.text("html");
        let script = ctx.text("script");
        ctx.write("<div>\n");
        ctx.write_escaped(&html);
        ctx.write("\n");
        ctx.write_escaped(&script);
        ctx.write("\n</div>");
        Ok(())
    });

    env.define("page-with-insert", |ctx| {
        let title = ctx.text("title");
        ctx.write(&format!("<h1>{title}</h1>\n"));
        ctx.insert("another::widget", Value::Null)
    });

    env.define("another::widget-with-js", |ctx| {
        ctx.write("<h1>Widget with js</h1>\n");
        ctx.start("js");
        ctx.parent();
        ctx.write("<script src=\"b.js\"></script>\n");
        ctx.stop()?;
        Ok(())
    });

    env.define("page-complex", |ctx| {
        let title = ctx.data()["title"].clone();

        ctx.start("css");
        ctx.parent();
        ctx.write("<link href=\"b.css\"/>\n");
        ctx.stop()?;

        ctx.start("js");
        ctx.parent();
        ctx.write("<script>js.here()</script>\n");
        ctx.stop()?;

        ctx.start("sidebar");
        ctx.insert("another::widget-with-js", Value::Null)?;
        ctx.stop()?;

        ctx.start("content");
        ctx.write("page content\n");
        ctx.stop()?;

        ctx.insert("layout", serde_json::json!({ "title": title }))
    });

    env.define("layout", |ctx| {
        ctx.start("css");
        ctx.write("<link href=\"a.css\"/>\n");
        ctx.stop()?;

        ctx.start("js");
        ctx.write("<script src=\"a.js\"></script>\n");
        ctx.stop()?;

        let title = ctx.escape(&ctx.text("title"));
        let page = format!(
            "<html>\n<head>\n<title>{title}</title>\n{css}</head>\n<body>\n<h1>{title}</h1>\n\
             <div id=\"container\">\n<div id=\"sidebar\">\n{sidebar}</div>\n\
             <div id=\"content\">\n{content}</div>\n</div>\n{js}</body>\n</html>",
            css = ctx.block("css"),
            sidebar = ctx.block("sidebar"),
            content = ctx.block("content"),
            js = ctx.block("js"),
        );
        ctx.write(&page);
        Ok(())
    });
}

/// Collapse runs of whitespace so multi-line HTML can be compared loosely.
pub fn resolve_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn assert_output_similar(output: &str, expected: &str) {
    assert_eq!(resolve_whitespace(output), resolve_whitespace(expected));
}
