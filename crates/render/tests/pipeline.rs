use once_cell::sync::Lazy;
use xlog_render::{
    BatchInput, BatchOptions, DiagramMode, DiagramOptions, Pipeline, RenderOptions, render_markdown,
};

static DEFAULT: Lazy<Pipeline> = Lazy::new(Pipeline::default);

const POST: &str = "# Title\n```mermaid\ngraph TD; A-->B;\n```\n| a | b |\n|---|---|\n| 1 | 2 |\n";

// Fence mode emits the bare `pre` wrapper; no outer `div` is added.
#[test]
fn renders_post_with_defaults() {
    let post = DEFAULT.render(POST).unwrap();
    insta::assert_snapshot!(post.html, @r#"<h2 id="title">Title</h2><pre class="mermaid" data-diagram="mermaid">graph TD; A-->B;</pre><div class="table-wrapper"><table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table></div>"#);

    assert_eq!(post.headings.len(), 1);
    assert_eq!(post.headings[0].depth, 1);
    assert_eq!(post.headings[0].slug, "title");
    assert_eq!(post.headings[0].text, "Title");
}

#[test]
fn element_mode_promotes_diagram_blocks() {
    let options = RenderOptions {
        diagram: DiagramOptions {
            mode: DiagramMode::Element,
            ..DiagramOptions::default()
        },
        table_wrapper: None,
        ..RenderOptions::default()
    };
    let post = render_markdown(POST, &options).unwrap();
    insta::assert_snapshot!(post.html, @r#"<h2 id="title">Title</h2><mermaid><div class="language-mermaid">graph TD; A--&gt;B;</div></mermaid><table><thead><tr><th>a</th><th>b</th></tr></thead><tbody><tr><td>1</td><td>2</td></tr></tbody></table>"#);
}

#[test]
fn disabling_raw_html_falls_back_to_element_mode() {
    let options = RenderOptions {
        allow_raw_html: false,
        ..RenderOptions::default()
    };
    let post = render_markdown("```mermaid\nA-->B\n```\n\n<h1>Raw</h1>", &options).unwrap();
    insta::assert_snapshot!(post.html, @r#"<mermaid><div class="language-mermaid">A--&gt;B</div></mermaid><p>&lt;h1&gt;Raw&lt;/h1&gt;</p>"#);
}

#[test]
fn no_h1_survives_rendering() {
    let post = DEFAULT
        .render("# One\n\n<h1 class=\"raw\">Two</h1>\n\n## Three\n\n# Four")
        .unwrap();
    assert!(!post.html.contains("<h1"));
    assert!(!post.html.contains("</h1>"));
    assert_eq!(post.html.matches("<h2").count(), 4);
    assert!(post.html.contains("<h2 class=\"raw\">Two</h2>"));
}

#[test]
fn heading_demotion_can_be_disabled() {
    let options = RenderOptions {
        demote_headings: false,
        heading_ids: false,
        ..RenderOptions::default()
    };
    let post = render_markdown("# Kept\n\n<h1>Raw</h1>", &options).unwrap();
    insta::assert_snapshot!(post.html, @"<h1>Kept</h1><h1>Raw</h1>");
}

#[test]
fn table_wrapper_is_configurable() {
    let table = "| x |\n|:-:|\n| y |";

    let plain = render_markdown(
        table,
        &RenderOptions {
            table_wrapper: None,
            ..RenderOptions::default()
        },
    )
    .unwrap();
    insta::assert_snapshot!(plain.html, @r#"<table><thead><tr><th align="center">x</th></tr></thead><tbody><tr><td align="center">y</td></tr></tbody></table>"#);

    let custom = render_markdown(
        table,
        &RenderOptions {
            table_wrapper: Some("scroll".into()),
            ..RenderOptions::default()
        },
    )
    .unwrap();
    assert!(custom.html.starts_with("<div class=\"scroll\"><table>"));
    assert!(custom.html.ends_with("</table></div>"));
}

#[test]
fn diagram_fences_are_not_escaped() {
    let post = DEFAULT.render("```mermaid\na<b & c\n```").unwrap();
    assert_eq!(
        post.html,
        "<pre class=\"mermaid\" data-diagram=\"mermaid\">a<b & c</pre>"
    );
}

#[test]
fn options_from_json() {
    let options = RenderOptions::from_json(
        r#"{"tableWrapper": null, "diagram": {"mode": "off"}, "reading": {"wordsPerMinute": 2}}"#,
    )
    .unwrap();
    let post = render_markdown("```mermaid\nA\n```\n\none two three", &options).unwrap();
    insta::assert_snapshot!(post.html, @r#"<pre><code class="language-mermaid">A</code></pre><p>one two three</p>"#);
    assert_eq!(post.reading.minutes, 2);
}

#[test]
fn batch_renders_with_shared_pipeline() {
    let inputs = (0..16)
        .map(|i| BatchInput {
            id: format!("post-{}", i),
            source: format!("# Post {}\n\nbody", i),
        })
        .collect();
    let output = DEFAULT.render_batch(inputs, &BatchOptions::default());

    assert_eq!(output.stats.total, 16);
    assert_eq!(output.stats.succeeded, 16);
    assert_eq!(output.stats.failed, 0);
    for (i, result) in output.results.iter().enumerate() {
        assert_eq!(result.id, format!("post-{}", i));
        let post = result.result.as_ref().unwrap();
        assert_eq!(
            post.html,
            format!("<h2 id=\"post-{}\">Post {}</h2><p>body</p>", i, i)
        );
    }
}

#[test]
fn diagram_bodies_skip_the_heading_sweep() {
    let body = "graph TD; A[\"<h1>Big</h1>\"] --> B";
    let post = DEFAULT
        .render(&format!("<h1>Raw</h1>\n\n```mermaid\n{}\n```", body))
        .unwrap();
    assert_eq!(
        post.html,
        format!(
            "<h2>Raw</h2><pre class=\"mermaid\" data-diagram=\"mermaid\">{}</pre>",
            body
        )
    );
}

#[test]
fn diagram_only_posts_are_left_verbatim() {
    let body = "A[\"<h1>Big</h1>\"] --> B";
    let post = DEFAULT.render(&format!("```mermaid\n{}\n```", body)).unwrap();
    assert!(post.html.contains(body));
}

#[test]
fn ambiguous_raw_markup_still_renders() {
    let post = DEFAULT.render("<select><xmp>\n\n# Title").unwrap();
    assert!(post.html.ends_with("<h2 id=\"title\">Title</h2>"));
}
