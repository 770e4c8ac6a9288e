// Copyright (c) The timeline-report Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use pulldown_cmark::{Options, Parser};
use std::error;
use swrite::{SWrite, swriteln};
use timeline_report::RenderHtml;

static MERMAID_JS: &str = "https://cdn.jsdelivr.net/npm/mermaid@10.9.1/dist/mermaid.min.js";
static VEGA_JS: &str = "https://cdn.jsdelivr.net/npm/vega@5";
static VEGA_LITE_JS: &str = "https://cdn.jsdelivr.net/npm/vega-lite@5";
static VEGA_EMBED_JS: &str = "https://cdn.jsdelivr.net/npm/vega-embed@6";

/// Converts the Markdown artifact into a standalone HTML document.
///
/// Chart blocks stay as fenced code in the document and are rendered
/// client-side: Mermaid picks up `language-mermaid` blocks, and a small
/// inline script feeds `language-vega-lite` blocks to vega-embed.
#[derive(Clone, Copy, Debug, Default)]
pub struct MermaidHtml;

impl RenderHtml for MermaidHtml {
    async fn render_html(
        &self,
        markdown: &str,
        title: &str,
    ) -> Result<String, Box<dyn error::Error + Send + Sync>> {
        let parser = Parser::new_ext(
            markdown,
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH,
        );
        let mut body = String::with_capacity(markdown.len() * 2);
        pulldown_cmark::html::push_html(&mut body, parser);

        let mut doc = String::with_capacity(body.len() + 1024);
        doc.push_str("<!DOCTYPE html>\n<html><head>\n");
        swriteln!(doc, "<title>{title}</title>");
        doc.push_str("<meta charset=\"utf-8\">\n");
        doc.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        for src in [MERMAID_JS, VEGA_JS, VEGA_LITE_JS, VEGA_EMBED_JS] {
            swriteln!(doc, "<script src=\"{src}\"></script>");
        }
        doc.push_str("<style>\n  body {\n    margin-left:30px;\n  }\n</style>\n");
        doc.push_str("</head>\n<body>\n");
        doc.push_str(&body);
        doc.push_str(concat!(
            "<script>\n",
            "  mermaid.initialize({ startOnLoad: false });\n",
            "  mermaid.run({ querySelector: '.language-mermaid' });\n",
            "  document.querySelectorAll('code.language-vega-lite').forEach((block) => {\n",
            "    const holder = document.createElement('div');\n",
            "    const spec = JSON.parse(block.textContent);\n",
            "    block.closest('pre').replaceWith(holder);\n",
            "    vegaEmbed(holder, spec, { actions: false });\n",
            "  });\n",
            "</script>\n",
            "</body></html>\n",
        ));
        Ok(doc)
    }
}
