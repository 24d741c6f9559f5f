//! HTML serialization of [`VNode`] trees

use serde::{Deserialize, Serialize};

use crate::VNode;

/// Options for HTML output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HtmlOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
    /// Inside `<pre>`: whitespace is content, so no formatting
    preformatted: usize,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
            preformatted: 0,
        }
    }

    fn pretty(&self) -> bool {
        self.options.pretty && self.preformatted == 0
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.pretty() {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.pretty() {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize a node tree to HTML
pub fn to_html(node: &VNode, options: &HtmlOptions) -> String {
    to_html_fragment(std::slice::from_ref(node), options)
}

/// Serialize sibling nodes to HTML
pub fn to_html_fragment(nodes: &[VNode], options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in nodes {
        write_node(node, &mut ctx);
    }
    ctx.get_output()
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
        } => write_element(tag, attributes, children, ctx),

        VNode::Text { content } => ctx.add_line(&escape_html(content)),

        // Raw markup is never reflowed; it may hold <pre> or inline spacing
        VNode::Html { content } => {
            if ctx.pretty() {
                ctx.add_indent();
            }
            ctx.add(content);
            if !content.ends_with('\n') {
                ctx.newline();
            }
        }

        VNode::Module { request, block_id } => ctx.add_line(&format!(
            "<div class=\"module-slot\" data-module=\"{}\" data-block-id=\"{}\"></div>",
            request.kind(),
            escape_html(block_id)
        )),

        VNode::Placeholder { kind, message } => ctx.add_line(&format!(
            "<div class=\"block-placeholder\" role=\"note\" data-kind=\"{}\">{}</div>",
            escape_html(kind),
            escape_html(message)
        )),
    }
}

fn write_element(
    tag: &str,
    attributes: &std::collections::BTreeMap<String, String>,
    children: &[VNode],
    ctx: &mut Context,
) {
    let mut open = format!("<{}", tag);
    for (name, value) in attributes {
        open.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
    }

    if is_void(tag) {
        open.push('>');
        ctx.add_line(&open);
        return;
    }
    open.push('>');

    // Leaf text stays on one line: <h1>Title</h1>
    if let [VNode::Text { content }] = children {
        ctx.add_line(&format!("{}{}</{}>", open, escape_html(content), tag));
        return;
    }
    if children.is_empty() {
        ctx.add_line(&format!("{}</{}>", open, tag));
        return;
    }

    if tag == "pre" {
        if ctx.pretty() {
            ctx.add_indent();
        }
        ctx.add(&open);
        ctx.preformatted += 1;
        for child in children {
            write_inline(child, ctx);
        }
        ctx.preformatted -= 1;
        ctx.add(&format!("</{}>", tag));
        ctx.newline();
        return;
    }

    ctx.add_line(&open);
    ctx.indent();
    for child in children {
        write_node(child, ctx);
    }
    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));
}

/// Compact rendering used inside preformatted content
fn write_inline(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Element {
            tag,
            attributes,
            children,
        } => {
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            ctx.add(">");
            if !is_void(tag) {
                for child in children {
                    write_inline(child, ctx);
                }
                ctx.add(&format!("</{}>", tag));
            }
        }
        VNode::Text { content } => ctx.add(&escape_html(content)),
        other => write_node(other, ctx),
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
