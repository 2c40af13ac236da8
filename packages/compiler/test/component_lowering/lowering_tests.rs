//! Component Lowering Tests
//!
//! Drives the lowering pass through the public API on documents shaped the way
//! the markup parser and descriptor binder hand them over.

use razor_compiler::descriptor::Descriptor;
use razor_compiler::diagnostics::DiagnosticKind;
use razor_compiler::template::pipeline::ir::{
    Document, DocumentBuilder, NodeId, NodeKind, Segment, TagMode,
};
use razor_compiler::ComponentLoweringPass;

fn child_kinds(document: &Document, id: NodeId) -> Vec<&'static str> {
    document
        .children(id)
        .iter()
        .map(|child| document.kind(*child).name())
        .collect()
}

fn greeter() -> Descriptor {
    Descriptor::component("Test.Greeter")
        .with_assembly("Test")
        .with_bound_attribute("Name", "Name", Some("System.String"))
        .with_bound_attribute("Title", "Title", Some("System.String"))
}

fn lower(document: &mut Document) {
    ComponentLoweringPass::new().execute(document);
}

#[test]
fn should_lower_greeter_with_attribute_and_body() {
    // <Greeter Name="World">Hi</Greeter>
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[greeter]);
    builder.bound_attribute(usage, "Name", greeter, "World");
    builder.body(usage, "Hi");
    let mut document = builder.finish();

    lower(&mut document);

    let children = document.children(usage).to_vec();
    assert_eq!(
        child_kinds(&document, usage),
        vec![
            "ComponentOpen",
            "ComponentAttribute",
            "ComponentBody",
            "ComponentClose"
        ]
    );
    assert_eq!(
        document.kind(children[0]),
        &NodeKind::ComponentOpen {
            type_name: "Test.Greeter".to_string()
        }
    );
    match document.kind(children[1]) {
        NodeKind::ComponentAttribute(attribute) => assert_eq!(attribute.property_name, "Name"),
        other => panic!("expected a component attribute, found {}", other.name()),
    }
    assert_eq!(document.text_content(children[1]), "World");
    assert_eq!(document.text_content(children[2]), "Hi");
    assert!(document.diagnostics.is_empty());
    assert!(document.validate().is_ok());
}

#[test]
fn should_lower_empty_usage_to_open_empty_body_close() {
    // <Greeter></Greeter>
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[greeter]);
    builder.body(usage, "");
    let mut document = builder.finish();

    lower(&mut document);

    assert_eq!(
        child_kinds(&document, usage),
        vec!["ComponentOpen", "ComponentBody", "ComponentClose"]
    );
    let body = document.children(usage)[1];
    assert!(document.children(body).is_empty());
}

#[test]
fn should_keep_non_component_usages_identical() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let form = builder.descriptor(
        Descriptor::tag_helper("Test.FormTagHelper").with_bound_attribute("asp-action", "Action", None),
    );
    let root = builder.content_root();
    builder.html(root, "<h1>Title</h1>");
    let usage = builder.tag_usage(root, "form", TagMode::StartTagAndEndTag, &[form]);
    builder.body(usage, "<input />");
    builder.bound_markup(
        usage,
        "asp-action",
        form,
        &[Segment::Html("Save"), Segment::Code("suffix")],
    );
    builder.html_attribute(usage, "method", "post");
    let mut document = builder.finish();
    let before = document.clone();

    lower(&mut document);

    assert_eq!(document, before);
}

#[test]
fn should_place_body_last_before_close_regardless_of_source_order() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[greeter]);
    builder.bound_attribute(usage, "Name", greeter, "World");
    builder.body(usage, "Hi");
    builder.bound_attribute(usage, "Title", greeter, "Welcome");
    let mut document = builder.finish();

    lower(&mut document);

    let kinds = child_kinds(&document, usage);
    assert_eq!(kinds.first(), Some(&"ComponentOpen"));
    assert_eq!(kinds[kinds.len() - 2], "ComponentBody");
    assert_eq!(kinds.last(), Some(&"ComponentClose"));
    let properties: Vec<String> = document
        .children(usage)
        .iter()
        .filter_map(|child| match document.kind(*child) {
            NodeKind::ComponentAttribute(attribute) => Some(attribute.property_name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(properties, vec!["Name", "Title"]);
}

#[test]
fn should_report_ambiguity_and_still_produce_valid_shape() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let first = builder.descriptor(greeter());
    let second = builder.descriptor(Descriptor::component("Other.Greeter"));
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[first, second]);
    builder.bound_attribute(usage, "Name", first, "World");
    builder.body(usage, "Hi");
    let mut document = builder.finish();

    lower(&mut document);

    let ambiguous: Vec<_> = document
        .diagnostics
        .of_kind(DiagnosticKind::AmbiguousComponentMatch)
        .collect();
    assert_eq!(ambiguous.len(), 1);
    assert_eq!(ambiguous[0].node, usage);
    assert_eq!(ambiguous[0].diagnostic.id(), "RZ9985");
    assert_eq!(
        child_kinds(&document, usage),
        vec![
            "ComponentOpen",
            "ComponentAttribute",
            "ComponentBody",
            "ComponentClose"
        ]
    );
}

#[test]
fn should_not_change_already_lowered_document() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[greeter]);
    builder.bound_attribute(usage, "Name", greeter, "World");
    builder.bound_markup(
        usage,
        "Title",
        greeter,
        &[Segment::Html("Hello "), Segment::Code("name"), Segment::Html("!")],
    );
    builder.html_attribute(usage, "data-custom", "x");
    builder.body(usage, "Hi");
    let mut document = builder.finish();

    lower(&mut document);
    let once = document.clone();
    lower(&mut document);

    assert_eq!(document, once);
}

#[test]
fn should_reject_mixed_literal_and_expression_value() {
    // <Greeter Title="Hello @name!" />
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::SelfClosing, &[greeter]);
    let title = builder.bound_markup(
        usage,
        "Title",
        greeter,
        &[Segment::Html("Hello "), Segment::Code("name"), Segment::Html("!")],
    );
    let title_span = builder.document().source_span(title).cloned();
    let mut document = builder.finish();

    lower(&mut document);

    assert!(!document.children(usage).contains(&title));
    assert_eq!(
        child_kinds(&document, usage),
        vec!["ComponentOpen", "ComponentBody", "ComponentClose"]
    );
    let entries: Vec<_> = document.diagnostics.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].node, usage);
    let diagnostic = &entries[0].diagnostic;
    assert_eq!(diagnostic.kind, DiagnosticKind::UnsupportedComplexContent);
    assert_eq!(diagnostic.source_span, title_span);
    assert_eq!(
        diagnostic.message(),
        "Component attributes do not support complex content (mixed code and markup). \
         Attribute: 'Title', text 'Hello name!'"
    );
}

#[test]
fn should_reject_attribute_missing_from_descriptor() {
    // <Greeter data-custom="x" />
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::SelfClosing, &[greeter]);
    builder.bound_attribute(usage, "Name", greeter, "World");
    let custom = builder.html_attribute(usage, "data-custom", "x");
    let mut document = builder.finish();

    lower(&mut document);

    assert!(!document.children(usage).contains(&custom));
    assert_eq!(
        child_kinds(&document, usage),
        vec!["ComponentOpen", "ComponentAttribute", "ComponentBody", "ComponentClose"]
    );
    let entries: Vec<_> = document.diagnostics.iter().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].diagnostic.kind, DiagnosticKind::UnboundComponentAttribute);
    assert_eq!(
        entries[0].diagnostic.to_string(),
        format!(
            "RZ9987: The component 'Test.Greeter' does not have an attribute named 'data-custom'. ({})",
            entries[0].diagnostic.source_span.as_ref().map(ToString::to_string).unwrap_or_default()
        )
    );
}

#[test]
fn should_produce_one_diagnostic_per_removed_child() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::StartTagAndEndTag, &[greeter]);
    builder.html_attribute(usage, "class", "a");
    builder.bound_expression(usage, "Name", greeter, &["first", " + last"]);
    builder.html_attribute(usage, "id", "b");
    builder.bound_attribute(usage, "Title", greeter, "Ok");
    builder.body(usage, "");
    let mut document = builder.finish();
    let before = document.children(usage).len();

    lower(&mut document);

    // Open and close are added, three children are rejected.
    let after = document.children(usage).len();
    assert_eq!(before + 2 - 3, after);
    assert_eq!(document.diagnostics.len(), 3);
    assert_eq!(
        document
            .diagnostics
            .of_kind(DiagnosticKind::UnboundComponentAttribute)
            .count(),
        2
    );
}

#[test]
fn should_lower_nested_usages_in_source_order() {
    // <Card><Greeter Name="World" /></Card>
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let card = builder.descriptor(Descriptor::component("Test.Card"));
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let outer = builder.tag_usage(root, "Card", TagMode::StartTagAndEndTag, &[card]);
    let body = builder.body(outer, "");
    let inner = builder.tag_usage(body, "Greeter", TagMode::SelfClosing, &[greeter]);
    builder.bound_attribute(inner, "Name", greeter, "World");
    builder.html_attribute(inner, "data-x", "1");
    builder.html_attribute(outer, "data-y", "2");
    let mut document = builder.finish();

    lower(&mut document);

    assert_eq!(
        child_kinds(&document, outer),
        vec!["ComponentOpen", "ComponentBody", "ComponentClose"]
    );
    let lowered_body = document.children(outer)[1];
    assert_eq!(document.children(lowered_body), &[inner]);
    assert_eq!(document.parent(inner), Some(lowered_body));
    assert_eq!(
        child_kinds(&document, inner),
        vec!["ComponentOpen", "ComponentAttribute", "ComponentBody", "ComponentClose"]
    );
    let reported: Vec<NodeId> = document.diagnostics.iter().map(|entry| entry.node).collect();
    assert_eq!(reported, vec![outer, inner]);
    assert!(document.validate().is_ok());
}

#[test]
fn should_not_lower_documents_without_class() {
    let mut builder = DocumentBuilder::bare("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let namespace = builder.node(
        root,
        NodeKind::Namespace {
            content: "Test".to_string(),
        },
        0,
    );
    let usage = builder.tag_usage(namespace, "Greeter", TagMode::SelfClosing, &[greeter]);
    builder.html_attribute(usage, "data-custom", "x");
    let mut document = builder.finish();
    let before = document.clone();

    lower(&mut document);

    assert_eq!(document, before);
    assert!(document.diagnostics.is_empty());
}

#[test]
fn should_only_touch_the_usage_subtree() {
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let heading = builder.html(root, "<h1>Hello</h1>");
    let usage = builder.tag_usage(root, "Greeter", TagMode::SelfClosing, &[greeter]);
    let footer = builder.html(root, "<footer />");
    let mut document = builder.finish();

    razor_compiler::lower_document(&mut document);

    assert_eq!(document.children(root), &[heading, usage, footer]);
    assert_eq!(document.text_content(root), "<h1>Hello</h1><footer />");
}

#[test]
fn should_give_bodiless_usage_an_empty_body() {
    // <Greeter Name="World" />
    let mut builder = DocumentBuilder::new("Pages/Index.razor");
    let greeter = builder.descriptor(greeter());
    let root = builder.content_root();
    let usage = builder.tag_usage(root, "Greeter", TagMode::SelfClosing, &[greeter]);
    builder.bound_attribute(usage, "Name", greeter, "World");
    let mut document = builder.finish();

    lower(&mut document);

    assert_eq!(
        child_kinds(&document, usage),
        vec![
            "ComponentOpen",
            "ComponentAttribute",
            "ComponentBody",
            "ComponentClose"
        ]
    );
    let body = document.children(usage)[2];
    assert!(document.children(body).is_empty());
    assert_eq!(document.source_span(body), None);
    match document.kind(body) {
        NodeKind::ComponentBody(body) => {
            assert_eq!(body.tag_name, "Greeter");
            assert_eq!(body.tag_mode, TagMode::SelfClosing);
        }
        other => panic!("expected a component body, found {}", other.name()),
    }
    assert!(document.validate().is_ok());
}
