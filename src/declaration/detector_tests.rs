use super::*;
use crate::lexer::tokenize;

fn detect(source: &str) -> Vec<DeclarationSpan<'_>> {
    let tokens = tokenize(source).unwrap();
    DeclarationDetector::new(&tokens).detect()
}

fn summary(source: &str) -> Vec<(DeclarationCategory, String, usize)> {
    detect(source)
        .iter()
        .map(|s| (s.category, s.name.text.to_string(), s.depth))
        .collect()
}

#[test]
fn detects_class_members_with_nesting() {
    let source = "\
public class HtmlDocument : Document {
\tprivate var _title = \"\";

\tpublic get title => _title;

\tpublic function render(indent, depth = 0) {
\t\tvar local = 1;
\t\treturn local;
\t}

\tpublic operator +(other) {
\t\treturn this;
\t}

\tpublic iter items() {
\t\tyield 1;
\t}

\tpublic new(title) {
\t\t_title = title;
\t}
}
";
    assert_eq!(
        summary(source),
        vec![
            (DeclarationCategory::Type, "HtmlDocument".into(), 0),
            (DeclarationCategory::Field, "_title".into(), 1),
            (DeclarationCategory::Property, "title".into(), 1),
            (DeclarationCategory::Method, "render".into(), 1),
            (DeclarationCategory::OperatorOverload, "+".into(), 1),
            (DeclarationCategory::Iterator, "items".into(), 1),
            (DeclarationCategory::Method, "new".into(), 1),
        ]
    );
}

#[test]
fn members_point_at_their_enclosing_type() {
    let spans = detect("class A {\n\tfunction f() {}\n}\n");
    assert_eq!(spans[0].parent, None);
    assert_eq!(spans[1].parent, Some(0));
}

#[test]
fn type_span_covers_closing_brace() {
    let spans = detect("class A {\n\tvar x;\n}\n");
    assert_eq!(spans[0].start_line(), 1);
    assert_eq!(spans[0].end_line(), 3);
    assert!(spans[0].end.is_punct("}"));
}

#[test]
fn visibility_defaults_to_private() {
    let spans = detect("class A {\n\tvar a;\n\tprotected static var b;\n\tpublic var c;\n}\n");
    let visibilities: Vec<_> = spans[1..].iter().map(|s| s.visibility).collect();
    assert_eq!(
        visibilities,
        vec![
            Visibility::Private,
            Visibility::Protected,
            Visibility::Public
        ]
    );
}

#[test]
fn span_starts_at_first_modifier() {
    let spans = detect("class A {\n\tpublic static function f() {}\n}\n");
    assert_eq!(spans[1].start.text, "public");
    assert_eq!(spans[1].name.text, "f");
}

#[test]
fn multiple_declarators_produce_one_field_each() {
    let spans = detect("class A {\n\tprivate var a = 1, b = [1, 2], c;\n}\n");
    let names: Vec<_> = spans[1..].iter().map(|s| s.name.text).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(spans[1].start.text, "private");
    assert_eq!(spans[2].start.text, "b");
    assert!(spans[3].end.is_punct(";"));
}

#[test]
fn const_fields_are_marked_constant() {
    let spans = detect("class A {\n\tpublic const maxDepth = 3;\n\tvar other;\n}\n");
    assert!(spans[1].constant);
    assert!(!spans[2].constant);
}

#[test]
fn enum_values_are_public_children() {
    let spans = detect("enum Color {\n\tred,\n\n\tgreen = 2,\n\n\tblue\n}\n");
    let values: Vec<_> = spans
        .iter()
        .filter(|s| s.category == DeclarationCategory::EnumValue)
        .collect();
    assert_eq!(values.len(), 3);
    assert!(values.iter().all(|s| s.visibility == Visibility::Public));
    assert!(values.iter().all(|s| s.parent == Some(0)));
    assert_eq!(values[1].end.text, "2");
}

#[test]
fn lambdas_are_never_declarations() {
    let source = "\
class A {
\tprivate var handler = @(x) {
\t\treturn x;
\t};

\tprivate var other = function(y) {
\t\tfunction inner() {}
\t};
}
var top = function(z) { return z; };
";
    let categories: Vec<_> = detect(source).iter().map(|s| s.category).collect();
    assert_eq!(
        categories,
        vec![
            DeclarationCategory::Type,
            DeclarationCategory::Field,
            DeclarationCategory::Field
        ]
    );
}

#[test]
fn locals_inside_method_bodies_are_not_fields() {
    let spans = detect("class A {\n\tfunction f() {\n\t\tvar x = 1;\n\t}\n}\n");
    assert!(spans.iter().all(|s| s.category != DeclarationCategory::Field));
}

#[test]
fn top_level_functions_are_methods() {
    let spans = detect("function main() {\n\treturn 0;\n}\n");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, DeclarationCategory::Method);
    assert_eq!(spans[0].depth, 0);
}

#[test]
fn expression_bodied_members_end_at_semicolon() {
    let spans = detect("class A {\n\tpublic get size => { \"a\": 1 }.length;\n}\n");
    assert_eq!(spans[1].category, DeclarationCategory::Property);
    assert!(spans[1].end.is_punct(";"));
}

#[test]
fn nested_types_are_detected() {
    let spans = detect("class Outer {\n\tclass Inner {\n\t\tvar x;\n\t}\n}\n");
    assert_eq!(spans.len(), 3);
    assert_eq!(spans[1].parent, Some(0));
    assert_eq!(spans[2].parent, Some(1));
    assert_eq!(spans[2].depth, 2);
}

#[test]
fn unclassifiable_blocks_are_skipped_silently() {
    let spans = detect("if (x) {\n\tclass Hidden {}\n}\nclass Visible {}\n");
    let names: Vec<_> = spans.iter().map(|s| s.name.text).collect();
    assert_eq!(names, vec!["Visible"]);
}

#[test]
fn unbalanced_input_degrades_without_panicking() {
    let spans = detect("class A {\n\tfunction f() {\n");
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].category, DeclarationCategory::Type);

    let spans = detect("}}} class B { } )");
    assert_eq!(spans.len(), 1);
}

#[test]
fn logical_name_strips_leading_underscores() {
    let spans = detect("class A {\n\tprivate var __count;\n}\n");
    assert_eq!(spans[1].logical_name(), "count");
}

#[test]
fn namespace_blocks_are_transparent() {
    let source = "\
namespace app {
\tclass DataContainer {
\t\tpublic var a;
\t}

\tnamespace inner {
\t\tenum Mode {
\t\t\ton
\t\t}
\t}
}

class After {
}
";
    let spans = detect(source);
    assert_eq!(
        summary(source),
        vec![
            (DeclarationCategory::Type, "DataContainer".into(), 0),
            (DeclarationCategory::Field, "a".into(), 1),
            (DeclarationCategory::Type, "Mode".into(), 0),
            (DeclarationCategory::EnumValue, "on".into(), 1),
            (DeclarationCategory::Type, "After".into(), 0),
        ]
    );
    assert_eq!(spans[0].parent, None);
    assert_eq!(spans[1].parent, Some(0));
    assert_eq!(spans[0].end.line(), 4);
}

#[test]
fn namespace_statement_form_is_skipped() {
    assert_eq!(
        summary("namespace app;\nclass A {\n}\n"),
        vec![(DeclarationCategory::Type, "A".into(), 0)]
    );
}
