//! Tests for source map line number accuracy.
//!
//! These tests verify that positions in the generated TSX map back to their
//! original positions in the Astro source.

use astro_ast::{Attribute, Element, Tree, TreeBuilder};
use astro_tsx::{print_to_tsx, PrintResult, TsxOptions};
use source_map::{ByteOffset, LineCol, LineIndex};

const LIST_PAGE: &str = r#"---
const title = "Hi";
const items = [1, 2];
---
<main>
  <h1>{title}</h1>
  <ul>{items.map((i) => <li>{i}</li>)}</ul>
</main>
"#;

/// Byte offset of the first occurrence of `needle` in `text`.
fn at(text: &str, needle: &str) -> u32 {
    text.find(needle)
        .unwrap_or_else(|| panic!("'{needle}' not found")) as u32
}

fn list_page_tree() -> Tree {
    let s = LIST_PAGE;
    let main_end = at(s, "<main>") + 6;
    let h1_end = at(s, "</h1>") + 5;
    let li_end = at(s, "</li>") + 5;
    let ul_end = at(s, "</ul>") + 5;

    TreeBuilder::new()
        .open_frontmatter(0)
        .text(3, "\nconst title = \"Hi\";\nconst items = [1, 2];\n")
        .close()
        .text(at(s, "---\n<main>") + 3, "\n")
        .open(Element::new("main"), at(s, "<main>"))
        .text(main_end, "\n  ")
        .open(Element::new("h1"), at(s, "<h1>"))
        .open_expression(at(s, "{title}"))
        .text(at(s, "{title}") + 1, "title")
        .close_at(at(s, "}</h1>"))
        .close_at(at(s, "</h1>"))
        .text(h1_end, "\n  ")
        .open(Element::new("ul"), at(s, "<ul>"))
        .open_expression(at(s, "{items"))
        .text(at(s, "{items") + 1, "items.map((i) => ")
        .open(Element::new("li"), at(s, "<li>"))
        .open_expression(at(s, "{i}"))
        .text(at(s, "{i}") + 1, "i")
        .close_at(at(s, "}</li>"))
        .close_at(at(s, "</li>"))
        .text(li_end, ")")
        .close_at(li_end + 1)
        .close_at(at(s, "</ul>"))
        .text(ul_end, "\n")
        .close_at(at(s, "</main>"))
        .text(at(s, "</main>") + 7, "\n")
        .finish()
}

fn print_list_page() -> PrintResult {
    print_to_tsx(
        LIST_PAGE,
        list_page_tree().root(),
        &TsxOptions::with_filename("List.astro"),
    )
}

/// Print the list page and verify that a generated pattern maps back to the expected source line.
fn verify_line_mapping(generated_pattern: &str, expected_source_line: u32) {
    let result = print_list_page();

    let generated_offset = result
        .code
        .find(generated_pattern)
        .unwrap_or_else(|| panic!("Pattern '{generated_pattern}' not found in generated TSX"))
        as u32;

    let original_offset = result
        .chunk
        .original_offset(ByteOffset::from(generated_offset))
        .unwrap_or_else(|| {
            panic!(
                "No source mapping found for pattern '{generated_pattern}' at generated offset {generated_offset}.\n\
                 Generated TSX:\n{}",
                result.code
            )
        });

    let line = LineIndex::new(LIST_PAGE).line_col(original_offset).unwrap().line + 1;
    assert_eq!(
        line, expected_source_line,
        "Expected pattern '{generated_pattern}' to map to line {expected_source_line}, but got line {line}.\n\
         Generated TSX:\n{}",
        result.code
    );
}

// ============================================================================
// LINE NUMBER TESTS
// ============================================================================

#[test]
fn test_frontmatter_line_numbers() {
    verify_line_mapping("const title", 2);
    verify_line_mapping("const items", 3);
}

#[test]
fn test_markup_line_numbers() {
    verify_line_mapping("<main>", 5);
    verify_line_mapping("<h1>", 6);
    verify_line_mapping("title}", 6);
    verify_line_mapping("<ul>", 7);
    verify_line_mapping("items.map", 7);
    verify_line_mapping("<li>", 7);
    verify_line_mapping("</main>", 8);
}

#[test]
fn test_generated_output_shape() {
    let result = print_list_page();
    let expected = "\nconst title = \"Hi\";\nconst items = [1, 2];\n<Fragment>\n\n\
                    <main>\n  <h1>{title}</h1>\n  \
                    <ul>{items.map((i) => <Fragment><li>{i}</li></Fragment>)}</ul>\n</main>\n\n</Fragment>\n\n\
                    export default function List__AstroComponent_(_props: Record<string, any>): any {}\n";
    pretty_assertions::assert_eq!(result.code, expected);
}

// ============================================================================
// LINE/COLUMN LOOKUPS
// ============================================================================

#[test]
fn test_line_col_lookup() {
    let result = print_list_page();
    let generated = LineIndex::new(&result.code)
        .line_col_utf16(ByteOffset::from(at(&result.code, "title}")))
        .unwrap();

    // `title` sits on line 6, column 7 of the source.
    assert_eq!(
        result.chunk.original_position(generated),
        Some(LineCol::new(5, 7))
    );
}

#[test]
fn test_synthetic_output_has_no_position() {
    let result = print_list_page();
    let generated = LineIndex::new(&result.code)
        .line_col_utf16(ByteOffset::from(at(&result.code, "export default")))
        .unwrap();
    assert_eq!(result.chunk.original_position(generated), None);
}

#[test]
fn test_columns_are_utf16() {
    let source = "<p title=\"😀\">x</p>";
    let tree = TreeBuilder::new()
        .open(
            Element::new("p").with_attribute(Attribute::quoted("title", "😀", 3, 9)),
            0,
        )
        .text(at(source, "x"), "x")
        .close_at(at(source, "</p>"))
        .finish();

    let result = print_to_tsx(source, tree.root().first_child().unwrap(), &TsxOptions::default());
    let x = result
        .chunk
        .segments()
        .find(|s| s.original_offset == Some(ByteOffset::from(at(source, "x"))))
        .expect("segment for the text node");
    // The emoji is four bytes but two UTF-16 code units.
    assert_eq!(x.original, Some(LineCol::new(0, 14)));
    assert_eq!(x.generated, LineCol::new(0, 14));
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_mappings_are_monotonic() {
    let result = print_list_page();
    let originals: Vec<ByteOffset> = result
        .chunk
        .segments()
        .filter_map(|s| s.original_offset)
        .collect();

    assert!(originals.len() > 10, "too few mappings: {}", originals.len());
    for pair in originals.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "mapping went backwards: {:?} then {:?}\n{:?}",
            pair[0],
            pair[1],
            result.chunk
        );
    }
}

#[test]
fn test_source_map_tokens() {
    let result = print_list_page();
    let map = result
        .chunk
        .to_source_map("List.tsx", "List.astro", Some(LIST_PAGE));
    assert_eq!(map.get_file(), Some("List.tsx"));
    assert_eq!(map.get_source(0), Some("List.astro"));
    assert_eq!(map.get_source_contents(0), Some(LIST_PAGE));
    assert_eq!(map.get_token_count() as usize, result.chunk.len());

    // The frontmatter body opens the output and starts after the fence.
    let first = map.get_token(0).unwrap();
    assert_eq!(first.get_dst(), (0, 0));
    assert_eq!(first.get_src(), (0, 3));

    let title = at(&result.code, "{title}");
    let generated = LineIndex::new(&result.code)
        .line_col_utf16(ByteOffset::from(title))
        .unwrap();
    let token = map.lookup_token(generated.line, generated.col).unwrap();
    assert_eq!(token.get_source(), Some("List.astro"));
    assert_eq!(token.get_src_line(), 5);
}
