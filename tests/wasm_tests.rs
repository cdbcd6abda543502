//! WASM tests using wasm_bindgen_test
//!
//! Run with: wasm-pack test --headless --chrome --features wasm
//! Or natively: see tests in src/wasm.rs (run with cargo test --features wasm)

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

use pixelgrid::wasm::{import_png, Editor};

#[wasm_bindgen_test]
fn test_editor_paints_and_exports() {
    let mut editor = Editor::new(4).unwrap();
    editor.set_tool("pencil").unwrap();
    editor.set_color("#0000ff").unwrap();
    assert_eq!(editor.click(3, 3).unwrap(), vec![3, 3, 0x0000ffff]);

    let png = editor.export_png(2).unwrap();
    assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
}

#[wasm_bindgen_test]
fn test_editor_fill_and_erase() {
    let mut editor = Editor::new(3).unwrap();
    editor.set_tool("fill").unwrap();
    assert_eq!(editor.click(1, 1).unwrap().len(), 27);

    editor.set_tool("eraser").unwrap();
    editor.set_eraser_size(1).unwrap();
    assert_eq!(editor.click(1, 1).unwrap(), vec![1, 1, 0xffffffff]);
    assert_eq!(editor.get_cell(0, 0).unwrap(), "#000000");
}

#[wasm_bindgen_test]
fn test_import_roundtrips_exported_png() {
    let editor = Editor::new(2).unwrap();
    let png = editor.export_png(1).unwrap();
    let reencoded = import_png(&png).unwrap();
    assert_eq!(&reencoded[0..4], &[0x89, 0x50, 0x4E, 0x47]);
}
